//! Sign Up Use Case
//!
//! Registers a local account with email and password.

use std::sync::Arc;

use platform::password::{ClearTextPassword, PasswordHasher};

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_password::UserPassword};
use crate::error::{AuthError, AuthResult};

/// Sign up input
pub struct SignUpInput {
    pub email: String,
    pub password: String,
}

/// Sign up use case
pub struct SignUpUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    hasher: Arc<PasswordHasher>,
}

impl<U> SignUpUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, hasher: Arc<PasswordHasher>) -> Self {
        Self { user_repo, hasher }
    }

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<User> {
        let email = Email::new(&input.email)?;

        // Cheap check first; the unique index still has the final word.
        if self.user_repo.find_by_email(&email).await?.is_some() {
            return Err(AuthError::DuplicateUser);
        }

        // Any password is accepted; it is only normalized before hashing.
        let clear_text = ClearTextPassword::new(input.password);
        let hasher = Arc::clone(&self.hasher);
        let password = tokio::task::spawn_blocking(move || {
            UserPassword::from_clear_text(&hasher, &clear_text)
        })
        .await
        .map_err(|e| AuthError::Internal(e.to_string()))??;

        let user = self.user_repo.insert(&email, &password).await?;

        tracing::info!(user_id = %user.user_id, "User signed up");

        Ok(user)
    }
}
