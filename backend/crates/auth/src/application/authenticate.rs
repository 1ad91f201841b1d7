//! Authenticate Use Case
//!
//! One entry point for every way of proving who you are. Each variant of
//! [`Credentials`] is checked by its own strategy:
//!
//! - `Local`: email + password against the stored digest
//! - `Federated`: provider-verified email, find-or-create
//!
//! The outcome keeps "credentials did not match" ([`AuthOutcome::Failure`])
//! apart from "could not check" ([`AuthOutcome::Error`]).

use std::sync::Arc;

use derive_more::Display;
use platform::password::{ClearTextPassword, PasswordHasher};

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_password::UserPassword};
use crate::error::AuthError;

/// Proof of identity submitted to [`Authenticator::verify`]
pub enum Credentials {
    /// Email and password typed into the login form
    Local {
        email: String,
        password: ClearTextPassword,
    },
    /// Email vouched for by an identity provider
    Federated { provider: &'static str, email: String },
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Credentials::Local { .. } => f.write_str("Credentials::Local"),
            Credentials::Federated { provider, .. } => {
                write!(f, "Credentials::Federated({provider})")
            }
        }
    }
}

/// Why a credential was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum FailureReason {
    #[display("no user with that email")]
    UserNotFound,
    #[display("password did not match")]
    BadCredentials,
}

/// Result of a verification attempt
#[derive(Debug)]
pub enum AuthOutcome {
    /// Credentials are good
    Success(User),
    /// Credentials are wrong
    Failure(FailureReason),
    /// Verification could not be completed
    Error(AuthError),
}

impl AuthOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, AuthOutcome::Success(_))
    }
}

/// Authenticator
pub struct Authenticator<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    hasher: Arc<PasswordHasher>,
}

impl<U> Authenticator<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, hasher: Arc<PasswordHasher>) -> Self {
        Self { user_repo, hasher }
    }

    pub async fn verify(&self, credentials: Credentials) -> AuthOutcome {
        let outcome = match credentials {
            Credentials::Local { email, password } => self.verify_local(&email, password).await,
            Credentials::Federated { provider, email } => {
                self.find_or_create(provider, &email).await
            }
        };

        match &outcome {
            AuthOutcome::Success(user) => {
                tracing::debug!(user_id = %user.user_id, "Credentials accepted");
            }
            AuthOutcome::Failure(reason) => {
                tracing::debug!(%reason, "Credentials refused");
            }
            AuthOutcome::Error(e) => e.log(),
        }

        outcome
    }

    /// Local strategy
    ///
    /// Unknown emails and federated-only accounts still pay one Argon2 hash,
    /// so response time does not reveal which emails have a local password.
    async fn verify_local(&self, email: &str, password: ClearTextPassword) -> AuthOutcome {
        let user = match Email::new(email) {
            // An invalid email cannot belong to any account.
            Err(_) => None,
            Ok(email) => match self.user_repo.find_by_email(&email).await {
                Ok(user) => user,
                Err(e) => return AuthOutcome::Error(e),
            },
        };

        let hasher = Arc::clone(&self.hasher);
        let stored = user.as_ref().map(|user| user.password.clone());
        let matched = match tokio::task::spawn_blocking(move || match stored {
            Some(stored) if !stored.is_federated_only() => stored.verify(&hasher, &password),
            _ => {
                let _ = hasher.hash(&password);
                false
            }
        })
        .await
        {
            Ok(matched) => matched,
            Err(e) => return AuthOutcome::Error(AuthError::Internal(e.to_string())),
        };

        match user {
            Some(user) if matched => AuthOutcome::Success(user),
            Some(_) => AuthOutcome::Failure(FailureReason::BadCredentials),
            None => AuthOutcome::Failure(FailureReason::UserNotFound),
        }
    }

    /// Federated strategy
    async fn find_or_create(&self, provider: &'static str, email: &str) -> AuthOutcome {
        let email = match Email::new(email) {
            Ok(email) => email,
            Err(_) => {
                return AuthOutcome::Error(AuthError::ProviderError(format!(
                    "{provider} returned an unusable email"
                )));
            }
        };

        match self.user_repo.find_by_email(&email).await {
            Ok(Some(user)) => return AuthOutcome::Success(user),
            Ok(None) => {}
            Err(e) => return AuthOutcome::Error(e),
        }

        match self
            .user_repo
            .insert(&email, &UserPassword::FederatedOnly)
            .await
        {
            Ok(user) => {
                tracing::info!(user_id = %user.user_id, provider, "Federated user created");
                AuthOutcome::Success(user)
            }
            // Lost a race with a concurrent first sign-in for the same email.
            Err(e) if e.is_duplicate() => match self.user_repo.find_by_email(&email).await {
                Ok(Some(user)) => AuthOutcome::Success(user),
                Ok(None) => AuthOutcome::Error(AuthError::Internal(
                    "user vanished after duplicate insert".into(),
                )),
                Err(e) => AuthOutcome::Error(e),
            },
            Err(e) => AuthOutcome::Error(e),
        }
    }
}
