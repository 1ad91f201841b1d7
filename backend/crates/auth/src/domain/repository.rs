//! Repository Traits
//!
//! Interfaces for data persistence. Implementations live in the
//! infrastructure layer (`infra::postgres`, `infra::memory`).

use kernel::id::{SessionId, UserId};

use crate::domain::entity::{
    auth_session::AuthSession, pending_authorization::PendingAuthorization, user::User,
};
use crate::domain::value_object::{email::Email, user_password::UserPassword};
use crate::error::AuthResult;

/// Credential store
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Find user by ID
    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>>;

    /// Find user by canonical email
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    /// Insert a new user and return it with its generated id.
    ///
    /// Fails with `AuthError::DuplicateUser` if the email is taken; an
    /// existing row is never overwritten.
    async fn insert(&self, email: &Email, password: &UserPassword) -> AuthResult<User>;
}

/// Auth session repository trait
#[trait_variant::make(AuthSessionRepository: Send)]
pub trait LocalAuthSessionRepository {
    /// Create a new session
    async fn create_session(&self, session: &AuthSession) -> AuthResult<()>;

    /// Find session by ID (expired rows are returned; the caller decides)
    async fn find_session(&self, session_id: &SessionId) -> AuthResult<Option<AuthSession>>;

    /// Delete a session. Deleting an unknown id is not an error.
    async fn delete_session(&self, session_id: &SessionId) -> AuthResult<()>;

    /// Delete all expired sessions, returning how many went
    async fn cleanup_expired_sessions(&self) -> AuthResult<u64>;
}

/// Storage for federated sign-ins in flight
#[trait_variant::make(OAuthStateRepository: Send)]
pub trait LocalOAuthStateRepository {
    /// Persist a pending authorization
    async fn save_state(&self, pending: &PendingAuthorization) -> AuthResult<()>;

    /// Atomically remove and return the pending authorization for `state`.
    ///
    /// Returns `None` if unknown, already consumed, or expired.
    async fn take_state(&self, state: &str) -> AuthResult<Option<PendingAuthorization>>;

    /// Delete expired pending authorizations
    async fn cleanup_expired_states(&self) -> AuthResult<u64>;
}

/// Everything the auth router needs from a single backing store
pub trait AuthStore:
    UserRepository + AuthSessionRepository + OAuthStateRepository + Clone + Send + Sync + 'static
{
}

impl<T> AuthStore for T where
    T: UserRepository + AuthSessionRepository + OAuthStateRepository + Clone + Send + Sync + 'static
{
}
