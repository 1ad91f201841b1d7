//! Domain Layer
//!
//! Contains entities, value objects, and the ports (repository and identity
//! provider traits) the application layer depends on.

pub mod entity;
pub mod identity_provider;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{
    auth_session::AuthSession, pending_authorization::PendingAuthorization, user::User,
};
pub use identity_provider::{AuthorizationRequest, IdentityProvider, VerifiedIdentity};
pub use repository::{AuthSessionRepository, AuthStore, OAuthStateRepository, UserRepository};
