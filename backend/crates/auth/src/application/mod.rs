//! Application Layer
//!
//! Use cases and application services.

pub mod authenticate;
pub mod config;
pub mod federated_sign_in;
pub mod session_manager;
pub mod sign_up;

// Re-exports
pub use authenticate::{AuthOutcome, Authenticator, Credentials, FailureReason};
pub use config::AuthConfig;
pub use federated_sign_in::FederatedSignInUseCase;
pub use session_manager::{IssuedSession, SessionManager};
pub use sign_up::{SignUpInput, SignUpUseCase};
