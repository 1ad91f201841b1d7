//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository and identity provider traits
//! - `application/` - Use cases and application services
//! - `infra/` - PostgreSQL, in-memory and Google implementations
//! - `presentation/` - HTTP handlers, DTOs, route guard, router
//!
//! ## Features
//! - Registration and login with email + password
//! - Sign in with Google (authorization code + PKCE), find-or-create by email
//! - Server-side sessions behind a signed, HttpOnly cookie
//! - Route guard redirecting anonymous visitors to `/login`
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, salted per hash
//! - Accounts created through Google carry no usable local password
//! - Sessions hold only the user id and expire 24 hours after creation
//! - Unknown email and wrong password are indistinguishable over HTTP

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::AuthConfig;
pub use error::{AuthError, AuthResult};
pub use infra::google::{GoogleConfig, GoogleIdentityProvider};
pub use infra::memory::MemoryAuthRepository;
pub use infra::postgres::PgAuthRepository;
pub use presentation::router::{auth_router, auth_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
