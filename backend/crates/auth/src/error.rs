//! Auth Error Types
//!
//! Auth-specific error variants that bridge into the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Email/password did not match (surfaced only where a caller needs an error)
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// An account with this email already exists
    #[error("User already exists")]
    DuplicateUser,

    /// Email is not syntactically valid
    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    /// Datastore unreachable or a statement failed
    #[error("Database error: {0}")]
    StoreUnavailable(#[from] sqlx::Error),

    /// Identity provider handshake failed
    #[error("Identity provider error: {0}")]
    ProviderError(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AuthError::DuplicateUser => StatusCode::CONFLICT,
            AuthError::InvalidEmail(_) => StatusCode::BAD_REQUEST,
            AuthError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AuthError::ProviderError(_) => StatusCode::BAD_GATEWAY,
            AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::InvalidCredentials => ErrorKind::Unauthorized,
            AuthError::DuplicateUser => ErrorKind::Conflict,
            AuthError::InvalidEmail(_) => ErrorKind::BadRequest,
            AuthError::StoreUnavailable(_) => ErrorKind::ServiceUnavailable,
            AuthError::ProviderError(_) => ErrorKind::BadGateway,
            AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    ///
    /// `DuplicateUser` keeps its bare message, which is what the registration
    /// form shows.
    pub fn to_app_error(&self) -> AppError {
        match self {
            AuthError::InvalidEmail(reason) => AppError::bad_request(format!("Invalid email: {reason}"))
                .with_action("Please enter a valid email address"),
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    pub fn log(&self) {
        match self {
            AuthError::StoreUnavailable(e) => {
                tracing::error!(error = %e, "Auth datastore error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::ProviderError(msg) => {
                tracing::warn!(message = %msg, "Identity provider error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }

    pub(crate) fn is_duplicate(&self) -> bool {
        matches!(self, AuthError::DuplicateUser)
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<platform::password::PasswordHashError> for AuthError {
    fn from(err: platform::password::PasswordHashError) -> Self {
        AuthError::Internal(err.to_string())
    }
}
