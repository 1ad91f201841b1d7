//! Application Error - Unified error type for the workspace
//!
//! Defines [`AppError`] and the [`AppResult<T>`] alias.

use std::borrow::Cow;
use std::error::Error;
use std::fmt;

use super::kind::ErrorKind;

/// Message shown to clients in place of any 5xx detail
pub const GENERIC_SERVER_MESSAGE: &str = "Something went wrong. Please try again later.";

/// Unified application error
///
/// * `kind` - classification, mapped to an HTTP status
/// * `message` - user-facing message (hidden for 5xx, see [`AppError::public_message`])
/// * `action` - optional hint on what the user should do next
///
/// ```rust
/// use kernel::error::{app_error::AppError, kind::ErrorKind};
///
/// let err = AppError::new(ErrorKind::Conflict, "User already exists");
/// assert_eq!(err.status_code(), 409);
///
/// let err = AppError::bad_request("Invalid email format")
///     .with_action("Please enter a valid email address");
/// assert_eq!(err.action(), Some("Please enter a valid email address"));
/// ```
pub struct AppError {
    kind: ErrorKind,
    message: Cow<'static, str>,
    action: Option<Cow<'static, str>>,
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    #[inline]
    pub fn new(kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            message: message.into(),
            action: None,
        }
    }

    #[inline]
    pub fn bad_request(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::BadRequest, message)
    }

    /// Attach a hint telling the user what to do next
    #[inline]
    pub fn with_action(mut self, action: impl Into<Cow<'static, str>>) -> Self {
        self.action = Some(action.into());
        self
    }

    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    #[inline]
    pub fn status_code(&self) -> u16 {
        self.kind.status_code()
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[inline]
    pub fn action(&self) -> Option<&str> {
        self.action.as_deref()
    }

    #[inline]
    pub fn is_server_error(&self) -> bool {
        self.kind.is_server_error()
    }

    /// Text safe to send to a client.
    ///
    /// Server errors collapse to [`GENERIC_SERVER_MESSAGE`] so that SQL text,
    /// upstream bodies and similar internals never leave the process.
    pub fn public_message(&self) -> String {
        if self.is_server_error() {
            return GENERIC_SERVER_MESSAGE.to_string();
        }
        match &self.action {
            Some(action) => format!("{}. {}", self.message, action),
            None => self.message.to_string(),
        }
    }
}

impl fmt::Debug for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut builder = f.debug_struct("AppError");
        builder.field("kind", &self.kind);
        builder.field("message", &self.message);
        if let Some(action) = &self.action {
            builder.field("action", action);
        }
        builder.finish()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)?;
        if let Some(action) = &self.action {
            write!(f, " (Action: {})", action)?;
        }
        Ok(())
    }
}

impl Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_error() {
        let err = AppError::new(ErrorKind::Conflict, "User already exists");
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(err.status_code(), 409);
        assert_eq!(err.message(), "User already exists");
        assert!(err.action().is_none());
    }

    #[test]
    fn test_bad_request() {
        assert_eq!(AppError::bad_request("x").status_code(), 400);
    }

    #[test]
    fn test_public_message_hides_server_details() {
        let err = AppError::new(
            ErrorKind::InternalServerError,
            "duplicate key value violates unique constraint \"users_email_key\"",
        );
        assert_eq!(err.public_message(), GENERIC_SERVER_MESSAGE);
        assert!(err.to_string().contains("users_email_key"));
    }

    #[test]
    fn test_public_message_includes_action_for_client_errors() {
        let err = AppError::bad_request("Password is too short").with_action("Choose a longer one");
        assert_eq!(err.public_message(), "Password is too short. Choose a longer one");
    }

    #[test]
    fn test_display() {
        let err = AppError::new(ErrorKind::Unauthorized, "Invalid credentials");
        assert_eq!(err.to_string(), "[Unauthorized] Invalid credentials");
    }
}
