//! Form and query DTOs

use serde::Deserialize;

// ============================================================================
// Login / Register
// ============================================================================

/// Body of `POST /login` and `POST /register`
///
/// The field is called `username` on the form but carries an email address.
#[derive(Clone, Deserialize)]
pub struct CredentialsForm {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for CredentialsForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsForm")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// OAuth Callback
// ============================================================================

/// Query string of `GET /auth/google/secrets`
///
/// Either `code` + `state` on consent, or `error` when the user declined.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OAuthCallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}
