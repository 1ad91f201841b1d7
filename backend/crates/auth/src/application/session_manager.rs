//! Session Manager
//!
//! Issues, resolves and destroys server-side sessions.
//!
//! The cookie value is `"{session_id}.{signature}"` where the signature is
//! base64url(HMAC-SHA256(secret, session_id)). A token with a bad signature is
//! rejected before the datastore is touched.

use std::sync::Arc;

use kernel::id::SessionId;
use platform::crypto::{from_base64url, hmac_sha256, to_base64url, verify_hmac_sha256};
use uuid::Uuid;

use crate::application::config::AuthConfig;
use crate::domain::entity::{auth_session::AuthSession, user::User};
use crate::domain::repository::{AuthSessionRepository, UserRepository};
use crate::error::AuthResult;

/// A freshly created session, ready to be sent as a cookie
#[derive(Debug, Clone)]
pub struct IssuedSession {
    /// Signed cookie value
    pub token: String,
    pub session_id: SessionId,
    pub expires_at_ms: i64,
}

/// Session manager
pub struct SessionManager<R>
where
    R: UserRepository + AuthSessionRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> SessionManager<R>
where
    R: UserRepository + AuthSessionRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    /// Start a session for an authenticated user
    pub async fn create(&self, user: &User) -> AuthResult<IssuedSession> {
        let session = AuthSession::new(user.user_id, self.config.session_ttl_chrono());
        self.repo.create_session(&session).await?;

        tracing::info!(
            user_id = %user.user_id,
            session_id = %session.session_id,
            "Session created"
        );

        Ok(IssuedSession {
            token: self.sign(&session.session_id),
            session_id: session.session_id,
            expires_at_ms: session.expires_at_ms,
        })
    }

    /// Resolve a cookie value to the signed-in user.
    ///
    /// `Ok(None)` for a forged, unknown or expired token, and for a session
    /// whose user no longer exists. Datastore failures are `Err`.
    pub async fn resolve(&self, token: &str) -> AuthResult<Option<User>> {
        let Some(session_id) = self.verify(token) else {
            return Ok(None);
        };

        let Some(session) = self.repo.find_session(&session_id).await? else {
            return Ok(None);
        };

        if session.is_expired() {
            self.repo.delete_session(&session_id).await?;
            tracing::debug!(session_id = %session_id, "Expired session removed");
            return Ok(None);
        }

        let user = self.repo.find_by_id(&session.user_id).await?;
        if user.is_none() {
            tracing::warn!(
                session_id = %session_id,
                user_id = %session.user_id,
                "Session refers to a missing user"
            );
        }
        Ok(user)
    }

    /// End the session behind a cookie value. Unknown or forged tokens are ignored.
    pub async fn destroy(&self, token: &str) -> AuthResult<()> {
        if let Some(session_id) = self.verify(token) {
            self.repo.delete_session(&session_id).await?;
            tracing::info!(session_id = %session_id, "Session destroyed");
        }
        Ok(())
    }

    /// Whether the (optional) cookie value resolves to a user.
    /// Datastore failures count as not authenticated.
    pub async fn is_authenticated(&self, token: Option<&str>) -> bool {
        match token {
            Some(token) => matches!(self.resolve(token).await, Ok(Some(_))),
            None => false,
        }
    }

    fn sign(&self, session_id: &SessionId) -> String {
        let id = session_id.to_string();
        let signature = hmac_sha256(&self.config.session_secret, id.as_bytes());
        format!("{}.{}", id, to_base64url(&signature))
    }

    /// Check the signature and parse the session id
    fn verify(&self, token: &str) -> Option<SessionId> {
        let (id, signature_b64) = token.split_once('.')?;
        let signature = from_base64url(signature_b64).ok()?;

        if !verify_hmac_sha256(&self.config.session_secret, id.as_bytes(), &signature) {
            tracing::debug!("Session token with invalid signature");
            return None;
        }

        id.parse::<Uuid>().ok().map(SessionId::from_uuid)
    }
}
