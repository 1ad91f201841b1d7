//! Auth Session Entity
//!
//! Server-side record behind the session cookie. Holds only the user id;
//! the user is looked up again every time the session is resolved.

use chrono::{DateTime, Duration, Utc};
use kernel::id::{SessionId, UserId};

/// Auth session entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    /// Session ID (UUID v4)
    pub session_id: SessionId,
    /// Authenticated principal
    pub user_id: UserId,
    /// Session expiration (Unix timestamp ms). Fixed at creation.
    pub expires_at_ms: i64,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl AuthSession {
    /// Create a new auth session
    ///
    /// TTL is provided by the application layer (config), not hard-coded here.
    pub fn new(user_id: UserId, ttl: Duration) -> Self {
        let now = Utc::now();

        Self {
            session_id: SessionId::new(),
            user_id,
            expires_at_ms: (now + ttl).timestamp_millis(),
            created_at: now,
        }
    }

    /// Check if session has expired
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now().timestamp_millis())
    }

    pub fn is_expired_at(&self, now_ms: i64) -> bool {
        now_ms >= self.expires_at_ms
    }

    /// Get remaining time until expiration
    pub fn remaining_ms(&self) -> i64 {
        let now_ms = Utc::now().timestamp_millis();
        (self.expires_at_ms - now_ms).max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_live() {
        let session = AuthSession::new(UserId::new(), Duration::hours(24));
        assert!(!session.is_expired());
        assert!(session.remaining_ms() > Duration::hours(23).num_milliseconds());
    }

    #[test]
    fn test_expiry_boundary() {
        let session = AuthSession::new(UserId::new(), Duration::seconds(10));
        assert!(!session.is_expired_at(session.expires_at_ms - 1));
        assert!(session.is_expired_at(session.expires_at_ms));
    }

    #[test]
    fn test_zero_ttl_is_expired() {
        let session = AuthSession::new(UserId::new(), Duration::zero());
        assert!(session.is_expired());
        assert_eq!(session.remaining_ms(), 0);
    }
}
