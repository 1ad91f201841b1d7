//! Pending Authorization Entity
//!
//! A federated sign-in that has been sent to the identity provider and not
//! yet come back. Keyed by the CSRF `state` parameter and consumed exactly
//! once by the callback.

use chrono::{Duration, Utc};

#[derive(Clone, PartialEq, Eq)]
pub struct PendingAuthorization {
    /// CSRF state echoed back by the provider
    pub state: String,
    /// Provider name (e.g. `google`)
    pub provider: String,
    /// PKCE verifier matching the challenge sent in the authorization URL
    pub pkce_verifier: String,
    /// Expiration (Unix timestamp ms)
    pub expires_at_ms: i64,
}

impl PendingAuthorization {
    pub fn new(
        state: String,
        provider: impl Into<String>,
        pkce_verifier: String,
        ttl: Duration,
    ) -> Self {
        Self {
            state,
            provider: provider.into(),
            pkce_verifier,
            expires_at_ms: (Utc::now() + ttl).timestamp_millis(),
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp_millis() >= self.expires_at_ms
    }
}

impl std::fmt::Debug for PendingAuthorization {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingAuthorization")
            .field("provider", &self.provider)
            .field("expires_at_ms", &self.expires_at_ms)
            .finish_non_exhaustive()
    }
}
