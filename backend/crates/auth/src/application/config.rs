//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

use platform::cookie::CookieAttributes;
use platform::crypto::{derive_key, random_bytes};
use platform::password::{HashingParams, PasswordHashError, PasswordHasher};

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Auth application configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// Session cookie name
    pub session_cookie_name: String,
    /// Session secret key for HMAC signing (32 bytes)
    pub session_secret: [u8; 32],
    /// Session lifetime, fixed from creation (24 hours)
    pub session_ttl: Duration,
    /// How long a federated sign-in may stay pending (10 minutes)
    pub oauth_state_ttl: Duration,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
    /// Argon2id cost parameters
    pub hashing: HashingParams,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_cookie_name: "auth_session".to_string(),
            session_secret: [0u8; 32],
            session_ttl: Duration::from_secs(24 * 3600), // 24 hours
            oauth_state_ttl: Duration::from_secs(10 * 60), // 10 minutes
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
            hashing: HashingParams::default(),
            password_pepper: None,
        }
    }
}

impl AuthConfig {
    /// Create config signing sessions with a key derived from `secret`
    pub fn from_secret(secret: &str) -> Self {
        Self {
            session_secret: derive_key(secret),
            ..Default::default()
        }
    }

    /// Create config with a random session secret (for development)
    ///
    /// Sessions do not survive a restart with this config.
    pub fn with_random_secret() -> Self {
        let mut secret = [0u8; 32];
        secret.copy_from_slice(&random_bytes(32));
        Self {
            session_secret: secret,
            ..Default::default()
        }
    }

    /// Create config for development (insecure cookie)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Self::with_random_secret()
        }
    }

    /// Get session TTL in milliseconds
    pub fn session_ttl_ms(&self) -> i64 {
        self.session_ttl.as_millis() as i64
    }

    pub fn session_ttl_chrono(&self) -> chrono::Duration {
        chrono::Duration::milliseconds(self.session_ttl_ms())
    }

    pub fn oauth_state_ttl_chrono(&self) -> chrono::Duration {
        chrono::Duration::milliseconds(self.oauth_state_ttl.as_millis() as i64)
    }

    /// Session cookie attributes derived from this config
    pub fn session_cookie(&self) -> CookieAttributes {
        CookieAttributes {
            name: self.session_cookie_name.clone(),
            secure: self.cookie_secure,
            same_site: self.cookie_same_site,
            max_age: self.session_ttl,
        }
    }

    /// Build the password hasher for these parameters
    pub fn password_hasher(&self) -> Result<PasswordHasher, PasswordHashError> {
        PasswordHasher::new(self.hashing, self.password_pepper.clone())
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("session_cookie_name", &self.session_cookie_name)
            .field("session_secret", &"[REDACTED]")
            .field("session_ttl", &self.session_ttl)
            .field("oauth_state_ttl", &self.oauth_state_ttl)
            .field("cookie_secure", &self.cookie_secure)
            .field("cookie_same_site", &self.cookie_same_site)
            .field("hashing", &self.hashing)
            .field(
                "password_pepper",
                &self.password_pepper.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AuthConfig::default();
        assert_eq!(config.session_cookie_name, "auth_session");
        assert_eq!(config.session_ttl_ms(), 86_400_000);
        assert!(config.cookie_secure);
    }

    #[test]
    fn test_development_is_insecure_and_random() {
        let a = AuthConfig::development();
        let b = AuthConfig::development();
        assert!(!a.cookie_secure);
        assert_ne!(a.session_secret, b.session_secret);
        assert_ne!(a.session_secret, [0u8; 32]);
    }

    #[test]
    fn test_from_secret_is_deterministic() {
        assert_eq!(
            AuthConfig::from_secret("TOPSECRETWORD").session_secret,
            AuthConfig::from_secret("TOPSECRETWORD").session_secret
        );
    }

    #[test]
    fn test_session_cookie_follows_config() {
        let config = AuthConfig::development();
        let cookie = config.session_cookie();
        assert_eq!(cookie.name, "auth_session");
        assert!(!cookie.secure);
        assert_eq!(cookie.max_age.as_secs(), 86_400);
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = AuthConfig {
            password_pepper: Some(b"pepper".to_vec()),
            ..AuthConfig::from_secret("s")
        };
        let output = format!("{config:?}");
        assert!(output.contains("[REDACTED]"));
        assert!(output.contains("password_pepper: Some(\"[REDACTED]\")"));
        assert!(!output.contains("112"));
    }
}
