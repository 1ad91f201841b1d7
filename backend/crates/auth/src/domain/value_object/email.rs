//! Email Value Object
//!
//! The login identifier. Always held in canonical form (trimmed, lowercased),
//! so `User@Example.com ` and `user@example.com` are the same account.
//! Beyond that, the only requirement is a single `@` with something on
//! either side; addresses such as `user@localhost` are accepted.

use std::fmt;
use std::str::FromStr;

use crate::error::{AuthError, AuthResult};

/// Canonical email address
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    /// Canonicalize and validate
    pub fn new(email: impl AsRef<str>) -> AuthResult<Self> {
        let email = email.as_ref().trim().to_lowercase();

        if email.is_empty() {
            return Err(AuthError::InvalidEmail("email cannot be empty".into()));
        }

        match email.split_once('@') {
            Some((local, domain))
                if !local.is_empty() && !domain.is_empty() && !domain.contains('@') =>
            {
                Ok(Self(email))
            }
            _ => Err(AuthError::InvalidEmail("expected exactly one '@'".into())),
        }
    }

    /// Wrap a value read back from the database (already canonical)
    pub fn from_db(email: impl Into<String>) -> Self {
        Self(email.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn domain(&self) -> &str {
        self.0.split_once('@').map(|(_, d)| d).unwrap_or("")
    }
}

impl FromStr for Email {
    type Err = AuthError;

    fn from_str(s: &str) -> AuthResult<Self> {
        Email::new(s)
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_valid() {
        assert!(Email::new("user@example.com").is_ok());
        assert!(Email::new("user.name@example.co.jp").is_ok());
        assert!(Email::new("user+tag@example.com").is_ok());
        assert!(Email::new("user@localhost").is_ok());
        assert!(Email::new("first last@example.com").is_ok());
    }

    #[test]
    fn test_email_invalid() {
        for raw in [
            "",
            "   ",
            "userexample.com",
            "user@",
            "@example.com",
            "user@@example.com",
            "a@b@c",
        ] {
            assert!(
                matches!(Email::new(raw), Err(AuthError::InvalidEmail(_))),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_email_canonical_form() {
        let email = Email::new("  User@Example.COM ").unwrap();
        assert_eq!(email.as_str(), "user@example.com");
        assert_eq!(email, Email::new("user@example.com").unwrap());
        assert_eq!(email.domain(), "example.com");
    }
}
