//! User Password Value Object
//!
//! What the `users.password` column holds: either an Argon2id digest, or the
//! sentinel marking an account that can only sign in through an identity
//! provider. Hashing itself is delegated to `platform::password`.

use std::fmt;

use platform::password::{ClearTextPassword, HashedPassword, PasswordHasher};

use crate::error::AuthResult;

/// Stored in place of a digest for accounts created by federated sign-in
pub const FEDERATED_ONLY_MARKER: &str = "google";

/// Stored credential of a user
#[derive(Clone, PartialEq, Eq)]
pub enum UserPassword {
    /// Local account with a salted digest
    Hashed(HashedPassword),
    /// Account created through an identity provider; has no local password
    FederatedOnly,
}

impl UserPassword {
    /// Hash a policy-checked password for storage
    pub fn from_clear_text(
        hasher: &PasswordHasher,
        password: &ClearTextPassword,
    ) -> AuthResult<Self> {
        Ok(Self::Hashed(hasher.hash(password)?))
    }

    /// Check a submitted password.
    ///
    /// Federated-only accounts never match, whatever was typed; a digest
    /// that does not parse never matches either.
    pub fn verify(&self, hasher: &PasswordHasher, candidate: &ClearTextPassword) -> bool {
        match self {
            UserPassword::Hashed(digest) => hasher.verify(candidate, digest),
            UserPassword::FederatedOnly => false,
        }
    }

    pub fn is_federated_only(&self) -> bool {
        matches!(self, UserPassword::FederatedOnly)
    }

    /// Column value
    pub fn to_db(&self) -> &str {
        match self {
            UserPassword::Hashed(digest) => digest.as_phc_string(),
            UserPassword::FederatedOnly => FEDERATED_ONLY_MARKER,
        }
    }

    /// Read the column value back
    pub fn from_db(value: impl Into<String>) -> Self {
        let value = value.into();
        if value == FEDERATED_ONLY_MARKER {
            UserPassword::FederatedOnly
        } else {
            UserPassword::Hashed(HashedPassword::from_stored(value))
        }
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserPassword::Hashed(_) => f.write_str("UserPassword::Hashed([HASH])"),
            UserPassword::FederatedOnly => f.write_str("UserPassword::FederatedOnly"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::password::HashingParams;

    fn hasher() -> PasswordHasher {
        PasswordHasher::new(HashingParams::light(), None).unwrap()
    }

    #[test]
    fn test_hashed_password_verifies() {
        let hasher = hasher();
        let clear = ClearTextPassword::new("hunter2hunter2".to_string());
        let stored = UserPassword::from_clear_text(&hasher, &clear).unwrap();

        assert!(stored.verify(&hasher, &clear));
        assert!(!stored.verify(
            &hasher,
            &ClearTextPassword::new("hunter3hunter3".to_string())
        ));
    }

    #[test]
    fn test_federated_only_never_verifies() {
        let stored = UserPassword::FederatedOnly;
        let guess = ClearTextPassword::new(FEDERATED_ONLY_MARKER.to_string());
        assert!(!stored.verify(&hasher(), &guess));
    }

    #[test]
    fn test_db_mapping() {
        assert_eq!(UserPassword::FederatedOnly.to_db(), "google");
        assert!(UserPassword::from_db("google").is_federated_only());

        let hasher = hasher();
        let clear = ClearTextPassword::new("hunter2hunter2".to_string());
        let stored = UserPassword::from_clear_text(&hasher, &clear).unwrap();
        let reloaded = UserPassword::from_db(stored.to_db().to_string());
        assert_eq!(reloaded, stored);
        assert!(reloaded.verify(&hasher, &clear));
    }

    #[test]
    fn test_corrupt_column_is_not_fatal() {
        let stored = UserPassword::from_db("not-a-digest");
        let guess = ClearTextPassword::new("not-a-digest".to_string());
        assert!(!stored.verify(&hasher(), &guess));
    }

    #[test]
    fn test_debug_hides_digest() {
        let hasher = hasher();
        let clear = ClearTextPassword::new("hunter2hunter2".to_string());
        let stored = UserPassword::from_clear_text(&hasher, &clear).unwrap();
        assert_eq!(format!("{stored:?}"), "UserPassword::Hashed([HASH])");
    }
}
