//! Password Hashing and Verification
//!
//! Argon2id-based one-way hashing with:
//! - A fresh random salt per hash, embedded in the PHC output
//! - Cost parameters fixed at startup ([`HashingParams`])
//! - Optional application-wide pepper
//! - Zeroization of clear text and redacted `Debug` output
//!
//! There is no password policy: any string the user picks is hashed.
//!
//! Verification never fails loudly: a mismatch, a foreign digest format or a
//! corrupt stored value all yield `false`.

use std::fmt;

use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher as _, PasswordVerifier, Version,
    password_hash::SaltString,
};
use rand::rngs::OsRng;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop};

// ============================================================================
// Error Types
// ============================================================================

/// Hashing failures
#[derive(Debug, Error)]
pub enum PasswordHashError {
    #[error("Invalid hashing parameters: {0}")]
    InvalidParams(String),

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password, erased from memory on drop
///
/// Not `Clone`, and `Debug` never prints the value.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Wrap a submitted password, NFKC-normalized.
    ///
    /// The same normalization runs at registration and at login, so visually
    /// identical input always hashes the same way.
    pub fn new(raw: String) -> Self {
        let mut raw = raw;
        let normalized: String = raw.nfkc().collect();
        raw.zeroize();
        Self(normalized)
    }

    fn peppered(&self, pepper: Option<&[u8]>) -> Vec<u8> {
        let mut bytes = self.0.as_bytes().to_vec();
        if let Some(p) = pepper {
            bytes.extend_from_slice(p);
        }
        bytes
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Hashed Password (Safe to store)
// ============================================================================

/// Stored digest in PHC string format (`$argon2id$v=19$m=...,t=...,p=...$salt$hash`)
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    hash: String,
}

impl HashedPassword {
    /// Wrap a stored digest without parsing it.
    ///
    /// A malformed value is not an error here; it simply never verifies.
    pub fn from_stored(s: impl Into<String>) -> Self {
        Self { hash: s.into() }
    }

    /// The PHC string for storage
    pub fn as_phc_string(&self) -> &str {
        &self.hash
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Hasher
// ============================================================================

/// Argon2id cost parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashingParams {
    /// Memory cost in KiB
    pub memory_kib: u32,
    /// Number of passes
    pub iterations: u32,
    /// Degree of parallelism (lanes)
    pub parallelism: u32,
}

impl Default for HashingParams {
    /// OWASP recommended Argon2id parameters: m=19456 (19 MiB), t=2, p=1
    fn default() -> Self {
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}

impl HashingParams {
    /// Cheapest parameters argon2 accepts. Tests and local tooling only.
    pub fn light() -> Self {
        Self {
            memory_kib: Params::MIN_M_COST,
            iterations: 1,
            parallelism: 1,
        }
    }
}

/// Salted one-way password hasher
///
/// ```rust
/// use platform::password::{ClearTextPassword, HashingParams, PasswordHasher};
///
/// let hasher = PasswordHasher::new(HashingParams::light(), None).unwrap();
/// let password = ClearTextPassword::new("correct horse battery".to_string());
/// let digest = hasher.hash(&password).unwrap();
///
/// assert!(hasher.verify(&password, &digest));
/// ```
#[derive(Clone)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
    pepper: Option<Vec<u8>>,
}

impl PasswordHasher {
    pub fn new(params: HashingParams, pepper: Option<Vec<u8>>) -> Result<Self, PasswordHashError> {
        let params = Params::new(params.memory_kib, params.iterations, params.parallelism, None)
            .map_err(|e| PasswordHashError::InvalidParams(e.to_string()))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
            pepper,
        })
    }

    /// Hash with a fresh 128-bit random salt
    pub fn hash(&self, password: &ClearTextPassword) -> Result<HashedPassword, PasswordHashError> {
        let mut bytes = password.peppered(self.pepper.as_deref());
        let salt = SaltString::generate(OsRng);

        let result = self
            .argon2
            .hash_password(&bytes, &salt)
            .map(|hash| HashedPassword {
                hash: hash.to_string(),
            })
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()));

        bytes.zeroize();
        result
    }

    /// Verify against a stored digest.
    ///
    /// The salt and cost are read from the digest, so hashes made under older
    /// parameters still verify. The final comparison is constant-time.
    pub fn verify(&self, password: &ClearTextPassword, digest: &HashedPassword) -> bool {
        let Ok(parsed) = PasswordHash::new(&digest.hash) else {
            return false;
        };

        let mut bytes = password.peppered(self.pepper.as_deref());
        let ok = self.argon2.verify_password(&bytes, &parsed).is_ok();
        bytes.zeroize();
        ok
    }
}

impl fmt::Debug for PasswordHasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordHasher")
            .field("params", self.argon2.params())
            .field("pepper", &self.pepper.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
