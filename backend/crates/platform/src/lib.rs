//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations with no knowledge of the login domain:
//! - Password hashing (Argon2id) with configurable cost
//! - Cryptographic helpers (SHA-256, HMAC-SHA256, base64url, random bytes)
//! - Session cookie building and parsing

pub mod cookie;
pub mod crypto;
pub mod password;
