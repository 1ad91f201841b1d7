//! User Entity
//!
//! A registered account. Created once, by registration or by the first
//! federated sign-in, and never updated afterwards.

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::domain::value_object::{email::Email, user_password::UserPassword};

/// User entity
///
/// `Debug` is safe to log: the password field prints as `[HASH]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Internal UUID identifier
    pub user_id: UserId,
    /// Canonical email (unique)
    pub email: Email,
    /// Digest or federated-only marker
    pub password: UserPassword,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(email: Email, password: UserPassword) -> Self {
        Self {
            user_id: UserId::new(),
            email,
            password,
            created_at: Utc::now(),
        }
    }
}
