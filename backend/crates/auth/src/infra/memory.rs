//! In-memory Repository Implementation
//!
//! Same contract as [`PgAuthRepository`](super::postgres::PgAuthRepository),
//! including the unique-email check, for tests and local runs without a
//! database. State is shared between clones.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use kernel::id::{SessionId, UserId};
use tokio::sync::RwLock;

use crate::domain::entity::{
    auth_session::AuthSession, pending_authorization::PendingAuthorization, user::User,
};
use crate::domain::repository::{AuthSessionRepository, OAuthStateRepository, UserRepository};
use crate::domain::value_object::{email::Email, user_password::UserPassword};
use crate::error::{AuthError, AuthResult};

#[derive(Default)]
struct Tables {
    /// Keyed by canonical email
    users: HashMap<String, User>,
    sessions: HashMap<SessionId, AuthSession>,
    states: HashMap<String, PendingAuthorization>,
}

/// In-memory auth repository
#[derive(Clone, Default)]
pub struct MemoryAuthRepository {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryAuthRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub async fn user_count(&self) -> usize {
        self.tables.read().await.users.len()
    }

    /// Number of stored sessions, expired ones included
    pub async fn session_count(&self) -> usize {
        self.tables.read().await.sessions.len()
    }
}

impl UserRepository for MemoryAuthRepository {
    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .find(|user| user.user_id == *user_id)
            .cloned())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        Ok(self.tables.read().await.users.get(email.as_str()).cloned())
    }

    async fn insert(&self, email: &Email, password: &UserPassword) -> AuthResult<User> {
        let mut tables = self.tables.write().await;
        if tables.users.contains_key(email.as_str()) {
            return Err(AuthError::DuplicateUser);
        }

        let user = User::new(email.clone(), password.clone());
        tables.users.insert(email.as_str().to_string(), user.clone());
        Ok(user)
    }
}

impl AuthSessionRepository for MemoryAuthRepository {
    async fn create_session(&self, session: &AuthSession) -> AuthResult<()> {
        self.tables
            .write()
            .await
            .sessions
            .insert(session.session_id, session.clone());
        Ok(())
    }

    async fn find_session(&self, session_id: &SessionId) -> AuthResult<Option<AuthSession>> {
        Ok(self.tables.read().await.sessions.get(session_id).cloned())
    }

    async fn delete_session(&self, session_id: &SessionId) -> AuthResult<()> {
        self.tables.write().await.sessions.remove(session_id);
        Ok(())
    }

    async fn cleanup_expired_sessions(&self) -> AuthResult<u64> {
        let now_ms = Utc::now().timestamp_millis();
        let mut tables = self.tables.write().await;
        let before = tables.sessions.len();
        tables
            .sessions
            .retain(|_, session| !session.is_expired_at(now_ms));
        Ok((before - tables.sessions.len()) as u64)
    }
}

impl OAuthStateRepository for MemoryAuthRepository {
    async fn save_state(&self, pending: &PendingAuthorization) -> AuthResult<()> {
        self.tables
            .write()
            .await
            .states
            .insert(pending.state.clone(), pending.clone());
        Ok(())
    }

    async fn take_state(&self, state: &str) -> AuthResult<Option<PendingAuthorization>> {
        let pending = self.tables.write().await.states.remove(state);
        Ok(pending.filter(|p| !p.is_expired()))
    }

    async fn cleanup_expired_states(&self) -> AuthResult<u64> {
        let mut tables = self.tables.write().await;
        let before = tables.states.len();
        tables.states.retain(|_, pending| !pending.is_expired());
        Ok((before - tables.states.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn email(s: &str) -> Email {
        Email::new(s).unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let repo = MemoryAuthRepository::new();
        let user = repo
            .insert(&email("a@example.com"), &UserPassword::FederatedOnly)
            .await
            .unwrap();

        let by_email = repo.find_by_email(&email("A@Example.com")).await.unwrap();
        assert_eq!(by_email.as_ref(), Some(&user));

        let by_id = repo.find_by_id(&user.user_id).await.unwrap();
        assert_eq!(by_id, Some(user));
    }

    #[tokio::test]
    async fn test_duplicate_insert_is_rejected() {
        let repo = MemoryAuthRepository::new();
        let first = repo
            .insert(&email("a@example.com"), &UserPassword::FederatedOnly)
            .await
            .unwrap();

        let second = repo
            .insert(&email("a@example.com"), &UserPassword::from_db("x"))
            .await;
        assert!(matches!(second, Err(AuthError::DuplicateUser)));

        // Original row untouched
        let stored = repo.find_by_email(&email("a@example.com")).await.unwrap();
        assert_eq!(stored, Some(first));
        assert_eq!(repo.user_count().await, 1);
    }

    #[tokio::test]
    async fn test_cleanup_expired_sessions() {
        let repo = MemoryAuthRepository::new();
        let live = AuthSession::new(UserId::new(), Duration::hours(1));
        let dead = AuthSession::new(UserId::new(), Duration::zero());
        repo.create_session(&live).await.unwrap();
        repo.create_session(&dead).await.unwrap();

        assert_eq!(repo.cleanup_expired_sessions().await.unwrap(), 1);
        assert!(repo.find_session(&live.session_id).await.unwrap().is_some());
        assert!(repo.find_session(&dead.session_id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_take_state_is_single_use() {
        let repo = MemoryAuthRepository::new();
        let pending = PendingAuthorization::new(
            "state-1".into(),
            "google",
            "verifier".into(),
            Duration::minutes(10),
        );
        repo.save_state(&pending).await.unwrap();

        assert_eq!(repo.take_state("state-1").await.unwrap(), Some(pending));
        assert_eq!(repo.take_state("state-1").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_expired_state_is_not_returned() {
        let repo = MemoryAuthRepository::new();
        let pending =
            PendingAuthorization::new("state-2".into(), "google", "v".into(), Duration::zero());
        repo.save_state(&pending).await.unwrap();

        assert_eq!(repo.take_state("state-2").await.unwrap(), None);
    }
}
