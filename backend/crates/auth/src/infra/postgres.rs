//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::id::{SessionId, UserId};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{
    auth_session::AuthSession, pending_authorization::PendingAuthorization, user::User,
};
use crate::domain::repository::{AuthSessionRepository, OAuthStateRepository, UserRepository};
use crate::domain::value_object::{email::Email, user_password::UserPassword};
use crate::error::{AuthError, AuthResult};

/// PostgreSQL-backed auth repository
#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Clean up expired sessions and pending authorizations
    ///
    /// Returns `(sessions_deleted, states_deleted)`.
    pub async fn cleanup_expired(&self) -> AuthResult<(u64, u64)> {
        let sessions = self.cleanup_expired_sessions().await?;
        let states = self.cleanup_expired_states().await?;

        tracing::debug!(
            sessions_deleted = sessions,
            states_deleted = states,
            "Cleaned up expired auth rows"
        );

        Ok((sessions, states))
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgAuthRepository {
    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, password, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(UserRow::into_user))
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        // A second row means the unique index on users.email is gone.
        let mut rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, password, created_at
            FROM users
            WHERE email = $1
            LIMIT 2
            "#,
        )
        .bind(email.as_str())
        .fetch_all(&self.pool)
        .await?;

        if rows.len() > 1 {
            tracing::error!(email_domain = email.domain(), "Multiple users share one email");
            return Err(AuthError::Internal("duplicate email rows".into()));
        }

        Ok(rows.pop().map(UserRow::into_user))
    }

    async fn insert(&self, email: &Email, password: &UserPassword) -> AuthResult<User> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (id, email, password)
            VALUES ($1, $2, $3)
            RETURNING id, email, password, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(email.as_str())
        .bind(password.to_db())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db) if db.is_unique_violation() => AuthError::DuplicateUser,
            other => AuthError::StoreUnavailable(other),
        })?;

        Ok(row.into_user())
    }
}

// ============================================================================
// Auth Session Repository Implementation
// ============================================================================

impl AuthSessionRepository for PgAuthRepository {
    async fn create_session(&self, session: &AuthSession) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO auth_sessions (session_id, user_id, expires_at_ms, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(session.session_id.as_uuid())
        .bind(session.user_id.as_uuid())
        .bind(session.expires_at_ms)
        .bind(session.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_session(&self, session_id: &SessionId) -> AuthResult<Option<AuthSession>> {
        let row = sqlx::query_as::<_, AuthSessionRow>(
            r#"
            SELECT session_id, user_id, expires_at_ms, created_at
            FROM auth_sessions
            WHERE session_id = $1
            "#,
        )
        .bind(session_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(AuthSessionRow::into_session))
    }

    async fn delete_session(&self, session_id: &SessionId) -> AuthResult<()> {
        sqlx::query("DELETE FROM auth_sessions WHERE session_id = $1")
            .bind(session_id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn cleanup_expired_sessions(&self) -> AuthResult<u64> {
        let now_ms = Utc::now().timestamp_millis();

        let deleted = sqlx::query("DELETE FROM auth_sessions WHERE expires_at_ms <= $1")
            .bind(now_ms)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted)
    }
}

// ============================================================================
// OAuth State Repository Implementation
// ============================================================================

impl OAuthStateRepository for PgAuthRepository {
    async fn save_state(&self, pending: &PendingAuthorization) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO oauth_states (state, provider, pkce_verifier, expires_at_ms)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(&pending.state)
        .bind(&pending.provider)
        .bind(&pending.pkce_verifier)
        .bind(pending.expires_at_ms)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn take_state(&self, state: &str) -> AuthResult<Option<PendingAuthorization>> {
        let now_ms = Utc::now().timestamp_millis();

        let row = sqlx::query_as::<_, OAuthStateRow>(
            r#"
            DELETE FROM oauth_states
            WHERE state = $1 AND expires_at_ms > $2
            RETURNING state, provider, pkce_verifier, expires_at_ms
            "#,
        )
        .bind(state)
        .bind(now_ms)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(OAuthStateRow::into_pending))
    }

    async fn cleanup_expired_states(&self) -> AuthResult<u64> {
        let now_ms = Utc::now().timestamp_millis();

        let deleted = sqlx::query("DELETE FROM oauth_states WHERE expires_at_ms <= $1")
            .bind(now_ms)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted)
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    password: String,
    created_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> User {
        User {
            user_id: UserId::from_uuid(self.id),
            email: Email::from_db(self.email),
            password: UserPassword::from_db(self.password),
            created_at: self.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct AuthSessionRow {
    session_id: Uuid,
    user_id: Uuid,
    expires_at_ms: i64,
    created_at: DateTime<Utc>,
}

impl AuthSessionRow {
    fn into_session(self) -> AuthSession {
        AuthSession {
            session_id: SessionId::from_uuid(self.session_id),
            user_id: UserId::from_uuid(self.user_id),
            expires_at_ms: self.expires_at_ms,
            created_at: self.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct OAuthStateRow {
    state: String,
    provider: String,
    pkce_verifier: String,
    expires_at_ms: i64,
}

impl OAuthStateRow {
    fn into_pending(self) -> PendingAuthorization {
        PendingAuthorization {
            state: self.state,
            provider: self.provider,
            pkce_verifier: self.pkce_verifier,
            expires_at_ms: self.expires_at_ms,
        }
    }
}
