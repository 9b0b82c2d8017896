//! PostgreSQL implementation of ConversationStore.
//!
//! One row per session in `webdoctor_sessions`, with the state stored as
//! JSONB and an absolute `expires_at` refreshed on every save.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::time::Duration;

use crate::domain::diagnosis::ConversationState;
use crate::domain::foundation::{DomainError, ErrorCode, SessionKey, Timestamp};
use crate::ports::ConversationStore;

/// PostgreSQL-backed session store.
#[derive(Clone)]
pub struct PostgresConversationStore {
    pool: PgPool,
    ttl: Duration,
}

impl PostgresConversationStore {
    pub fn new(pool: PgPool, ttl: Duration) -> Self {
        Self { pool, ttl }
    }

    /// Deletes expired sessions, returning how many were removed.
    pub async fn purge_expired(&self) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM webdoctor_sessions WHERE expires_at <= NOW()")
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to purge sessions: {}", e),
                )
            })?;
        Ok(result.rows_affected())
    }

    fn expiry(&self) -> DateTime<Utc> {
        *Timestamp::now().plus_secs(self.ttl.as_secs()).as_datetime()
    }
}

#[derive(Debug, sqlx::FromRow)]
struct SessionRow {
    state: serde_json::Value,
}

fn decode_state(row: SessionRow) -> Result<ConversationState, DomainError> {
    serde_json::from_value(row.state).map_err(|e| {
        DomainError::new(
            ErrorCode::SerializationError,
            format!("Invalid session state: {}", e),
        )
    })
}

fn encode_state(state: &ConversationState) -> Result<serde_json::Value, DomainError> {
    serde_json::to_value(state).map_err(|e| {
        DomainError::new(
            ErrorCode::SerializationError,
            format!("Failed to encode session state: {}", e),
        )
    })
}

#[async_trait]
impl ConversationStore for PostgresConversationStore {
    async fn load(&self, key: &SessionKey) -> Result<Option<ConversationState>, DomainError> {
        let row: Option<SessionRow> = sqlx::query_as(
            r#"
            SELECT state
            FROM webdoctor_sessions
            WHERE session_key = $1 AND expires_at > NOW()
            "#,
        )
        .bind(key.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to load session: {}", e))
        })?;

        row.map(decode_state).transpose()
    }

    async fn save(&self, key: &SessionKey, state: &ConversationState) -> Result<(), DomainError> {
        let json = encode_state(state)?;

        sqlx::query(
            r#"
            INSERT INTO webdoctor_sessions (session_key, state, expires_at, updated_at)
            VALUES ($1, $2, $3, NOW())
            ON CONFLICT (session_key) DO UPDATE SET
                state = EXCLUDED.state,
                expires_at = EXCLUDED.expires_at,
                updated_at = NOW()
            "#,
        )
        .bind(key.as_uuid())
        .bind(json)
        .bind(self.expiry())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to save session: {}", e))
        })?;

        Ok(())
    }
}
