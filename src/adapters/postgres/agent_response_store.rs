//! PostgreSQL implementation of AgentResponseStore.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{DomainError, ErrorCode, ResponseId, Timestamp};
use crate::domain::responses::{response_hash, AgentResponseRecord};
use crate::ports::AgentResponseStore;

/// Dedup log in `webdoctor_responses`, unique on `response_hash`.
#[derive(Clone)]
pub struct PostgresAgentResponseStore {
    pool: PgPool,
}

impl PostgresAgentResponseStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ResponseRow {
    id: Uuid,
    response_text: String,
    response_hash: String,
    created_at: DateTime<Utc>,
}

impl From<ResponseRow> for AgentResponseRecord {
    fn from(row: ResponseRow) -> Self {
        Self {
            id: ResponseId::from_uuid(row.id),
            response_text: row.response_text,
            response_hash: row.response_hash,
            created_at: Timestamp::from_datetime(row.created_at),
        }
    }
}

#[async_trait]
impl AgentResponseStore for PostgresAgentResponseStore {
    async fn get_or_create(&self, text: &str) -> Result<(AgentResponseRecord, bool), DomainError> {
        let candidate = AgentResponseRecord::new(text)?;

        // A concurrent insert of the same text loses the race silently and
        // falls through to the lookup below.
        let inserted: Option<ResponseRow> = sqlx::query_as(
            r#"
            INSERT INTO webdoctor_responses (id, response_text, response_hash, created_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (response_hash) DO NOTHING
            RETURNING id, response_text, response_hash, created_at
            "#,
        )
        .bind(candidate.id.as_uuid())
        .bind(&candidate.response_text)
        .bind(&candidate.response_hash)
        .bind(candidate.created_at.as_datetime())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to store response: {}", e))
        })?;

        if let Some(row) = inserted {
            return Ok((row.into(), true));
        }

        self.find_by_hash(&candidate.response_hash)
            .await?
            .map(|record| (record, false))
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    "Response vanished after conflicting insert",
                )
                .with_detail("response_hash", response_hash(text))
            })
    }

    async fn find_by_hash(&self, hash: &str) -> Result<Option<AgentResponseRecord>, DomainError> {
        let row: Option<ResponseRow> = sqlx::query_as(
            r#"
            SELECT id, response_text, response_hash, created_at
            FROM webdoctor_responses
            WHERE response_hash = $1
            "#,
        )
        .bind(hash)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to find response: {}", e))
        })?;

        Ok(row.map(AgentResponseRecord::from))
    }
}
