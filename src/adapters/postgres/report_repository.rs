//! PostgreSQL implementation of ReportRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{DomainError, ErrorCode, ReportId, Timestamp};
use crate::domain::report::{DiagnosticReport, UserInteraction};
use crate::ports::ReportRepository;

/// Stores submissions in `webdoctor_interactions` and `webdoctor_reports`.
#[derive(Clone)]
pub struct PostgresReportRepository {
    pool: PgPool,
}

impl PostgresReportRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ReportRow {
    id: Uuid,
    user_email: String,
    issue_details: String,
    report_content: String,
    created_at: DateTime<Utc>,
}

impl From<ReportRow> for DiagnosticReport {
    fn from(row: ReportRow) -> Self {
        Self {
            id: ReportId::from_uuid(row.id),
            user_email: row.user_email,
            issue_details: row.issue_details,
            report_content: row.report_content,
            created_at: Timestamp::from_datetime(row.created_at),
        }
    }
}

#[async_trait]
impl ReportRepository for PostgresReportRepository {
    async fn save_submission(
        &self,
        interaction: &UserInteraction,
        report: &DiagnosticReport,
    ) -> Result<(), DomainError> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to start transaction: {}", e),
            )
        })?;

        sqlx::query(
            r#"
            INSERT INTO webdoctor_interactions (id, name, email, issue_description, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(interaction.id.as_uuid())
        .bind(&interaction.name)
        .bind(&interaction.email)
        .bind(&interaction.issue_description)
        .bind(interaction.created_at.as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to save interaction: {}", e),
            )
        })?;

        sqlx::query(
            r#"
            INSERT INTO webdoctor_reports (id, user_email, issue_details, report_content, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(report.id.as_uuid())
        .bind(&report.user_email)
        .bind(&report.issue_details)
        .bind(&report.report_content)
        .bind(report.created_at.as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to save report: {}", e))
        })?;

        tx.commit().await.map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to commit transaction: {}", e),
            )
        })?;

        Ok(())
    }

    async fn find_reports_by_email(&self, email: &str) -> Result<Vec<DiagnosticReport>, DomainError> {
        let rows: Vec<ReportRow> = sqlx::query_as(
            r#"
            SELECT id, user_email, issue_details, report_content, created_at
            FROM webdoctor_reports
            WHERE user_email = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(email)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to find reports: {}", e))
        })?;

        Ok(rows.into_iter().map(DiagnosticReport::from).collect())
    }
}
