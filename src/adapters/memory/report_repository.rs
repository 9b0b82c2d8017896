//! In-memory ReportRepository.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::DomainError;
use crate::domain::report::{DiagnosticReport, UserInteraction};
use crate::ports::ReportRepository;

#[derive(Debug, Default)]
struct Submissions {
    interactions: Vec<UserInteraction>,
    reports: Vec<DiagnosticReport>,
}

/// Report storage held in process memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryReportRepository {
    inner: Arc<RwLock<Submissions>>,
}

impl InMemoryReportRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn interactions(&self) -> Vec<UserInteraction> {
        self.inner.read().await.interactions.clone()
    }

    pub async fn reports(&self) -> Vec<DiagnosticReport> {
        self.inner.read().await.reports.clone()
    }
}

#[async_trait]
impl ReportRepository for InMemoryReportRepository {
    async fn save_submission(
        &self,
        interaction: &UserInteraction,
        report: &DiagnosticReport,
    ) -> Result<(), DomainError> {
        let mut inner = self.inner.write().await;
        inner.interactions.push(interaction.clone());
        inner.reports.push(report.clone());
        Ok(())
    }

    async fn find_reports_by_email(&self, email: &str) -> Result<Vec<DiagnosticReport>, DomainError> {
        let inner = self.inner.read().await;
        let mut reports: Vec<_> = inner
            .reports
            .iter()
            .filter(|r| r.user_email == email)
            .cloned()
            .collect();
        reports.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(reports)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::report::ReportRequest;

    fn submission(email: &str) -> (UserInteraction, DiagnosticReport) {
        let request = ReportRequest::new("Ada", email, "slow site").unwrap();
        (
            UserInteraction::from_request(&request),
            DiagnosticReport::from_request(&request),
        )
    }

    #[tokio::test]
    async fn saves_interaction_and_report() {
        let repo = InMemoryReportRepository::new();
        let (interaction, report) = submission("ada@example.com");

        repo.save_submission(&interaction, &report).await.unwrap();

        assert_eq!(repo.interactions().await, vec![interaction]);
        assert_eq!(repo.reports().await, vec![report]);
    }

    #[tokio::test]
    async fn finds_reports_by_email_newest_first() {
        let repo = InMemoryReportRepository::new();
        let (i1, r1) = submission("ada@example.com");
        let (i2, r2) = submission("bob@example.com");
        let (i3, r3) = submission("ada@example.com");
        for (i, r) in [(&i1, &r1), (&i2, &r2), (&i3, &r3)] {
            repo.save_submission(i, r).await.unwrap();
        }

        let found = repo.find_reports_by_email("ada@example.com").await.unwrap();

        assert_eq!(found.len(), 2);
        assert!(found[0].created_at >= found[1].created_at);
        assert!(found.iter().all(|r| r.user_email == "ada@example.com"));
    }
}
