//! Report repository port.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::report::{DiagnosticReport, UserInteraction};

/// Persistence for report submissions.
#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// Stores the interaction and its report together.
    ///
    /// Either both are stored or neither is.
    async fn save_submission(
        &self,
        interaction: &UserInteraction,
        report: &DiagnosticReport,
    ) -> Result<(), DomainError>;

    /// Reports for an email address, newest first.
    async fn find_reports_by_email(&self, email: &str) -> Result<Vec<DiagnosticReport>, DomainError>;
}
