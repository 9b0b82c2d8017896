//! Report mailer port.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::report::DiagnosticReport;

/// Delivers a generated report to the person who asked for it.
#[async_trait]
pub trait ReportMailer: Send + Sync {
    /// Sends `report` to `report.user_email`, addressed to `recipient_name`.
    ///
    /// # Errors
    ///
    /// - `DeliveryFailed` if the mail service rejects or cannot be reached
    async fn send_report(
        &self,
        recipient_name: &str,
        report: &DiagnosticReport,
    ) -> Result<(), DomainError>;
}
