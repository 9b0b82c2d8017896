//! Log Mailer - Records reports in the log instead of sending them.
//!
//! Used when no email service is configured.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::DomainError;
use crate::domain::report::DiagnosticReport;
use crate::ports::ReportMailer;

/// Mailer that logs each report at `info` and keeps a copy.
#[derive(Debug, Clone, Default)]
pub struct LogMailer {
    sent: Arc<RwLock<Vec<DiagnosticReport>>>,
}

impl LogMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reports "sent" so far.
    pub async fn sent(&self) -> Vec<DiagnosticReport> {
        self.sent.read().await.clone()
    }
}

#[async_trait]
impl ReportMailer for LogMailer {
    async fn send_report(
        &self,
        recipient_name: &str,
        report: &DiagnosticReport,
    ) -> Result<(), DomainError> {
        tracing::info!(
            report_id = %report.id,
            recipient = recipient_name,
            email = %report.user_email,
            content = %report.report_content,
            "Email delivery not configured; report logged"
        );
        self.sent.write().await.push(report.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::report::ReportRequest;

    #[tokio::test]
    async fn keeps_sent_reports() {
        let mailer = LogMailer::new();
        let request = ReportRequest::new("Ada", "ada@example.com", "slow").unwrap();
        let report = DiagnosticReport::from_request(&request);

        mailer.send_report("Ada", &report).await.unwrap();

        assert_eq!(mailer.sent().await, vec![report]);
    }
}
