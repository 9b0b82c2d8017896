//! SubmitReportHandler - Stores a report request and sends the report.

use std::sync::Arc;

use crate::domain::diagnosis::DialogueStage;
use crate::domain::foundation::{DomainError, ReportId, SessionKey, StateMachine, ValidationError};
use crate::domain::report::{DiagnosticReport, ReportRequest, UserInteraction};
use crate::ports::{ConversationStore, ReportMailer, ReportRepository};

/// Command with the raw form fields.
#[derive(Debug, Clone)]
pub struct SubmitReportCommand {
    pub session_key: Option<SessionKey>,
    pub name: String,
    pub email: String,
    pub issue: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitReportResult {
    pub report_id: ReportId,
    /// False when the mailer failed; the report is stored either way.
    pub emailed: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitReportError {
    #[error("All fields are required")]
    MissingField,

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("report storage failed: {0}")]
    Storage(#[source] DomainError),
}

impl From<ValidationError> for SubmitReportError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::EmptyField { .. } => SubmitReportError::MissingField,
            ValidationError::InvalidFormat { .. } => SubmitReportError::InvalidEmail,
        }
    }
}

/// Handler for report form submissions.
pub struct SubmitReportHandler {
    reports: Arc<dyn ReportRepository>,
    mailer: Arc<dyn ReportMailer>,
    conversations: Arc<dyn ConversationStore>,
}

impl SubmitReportHandler {
    pub fn new(
        reports: Arc<dyn ReportRepository>,
        mailer: Arc<dyn ReportMailer>,
        conversations: Arc<dyn ConversationStore>,
    ) -> Self {
        Self {
            reports,
            mailer,
            conversations,
        }
    }

    pub async fn handle(
        &self,
        cmd: SubmitReportCommand,
    ) -> Result<SubmitReportResult, SubmitReportError> {
        // 1. Validate
        let request = ReportRequest::new(&cmd.name, &cmd.email, &cmd.issue)?;

        // 2. Persist interaction and report
        let interaction = UserInteraction::from_request(&request);
        let report = DiagnosticReport::from_request(&request);
        self.reports
            .save_submission(&interaction, &report)
            .await
            .map_err(SubmitReportError::Storage)?;

        // 3. Deliver; failures only get logged
        let emailed = match self.mailer.send_report(request.name(), &report).await {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(error = %err, report_id = %report.id, "Failed to email report");
                false
            }
        };

        // 4. Move the chat along if there is one
        if let Some(key) = cmd.session_key {
            if let Err(err) = self.mark_report_sent(&key).await {
                tracing::error!(error = %err, session = %key, "Failed to update session after report");
            }
        }

        Ok(SubmitReportResult {
            report_id: report.id,
            emailed,
        })
    }

    async fn mark_report_sent(&self, key: &SessionKey) -> Result<(), DomainError> {
        let Some(mut state) = self.conversations.load(key).await? else {
            return Ok(());
        };
        state.stage = state.stage.transition_to(DialogueStage::ReportSent)?;
        self.conversations.save(key, &state).await
    }
}
