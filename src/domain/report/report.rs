//! Stored interactions and generated reports.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{InteractionId, ReportId, Timestamp};

use super::ReportRequest;

const SUGGESTED_ACTIONS: &str =
    "Check hosting performance, optimize images, or contact our team for a free consultation.";

/// A visitor who asked for a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInteraction {
    pub id: InteractionId,
    pub name: String,
    pub email: String,
    pub issue_description: String,
    pub created_at: Timestamp,
}

impl UserInteraction {
    pub fn from_request(request: &ReportRequest) -> Self {
        Self {
            id: InteractionId::new(),
            name: request.name().to_string(),
            email: request.email().to_string(),
            issue_description: request.issue().to_string(),
            created_at: Timestamp::now(),
        }
    }
}

/// The report generated for a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticReport {
    pub id: ReportId,
    pub user_email: String,
    pub issue_details: String,
    pub report_content: String,
    pub created_at: Timestamp,
}

impl DiagnosticReport {
    pub fn from_request(request: &ReportRequest) -> Self {
        Self {
            id: ReportId::new(),
            user_email: request.email().to_string(),
            issue_details: request.issue().to_string(),
            report_content: report_content(request.name(), request.issue()),
            created_at: Timestamp::now(),
        }
    }
}

/// Plain-text body of a diagnostic report.
pub fn report_content(name: &str, issue: &str) -> String {
    format!(
        "Diagnostic Report for {}\nIssue: {}\nSuggested Actions: {}",
        name, issue, SUGGESTED_ACTIONS
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> ReportRequest {
        ReportRequest::new("Ada", "ada@example.com", "Checkout button does nothing").unwrap()
    }

    #[test]
    fn content_has_three_lines() {
        let content = report_content("Ada", "Slow homepage");
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Diagnostic Report for Ada");
        assert_eq!(lines[1], "Issue: Slow homepage");
        assert!(lines[2].starts_with("Suggested Actions: Check hosting performance"));
    }

    #[test]
    fn report_copies_request_fields() {
        let report = DiagnosticReport::from_request(&request());
        assert_eq!(report.user_email, "ada@example.com");
        assert_eq!(report.issue_details, "Checkout button does nothing");
        assert!(report.report_content.contains("Diagnostic Report for Ada"));
    }

    #[test]
    fn interaction_copies_request_fields() {
        let interaction = UserInteraction::from_request(&request());
        assert_eq!(interaction.name, "Ada");
        assert_eq!(interaction.email, "ada@example.com");
        assert_eq!(interaction.issue_description, "Checkout button does nothing");
    }

    #[test]
    fn ids_are_unique_per_submission() {
        let a = DiagnosticReport::from_request(&request());
        let b = DiagnosticReport::from_request(&request());
        assert_ne!(a.id, b.id);
    }
}
