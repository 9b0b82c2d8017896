//! Resend Mailer - Delivers reports through the Resend HTTP API.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::Serialize;
use std::time::Duration;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::report::DiagnosticReport;
use crate::ports::ReportMailer;

const DEFAULT_BASE_URL: &str = "https://api.resend.com";
const SUBJECT: &str = "Your WebDoctor diagnostic report";

/// Configuration for the Resend mailer.
#[derive(Debug, Clone)]
pub struct ResendConfig {
    api_key: Secret<String>,
    /// "Name <address>" used as sender.
    pub from: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl ResendConfig {
    pub fn new(api_key: impl Into<String>, from: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            from: from.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(15),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

/// Mailer backed by Resend.
pub struct ResendMailer {
    config: ResendConfig,
    client: Client,
}

impl ResendMailer {
    pub fn new(config: ResendConfig) -> Result<Self, DomainError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::InternalError,
                    format!("Failed to build HTTP client: {}", e),
                )
            })?;
        Ok(Self { config, client })
    }

    fn emails_url(&self) -> String {
        format!("{}/emails", self.config.base_url.trim_end_matches('/'))
    }

    fn build_email<'a>(&'a self, recipient_name: &str, report: &'a DiagnosticReport) -> ResendEmail<'a> {
        ResendEmail {
            from: &self.config.from,
            to: vec![format!("{} <{}>", recipient_name, report.user_email)],
            subject: SUBJECT,
            text: &report.report_content,
        }
    }
}

#[derive(Debug, Serialize)]
struct ResendEmail<'a> {
    from: &'a str,
    to: Vec<String>,
    subject: &'a str,
    text: &'a str,
}

#[async_trait]
impl ReportMailer for ResendMailer {
    async fn send_report(
        &self,
        recipient_name: &str,
        report: &DiagnosticReport,
    ) -> Result<(), DomainError> {
        let email = self.build_email(recipient_name, report);

        let response = self
            .client
            .post(self.emails_url())
            .bearer_auth(self.config.api_key.expose_secret())
            .json(&email)
            .send()
            .await
            .map_err(|e| {
                DomainError::new(ErrorCode::DeliveryFailed, format!("Resend request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DomainError::new(
                ErrorCode::DeliveryFailed,
                format!("Resend returned {}: {}", status, body),
            )
            .with_detail("report_id", report.id.to_string()));
        }

        tracing::info!(report_id = %report.id, "Report email sent");
        Ok(())
    }
}
