//! Validated report form submission.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\w.-]+@[\w.-]+\.\w+$").unwrap());

/// Name, email and issue from the report form, trimmed and checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRequest {
    name: String,
    email: String,
    issue: String,
}

impl ReportRequest {
    /// Trims every field, then requires all three and a plausible email.
    ///
    /// Missing fields are reported before a malformed email.
    pub fn new(name: &str, email: &str, issue: &str) -> Result<Self, ValidationError> {
        let (name, email, issue) = (name.trim(), email.trim(), issue.trim());

        for (field, value) in [("name", name), ("email", email), ("issue", issue)] {
            if value.is_empty() {
                return Err(ValidationError::empty_field(field));
            }
        }

        if !EMAIL_PATTERN.is_match(email) {
            return Err(ValidationError::invalid_format("email", "not a valid email address"));
        }

        Ok(Self {
            name: name.to_string(),
            email: email.to_string(),
            issue: issue.to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn issue(&self) -> &str {
        &self.issue
    }
}
