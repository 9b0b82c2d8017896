//! Request and response bodies for the chat endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::diagnosis::DialogueStage;

/// Body of `POST /agent/handle_message/`.
#[derive(Debug, Clone, Deserialize)]
pub struct HandleMessageRequest {
    #[serde(default)]
    pub message: String,
    #[serde(default = "default_lang")]
    pub lang: String,
}

fn default_lang() -> String {
    "en".to_string()
}

/// Reply to a chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandleMessageResponse {
    pub response: String,
    pub typing_delay: u32,
    pub stage: DialogueStage,
}

/// Body of `POST /agent/submit_form/`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmitFormRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub issue: String,
}

/// Confirmation of a report submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitFormResponse {
    pub message: String,
}

/// Error body shared by every endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
