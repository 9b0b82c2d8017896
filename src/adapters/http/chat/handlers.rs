//! HTTP handlers for the chat widget endpoints.
//!
//! Bodies are parsed by hand rather than through the `Json` extractor so that
//! malformed input gets the widget's own `{"error": "Invalid JSON format"}`
//! body instead of axum's plain-text rejection.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;

use super::cookie::SessionCookie;
use super::dto::{
    ErrorResponse, HandleMessageRequest, HandleMessageResponse, HealthResponse,
    SubmitFormRequest, SubmitFormResponse,
};
use crate::application::handlers::chat::{
    HandleMessageCommand, HandleMessageError, HandleMessageHandler, SubmitReportCommand,
    SubmitReportError, SubmitReportHandler,
};

pub const REPORT_SENT_MESSAGE: &str = "Report sent to your email!";

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared state for chat handlers.
#[derive(Clone)]
pub struct ChatAppState {
    pub message_handler: Arc<HandleMessageHandler>,
    pub report_handler: Arc<SubmitReportHandler>,
    pub cookie: SessionCookie,
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// Errors surfaced by the chat endpoints.
#[derive(Debug)]
pub enum ChatApiError {
    InvalidJson,
    InvalidMethod,
    Message(HandleMessageError),
    Report(SubmitReportError),
}

impl From<HandleMessageError> for ChatApiError {
    fn from(err: HandleMessageError) -> Self {
        ChatApiError::Message(err)
    }
}

impl From<SubmitReportError> for ChatApiError {
    fn from(err: SubmitReportError) -> Self {
        ChatApiError::Report(err)
    }
}

impl IntoResponse for ChatApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ChatApiError::InvalidJson => (StatusCode::BAD_REQUEST, "Invalid JSON format"),
            ChatApiError::InvalidMethod => (StatusCode::METHOD_NOT_ALLOWED, "Invalid method"),
            ChatApiError::Message(HandleMessageError::EmptyMessage) => {
                (StatusCode::BAD_REQUEST, "Message cannot be empty")
            }
            ChatApiError::Message(HandleMessageError::Storage(err)) => {
                tracing::error!(error = %err, "Chat turn failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Unable to process request at this time",
                )
            }
            ChatApiError::Report(SubmitReportError::MissingField) => {
                (StatusCode::BAD_REQUEST, "All fields are required")
            }
            ChatApiError::Report(SubmitReportError::InvalidEmail) => {
                (StatusCode::BAD_REQUEST, "Invalid email format")
            }
            ChatApiError::Report(SubmitReportError::Storage(err)) => {
                tracing::error!(error = %err, "Report submission failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Unable to save report at this time",
                )
            }
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

fn parse_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, ChatApiError> {
    serde_json::from_slice(body).map_err(|err| {
        tracing::debug!(error = %err, "Rejected request body");
        ChatApiError::InvalidJson
    })
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /agent/handle_message/
///
/// Runs one dialogue turn and (re)issues the session cookie.
pub async fn handle_message(
    State(state): State<ChatAppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ChatApiError> {
    let request: HandleMessageRequest = parse_body(&body)?;

    let cmd = HandleMessageCommand {
        session_key: state.cookie.read(&headers),
        message: request.message,
        lang: request.lang,
    };

    let result = state.message_handler.handle(cmd).await?;

    let body = Json(HandleMessageResponse {
        response: result.response,
        typing_delay: result.typing_delay,
        stage: result.stage,
    });

    let mut response = (StatusCode::OK, body).into_response();
    if let Some(cookie) = state.cookie.issue(&result.session_key) {
        response.headers_mut().insert(header::SET_COOKIE, cookie);
    }
    Ok(response)
}

/// POST /agent/submit_form/
pub async fn submit_form(
    State(state): State<ChatAppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, ChatApiError> {
    let request: SubmitFormRequest = parse_body(&body)?;

    let cmd = SubmitReportCommand {
        session_key: state.cookie.read(&headers),
        name: request.name,
        email: request.email,
        issue: request.issue,
    };

    let result = state.report_handler.handle(cmd).await?;
    tracing::info!(report_id = %result.report_id, emailed = result.emailed, "Report submitted");

    Ok((
        StatusCode::OK,
        Json(SubmitFormResponse {
            message: REPORT_SENT_MESSAGE.to_string(),
        }),
    ))
}

/// Fallback for any non-POST method on the agent endpoints.
pub async fn invalid_method() -> ChatApiError {
    ChatApiError::InvalidMethod
}

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
