//! Axum router for the chat widget endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{handle_message, health, invalid_method, submit_form, ChatAppState};

/// Create the chat router.
///
/// # Routes
/// - `POST /agent/handle_message/` - Run one dialogue turn
/// - `POST /agent/submit_form/` - Submit the report form
/// - `GET /health` - Liveness probe
///
/// Any other method on the agent paths answers 405 with a JSON error body.
pub fn chat_routes() -> Router<ChatAppState> {
    Router::new()
        .route(
            "/agent/handle_message/",
            post(handle_message).fallback(invalid_method),
        )
        .route(
            "/agent/submit_form/",
            post(submit_form).fallback(invalid_method),
        )
        .route("/health", get(health))
}

/// Create the chat router with its state applied.
pub fn chat_router(state: ChatAppState) -> Router {
    chat_routes().with_state(state)
}
