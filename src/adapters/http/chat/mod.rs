//! HTTP adapter for the chat widget.
//!
//! - `POST /agent/handle_message/` - One dialogue turn
//! - `POST /agent/submit_form/` - Report form submission
//! - `GET /health` - Liveness probe

pub mod cookie;
pub mod dto;
pub mod handlers;
pub mod routes;

pub use cookie::SessionCookie;
pub use dto::*;
pub use handlers::{ChatApiError, ChatAppState, REPORT_SENT_MESSAGE};
pub use routes::{chat_router, chat_routes};
