//! Adapters - Implementations of port interfaces.
//!
//! - `ai` - Language model gateways (OpenAI, mock)
//! - `email` - Report delivery (Resend, log-only)
//! - `http` - Chat widget REST endpoints
//! - `memory` - In-process stores for development and tests
//! - `postgres` - PostgreSQL stores

pub mod ai;
pub mod email;
pub mod http;
pub mod memory;
pub mod postgres;
