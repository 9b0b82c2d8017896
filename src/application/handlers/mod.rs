//! Application handlers.
//!
//! Command handlers that orchestrate domain operations over ports.

pub mod chat;

pub use chat::{
    HandleMessageCommand, HandleMessageError, HandleMessageHandler, HandleMessageResult,
    SubmitReportCommand, SubmitReportError, SubmitReportHandler, SubmitReportResult,
};
