//! Chat command handlers.

mod handle_message;
mod submit_report;

pub use handle_message::{
    HandleMessageCommand, HandleMessageError, HandleMessageHandler, HandleMessageResult,
};
pub use submit_report::{
    SubmitReportCommand, SubmitReportError, SubmitReportHandler, SubmitReportResult,
};
