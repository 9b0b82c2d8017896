//! Foundation module - Shared domain primitives.
//!
//! Identifiers, timestamps, the state machine trait and error types
//! shared by the diagnosis and report modules.

mod errors;
mod ids;
mod state_machine;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{InteractionId, ReportId, ResponseId, SessionKey};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
