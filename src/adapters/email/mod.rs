//! Email adapters - Implementations of the ReportMailer port.

mod log_mailer;
mod resend_mailer;

pub use log_mailer::LogMailer;
pub use resend_mailer::{ResendConfig, ResendMailer};
