//! Report module - form submissions and the reports generated from them.

mod report;
mod request;

pub use report::{report_content, DiagnosticReport, UserInteraction};
pub use request::ReportRequest;
