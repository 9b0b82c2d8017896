//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors)
//! - `diagnosis` - Dialogue engine, classifier, question bank, summarizer, translator
//! - `report` - Report form validation and generated reports
//! - `responses` - Deduplicated agent reply records

pub mod diagnosis;
pub mod foundation;
pub mod report;
pub mod responses;
