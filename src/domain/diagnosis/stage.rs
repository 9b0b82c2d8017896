//! Dialogue stages and the edges between them.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// Where a conversation currently is.
///
/// - `Initial`: waiting for a description the classifier is confident about
/// - `Clarifying`: asking bank questions for the chosen category
/// - `Summarize`: summary given, report offered
/// - `OfferedReport`: user accepted, waiting for the form
/// - `ReportSent`: form submitted
/// - `Closed`: user said goodbye
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialogueStage {
    #[default]
    Initial,
    Clarifying,
    Summarize,
    OfferedReport,
    ReportSent,
    Closed,
}

impl DialogueStage {
    pub const ALL: [DialogueStage; 6] = [
        DialogueStage::Initial,
        DialogueStage::Clarifying,
        DialogueStage::Summarize,
        DialogueStage::OfferedReport,
        DialogueStage::ReportSent,
        DialogueStage::Closed,
    ];

    /// Wire name of the stage.
    pub fn as_str(&self) -> &'static str {
        match self {
            DialogueStage::Initial => "initial",
            DialogueStage::Clarifying => "clarifying",
            DialogueStage::Summarize => "summarize",
            DialogueStage::OfferedReport => "offered_report",
            DialogueStage::ReportSent => "report_sent",
            DialogueStage::Closed => "closed",
        }
    }

    /// Stages in which a closing phrase ends the conversation.
    pub fn accepts_farewell(&self) -> bool {
        matches!(self, DialogueStage::OfferedReport | DialogueStage::ReportSent)
    }
}

impl fmt::Display for DialogueStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl StateMachine for DialogueStage {
    fn can_transition_to(&self, target: &Self) -> bool {
        use DialogueStage::*;
        matches!(
            (self, target),
            // Classification retries or succeeds
            (Initial, Initial) | (Initial, Clarifying) |
            // More questions, or enough to summarize
            (Clarifying, Clarifying) | (Clarifying, Summarize) |
            // Offer repeated or accepted
            (Summarize, Summarize) | (Summarize, OfferedReport) |
            (OfferedReport, OfferedReport) | (OfferedReport, Closed) |
            // Farewell or a fresh problem after the report
            (ReportSent, Closed) | (ReportSent, Initial) |
            (Closed, Initial) |
            // The report form can be submitted at any point
            (_, ReportSent)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use DialogueStage::*;
        match self {
            Initial => vec![Initial, Clarifying, ReportSent],
            Clarifying => vec![Clarifying, Summarize, ReportSent],
            Summarize => vec![Summarize, OfferedReport, ReportSent],
            OfferedReport => vec![OfferedReport, Closed, ReportSent],
            ReportSent => vec![Closed, Initial, ReportSent],
            Closed => vec![Initial, ReportSent],
        }
    }
}
