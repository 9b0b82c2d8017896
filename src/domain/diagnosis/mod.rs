//! Diagnosis module - the conversational core.
//!
//! The [`DialogueEngine`] drives a conversation through its stages using
//! three language-model collaborators:
//!
//! - [`Classifier`] labels the problem and scores its confidence
//! - [`Summarizer`] condenses the user's turns once enough is known
//! - [`Translator`] renders every reply in the user's language
//!
//! Clarifying questions come from the static question bank.

mod category;
mod classifier;
mod engine;
pub mod question_bank;
mod stage;
mod state;
mod summarizer;
mod translator;

pub use category::IssueCategory;
pub use classifier::{
    parse_classification, parse_confidence, ClassificationResult, Classifier, DEFAULT_QUESTION,
    TROUBLE_QUESTION,
};
pub use engine::{
    DialogueConfig, DialogueEngine, AWAITING_FORM, FAREWELL, GREETING, REPHRASE, REPORT_ACCEPTED,
    REPORT_DECLINED, REPORT_OFFER, RESTART, SHORT_TYPING_DELAY, TYPING_DELAY,
};
pub use question_bank::{ClarifyingQuestion, QuestionId};
pub use stage::DialogueStage;
pub use state::{AgentTurnResult, ConversationState, Role, Turn};
pub use summarizer::{fallback_summary, Summarizer, NOT_ENOUGH_INFO};
pub use translator::{Language, Translator};
