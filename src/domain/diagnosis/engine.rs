//! Dialogue engine.
//!
//! Picks the agent's next reply from the conversation state. Each stage has
//! one handler; the engine never fails, because every gateway-backed
//! collaborator already degrades to a fixed fallback.

use std::collections::BTreeSet;

use super::question_bank::remaining_questions;
use super::{
    AgentTurnResult, Classifier, ConversationState, DialogueStage, IssueCategory, Summarizer,
    Translator,
};

pub const GREETING: &str =
    "Hello! I'm here to help you with your website issue. Can you describe what's happening?";
pub const FAREWELL: &str =
    "You're very welcome! 😊 If you ever need more help, I'm just a click away. Take care!";
pub const REPHRASE: &str =
    "Hmm, I'm not quite sure yet — could you describe that a bit differently?";
pub const REPORT_OFFER: &str =
    "Would you like me to email you a full diagnostic report with tips to fix it?";
pub const REPORT_ACCEPTED: &str = "No problem. Just enter your name and email below to get a report. It's free and tailored to your issue.";
pub const REPORT_DECLINED: &str =
    "Totally fine! If you change your mind, just let me know and I'll prepare a report for you.";
pub const AWAITING_FORM: &str = "Awesome. Just fill out your name and email below and I'll generate your custom report. 📬";
pub const RESTART: &str = "Let's take another look together. Could you explain a bit more?";

/// Typing delay for greeting and farewell.
pub const SHORT_TYPING_DELAY: u32 = 3;
/// Typing delay for everything else.
pub const TYPING_DELAY: u32 = 4;

/// Tunables for the dialogue.
#[derive(Debug, Clone)]
pub struct DialogueConfig {
    /// Substrings that end the conversation once a report was offered.
    pub closing_phrases: Vec<String>,
    /// Exact replies that accept the report offer.
    pub affirmative_replies: Vec<String>,
    /// Exact replies that decline the report offer.
    pub negative_replies: Vec<String>,
    /// Minimum classifier confidence to leave the initial stage.
    pub confidence_threshold: u8,
    /// Clarification count at which the engine moves to the summary.
    pub max_clarifications: u32,
    /// Maximum bank questions asked in one reply.
    pub question_batch_size: usize,
}

impl Default for DialogueConfig {
    fn default() -> Self {
        Self {
            closing_phrases: [
                "thanks",
                "thank you",
                "bye",
                "goodbye",
                "that's all",
                "got it",
                "appreciate it",
                "ok cool",
            ]
            .map(String::from)
            .to_vec(),
            affirmative_replies: ["yes", "sure", "okay", "ok", "yep", "yeah"]
                .map(String::from)
                .to_vec(),
            negative_replies: ["no", "not now", "maybe later"].map(String::from).to_vec(),
            confidence_threshold: 70,
            max_clarifications: 2,
            question_batch_size: 3,
        }
    }
}

impl DialogueConfig {
    /// `input` must already be lower-cased and trimmed.
    fn is_closing(&self, input: &str) -> bool {
        self.closing_phrases
            .iter()
            .any(|phrase| input.contains(phrase.as_str()))
    }

    fn is_affirmative(&self, input: &str) -> bool {
        self.affirmative_replies.iter().any(|r| r == input)
    }

    fn is_negative(&self, input: &str) -> bool {
        self.negative_replies.iter().any(|r| r == input)
    }
}

/// Stage machine driving the conversation.
#[derive(Clone)]
pub struct DialogueEngine {
    classifier: Classifier,
    summarizer: Summarizer,
    translator: Translator,
    config: DialogueConfig,
}

impl DialogueEngine {
    pub fn new(
        classifier: Classifier,
        summarizer: Summarizer,
        translator: Translator,
        config: DialogueConfig,
    ) -> Self {
        Self {
            classifier,
            summarizer,
            translator,
            config,
        }
    }

    /// Produces the next agent reply, translated into `lang`.
    pub async fn respond(&self, state: &ConversationState, lang: &str) -> AgentTurnResult {
        let mut result = self.next_turn(state).await;
        result.response = self.translator.translate(&result.response, lang).await;
        tracing::debug!(
            from = %state.stage,
            to = %result.next_stage,
            clarifications = result.clarifications,
            "Dialogue turn"
        );
        result
    }

    async fn next_turn(&self, state: &ConversationState) -> AgentTurnResult {
        if state.history.is_empty() {
            return AgentTurnResult {
                response: GREETING.to_string(),
                next_stage: DialogueStage::Initial,
                category: None,
                clarifications: 0,
                asked_questions: BTreeSet::new(),
                typing_delay: SHORT_TYPING_DELAY,
            };
        }

        let input = state.latest_user_message().trim().to_lowercase();

        if state.stage.accepts_farewell() && self.config.is_closing(&input) {
            return AgentTurnResult {
                typing_delay: SHORT_TYPING_DELAY,
                ..carry(state, FAREWELL, DialogueStage::Closed)
            };
        }

        match state.stage {
            DialogueStage::Initial => self.classify(state).await,
            DialogueStage::Clarifying => self.clarify(state).await,
            DialogueStage::Summarize => self.answer_offer(state, &input),
            DialogueStage::OfferedReport => carry(state, AWAITING_FORM, DialogueStage::OfferedReport),
            DialogueStage::ReportSent | DialogueStage::Closed => AgentTurnResult {
                response: RESTART.to_string(),
                next_stage: DialogueStage::Initial,
                category: None,
                clarifications: 0,
                asked_questions: BTreeSet::new(),
                typing_delay: TYPING_DELAY,
            },
        }
    }

    async fn classify(&self, state: &ConversationState) -> AgentTurnResult {
        let verdict = self.classifier.classify(state.latest_user_message()).await;

        if verdict.confidence >= self.config.confidence_threshold {
            AgentTurnResult {
                category: Some(verdict.category),
                clarifications: 1,
                ..carry(state, &verdict.clarifying_question, DialogueStage::Clarifying)
            }
        } else {
            AgentTurnResult {
                category: None,
                clarifications: state.clarifications.saturating_add(1),
                ..carry(state, REPHRASE, DialogueStage::Initial)
            }
        }
    }

    async fn clarify(&self, state: &ConversationState) -> AgentTurnResult {
        let category = state.category.unwrap_or(IssueCategory::Unclassified);
        let remaining = remaining_questions(category, &state.asked_questions);

        if state.clarifications >= self.config.max_clarifications || remaining.is_empty() {
            let summary = self.summarizer.summarize(state, category).await;
            let response = format!("{} {}", summary, REPORT_OFFER);
            return carry(state, &response, DialogueStage::Summarize);
        }

        let batch: Vec<_> = remaining
            .into_iter()
            .take(self.config.question_batch_size)
            .collect();
        let response = batch.iter().map(|q| q.text).collect::<Vec<_>>().join("\n\n");

        let mut asked = state.asked_questions.clone();
        asked.extend(batch.iter().map(|q| q.id));

        AgentTurnResult {
            clarifications: state.clarifications + 1,
            asked_questions: asked,
            ..carry(state, &response, DialogueStage::Clarifying)
        }
    }

    fn answer_offer(&self, state: &ConversationState, input: &str) -> AgentTurnResult {
        if self.config.is_affirmative(input) {
            carry(state, REPORT_ACCEPTED, DialogueStage::OfferedReport)
        } else if self.config.is_negative(input) {
            carry(state, REPORT_DECLINED, DialogueStage::Summarize)
        } else {
            carry(state, REPORT_OFFER, DialogueStage::Summarize)
        }
    }
}

/// Result that keeps category, clarifications and asked questions as they are.
fn carry(state: &ConversationState, response: &str, next_stage: DialogueStage) -> AgentTurnResult {
    AgentTurnResult {
        response: response.to_string(),
        next_stage,
        category: state.category,
        clarifications: state.clarifications,
        asked_questions: state.asked_questions.clone(),
        typing_delay: TYPING_DELAY,
    }
}
