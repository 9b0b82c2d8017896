//! Per-session conversation state.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{DialogueStage, IssueCategory, QuestionId};

/// Author of a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Agent,
}

/// One message in the history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn agent(content: impl Into<String>) -> Self {
        Self {
            role: Role::Agent,
            content: content.into(),
        }
    }
}

/// Everything the engine needs to pick the next reply.
///
/// Stored as one JSON document per session. `category` stays `None` until
/// the classifier is confident, then sticks until the dialogue restarts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationState {
    #[serde(default)]
    pub history: Vec<Turn>,
    #[serde(default)]
    pub stage: DialogueStage,
    #[serde(default)]
    pub category: Option<IssueCategory>,
    #[serde(default)]
    pub clarifications: u32,
    #[serde(default)]
    pub asked_questions: BTreeSet<QuestionId>,
}

/// Outcome of one engine turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentTurnResult {
    pub response: String,
    pub next_stage: DialogueStage,
    pub category: Option<IssueCategory>,
    pub clarifications: u32,
    pub asked_questions: BTreeSet<QuestionId>,
    /// Seconds the widget shows a typing indicator.
    pub typing_delay: u32,
}

impl ConversationState {
    /// Creates an empty conversation at the initial stage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a user turn.
    pub fn push_user(&mut self, content: impl Into<String>) {
        self.history.push(Turn::user(content));
    }

    /// Content of the most recent user turn, or "" when there is none.
    pub fn latest_user_message(&self) -> &str {
        self.history
            .iter()
            .rev()
            .find(|t| t.role == Role::User)
            .map(|t| t.content.as_str())
            .unwrap_or_default()
    }

    /// Non-empty user contents, oldest first.
    pub fn user_contents(&self) -> Vec<&str> {
        self.history
            .iter()
            .filter(|t| t.role == Role::User && !t.content.is_empty())
            .map(|t| t.content.as_str())
            .collect()
    }

    /// Records the agent reply and adopts the engine's decisions.
    pub fn apply(&mut self, result: &AgentTurnResult) {
        self.history.push(Turn::agent(result.response.clone()));
        self.stage = result.next_stage;
        self.category = result.category;
        self.clarifications = result.clarifications;
        self.asked_questions = result.asked_questions.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_result() -> AgentTurnResult {
        AgentTurnResult {
            response: "Which feature or page isn't working as expected?".to_string(),
            next_stage: DialogueStage::Clarifying,
            category: Some(IssueCategory::Functionality),
            clarifications: 1,
            asked_questions: BTreeSet::new(),
            typing_delay: 4,
        }
    }

    #[test]
    fn new_state_is_empty_and_initial() {
        let state = ConversationState::new();
        assert!(state.history.is_empty());
        assert_eq!(state.stage, DialogueStage::Initial);
        assert_eq!(state.category, None);
        assert_eq!(state.clarifications, 0);
    }

    #[test]
    fn latest_user_message_skips_agent_turns() {
        let mut state = ConversationState::new();
        state.push_user("my form is broken");
        state.apply(&sample_result());
        assert_eq!(state.latest_user_message(), "my form is broken");
        assert_eq!(ConversationState::new().latest_user_message(), "");
    }

    #[test]
    fn user_contents_drops_empty_turns() {
        let mut state = ConversationState::new();
        state.push_user("first");
        state.push_user("");
        state.history.push(Turn::agent("question"));
        state.push_user("second");
        assert_eq!(state.user_contents(), vec!["first", "second"]);
    }

    #[test]
    fn apply_records_reply_and_fields() {
        let mut state = ConversationState::new();
        state.push_user("contact form does nothing");
        state.apply(&sample_result());

        assert_eq!(state.history.len(), 2);
        assert_eq!(state.history[1].role, Role::Agent);
        assert_eq!(state.stage, DialogueStage::Clarifying);
        assert_eq!(state.category, Some(IssueCategory::Functionality));
        assert_eq!(state.clarifications, 1);
    }

    #[test]
    fn round_trips_through_json() {
        let mut state = ConversationState::new();
        state.push_user("site hacked");
        state.category = Some(IssueCategory::SecurityHack);
        state.asked_questions.insert(QuestionId {
            category: IssueCategory::SecurityHack,
            index: 0,
        });

        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["history"][0]["role"], "user");
        assert_eq!(json["category"], "Security/Hack");

        let back: ConversationState = serde_json::from_value(json).unwrap();
        assert_eq!(back, state);
    }

    #[test]
    fn missing_fields_deserialize_to_defaults() {
        let state: ConversationState = serde_json::from_str("{}").unwrap();
        assert_eq!(state, ConversationState::new());
    }
}
