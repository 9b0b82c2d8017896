//! Conversation summarizer.

use std::sync::Arc;

use crate::ports::{AIProvider, CompletionRequest, MessageRole};

use super::{ConversationState, IssueCategory};

const SYSTEM_PROMPT: &str =
    "You summarize website problems conversationally, like a helpful doctor.";

/// Reply when the history carries no user text.
pub const NOT_ENOUGH_INFO: &str = "I don't have enough information about your issue yet.";

const TEMPERATURE: f32 = 0.6;

/// Turns the user's side of a conversation into a short prose summary.
#[derive(Clone)]
pub struct Summarizer {
    provider: Arc<dyn AIProvider>,
}

impl Summarizer {
    pub fn new(provider: Arc<dyn AIProvider>) -> Self {
        Self { provider }
    }

    /// Summarizes the user turns of the conversation in one to three sentences.
    ///
    /// Falls back to a category sentence when the gateway fails.
    pub async fn summarize(&self, state: &ConversationState, category: IssueCategory) -> String {
        let user_messages = state.user_contents();

        if user_messages.is_empty() {
            return NOT_ENOUGH_INFO.to_string();
        }

        let request = CompletionRequest::new()
            .with_system_prompt(SYSTEM_PROMPT)
            .with_message(MessageRole::User, build_prompt(&user_messages, category))
            .with_temperature(TEMPERATURE);

        match self.provider.complete(request).await {
            Ok(response) => response.content.trim().to_string(),
            Err(err) => {
                tracing::warn!(error = %err, category = %category, "Summary generation failed");
                fallback_summary(category)
            }
        }
    }
}

fn build_prompt(user_messages: &[&str], category: IssueCategory) -> String {
    format!(
        "\nYou are a helpful AI support agent. Summarize the user's issue based on this conversation in a friendly and clear way.\n\n\
         Category: {category}\n\
         Conversation:\n\
         {conversation}\n\n\
         Respond in 1–3 sentences like a website doctor would explain it to the user.\n",
        category = category.label(),
        conversation = user_messages.join("\n"),
    )
}

/// Deterministic summary used when the gateway is unavailable.
pub fn fallback_summary(category: IssueCategory) -> String {
    format!(
        "Based on our conversation, you're experiencing a {} issue with your website.",
        category.label().to_lowercase()
    )
}
