//! Issue classifier.
//!
//! Asks the language model to label a problem description with one of the
//! diagnostic categories, a confidence score and a follow-up question, then
//! parses the line-oriented reply. Gateway failures never escape: they turn
//! into a zero-confidence result.

use std::sync::Arc;

use crate::ports::{AIProvider, CompletionRequest, MessageRole};

use super::IssueCategory;

const SYSTEM_PROMPT: &str =
    "You classify website problems into categories and ask clarifying questions.";

/// Question returned for empty input and for replies without one.
pub const DEFAULT_QUESTION: &str = "Can you describe the issue a bit more so I can help?";

/// Question returned when the gateway call fails.
pub const TROUBLE_QUESTION: &str =
    "I'm having trouble processing your request. Can you describe the issue a bit more?";

/// Confidence used when the reply carries a non-numeric value.
const UNPARSEABLE_CONFIDENCE: u8 = 50;

const TEMPERATURE: f32 = 0.4;

/// Parsed classifier verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationResult {
    pub category: IssueCategory,
    /// Always within 0..=100.
    pub confidence: u8,
    pub clarifying_question: String,
}

impl ClassificationResult {
    fn unclassified(question: &str) -> Self {
        Self {
            category: IssueCategory::Unclassified,
            confidence: 0,
            clarifying_question: question.to_string(),
        }
    }
}

/// Classifies problem descriptions through the language model.
#[derive(Clone)]
pub struct Classifier {
    provider: Arc<dyn AIProvider>,
}

impl Classifier {
    pub fn new(provider: Arc<dyn AIProvider>) -> Self {
        Self { provider }
    }

    /// Classifies one user message.
    pub async fn classify(&self, user_input: &str) -> ClassificationResult {
        if user_input.trim().is_empty() {
            return ClassificationResult::unclassified(DEFAULT_QUESTION);
        }

        let request = CompletionRequest::new()
            .with_system_prompt(SYSTEM_PROMPT)
            .with_message(MessageRole::User, build_prompt(user_input))
            .with_temperature(TEMPERATURE);

        match self.provider.complete(request).await {
            Ok(response) => {
                let result = parse_classification(&response.content);
                tracing::debug!(
                    category = %result.category,
                    confidence = result.confidence,
                    "Classified issue"
                );
                result
            }
            Err(err) => {
                tracing::warn!(error = %err, "Issue classification failed");
                ClassificationResult::unclassified(TROUBLE_QUESTION)
            }
        }
    }
}

fn build_prompt(user_input: &str) -> String {
    let categories = IssueCategory::DIAGNOSTIC
        .iter()
        .map(|c| c.label())
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "\nYou are a helpful support agent. Categorize the user's website issue into one of these diagnostic categories:\n\
         {categories}\n\n\
         Respond in this format:\n\
         Category: <CATEGORY>\n\
         Confidence: <0–100>\n\
         ClarifyingQuestion: <QUESTION to understand issue better>\n\n\
         User Input:\n\
         \"{user_input}\"\n"
    )
}

/// Parses a `Category:` / `Confidence:` / `ClarifyingQuestion:` reply.
///
/// Lines are matched by prefix after trimming; anything else is ignored and
/// missing fields keep their defaults.
pub fn parse_classification(reply: &str) -> ClassificationResult {
    let mut result = ClassificationResult::unclassified(DEFAULT_QUESTION);

    for line in reply.lines().map(str::trim) {
        if let Some(rest) = line.strip_prefix("Category:") {
            result.category = IssueCategory::from_label(rest);
        } else if let Some(rest) = line.strip_prefix("Confidence:") {
            result.confidence = parse_confidence(rest);
        } else if let Some(rest) = line.strip_prefix("ClarifyingQuestion:") {
            result.clarifying_question = rest.trim().to_string();
        }
    }

    result
}

/// Parses an integer confidence, clamping it into 0..=100.
pub fn parse_confidence(raw: &str) -> u8 {
    let raw = raw.trim();
    match raw.parse::<i64>() {
        Ok(value) => value.clamp(0, 100) as u8,
        Err(_) if is_integer_literal(raw) => {
            // Too large for i64: the sign decides which bound applies.
            if raw.starts_with('-') {
                0
            } else {
                100
            }
        }
        Err(_) => UNPARSEABLE_CONFIDENCE,
    }
}

fn is_integer_literal(raw: &str) -> bool {
    let digits = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}
