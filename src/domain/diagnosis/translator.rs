//! Reply translation.
//!
//! English and unsupported language codes pass through untouched, as does
//! empty text. Supported codes go through the language model; any failure
//! returns the original text.

use std::sync::Arc;

use crate::ports::{AIProvider, CompletionRequest, MessageRole};

const SYSTEM_PROMPT: &str = "You are a professional translator.";
const TEMPERATURE: f32 = 0.3;

/// Languages replies can be translated into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Spanish,
    French,
    German,
    Italian,
    Portuguese,
    Dutch,
    Polish,
    Russian,
    Japanese,
    Korean,
    Chinese,
    Arabic,
}

impl Language {
    pub const ALL: [Language; 12] = [
        Language::Spanish,
        Language::French,
        Language::German,
        Language::Italian,
        Language::Portuguese,
        Language::Dutch,
        Language::Polish,
        Language::Russian,
        Language::Japanese,
        Language::Korean,
        Language::Chinese,
        Language::Arabic,
    ];

    /// Looks up a two-letter code. Codes are case-sensitive.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.code() == code)
    }

    pub fn code(&self) -> &'static str {
        match self {
            Language::Spanish => "es",
            Language::French => "fr",
            Language::German => "de",
            Language::Italian => "it",
            Language::Portuguese => "pt",
            Language::Dutch => "nl",
            Language::Polish => "pl",
            Language::Russian => "ru",
            Language::Japanese => "ja",
            Language::Korean => "ko",
            Language::Chinese => "zh",
            Language::Arabic => "ar",
        }
    }

    /// English name used in the prompt.
    pub fn name(&self) -> &'static str {
        match self {
            Language::Spanish => "Spanish",
            Language::French => "French",
            Language::German => "German",
            Language::Italian => "Italian",
            Language::Portuguese => "Portuguese",
            Language::Dutch => "Dutch",
            Language::Polish => "Polish",
            Language::Russian => "Russian",
            Language::Japanese => "Japanese",
            Language::Korean => "Korean",
            Language::Chinese => "Chinese",
            Language::Arabic => "Arabic",
        }
    }
}

/// Translates agent replies into the user's language.
#[derive(Clone)]
pub struct Translator {
    provider: Arc<dyn AIProvider>,
}

impl Translator {
    pub fn new(provider: Arc<dyn AIProvider>) -> Self {
        Self { provider }
    }

    /// Translates `text` into the language with code `lang`.
    pub async fn translate(&self, text: &str, lang: &str) -> String {
        if text.is_empty() || lang == "en" {
            return text.to_string();
        }
        let Some(language) = Language::from_code(lang) else {
            return text.to_string();
        };

        let request = CompletionRequest::new()
            .with_system_prompt(SYSTEM_PROMPT)
            .with_message(
                MessageRole::User,
                format!("Translate the following message into {}:\n\n{}", language.name(), text),
            )
            .with_temperature(TEMPERATURE);

        match self.provider.complete(request).await {
            Ok(response) => response.content.trim().to_string(),
            Err(err) => {
                tracing::warn!(error = %err, lang, "Translation failed, keeping original text");
                text.to_string()
            }
        }
    }
}
