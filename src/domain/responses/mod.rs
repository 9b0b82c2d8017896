//! Responses module - deduplicated log of agent replies.
//!
//! Every reply the agent sends is recorded once, keyed by the SHA-256 of
//! its text.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::domain::foundation::{ResponseId, Timestamp, ValidationError};

/// One distinct agent reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentResponseRecord {
    pub id: ResponseId,
    pub response_text: String,
    /// Lower-case hex SHA-256 of `response_text`.
    pub response_hash: String,
    pub created_at: Timestamp,
}

impl AgentResponseRecord {
    /// Builds a new record. Empty text is rejected.
    pub fn new(text: &str) -> Result<Self, ValidationError> {
        if text.is_empty() {
            return Err(ValidationError::empty_field("response_text"));
        }
        Ok(Self {
            id: ResponseId::new(),
            response_text: text.to_string(),
            response_hash: response_hash(text),
            created_at: Timestamp::now(),
        })
    }
}

/// Hex-encoded SHA-256 of the UTF-8 text.
pub fn response_hash(text: &str) -> String {
    hex::encode(Sha256::digest(text.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_matches_known_digest() {
        assert_eq!(
            response_hash("hello"),
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
    }

    #[test]
    fn hash_is_64_lowercase_hex_chars() {
        let hash = response_hash("Let's take another look together.");
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn record_carries_hash_of_text() {
        let record = AgentResponseRecord::new("Hi there").unwrap();
        assert_eq!(record.response_hash, response_hash("Hi there"));
        assert_eq!(record.response_text, "Hi there");
    }

    #[test]
    fn empty_text_is_rejected() {
        assert_eq!(
            AgentResponseRecord::new(""),
            Err(ValidationError::empty_field("response_text"))
        );
    }
}
