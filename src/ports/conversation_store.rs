//! Conversation store port.
//!
//! Holds one [`ConversationState`] per session key. Entries may expire;
//! an expired entry reads as absent.

use async_trait::async_trait;

use crate::domain::diagnosis::ConversationState;
use crate::domain::foundation::{DomainError, SessionKey};

/// Session-scoped storage of dialogue state.
///
/// Last write wins; implementations keep a single entry per key.
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// Loads the state for a session, or `None` if unknown or expired.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on storage failure
    /// - `SerializationError` if the stored state cannot be decoded
    async fn load(&self, key: &SessionKey) -> Result<Option<ConversationState>, DomainError>;

    /// Saves the state for a session, refreshing its expiry.
    async fn save(&self, key: &SessionKey, state: &ConversationState) -> Result<(), DomainError>;
}
