//! Agent response store port.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::responses::AgentResponseRecord;

/// Deduplicated log of agent replies, keyed by content hash.
#[async_trait]
pub trait AgentResponseStore: Send + Sync {
    /// Returns the record for `text`, creating it if absent.
    ///
    /// The boolean is true when this call created the record. Calling
    /// twice with the same text yields the same record id both times.
    ///
    /// # Errors
    ///
    /// - `EmptyField` for empty text
    /// - `DatabaseError` on storage failure
    async fn get_or_create(&self, text: &str) -> Result<(AgentResponseRecord, bool), DomainError>;

    /// Looks up a record by hash.
    async fn find_by_hash(&self, hash: &str) -> Result<Option<AgentResponseRecord>, DomainError>;
}
