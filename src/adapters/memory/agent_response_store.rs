//! In-memory AgentResponseStore.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::DomainError;
use crate::domain::responses::AgentResponseRecord;
use crate::ports::AgentResponseStore;

/// Reply log keyed by content hash.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAgentResponseStore {
    records: Arc<RwLock<HashMap<String, AgentResponseRecord>>>,
}

impl InMemoryAgentResponseStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl AgentResponseStore for InMemoryAgentResponseStore {
    async fn get_or_create(&self, text: &str) -> Result<(AgentResponseRecord, bool), DomainError> {
        let candidate = AgentResponseRecord::new(text)?;

        let mut records = self.records.write().await;
        if let Some(existing) = records.get(&candidate.response_hash) {
            return Ok((existing.clone(), false));
        }
        records.insert(candidate.response_hash.clone(), candidate.clone());
        Ok((candidate, true))
    }

    async fn find_by_hash(&self, hash: &str) -> Result<Option<AgentResponseRecord>, DomainError> {
        Ok(self.records.read().await.get(hash).cloned())
    }
}
