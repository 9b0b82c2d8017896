//! In-memory ConversationStore with expiry.
//!
//! Useful for development and tests. Entries expire `ttl` after their
//! last save and are dropped lazily on access.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use crate::domain::diagnosis::ConversationState;
use crate::domain::foundation::{DomainError, SessionKey};
use crate::ports::ConversationStore;

#[derive(Debug, Clone)]
struct Entry {
    state: ConversationState,
    expires_at: Instant,
}

/// In-memory session store.
#[derive(Debug, Clone)]
pub struct InMemoryConversationStore {
    sessions: Arc<RwLock<HashMap<SessionKey, Entry>>>,
    ttl: Duration,
}

impl InMemoryConversationStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    /// Number of stored sessions, expired ones included.
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Drops every expired session.
    pub async fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, entry| entry.expires_at > now);
        before - sessions.len()
    }
}

#[async_trait]
impl ConversationStore for InMemoryConversationStore {
    async fn load(&self, key: &SessionKey) -> Result<Option<ConversationState>, DomainError> {
        let now = Instant::now();
        {
            let sessions = self.sessions.read().await;
            match sessions.get(key) {
                Some(entry) if entry.expires_at > now => return Ok(Some(entry.state.clone())),
                Some(_) => {}
                None => return Ok(None),
            }
        }
        self.sessions.write().await.remove(key);
        Ok(None)
    }

    async fn save(&self, key: &SessionKey, state: &ConversationState) -> Result<(), DomainError> {
        let entry = Entry {
            state: state.clone(),
            expires_at: Instant::now() + self.ttl,
        };
        self.sessions.write().await.insert(*key, entry);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::diagnosis::DialogueStage;

    fn sample_state() -> ConversationState {
        let mut state = ConversationState::new();
        state.push_user("my site is slow");
        state.stage = DialogueStage::Clarifying;
        state
    }

    #[tokio::test]
    async fn unknown_session_loads_none() {
        let store = InMemoryConversationStore::new(Duration::from_secs(60));
        assert_eq!(store.load(&SessionKey::new()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn save_then_load_returns_state() {
        let store = InMemoryConversationStore::new(Duration::from_secs(60));
        let key = SessionKey::new();

        store.save(&key, &sample_state()).await.unwrap();

        assert_eq!(store.load(&key).await.unwrap(), Some(sample_state()));
    }

    #[tokio::test]
    async fn last_write_wins() {
        let store = InMemoryConversationStore::new(Duration::from_secs(60));
        let key = SessionKey::new();

        store.save(&key, &ConversationState::new()).await.unwrap();
        store.save(&key, &sample_state()).await.unwrap();

        assert_eq!(store.load(&key).await.unwrap(), Some(sample_state()));
        assert_eq!(store.session_count().await, 1);
    }

    #[tokio::test]
    async fn expired_session_reads_as_absent_and_is_dropped() {
        let store = InMemoryConversationStore::new(Duration::from_millis(10));
        let key = SessionKey::new();
        store.save(&key, &sample_state()).await.unwrap();

        tokio::time::sleep(Duration::from_millis(30)).await;

        assert_eq!(store.load(&key).await.unwrap(), None);
        assert_eq!(store.session_count().await, 0);
    }

    #[tokio::test]
    async fn purge_expired_removes_only_stale_entries() {
        let store = InMemoryConversationStore::new(Duration::from_millis(10));
        store.save(&SessionKey::new(), &sample_state()).await.unwrap();
        tokio::time::sleep(Duration::from_millis(30)).await;

        let fresh = InMemoryConversationStore {
            ttl: Duration::from_secs(60),
            ..store.clone()
        };
        fresh.save(&SessionKey::new(), &sample_state()).await.unwrap();

        assert_eq!(store.purge_expired().await, 1);
        assert_eq!(store.session_count().await, 1);
    }
}
