//! HandleMessageHandler - Runs one dialogue turn for a chat session.

use std::sync::Arc;

use crate::domain::diagnosis::{ConversationState, DialogueEngine, DialogueStage};
use crate::domain::foundation::{DomainError, SessionKey};
use crate::ports::{AgentResponseStore, ConversationStore};

/// Command carrying one user message.
#[derive(Debug, Clone)]
pub struct HandleMessageCommand {
    /// Session from the client cookie, if it sent one.
    pub session_key: Option<SessionKey>,
    pub message: String,
    /// Target language code for the reply.
    pub lang: String,
}

/// The agent's reply for the turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandleMessageResult {
    /// Session the turn was recorded under; new if the command had none.
    pub session_key: SessionKey,
    pub response: String,
    pub typing_delay: u32,
    pub stage: DialogueStage,
}

#[derive(Debug, thiserror::Error)]
pub enum HandleMessageError {
    #[error("Message cannot be empty")]
    EmptyMessage,

    #[error("conversation storage failed: {0}")]
    Storage(#[from] DomainError),
}

/// Handler for chat messages.
pub struct HandleMessageHandler {
    engine: DialogueEngine,
    conversations: Arc<dyn ConversationStore>,
    responses: Arc<dyn AgentResponseStore>,
}

impl HandleMessageHandler {
    pub fn new(
        engine: DialogueEngine,
        conversations: Arc<dyn ConversationStore>,
        responses: Arc<dyn AgentResponseStore>,
    ) -> Self {
        Self {
            engine,
            conversations,
            responses,
        }
    }

    pub async fn handle(
        &self,
        cmd: HandleMessageCommand,
    ) -> Result<HandleMessageResult, HandleMessageError> {
        if cmd.message.trim().is_empty() {
            return Err(HandleMessageError::EmptyMessage);
        }

        // 1. Load or start the conversation
        let session_key = cmd.session_key.unwrap_or_default();
        let mut state = self
            .conversations
            .load(&session_key)
            .await?
            .unwrap_or_else(ConversationState::new);

        // 2. Run the dialogue turn
        state.push_user(cmd.message);
        let turn = self.engine.respond(&state, &cmd.lang).await;
        state.apply(&turn);

        // 3. Persist the new state
        self.conversations.save(&session_key, &state).await?;

        // 4. Log the reply; the turn succeeds regardless
        if let Err(err) = self.responses.get_or_create(&turn.response).await {
            tracing::warn!(error = %err, "Failed to record agent response");
        }

        tracing::debug!(session = %session_key, stage = %turn.next_stage, "Handled chat message");

        Ok(HandleMessageResult {
            session_key,
            response: turn.response,
            typing_delay: turn.typing_delay,
            stage: turn.next_stage,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockAIProvider;
    use crate::adapters::memory::{InMemoryAgentResponseStore, InMemoryConversationStore};
    use crate::domain::diagnosis::{
        Classifier, DialogueConfig, IssueCategory, Summarizer, Translator, REPHRASE,
    };
    use crate::domain::foundation::ErrorCode;
    use crate::domain::responses::AgentResponseRecord;
    use async_trait::async_trait;
    use std::time::Duration;

    struct FailingConversationStore;

    #[async_trait]
    impl ConversationStore for FailingConversationStore {
        async fn load(&self, _key: &SessionKey) -> Result<Option<ConversationState>, DomainError> {
            Ok(None)
        }

        async fn save(&self, _key: &SessionKey, _state: &ConversationState) -> Result<(), DomainError> {
            Err(DomainError::new(ErrorCode::DatabaseError, "Simulated save failure"))
        }
    }

    struct FailingResponseStore;

    #[async_trait]
    impl AgentResponseStore for FailingResponseStore {
        async fn get_or_create(&self, _text: &str) -> Result<(AgentResponseRecord, bool), DomainError> {
            Err(DomainError::new(ErrorCode::DatabaseError, "Simulated insert failure"))
        }

        async fn find_by_hash(&self, _hash: &str) -> Result<Option<AgentResponseRecord>, DomainError> {
            Ok(None)
        }
    }

    fn engine(mock: &MockAIProvider) -> DialogueEngine {
        let provider: Arc<dyn crate::ports::AIProvider> = Arc::new(mock.clone());
        DialogueEngine::new(
            Classifier::new(provider.clone()),
            Summarizer::new(provider.clone()),
            Translator::new(provider),
            DialogueConfig::default(),
        )
    }

    fn command(session_key: Option<SessionKey>, message: &str) -> HandleMessageCommand {
        HandleMessageCommand {
            session_key,
            message: message.to_string(),
            lang: "en".to_string(),
        }
    }

    struct Fixture {
        handler: HandleMessageHandler,
        conversations: InMemoryConversationStore,
        responses: InMemoryAgentResponseStore,
    }

    fn fixture(mock: &MockAIProvider) -> Fixture {
        let conversations = InMemoryConversationStore::new(Duration::from_secs(3600));
        let responses = InMemoryAgentResponseStore::new();
        let handler = HandleMessageHandler::new(
            engine(mock),
            Arc::new(conversations.clone()),
            Arc::new(responses.clone()),
        );
        Fixture {
            handler,
            conversations,
            responses,
        }
    }

    #[tokio::test]
    async fn first_message_creates_session_and_classifies() {
        let mock = MockAIProvider::new()
            .with_response("Category: Performance\nConfidence: 88\nClarifyingQuestion: Which pages are slow?");
        let f = fixture(&mock);

        let result = f
            .handler
            .handle(command(None, "my site is really slow"))
            .await
            .unwrap();

        assert_eq!(result.response, "Which pages are slow?");
        assert_eq!(result.stage, DialogueStage::Clarifying);
        assert_eq!(result.typing_delay, 4);

        let state = f.conversations.load(&result.session_key).await.unwrap().unwrap();
        assert_eq!(state.history.len(), 2);
        assert_eq!(state.category, Some(IssueCategory::Performance));
        assert_eq!(state.clarifications, 1);
    }

    #[tokio::test]
    async fn follow_up_uses_stored_state() {
        let mock = MockAIProvider::new()
            .with_response("Category: Performance\nConfidence: 88\nClarifyingQuestion: Which pages are slow?");
        let f = fixture(&mock);

        let first = f.handler.handle(command(None, "slow site")).await.unwrap();
        let second = f
            .handler
            .handle(command(Some(first.session_key), "the homepage"))
            .await
            .unwrap();

        assert_eq!(second.session_key, first.session_key);
        assert_eq!(second.stage, DialogueStage::Clarifying);
        assert!(second
            .response
            .starts_with("Is your site slow to load on all devices and browsers, or only some?"));
    }

    #[tokio::test]
    async fn empty_message_is_rejected_without_state_change() {
        let mock = MockAIProvider::new();
        let f = fixture(&mock);
        let key = SessionKey::new();

        let err = f.handler.handle(command(Some(key), "  \n ")).await.unwrap_err();

        assert!(matches!(err, HandleMessageError::EmptyMessage));
        assert_eq!(f.conversations.load(&key).await.unwrap(), None);
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn replies_are_logged_once() {
        let mock = MockAIProvider::new();
        let f = fixture(&mock);

        let first = f.handler.handle(command(None, "hmm")).await.unwrap();
        f.handler
            .handle(command(Some(first.session_key), "not sure"))
            .await
            .unwrap();

        assert_eq!(first.response, REPHRASE);
        assert_eq!(f.responses.len().await, 1);
    }

    #[tokio::test]
    async fn save_failure_is_a_storage_error() {
        let mock = MockAIProvider::new();
        let handler = HandleMessageHandler::new(
            engine(&mock),
            Arc::new(FailingConversationStore),
            Arc::new(InMemoryAgentResponseStore::new()),
        );

        let err = handler.handle(command(None, "site down")).await.unwrap_err();

        assert!(matches!(err, HandleMessageError::Storage(_)));
    }

    #[tokio::test]
    async fn response_log_failure_does_not_fail_turn() {
        let mock = MockAIProvider::new();
        let handler = HandleMessageHandler::new(
            engine(&mock),
            Arc::new(InMemoryConversationStore::new(Duration::from_secs(60))),
            Arc::new(FailingResponseStore),
        );

        let result = handler.handle(command(None, "site down")).await.unwrap();

        assert_eq!(result.stage, DialogueStage::Initial);
    }
}
