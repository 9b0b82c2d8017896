//! In-memory adapters for development and tests.

mod agent_response_store;
mod conversation_store;
mod report_repository;

pub use agent_response_store::InMemoryAgentResponseStore;
pub use conversation_store::InMemoryConversationStore;
pub use report_repository::InMemoryReportRepository;
