//! PostgreSQL adapters - Database implementations for storage ports.
//!
//! - `PostgresConversationStore` - Session state as JSONB with expiry
//! - `PostgresAgentResponseStore` - Hash-keyed reply log
//! - `PostgresReportRepository` - Interactions and reports

mod agent_response_store;
mod conversation_store;
mod report_repository;

pub use agent_response_store::PostgresAgentResponseStore;
pub use conversation_store::PostgresConversationStore;
pub use report_repository::PostgresReportRepository;
