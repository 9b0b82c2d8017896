//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## AI Ports
//!
//! - `AIProvider` - Chat completion gateway used by classifier, summarizer and translator
//!
//! ## Storage Ports
//!
//! - `ConversationStore` - Per-session dialogue state
//! - `AgentResponseStore` - Deduplicated log of agent replies
//! - `ReportRepository` - Report submissions
//!
//! ## Delivery Ports
//!
//! - `ReportMailer` - Sends generated reports by email

mod agent_response_store;
mod ai_provider;
mod conversation_store;
mod report_mailer;
mod report_repository;

pub use agent_response_store::AgentResponseStore;
pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, Message,
    MessageRole, ProviderInfo, TokenUsage,
};
pub use conversation_store::ConversationStore;
pub use report_mailer::ReportMailer;
pub use report_repository::ReportRepository;
