//! Infrastructure layer for campus-concierge
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod handlers;
pub mod logging;
pub mod providers;
pub mod sessions;

// Re-export commonly used types
pub use config::{ConfigError, ConfigIssue, ConfigLoader, FileConfig, Severity};
pub use handlers::{PromptedHandler, ToolDescriptor, ToolRegistry, build_handler_registry};
pub use logging::JsonlConversationLogger;
pub use providers::OpenAiGateway;
pub use sessions::{InMemorySessionStore, SessionStoreSettings};
