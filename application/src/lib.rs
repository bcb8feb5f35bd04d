//! Application layer for campus-concierge
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::RouterParams;
pub use ports::{
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    domain_handler::{DomainHandler, HandlerError, HandlerRegistry},
    llm_gateway::{GatewayError, LlmGateway, LlmSession, SessionOptions},
    progress::{NoProgress, RoutingProgressNotifier},
    session_store::{SessionHandle, SessionStore},
};
pub use use_cases::classify::{ClassificationError, Classifier};
pub use use_cases::combine::{Combiner, CombinerServiceError};
pub use use_cases::dispatch::Dispatcher;
pub use use_cases::process_query::{DEFAULT_SESSION_ID, QueryAnswer, QueryService};
pub use use_cases::route::{RouteOutput, Router};
