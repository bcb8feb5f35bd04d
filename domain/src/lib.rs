//! Domain layer for campus-concierge
//!
//! This crate contains the core routing vocabulary, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Routing
//!
//! Every question is classified into one or more [`DomainTag`]s. The
//! [`RoutingDecision`] records which domains were chosen and how:
//!
//! - **Classifier**: the router model returned a valid decision
//! - **KeywordFallback**: the model failed, the query's keywords decided
//! - **DefaultFallback**: nothing matched, the configured default domain is used
//!
//! ## Answers
//!
//! Each dispatched domain yields exactly one [`HandlerOutcome`]. Outcomes are
//! merged into a single [`FinalResponse`].

pub mod answer;
pub mod core;
pub mod prompt;
pub mod routing;
pub mod session;
pub mod util;

// Re-export commonly used types
pub use answer::{
    outcome::HandlerOutcome,
    response::{FinalResponse, ResponseSource},
};
pub use core::{error::DomainError, model::Model};
pub use prompt::PromptTemplate;
pub use routing::{
    decision::{DecisionSource, RoutingDecision},
    keywords::match_keywords,
    parsing::{ParseFailure, parse_decision},
    tag::DomainTag,
};
pub use session::entities::{Role, Session, Turn, recent_turns};
