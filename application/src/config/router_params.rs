//! Router parameters — pipeline control.
//!
//! [`RouterParams`] groups the static parameters that control classification,
//! dispatch and combination. These are application-layer concerns; the
//! infrastructure config file maps onto them.

use concierge_domain::{DomainTag, Model};
use std::time::Duration;

/// Text returned when no handler produced an answer.
pub const DEFAULT_FALLBACK_MESSAGE: &str = "I'm sorry, I couldn't find an answer to that right now. \
Please try rephrasing your question or check the university's official resources.";

/// Text returned for an empty query.
pub const DEFAULT_EMPTY_QUERY_MESSAGE: &str =
    "Please ask a question about courses, campus locations, or events.";

/// Routing pipeline parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct RouterParams {
    /// Model that classifies queries into domains.
    pub router_model: Model,
    /// Model that merges multi-domain answers.
    pub synthesis_model: Model,
    /// Institution named in the prompts.
    pub university: String,
    /// Domain used when neither the model nor the keywords decide.
    pub default_domain: DomainTag,
    /// How many recent turns the router model sees.
    pub history_window: usize,
    /// Timeout for the classification request.
    pub classify_timeout: Duration,
    /// Timeout for each handler call.
    pub handler_timeout: Duration,
    /// Timeout for the synthesis request.
    pub synthesis_timeout: Duration,
    /// Maximum handlers running at once.
    pub max_concurrency: usize,
    /// Text returned when every handler failed.
    pub fallback_message: String,
    /// Text returned for a blank query.
    pub empty_query_message: String,
}

impl Default for RouterParams {
    fn default() -> Self {
        Self {
            router_model: Model::Gpt4oMini,
            synthesis_model: Model::Gpt4oMini,
            university: "Duke University".to_string(),
            default_domain: DomainTag::General,
            history_window: 10,
            classify_timeout: Duration::from_secs(20),
            handler_timeout: Duration::from_secs(30),
            synthesis_timeout: Duration::from_secs(30),
            max_concurrency: DomainTag::ALL.len(),
            fallback_message: DEFAULT_FALLBACK_MESSAGE.to_string(),
            empty_query_message: DEFAULT_EMPTY_QUERY_MESSAGE.to_string(),
        }
    }
}

impl RouterParams {
    // ==================== Builder Methods ====================

    pub fn with_router_model(mut self, model: Model) -> Self {
        self.router_model = model;
        self
    }

    pub fn with_synthesis_model(mut self, model: Model) -> Self {
        self.synthesis_model = model;
        self
    }

    pub fn with_university(mut self, university: impl Into<String>) -> Self {
        self.university = university.into();
        self
    }

    pub fn with_default_domain(mut self, domain: DomainTag) -> Self {
        self.default_domain = domain;
        self
    }

    pub fn with_history_window(mut self, turns: usize) -> Self {
        self.history_window = turns;
        self
    }

    pub fn with_classify_timeout(mut self, timeout: Duration) -> Self {
        self.classify_timeout = timeout;
        self
    }

    pub fn with_handler_timeout(mut self, timeout: Duration) -> Self {
        self.handler_timeout = timeout;
        self
    }

    pub fn with_synthesis_timeout(mut self, timeout: Duration) -> Self {
        self.synthesis_timeout = timeout;
        self
    }

    /// Zero is treated as one.
    pub fn with_max_concurrency(mut self, max: usize) -> Self {
        self.max_concurrency = max.max(1);
        self
    }

    pub fn with_fallback_message(mut self, message: impl Into<String>) -> Self {
        self.fallback_message = message.into();
        self
    }
}
