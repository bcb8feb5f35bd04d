//! Domain handler port
//!
//! A handler answers questions for one [`DomainTag`]. How it does so (model
//! calls, search, APIs) is its own business; the router only sees text or an
//! error.

use async_trait::async_trait;
use concierge_domain::{DomainTag, Session};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Why a handler produced no answer
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HandlerError {
    #[error("handler failed: {0}")]
    Failed(String),

    #[error("handler timed out after {0:?}")]
    Timeout(Duration),

    #[error("handler returned an empty answer")]
    EmptyResponse,

    #[error("no handler registered for domain '{0}'")]
    NotRegistered(DomainTag),
}

/// Answers questions for a single domain
#[async_trait]
pub trait DomainHandler: Send + Sync {
    /// The domain this handler serves
    fn domain(&self) -> DomainTag;

    /// Answer `query` in the context of `session`
    async fn answer(&self, query: &str, session: &Session) -> Result<String, HandlerError>;
}

/// Handlers keyed by the domain they serve
#[derive(Clone, Default)]
pub struct HandlerRegistry {
    handlers: HashMap<DomainTag, Arc<dyn DomainHandler>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler under its own [`DomainHandler::domain`], replacing any previous one.
    pub fn register(&mut self, handler: Arc<dyn DomainHandler>) {
        self.handlers.insert(handler.domain(), handler);
    }

    pub fn with_handler(mut self, handler: Arc<dyn DomainHandler>) -> Self {
        self.register(handler);
        self
    }

    pub fn get(&self, domain: DomainTag) -> Option<Arc<dyn DomainHandler>> {
        self.handlers.get(&domain).cloned()
    }

    /// Registered domains in canonical order
    pub fn domains(&self) -> Vec<DomainTag> {
        DomainTag::ALL
            .into_iter()
            .filter(|d| self.handlers.contains_key(d))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl std::fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("domains", &self.domains())
            .finish()
    }
}
