//! Hand-written port doubles shared by the use case tests.

use crate::ports::domain_handler::{DomainHandler, HandlerError};
use crate::ports::llm_gateway::{GatewayError, LlmGateway, LlmSession, SessionOptions};
use crate::ports::session_store::{SessionHandle, SessionStore};
use async_trait::async_trait;
use concierge_domain::{DomainTag, Model, Session};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Mutex as AsyncMutex;

type ReplyFn = dyn Fn(&SessionOptions, &str) -> Result<String, GatewayError> + Send + Sync;

/// Gateway whose sessions answer through a closure over `(options, prompt)`.
pub struct MockGateway {
    reply: Arc<ReplyFn>,
    delay: Duration,
    prompts: Arc<Mutex<Vec<String>>>,
    calls: Arc<AtomicUsize>,
}

impl MockGateway {
    pub fn replying(
        reply: impl Fn(&SessionOptions, &str) -> Result<String, GatewayError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            reply: Arc::new(reply),
            delay: Duration::ZERO,
            prompts: Arc::new(Mutex::new(Vec::new())),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Every request fails with a connection error.
    pub fn failing() -> Self {
        Self::replying(|_, _| Err(GatewayError::ConnectionError("connection refused".to_string())))
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// User prompts sent so far, in order.
    pub fn prompts(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.prompts)
    }

    pub fn call_count(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl LlmGateway for MockGateway {
    async fn create_session_with_options(
        &self,
        model: &Model,
        options: SessionOptions,
    ) -> Result<Box<dyn LlmSession>, GatewayError> {
        Ok(Box::new(MockSession {
            model: model.clone(),
            options,
            reply: Arc::clone(&self.reply),
            delay: self.delay,
            prompts: Arc::clone(&self.prompts),
            calls: Arc::clone(&self.calls),
        }))
    }
}

struct MockSession {
    model: Model,
    options: SessionOptions,
    reply: Arc<ReplyFn>,
    delay: Duration,
    prompts: Arc<Mutex<Vec<String>>>,
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl LlmSession for MockSession {
    fn model(&self) -> &Model {
        &self.model
    }

    async fn send(&self, content: &str) -> Result<String, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(content.to_string());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        (self.reply)(&self.options, content)
    }
}

/// Handler with a canned reply, optional delay, and a call counter.
pub struct StaticHandler {
    domain: DomainTag,
    reply: Result<String, HandlerError>,
    delay: Duration,
    calls: AtomicUsize,
}

impl StaticHandler {
    pub fn ok(domain: DomainTag, text: &str) -> Arc<Self> {
        Arc::new(Self::new(domain, Ok(text.to_string()), Duration::ZERO))
    }

    pub fn err(domain: DomainTag, error: HandlerError) -> Arc<Self> {
        Arc::new(Self::new(domain, Err(error), Duration::ZERO))
    }

    pub fn slow(domain: DomainTag, text: &str, delay: Duration) -> Arc<Self> {
        Arc::new(Self::new(domain, Ok(text.to_string()), delay))
    }

    fn new(domain: DomainTag, reply: Result<String, HandlerError>, delay: Duration) -> Self {
        Self {
            domain,
            reply,
            delay,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DomainHandler for StaticHandler {
    fn domain(&self) -> DomainTag {
        self.domain
    }

    async fn answer(&self, _query: &str, _session: &Session) -> Result<String, HandlerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.reply.clone()
    }
}

/// Handler that panics mid-answer.
pub struct PanickingHandler(pub DomainTag);

#[async_trait]
impl DomainHandler for PanickingHandler {
    fn domain(&self) -> DomainTag {
        self.0
    }

    async fn answer(&self, _query: &str, _session: &Session) -> Result<String, HandlerError> {
        panic!("handler exploded")
    }
}

/// Unbounded map store, enough for exercising the query service.
#[derive(Default)]
pub struct MapStore {
    sessions: Mutex<HashMap<String, SessionHandle>>,
}

#[async_trait]
impl SessionStore for MapStore {
    fn get_or_create(&self, session_id: &str) -> SessionHandle {
        let mut sessions = self.sessions.lock().unwrap();
        Arc::clone(
            sessions
                .entry(session_id.to_string())
                .or_insert_with(|| Arc::new(AsyncMutex::new(Session::new(session_id)))),
        )
    }

    fn get(&self, session_id: &str) -> Option<SessionHandle> {
        self.sessions.lock().unwrap().get(session_id).cloned()
    }

    fn len(&self) -> usize {
        self.sessions.lock().unwrap().len()
    }

    fn evict_expired(&self) -> usize {
        0
    }
}
