//! Routing transcript port
//!
//! Every routed query leaves a trail: which domains were picked and how,
//! what each handler returned, and which combination path produced the
//! answer. [`ConversationLogger`] receives that trail as discrete events so
//! an adapter can persist it (the infrastructure crate writes JSONL).
//!
//! Diagnostics still go through `tracing`; this port is for the per-query
//! record that can be replayed or audited later.

use serde_json::Value;

/// The classifier's choice: session, query, domains and decision source.
pub const ROUTING_DECISION: &str = "routing_decision";
/// One per dispatched domain: domain, failed flag, answer length, error.
pub const HANDLER_OUTCOME: &str = "handler_outcome";
/// The merged answer and its response source.
pub const FINAL_RESPONSE: &str = "final_response";

/// One step of a routed query
#[derive(Debug, Clone)]
pub struct ConversationEvent {
    /// One of [`ROUTING_DECISION`], [`HANDLER_OUTCOME`], [`FINAL_RESPONSE`]
    pub event_type: &'static str,
    /// Step-specific fields; the adapter stamps the time
    pub payload: Value,
}

impl ConversationEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Sink for routing transcripts
///
/// Called inline on the request path, so `log` cannot fail and must not
/// block for long. An adapter that cannot write drops the event.
pub trait ConversationLogger: Send + Sync {
    fn log(&self, event: ConversationEvent);
}

/// Discards every event
pub struct NoConversationLogger;

impl ConversationLogger for NoConversationLogger {
    fn log(&self, _event: ConversationEvent) {}
}
