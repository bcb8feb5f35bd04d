//! Process query use case
//!
//! The single entry point callers use: `(session_id, query) -> answer text`.
//!
//! For one session id, requests are handled one at a time: the session lock
//! is held from the moment history is read until both new turns are
//! appended. Different session ids never wait on each other.

use crate::config::RouterParams;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, FINAL_RESPONSE, HANDLER_OUTCOME, NoConversationLogger,
    ROUTING_DECISION,
};
use crate::ports::domain_handler::HandlerRegistry;
use crate::ports::llm_gateway::LlmGateway;
use crate::ports::progress::{NoProgress, RoutingProgressNotifier};
use crate::ports::session_store::SessionStore;
use crate::use_cases::route::{RouteOutput, Router};
use concierge_domain::util::log_preview;
use concierge_domain::{Session, Turn};
use serde::Serialize;
use std::sync::Arc;
use tracing::{Instrument, info, info_span};

/// Session id used when the caller supplies none.
pub const DEFAULT_SESSION_ID: &str = "default";

/// Answer text plus how it was produced
#[derive(Debug, Clone, Serialize)]
pub struct QueryAnswer {
    /// The session the turns were recorded under
    pub session_id: String,
    pub text: String,
    /// `None` when the query was blank and nothing was routed
    pub route: Option<RouteOutput>,
}

/// Use case answering one query within a session
pub struct QueryService<G: LlmGateway + 'static, S: SessionStore + 'static> {
    router: Router<G>,
    store: Arc<S>,
    conversation_logger: Arc<dyn ConversationLogger>,
    params: RouterParams,
}

impl<G: LlmGateway + 'static, S: SessionStore + 'static> QueryService<G, S> {
    pub fn new(gateway: Arc<G>, registry: HandlerRegistry, store: Arc<S>, params: RouterParams) -> Self {
        Self {
            router: Router::new(gateway, registry, params.clone()),
            store,
            conversation_logger: Arc::new(NoConversationLogger),
            params,
        }
    }

    /// Set a conversation logger for structured JSONL event logging.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn params(&self) -> &RouterParams {
        &self.params
    }

    /// Answer `query` for `session_id`.
    pub async fn process(&self, session_id: &str, query: &str) -> String {
        self.process_with_progress(session_id, query, &NoProgress).await
    }

    /// Answer `query` for `session_id`, reporting progress along the way.
    pub async fn process_with_progress(
        &self,
        session_id: &str,
        query: &str,
        progress: &dyn RoutingProgressNotifier,
    ) -> String {
        self.answer(session_id, query, progress).await.text
    }

    /// Answer `query` and keep the routing details for display.
    ///
    /// Always returns non-empty text. A blank query gets a fixed prompt back,
    /// carries no route, and leaves history untouched.
    pub async fn answer(
        &self,
        session_id: &str,
        query: &str,
        progress: &dyn RoutingProgressNotifier,
    ) -> QueryAnswer {
        let session_id = normalize_session_id(session_id);

        if query.trim().is_empty() {
            info!(session = %session_id, "Blank query, returning prompt text");
            return QueryAnswer {
                session_id: session_id.to_string(),
                text: self.params.empty_query_message.clone(),
                route: None,
            };
        }

        let span = info_span!("query", session = %session_id);
        async {
            let handle = self.store.get_or_create(session_id);
            let mut session = handle.lock().await;
            info!(
                turns = session.history().len(),
                query = %log_preview(query, 120),
                "Processing query"
            );

            let output = self
                .router
                .handle_with_progress(&session, query, progress)
                .await;
            self.log_route(session_id, query, &output);

            let text = output.response.text.clone();
            session.append(Turn::user(query));
            session.append(Turn::assistant(text.clone()));

            QueryAnswer {
                session_id: session_id.to_string(),
                text,
                route: Some(output),
            }
        }
        .instrument(span)
        .await
    }

    /// A copy of `session_id`'s history, oldest first; empty for unknown ids.
    pub async fn history(&self, session_id: &str) -> Vec<Turn> {
        match self.store.get(normalize_session_id(session_id)) {
            Some(handle) => handle.lock().await.history().to_vec(),
            None => Vec::new(),
        }
    }

    /// Snapshot of the whole session. Unknown ids yield an empty session
    /// that is not stored.
    pub async fn session(&self, session_id: &str) -> Session {
        let session_id = normalize_session_id(session_id);
        match self.store.get(session_id) {
            Some(handle) => handle.lock().await.clone(),
            None => Session::new(session_id),
        }
    }

    fn log_route(&self, session_id: &str, query: &str, output: &RouteOutput) {
        self.conversation_logger.log(ConversationEvent::new(
            ROUTING_DECISION,
            serde_json::json!({
                "session": session_id,
                "query": query,
                "domains": output.decision.domains(),
                "source": output.decision.source().as_str(),
            }),
        ));

        for outcome in &output.outcomes {
            self.conversation_logger.log(ConversationEvent::new(
                HANDLER_OUTCOME,
                serde_json::json!({
                    "session": session_id,
                    "domain": outcome.domain,
                    "failed": outcome.failed,
                    "chars": outcome.text.as_ref().map(|t| t.len()),
                    "error": outcome.error_detail,
                }),
            ));
        }

        self.conversation_logger.log(ConversationEvent::new(
            FINAL_RESPONSE,
            serde_json::json!({
                "session": session_id,
                "source": output.response.source.as_str(),
                "text": output.response.text,
            }),
        ));
    }
}

fn normalize_session_id(session_id: &str) -> &str {
    let trimmed = session_id.trim();
    if trimmed.is_empty() {
        DEFAULT_SESSION_ID
    } else {
        trimmed
    }
}
