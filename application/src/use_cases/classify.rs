//! Classify use case
//!
//! Turns a query and the recent conversation into a [`RoutingDecision`].
//!
//! The chain is fixed:
//! 1. Ask the router model for a structured decision
//! 2. On service failure, timeout, or an unusable reply: keyword matching
//! 3. If no keyword matches: the configured default domain
//!
//! The result is never empty and no error escapes.

use crate::config::RouterParams;
use crate::ports::llm_gateway::{GatewayError, LlmGateway, SessionOptions};
use concierge_domain::util::log_preview;
use concierge_domain::{
    DecisionSource, DomainTag, ParseFailure, PromptTemplate, RoutingDecision, Turn,
    match_keywords, parse_decision, recent_turns,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Router temperature: routing should be as deterministic as the model allows.
const ROUTER_TEMPERATURE: f32 = 0.0;

/// Why the router model's answer could not be used. Never surfaced to callers.
#[derive(Error, Debug)]
pub enum ClassificationError {
    #[error("classification service error: {0}")]
    ServiceError(#[from] GatewayError),

    #[error("classification parse error: {0}")]
    ParseError(#[from] ParseFailure),
}

/// Use case for classifying a query into domains
pub struct Classifier<G: LlmGateway + 'static> {
    gateway: Arc<G>,
    params: RouterParams,
}

impl<G: LlmGateway + 'static> Classifier<G> {
    pub fn new(gateway: Arc<G>, params: RouterParams) -> Self {
        Self { gateway, params }
    }

    /// Classify `query`, falling back deterministically on any failure.
    pub async fn classify(&self, query: &str, history: &[Turn]) -> RoutingDecision {
        match self.ask_router(query, history).await {
            Ok(tags) => {
                if let Ok(decision) = RoutingDecision::new(tags, DecisionSource::Classifier) {
                    info!(domains = %decision.domain_list(), "Router model decided");
                    return decision;
                }
            }
            Err(e) => {
                warn!(error = %e, "Router model unusable, falling back to keywords");
            }
        }

        let decision = Self::fallback_decision(query, self.params.default_domain);
        info!(
            domains = %decision.domain_list(),
            source = %decision.source(),
            "Fallback routing"
        );
        decision
    }

    /// Keyword routing, or `default_domain` when no keyword matches.
    pub fn fallback_decision(query: &str, default_domain: DomainTag) -> RoutingDecision {
        RoutingDecision::new(match_keywords(query), DecisionSource::KeywordFallback)
            .unwrap_or_else(|_| RoutingDecision::single(default_domain, DecisionSource::DefaultFallback))
    }

    async fn ask_router(
        &self,
        query: &str,
        history: &[Turn],
    ) -> Result<Vec<DomainTag>, ClassificationError> {
        let window = recent_turns(history, self.params.history_window);
        let prompt = PromptTemplate::classification_prompt(query, window);
        let timeout = self.params.classify_timeout;

        let reply = tokio::time::timeout(timeout, async {
            let options = SessionOptions::default()
                .with_system_prompt(PromptTemplate::classification_system(&self.params.university))
                .with_temperature(ROUTER_TEMPERATURE);
            let session = self
                .gateway
                .create_session_with_options(&self.params.router_model, options)
                .await?;
            session.send(&prompt).await
        })
        .await
        .map_err(|_| GatewayError::Timeout)??;

        debug!(reply = %log_preview(&reply, 200), "Router model replied");
        Ok(parse_decision(&reply)?)
    }
}
