//! Route use case
//!
//! Composes [`Classifier`] → [`Dispatcher`] → [`Combiner`] for one query.

use crate::config::RouterParams;
use crate::ports::domain_handler::HandlerRegistry;
use crate::ports::llm_gateway::LlmGateway;
use crate::ports::progress::{NoProgress, RoutingProgressNotifier};
use crate::use_cases::classify::Classifier;
use crate::use_cases::combine::Combiner;
use crate::use_cases::dispatch::Dispatcher;
use concierge_domain::{FinalResponse, HandlerOutcome, RoutingDecision, Session};
use serde::Serialize;
use std::sync::Arc;

/// Everything one routing pass produced
#[derive(Debug, Clone, Serialize)]
pub struct RouteOutput {
    pub decision: RoutingDecision,
    pub outcomes: Vec<HandlerOutcome>,
    pub response: FinalResponse,
}

/// The routing pipeline
pub struct Router<G: LlmGateway + 'static> {
    classifier: Classifier<G>,
    dispatcher: Dispatcher,
    combiner: Combiner<G>,
}

impl<G: LlmGateway + 'static> Router<G> {
    pub fn new(gateway: Arc<G>, registry: HandlerRegistry, params: RouterParams) -> Self {
        Self {
            classifier: Classifier::new(Arc::clone(&gateway), params.clone()),
            dispatcher: Dispatcher::new(registry, params.handler_timeout, params.max_concurrency),
            combiner: Combiner::new(gateway, params),
        }
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Route `query` in the context of `session` and return the merged answer.
    pub async fn handle(&self, session: &Session, query: &str) -> FinalResponse {
        self.handle_with_progress(session, query, &NoProgress)
            .await
            .response
    }

    /// Route with progress callbacks, returning every intermediate result.
    pub async fn handle_with_progress(
        &self,
        session: &Session,
        query: &str,
        progress: &dyn RoutingProgressNotifier,
    ) -> RouteOutput {
        progress.on_classify_start();
        let decision = self.classifier.classify(query, session.history()).await;
        progress.on_decision(&decision);

        let outcomes = self
            .dispatcher
            .dispatch_with_progress(&decision, query, session, progress)
            .await;

        progress.on_combine_start(outcomes.iter().filter(|o| o.is_success()).count());
        let response = self.combiner.combine(query, &outcomes).await;
        progress.on_response(&response);

        RouteOutput {
            decision,
            outcomes,
            response,
        }
    }
}
