//! Dispatch use case
//!
//! Fans a query out to the handler of every domain in a [`RoutingDecision`].
//!
//! Each call is independent and bounded by the handler timeout. An error, a
//! timeout, a panic, an empty answer, or a missing handler all become a failed
//! [`HandlerOutcome`]; the batch itself never fails. Outcomes come back in the
//! decision's domain order regardless of completion order.

use crate::ports::domain_handler::{HandlerError, HandlerRegistry};
use crate::ports::progress::{NoProgress, RoutingProgressNotifier};
use concierge_domain::{DomainTag, HandlerOutcome, RoutingDecision, Session};
use futures::{FutureExt, StreamExt, stream};
use std::panic::AssertUnwindSafe;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Use case for invoking domain handlers
pub struct Dispatcher {
    registry: HandlerRegistry,
    handler_timeout: Duration,
    max_concurrency: usize,
}

impl Dispatcher {
    pub fn new(registry: HandlerRegistry, handler_timeout: Duration, max_concurrency: usize) -> Self {
        Self {
            registry,
            handler_timeout,
            max_concurrency: max_concurrency.max(1),
        }
    }

    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    /// Dispatch with default (no-op) progress
    pub async fn dispatch(
        &self,
        decision: &RoutingDecision,
        query: &str,
        session: &Session,
    ) -> Vec<HandlerOutcome> {
        self.dispatch_with_progress(decision, query, session, &NoProgress)
            .await
    }

    /// Dispatch with progress callbacks.
    ///
    /// Returns exactly one outcome per requested domain, in requested order.
    pub async fn dispatch_with_progress(
        &self,
        decision: &RoutingDecision,
        query: &str,
        session: &Session,
        progress: &dyn RoutingProgressNotifier,
    ) -> Vec<HandlerOutcome> {
        info!(
            domains = %decision.domain_list(),
            concurrency = self.max_concurrency,
            "Dispatching to handlers"
        );

        // `buffered` polls up to N futures at once but yields in input order.
        let outcomes: Vec<HandlerOutcome> = stream::iter(decision.domains().iter().copied())
            .map(|domain| async move {
                let outcome = self.invoke(domain, query, session).await;
                progress.on_handler_complete(&outcome);
                outcome
            })
            .buffered(self.max_concurrency)
            .collect()
            .await;

        debug!(
            succeeded = outcomes.iter().filter(|o| o.is_success()).count(),
            failed = outcomes.iter().filter(|o| o.failed).count(),
            "Dispatch complete"
        );
        outcomes
    }

    async fn invoke(&self, domain: DomainTag, query: &str, session: &Session) -> HandlerOutcome {
        let Some(handler) = self.registry.get(domain) else {
            warn!(domain = %domain, "No handler registered");
            return HandlerOutcome::failure(domain, HandlerError::NotRegistered(domain).to_string());
        };

        let call = AssertUnwindSafe(handler.answer(query, session)).catch_unwind();
        let result = match tokio::time::timeout(self.handler_timeout, call).await {
            Ok(Ok(result)) => result,
            Ok(Err(_panic)) => Err(HandlerError::Failed("handler panicked".to_string())),
            Err(_) => Err(HandlerError::Timeout(self.handler_timeout)),
        };

        match result {
            Ok(text) if !text.trim().is_empty() => {
                info!(domain = %domain, chars = text.len(), "Handler answered");
                HandlerOutcome::success(domain, text)
            }
            Ok(_) => {
                warn!(domain = %domain, "Handler returned an empty answer");
                HandlerOutcome::failure(domain, HandlerError::EmptyResponse.to_string())
            }
            Err(e) => {
                warn!(domain = %domain, error = %e, "Handler failed");
                HandlerOutcome::failure(domain, e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::{PanickingHandler, StaticHandler};
    use concierge_domain::DecisionSource;
    use std::sync::Arc;
    use std::sync::Mutex;

    fn decision(domains: &[DomainTag]) -> RoutingDecision {
        RoutingDecision::new(domains.iter().copied(), DecisionSource::Classifier).unwrap()
    }

    fn dispatcher(registry: HandlerRegistry) -> Dispatcher {
        Dispatcher::new(registry, Duration::from_secs(5), 3)
    }

    #[tokio::test]
    async fn test_one_outcome_per_domain_in_order() {
        let registry = HandlerRegistry::new()
            .with_handler(StaticHandler::ok(DomainTag::Curriculum, "CS offers 201."))
            .with_handler(StaticHandler::ok(DomainTag::Locations, "LSRC is on Science Drive."));
        let decision = decision(&[DomainTag::Locations, DomainTag::Curriculum]);

        let outcomes = dispatcher(registry)
            .dispatch(&decision, "q", &Session::new("s"))
            .await;

        assert_eq!(outcomes.len(), decision.len());
        assert_eq!(outcomes[0].domain, DomainTag::Locations);
        assert_eq!(outcomes[1].domain, DomainTag::Curriculum);
        assert!(outcomes.iter().all(HandlerOutcome::is_success));
    }

    #[tokio::test]
    async fn test_failure_does_not_abort_batch() {
        let registry = HandlerRegistry::new()
            .with_handler(StaticHandler::err(
                DomainTag::Curriculum,
                HandlerError::Failed("catalog API down".to_string()),
            ))
            .with_handler(StaticHandler::ok(DomainTag::Events, "Concert at 8pm."));
        let decision = decision(&[DomainTag::Curriculum, DomainTag::Events]);

        let outcomes = dispatcher(registry)
            .dispatch(&decision, "q", &Session::new("s"))
            .await;

        assert_eq!(outcomes.len(), 2);
        assert!(outcomes[0].failed);
        assert!(outcomes[0].error_detail.as_deref().unwrap().contains("catalog API down"));
        assert_eq!(outcomes[1].success_text(), Some("Concert at 8pm."));
    }

    #[tokio::test]
    async fn test_missing_handler_yields_failed_outcome() {
        let registry = HandlerRegistry::new()
            .with_handler(StaticHandler::ok(DomainTag::Curriculum, "answer"));
        let decision = decision(&[DomainTag::Curriculum, DomainTag::General]);

        let outcomes = dispatcher(registry)
            .dispatch(&decision, "q", &Session::new("s"))
            .await;

        assert_eq!(outcomes.len(), 2);
        assert!(outcomes[1].failed);
        assert_eq!(outcomes[1].domain, DomainTag::General);
    }

    #[tokio::test]
    async fn test_empty_answer_is_failure() {
        let registry = HandlerRegistry::new()
            .with_handler(StaticHandler::ok(DomainTag::Events, "   \n"));
        let outcomes = dispatcher(registry)
            .dispatch(&decision(&[DomainTag::Events]), "q", &Session::new("s"))
            .await;

        assert!(outcomes[0].failed);
        assert_eq!(
            outcomes[0].error_detail.as_deref(),
            Some("handler returned an empty answer")
        );
    }

    #[tokio::test]
    async fn test_panicking_handler_is_failure() {
        let registry = HandlerRegistry::new()
            .with_handler(Arc::new(PanickingHandler(DomainTag::Locations)))
            .with_handler(StaticHandler::ok(DomainTag::Events, "Game on Saturday."));
        let outcomes = dispatcher(registry)
            .dispatch(
                &decision(&[DomainTag::Locations, DomainTag::Events]),
                "q",
                &Session::new("s"),
            )
            .await;

        assert!(outcomes[0].failed);
        assert!(outcomes[1].is_success());
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_is_failure() {
        let registry = HandlerRegistry::new()
            .with_handler(StaticHandler::slow(DomainTag::Events, "late", Duration::from_secs(120)))
            .with_handler(StaticHandler::ok(DomainTag::Locations, "on time"));
        let dispatcher = Dispatcher::new(registry, Duration::from_secs(2), 3);

        let outcomes = dispatcher
            .dispatch(
                &decision(&[DomainTag::Events, DomainTag::Locations]),
                "q",
                &Session::new("s"),
            )
            .await;

        assert!(outcomes[0].failed);
        assert!(outcomes[0].error_detail.as_deref().unwrap().contains("timed out"));
        assert_eq!(outcomes[1].success_text(), Some("on time"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_handlers_run_concurrently_but_report_in_order() {
        let registry = HandlerRegistry::new()
            .with_handler(StaticHandler::slow(DomainTag::Curriculum, "slow", Duration::from_secs(3)))
            .with_handler(StaticHandler::slow(DomainTag::Locations, "fast", Duration::from_secs(1)))
            .with_handler(StaticHandler::slow(DomainTag::Events, "medium", Duration::from_secs(2)));
        let dispatcher = Dispatcher::new(registry, Duration::from_secs(10), 3);
        let decision = decision(&[DomainTag::Curriculum, DomainTag::Locations, DomainTag::Events]);

        let start = tokio::time::Instant::now();
        let outcomes = dispatcher.dispatch(&decision, "q", &Session::new("s")).await;
        let elapsed = start.elapsed();

        // Sequential would take 6s.
        assert!(elapsed < Duration::from_secs(4), "took {elapsed:?}");
        let texts: Vec<_> = outcomes.iter().filter_map(|o| o.success_text()).collect();
        assert_eq!(texts, vec!["slow", "fast", "medium"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrency_limit_caps_parallel_handlers() {
        let registry = || {
            HandlerRegistry::new()
                .with_handler(StaticHandler::slow(DomainTag::Curriculum, "a", Duration::from_secs(3)))
                .with_handler(StaticHandler::slow(DomainTag::Locations, "b", Duration::from_secs(1)))
                .with_handler(StaticHandler::slow(DomainTag::Events, "c", Duration::from_secs(2)))
        };
        let decision = decision(&[DomainTag::Curriculum, DomainTag::Locations, DomainTag::Events]);

        // One at a time: the delays add up.
        let start = tokio::time::Instant::now();
        let outcomes = Dispatcher::new(registry(), Duration::from_secs(10), 1)
            .dispatch(&decision, "q", &Session::new("s"))
            .await;
        let elapsed = start.elapsed();

        assert!(elapsed >= Duration::from_secs(6), "took {elapsed:?}");
        assert!(elapsed < Duration::from_secs(7), "took {elapsed:?}");
        let texts: Vec<_> = outcomes.iter().filter_map(|o| o.success_text()).collect();
        assert_eq!(texts, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_progress_sees_every_outcome() {
        struct Recorder(Mutex<Vec<DomainTag>>);
        impl RoutingProgressNotifier for Recorder {
            fn on_decision(&self, _decision: &RoutingDecision) {}
            fn on_handler_complete(&self, outcome: &HandlerOutcome) {
                self.0.lock().unwrap().push(outcome.domain);
            }
            fn on_response(&self, _response: &concierge_domain::FinalResponse) {}
        }

        let registry = HandlerRegistry::new()
            .with_handler(StaticHandler::ok(DomainTag::Curriculum, "a"));
        let recorder = Recorder(Mutex::new(Vec::new()));
        dispatcher(registry)
            .dispatch_with_progress(
                &decision(&[DomainTag::Curriculum, DomainTag::Events]),
                "q",
                &Session::new("s"),
                &recorder,
            )
            .await;

        let mut seen = recorder.0.lock().unwrap().clone();
        seen.sort();
        assert_eq!(seen, vec![DomainTag::Curriculum, DomainTag::Events]);
    }
}
