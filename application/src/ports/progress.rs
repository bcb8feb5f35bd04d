//! Progress notification port
//!
//! Defines the interface for reporting progress while a query is routed.

use concierge_domain::{FinalResponse, HandlerOutcome, RoutingDecision};

/// Callback for progress updates during routing
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (spinner, web UI, etc.)
pub trait RoutingProgressNotifier: Send + Sync {
    /// Called before the router model is asked
    fn on_classify_start(&self) {}

    /// Called once the domains are known
    fn on_decision(&self, decision: &RoutingDecision);

    /// Called as each handler finishes, in completion order
    fn on_handler_complete(&self, outcome: &HandlerOutcome);

    /// Called before merging `successes` answers
    fn on_combine_start(&self, _successes: usize) {}

    /// Called with the final answer
    fn on_response(&self, response: &FinalResponse);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl RoutingProgressNotifier for NoProgress {
    fn on_decision(&self, _decision: &RoutingDecision) {}
    fn on_handler_complete(&self, _outcome: &HandlerOutcome) {}
    fn on_response(&self, _response: &FinalResponse) {}
}
