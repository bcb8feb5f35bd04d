//! Progress reporting while a query is routed

use colored::Colorize;
use concierge_application::RoutingProgressNotifier;
use concierge_domain::{FinalResponse, HandlerOutcome, RoutingDecision};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

/// Reports routing progress with a spinner that turns into a handler bar
pub struct ProgressReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn handler_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:20.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn replace(&self, pb: ProgressBar) {
        let mut slot = self.bar.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(old) = slot.take() {
            old.finish_and_clear();
        }
        *slot = Some(pb);
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl RoutingProgressNotifier for ProgressReporter {
    fn on_classify_start(&self) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_prefix("Routing");
        pb.set_message("Choosing domains...");
        pb.enable_steady_tick(Duration::from_millis(100));
        self.replace(pb);
    }

    fn on_decision(&self, decision: &RoutingDecision) {
        let pb = ProgressBar::new(decision.len() as u64);
        pb.set_style(Self::handler_style());
        pb.set_prefix("Asking");
        pb.set_message(decision.domain_list());
        pb.enable_steady_tick(Duration::from_millis(100));
        self.replace(pb);
    }

    fn on_handler_complete(&self, outcome: &HandlerOutcome) {
        let slot = self.bar.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(pb) = slot.as_ref() {
            let status = if outcome.is_success() {
                format!("{} {}", "v".green(), outcome.domain)
            } else {
                format!("{} {}", "x".red(), outcome.domain)
            };
            pb.set_message(status);
            pb.inc(1);
        }
    }

    fn on_combine_start(&self, successes: usize) {
        if successes > 1 {
            let slot = self.bar.lock().unwrap_or_else(PoisonError::into_inner);
            if let Some(pb) = slot.as_ref() {
                pb.set_prefix("Merging");
                pb.set_message(format!("{} answers", successes));
            }
        }
    }

    fn on_response(&self, _response: &FinalResponse) {
        if let Some(pb) = self
            .bar
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            pb.finish_and_clear();
        }
    }
}

/// Simple text-based progress (no fancy UI), written to stderr
pub struct SimpleProgress;

impl RoutingProgressNotifier for SimpleProgress {
    fn on_decision(&self, decision: &RoutingDecision) {
        eprintln!(
            "{} {} ({})",
            "->".cyan(),
            decision.domain_list().bold(),
            decision.source()
        );
    }

    fn on_handler_complete(&self, outcome: &HandlerOutcome) {
        if outcome.is_success() {
            eprintln!("  {} {}", "v".green(), outcome.domain);
        } else {
            eprintln!("  {} {} (failed)", "x".red(), outcome.domain);
        }
    }

    fn on_response(&self, _response: &FinalResponse) {}
}
