//! Output formatter trait

use concierge_application::QueryAnswer;

/// Trait for rendering answers
pub trait OutputFormatter {
    /// Answer text only
    fn format_text(&self, answer: &QueryAnswer) -> String;

    /// Answer text plus the domains that produced it
    fn format_route(&self, answer: &QueryAnswer) -> String;

    /// Machine-readable answer with routing details
    fn format_json(&self, answer: &QueryAnswer) -> String;
}
