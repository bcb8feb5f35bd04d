//! Console output formatter for answers

use crate::cli::commands::OutputFormat;
use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use concierge_application::QueryAnswer;
use concierge_domain::{ResponseSource, Role, Turn};

/// Formats answers for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Render `answer` in the requested format
    pub fn format(answer: &QueryAnswer, format: OutputFormat) -> String {
        match format {
            OutputFormat::Text => Self::format_text(answer),
            OutputFormat::Route => Self::format_route(answer),
            OutputFormat::Json => Self::format_json(answer),
        }
    }

    /// Answer text only
    pub fn format_text(answer: &QueryAnswer) -> String {
        answer.text.clone()
    }

    /// Answer text followed by a dimmed routing summary
    pub fn format_route(answer: &QueryAnswer) -> String {
        let mut output = answer.text.clone();

        let Some(route) = &answer.route else {
            return output;
        };

        let domains = route
            .outcomes
            .iter()
            .map(|o| {
                if o.is_success() {
                    format!("{} {}", "v".green(), o.domain)
                } else {
                    format!("{} {}", "x".red(), o.domain)
                }
            })
            .collect::<Vec<_>>()
            .join("  ");

        output.push_str("\n\n");
        output.push_str(&format!(
            "{} {}  {}\n",
            "Route:".dimmed(),
            domains,
            format!(
                "({}, {})",
                route.decision.source(),
                Self::source_label(route.response.source)
            )
            .dimmed()
        ));
        output
    }

    /// Pretty JSON
    pub fn format_json(answer: &QueryAnswer) -> String {
        serde_json::to_string_pretty(answer).unwrap_or_else(|_| "{}".to_string())
    }

    /// Render a session transcript
    pub fn format_history(session_id: &str, history: &[Turn]) -> String {
        let mut output = format!("{} {}\n", "Session:".cyan().bold(), session_id);
        if history.is_empty() {
            output.push_str(&format!("{}\n", "(no turns yet)".dimmed()));
            return output;
        }
        for turn in history {
            let label = match turn.role {
                Role::User => "you".yellow().bold(),
                Role::Assistant => "concierge".green().bold(),
            };
            output.push_str(&format!(
                "\n{} {}\n{}\n",
                label,
                turn.timestamp.format("%H:%M:%S").to_string().dimmed(),
                Self::indent(&turn.text, "  ")
            ));
        }
        output
    }

    fn source_label(source: ResponseSource) -> &'static str {
        match source {
            ResponseSource::PassThrough => "single answer",
            ResponseSource::Synthesized => "merged",
            ResponseSource::Concatenated => "joined",
            ResponseSource::Fallback => "no answer",
        }
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_text(&self, answer: &QueryAnswer) -> String {
        Self::format_text(answer)
    }

    fn format_route(&self, answer: &QueryAnswer) -> String {
        Self::format_route(answer)
    }

    fn format_json(&self, answer: &QueryAnswer) -> String {
        Self::format_json(answer)
    }
}
