//! Presentation-level configuration
//!
//! Configuration for output formatting and REPL behavior, resolved by the
//! binary from the config file and CLI flags.

use crate::cli::commands::OutputFormat;
use std::path::PathBuf;

/// Output configuration for the presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Enable colored terminal output
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            color: true,
        }
    }
}

impl OutputConfig {
    /// Resolve the effective format: an explicit non-text CLI format wins,
    /// otherwise `show_route` upgrades plain text to the route view.
    pub fn resolve(cli_format: OutputFormat, show_route: bool, color: bool) -> Self {
        let format = match cli_format {
            OutputFormat::Text if show_route => OutputFormat::Route,
            other => other,
        };
        Self { format, color }
    }

    /// Apply the color setting to the terminal styling globally.
    pub fn apply_color(&self) {
        if !self.color {
            colored::control::set_override(false);
        }
    }
}

/// REPL configuration for the presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplConfig {
    /// Show progress indicators
    pub show_progress: bool,
    /// Path to history file; `None` uses the data directory default
    pub history_file: Option<PathBuf>,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            show_progress: true,
            history_file: None,
        }
    }
}

impl ReplConfig {
    /// The history file to use, if any location is available.
    pub fn resolved_history_file(&self) -> Option<PathBuf> {
        self.history_file.clone().or_else(|| {
            dirs::data_dir().map(|p| p.join("campus-concierge").join("history.txt"))
        })
    }
}
