//! Role-based model configuration from TOML (`[models]` section)

use super::issues::{ConfigIssue, ConfigIssueCode};
use concierge_domain::Model;
use serde::{Deserialize, Serialize};

/// Role-based model configuration from TOML
///
/// # Example
///
/// ```toml
/// [models]
/// router = "gpt-4o-mini"      # Classifies queries into domains
/// synthesis = "gpt-4o-mini"   # Merges multi-domain answers
/// handler = "gpt-4o"          # Default for every domain handler
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileModelsConfig {
    /// Model for query classification
    pub router: Option<String>,
    /// Model for answer synthesis
    pub synthesis: Option<String>,
    /// Default model for domain handlers
    pub handler: Option<String>,
}

impl FileModelsConfig {
    /// Parse a single model string, collecting issues for empty names.
    pub(super) fn parse_single_model(
        field: &str,
        value: Option<&String>,
    ) -> (Option<Model>, Vec<ConfigIssue>) {
        match value {
            None => (None, Vec::new()),
            Some(s) => match s.parse::<Model>() {
                Ok(model) => (Some(model), Vec::new()),
                Err(_) => (
                    None,
                    vec![ConfigIssue::error(
                        ConfigIssueCode::EmptyModelName {
                            field: field.to_string(),
                        },
                        format!("{}: model name cannot be empty", field),
                    )],
                ),
            },
        }
    }

    pub fn parse_router(&self) -> (Option<Model>, Vec<ConfigIssue>) {
        Self::parse_single_model("models.router", self.router.as_ref())
    }

    pub fn parse_synthesis(&self) -> (Option<Model>, Vec<ConfigIssue>) {
        Self::parse_single_model("models.synthesis", self.synthesis.as_ref())
    }

    pub fn parse_handler(&self) -> (Option<Model>, Vec<ConfigIssue>) {
        Self::parse_single_model("models.handler", self.handler.as_ref())
    }
}
