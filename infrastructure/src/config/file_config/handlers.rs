//! Domain handler configuration from TOML (`[handlers.<domain>]` sections)

use super::issues::{ConfigIssue, ConfigIssueCode};
use super::models::FileModelsConfig;
use concierge_domain::{DomainTag, Model};
use serde::{Deserialize, Serialize};

/// A data source a handler may draw on, described to its model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileToolConfig {
    pub name: String,
    pub description: String,
}

/// Per-domain handler overrides
///
/// ```toml
/// [handlers.curriculum]
/// model = "gpt-4o"
/// system_prompt = "You answer questions about the course catalog."
/// tools = [{ name = "course_search", description = "Search the course catalog" }]
///
/// [handlers.events]
/// enabled = false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileHandlerConfig {
    /// Register a handler for this domain at all
    pub enabled: bool,
    /// Overrides `[models] handler`
    pub model: Option<String>,
    /// Replaces the built-in system prompt
    pub system_prompt: Option<String>,
    pub tools: Vec<FileToolConfig>,
}

impl Default for FileHandlerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            model: None,
            system_prompt: None,
            tools: Vec::new(),
        }
    }
}

impl FileHandlerConfig {
    pub fn parse_model(&self, domain: DomainTag) -> (Option<Model>, Vec<ConfigIssue>) {
        FileModelsConfig::parse_single_model(
            &format!("handlers.{}.model", domain.as_str()),
            self.model.as_ref(),
        )
    }
}

/// Report section names that match no domain.
pub fn validate_handler_sections<'a>(names: impl Iterator<Item = &'a String>) -> Vec<ConfigIssue> {
    names
        .filter(|name| name.parse::<DomainTag>().is_err())
        .map(|name| {
            ConfigIssue::warning(
                ConfigIssueCode::UnknownHandlerSection { name: name.clone() },
                format!("[handlers.{}] names no known domain and is ignored", name),
            )
        })
        .collect()
}
