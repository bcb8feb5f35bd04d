//! Routing pipeline configuration from TOML (`[router]` section)

use super::issues::{ConfigIssue, ConfigIssueCode};
use concierge_domain::DomainTag;
use serde::{Deserialize, Serialize};

/// Routing pipeline configuration
///
/// # Example
///
/// ```toml
/// [router]
/// university = "Duke University"
/// default_domain = "general"
/// history_window = 10
/// classify_timeout_secs = 20
/// handler_timeout_secs = 30
/// synthesis_timeout_secs = 30
/// max_concurrency = 4
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRouterConfig {
    /// Institution named in every prompt
    pub university: String,
    /// Domain used when neither the model nor the keywords decide
    pub default_domain: String,
    /// Recent turns shown to the router model
    pub history_window: usize,
    pub classify_timeout_secs: u64,
    pub handler_timeout_secs: u64,
    pub synthesis_timeout_secs: u64,
    /// Maximum handlers in flight per query
    pub max_concurrency: usize,
    /// Override for the all-handlers-failed text
    pub fallback_message: Option<String>,
    /// Override for the blank-query text
    pub empty_query_message: Option<String>,
}

impl Default for FileRouterConfig {
    fn default() -> Self {
        Self {
            university: "Duke University".to_string(),
            default_domain: DomainTag::General.as_str().to_string(),
            history_window: 10,
            classify_timeout_secs: 20,
            handler_timeout_secs: 30,
            synthesis_timeout_secs: 30,
            max_concurrency: DomainTag::ALL.len(),
            fallback_message: None,
            empty_query_message: None,
        }
    }
}

impl FileRouterConfig {
    /// Parse `default_domain`, reporting unknown names.
    pub fn parse_default_domain(&self) -> (Option<DomainTag>, Vec<ConfigIssue>) {
        match self.default_domain.parse::<DomainTag>() {
            Ok(tag) => (Some(tag), Vec::new()),
            Err(_) => (
                None,
                vec![ConfigIssue::error(
                    ConfigIssueCode::UnknownDomain {
                        field: "router.default_domain".to_string(),
                        value: self.default_domain.clone(),
                    },
                    format!(
                        "router.default_domain: unknown domain '{}' (expected one of: {})",
                        self.default_domain,
                        DomainTag::ALL.map(|t| t.as_str()).join(", ")
                    ),
                )],
            ),
        }
    }

    /// Report zero timeouts and a zero concurrency limit.
    pub fn validate_limits(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        let checks = [
            ("router.classify_timeout_secs", self.classify_timeout_secs == 0),
            ("router.handler_timeout_secs", self.handler_timeout_secs == 0),
            ("router.synthesis_timeout_secs", self.synthesis_timeout_secs == 0),
            ("router.max_concurrency", self.max_concurrency == 0),
        ];
        for (field, is_zero) in checks {
            if is_zero {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::ZeroValue {
                        field: field.to_string(),
                    },
                    format!("{}: must be greater than zero", field),
                ));
            }
        }
        issues
    }
}
