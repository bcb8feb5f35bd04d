//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! Strings are kept raw here and parsed into domain types by the `parse_*`
//! helpers, which report problems as [`ConfigIssue`]s.

mod handlers;
mod issues;
mod models;
mod output;
mod providers;
mod repl;
mod router;
mod sessions;

pub use handlers::{FileHandlerConfig, FileToolConfig};
pub use issues::{ConfigIssue, ConfigIssueCode, Severity};
pub use models::FileModelsConfig;
pub use output::FileOutputConfig;
pub use providers::{FileOpenAiConfig, FileProvidersConfig};
pub use repl::FileReplConfig;
pub use router::FileRouterConfig;
pub use sessions::FileSessionsConfig;

use concierge_application::RouterParams;
use concierge_domain::{DomainTag, Model};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Role-based model selection
    pub models: FileModelsConfig,
    /// Classification, dispatch and combination settings
    pub router: FileRouterConfig,
    /// Session store bounds
    pub sessions: FileSessionsConfig,
    /// Provider settings
    pub providers: FileProvidersConfig,
    /// Per-domain handler overrides, keyed by domain name
    pub handlers: BTreeMap<String, FileHandlerConfig>,
    /// Output settings
    pub output: FileOutputConfig,
    /// REPL settings
    pub repl: FileReplConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// Checks:
    /// 1. Empty model names, including per-handler overrides
    /// 2. The default domain names a known domain
    /// 3. Timeouts, concurrency and session capacity are non-zero
    /// 4. `[handlers.<name>]` sections name known domains
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        issues.extend(self.models.parse_router().1);
        issues.extend(self.models.parse_synthesis().1);
        issues.extend(self.models.parse_handler().1);
        for tag in DomainTag::ALL {
            if let Some(handler) = self.handler(tag) {
                issues.extend(handler.parse_model(tag).1);
            }
        }

        issues.extend(self.router.parse_default_domain().1);
        issues.extend(self.router.validate_limits());
        issues.extend(self.sessions.validate());
        issues.extend(self.providers.openai.validate());

        issues.extend(handlers::validate_handler_sections(self.handlers.keys()));

        issues
    }

    /// Overrides for `domain`, matched case-insensitively.
    pub fn handler(&self, domain: DomainTag) -> Option<&FileHandlerConfig> {
        self.handlers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(domain.as_str()))
            .map(|(_, config)| config)
    }

    /// Model for `domain`'s handler: per-handler override, then `[models] handler`.
    pub fn handler_model(&self, domain: DomainTag) -> Model {
        self.handler(domain)
            .and_then(|h| h.parse_model(domain).0)
            .or_else(|| self.models.parse_handler().0)
            .unwrap_or_default()
    }

    /// Map onto the application's routing parameters.
    ///
    /// Invalid values fall back to defaults; `validate` reports them.
    pub fn to_router_params(&self) -> RouterParams {
        let defaults = RouterParams::default();
        let router = &self.router;

        let positive_secs = |secs: u64, fallback: Duration| {
            if secs == 0 {
                fallback
            } else {
                Duration::from_secs(secs)
            }
        };

        RouterParams {
            router_model: self.models.parse_router().0.unwrap_or(defaults.router_model),
            synthesis_model: self
                .models
                .parse_synthesis()
                .0
                .unwrap_or(defaults.synthesis_model),
            university: router.university.clone(),
            default_domain: router
                .parse_default_domain()
                .0
                .unwrap_or(defaults.default_domain),
            history_window: router.history_window,
            classify_timeout: positive_secs(router.classify_timeout_secs, defaults.classify_timeout),
            handler_timeout: positive_secs(router.handler_timeout_secs, defaults.handler_timeout),
            synthesis_timeout: positive_secs(
                router.synthesis_timeout_secs,
                defaults.synthesis_timeout,
            ),
            max_concurrency: router.max_concurrency.max(1),
            fallback_message: router
                .fallback_message
                .clone()
                .filter(|m| !m.trim().is_empty())
                .unwrap_or(defaults.fallback_message),
            empty_query_message: router
                .empty_query_message
                .clone()
                .filter(|m| !m.trim().is_empty())
                .unwrap_or(defaults.empty_query_message),
        }
    }
}
