//! Domain handler adapters
//!
//! [`PromptedHandler`] implements the application's `DomainHandler` port on
//! top of any `LlmGateway`. [`build_handler_registry`] wires one per domain
//! from the file configuration.

mod prompted;
mod tools;

pub use prompted::{HANDLER_TEMPERATURE, PromptedHandler};
pub use tools::{ToolDescriptor, ToolRegistry};

use crate::config::FileConfig;
use concierge_application::ports::domain_handler::HandlerRegistry;
use concierge_application::ports::llm_gateway::LlmGateway;
use concierge_domain::DomainTag;
use std::sync::Arc;
use tracing::{debug, info};

/// Register a [`PromptedHandler`] for every enabled domain.
pub fn build_handler_registry<G: LlmGateway + 'static>(
    gateway: Arc<G>,
    config: &FileConfig,
) -> HandlerRegistry {
    let university = config.router.university.as_str();
    let mut registry = HandlerRegistry::new();

    for domain in DomainTag::ALL {
        let overrides = config.handler(domain);
        if overrides.is_some_and(|h| !h.enabled) {
            debug!(domain = %domain, "Handler disabled by configuration");
            continue;
        }

        let mut handler = PromptedHandler::new(
            domain,
            Arc::clone(&gateway),
            config.handler_model(domain),
            university,
        )
        .with_history_window(config.router.history_window);

        if let Some(overrides) = overrides {
            if let Some(prompt) = overrides.system_prompt.as_deref().filter(|p| !p.trim().is_empty()) {
                handler = handler.with_system_prompt(prompt);
            }
            handler = handler.with_tools(overrides.tools.iter().collect());
        }

        registry.register(Arc::new(handler));
    }

    info!(domains = ?registry.domains(), "Domain handlers registered");
    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::OpenAiGateway;
    use std::time::Duration;

    fn gateway() -> Arc<OpenAiGateway> {
        Arc::new(OpenAiGateway::new("http://localhost:1/v1", None, Duration::from_secs(1)).unwrap())
    }

    #[test]
    fn test_every_domain_registered_by_default() {
        let registry = build_handler_registry(gateway(), &FileConfig::default());
        assert_eq!(registry.domains(), DomainTag::ALL.to_vec());
    }

    #[test]
    fn test_disabled_handler_is_skipped() {
        let config: FileConfig = toml::from_str("[handlers.events]\nenabled = false\n").unwrap();
        let registry = build_handler_registry(gateway(), &config);

        assert!(registry.get(DomainTag::Events).is_none());
        assert_eq!(registry.len(), 3);
    }
}
