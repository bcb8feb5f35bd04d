//! OpenAI-compatible [`LlmGateway`] adapter

use super::session::OpenAiSession;
use crate::config::FileOpenAiConfig;
use async_trait::async_trait;
use concierge_application::ports::llm_gateway::{
    GatewayError, LlmGateway, LlmSession, SessionOptions,
};
use concierge_domain::Model;
use reqwest::Client;
use std::time::Duration;
use tracing::{info, warn};

/// Gateway for any `/v1/chat/completions` endpoint.
///
/// Cheap to share: `reqwest::Client` is reference-counted internally, so
/// every session reuses one connection pool.
#[derive(Debug, Clone)]
pub struct OpenAiGateway {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl OpenAiGateway {
    /// Build a gateway for `base_url` (up to and including `/v1`).
    ///
    /// `api_key` is `None` for keyless local servers.
    pub fn new(
        base_url: &str,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, GatewayError> {
        let base_url = base_url.trim().trim_end_matches('/');
        if base_url.is_empty() {
            return Err(GatewayError::Configuration(
                "provider base_url is empty".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::Configuration(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: format!("{base_url}/chat/completions"),
            api_key,
        })
    }

    /// Build from the `[providers.openai]` section.
    pub fn from_config(config: &FileOpenAiConfig) -> Result<Self, GatewayError> {
        let api_key = config.resolve_api_key();
        if api_key.is_none() {
            warn!(
                env = %config.api_key_env,
                "No API key configured; requests are sent unauthenticated"
            );
        }
        let gateway = Self::new(&config.base_url, api_key, config.timeout())?;
        info!(endpoint = %gateway.endpoint, "Chat completion provider ready");
        Ok(gateway)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl LlmGateway for OpenAiGateway {
    async fn create_session_with_options(
        &self,
        model: &Model,
        options: SessionOptions,
    ) -> Result<Box<dyn LlmSession>, GatewayError> {
        Ok(Box::new(OpenAiSession::new(
            self.client.clone(),
            self.endpoint.clone(),
            self.api_key.clone(),
            model.clone(),
            options,
        )))
    }
}
