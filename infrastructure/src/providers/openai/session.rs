//! OpenAI-compatible LLM session
//!
//! Each `send` is one stateless round trip: the session's system prompt (if
//! any) followed by the user message.

use super::types;
use async_trait::async_trait;
use concierge_application::ports::llm_gateway::{GatewayError, LlmSession, SessionOptions};
use concierge_domain::Model;
use reqwest::Client;
use tracing::{debug, trace, warn};

pub struct OpenAiSession {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
    model: Model,
    options: SessionOptions,
}

impl OpenAiSession {
    pub(super) fn new(
        client: Client,
        endpoint: String,
        api_key: Option<String>,
        model: Model,
        options: SessionOptions,
    ) -> Self {
        Self {
            client,
            endpoint,
            api_key,
            model,
            options,
        }
    }
}

#[async_trait]
impl LlmSession for OpenAiSession {
    fn model(&self) -> &Model {
        &self.model
    }

    async fn send(&self, content: &str) -> Result<String, GatewayError> {
        let payload = types::build_request(&self.model, &self.options, content);

        debug!(
            model = %payload.model,
            temperature = ?payload.temperature,
            content_len = content.len(),
            "Sending chat completion request"
        );
        if tracing::enabled!(tracing::Level::TRACE) {
            trace!(payload = ?payload, "Full chat completion request");
        }

        let mut request = self.client.post(&self.endpoint).json(&payload);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(|e| {
            warn!(endpoint = %self.endpoint, error = %e, "Chat completion transport error");
            types::convert_transport_error(&e)
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<failed to read error body>".to_string());
            let error = types::convert_http_error(status, &body, &self.model);
            warn!(%status, error = %error, "Chat completion returned HTTP error");
            return Err(error);
        }

        let parsed = response
            .json::<types::ChatCompletionResponse>()
            .await
            .map_err(|e| GatewayError::RequestFailed(format!("failed to parse response body: {e}")))?;

        debug!(choices = parsed.choices.len(), "Received chat completion");
        types::extract_text(parsed)
    }
}
