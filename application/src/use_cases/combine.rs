//! Combine use case
//!
//! Merges handler outcomes into one [`FinalResponse`]:
//!
//! | Successful outcomes | Result |
//! |---------------------|--------|
//! | 0 | fixed fallback text |
//! | 1 | that text, unchanged |
//! | 2+ | synthesis model output, or the texts joined in order if synthesis fails |

use crate::config::RouterParams;
use crate::ports::llm_gateway::{GatewayError, LlmGateway, SessionOptions};
use concierge_domain::{FinalResponse, HandlerOutcome, PromptTemplate, ResponseSource};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Separator for the deterministic concatenation fallback.
pub const CONCATENATION_SEPARATOR: &str = "\n\n";

/// Why synthesis was abandoned. Never surfaced to callers.
#[derive(Error, Debug)]
pub enum CombinerServiceError {
    #[error("synthesis request failed: {0}")]
    Gateway(#[from] GatewayError),

    #[error("synthesis returned an empty answer")]
    EmptySynthesis,
}

/// Use case for merging handler outcomes
pub struct Combiner<G: LlmGateway + 'static> {
    gateway: Arc<G>,
    params: RouterParams,
}

impl<G: LlmGateway + 'static> Combiner<G> {
    pub fn new(gateway: Arc<G>, params: RouterParams) -> Self {
        Self { gateway, params }
    }

    /// Merge `outcomes` for `query`. Raw handler errors never appear in the result.
    pub async fn combine(&self, query: &str, outcomes: &[HandlerOutcome]) -> FinalResponse {
        let texts: Vec<&str> = outcomes
            .iter()
            .filter_map(HandlerOutcome::success_text)
            .collect();

        match texts.as_slice() {
            [] => {
                warn!(dispatched = outcomes.len(), "Every handler failed, returning fallback text");
                FinalResponse::new(self.params.fallback_message.clone(), ResponseSource::Fallback)
            }
            [single] => FinalResponse::new(*single, ResponseSource::PassThrough),
            many => match self.synthesize(query, many).await {
                Ok(text) => {
                    info!(parts = many.len(), "Synthesized multi-domain answer");
                    FinalResponse::new(text, ResponseSource::Synthesized)
                }
                Err(e) => {
                    warn!(error = %e, "Synthesis failed, concatenating answers");
                    FinalResponse::new(concatenate(many), ResponseSource::Concatenated)
                }
            },
        }
    }

    async fn synthesize(&self, query: &str, texts: &[&str]) -> Result<String, CombinerServiceError> {
        let prompt = PromptTemplate::synthesis_prompt(query, texts);

        let text = tokio::time::timeout(self.params.synthesis_timeout, async {
            let session = self
                .gateway
                .create_session_with_options(
                    &self.params.synthesis_model,
                    SessionOptions::default().with_system_prompt(PromptTemplate::synthesis_system()),
                )
                .await?;
            session.send(&prompt).await
        })
        .await
        .map_err(|_| GatewayError::Timeout)??;

        let text = text.trim();
        if text.is_empty() {
            return Err(CombinerServiceError::EmptySynthesis);
        }
        Ok(text.to_string())
    }
}

/// Successful texts joined in outcome order.
pub fn concatenate(texts: &[&str]) -> String {
    texts.join(CONCATENATION_SEPARATOR)
}
