//! Prompt-driven domain handler
//!
//! One handler type serves every domain: what differs is the system prompt,
//! the model, and the data sources described to it.

use super::tools::ToolRegistry;
use async_trait::async_trait;
use concierge_application::ports::domain_handler::{DomainHandler, HandlerError};
use concierge_application::ports::llm_gateway::{GatewayError, LlmGateway, SessionOptions};
use concierge_domain::{DomainTag, Model, PromptTemplate, Session};
use std::sync::Arc;
use tracing::debug;

/// Handler sampling temperature: a little variety, mostly factual.
pub const HANDLER_TEMPERATURE: f32 = 0.2;

/// Answers one domain's questions with a single model call
pub struct PromptedHandler<G: LlmGateway + 'static> {
    domain: DomainTag,
    gateway: Arc<G>,
    model: Model,
    system_prompt: String,
    tools: ToolRegistry,
    history_window: usize,
}

impl<G: LlmGateway + 'static> PromptedHandler<G> {
    /// Handler for `domain` using the built-in prompt for `university`.
    pub fn new(domain: DomainTag, gateway: Arc<G>, model: Model, university: &str) -> Self {
        Self {
            domain,
            gateway,
            model,
            system_prompt: PromptTemplate::handler_system(domain, university),
            tools: ToolRegistry::new(),
            history_window: 10,
        }
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    pub fn with_tools(mut self, tools: ToolRegistry) -> Self {
        self.tools = tools;
        self
    }

    pub fn with_history_window(mut self, turns: usize) -> Self {
        self.history_window = turns;
        self
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }
}

#[async_trait]
impl<G: LlmGateway + 'static> DomainHandler for PromptedHandler<G> {
    fn domain(&self) -> DomainTag {
        self.domain
    }

    async fn answer(&self, query: &str, session: &Session) -> Result<String, HandlerError> {
        let prompt = PromptTemplate::handler_prompt(
            query,
            session.recent(self.history_window),
            &self.tools.descriptions(),
        );
        let options = SessionOptions::default()
            .with_system_prompt(self.system_prompt.as_str())
            .with_temperature(HANDLER_TEMPERATURE);

        debug!(domain = %self.domain, model = %self.model, "Handler asking model");

        let llm = self
            .gateway
            .create_session_with_options(&self.model, options)
            .await
            .map_err(to_handler_error)?;
        let text = llm.send(&prompt).await.map_err(to_handler_error)?;

        if text.trim().is_empty() {
            return Err(HandlerError::EmptyResponse);
        }
        Ok(text)
    }
}

fn to_handler_error(error: GatewayError) -> HandlerError {
    match error {
        GatewayError::EmptyResponse => HandlerError::EmptyResponse,
        other => HandlerError::Failed(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::tools::ToolDescriptor;
    use concierge_application::ports::llm_gateway::LlmSession;
    use concierge_domain::Turn;
    use std::sync::Mutex;

    /// Records what each session was created with and what it was sent.
    #[derive(Default)]
    struct RecordingGateway {
        reply: String,
        seen: Arc<Mutex<Vec<(SessionOptions, String)>>>,
    }

    struct RecordingSession {
        model: Model,
        options: SessionOptions,
        reply: String,
        seen: Arc<Mutex<Vec<(SessionOptions, String)>>>,
    }

    #[async_trait]
    impl LlmGateway for RecordingGateway {
        async fn create_session_with_options(
            &self,
            model: &Model,
            options: SessionOptions,
        ) -> Result<Box<dyn LlmSession>, GatewayError> {
            Ok(Box::new(RecordingSession {
                model: model.clone(),
                options,
                reply: self.reply.clone(),
                seen: Arc::clone(&self.seen),
            }))
        }
    }

    #[async_trait]
    impl LlmSession for RecordingSession {
        fn model(&self) -> &Model {
            &self.model
        }

        async fn send(&self, content: &str) -> Result<String, GatewayError> {
            self.seen
                .lock()
                .unwrap()
                .push((self.options.clone(), content.to_string()));
            if self.reply.is_empty() {
                Err(GatewayError::EmptyResponse)
            } else {
                Ok(self.reply.clone())
            }
        }
    }

    fn gateway(reply: &str) -> Arc<RecordingGateway> {
        Arc::new(RecordingGateway {
            reply: reply.to_string(),
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn test_answer_sends_prompt_history_and_tools() {
        let gateway = gateway("Perkins Library is on West Campus.");
        let seen = Arc::clone(&gateway.seen);
        let handler = PromptedHandler::new(
            DomainTag::Locations,
            gateway,
            Model::Gpt4oMini,
            "Duke University",
        )
        .with_tools(ToolRegistry::new().register(ToolDescriptor::new("campus_map", "Building locations")))
        .with_history_window(1);

        let mut session = Session::new("s1");
        session.append(Turn::user("old question"));
        session.append(Turn::assistant("latest answer"));

        let answer = handler.answer("Where is the library?", &session).await.unwrap();
        assert_eq!(answer, "Perkins Library is on West Campus.");

        let seen = seen.lock().unwrap();
        let (options, prompt) = &seen[0];
        assert_eq!(options.temperature, Some(HANDLER_TEMPERATURE));
        assert!(options.system_prompt.as_deref().unwrap().contains("Duke University"));
        assert!(prompt.contains("- campus_map: Building locations"));
        assert!(prompt.contains("latest answer"));
        assert!(!prompt.contains("old question"));
        assert!(prompt.ends_with("Question: Where is the library?"));
    }

    #[tokio::test]
    async fn test_system_prompt_override() {
        let gateway = gateway("ok");
        let seen = Arc::clone(&gateway.seen);
        let handler = PromptedHandler::new(DomainTag::Events, gateway, Model::Gpt4o, "Duke University")
            .with_system_prompt("You only know about basketball.");

        handler.answer("When is the game?", &Session::new("s")).await.unwrap();

        assert_eq!(
            seen.lock().unwrap()[0].0.system_prompt.as_deref(),
            Some("You only know about basketball.")
        );
    }

    #[tokio::test]
    async fn test_empty_model_reply_is_empty_response() {
        let handler = PromptedHandler::new(
            DomainTag::Curriculum,
            gateway(""),
            Model::Gpt4oMini,
            "Duke University",
        );
        let result = handler.answer("What is CS 201?", &Session::new("s")).await;
        assert_eq!(result, Err(HandlerError::EmptyResponse));
    }
}
