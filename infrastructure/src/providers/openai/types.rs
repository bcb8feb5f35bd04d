//! Wire types for `/v1/chat/completions` and conversions to port types
//!
//! Nothing here leaves the provider module.

use concierge_application::ports::llm_gateway::{GatewayError, SessionOptions};
use concierge_domain::Model;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

// ─── Request ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, PartialEq)]
pub(super) struct Message {
    pub role: &'static str,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub(super) struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

/// Build a single-turn request: optional system message, then the user message.
pub(super) fn build_request(
    model: &Model,
    options: &SessionOptions,
    content: &str,
) -> ChatCompletionRequest {
    let mut messages = Vec::with_capacity(2);
    if let Some(system) = options.system_prompt.as_deref().filter(|s| !s.is_empty()) {
        messages.push(Message {
            role: "system",
            content: system.to_string(),
        });
    }
    messages.push(Message {
        role: "user",
        content: content.to_string(),
    });

    ChatCompletionRequest {
        model: model.as_str().to_string(),
        messages,
        // Some models (gpt-5 family) reject an explicit temperature.
        temperature: options.temperature.filter(|_| model.supports_temperature()),
    }
}

// ─── Response ────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub(super) struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub(super) struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub(super) struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

/// First choice's content, trimmed. Missing or blank content is an error.
pub(super) fn extract_text(response: ChatCompletionResponse) -> Result<String, GatewayError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or(GatewayError::EmptyResponse)
}

// ─── Errors ──────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
    #[serde(default)]
    code: Option<serde_json::Value>,
}

const MAX_ERROR_BODY_CHARS: usize = 300;

/// Map a non-success HTTP status and body to a gateway error.
pub(super) fn convert_http_error(status: StatusCode, body: &str, model: &Model) -> GatewayError {
    let message = match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => {
            let code = envelope
                .error
                .code
                .map(|v| match v {
                    serde_json::Value::String(s) => format!(" [code={s}]"),
                    other => format!(" [code={other}]"),
                })
                .unwrap_or_default();
            format!("HTTP {status}{code}: {}", envelope.error.message)
        }
        Err(_) => format!(
            "HTTP {status}: {}",
            concierge_domain::util::truncate_str(body.trim(), MAX_ERROR_BODY_CHARS)
        ),
    };

    match status {
        StatusCode::NOT_FOUND => GatewayError::ModelNotAvailable(format!("{model}: {message}")),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => GatewayError::Configuration(message),
        _ => GatewayError::RequestFailed(message),
    }
}

/// Map a transport-level reqwest error.
pub(super) fn convert_transport_error(error: &reqwest::Error) -> GatewayError {
    if error.is_timeout() {
        GatewayError::Timeout
    } else if error.is_connect() {
        GatewayError::ConnectionError(error.to_string())
    } else {
        GatewayError::RequestFailed(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_request_with_system_and_temperature() {
        let options = SessionOptions::default()
            .with_system_prompt("You are a router.")
            .with_temperature(0.0);
        let request = build_request(&Model::Gpt4oMini, &options, "Where is Perkins?");

        assert_eq!(request.model, "gpt-4o-mini");
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].role, "system");
        assert_eq!(request.messages[1].content, "Where is Perkins?");
        assert_eq!(request.temperature, Some(0.0));

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["temperature"], 0.0);
    }

    #[test]
    fn test_build_request_drops_temperature_for_gpt5() {
        let options = SessionOptions::default().with_temperature(0.2);
        let request = build_request(&Model::Gpt5Mini, &options, "q");

        assert_eq!(request.temperature, None);
        assert_eq!(request.messages.len(), 1);
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("temperature").is_none());
    }

    #[test]
    fn test_extract_text_trims_first_choice() {
        let response: ChatCompletionResponse = serde_json::from_str(
            r#"{"choices": [{"message": {"role": "assistant", "content": "  ***events***\n"}}]}"#,
        )
        .unwrap();
        assert_eq!(extract_text(response).unwrap(), "***events***");
    }

    #[test]
    fn test_extract_text_rejects_blank_or_missing() {
        let blank: ChatCompletionResponse =
            serde_json::from_str(r#"{"choices": [{"message": {"content": "   "}}]}"#).unwrap();
        assert!(matches!(extract_text(blank), Err(GatewayError::EmptyResponse)));

        let none: ChatCompletionResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert!(matches!(extract_text(none), Err(GatewayError::EmptyResponse)));
    }

    #[test]
    fn test_http_error_envelope() {
        let body = r#"{"error": {"message": "Rate limit reached", "code": "rate_limit_exceeded"}}"#;
        let error = convert_http_error(StatusCode::TOO_MANY_REQUESTS, body, &Model::Gpt4o);
        match error {
            GatewayError::RequestFailed(message) => {
                assert!(message.contains("429"));
                assert!(message.contains("[code=rate_limit_exceeded]"));
                assert!(message.contains("Rate limit reached"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_http_error_status_mapping() {
        assert!(matches!(
            convert_http_error(StatusCode::NOT_FOUND, "no such model", &Model::Gpt4o),
            GatewayError::ModelNotAvailable(_)
        ));
        assert!(matches!(
            convert_http_error(StatusCode::UNAUTHORIZED, "", &Model::Gpt4o),
            GatewayError::Configuration(_)
        ));
    }
}
