//! Final response value object

use serde::{Deserialize, Serialize};

/// Which combination path produced a [`FinalResponse`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseSource {
    /// A single handler succeeded; its text is returned unchanged
    PassThrough,
    /// Several handlers succeeded and the synthesis model merged them
    Synthesized,
    /// Synthesis failed; successful texts were joined in order
    Concatenated,
    /// No handler succeeded
    Fallback,
}

impl ResponseSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseSource::PassThrough => "pass_through",
            ResponseSource::Synthesized => "synthesized",
            ResponseSource::Concatenated => "concatenated",
            ResponseSource::Fallback => "fallback",
        }
    }

    /// Whether the answer is degraded (some or all domain content missing or unmerged).
    pub fn is_degraded(&self) -> bool {
        matches!(self, ResponseSource::Concatenated | ResponseSource::Fallback)
    }
}

/// The answer handed back across the service boundary (Value Object)
///
/// Only `text` leaves the service; `source` exists for logging and tests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalResponse {
    pub text: String,
    pub source: ResponseSource,
}

impl FinalResponse {
    pub fn new(text: impl Into<String>, source: ResponseSource) -> Self {
        Self {
            text: text.into(),
            source,
        }
    }

    pub fn into_text(self) -> String {
        self.text
    }
}
