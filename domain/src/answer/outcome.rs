//! Handler outcome value object

use crate::routing::tag::DomainTag;
use serde::{Deserialize, Serialize};

/// Result of asking one domain handler (Value Object)
///
/// Exactly one outcome exists per dispatched domain. A failed outcome never
/// carries text; a successful one always carries non-empty text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandlerOutcome {
    /// The domain that was asked
    pub domain: DomainTag,
    /// The handler's answer, present on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Whether the handler failed, timed out, or answered with nothing
    pub failed: bool,
    /// Why it failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_detail: Option<String>,
}

impl HandlerOutcome {
    /// A successful answer from `domain`.
    pub fn success(domain: DomainTag, text: impl Into<String>) -> Self {
        Self {
            domain,
            text: Some(text.into()),
            failed: false,
            error_detail: None,
        }
    }

    /// A failure for `domain` with a reason kept for logging only.
    pub fn failure(domain: DomainTag, error: impl Into<String>) -> Self {
        Self {
            domain,
            text: None,
            failed: true,
            error_detail: Some(error.into()),
        }
    }

    /// Returns `true` if the handler produced usable text.
    pub fn is_success(&self) -> bool {
        !self.failed && self.text.is_some()
    }

    /// The answer text of a successful outcome.
    pub fn success_text(&self) -> Option<&str> {
        if self.failed { None } else { self.text.as_deref() }
    }
}
