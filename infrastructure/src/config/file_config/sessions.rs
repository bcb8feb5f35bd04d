//! Session store configuration from TOML (`[sessions]` section)

use super::issues::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Session store configuration
///
/// ```toml
/// [sessions]
/// capacity = 1024   # LRU bound on live sessions
/// ttl_secs = 3600   # idle expiry; 0 keeps sessions until evicted by capacity
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSessionsConfig {
    pub capacity: usize,
    pub ttl_secs: u64,
}

impl Default for FileSessionsConfig {
    fn default() -> Self {
        Self {
            capacity: 1024,
            ttl_secs: 3600,
        }
    }
}

impl FileSessionsConfig {
    /// Idle expiry, `None` when disabled.
    pub fn ttl(&self) -> Option<Duration> {
        (self.ttl_secs > 0).then(|| Duration::from_secs(self.ttl_secs))
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        if self.capacity == 0 {
            vec![ConfigIssue::error(
                ConfigIssueCode::ZeroValue {
                    field: "sessions.capacity".to_string(),
                },
                "sessions.capacity: must be greater than zero",
            )]
        } else {
            Vec::new()
        }
    }
}
