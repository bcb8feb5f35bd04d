//! Session store port
//!
//! Owns per-session conversation memory. Each session sits behind its own
//! async mutex: holding the [`SessionHandle`] lock serializes requests for
//! that id without blocking any other id.

use async_trait::async_trait;
use concierge_domain::{Session, Turn};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Shared, individually locked session
pub type SessionHandle = Arc<Mutex<Session>>;

/// Keyed store of conversation sessions
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Return the session for `session_id`, creating an empty one if unseen.
    ///
    /// Idempotent: repeated calls with the same id return the same handle
    /// until the session is evicted.
    fn get_or_create(&self, session_id: &str) -> SessionHandle;

    /// The live session for `session_id`, if any.
    ///
    /// Read-only: never creates a session and never counts as an access for
    /// eviction order or idle expiry.
    fn get(&self, session_id: &str) -> Option<SessionHandle>;

    /// Append a turn to `session_id`'s history.
    ///
    /// Acquires the session lock; callers already holding it should append
    /// through their guard instead.
    async fn append(&self, session_id: &str, turn: Turn) {
        let handle = self.get_or_create(session_id);
        handle.lock().await.append(turn);
    }

    /// Number of live sessions
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop sessions idle longer than the store's TTL; returns how many were removed.
    fn evict_expired(&self) -> usize;
}
