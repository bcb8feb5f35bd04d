//! In-memory session store with LRU capacity and idle expiry.
//!
//! - `LinkedHashMap` keeps entries in access order: the front is the least
//!   recently used session
//! - A std `Mutex` guards the map; it is only held for synchronous lookups,
//!   never across an await
//! - Each session lives behind its own async mutex (the [`SessionHandle`])
//!
//! A session whose handle is held outside the store is in use and is never
//! evicted, neither for capacity nor for idleness. When every eviction
//! candidate is in use the store grows past capacity until one is released.

use crate::config::FileSessionsConfig;
use async_trait::async_trait;
use concierge_application::ports::session_store::{SessionHandle, SessionStore};
use concierge_domain::Session;
use linked_hash_map::LinkedHashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

/// Bounds for [`InMemorySessionStore`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionStoreSettings {
    /// Maximum live sessions; the least recently used is evicted beyond this.
    pub capacity: usize,
    /// Idle time after which a session expires; `None` disables expiry.
    pub ttl: Option<Duration>,
}

impl Default for SessionStoreSettings {
    fn default() -> Self {
        Self {
            capacity: 1024,
            ttl: Some(Duration::from_secs(3600)),
        }
    }
}

impl From<&FileSessionsConfig> for SessionStoreSettings {
    fn from(config: &FileSessionsConfig) -> Self {
        Self {
            capacity: config.capacity.max(1),
            ttl: config.ttl(),
        }
    }
}

struct SessionEntry {
    handle: SessionHandle,
    last_access: Instant,
}

impl SessionEntry {
    fn is_expired(&self, ttl: Option<Duration>, now: Instant) -> bool {
        ttl.is_some_and(|ttl| now.duration_since(self.last_access) > ttl)
    }

    /// A request (or any other caller) still holds the handle.
    fn is_in_use(&self) -> bool {
        Arc::strong_count(&self.handle) > 1
    }
}

pub struct InMemorySessionStore {
    entries: Mutex<LinkedHashMap<String, SessionEntry>>,
    settings: SessionStoreSettings,
}

impl InMemorySessionStore {
    pub fn new(settings: SessionStoreSettings) -> Self {
        Self {
            entries: Mutex::new(LinkedHashMap::new()),
            settings: SessionStoreSettings {
                capacity: settings.capacity.max(1),
                ..settings
            },
        }
    }

    pub fn settings(&self) -> SessionStoreSettings {
        self.settings
    }

    /// Whether `session_id` is live (does not refresh it).
    pub fn contains(&self, session_id: &str) -> bool {
        let entries = self.lock_entries();
        entries
            .get(session_id)
            .is_some_and(|e| e.is_in_use() || !e.is_expired(self.settings.ttl, Instant::now()))
    }

    /// Handle for `session_id` without creating or refreshing it.
    fn peek(&self, session_id: &str) -> Option<SessionHandle> {
        let entries = self.lock_entries();
        entries
            .get(session_id)
            .filter(|e| e.is_in_use() || !e.is_expired(self.settings.ttl, Instant::now()))
            .map(|e| Arc::clone(&e.handle))
    }

    /// Live session ids, least recently used first.
    pub fn session_ids(&self) -> Vec<String> {
        self.lock_entries().keys().cloned().collect()
    }

    fn lock_entries(&self) -> MutexGuard<'_, LinkedHashMap<String, SessionEntry>> {
        // Entries stay consistent even if a holder panicked: every mutation
        // is a single map call.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new(SessionStoreSettings::default())
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    fn get_or_create(&self, session_id: &str) -> SessionHandle {
        let now = Instant::now();
        let mut entries = self.lock_entries();

        // get_refresh moves the entry to the back (most recently used).
        if let Some(entry) = entries.get_refresh(session_id) {
            if entry.is_in_use() || !entry.is_expired(self.settings.ttl, now) {
                entry.last_access = now;
                return Arc::clone(&entry.handle);
            }
            debug!(session = %session_id, "Session expired, starting fresh");
            entries.remove(session_id);
        }

        let handle: SessionHandle = Arc::new(tokio::sync::Mutex::new(Session::new(session_id)));
        entries.insert(
            session_id.to_string(),
            SessionEntry {
                handle: Arc::clone(&handle),
                last_access: now,
            },
        );

        while entries.len() > self.settings.capacity {
            // The new entry is in use through `handle`, so it is never picked.
            let Some(victim) = entries
                .iter()
                .find(|(_, entry)| !entry.is_in_use())
                .map(|(id, _)| id.clone())
            else {
                debug!(
                    live = entries.len(),
                    capacity = self.settings.capacity,
                    "Every session is in use, exceeding capacity"
                );
                break;
            };
            entries.remove(&victim);
            debug!(session = %victim, "Evicted least recently used session");
        }

        handle
    }

    fn get(&self, session_id: &str) -> Option<SessionHandle> {
        self.peek(session_id)
    }

    fn len(&self) -> usize {
        self.lock_entries().len()
    }

    fn evict_expired(&self) -> usize {
        let Some(ttl) = self.settings.ttl else {
            return 0;
        };
        let now = Instant::now();
        let mut entries = self.lock_entries();

        // Access order puts every expired entry at the front; busy ones are skipped.
        let expired: Vec<String> = entries
            .iter()
            .take_while(|(_, entry)| entry.is_expired(Some(ttl), now))
            .filter(|(_, entry)| !entry.is_in_use())
            .map(|(id, _)| id.clone())
            .collect();
        for id in &expired {
            entries.remove(id);
        }
        let removed = expired.len();

        if removed > 0 {
            debug!(removed, remaining = entries.len(), "Evicted expired sessions");
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use concierge_domain::Turn;

    fn store(capacity: usize, ttl_secs: Option<u64>) -> InMemorySessionStore {
        InMemorySessionStore::new(SessionStoreSettings {
            capacity,
            ttl: ttl_secs.map(Duration::from_secs),
        })
    }

    #[tokio::test]
    async fn test_get_or_create_is_idempotent() {
        let store = store(4, None);
        let a = store.get_or_create("alice");
        let b = store.get_or_create("alice");

        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(store.len(), 1);
        assert_eq!(a.lock().await.id(), "alice");
    }

    #[tokio::test]
    async fn test_append_through_store() {
        let store = store(4, None);
        store.append("alice", Turn::user("q1")).await;
        store.append("alice", Turn::assistant("r1")).await;

        let handle = store.get_or_create("alice");
        let session = handle.lock().await;
        let texts: Vec<_> = session.history().iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["q1", "r1"]);
    }

    #[tokio::test]
    async fn test_lru_eviction_at_capacity() {
        let store = store(2, None);
        store.get_or_create("a");
        store.get_or_create("b");
        // Touch "a" so "b" becomes least recently used.
        store.get_or_create("a");
        store.get_or_create("c");

        assert_eq!(store.len(), 2);
        assert!(store.contains("a"));
        assert!(!store.contains("b"));
        assert!(store.contains("c"));
        assert_eq!(store.session_ids(), vec!["a".to_string(), "c".to_string()]);
    }

    #[tokio::test]
    async fn test_evicted_session_starts_fresh() {
        let store = store(1, None);
        store.append("a", Turn::user("hello")).await;
        store.get_or_create("b");

        let handle = store.get_or_create("a");
        assert!(handle.lock().await.history().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_idle_session_expires() {
        let store = store(8, Some(60));
        store.append("a", Turn::user("hello")).await;

        tokio::time::advance(Duration::from_secs(61)).await;

        assert!(!store.contains("a"));
        let handle = store.get_or_create("a");
        assert!(handle.lock().await.history().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_access_refreshes_ttl() {
        let store = store(8, Some(60));
        store.get_or_create("a");

        tokio::time::advance(Duration::from_secs(40)).await;
        store.get_or_create("a");
        tokio::time::advance(Duration::from_secs(40)).await;

        assert!(store.contains("a"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_evict_expired_removes_only_idle_sessions() {
        let store = store(8, Some(60));
        store.get_or_create("old-1");
        store.get_or_create("old-2");
        tokio::time::advance(Duration::from_secs(45)).await;
        store.get_or_create("recent");
        tokio::time::advance(Duration::from_secs(30)).await;

        assert_eq!(store.evict_expired(), 2);
        assert_eq!(store.session_ids(), vec!["recent".to_string()]);
    }

    #[tokio::test]
    async fn test_no_ttl_never_expires() {
        let store = store(8, None);
        store.get_or_create("a");
        assert_eq!(store.evict_expired(), 0);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_per_session_locks_are_independent() {
        let store = store(8, None);
        let a = store.get_or_create("a");
        let _held = a.lock().await;

        // Another id is reachable while "a" is locked.
        let b = store.get_or_create("b");
        assert!(b.try_lock().is_ok());
        // The same id is not.
        assert!(store.get_or_create("a").try_lock().is_err());
    }

    #[tokio::test]
    async fn test_session_in_use_survives_capacity_eviction() {
        let store = store(1, None);
        let first = store.get_or_create("a");
        let mut held = first.lock().await;

        // "b" would evict "a", but a request is still holding it.
        store.get_or_create("b");
        assert!(store.contains("a"));
        assert_eq!(store.len(), 2);

        // A second request for "a" must wait on the same lock.
        let second = store.get_or_create("a");
        assert!(Arc::ptr_eq(&first, &second));
        assert!(second.try_lock().is_err());
        drop(second);

        held.append(Turn::user("q1"));
        drop(held);
        drop(first);

        // Once released, the store shrinks back on the next insert.
        store.get_or_create("c");
        assert_eq!(store.len(), 1);
        assert!(store.contains("c"));
    }

    #[tokio::test]
    async fn test_busy_session_is_skipped_for_next_candidate() {
        let store = store(2, None);
        let busy = store.get_or_create("a");
        store.get_or_create("b");
        store.get_or_create("c");

        assert!(store.contains("a"));
        assert!(!store.contains("b"));
        assert!(store.contains("c"));
        drop(busy);
    }

    #[tokio::test(start_paused = true)]
    async fn test_evict_expired_skips_sessions_in_use() {
        let store = store(8, Some(60));
        let busy = store.get_or_create("busy");
        store.get_or_create("idle");
        tokio::time::advance(Duration::from_secs(61)).await;

        assert_eq!(store.evict_expired(), 1);
        assert_eq!(store.session_ids(), vec!["busy".to_string()]);

        // Still the same session, not a fresh one.
        busy.lock().await.append(Turn::user("q1"));
        let again = store.get_or_create("busy");
        assert!(Arc::ptr_eq(&busy, &again));
        assert_eq!(again.lock().await.history().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_get_does_not_create_or_refresh() {
        let store = store(2, Some(60));
        assert!(store.get("ghost").is_none());
        assert_eq!(store.len(), 0);

        store.get_or_create("a");
        store.get_or_create("b");
        // Reading "a" must not move it to the back of the LRU order.
        assert!(store.get("a").is_some());
        store.get_or_create("c");
        assert!(!store.contains("a"));

        tokio::time::advance(Duration::from_secs(61)).await;
        assert!(store.get("b").is_none());
    }

    #[test]
    fn test_settings_from_config() {
        let config = FileSessionsConfig {
            capacity: 0,
            ttl_secs: 0,
        };
        let settings = SessionStoreSettings::from(&config);
        assert_eq!(settings.capacity, 1);
        assert_eq!(settings.ttl, None);
    }
}
