//! Session registry: lazy per-conversation history stores with explicit
//! lifecycle (remove, clear, idle eviction) instead of an ambient global map.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::{Mutex, RwLock};
use tracing::info;
use tutor_core::ConversationId;

use crate::history::HistoryStore;

/// A history store shared with the registry. The engine holds the inner lock
/// for the duration of one turn, which serializes same-conversation calls.
pub type SharedHistory = Arc<Mutex<HistoryStore>>;

struct SessionEntry {
    store: SharedHistory,
    last_access: DateTime<Utc>,
}

/// Mapping from conversation id to its history store, created lazily on first
/// access. Safe under concurrent first access from distinct conversations.
///
/// The registry is an owned handle: callers construct it, pass it around
/// (it is `Clone`, all clones share state), and drive eviction explicitly.
#[derive(Clone, Default)]
pub struct SessionRegistry {
    sessions: Arc<RwLock<HashMap<ConversationId, SessionEntry>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the history store for `id`, creating it on first reference.
    /// Updates the conversation's last-access time.
    pub async fn get_or_create(&self, id: &ConversationId) -> SharedHistory {
        let mut sessions = self.sessions.write().await;
        let entry = sessions.entry(id.clone()).or_insert_with(|| {
            info!(conversation = %id, "Creating history store for new conversation");
            SessionEntry {
                store: Arc::new(Mutex::new(HistoryStore::new())),
                last_access: Utc::now(),
            }
        });
        entry.last_access = Utc::now();
        entry.store.clone()
    }

    /// Tears down one conversation. Returns true if it existed.
    pub async fn remove(&self, id: &ConversationId) -> bool {
        self.sessions.write().await.remove(id).is_some()
    }

    /// Tears down every conversation.
    pub async fn clear(&self) {
        self.sessions.write().await.clear();
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Evicts conversations not accessed within `max_idle`. Returns the
    /// number evicted. Callers decide when (and whether) to run this.
    pub async fn evict_idle(&self, max_idle: Duration) -> usize {
        let cutoff = Utc::now() - max_idle;
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, entry| entry.last_access > cutoff);
        let evicted = before - sessions.len();
        if evicted > 0 {
            info!(evicted, remaining = sessions.len(), "Evicted idle conversations");
        }
        evicted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn same_id_resolves_to_same_store() {
        let registry = SessionRegistry::new();
        let id = ConversationId::from(7);
        let a = registry.get_or_create(&id).await;
        let b = registry.get_or_create(&id).await;
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(registry.len().await, 1);
    }

    #[tokio::test]
    async fn distinct_ids_get_independent_stores() {
        let registry = SessionRegistry::new();
        let a = registry.get_or_create(&ConversationId::from(1)).await;
        let b = registry.get_or_create(&ConversationId::from(2)).await;
        a.lock().await.push_user("only in a");
        assert!(b.lock().await.is_empty());
        assert_eq!(registry.len().await, 2);
    }

    #[tokio::test]
    async fn concurrent_first_access_creates_one_store() {
        let registry = SessionRegistry::new();
        let mut handles = Vec::new();
        for _ in 0..16 {
            let registry = registry.clone();
            handles.push(tokio::spawn(async move {
                registry.get_or_create(&ConversationId::from(42)).await
            }));
        }
        let mut stores = Vec::new();
        for handle in handles {
            stores.push(handle.await.unwrap());
        }
        assert_eq!(registry.len().await, 1);
        for store in &stores[1..] {
            assert!(Arc::ptr_eq(&stores[0], store));
        }
    }

    #[tokio::test]
    async fn remove_and_clear_tear_down_sessions() {
        let registry = SessionRegistry::new();
        let id = ConversationId::from("gone");
        registry.get_or_create(&id).await;
        assert!(registry.remove(&id).await);
        assert!(!registry.remove(&id).await);

        registry.get_or_create(&ConversationId::from(1)).await;
        registry.get_or_create(&ConversationId::from(2)).await;
        registry.clear().await;
        assert!(registry.is_empty().await);
    }

    #[tokio::test]
    async fn evict_idle_drops_stale_conversations() {
        let registry = SessionRegistry::new();
        registry.get_or_create(&ConversationId::from(1)).await;
        registry.get_or_create(&ConversationId::from(2)).await;

        // Nothing is older than an hour yet.
        assert_eq!(registry.evict_idle(Duration::hours(1)).await, 0);
        assert_eq!(registry.len().await, 2);

        // With zero allowed idle time everything created before now is stale.
        assert_eq!(registry.evict_idle(Duration::zero()).await, 2);
        assert!(registry.is_empty().await);
    }
}
