//! Conversation sessions and the in-memory session registry.
//!
//! Each session owns exactly one `Order`. A session sits behind its own
//! async mutex that is held for a whole turn (including the classifier
//! call), so messages within one session are handled strictly in sequence
//! while different sessions proceed independently.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use fm_protocol::Order;
use tokio::sync::{Mutex, RwLock};
use tokio::time;
use uuid::Uuid;

use crate::dispatcher::Dispatcher;

/// One conversation between a single user and the bot.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: Uuid,
    pub order: Order,
    pub created_at: DateTime<Utc>,
    pub last_active: DateTime<Utc>,
}

impl Session {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            order: Order::new(),
            created_at: now,
            last_active: now,
        }
    }

    /// Handle one inbound message. Blank messages produce no reply.
    pub async fn handle_message(&mut self, dispatcher: &Dispatcher, text: &str) -> Option<String> {
        if text.trim().is_empty() {
            return None;
        }
        self.last_active = Utc::now();

        let reply = dispatcher.respond(text, &mut self.order).await;
        tracing::debug!(
            session_id = %self.id,
            dishes = self.order.len(),
            "turn complete"
        );
        Some(reply)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle to a live session.
pub type SharedSession = Arc<Mutex<Session>>;

/// In-memory registry of live sessions keyed by id.
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, SharedSession>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new session with an empty order.
    pub async fn create(&self) -> SharedSession {
        let session = Session::new();
        let id = session.id;
        let shared = Arc::new(Mutex::new(session));
        self.sessions.write().await.insert(id, shared.clone());
        tracing::info!(session_id = %id, "session started");
        shared
    }

    pub async fn get(&self, id: Uuid) -> Option<SharedSession> {
        self.sessions.read().await.get(&id).cloned()
    }

    /// End a session, discarding its order. Returns false if it did not exist.
    pub async fn remove(&self, id: Uuid) -> bool {
        let removed = self.sessions.write().await.remove(&id).is_some();
        if removed {
            tracing::info!(session_id = %id, "session ended");
        }
        removed
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    /// Drop sessions whose last activity is older than `max_idle` relative to `now`.
    ///
    /// Sessions busy with a turn are skipped. Returns the number evicted.
    pub async fn evict_idle(&self, now: DateTime<Utc>, max_idle: Duration) -> usize {
        let max_idle = chrono::Duration::from_std(max_idle).unwrap_or(chrono::Duration::MAX);
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();

        sessions.retain(|id, session| match session.try_lock() {
            Ok(s) => {
                let keep = now.signed_duration_since(s.last_active) <= max_idle;
                if !keep {
                    tracing::info!(session_id = %id, "evicting idle session");
                }
                keep
            }
            Err(_) => true,
        });

        before - sessions.len()
    }
}

/// Periodically evict idle sessions.
///
/// This function runs forever until the task is cancelled. Intended
/// to be spawned as a background tokio task.
pub async fn run_eviction(store: SessionStore, interval: Duration, max_idle: Duration) {
    let mut ticker = time::interval(interval);
    // Skip the first tick (fires immediately).
    ticker.tick().await;

    loop {
        ticker.tick().await;
        let evicted = store.evict_idle(Utc::now(), max_idle).await;
        if evicted > 0 {
            let remaining = store.len().await;
            tracing::debug!(evicted, remaining, "idle sweep");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::ScriptedClassifier;
    use fm_protocol::{Classification, CompositeEntity};

    fn dispatcher_with(classifier: Arc<ScriptedClassifier>) -> Dispatcher {
        Dispatcher::new(classifier)
    }

    #[tokio::test]
    async fn blank_messages_get_no_reply() {
        let classifier = Arc::new(ScriptedClassifier::new());
        let dispatcher = dispatcher_with(classifier.clone());
        let mut session = Session::new();

        for text in ["", "   ", "\n\t"] {
            assert!(session.handle_message(&dispatcher, text).await.is_none());
        }
        assert_eq!(classifier.call_count(), 0);
    }

    #[tokio::test]
    async fn order_persists_across_turns() {
        let classifier = Arc::new(ScriptedClassifier::new());
        classifier.push(
            Classification::new("Order.En", 0.9)
                .with_entity(CompositeEntity::new().child("DishBase", "pancake")),
        );
        classifier.push(Classification::new("ShowOrder.En", 0.9));
        let dispatcher = dispatcher_with(classifier);
        let mut session = Session::new();

        session.handle_message(&dispatcher, "a pancake").await.unwrap();
        let reply = session.handle_message(&dispatcher, "my order?").await.unwrap();
        assert_eq!(reply, "Your order:\npancake ()\n");
        assert_eq!(session.order.len(), 1);
    }

    #[tokio::test]
    async fn sessions_have_independent_orders() {
        let classifier = Arc::new(ScriptedClassifier::always(
            Classification::new("Order.Ru", 0.95)
                .with_entity(CompositeEntity::new().child("DishBase", "блин")),
        ));
        let dispatcher = dispatcher_with(classifier);
        let store = SessionStore::new();
        let a = store.create().await;
        let b = store.create().await;

        a.lock().await.handle_message(&dispatcher, "блин").await;
        a.lock().await.handle_message(&dispatcher, "ещё блин").await;
        b.lock().await.handle_message(&dispatcher, "блин").await;

        assert_eq!(a.lock().await.order.len(), 2);
        assert_eq!(b.lock().await.order.len(), 1);
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn remove_session() {
        let store = SessionStore::new();
        let id = store.create().await.lock().await.id;

        assert!(store.get(id).await.is_some());
        assert!(store.remove(id).await);
        assert!(!store.remove(id).await);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn evicts_only_idle_sessions() {
        let store = SessionStore::new();
        let stale = store.create().await;
        let fresh = store.create().await;
        let now = Utc::now();
        stale.lock().await.last_active = now - chrono::Duration::minutes(45);
        fresh.lock().await.last_active = now - chrono::Duration::minutes(5);

        let evicted = store.evict_idle(now, Duration::from_secs(30 * 60)).await;
        assert_eq!(evicted, 1);
        let fresh_id = fresh.lock().await.id;
        assert!(store.get(fresh_id).await.is_some());
    }

    #[tokio::test]
    async fn busy_sessions_are_not_evicted() {
        let store = SessionStore::new();
        let session = store.create().await;
        let mut guard = session.lock().await;
        guard.last_active = Utc::now() - chrono::Duration::hours(2);

        let evicted = store.evict_idle(Utc::now(), Duration::from_secs(60)).await;
        assert_eq!(evicted, 0);
        drop(guard);
    }

    #[tokio::test(start_paused = true)]
    async fn eviction_task_sweeps_idle_sessions() {
        let store = SessionStore::new();
        let stale = store.create().await;
        let fresh = store.create().await;
        stale.lock().await.last_active = Utc::now() - chrono::Duration::hours(1);
        let fresh_id = fresh.lock().await.id;

        let sweeper = tokio::spawn(run_eviction(
            store.clone(),
            Duration::from_secs(60),
            Duration::from_secs(30 * 60),
        ));
        tokio::time::sleep(Duration::from_secs(61)).await;

        assert_eq!(store.len().await, 1);
        assert!(store.get(fresh_id).await.is_some());
        sweeper.abort();
    }
}
