//! Per-chat navigation sessions
//!
//! In-memory only: a session is created on first contact, refreshed on
//! every event and evicted after an idle timeout. Nothing survives a
//! restart.
//!
//! Events of one chat are serialised with [`SessionStore::lock_chat`]; the
//! node is read at the start of an event and written at its end, so without
//! the guard a slow event could overwrite a newer one.

use crate::navigation::MenuNode;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Telegram chat identifier
pub type ChatId = i64;

#[derive(Debug, Clone)]
struct Session {
    node: MenuNode,
    last_seen: Instant,
}

/// Process-local map from chat to its current menu node
pub struct SessionStore {
    sessions: RwLock<HashMap<ChatId, Session>>,
    chat_locks: Mutex<HashMap<ChatId, Arc<Mutex<()>>>>,
    idle_timeout: Duration,
}

impl SessionStore {
    pub fn new(idle_timeout: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            chat_locks: Mutex::new(HashMap::new()),
            idle_timeout,
        }
    }

    /// Current node of a chat; `Root` for unknown or expired chats
    pub async fn node(&self, chat: ChatId) -> MenuNode {
        self.node_at(chat, Instant::now()).await
    }

    async fn node_at(&self, chat: ChatId, now: Instant) -> MenuNode {
        let sessions = self.sessions.read().await;
        sessions
            .get(&chat)
            .filter(|s| now.saturating_duration_since(s.last_seen) <= self.idle_timeout)
            .map(|s| s.node.clone())
            .unwrap_or_default()
    }

    /// Wait until no other event of `chat` is in flight; held for a whole event
    pub async fn lock_chat(&self, chat: ChatId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.chat_locks.lock().await;
            Arc::clone(locks.entry(chat).or_default())
        };
        lock.lock_owned().await
    }

    pub async fn set(&self, chat: ChatId, node: MenuNode) {
        let mut sessions = self.sessions.write().await;
        sessions.insert(
            chat,
            Session {
                node,
                last_seen: Instant::now(),
            },
        );
    }

    /// Drop sessions idle longer than the timeout; returns how many were dropped
    pub async fn evict_idle(&self) -> usize {
        self.evict_idle_at(Instant::now()).await
    }

    async fn evict_idle_at(&self, now: Instant) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| now.saturating_duration_since(s.last_seen) <= self.idle_timeout);

        // Locks of gone chats, unless an event still holds or awaits them
        let mut locks = self.chat_locks.lock().await;
        locks.retain(|chat, lock| sessions.contains_key(chat) || Arc::strong_count(lock) > 1);

        before - sessions.len()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Periodically evict idle sessions until cancelled
    pub fn spawn_sweeper(self: &Arc<Self>, cancel: CancellationToken) -> JoinHandle<()> {
        let store = Arc::clone(self);
        let period = (store.idle_timeout / 2).max(Duration::from_secs(1));

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            loop {
                tokio::select! {
                    () = cancel.cancelled() => break,
                    _ = ticker.tick() => {
                        let evicted = store.evict_idle().await;
                        if evicted > 0 {
                            let remaining = store.len().await;
                            tracing::debug!(evicted, remaining, "Evicted idle sessions");
                        }
                    }
                }
            }
            tracing::info!("Session sweeper stopped");
        })
    }
}
