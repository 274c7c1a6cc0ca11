//! Per-user conversation transcripts.
//!
//! The in-memory side keeps at most `memory_window` turns per user inside an
//! LRU map bounded by `max_users`; entries idle for longer than `idle_ttl` are
//! dropped and re-hydrated from storage on next access. Every append is
//! mirrored to the [`KeyValueStore`] under `aria_conversation_<user_id>`,
//! trimmed to `persisted_window` turns.

use aria_types::ConversationTurn;
use lru::LruCache;
use std::collections::VecDeque;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

use crate::error::Result;
use crate::kv::{get_json, set_json, KeyValueStore};

pub const DEFAULT_MEMORY_WINDOW: usize = 50;
pub const DEFAULT_PERSISTED_WINDOW: usize = 100;
pub const DEFAULT_MAX_USERS: usize = 10_000;
pub const DEFAULT_IDLE_TTL: Duration = Duration::from_secs(60 * 60);

const FALLBACK_MAX_USERS: NonZeroUsize = match NonZeroUsize::new(DEFAULT_MAX_USERS) {
    Some(n) => n,
    None => unreachable!(),
};

pub fn conversation_key(user_id: &str) -> String {
    format!("aria_conversation_{}", user_id)
}

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub memory_window: usize,
    pub persisted_window: usize,
    pub max_users: usize,
    pub idle_ttl: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            memory_window: DEFAULT_MEMORY_WINDOW,
            persisted_window: DEFAULT_PERSISTED_WINDOW,
            max_users: DEFAULT_MAX_USERS,
            idle_ttl: DEFAULT_IDLE_TTL,
        }
    }
}

struct UserSession {
    turns: VecDeque<ConversationTurn>,
    last_access: Instant,
}

impl UserSession {
    fn new(turns: VecDeque<ConversationTurn>) -> Self {
        Self {
            turns,
            last_access: Instant::now(),
        }
    }

    fn is_idle(&self, ttl: Duration) -> bool {
        self.last_access.elapsed() >= ttl
    }
}

pub struct SessionStore {
    sessions: Mutex<LruCache<String, UserSession>>,
    storage: Arc<dyn KeyValueStore>,
    config: SessionConfig,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self::with_config(storage, SessionConfig::default())
    }

    pub fn with_config(storage: Arc<dyn KeyValueStore>, config: SessionConfig) -> Self {
        let capacity = NonZeroUsize::new(config.max_users).unwrap_or(FALLBACK_MAX_USERS);
        Self {
            sessions: Mutex::new(LruCache::new(capacity)),
            storage,
            config,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Append a turn, trim to the window, then mirror to storage.
    ///
    /// A failed storage write is logged and leaves the in-memory append intact.
    pub async fn append(&self, user_id: &str, turn: ConversationTurn) {
        let mut sessions = self.sessions.lock().await;
        self.ensure_loaded(&mut sessions, user_id).await;

        if let Some(session) = sessions.get_mut(user_id) {
            session.turns.push_back(turn.clone());
            while session.turns.len() > self.config.memory_window {
                session.turns.pop_front();
            }
            session.last_access = Instant::now();
        }

        // Still under the lock so concurrent appends persist in order
        if let Err(e) = self.persist_turn(user_id, turn).await {
            tracing::warn!(user_id, error = %e, "Failed to persist conversation turn");
        }
    }

    /// The last `n` turns in chronological order
    pub async fn get_recent(&self, user_id: &str, n: usize) -> Vec<ConversationTurn> {
        let mut sessions = self.sessions.lock().await;
        self.ensure_loaded(&mut sessions, user_id).await;

        match sessions.get_mut(user_id) {
            Some(session) => {
                session.last_access = Instant::now();
                let skip = session.turns.len().saturating_sub(n);
                session.turns.iter().skip(skip).cloned().collect()
            }
            None => Vec::new(),
        }
    }

    /// Full in-memory transcript
    pub async fn history(&self, user_id: &str) -> Vec<ConversationTurn> {
        self.get_recent(user_id, usize::MAX).await
    }

    /// Transcript as written to storage
    pub async fn persisted_history(&self, user_id: &str) -> Result<Vec<ConversationTurn>> {
        Ok(get_json(self.storage.as_ref(), &conversation_key(user_id))
            .await?
            .unwrap_or_default())
    }

    /// Drop the in-memory transcript and the storage key
    pub async fn clear(&self, user_id: &str) -> Result<()> {
        let mut sessions = self.sessions.lock().await;
        sessions.pop(user_id);
        self.storage.remove(&conversation_key(user_id)).await?;
        tracing::info!(user_id, "Cleared conversation history");
        Ok(())
    }

    /// Number of users currently held in memory
    pub async fn active_users(&self) -> usize {
        self.sessions.lock().await.len()
    }

    /// Remove every idle entry; returns how many were dropped
    pub async fn evict_idle(&self) -> usize {
        let mut sessions = self.sessions.lock().await;
        let idle: Vec<String> = sessions
            .iter()
            .filter(|(_, session)| session.is_idle(self.config.idle_ttl))
            .map(|(user_id, _)| user_id.clone())
            .collect();

        for user_id in &idle {
            sessions.pop(user_id);
        }
        if !idle.is_empty() {
            tracing::debug!(evicted = idle.len(), "Evicted idle conversation sessions");
        }
        idle.len()
    }

    async fn ensure_loaded(&self, sessions: &mut LruCache<String, UserSession>, user_id: &str) {
        let fresh = sessions
            .peek(user_id)
            .map(|session| !session.is_idle(self.config.idle_ttl))
            .unwrap_or(false);
        if fresh {
            return;
        }

        let turns = self.hydrate(user_id).await;
        sessions.put(user_id.to_string(), UserSession::new(turns));
    }

    async fn hydrate(&self, user_id: &str) -> VecDeque<ConversationTurn> {
        match self.persisted_history(user_id).await {
            Ok(turns) => {
                let skip = turns.len().saturating_sub(self.config.memory_window);
                if !turns.is_empty() {
                    tracing::debug!(
                        user_id,
                        turns = turns.len() - skip,
                        "Hydrated transcript from storage"
                    );
                }
                turns.into_iter().skip(skip).collect()
            }
            Err(e) => {
                tracing::warn!(user_id, error = %e, "Failed to load transcript, starting empty");
                VecDeque::new()
            }
        }
    }

    async fn persist_turn(&self, user_id: &str, turn: ConversationTurn) -> Result<()> {
        let key = conversation_key(user_id);
        let mut persisted: Vec<ConversationTurn> =
            get_json(self.storage.as_ref(), &key).await?.unwrap_or_default();
        persisted.push(turn);
        if persisted.len() > self.config.persisted_window {
            let excess = persisted.len() - self.config.persisted_window;
            persisted.drain(..excess);
        }
        set_json(self.storage.as_ref(), &key, &persisted).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryKeyValueStore;

    fn store_with(config: SessionConfig) -> (SessionStore, Arc<MemoryKeyValueStore>) {
        let kv = Arc::new(MemoryKeyValueStore::new());
        (SessionStore::with_config(kv.clone(), config), kv)
    }

    #[tokio::test]
    async fn test_append_then_get_recent_one() {
        let (store, _) = store_with(SessionConfig::default());
        store.append("u1", ConversationTurn::user("first")).await;
        let turn = ConversationTurn::assistant("second");
        store.append("u1", turn.clone()).await;

        assert_eq!(store.get_recent("u1", 1).await, vec![turn]);
    }

    #[tokio::test]
    async fn test_windows_are_bounded() {
        let (store, _) = store_with(SessionConfig::default());
        for i in 0..120 {
            store.append("u1", ConversationTurn::user(format!("msg {}", i))).await;
        }

        let memory = store.history("u1").await;
        assert_eq!(memory.len(), 50);
        assert_eq!(memory[0].content, "msg 70");

        let persisted = store.persisted_history("u1").await.unwrap();
        assert_eq!(persisted.len(), 100);
        assert_eq!(persisted[0].content, "msg 20");
        assert_eq!(persisted[99].content, "msg 119");
    }

    #[tokio::test]
    async fn test_clear_removes_memory_and_storage() {
        let (store, kv) = store_with(SessionConfig::default());
        store.append("u1", ConversationTurn::user("hello")).await;
        assert!(kv.get(&conversation_key("u1")).await.unwrap().is_some());

        store.clear("u1").await.unwrap();

        assert!(kv.get(&conversation_key("u1")).await.unwrap().is_none());
        assert!(store.history("u1").await.is_empty());
    }

    #[tokio::test]
    async fn test_hydrates_from_storage() {
        let kv = Arc::new(MemoryKeyValueStore::new());
        {
            let first = SessionStore::new(kv.clone());
            first.append("u1", ConversationTurn::user("remember me")).await;
        }

        let second = SessionStore::new(kv);
        let history = second.history("u1").await;
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].content, "remember me");
    }

    #[tokio::test]
    async fn test_lru_eviction_rehydrates() {
        let (store, _) = store_with(SessionConfig {
            max_users: 1,
            ..SessionConfig::default()
        });

        store.append("u1", ConversationTurn::user("a")).await;
        store.append("u2", ConversationTurn::user("b")).await;
        assert_eq!(store.active_users().await, 1);

        let history = store.history("u1").await;
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].content, "a");
    }

    #[tokio::test]
    async fn test_evict_idle() {
        let (store, _) = store_with(SessionConfig {
            idle_ttl: Duration::ZERO,
            ..SessionConfig::default()
        });
        store.append("u1", ConversationTurn::user("a")).await;

        assert_eq!(store.evict_idle().await, 1);
        assert_eq!(store.active_users().await, 0);
        assert_eq!(store.history("u1").await.len(), 1);
    }

    #[tokio::test]
    async fn test_users_are_isolated() {
        let (store, _) = store_with(SessionConfig::default());
        store.append("u1", ConversationTurn::user("mine")).await;
        assert!(store.history("u2").await.is_empty());
    }
}
