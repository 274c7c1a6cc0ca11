use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::error::{PersistError, Result};
use crate::kv::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore};
use crate::session::{SessionConfig, SessionStore};

/// Assembles a [`SessionStore`] over either a directory or an explicit store
pub struct SessionStoreBuilder {
    config: SessionConfig,
    storage_dir: Option<PathBuf>,
    storage: Option<Arc<dyn KeyValueStore>>,
}

impl SessionStoreBuilder {
    pub fn new() -> Self {
        Self {
            config: SessionConfig::default(),
            storage_dir: None,
            storage: None,
        }
    }

    pub fn memory_window(mut self, turns: usize) -> Self {
        self.config.memory_window = turns;
        self
    }

    pub fn persisted_window(mut self, turns: usize) -> Self {
        self.config.persisted_window = turns;
        self
    }

    pub fn max_users(mut self, users: usize) -> Self {
        self.config.max_users = users;
        self
    }

    pub fn idle_ttl(mut self, ttl: Duration) -> Self {
        self.config.idle_ttl = ttl;
        self
    }

    /// Persist transcripts as files under `dir`
    pub fn storage_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.storage_dir = Some(dir.into());
        self
    }

    pub fn storage(mut self, storage: Arc<dyn KeyValueStore>) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Falls back to in-memory storage when neither a store nor a directory is set
    pub async fn build(self) -> Result<SessionStore> {
        if self.config.memory_window == 0 || self.config.persisted_window == 0 {
            return Err(PersistError::Configuration(
                "session windows must be at least one turn".to_string(),
            ));
        }
        if self.config.persisted_window < self.config.memory_window {
            return Err(PersistError::Configuration(format!(
                "persisted_window ({}) is smaller than memory_window ({})",
                self.config.persisted_window, self.config.memory_window
            )));
        }

        let storage: Arc<dyn KeyValueStore> = match (self.storage, self.storage_dir) {
            (Some(storage), _) => storage,
            (None, Some(dir)) => Arc::new(FileKeyValueStore::open(dir).await?),
            (None, None) => {
                tracing::warn!(
                    "No session storage configured, transcripts will not survive restarts"
                );
                Arc::new(MemoryKeyValueStore::new())
            }
        };

        Ok(SessionStore::with_config(storage, self.config))
    }
}

impl Default for SessionStoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aria_types::ConversationTurn;

    #[tokio::test]
    async fn test_rejects_inverted_windows() {
        let result = SessionStoreBuilder::new()
            .memory_window(100)
            .persisted_window(50)
            .build()
            .await;
        assert!(matches!(result, Err(PersistError::Configuration(_))));
    }

    #[tokio::test]
    async fn test_file_backed_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStoreBuilder::new()
            .storage_dir(dir.path())
            .memory_window(2)
            .persisted_window(3)
            .build()
            .await
            .unwrap();

        for i in 0..4 {
            store.append("u1", ConversationTurn::user(i.to_string())).await;
        }

        assert_eq!(store.history("u1").await.len(), 2);
        assert_eq!(store.persisted_history("u1").await.unwrap().len(), 3);
        assert!(dir.path().join("aria_conversation_u1.json").exists());
    }
}
