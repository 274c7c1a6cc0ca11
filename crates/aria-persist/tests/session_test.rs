use aria_persist::{conversation_key, KeyValueStore, MemoryKeyValueStore, SessionStore};
use aria_types::{ConversationTurn, TurnRole};
use async_trait::async_trait;
use std::sync::Arc;

#[tokio::test]
async fn test_concurrent_appends_are_all_recorded() {
    let store = Arc::new(SessionStore::new(Arc::new(MemoryKeyValueStore::new())));

    let handles: Vec<_> = (0..20)
        .map(|i| {
            let store = Arc::clone(&store);
            tokio::spawn(async move {
                store.append("u1", ConversationTurn::user(format!("{}", i))).await;
            })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(store.history("u1").await.len(), 20);
    assert_eq!(store.persisted_history("u1").await.unwrap().len(), 20);
}

/// Storage whose writes always fail
struct ReadOnlyStore;

#[async_trait]
impl KeyValueStore for ReadOnlyStore {
    async fn get(&self, _key: &str) -> aria_persist::Result<Option<String>> {
        Ok(None)
    }

    async fn set(&self, _key: &str, _value: String) -> aria_persist::Result<()> {
        Err(aria_persist::PersistError::Internal("disk full".to_string()))
    }

    async fn remove(&self, _key: &str) -> aria_persist::Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn test_storage_failure_keeps_memory_append() {
    let store = SessionStore::new(Arc::new(ReadOnlyStore));

    store.append("u1", ConversationTurn::user("still here")).await;

    let history = store.history("u1").await;
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].role, TurnRole::User);
}

#[tokio::test]
async fn test_persisted_layout_is_json_array() {
    let kv = Arc::new(MemoryKeyValueStore::new());
    let store = SessionStore::new(kv.clone());
    store.append("u9", ConversationTurn::assistant("Nice work")).await;

    let raw = kv.get(&conversation_key("u9")).await.unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value[0]["role"], "assistant");
    assert_eq!(value[0]["content"], "Nice work");
}

#[tokio::test]
async fn test_file_backed_users_with_similar_ids_stay_isolated() {
    let dir = tempfile::tempdir().unwrap();
    let store = aria_persist::SessionStoreBuilder::new()
        .storage_dir(dir.path())
        .build()
        .await
        .unwrap();

    store.append("alice/1", ConversationTurn::user("alice secret")).await;

    assert!(store.history("alice_1").await.is_empty());
    store.clear("alice_1").await.unwrap();

    assert_eq!(store.persisted_history("alice/1").await.unwrap().len(), 1);
    assert_eq!(store.history("alice/1").await[0].content, "alice secret");
}
