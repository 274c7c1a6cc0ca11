use chrono::{DateTime, Utc};
use std::sync::Arc;

use super::{get_json, set_json, KeyValueStore};
use crate::error::Result;

pub const BIOMETRIC_ENABLED_KEY: &str = "aria_biometric_enabled";
pub const LAST_ACTIVITY_KEY: &str = "aria_last_activity";

/// Typed access to the small flags kept next to transcripts
#[derive(Clone)]
pub struct DeviceStorage {
    store: Arc<dyn KeyValueStore>,
}

impl DeviceStorage {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub async fn biometric_enabled(&self) -> Result<bool> {
        Ok(get_json::<bool>(self.store.as_ref(), BIOMETRIC_ENABLED_KEY)
            .await?
            .unwrap_or(false))
    }

    pub async fn set_biometric_enabled(&self, enabled: bool) -> Result<()> {
        set_json(self.store.as_ref(), BIOMETRIC_ENABLED_KEY, &enabled).await
    }

    pub async fn last_activity(&self) -> Result<Option<DateTime<Utc>>> {
        get_json(self.store.as_ref(), LAST_ACTIVITY_KEY).await
    }

    pub async fn record_activity(&self, at: DateTime<Utc>) -> Result<()> {
        set_json(self.store.as_ref(), LAST_ACTIVITY_KEY, &at).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryKeyValueStore;

    #[tokio::test]
    async fn test_flags_default_and_update() {
        let storage = DeviceStorage::new(Arc::new(MemoryKeyValueStore::new()));

        assert!(!storage.biometric_enabled().await.unwrap());
        assert_eq!(storage.last_activity().await.unwrap(), None);

        let now = Utc::now();
        storage.set_biometric_enabled(true).await.unwrap();
        storage.record_activity(now).await.unwrap();

        assert!(storage.biometric_enabled().await.unwrap());
        assert_eq!(storage.last_activity().await.unwrap(), Some(now));
    }
}
