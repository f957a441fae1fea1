use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use ripple_core::CoreError;

use crate::ObjectStore;

/// In-process store used by tests and local development.
#[derive(Clone, Default)]
pub struct MemoryObjectStore {
    objects: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.objects.read().await.is_empty()
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        Ok(self.objects.read().await.get(key).cloned())
    }

    async fn put(&self, key: &str, body: String) -> Result<(), CoreError> {
        self.objects.write().await.insert(key.to_string(), body);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_put_round_trip() {
        let store = MemoryObjectStore::new();
        assert!(store.get("queue/state.json").await.unwrap().is_none());

        store
            .put("queue/state.json", "{}".to_string())
            .await
            .unwrap();
        assert_eq!(
            store.get("queue/state.json").await.unwrap().as_deref(),
            Some("{}")
        );
    }
}
