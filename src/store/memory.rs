use crate::core::cache::{AssetStore, CachedAsset};
use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// In-memory asset store backing unit tests.
pub struct MemoryStore {
    caches: Arc<Mutex<HashMap<String, HashMap<String, CachedAsset>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore {
            caches: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AssetStore for MemoryStore {
    async fn get(&self, cache: &str, path: &str) -> Result<Option<CachedAsset>> {
        let caches = self.caches.lock().await;
        let value = caches.get(cache).and_then(|entries| entries.get(path));
        if value.is_some() {
            debug!("Cache HIT for {}:{}", cache, path);
        } else {
            debug!("Cache MISS for {}:{}", cache, path);
        }
        Ok(value.cloned())
    }

    async fn put(&self, cache: &str, path: &str, asset: CachedAsset) -> Result<()> {
        let mut caches = self.caches.lock().await;
        debug!("Cache PUT for {}:{}", cache, path);
        caches
            .entry(cache.to_string())
            .or_default()
            .insert(path.to_string(), asset);
        Ok(())
    }

    async fn entry_count(&self, cache: &str) -> Result<usize> {
        let caches = self.caches.lock().await;
        Ok(caches.get(cache).map_or(0, HashMap::len))
    }

    async fn cache_names(&self) -> Result<Vec<String>> {
        let caches = self.caches.lock().await;
        let mut names: Vec<String> = caches.keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    async fn delete_cache(&self, cache: &str) -> Result<bool> {
        let mut caches = self.caches.lock().await;
        debug!("Cache DELETE for {}", cache);
        Ok(caches.remove(cache).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn asset(body: &[u8]) -> CachedAsset {
        CachedAsset {
            body: body.to_vec(),
            content_type: None,
            fetched_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_get_put_roundtrip() {
        let store = MemoryStore::new();

        assert!(store.get("v1", "index.html").await.unwrap().is_none());

        store.put("v1", "index.html", asset(b"home")).await.unwrap();

        let entry = store.get("v1", "index.html").await.unwrap().unwrap();
        assert_eq!(entry.body, b"home");
        assert!(store.get("v1", "other.html").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_caches_are_isolated_by_name() {
        let store = MemoryStore::new();
        store.put("v1", "index.html", asset(b"old")).await.unwrap();
        store.put("v2", "index.html", asset(b"new")).await.unwrap();

        assert_eq!(
            store.get("v1", "index.html").await.unwrap().unwrap().body,
            b"old"
        );
        assert_eq!(
            store.get("v2", "index.html").await.unwrap().unwrap().body,
            b"new"
        );
        assert_eq!(
            store.cache_names().await.unwrap(),
            vec!["v1".to_string(), "v2".to_string()]
        );
    }

    #[tokio::test]
    async fn test_delete_cache_removes_all_entries() {
        let store = MemoryStore::new();
        store.put("v1", "a", asset(b"a")).await.unwrap();
        store.put("v1", "b", asset(b"b")).await.unwrap();
        assert_eq!(store.entry_count("v1").await.unwrap(), 2);

        assert!(store.delete_cache("v1").await.unwrap());
        assert!(!store.delete_cache("v1").await.unwrap());
        assert_eq!(store.entry_count("v1").await.unwrap(), 0);
        assert!(store.get("v1", "a").await.unwrap().is_none());
    }
}
