//! Named asset cache abstractions

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One static asset held in a named cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedAsset {
    pub body: Vec<u8>,
    pub content_type: Option<String>,
    pub fetched_at: DateTime<Utc>,
}

/// A store of named caches, each mapping asset paths to cached assets.
///
/// Cache names are versioned by the offline layer; `cache_names` and
/// `delete_cache` exist so stale versions can be enumerated and purged.
#[async_trait]
pub trait AssetStore: Send + Sync {
    async fn get(&self, cache: &str, path: &str) -> Result<Option<CachedAsset>>;

    async fn put(&self, cache: &str, path: &str, asset: CachedAsset) -> Result<()>;

    async fn entry_count(&self, cache: &str) -> Result<usize>;

    async fn cache_names(&self) -> Result<Vec<String>>;

    /// Removes a whole named cache. Returns false when no such cache exists.
    async fn delete_cache(&self, cache: &str) -> Result<bool>;
}
