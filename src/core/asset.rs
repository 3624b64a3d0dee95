//! Asset fetching abstractions

use anyhow::Result;
use async_trait::async_trait;

/// A raw response for one static asset.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedAsset {
    pub status: u16,
    pub body: Vec<u8>,
    pub content_type: Option<String>,
}

#[async_trait]
pub trait AssetFetcher: Send + Sync {
    /// Fetches a single asset by its path relative to the service origin.
    async fn fetch(&self, path: &str) -> Result<FetchedAsset>;
}
