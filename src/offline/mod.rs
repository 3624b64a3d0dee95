//! Offline mirror of the transfer service's static assets.
//!
//! Mirrors the asset lifecycle of an installable web app: a versioned named
//! cache is populated up front (`install`), older cache versions are purged
//! (`activate`), and individual asset reads go network-first with the cache
//! as fallback (`fetch`). A `CLEAR_CACHE` message purges the current cache.

use crate::core::asset::AssetFetcher;
use crate::core::cache::{AssetStore, CachedAsset};
use crate::core::config::OfflineConfig;
use anyhow::{Context, Result, bail};
use chrono::Utc;
use futures::future::join_all;
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

/// Control messages understood by the cache.
#[derive(Debug, PartialEq, Eq, Deserialize)]
#[serde(tag = "type")]
pub enum CacheMessage {
    #[serde(rename = "CLEAR_CACHE")]
    ClearCache,
}

/// Where a served asset came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetSource {
    Network,
    Cache,
    OfflineFallback,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssetResponse {
    pub body: Vec<u8>,
    pub content_type: Option<String>,
    pub status: u16,
    pub source: AssetSource,
}

pub struct OfflineCache {
    store: Arc<dyn AssetStore>,
    cache_name: String,
    offline_page: String,
}

impl OfflineCache {
    pub fn new(store: Arc<dyn AssetStore>, config: &OfflineConfig) -> Self {
        OfflineCache {
            store,
            cache_name: config.cache_name(),
            offline_page: config.offline_page.clone(),
        }
    }

    pub fn cache_name(&self) -> &str {
        &self.cache_name
    }

    /// Fetches every precache asset and stores them all, or stores nothing.
    ///
    /// Any failed or non-200 fetch aborts the install before the first
    /// write, so a partially mirrored site is never served. Returns the
    /// number of assets cached. `update_callback` is invoked once per
    /// completed fetch for progress reporting.
    pub async fn install(
        &self,
        fetcher: &(dyn AssetFetcher),
        precache: &[String],
        update_callback: &(dyn Fn()),
    ) -> Result<usize> {
        let fetches = precache.iter().map(|path| async move {
            let result = fetcher.fetch(path).await;
            update_callback();
            (path.clone(), result)
        });

        let mut assets = Vec::with_capacity(precache.len());
        for (path, result) in join_all(fetches).await {
            let fetched =
                result.with_context(|| format!("Precache fetch failed for {path}"))?;
            if fetched.status != 200 {
                bail!(
                    "Precache fetch for {} returned status {}",
                    path,
                    fetched.status
                );
            }
            assets.push((path, fetched));
        }

        let count = assets.len();
        for (path, fetched) in assets {
            self.store
                .put(
                    &self.cache_name,
                    &path,
                    CachedAsset {
                        body: fetched.body,
                        content_type: fetched.content_type,
                        fetched_at: Utc::now(),
                    },
                )
                .await
                .with_context(|| format!("Failed to cache {path}"))?;
        }

        debug!("Installed {} assets into {}", count, self.cache_name);
        Ok(count)
    }

    /// Deletes every cache version other than the current one.
    pub async fn activate(&self) -> Result<Vec<String>> {
        let mut purged = Vec::new();
        for name in self.store.cache_names().await? {
            if name != self.cache_name && self.store.delete_cache(&name).await? {
                debug!("Purged stale cache {}", name);
                purged.push(name);
            }
        }
        Ok(purged)
    }

    /// Serves one asset, network first.
    ///
    /// A 200 response is written back to the cache opportunistically; other
    /// statuses pass through uncached. When the network fails, the cached
    /// copy is served; failing that, navigations get the cached offline
    /// page and everything else propagates the failure.
    pub async fn fetch(
        &self,
        fetcher: &(dyn AssetFetcher),
        path: &str,
    ) -> Result<AssetResponse> {
        match fetcher.fetch(path).await {
            Ok(fetched) if fetched.status == 200 => {
                let writeback = self.store.put(
                    &self.cache_name,
                    path,
                    CachedAsset {
                        body: fetched.body.clone(),
                        content_type: fetched.content_type.clone(),
                        fetched_at: Utc::now(),
                    },
                );
                if let Err(e) = writeback.await {
                    debug!("Cache writeback failed for {}: {}", path, e);
                }
                Ok(AssetResponse {
                    body: fetched.body,
                    content_type: fetched.content_type,
                    status: 200,
                    source: AssetSource::Network,
                })
            }
            Ok(fetched) => Ok(AssetResponse {
                body: fetched.body,
                content_type: fetched.content_type,
                status: fetched.status,
                source: AssetSource::Network,
            }),
            Err(e) => {
                debug!("Network fetch failed for {}: {}", path, e);
                if let Some(cached) = self.store.get(&self.cache_name, path).await? {
                    return Ok(AssetResponse {
                        body: cached.body,
                        content_type: cached.content_type,
                        status: 200,
                        source: AssetSource::Cache,
                    });
                }
                if is_navigation(path) {
                    let page = self.store.get(&self.cache_name, &self.offline_page).await?;
                    if let Some(page) = page {
                        return Ok(AssetResponse {
                            body: page.body,
                            content_type: page.content_type,
                            status: 200,
                            source: AssetSource::OfflineFallback,
                        });
                    }
                }
                Err(e).with_context(|| {
                    format!("Network request failed and no cached copy exists for {path}")
                })
            }
        }
    }

    /// Handles a raw control message. Unknown shapes are rejected.
    pub async fn handle_message(&self, raw: &str) -> Result<bool> {
        let message: CacheMessage = serde_json::from_str(raw)
            .with_context(|| format!("Unrecognized cache message: {raw}"))?;
        match message {
            CacheMessage::ClearCache => self.clear().await,
        }
    }

    /// Purges the current cache. Returns false when it held nothing.
    pub async fn clear(&self) -> Result<bool> {
        let cleared = self.store.delete_cache(&self.cache_name).await?;
        if cleared {
            debug!("Cleared cache {}", self.cache_name);
        }
        Ok(cleared)
    }
}

/// Page-like paths fall back to the offline page when unreachable.
fn is_navigation(path: &str) -> bool {
    let file = path.rsplit('/').next().unwrap_or(path);
    file.is_empty() || !file.contains('.') || file.ends_with(".html")
}
