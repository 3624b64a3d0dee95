use crate::core::cache::{AssetStore, CachedAsset};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use fjall::{Keyspace, PartitionCreateOptions, PartitionHandle};
use std::collections::HashMap;
use std::path::Path;
use std::sync::RwLock;
use tracing::debug;

/// Partition recording which named caches exist, so enumeration works
/// across restarts without scanning the keyspace.
const CACHE_INDEX: &str = "cache_index";

/// Disk-backed asset store; each named cache is a fjall partition.
pub struct FjallStore {
    keyspace: Keyspace,
    partitions: RwLock<HashMap<String, PartitionHandle>>,
}

impl FjallStore {
    pub fn open(path: &Path) -> Result<Self> {
        std::fs::create_dir_all(path)
            .with_context(|| format!("Failed to create store directory: {}", path.display()))?;
        let keyspace = fjall::Config::new(path)
            .open()
            .with_context(|| format!("Failed to open asset store at {}", path.display()))?;

        Ok(FjallStore {
            keyspace,
            partitions: RwLock::new(HashMap::new()),
        })
    }

    fn partition(&self, name: &str) -> Result<PartitionHandle> {
        if let Some(partition) = self.partitions.read().unwrap().get(name) {
            return Ok(partition.clone());
        }
        let partition = self
            .keyspace
            .open_partition(name, PartitionCreateOptions::default())?;
        self.partitions
            .write()
            .unwrap()
            .insert(name.to_string(), partition.clone());
        Ok(partition)
    }

    fn index(&self) -> Result<PartitionHandle> {
        self.partition(CACHE_INDEX)
    }

    fn is_indexed(&self, cache: &str) -> Result<bool> {
        Ok(self.index()?.get(cache)?.is_some())
    }
}

#[async_trait]
impl AssetStore for FjallStore {
    async fn get(&self, cache: &str, path: &str) -> Result<Option<CachedAsset>> {
        if !self.is_indexed(cache)? {
            debug!("Cache MISS for {}:{} (no such cache)", cache, path);
            return Ok(None);
        }
        let partition = self.partition(cache)?;
        match partition.get(path)? {
            Some(raw) => {
                debug!("Cache HIT for {}:{}", cache, path);
                let asset = serde_json::from_slice(&raw)
                    .with_context(|| format!("Corrupt cache entry for {cache}:{path}"))?;
                Ok(Some(asset))
            }
            None => {
                debug!("Cache MISS for {}:{}", cache, path);
                Ok(None)
            }
        }
    }

    async fn put(&self, cache: &str, path: &str, asset: CachedAsset) -> Result<()> {
        let partition = self.partition(cache)?;
        partition.insert(path, serde_json::to_vec(&asset)?)?;
        self.index()?.insert(cache, Utc::now().to_rfc3339())?;
        debug!("Cache PUT for {}:{}", cache, path);
        Ok(())
    }

    async fn entry_count(&self, cache: &str) -> Result<usize> {
        if !self.is_indexed(cache)? {
            return Ok(0);
        }
        let partition = self.partition(cache)?;
        let mut count = 0;
        for item in partition.iter() {
            item?;
            count += 1;
        }
        Ok(count)
    }

    async fn cache_names(&self) -> Result<Vec<String>> {
        let index = self.index()?;
        let mut names = Vec::new();
        for item in index.iter() {
            let (key, _) = item?;
            names.push(String::from_utf8_lossy(&key).into_owned());
        }
        names.sort();
        Ok(names)
    }

    async fn delete_cache(&self, cache: &str) -> Result<bool> {
        if !self.is_indexed(cache)? {
            return Ok(false);
        }
        let partition = match self.partitions.write().unwrap().remove(cache) {
            Some(partition) => partition,
            None => self
                .keyspace
                .open_partition(cache, PartitionCreateOptions::default())?,
        };
        self.keyspace.delete_partition(partition)?;
        self.index()?.remove(cache)?;
        debug!("Cache DELETE for {}", cache);
        Ok(true)
    }
}
