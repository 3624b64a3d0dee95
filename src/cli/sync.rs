use super::ui;
use crate::core::cache::AssetStore;
use crate::core::config::AppConfig;
use crate::offline::OfflineCache;
use crate::providers::HttpAssetFetcher;
use anyhow::Result;
use std::sync::Arc;

/// Downloads the precache asset list into the offline cache and retires
/// older cache versions.
pub async fn run(config: &AppConfig, store: Arc<dyn AssetStore>) -> Result<()> {
    if config.offline.precache.is_empty() {
        println!("No assets configured for offline use.");
        return Ok(());
    }

    let fetcher = HttpAssetFetcher::new(&config.offline.base_url);
    let cache = OfflineCache::new(store, &config.offline);

    let pb = ui::new_progress_bar(config.offline.precache.len() as u64, true);
    pb.set_message("Fetching assets...");

    let count = cache
        .install(&fetcher, &config.offline.precache, &|| pb.inc(1))
        .await;
    pb.finish_and_clear();
    let count = count?;

    let purged = cache.activate().await?;

    println!(
        "Cached {} assets in {}.",
        count,
        ui::style_text(cache.cache_name(), ui::StyleType::TotalValue)
    );
    if !purged.is_empty() {
        println!(
            "{}",
            ui::style_text(
                &format!("Purged stale caches: {}", purged.join(", ")),
                ui::StyleType::Subtle
            )
        );
    }
    Ok(())
}
