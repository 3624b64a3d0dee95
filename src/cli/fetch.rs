use super::ui;
use crate::core::cache::AssetStore;
use crate::core::config::AppConfig;
use crate::offline::{AssetSource, OfflineCache};
use crate::providers::HttpAssetFetcher;
use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;

/// Serves one asset network-first, falling back to the offline cache.
pub async fn run(
    path: &str,
    output: Option<&Path>,
    config: &AppConfig,
    store: Arc<dyn AssetStore>,
) -> Result<()> {
    let fetcher = HttpAssetFetcher::new(&config.offline.base_url);
    let cache = OfflineCache::new(store, &config.offline);

    let response = cache.fetch(&fetcher, path).await?;

    match response.source {
        AssetSource::Network => {}
        AssetSource::Cache => eprintln!(
            "{}",
            ui::style_text("Network unavailable, serving cached copy.", ui::StyleType::Subtle)
        ),
        AssetSource::OfflineFallback => eprintln!(
            "{}",
            ui::style_text(
                "Network unavailable and page not cached, serving offline page.",
                ui::StyleType::Subtle
            )
        ),
    }

    match output {
        Some(file) => {
            std::fs::write(file, &response.body)
                .with_context(|| format!("Failed to write asset to {}", file.display()))?;
            println!("Wrote {} bytes to {}", response.body.len(), file.display());
        }
        None => {
            print!("{}", String::from_utf8_lossy(&response.body));
        }
    }
    Ok(())
}
