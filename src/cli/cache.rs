use super::ui;
use crate::core::cache::AssetStore;
use crate::core::config::AppConfig;
use crate::offline::OfflineCache;
use anyhow::Result;
use comfy_table::Cell;
use std::sync::Arc;

/// Lists cache versions held in the store.
pub async fn status(config: &AppConfig, store: Arc<dyn AssetStore>) -> Result<()> {
    let names = store.cache_names().await?;
    if names.is_empty() {
        println!("No offline caches.");
        return Ok(());
    }

    let active = config.offline.cache_name();
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Cache"),
        ui::header_cell("Assets"),
        ui::header_cell("Active"),
    ]);
    for name in &names {
        let count = store.entry_count(name).await?;
        let marker = if *name == active { "yes" } else { "" };
        table.add_row(vec![
            Cell::new(name),
            ui::amount_cell(&count.to_string()),
            Cell::new(marker),
        ]);
    }
    println!("{table}");
    Ok(())
}

/// Purges the active cache via the canonical control message.
pub async fn clear(config: &AppConfig, store: Arc<dyn AssetStore>) -> Result<()> {
    let cache = OfflineCache::new(store, &config.offline);
    let cleared = cache.handle_message(r#"{"type": "CLEAR_CACHE"}"#).await?;
    if cleared {
        println!(
            "Cleared offline cache {}.",
            ui::style_text(cache.cache_name(), ui::StyleType::TotalLabel)
        );
    } else {
        println!("Offline cache {} is already empty.", cache.cache_name());
    }
    Ok(())
}
