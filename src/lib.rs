pub mod cli;
pub mod core;
pub mod offline;
pub mod providers;
pub mod store;

use crate::core::cache::AssetStore;
use crate::core::config::AppConfig;
use crate::core::quote::Direction;
use crate::providers::FixedRateProvider;
use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

pub enum AppCommand {
    Quote {
        amounts: Vec<String>,
        direction: Direction,
    },
    Receive {
        amount: String,
        direction: Direction,
    },
    Schedule,
    Sync,
    Fetch {
        path: String,
        output: Option<PathBuf>,
    },
    CacheStatus,
    CacheClear,
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Transfer fee calculator starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let rates = FixedRateProvider::from_config(&config.transfer);

    match command {
        AppCommand::Quote { amounts, direction } => {
            cli::quote::run(&amounts, direction, &config, &rates).await
        }
        AppCommand::Receive { amount, direction } => {
            cli::receive::run(&amount, direction, &config, &rates).await
        }
        AppCommand::Schedule => cli::schedule::run(&config),
        AppCommand::Sync => cli::sync::run(&config, open_store(&config)?).await,
        AppCommand::Fetch { path, output } => {
            cli::fetch::run(&path, output.as_deref(), &config, open_store(&config)?).await
        }
        AppCommand::CacheStatus => cli::cache::status(&config, open_store(&config)?).await,
        AppCommand::CacheClear => cli::cache::clear(&config, open_store(&config)?).await,
    }
}

fn open_store(config: &AppConfig) -> Result<Arc<dyn AssetStore>> {
    let path = config.default_data_path()?.join("offline");
    Ok(Arc::new(store::FjallStore::open(&path)?))
}
