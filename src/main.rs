use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use remitq::core::log::init_logging;
use remitq::core::quote::Direction;
use std::path::PathBuf;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DirectionArg {
    /// Amount entered in INR, recipient receives USD
    InrToUsd,
    /// Amount entered in USD, converted and paid in INR
    UsdToInr,
}

impl From<DirectionArg> for Direction {
    fn from(arg: DirectionArg) -> Direction {
        match arg {
            DirectionArg::InrToUsd => Direction::InrToUsd,
            DirectionArg::UsdToInr => Direction::UsdToInr,
        }
    }
}

impl From<Commands> for remitq::AppCommand {
    fn from(cmd: Commands) -> remitq::AppCommand {
        match cmd {
            Commands::Quote { amounts, direction } => remitq::AppCommand::Quote {
                amounts,
                direction: direction.into(),
            },
            Commands::Receive { amount, direction } => remitq::AppCommand::Receive {
                amount,
                direction: direction.into(),
            },
            Commands::Schedule => remitq::AppCommand::Schedule,
            Commands::Sync => remitq::AppCommand::Sync,
            Commands::Fetch { path, output } => remitq::AppCommand::Fetch { path, output },
            Commands::Cache(CacheCommands::Status) => remitq::AppCommand::CacheStatus,
            Commands::Cache(CacheCommands::Clear) => remitq::AppCommand::CacheClear,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Quote fees and totals for one or more transfer amounts
    Quote {
        #[arg(required = true)]
        amounts: Vec<String>,
        #[arg(short, long, value_enum, default_value = "inr-to-usd")]
        direction: DirectionArg,
    },
    /// Quote the gross amount needed for a target received amount
    Receive {
        amount: String,
        #[arg(short, long, value_enum, default_value = "inr-to-usd")]
        direction: DirectionArg,
    },
    /// Display the active fee schedule
    Schedule,
    /// Mirror the transfer service's static assets for offline use
    Sync,
    /// Fetch an asset, falling back to the offline cache
    Fetch {
        path: String,
        /// Write the asset body to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Inspect or clear the offline cache
    #[command(subcommand)]
    Cache(CacheCommands),
}

#[derive(Subcommand)]
enum CacheCommands {
    /// List cache versions and their contents
    Status,
    /// Purge the active cache
    Clear,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => remitq::cli::setup::setup(),
        Some(cmd) => remitq::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
