mod export;
mod reconcile;
mod report;
mod source;
mod upload;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "sheetsync")]
#[command(about = "Turn the price sheet into Shopify products")]
struct Cli {
    /// Read price rows from a local CSV export instead of Google Sheets
    #[arg(long, global = true)]
    input: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Write the bulk-import CSV (parents then individuals)
    Export {
        /// Destination file; defaults to OUTPUT_CSV_PATH
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Create parent and individual products through the Admin API
    Sync {
        /// Only the first N models
        #[arg(long)]
        models: Option<usize>,

        /// Keep at most N rows per model
        #[arg(long)]
        max_variants: Option<usize>,

        /// Skip models with fewer than N rows
        #[arg(long, default_value_t = 1)]
        min_variants: usize,

        /// Print the plan without calling Shopify
        #[arg(long)]
        dry_run: bool,
    },
    /// Update prices of products that already exist in the shop
    Prices {
        /// Print what would be updated without calling Shopify
        #[arg(long)]
        dry_run: bool,
    },
    /// Merge current sheet prices into a previous export
    Reconcile {
        /// CSV written by an earlier `export`
        #[arg(long)]
        existing: PathBuf,

        /// Destination file; defaults to overwriting `--existing`
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Verify Shopify credentials and print the product count
    Check,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = sheetsync_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let input = cli.input.as_deref();
    match cli.command {
        Commands::Export { output } => export::run_export(&config, input, output.as_deref()).await,
        Commands::Sync {
            models,
            max_variants,
            min_variants,
            dry_run,
        } => {
            let selection = upload::ModelSelection {
                models,
                max_variants,
                min_variants,
            };
            upload::run_sync(&config, input, &selection, dry_run).await
        }
        Commands::Prices { dry_run } => upload::run_prices(&config, input, dry_run).await,
        Commands::Reconcile { existing, output } => {
            reconcile::run_reconcile(&config, input, &existing, output.as_deref()).await
        }
        Commands::Check => upload::run_check(&config).await,
    }
}
