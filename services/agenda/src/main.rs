use anyhow::Result;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use agenda::cli::{Cli, run};
use common::{FileStore, config::StorageConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = StorageConfig::load("agenda")?;

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("Starting agenda");

    let store = FileStore::from_config(&config).await?;

    if let Err(e) = run(cli.command, store).await {
        error!("Command failed: {}", e);
        eprintln!("{}", e.notification().message);
        std::process::exit(1);
    }

    Ok(())
}
