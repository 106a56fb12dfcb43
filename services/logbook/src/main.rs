use anyhow::Result;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use common::{FileStore, config::StorageConfig};
use logbook::cli::{Cli, run};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = StorageConfig::load("logbook")?;

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("Starting logbook");

    let store = FileStore::from_config(&config).await?;
    let media_dir = config.data_dir.join("media");

    if let Err(e) = run(cli.command, store, &media_dir).await {
        error!("Command failed: {}", e);
        eprintln!("{}", e.notification().message);
        std::process::exit(1);
    }

    Ok(())
}
