//! Main entry point for ShopDash.

use anyhow::{Context, Result};
use clap::Parser;
use shopdash::{App, Args};
use shopdash_common::init_logging;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let app = App::new(args).context("Failed to load configuration")?;
    // Flushes file logs on drop.
    let _guard = init_logging(&app.logging_config()?).context("Failed to initialize logging")?;

    info!(version = env!("CARGO_PKG_VERSION"), "Starting ShopDash");

    if let Err(e) = app.run().await {
        error!(error = %e, "ShopDash failed");
        eprintln!("{}", e.user_message());
        return Err(e.into());
    }

    Ok(())
}
