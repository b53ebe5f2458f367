//! birthday-sync
//!
//! Reads birthdays from one or two WebDAV address books and writes a
//! reminder per contact and year into a WebDAV calendar.

use anyhow::Context;
use clap::Parser;
use infrastructure::{init_logging, log_filter_from_verbosity};
use presentation_cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    init_logging(log_filter_from_verbosity(cli.verbose)).context("failed to set up logging")?;

    presentation_cli::run(&cli).await?;
    Ok(())
}
