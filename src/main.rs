//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `food_import` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use food_import::initialization::init_logger_with;
use food_import::{run_import, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // .env may set GOOGLE_APPLICATION_CREDENTIALS; a missing file is fine
    let _ = dotenvy::dotenv();

    let config = Config::parse();

    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    match run_import(config).await {
        Ok(report) => {
            println!(
                "✅ Imported {} food item{} into '{}' ({} skipped, {} batch{}){}",
                report.imported,
                if report.imported == 1 { "" } else { "s" },
                report.collection,
                report.skipped,
                report.batches_committed,
                if report.batches_committed == 1 { "" } else { "es" },
                if report.db_path.is_none() { " - dry run, nothing written" } else { "" }
            );
            if let Some(db_path) = report.db_path {
                println!("Results saved in {}", db_path.display());
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("food_import error: {:#}", e);
            process::exit(1);
        }
    }
}
