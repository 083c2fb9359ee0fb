// src/main.rs

use anyhow::Result;
use clap::Parser;
use dirscribe::cancellation::CancellationToken;
use dirscribe::cli::{Cli, Commands};
use dirscribe::config::{CheckImagesConfig, ConsolidateConfig, RetargetConfig, SnapshotConfig};
use dirscribe::errors::Error;
use dirscribe::images::{check_images, retarget, write_integrity_report, write_retarget_summary};
use dirscribe::processing::DiskReader;
use dirscribe::signal::setup_signal_handler;
use dirscribe::{run_consolidate, run_snapshot};
use std::io;
use tracing_subscriber::EnvFilter;

/// Runs the selected tool and returns the process exit code.
fn dispatch(command: Commands, token: &CancellationToken) -> dirscribe::errors::Result<i32> {
    match command {
        Commands::Consolidate(args) => {
            let config = ConsolidateConfig::try_from(args)?;
            log::debug!("Configuration built successfully: {:?}", config);
            let counts = run_consolidate(&config, token)?;
            if !config.dry_run {
                log::info!(
                    "Consolidation complete. Processed: {}, skipped: {}, total: {} files",
                    counts.processed,
                    counts.skipped,
                    counts.total()
                );
            }
            Ok(0)
        }
        Commands::Snapshot(args) => {
            let config = SnapshotConfig::try_from(args)?;
            log::debug!("Configuration built successfully: {:?}", config);
            let counts = run_snapshot(&config, token)?;
            if !config.dry_run {
                log::info!("Snapshot complete. Included {} files.", counts.total());
            }
            Ok(0)
        }
        Commands::Retarget(args) => {
            let config = RetargetConfig::try_from(args)?;
            log::debug!("Configuration built successfully: {:?}", config);
            let report = retarget(&config, &DiskReader, token)?;
            write_retarget_summary(&mut io::stdout().lock(), &report, config.dry_run)?;
            Ok(0)
        }
        Commands::CheckImages(args) => {
            let config = CheckImagesConfig::try_from(args)?;
            let report = check_images(&config, &DiskReader, token)?;
            write_integrity_report(&mut io::stdout().lock(), &report)?;
            Ok(if report.is_ok() { 0 } else { 1 })
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over -v.
    let default_directive = match cli.verbose {
        0 => "dirscribe=info",
        1 => "dirscribe=debug",
        _ => "dirscribe=trace",
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive)),
        )
        .init();

    log::info!("Starting dirscribe v{}...", env!("CARGO_PKG_VERSION"));
    log::debug!("Raw arguments: {:?}", std::env::args().collect::<Vec<_>>());

    // SECURITY: Panic Hook to prevent info leaks
    std::panic::set_hook(Box::new(|info| {
        let msg = match info.payload().downcast_ref::<&str>() {
            Some(s) => *s,
            None => match info.payload().downcast_ref::<String>() {
                Some(s) => s.as_str(),
                None => "Box<Any>",
            },
        };
        eprintln!(
            "Application Error: {}",
            msg.replace(env!("CARGO_MANIFEST_DIR"), "<redacted>")
                .replace(std::path::MAIN_SEPARATOR, "/")
        );
    }));

    let token = setup_signal_handler()?;

    match dispatch(cli.command, &token) {
        Ok(0) => Ok(()),
        Ok(code) => std::process::exit(code),
        Err(Error::Interrupted) => {
            eprintln!("\nOperation cancelled.");
            std::process::exit(130);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
