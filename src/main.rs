//! EXIF Extract - print the EXIF metadata of a JPEG image as JSON.

use clap::Parser;
use std::process::ExitCode;
use tracing::{debug, error, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use exif_extract::{config::Config, extract, is_complete_jpeg};

fn main() -> ExitCode {
    let config = Config::parse();

    init_logging(config.verbose);

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    let data = match std::fs::read(&config.input) {
        Ok(data) => data,
        Err(e) => {
            error!("Failed to read {}: {}", config.input.display(), e);
            return ExitCode::FAILURE;
        }
    };
    debug!(path = %config.input.display(), bytes = data.len(), "Read input");

    let fields = match extract(&data) {
        Ok(fields) => fields,
        Err(e) => {
            error!("{}: {}", config.input.display(), e);
            return ExitCode::FAILURE;
        }
    };

    if !is_complete_jpeg(&data) {
        warn!("{}: JPEG stream has no trailing EOI marker", config.input.display());
    }

    // The capacity bound applies to the compact form, even when pretty-printing
    let compact = match fields.finalize(config.capacity) {
        Ok(json) => json,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    if config.pretty {
        match fields.to_json_pretty() {
            Ok(json) => println!("{}", json),
            Err(e) => {
                error!("{}", e);
                return ExitCode::FAILURE;
            }
        }
    } else {
        println!("{}", compact);
    }

    ExitCode::SUCCESS
}

/// Initialize the tracing/logging subsystem.
///
/// Logs go to stderr so stdout carries only the JSON result.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "exif_extract=debug"
    } else {
        "exif_extract=warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
