//! Configuration for the `exif-extract` command.
//!
//! Options come from command-line arguments, with environment variable
//! fallbacks using the `EXIF_` prefix:
//!
//! - `EXIF_OUTPUT_CAPACITY` - Maximum output size in bytes (default: 65536)

use std::path::PathBuf;

use clap::Parser;

use crate::exif::DEFAULT_OUTPUT_CAPACITY;

/// Smallest usable capacity: room for `{}`.
pub const MIN_OUTPUT_CAPACITY: usize = 2;

/// Print the EXIF metadata of a JPEG image as JSON.
#[derive(Parser, Debug, Clone)]
#[command(name = "exif-extract")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Path of the JPEG image to read.
    pub input: PathBuf,

    /// Maximum size of the JSON output in bytes.
    ///
    /// Extraction fails rather than truncating when the result is larger.
    #[arg(long, default_value_t = DEFAULT_OUTPUT_CAPACITY, env = "EXIF_OUTPUT_CAPACITY")]
    pub capacity: usize,

    /// Pretty-print the JSON output.
    #[arg(long, default_value_t = false)]
    pub pretty: bool,

    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl Config {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.capacity < MIN_OUTPUT_CAPACITY {
            return Err(format!(
                "capacity must be at least {} bytes",
                MIN_OUTPUT_CAPACITY
            ));
        }

        if self.input.as_os_str().is_empty() {
            return Err("input path is required".to_string());
        }

        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
