//! Vending Engine CLI
//!
//! Command-line interface for running vending command scripts from CSV files.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- script.csv > inventory.csv
//! cargo run -- --capacity 8 --opening-balance 20 script.csv
//! cargo run -- --report transactions script.csv > ledger.csv
//! RUST_LOG=debug cargo run -- --report balance script.csv
//! ```
//!
//! The program reads commands from the input CSV file, applies them to a fresh
//! store and cash drawer, and writes the selected report to stdout. Diagnostics
//! go to stderr; the level defaults to `warn` and follows `RUST_LOG` when set.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (missing arguments, file not found, file not readable, etc.)

use std::process;
use tracing_subscriber::EnvFilter;
use vending_engine::{cli, pipeline};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = cli::parse_args();
    let config = args.to_config();

    let mut output = std::io::stdout();
    if let Err(e) = pipeline::run(&args.input_file, &config, args.report, &mut output) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
