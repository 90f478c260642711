//! Script processing pipeline
//!
//! Orchestrates a single run by coordinating between the `CommandReader` (CSV
//! input), the `VendingEngine` (business logic) and the `csv_format` report
//! writers (output).
//!
//! # Error Handling
//!
//! Fatal errors (file not found, unreadable header, write failures) end the run
//! and are returned. Malformed rows and rejected commands are logged with
//! `tracing::warn!` and processing continues with the next row.

use crate::cli::ReportKind;
use crate::config::EngineConfig;
use crate::core::VendingEngine;
use crate::io::csv_format::{write_balance_csv, write_inventory_csv, write_transactions_csv};
use crate::io::CommandReader;
use crate::types::VendingError;
use std::io::Write;
use std::path::Path;
use tracing::{info, warn};

/// Run a command script and write the requested report
///
/// # Arguments
///
/// * `input_path` - Path to the command script
/// * `config` - Store capacity and opening cash balance
/// * `report` - Which report to write once every row has been processed
/// * `output` - Destination of the report
///
/// # Returns
///
/// * `Ok(VendingEngine)` with the final state once the report is written
/// * `Err(VendingError)` if a fatal error occurred
pub fn run(
    input_path: &Path,
    config: &EngineConfig,
    report: ReportKind,
    output: &mut dyn Write,
) -> Result<VendingEngine, VendingError> {
    let mut engine = VendingEngine::new(config)?;
    let reader = CommandReader::new(input_path)?;

    let mut applied = 0usize;
    let mut skipped = 0usize;

    for result in reader {
        match result {
            Ok(command) => {
                let name = command.name();
                match engine.process(command) {
                    Ok(()) => applied += 1,
                    Err(e) => {
                        skipped += 1;
                        warn!(command = name, error = %e, "Command rejected");
                    }
                }
            }
            Err(e) => {
                skipped += 1;
                warn!(error = %e, "Skipping malformed row");
            }
        }
    }

    info!(
        applied,
        skipped,
        items = engine.store().len(),
        transactions = engine.ledger().len(),
        "Script complete"
    );

    write_report(&engine, report, output)?;
    Ok(engine)
}

/// Write one report for the engine's current state
pub fn write_report(
    engine: &VendingEngine,
    report: ReportKind,
    output: &mut dyn Write,
) -> Result<(), VendingError> {
    match report {
        ReportKind::Inventory => write_inventory_csv(engine.store(), output),
        ReportKind::Transactions => write_transactions_csv(&engine.ledger().all(), output),
        ReportKind::Balance => write_balance_csv(engine.cash().balance(), engine.settled(), output),
    }
}
