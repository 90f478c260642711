use crate::config::EngineConfig;
use crate::core::DEFAULT_CAPACITY;
use clap::{Parser, ValueEnum};
use rust_decimal::Decimal;
use std::path::PathBuf;

/// Run a vending command script and print a report
#[derive(Parser, Debug)]
#[command(name = "vending-engine")]
#[command(about = "Run a vending command script and print a report", long_about = None)]
pub struct CliArgs {
    /// Input CSV file path containing commands
    #[arg(value_name = "INPUT", help = "Path to the input CSV file")]
    pub input_file: PathBuf,

    /// Number of slots in the store
    #[arg(
        long = "capacity",
        value_name = "N",
        default_value_t = DEFAULT_CAPACITY,
        help = "Number of slots in the store"
    )]
    pub capacity: usize,

    /// Cash in the drawer before the first command
    #[arg(
        long = "opening-balance",
        value_name = "AMOUNT",
        allow_hyphen_values = true,
        help = "Cash in the drawer before the first command (default: 0)"
    )]
    pub opening_balance: Option<Decimal>,

    /// Report written to stdout once the script has run
    #[arg(
        long = "report",
        value_name = "REPORT",
        default_value = "inventory",
        help = "Report to print: 'inventory', 'transactions' or 'balance'"
    )]
    pub report: ReportKind,
}

/// Reports that can be printed after a run
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportKind {
    Inventory,
    Transactions,
    Balance,
}

impl CliArgs {
    /// Build an EngineConfig from the CLI arguments
    ///
    /// A negative opening balance is replaced by zero (see `EngineConfig::new`).
    pub fn to_config(&self) -> EngineConfig {
        EngineConfig::new(
            self.capacity,
            self.opening_balance.unwrap_or(Decimal::ZERO),
        )
    }
}
