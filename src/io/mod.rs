//! I/O module
//!
//! Handles CSV script parsing and report output.
//!
//! # Components
//!
//! - `csv_format` - CSV format handling (record conversion, report serialization)
//! - `reader` - Streaming command reader with iterator interface

pub mod csv_format;
pub mod reader;

pub use csv_format::{
    convert_csv_record, write_balance_csv, write_inventory_csv, write_transactions_csv, CsvRecord,
};
pub use reader::CommandReader;
