//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `command`: Operations read from a command script
//! - `item`: The `Stock` contract and the `Product` item
//! - `transaction`: Transaction records, statuses and identifiers
//! - `error`: Error types for the vending engine

pub mod command;
pub mod error;
pub mod item;
pub mod transaction;

pub use command::Command;
pub use error::VendingError;
pub use item::{Product, Stock};
pub use transaction::{Transaction, TransactionId, TransactionStatus};
