//! Error types for the vending engine
//!
//! This module defines all error types that can occur while stocking the store,
//! moving cash, or reading a command script. Errors are designed to be
//! descriptive and user-friendly for CLI output.
//!
//! # Error Categories
//!
//! - **Placement Errors**: Slot out of range, slot occupied, store full
//! - **Lookup Errors**: Unknown item code, unknown transaction id
//! - **Money Errors**: Negative amounts, arithmetic overflow
//! - **Reversal Errors**: Transaction not in a reversible state, wrong payment method
//! - **Input Errors**: File not found, I/O failures, malformed command rows
//!
//! None of these are fatal to the engine itself. Insufficient funds is deliberately
//! absent: a charge that cannot be covered produces a failed transaction, not an error.

use super::transaction::{TransactionId, TransactionStatus};
use rust_decimal::Decimal;
use thiserror::Error;

/// Main error type for the vending engine
#[derive(Debug, Clone, PartialEq, Error)]
pub enum VendingError {
    /// Requested slot lies outside `[0, capacity)`
    #[error("Slot {slot} is out of range for capacity {capacity}")]
    SlotOutOfRange {
        /// The requested slot
        slot: usize,
        /// The store capacity
        capacity: usize,
    },

    /// Requested slot is already bound to another item
    #[error("Slot {slot} is already occupied by '{occupant}'")]
    SlotOccupied {
        /// The requested slot
        slot: usize,
        /// Code of the item currently in the slot
        occupant: String,
    },

    /// Every slot is taken
    #[error("Store is full (capacity {capacity})")]
    StoreFull {
        /// The store capacity
        capacity: usize,
    },

    /// Restocking would overflow the item count
    #[error("Count overflow while restocking '{code}'")]
    CountOverflow {
        /// Code of the item being restocked
        code: String,
    },

    /// No item registered under the code
    #[error("Item '{code}' not found for {operation}")]
    ItemNotFound {
        /// The unknown code
        code: String,
        /// Operation that failed
        operation: String,
    },

    /// No transaction recorded under the id
    #[error("Transaction {tx} not found for {operation}")]
    TransactionNotFound {
        /// Transaction id that was not found
        tx: TransactionId,
        /// Operation that failed
        operation: String,
    },

    /// Amount below zero
    #[error("Negative amount {amount} rejected for {operation}")]
    NegativeAmount {
        /// The rejected amount
        amount: Decimal,
        /// Operation that failed
        operation: String,
    },

    /// Balance arithmetic would overflow
    #[error("Arithmetic overflow in {operation}")]
    ArithmeticOverflow {
        /// Operation that would overflow
        operation: String,
    },

    /// Only completed transactions can be reversed
    #[error("Transaction {tx} cannot be reversed while {status}")]
    NotReversible {
        /// Transaction id
        tx: TransactionId,
        /// Status the transaction is in
        status: TransactionStatus,
    },

    /// Transaction was issued by a different payment method
    #[error("Transaction {tx} belongs to method '{actual}', not '{expected}'")]
    MethodMismatch {
        /// Transaction id
        tx: TransactionId,
        /// Method of the handler asked to reverse it
        expected: String,
        /// Method recorded on the transaction
        actual: String,
    },

    /// Input file not found at the specified path
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error occurred while reading or writing files
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// CSV parsing error occurred
    ///
    /// Recoverable: the malformed row is skipped.
    #[error("CSV parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// Unknown command type in the script
    #[error("Invalid command '{command}'")]
    InvalidCommand {
        /// The command string as read
        command: String,
    },

    /// A field the command needs was left empty
    #[error("{command} command requires a {field}")]
    MissingField {
        /// Command being parsed
        command: String,
        /// Missing field name
        field: String,
    },

    /// A field could not be parsed
    #[error("Invalid {field} '{value}'")]
    InvalidField {
        /// Field name
        field: String,
        /// Raw value as read
        value: String,
    },
}

impl From<std::io::Error> for VendingError {
    fn from(error: std::io::Error) -> Self {
        VendingError::IoError {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for VendingError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        VendingError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

impl VendingError {
    /// Create a SlotOutOfRange error
    pub fn slot_out_of_range(slot: usize, capacity: usize) -> Self {
        VendingError::SlotOutOfRange { slot, capacity }
    }

    /// Create a SlotOccupied error
    pub fn slot_occupied(slot: usize, occupant: &str) -> Self {
        VendingError::SlotOccupied {
            slot,
            occupant: occupant.to_string(),
        }
    }

    /// Create a StoreFull error
    pub fn store_full(capacity: usize) -> Self {
        VendingError::StoreFull { capacity }
    }

    /// Create a CountOverflow error
    pub fn count_overflow(code: &str) -> Self {
        VendingError::CountOverflow {
            code: code.to_string(),
        }
    }

    /// Create an ItemNotFound error
    pub fn item_not_found(code: &str, operation: &str) -> Self {
        VendingError::ItemNotFound {
            code: code.to_string(),
            operation: operation.to_string(),
        }
    }

    /// Create a TransactionNotFound error
    pub fn transaction_not_found(tx: TransactionId, operation: &str) -> Self {
        VendingError::TransactionNotFound {
            tx,
            operation: operation.to_string(),
        }
    }

    /// Create a NegativeAmount error
    pub fn negative_amount(amount: Decimal, operation: &str) -> Self {
        VendingError::NegativeAmount {
            amount,
            operation: operation.to_string(),
        }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(operation: &str) -> Self {
        VendingError::ArithmeticOverflow {
            operation: operation.to_string(),
        }
    }

    /// Create a NotReversible error
    pub fn not_reversible(tx: TransactionId, status: TransactionStatus) -> Self {
        VendingError::NotReversible { tx, status }
    }

    /// Create a MethodMismatch error
    pub fn method_mismatch(tx: TransactionId, expected: &str, actual: &str) -> Self {
        VendingError::MethodMismatch {
            tx,
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    /// Create an InvalidCommand error
    pub fn invalid_command(command: &str) -> Self {
        VendingError::InvalidCommand {
            command: command.to_string(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(command: &str, field: &str) -> Self {
        VendingError::MissingField {
            command: command.to_string(),
            field: field.to_string(),
        }
    }

    /// Create an InvalidField error
    pub fn invalid_field(field: &str, value: &str) -> Self {
        VendingError::InvalidField {
            field: field.to_string(),
            value: value.to_string(),
        }
    }
}
