//! Transaction-related types for the vending engine
//!
//! A transaction is the record a payment handler hands back for every charge
//! attempt. Once created its fields are fixed, with one exception: a completed
//! transaction may be marked refunded by a successful reversal.

use super::error::VendingError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Transaction identifier
///
/// Issued by the handler that created the transaction, unique per handler instance.
pub type TransactionId = u64;

/// Lifecycle state of a transaction
///
/// ```text
/// Pending ──► Completed ──► Refunded
///    └──────► Failed
/// ```
///
/// Cash resolves synchronously and never produces `Pending`; the state is kept
/// for payment methods that settle asynchronously.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    /// Waiting on an external party to confirm
    Pending,

    /// Funds were taken
    Completed,

    /// The charge was declined; terminal
    Failed,

    /// A completed charge was reversed; terminal
    Refunded,
}

impl TransactionStatus {
    /// Lowercase name used in reports and messages
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "pending",
            TransactionStatus::Completed => "completed",
            TransactionStatus::Failed => "failed",
            TransactionStatus::Refunded => "refunded",
        }
    }

    /// Whether no further transition is possible
    pub fn is_terminal(&self) -> bool {
        matches!(self, TransactionStatus::Failed | TransactionStatus::Refunded)
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Record of a single charge attempt
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    id: TransactionId,
    amount: Decimal,
    status: TransactionStatus,
    method: String,
    message: Option<String>,
}

impl Transaction {
    /// A charge that took funds
    pub fn completed(id: TransactionId, amount: Decimal, method: &str) -> Self {
        Transaction {
            id,
            amount,
            status: TransactionStatus::Completed,
            method: method.to_string(),
            message: None,
        }
    }

    /// A declined charge
    ///
    /// `amount` still records what was requested.
    pub fn failed(id: TransactionId, amount: Decimal, method: &str, message: &str) -> Self {
        Transaction {
            id,
            amount,
            status: TransactionStatus::Failed,
            method: method.to_string(),
            message: Some(message.to_string()),
        }
    }

    /// A charge awaiting confirmation
    pub fn pending(id: TransactionId, amount: Decimal, method: &str) -> Self {
        Transaction {
            id,
            amount,
            status: TransactionStatus::Pending,
            method: method.to_string(),
            message: None,
        }
    }

    pub fn id(&self) -> TransactionId {
        self.id
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn status(&self) -> TransactionStatus {
        self.status
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Apply the `Completed → Refunded` transition
    ///
    /// This only flips the status. The handler that issued the transaction is
    /// responsible for returning the money before calling it.
    ///
    /// # Errors
    ///
    /// Returns `NotReversible` (and leaves the status untouched) unless the
    /// transaction is currently `Completed`.
    pub fn mark_refunded(&mut self) -> Result<(), VendingError> {
        if self.status != TransactionStatus::Completed {
            return Err(VendingError::not_reversible(self.id, self.status));
        }
        self.status = TransactionStatus::Refunded;
        Ok(())
    }
}
