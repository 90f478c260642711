//! Cash payment handling
//!
//! This module provides the `CashHandler`, the cash implementation of
//! [`PaymentHandler`]. It keeps a single running balance:
//!
//! - `deposit` adds cash to the drawer
//! - `process` takes cash out if the drawer can cover the charge
//! - `reverse` puts the cash of a completed charge back
//! - `settle` empties the drawer at the end of a cycle
//!
//! # Transaction States
//!
//! Cash resolves synchronously, so `process` only ever yields `Completed` or
//! `Failed`. A `Completed` transaction can be reversed exactly once, after which
//! it is `Refunded`.

use crate::core::traits::PaymentHandler;
use crate::types::{Transaction, TransactionId, TransactionStatus, VendingError};
use rust_decimal::Decimal;
use tracing::debug;

/// Message carried by a declined cash charge
pub const INSUFFICIENT_FUNDS: &str = "insufficient";

/// Cash drawer
#[derive(Debug, Clone)]
pub struct CashHandler {
    /// Cash currently in the drawer
    balance: Decimal,

    /// Id handed to the next transaction
    next_id: TransactionId,
}

impl CashHandler {
    /// Method tag on every cash transaction
    pub const METHOD: &'static str = "cash";

    /// Create an empty drawer
    pub fn new() -> Self {
        CashHandler {
            balance: Decimal::ZERO,
            next_id: 1,
        }
    }

    /// Create a drawer holding an opening float
    ///
    /// # Errors
    ///
    /// Returns `NegativeAmount` if `balance` is below zero.
    pub fn with_balance(balance: Decimal) -> Result<Self, VendingError> {
        let mut handler = Self::new();
        handler.deposit(balance)?;
        Ok(handler)
    }

    /// Cash currently in the drawer
    pub fn balance(&self) -> Decimal {
        self.balance
    }

    /// Add cash to the drawer
    ///
    /// # Arguments
    ///
    /// * `amount` - The amount to add (must be non-negative)
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `amount` is negative
    /// - Adding the amount would overflow the balance
    pub fn deposit(&mut self, amount: Decimal) -> Result<(), VendingError> {
        if amount < Decimal::ZERO {
            return Err(VendingError::negative_amount(amount, "deposit"));
        }

        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or_else(|| VendingError::arithmetic_overflow("deposit"))?;

        debug!(%amount, balance = %self.balance, "Deposited cash");
        Ok(())
    }

    /// Empty the drawer
    ///
    /// # Returns
    ///
    /// The balance before the call. The drawer is left at zero.
    pub fn settle(&mut self) -> Decimal {
        let settled = std::mem::take(&mut self.balance);
        debug!(%settled, "Settled cash drawer");
        settled
    }

    fn issue_id(&mut self) -> TransactionId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

impl Default for CashHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl PaymentHandler for CashHandler {
    fn method(&self) -> &str {
        Self::METHOD
    }

    /// Take `amount` out of the drawer if it can cover it
    ///
    /// # Returns
    ///
    /// * `Ok(Transaction)` - `Completed` with the balance reduced, or `Failed`
    ///   with message "insufficient" and the balance unchanged
    ///
    /// # Errors
    ///
    /// Returns `NegativeAmount` for an amount below zero. No id is consumed and
    /// the balance is unchanged.
    fn process(&mut self, amount: Decimal) -> Result<Transaction, VendingError> {
        if amount < Decimal::ZERO {
            return Err(VendingError::negative_amount(amount, "process"));
        }

        let id = self.issue_id();

        if self.balance < amount {
            debug!(tx = id, %amount, balance = %self.balance, "Declined cash charge");
            return Ok(Transaction::failed(
                id,
                amount,
                Self::METHOD,
                INSUFFICIENT_FUNDS,
            ));
        }

        self.balance -= amount;
        debug!(tx = id, %amount, balance = %self.balance, "Completed cash charge");
        Ok(Transaction::completed(id, amount, Self::METHOD))
    }

    /// Return the cash of a completed charge to the drawer
    ///
    /// # Errors
    ///
    /// Nothing changes when:
    /// - the transaction was issued by another payment method (`MethodMismatch`)
    /// - the transaction is not `Completed` (`NotReversible`)
    /// - the refund would overflow the balance (`ArithmeticOverflow`)
    fn reverse(&mut self, transaction: &mut Transaction) -> Result<(), VendingError> {
        if transaction.method() != Self::METHOD {
            return Err(VendingError::method_mismatch(
                transaction.id(),
                Self::METHOD,
                transaction.method(),
            ));
        }

        if transaction.status() != TransactionStatus::Completed {
            return Err(VendingError::not_reversible(
                transaction.id(),
                transaction.status(),
            ));
        }

        let new_balance = self
            .balance
            .checked_add(transaction.amount())
            .ok_or_else(|| VendingError::arithmetic_overflow("reverse"))?;

        transaction.mark_refunded()?;
        self.balance = new_balance;

        debug!(tx = transaction.id(), balance = %self.balance, "Reversed cash charge");
        Ok(())
    }
}
