//! Core trait for payment methods
//!
//! Callers charge and refund through [`PaymentHandler`] rather than a concrete
//! handler type, so new payment methods slot in without touching call sites.

use crate::types::{Transaction, VendingError};
use rust_decimal::Decimal;

/// A way of taking payment
///
/// The trait is object safe; hold it as `&mut dyn PaymentHandler` or
/// `Box<dyn PaymentHandler>` when the method is chosen at runtime.
pub trait PaymentHandler {
    /// Method tag stamped on every transaction this handler issues (e.g. "cash")
    fn method(&self) -> &str;

    /// Attempt to charge `amount`
    ///
    /// A declined charge is reported through the returned transaction's status,
    /// not through `Err`. `Err` is reserved for input the handler refuses to
    /// consider at all, such as a negative amount.
    fn process(&mut self, amount: Decimal) -> Result<Transaction, VendingError>;

    /// Undo a completed charge issued by this handler
    ///
    /// On success the money is returned and the transaction is marked refunded.
    /// On failure neither the handler nor the transaction changes.
    fn reverse(&mut self, transaction: &mut Transaction) -> Result<(), VendingError>;
}
