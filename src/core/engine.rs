//! Command processing engine
//!
//! This module provides the VendingEngine that runs scripted commands against a
//! slotted store and a cash drawer. Each command touches exactly one of the two;
//! the engine routes it and records what the payment side issued.
//!
//! The engine enforces:
//! - Every charge outcome, completed or failed, is kept in the ledger
//! - A reversal names a transaction the ledger knows about
//! - Settled cash is tallied across the whole run

use crate::config::EngineConfig;
use crate::core::cash_handler::CashHandler;
use crate::core::slotted_store::SlottedStore;
use crate::core::traits::PaymentHandler;
use crate::core::transaction_store::TransactionStore;
use crate::types::{Command, Product, TransactionId, TransactionStatus, VendingError};
use rust_decimal::Decimal;
use tracing::{info, warn};

/// Command processing engine
pub struct VendingEngine {
    store: SlottedStore<Product>,
    cash: CashHandler,
    ledger: TransactionStore,
    settled: Decimal,
}

impl VendingEngine {
    /// Create an engine with an empty store and the configured opening float
    ///
    /// # Errors
    ///
    /// Returns `NegativeAmount` if the configured opening balance is negative.
    pub fn new(config: &EngineConfig) -> Result<Self, VendingError> {
        Ok(VendingEngine {
            store: SlottedStore::new(config.capacity),
            cash: CashHandler::with_balance(config.opening_balance)?,
            ledger: TransactionStore::new(),
            settled: Decimal::ZERO,
        })
    }

    /// Process a single command
    ///
    /// # Returns
    ///
    /// * `Ok(())` if the command was applied (a declined charge counts as applied)
    /// * `Err(VendingError)` if it was rejected; state is unchanged
    pub fn process(&mut self, command: Command) -> Result<(), VendingError> {
        match command {
            Command::Put { item, slot } => self.process_put(item, slot),
            Command::Remove { code } => self.process_remove(&code),
            Command::Deposit { amount } => self.cash.deposit(amount),
            Command::Charge { amount } => self.process_charge(amount),
            Command::Reverse { tx } => self.process_reverse(tx),
            Command::Settle => self.process_settle(),
        }
    }

    fn process_put(&mut self, item: Product, slot: Option<usize>) -> Result<(), VendingError> {
        self.store.put(item, slot).map(|_| ())
    }

    fn process_remove(&mut self, code: &str) -> Result<(), VendingError> {
        self.store
            .remove(code)
            .map(|_| ())
            .ok_or_else(|| VendingError::item_not_found(code, "rm"))
    }

    /// Charge through the payment handler and record the outcome
    fn process_charge(&mut self, amount: Decimal) -> Result<(), VendingError> {
        let handler: &mut dyn PaymentHandler = &mut self.cash;
        let tx = handler.process(amount)?;

        if tx.status() == TransactionStatus::Failed {
            warn!(
                tx = tx.id(),
                %amount,
                reason = tx.message().unwrap_or_default(),
                "Charge declined"
            );
        }

        self.ledger.store(tx);
        Ok(())
    }

    /// Reverse a recorded transaction
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The transaction ID is not in the ledger
    /// - The handler refuses the reversal (not completed, wrong method)
    fn process_reverse(&mut self, tx_id: TransactionId) -> Result<(), VendingError> {
        let tx = self
            .ledger
            .get_mut(tx_id)
            .ok_or_else(|| VendingError::transaction_not_found(tx_id, "reverse"))?;

        let handler: &mut dyn PaymentHandler = &mut self.cash;
        handler.reverse(tx)
    }

    fn process_settle(&mut self) -> Result<(), VendingError> {
        let settled = self
            .settled
            .checked_add(self.cash.balance())
            .ok_or_else(|| VendingError::arithmetic_overflow("settle"))?;

        let amount = self.cash.settle();
        self.settled = settled;

        info!(%amount, total_settled = %self.settled, "Cash drawer settled");
        Ok(())
    }

    pub fn store(&self) -> &SlottedStore<Product> {
        &self.store
    }

    pub fn cash(&self) -> &CashHandler {
        &self.cash
    }

    pub fn ledger(&self) -> &TransactionStore {
        &self.ledger
    }

    /// Cash drained by every `settle` so far
    pub fn settled(&self) -> Decimal {
        self.settled
    }
}
