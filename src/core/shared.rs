//! Thread-safe handles over the store and the cash drawer
//!
//! The core types are single-threaded. This module wraps each of them behind a
//! single `Mutex` so they can be shared across threads without giving up their
//! invariants.
//!
//! # Locking
//!
//! - `SharedStore` guards the whole `SlottedStore` with one lock. The code index and
//!   the slot map are never locked separately, so a reader can never observe one
//!   updated without the other.
//! - `SharedCashHandler` guards the drawer with one lock. `process`, `reverse`,
//!   `deposit` and `settle` are mutually exclusive, which rules out a concurrent
//!   charge and refund losing one of the two balance updates.
//!
//! Every critical section either applies fully or leaves state untouched, so a
//! poisoned lock still holds consistent data and is recovered rather than
//! propagated.

use crate::core::cash_handler::CashHandler;
use crate::core::slotted_store::{Placement, SlottedStore};
use crate::core::traits::PaymentHandler;
use crate::types::{Stock, Transaction, VendingError};
use rust_decimal::Decimal;
use std::sync::{Arc, Mutex, MutexGuard};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Cloneable, thread-safe handle to a `SlottedStore`
#[derive(Debug)]
pub struct SharedStore<T> {
    inner: Arc<Mutex<SlottedStore<T>>>,
}

impl<T> Clone for SharedStore<T> {
    fn clone(&self) -> Self {
        SharedStore {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Stock> SharedStore<T> {
    pub fn new(store: SlottedStore<T>) -> Self {
        SharedStore {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// See [`SlottedStore::put`]
    pub fn put(&self, item: T, slot: Option<usize>) -> Result<Placement, VendingError> {
        lock(&self.inner).put(item, slot)
    }

    /// See [`SlottedStore::remove`]
    pub fn remove(&self, code: &str) -> Option<T> {
        lock(&self.inner).remove(code)
    }

    /// See [`SlottedStore::find`]
    pub fn find(&self, code: &str) -> Option<usize> {
        lock(&self.inner).find(code)
    }

    /// Run `f` against the store while holding the lock
    ///
    /// Use this for reads that must see a single consistent snapshot, or for
    /// several operations that must not interleave with other callers.
    pub fn with<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&mut SlottedStore<T>) -> R,
    {
        f(&mut lock(&self.inner))
    }
}

impl<T: Stock + Clone> SharedStore<T> {
    /// Snapshot of the item registered under `code`
    pub fn get(&self, code: &str) -> Option<T> {
        lock(&self.inner).get(code).cloned()
    }

    /// Snapshot of the item bound to `slot`
    pub fn get_at(&self, slot: usize) -> Option<T> {
        lock(&self.inner).get_at(slot).cloned()
    }

    /// Snapshot of every currently valid item
    pub fn list_valid(&self) -> Vec<T> {
        lock(&self.inner)
            .list_valid()
            .into_iter()
            .cloned()
            .collect()
    }
}

/// Cloneable, thread-safe handle to a `CashHandler`
#[derive(Debug, Clone, Default)]
pub struct SharedCashHandler {
    inner: Arc<Mutex<CashHandler>>,
}

impl SharedCashHandler {
    pub fn new(handler: CashHandler) -> Self {
        SharedCashHandler {
            inner: Arc::new(Mutex::new(handler)),
        }
    }

    pub fn balance(&self) -> Decimal {
        lock(&self.inner).balance()
    }

    /// See [`CashHandler::deposit`]
    pub fn deposit(&self, amount: Decimal) -> Result<(), VendingError> {
        lock(&self.inner).deposit(amount)
    }

    /// See [`CashHandler::settle`]
    pub fn settle(&self) -> Decimal {
        lock(&self.inner).settle()
    }
}

impl PaymentHandler for SharedCashHandler {
    fn method(&self) -> &str {
        CashHandler::METHOD
    }

    fn process(&mut self, amount: Decimal) -> Result<Transaction, VendingError> {
        lock(&self.inner).process(amount)
    }

    fn reverse(&mut self, transaction: &mut Transaction) -> Result<(), VendingError> {
        lock(&self.inner).reverse(transaction)
    }
}
