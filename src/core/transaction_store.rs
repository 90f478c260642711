//! Transaction ledger for reversals
//!
//! This module provides the TransactionStore component that keeps every
//! transaction a payment handler has issued during a run. A later reversal names
//! the transaction by id, so the ledger hands back a mutable reference the handler
//! can flip to `Refunded`.
//!
//! # Duplicate Handling
//!
//! If a duplicate transaction ID is encountered, only the first occurrence is
//! stored. Subsequent transactions with the same ID are ignored.

use crate::types::{Transaction, TransactionId};
use std::collections::HashMap;

/// Transaction ledger
///
/// Maintains a HashMap of transaction ID to transaction.
pub struct TransactionStore {
    /// Map of transaction ID to transaction
    transactions: HashMap<TransactionId, Transaction>,
}

impl TransactionStore {
    /// Create a new empty ledger
    pub fn new() -> Self {
        TransactionStore {
            transactions: HashMap::new(),
        }
    }

    /// Record a transaction under its own id
    ///
    /// # Returns
    ///
    /// `true` if the transaction was recorded, `false` if the id was already taken
    pub fn store(&mut self, tx: Transaction) -> bool {
        let id = tx.id();
        if self.transactions.contains_key(&id) {
            return false;
        }
        self.transactions.insert(id, tx);
        true
    }

    /// Get an immutable reference to a recorded transaction
    pub fn get(&self, tx_id: TransactionId) -> Option<&Transaction> {
        self.transactions.get(&tx_id)
    }

    /// Get a mutable reference to a recorded transaction
    ///
    /// Used to hand the transaction to a handler for reversal.
    pub fn get_mut(&mut self, tx_id: TransactionId) -> Option<&mut Transaction> {
        self.transactions.get_mut(&tx_id)
    }

    /// All recorded transactions sorted by id
    pub fn all(&self) -> Vec<&Transaction> {
        let mut transactions: Vec<&Transaction> = self.transactions.values().collect();
        transactions.sort_by_key(|tx| tx.id());
        transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

impl Default for TransactionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TransactionStatus;
    use rust_decimal::Decimal;

    #[test]
    fn test_store_and_retrieve_transaction() {
        let mut store = TransactionStore::new();

        assert!(store.store(Transaction::completed(1, Decimal::new(10000, 4), "cash")));

        let retrieved = store.get(1).unwrap();
        assert_eq!(retrieved.amount(), Decimal::new(10000, 4));
        assert_eq!(retrieved.status(), TransactionStatus::Completed);
    }

    #[test]
    fn test_duplicate_transaction_id_first_wins() {
        let mut store = TransactionStore::new();

        store.store(Transaction::completed(1, Decimal::ONE, "cash"));
        let accepted = store.store(Transaction::failed(1, Decimal::TEN, "cash", "insufficient"));

        assert!(!accepted);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(1).unwrap().status(), TransactionStatus::Completed);
        assert_eq!(store.get(1).unwrap().amount(), Decimal::ONE);
    }

    #[test]
    fn test_get_mut_allows_refund() {
        let mut store = TransactionStore::new();
        store.store(Transaction::completed(4, Decimal::ONE, "cash"));

        store.get_mut(4).unwrap().mark_refunded().unwrap();

        assert_eq!(store.get(4).unwrap().status(), TransactionStatus::Refunded);
    }

    #[test]
    fn test_get_unknown_id() {
        let mut store = TransactionStore::new();
        assert!(store.get(999).is_none());
        assert!(store.get_mut(999).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_all_sorted_by_id() {
        let mut store = TransactionStore::new();
        for id in [3, 1, 2] {
            store.store(Transaction::completed(id, Decimal::ONE, "cash"));
        }

        let ids: Vec<TransactionId> = store.all().iter().map(|tx| tx.id()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }
}
