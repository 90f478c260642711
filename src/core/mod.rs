//! Core business logic module
//!
//! This module contains the store and payment components:
//! - `traits` - The `PaymentHandler` abstraction
//! - `slotted_store` - Capacity-bounded store indexed by code and by slot
//! - `cash_handler` - Cash drawer implementing `PaymentHandler`
//! - `transaction_store` - Ledger of issued transactions for later reversal
//! - `engine` - Command processing orchestration
//! - `shared` - Mutex-guarded handles for use across threads

pub mod cash_handler;
pub mod engine;
pub mod shared;
pub mod slotted_store;
pub mod traits;
pub mod transaction_store;

pub use cash_handler::CashHandler;
pub use engine::VendingEngine;
pub use shared::{SharedCashHandler, SharedStore};
pub use slotted_store::{Placement, SlottedStore, DEFAULT_CAPACITY};
pub use traits::PaymentHandler;
pub use transaction_store::TransactionStore;
