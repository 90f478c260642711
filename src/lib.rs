//! Vending Engine Library
//! # Overview
//!
//! This library provides a slotted item store and a cash payment handler, driven
//! by a streaming CSV command script.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Product, Transaction, Command, errors)
//! - [`cli`] - CLI arguments parsing
//! - [`config`] - Engine configuration
//! - [`core`] - Business logic components:
//!   - [`core::slotted_store`] - Capacity-bounded store addressed by code and slot
//!   - [`core::cash_handler`] - Cash drawer behind the `PaymentHandler` trait
//!   - [`core::transaction_store`] - Ledger of issued transactions
//!   - [`core::engine`] - Command processing orchestration
//!   - [`core::shared`] - Thread-safe handles over the store and the drawer
//! - [`io`] - CSV script reading and report writing
//! - [`pipeline`] - A complete run from script to report
//!
//! # Commands
//!
//! - **put**: Stock a new product, or add to the count of a known one
//! - **rm**: Take a product out of the store
//! - **deposit**: Add cash to the drawer
//! - **charge**: Take cash from the drawer, declining when it cannot cover the amount
//! - **reverse**: Refund a completed charge
//! - **settle**: Empty the drawer
//!
//! # Validity
//!
//! A product is valid while its count is above zero and its expiry date, if any,
//! has not passed. Invalid products stay in the store but are left out of
//! listings.

// Module declarations
pub mod cli;
pub mod config;
pub mod core;
pub mod io;
pub mod pipeline;
pub mod types;

pub use crate::config::EngineConfig;
pub use crate::core::{
    CashHandler, PaymentHandler, Placement, SharedCashHandler, SharedStore, SlottedStore,
    TransactionStore, VendingEngine,
};
pub use types::{
    Command, Product, Stock, Transaction, TransactionId, TransactionStatus, VendingError,
};
