//! Engine configuration
//!
//! Holds the knobs a run needs before the first command is read: how many slots
//! the store has and how much cash the drawer opens with.

use crate::core::slotted_store::DEFAULT_CAPACITY;
use rust_decimal::Decimal;
use tracing::warn;

/// Configuration for a [`VendingEngine`](crate::core::VendingEngine)
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Number of slots in the store (default: 20)
    pub capacity: usize,

    /// Cash in the drawer before the first command (default: 0)
    pub opening_balance: Decimal,
}

impl EngineConfig {
    /// Create a configuration, falling back to defaults for invalid values
    ///
    /// A capacity of zero is valid and yields a store that rejects every
    /// placement. A negative opening balance is replaced by zero with a warning.
    pub fn new(capacity: usize, opening_balance: Decimal) -> Self {
        let opening_balance = if opening_balance < Decimal::ZERO {
            warn!(
                %opening_balance,
                "Negative opening balance is not allowed, starting from zero"
            );
            Decimal::ZERO
        } else {
            opening_balance
        };

        EngineConfig {
            capacity,
            opening_balance,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            capacity: DEFAULT_CAPACITY,
            opening_balance: Decimal::ZERO,
        }
    }
}
