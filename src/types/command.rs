//! Command records read from a script
//!
//! Each row of the input CSV becomes one `Command`. A command maps to exactly one
//! store or cash-drawer operation; nothing here composes the two.

use super::item::Product;
use super::transaction::TransactionId;
use rust_decimal::Decimal;

/// A single scripted operation
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Stock a product, optionally into a specific slot
    Put {
        item: Product,
        slot: Option<usize>,
    },

    /// Take a product out of the store entirely
    Remove { code: String },

    /// Add cash to the drawer
    Deposit { amount: Decimal },

    /// Charge an amount through the cash handler
    Charge { amount: Decimal },

    /// Reverse a previously issued transaction
    Reverse { tx: TransactionId },

    /// Empty the drawer
    Settle,
}

impl Command {
    /// Script name of the command
    pub fn name(&self) -> &'static str {
        match self {
            Command::Put { .. } => "put",
            Command::Remove { .. } => "rm",
            Command::Deposit { .. } => "deposit",
            Command::Charge { .. } => "charge",
            Command::Reverse { .. } => "reverse",
            Command::Settle => "settle",
        }
    }
}
