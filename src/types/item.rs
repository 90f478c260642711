//! Item-related types for the vending engine
//!
//! The store is generic over anything implementing [`Stock`]; [`Product`] is the
//! concrete item the command script and reports work with.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;

/// What the slotted store needs from an item
///
/// The store reads the code, adjusts the count on restock, and asks the item
/// whether it is currently usable. Everything else about the item is opaque.
pub trait Stock {
    /// Unique, stable identifier
    fn code(&self) -> &str;

    /// Units on hand
    fn count(&self) -> u32;

    /// Overwrite the units on hand
    fn set_count(&mut self, count: u32);

    /// Whether the item can currently be sold
    fn check(&self) -> bool;
}

/// A sellable product
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    /// Unique product code (e.g. "A1")
    pub code: String,

    /// Human-readable name
    pub label: String,

    /// Unit price
    pub price: Decimal,

    /// Units on hand
    pub count: u32,

    /// Last day the product may be sold, if it expires
    pub expires: Option<NaiveDate>,
}

impl Product {
    /// Create a product that never expires
    pub fn new(code: &str, label: &str, price: Decimal, count: u32) -> Self {
        Product {
            code: code.to_string(),
            label: label.to_string(),
            price,
            count,
            expires: None,
        }
    }

    /// Set the last day the product may be sold
    pub fn with_expiry(mut self, expires: NaiveDate) -> Self {
        self.expires = Some(expires);
        self
    }

    /// Validity on a given day: in stock and not past its expiry date
    pub fn is_valid_on(&self, date: NaiveDate) -> bool {
        self.count > 0 && self.expires.map_or(true, |last_day| date <= last_day)
    }
}

impl Stock for Product {
    fn code(&self) -> &str {
        &self.code
    }

    fn count(&self) -> u32 {
        self.count
    }

    fn set_count(&mut self, count: u32) {
        self.count = count;
    }

    fn check(&self) -> bool {
        self.is_valid_on(Utc::now().date_naive())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[rstest]
    #[case::in_stock_no_expiry(3, None, true)]
    #[case::out_of_stock(0, None, false)]
    #[case::before_expiry(1, Some(day(2024, 6, 30)), true)]
    #[case::on_expiry_day(1, Some(day(2024, 6, 15)), true)]
    #[case::after_expiry(1, Some(day(2024, 6, 14)), false)]
    #[case::expired_and_empty(0, Some(day(2024, 6, 1)), false)]
    fn test_is_valid_on(
        #[case] count: u32,
        #[case] expires: Option<NaiveDate>,
        #[case] expected: bool,
    ) {
        let mut product = Product::new("A1", "Cola", Decimal::new(150, 2), count);
        product.expires = expires;

        assert_eq!(product.is_valid_on(day(2024, 6, 15)), expected);
    }

    #[test]
    fn test_check_uses_current_date() {
        let fresh = Product::new("A1", "Cola", Decimal::ONE, 1).with_expiry(day(9999, 12, 31));
        let stale = Product::new("A2", "Milk", Decimal::ONE, 1).with_expiry(day(2000, 1, 1));

        assert!(fresh.check());
        assert!(!stale.check());
    }

    #[test]
    fn test_set_count_through_trait() {
        let mut product = Product::new("A1", "Cola", Decimal::ONE, 2);
        product.set_count(7);
        assert_eq!(Stock::count(&product), 7);
    }
}
