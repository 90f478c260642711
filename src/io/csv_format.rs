//! CSV format handling for command scripts and reports
//!
//! This module centralizes all CSV format concerns, providing:
//! - CsvRecord structure for deserialization
//! - Conversion from CSV records to commands
//! - Inventory, transaction and balance report serialization
//!
//! All functions are pure (no file I/O) for easy testing.

use crate::core::SlottedStore;
use crate::types::{Command, Product, Transaction, TransactionId, VendingError};
use chrono::NaiveDate;
use csv::Writer;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Write;
use std::str::FromStr;

/// Date format accepted in the `expires` column
const DATE_FORMAT: &str = "%Y-%m-%d";

/// CSV record structure for deserialization
///
/// Matches the script header `type,code,label,price,count,slot,expires,amount,tx`.
/// Every column except `type` is optional because each command reads only the
/// columns it needs.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct CsvRecord {
    #[serde(rename = "type")]
    pub command: String,
    pub code: Option<String>,
    pub label: Option<String>,
    pub price: Option<String>,
    pub count: Option<String>,
    pub slot: Option<String>,
    pub expires: Option<String>,
    pub amount: Option<String>,
    pub tx: Option<String>,
}

/// Non-empty field contents, if any
fn field(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn required<'a>(
    value: &'a Option<String>,
    command: &str,
    name: &str,
) -> Result<&'a str, VendingError> {
    field(value).ok_or_else(|| VendingError::missing_field(command, name))
}

fn parse<F: FromStr>(raw: &str, name: &str) -> Result<F, VendingError> {
    raw.parse::<F>()
        .map_err(|_| VendingError::invalid_field(name, raw))
}

fn parse_date(raw: &str) -> Result<NaiveDate, VendingError> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|_| VendingError::invalid_field("expires", raw))
}

/// Convert a CsvRecord to a Command
///
/// This function:
/// - Matches the command type case-insensitively
/// - Checks that the fields the command needs are present
/// - Parses prices and amounts as decimals, counts and slots as unsigned integers
///   and expiry dates as `YYYY-MM-DD`
///
/// Columns a command does not use are ignored.
///
/// # Arguments
///
/// * `csv_record` - The deserialized CSV record
///
/// # Returns
///
/// * `Ok(Command)` - Successfully converted record
/// * `Err(VendingError)` - `InvalidCommand`, `MissingField` or `InvalidField`
pub fn convert_csv_record(csv_record: CsvRecord) -> Result<Command, VendingError> {
    let name = csv_record.command.trim().to_lowercase();

    match name.as_str() {
        "put" => {
            let code = required(&csv_record.code, "put", "code")?;
            let label = required(&csv_record.label, "put", "label")?;
            let price: Decimal = parse(required(&csv_record.price, "put", "price")?, "price")?;
            let count: u32 = parse(required(&csv_record.count, "put", "count")?, "count")?;

            // Negative slots fail here since the store only takes usize
            let slot = field(&csv_record.slot)
                .map(|raw| parse::<usize>(raw, "slot"))
                .transpose()?;

            let mut item = Product::new(code, label, price, count);
            if let Some(raw) = field(&csv_record.expires) {
                item = item.with_expiry(parse_date(raw)?);
            }

            Ok(Command::Put { item, slot })
        }
        "rm" => Ok(Command::Remove {
            code: required(&csv_record.code, "rm", "code")?.to_string(),
        }),
        "deposit" => Ok(Command::Deposit {
            amount: parse(required(&csv_record.amount, "deposit", "amount")?, "amount")?,
        }),
        "charge" => Ok(Command::Charge {
            amount: parse(required(&csv_record.amount, "charge", "amount")?, "amount")?,
        }),
        "reverse" => Ok(Command::Reverse {
            tx: parse::<TransactionId>(required(&csv_record.tx, "reverse", "tx")?, "tx")?,
        }),
        "settle" => Ok(Command::Settle),
        _ => Err(VendingError::invalid_command(&csv_record.command)),
    }
}

fn write_err(error: csv::Error) -> VendingError {
    VendingError::IoError {
        message: format!("Failed to write CSV output: {}", error),
    }
}

fn flush_err(error: std::io::Error) -> VendingError {
    VendingError::IoError {
        message: format!("Failed to flush output: {}", error),
    }
}

/// Write currently valid items as an inventory report
///
/// Columns: slot, code, label, price, count. Rows are sorted by slot with
/// unslotted items last (ordered by code). Prices carry two decimal places.
///
/// # Errors
///
/// Returns `IoError` if writing to `output` fails.
pub fn write_inventory_csv(
    store: &SlottedStore<Product>,
    output: &mut dyn Write,
) -> Result<(), VendingError> {
    let mut writer = Writer::from_writer(output);

    writer
        .write_record(["slot", "code", "label", "price", "count"])
        .map_err(write_err)?;

    let mut rows: Vec<(Option<usize>, &Product)> = store
        .list_valid()
        .into_iter()
        .map(|item| (store.find(&item.code), item))
        .collect();

    rows.sort_by(|(a_slot, a), (b_slot, b)| match (a_slot, b_slot) {
        (Some(x), Some(y)) => x.cmp(y),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => a.code.cmp(&b.code),
    });

    for (slot, item) in rows {
        writer
            .write_record(&[
                slot.map(|s| s.to_string()).unwrap_or_default(),
                item.code.clone(),
                item.label.clone(),
                format!("{:.2}", item.price),
                item.count.to_string(),
            ])
            .map_err(write_err)?;
    }

    writer.flush().map_err(flush_err)
}

/// Write the transaction ledger
///
/// Columns: tx, method, amount, status, message. Rows are sorted by
/// transaction id; amounts carry two decimal places.
///
/// # Errors
///
/// Returns `IoError` if writing to `output` fails.
pub fn write_transactions_csv(
    transactions: &[&Transaction],
    output: &mut dyn Write,
) -> Result<(), VendingError> {
    let mut writer = Writer::from_writer(output);

    writer
        .write_record(["tx", "method", "amount", "status", "message"])
        .map_err(write_err)?;

    let mut sorted = transactions.to_vec();
    sorted.sort_by_key(|tx| tx.id());

    for tx in sorted {
        writer
            .write_record([
                tx.id().to_string().as_str(),
                tx.method(),
                format!("{:.2}", tx.amount()).as_str(),
                tx.status().as_str(),
                tx.message().unwrap_or_default(),
            ])
            .map_err(write_err)?;
    }

    writer.flush().map_err(flush_err)
}

/// Write the cash drawer balance
///
/// Columns: method, balance, settled. A single `cash` row.
///
/// # Errors
///
/// Returns `IoError` if writing to `output` fails.
pub fn write_balance_csv(
    balance: Decimal,
    settled: Decimal,
    output: &mut dyn Write,
) -> Result<(), VendingError> {
    let mut writer = Writer::from_writer(output);

    writer
        .write_record(["method", "balance", "settled"])
        .map_err(write_err)?;
    writer
        .write_record([
            "cash".to_string(),
            format!("{:.2}", balance),
            format!("{:.2}", settled),
        ])
        .map_err(write_err)?;

    writer.flush().map_err(flush_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn record(command: &str) -> CsvRecord {
        CsvRecord {
            command: command.to_string(),
            ..CsvRecord::default()
        }
    }

    fn put_record(code: &str, price: &str, count: &str) -> CsvRecord {
        CsvRecord {
            code: Some(code.to_string()),
            label: Some(format!("{} label", code)),
            price: Some(price.to_string()),
            count: Some(count.to_string()),
            ..record("put")
        }
    }

    #[rstest]
    #[case("put")]
    #[case("PUT")]
    #[case("Put")]
    fn test_convert_put_case_insensitive(#[case] name: &str) {
        let csv_record = CsvRecord {
            command: name.to_string(),
            ..put_record("A1", "1.50", "3")
        };

        let command = convert_csv_record(csv_record).unwrap();
        assert_eq!(
            command,
            Command::Put {
                item: Product::new("A1", "A1 label", Decimal::new(150, 2), 3),
                slot: None,
            }
        );
    }

    #[test]
    fn test_convert_put_with_slot_and_expiry() {
        let csv_record = CsvRecord {
            slot: Some("4".to_string()),
            expires: Some("2030-06-01".to_string()),
            ..put_record("B2", "2", "1")
        };

        match convert_csv_record(csv_record).unwrap() {
            Command::Put { item, slot } => {
                assert_eq!(slot, Some(4));
                assert_eq!(item.expires, NaiveDate::from_ymd_opt(2030, 6, 1));
            }
            other => panic!("expected put, got {:?}", other),
        }
    }

    #[rstest]
    #[case::rm(
        CsvRecord { code: Some("A1".to_string()), ..record("rm") },
        Command::Remove { code: "A1".to_string() }
    )]
    #[case::deposit(
        CsvRecord { amount: Some("10.25".to_string()), ..record("deposit") },
        Command::Deposit { amount: Decimal::new(1025, 2) }
    )]
    #[case::charge(
        CsvRecord { amount: Some("3".to_string()), ..record("charge") },
        Command::Charge { amount: Decimal::from(3) }
    )]
    #[case::reverse(
        CsvRecord { tx: Some("7".to_string()), ..record("reverse") },
        Command::Reverse { tx: 7 }
    )]
    #[case::settle(record("settle"), Command::Settle)]
    #[case::unused_columns_ignored(
        CsvRecord { code: Some("X".to_string()), amount: Some("1".to_string()), ..record("settle") },
        Command::Settle
    )]
    fn test_convert_other_commands(#[case] csv_record: CsvRecord, #[case] expected: Command) {
        assert_eq!(convert_csv_record(csv_record).unwrap(), expected);
    }

    #[rstest]
    #[case::unknown_type(record("refill"), VendingError::invalid_command("refill"))]
    #[case::put_missing_code(
        CsvRecord { code: None, ..put_record("A1", "1", "1") },
        VendingError::missing_field("put", "code")
    )]
    #[case::put_blank_label(
        CsvRecord { label: Some("  ".to_string()), ..put_record("A1", "1", "1") },
        VendingError::missing_field("put", "label")
    )]
    #[case::put_bad_price(put_record("A1", "cheap", "1"), VendingError::invalid_field("price", "cheap"))]
    #[case::put_negative_count(put_record("A1", "1", "-2"), VendingError::invalid_field("count", "-2"))]
    #[case::put_negative_slot(
        CsvRecord { slot: Some("-1".to_string()), ..put_record("A1", "1", "1") },
        VendingError::invalid_field("slot", "-1")
    )]
    #[case::put_bad_date(
        CsvRecord { expires: Some("01/02/2030".to_string()), ..put_record("A1", "1", "1") },
        VendingError::invalid_field("expires", "01/02/2030")
    )]
    #[case::rm_missing_code(record("rm"), VendingError::missing_field("rm", "code"))]
    #[case::deposit_missing_amount(record("deposit"), VendingError::missing_field("deposit", "amount"))]
    #[case::charge_bad_amount(
        CsvRecord { amount: Some("lots".to_string()), ..record("charge") },
        VendingError::invalid_field("amount", "lots")
    )]
    #[case::reverse_missing_tx(record("reverse"), VendingError::missing_field("reverse", "tx"))]
    #[case::reverse_bad_tx(
        CsvRecord { tx: Some("x1".to_string()), ..record("reverse") },
        VendingError::invalid_field("tx", "x1")
    )]
    fn test_convert_errors(#[case] csv_record: CsvRecord, #[case] expected: VendingError) {
        assert_eq!(convert_csv_record(csv_record), Err(expected));
    }

    #[test]
    fn test_negative_amount_parses() {
        // Sign checks belong to the cash handler, not the parser
        let csv_record = CsvRecord {
            amount: Some("-5".to_string()),
            ..record("deposit")
        };

        assert_eq!(
            convert_csv_record(csv_record).unwrap(),
            Command::Deposit {
                amount: Decimal::from(-5)
            }
        );
    }

    #[test]
    fn test_write_inventory_csv_orders_by_slot() {
        let mut store = SlottedStore::new(5);
        store
            .put(Product::new("B2", "Chips", Decimal::new(15, 1), 2), Some(3))
            .unwrap();
        store
            .put(Product::new("A1", "Cola", Decimal::from(2), 1), Some(0))
            .unwrap();
        store
            .put(Product::new("C3", "Gum", Decimal::ONE, 0), Some(1))
            .unwrap();

        let mut output = Vec::new();
        write_inventory_csv(&store, &mut output).unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "slot,code,label,price,count\n0,A1,Cola,2.00,1\n3,B2,Chips,1.50,2\n"
        );
    }

    #[test]
    fn test_write_inventory_csv_empty_store() {
        let store: SlottedStore<Product> = SlottedStore::new(2);

        let mut output = Vec::new();
        write_inventory_csv(&store, &mut output).unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "slot,code,label,price,count\n"
        );
    }

    #[test]
    fn test_write_transactions_csv() {
        let completed = Transaction::completed(2, Decimal::new(350, 2), "cash");
        let failed = Transaction::failed(1, Decimal::from(9), "cash", "insufficient");

        let mut output = Vec::new();
        write_transactions_csv(&[&completed, &failed], &mut output).unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "tx,method,amount,status,message\n\
             1,cash,9.00,failed,insufficient\n\
             2,cash,3.50,completed,\n"
        );
    }

    #[rstest]
    #[case(Decimal::ZERO, Decimal::ZERO, "cash,0.00,0.00\n")]
    #[case(Decimal::new(1234, 2), Decimal::from(40), "cash,12.34,40.00\n")]
    fn test_write_balance_csv(
        #[case] balance: Decimal,
        #[case] settled: Decimal,
        #[case] expected_row: &str,
    ) {
        let mut output = Vec::new();
        write_balance_csv(balance, settled, &mut output).unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            format!("method,balance,settled\n{}", expected_row)
        );
    }
}
