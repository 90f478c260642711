//! End-to-end integration tests
//!
//! These tests validate the complete script pipeline using predefined CSV
//! fixtures. Each test:
//! 1. Reads input.csv from a fixture directory
//! 2. Runs every command through a fresh engine with the default configuration
//! 3. Writes one report
//! 4. Compares the report with expected_{report}.csv
//!
//! Test fixtures are located in tests/fixtures/ and cover:
//! - Happy path scenarios
//! - Restocking, removal and slot reuse
//! - Slot bounds and occupied slots
//! - Expired and out-of-stock products
//! - Declined charges, refunds and settlement
//! - Malformed rows and rejected commands
//!
//! Each fixture is checked against all three reports.

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use std::fs;
    use std::io::Write;
    use std::path::Path;
    use tempfile::NamedTempFile;
    use vending_engine::cli::ReportKind;
    use vending_engine::pipeline;
    use vending_engine::EngineConfig;

    fn report_name(report: ReportKind) -> &'static str {
        match report {
            ReportKind::Inventory => "inventory",
            ReportKind::Transactions => "transactions",
            ReportKind::Balance => "balance",
        }
    }

    /// Run a fixture's input.csv and compare the report with the expected file
    ///
    /// # Panics
    ///
    /// Panics if:
    /// - Input or expected files cannot be read
    /// - The run fails
    /// - Output doesn't match expected
    fn run_test_fixture(fixture_name: &str, report: ReportKind) {
        let fixture_dir = format!("tests/fixtures/{}", fixture_name);
        let input_path = format!("{}/input.csv", fixture_dir);
        let expected_path = format!("{}/expected_{}.csv", fixture_dir, report_name(report));

        assert!(
            Path::new(&input_path).exists(),
            "Input file not found: {}",
            input_path
        );
        assert!(
            Path::new(&expected_path).exists(),
            "Expected file not found: {}",
            expected_path
        );

        let mut temp_output = NamedTempFile::new().expect("Failed to create temp file");

        pipeline::run(
            Path::new(&input_path),
            &EngineConfig::default(),
            report,
            &mut temp_output,
        )
        .unwrap_or_else(|e| panic!("Failed to run script: {}", e));

        temp_output.flush().expect("Failed to flush temp file");

        let actual_output = fs::read_to_string(temp_output.path())
            .unwrap_or_else(|e| panic!("Failed to read temp output file: {}", e));

        let expected_output = fs::read_to_string(&expected_path)
            .unwrap_or_else(|e| panic!("Failed to read expected file {}: {}", expected_path, e));

        assert_eq!(
            actual_output, expected_output,
            "\n\nOutput mismatch for fixture: {} (report: {:?})\n\nActual output:\n{}\n\nExpected output:\n{}\n",
            fixture_name, report, actual_output, expected_output
        );
    }

    /// End-to-end test for all fixtures and all reports
    #[rstest]
    #[case("happy_path")]
    #[case("restock_and_remove")]
    #[case("slot_boundaries")]
    #[case("expiry_and_validity")]
    #[case("insufficient_funds")]
    #[case("refunds")]
    #[case("settlement")]
    #[case("negative_amounts")]
    #[case("malformed_data")]
    #[case("empty_script")]
    fn test_fixtures(
        #[case] fixture: &str,
        #[values(ReportKind::Inventory, ReportKind::Transactions, ReportKind::Balance)]
        report: ReportKind,
    ) {
        run_test_fixture(fixture, report);
    }

    #[test]
    fn test_opening_balance_and_capacity() {
        let mut input = NamedTempFile::new().expect("Failed to create temp file");
        write!(
            input,
            "type,code,label,price,count,slot,expires,amount,tx\n\
             put,A1,Cola,1.00,1,,,,\n\
             put,B1,Chips,1.00,1,,,,\n\
             charge,,,,,,,4,\n"
        )
        .expect("Failed to write input");
        input.flush().expect("Failed to flush input");

        let mut output = Vec::new();
        let engine = pipeline::run(
            input.path(),
            &EngineConfig::new(1, rust_decimal::Decimal::from(10)),
            ReportKind::Balance,
            &mut output,
        )
        .unwrap();

        assert_eq!(engine.store().len(), 1);
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "method,balance,settled\ncash,6.00,0.00\n"
        );
    }
}
