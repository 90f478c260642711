//! CSV command reader with iterator interface
//!
//! Provides a streaming iterator over commands from a CSV script. Format
//! concerns (column layout, field parsing) are delegated to `csv_format`.
//!
//! # Iterator Interface
//!
//! CommandReader implements the Iterator trait, yielding
//! `Result<Command, VendingError>` for each CSV row:
//!
//! ```no_run
//! use vending_engine::io::CommandReader;
//! use std::path::Path;
//!
//! let reader = CommandReader::new(Path::new("script.csv")).unwrap();
//! for result in reader {
//!     match result {
//!         Ok(command) => println!("Command: {:?}", command),
//!         Err(e) => eprintln!("Error: {}", e),
//!     }
//! }
//! ```
//!
//! # Error Handling
//!
//! - Fatal errors (missing file, unreadable header) are returned from `new()`
//! - A malformed row is yielded as `ParseError` carrying its line number, and
//!   iteration continues with the next row
//!
//! Rows are read one at a time; memory use does not grow with the file.

use crate::io::csv_format::{convert_csv_record, CsvRecord};
use crate::types::{Command, VendingError};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Streaming reader of scripted commands
#[derive(Debug)]
pub struct CommandReader<R> {
    reader: csv::Reader<R>,
    headers: StringRecord,
    record: StringRecord,
}

impl CommandReader<File> {
    /// Open a command script
    ///
    /// The CSV reader is configured to:
    /// - Trim whitespace from all fields
    /// - Allow rows with fewer columns than the header
    /// - Use an 8KB buffer
    ///
    /// # Errors
    ///
    /// * `FileNotFound` if the path does not exist
    /// * `IoError` if the file cannot be opened for another reason
    /// * `ParseError` if the header row cannot be read
    pub fn new(path: &Path) -> Result<Self, VendingError> {
        let file = File::open(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => VendingError::FileNotFound {
                path: path.display().to_string(),
            },
            _ => VendingError::IoError {
                message: format!("Failed to open file '{}': {}", path.display(), e),
            },
        })?;

        Self::from_reader(file)
    }
}

impl<R: Read> CommandReader<R> {
    /// Read commands from any byte source
    pub fn from_reader(source: R) -> Result<Self, VendingError> {
        let mut reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .buffer_capacity(8 * 1024)
            .from_reader(source);

        let headers = reader.headers()?.clone();

        Ok(CommandReader {
            reader,
            headers,
            record: StringRecord::new(),
        })
    }

    fn line(&self) -> Option<u64> {
        self.record.position().map(|pos| pos.line())
    }
}

impl<R: Read> Iterator for CommandReader<R> {
    type Item = Result<Command, VendingError>;

    /// Read and convert the next row
    ///
    /// # Returns
    ///
    /// * `Some(Ok(Command))` - Successfully parsed row
    /// * `Some(Err(VendingError::ParseError))` - Malformed row, with its line number
    /// * `None` - End of input
    fn next(&mut self) -> Option<Self::Item> {
        match self.reader.read_record(&mut self.record) {
            Ok(false) => None,
            Ok(true) => {
                let line = self.line();
                let converted = self
                    .record
                    .deserialize::<CsvRecord>(Some(&self.headers))
                    .map_err(VendingError::from)
                    .and_then(convert_csv_record)
                    .map_err(|e| match e {
                        VendingError::ParseError { line: None, message } => {
                            VendingError::ParseError { line, message }
                        }
                        VendingError::ParseError { .. } => e,
                        other => VendingError::ParseError {
                            line,
                            message: other.to_string(),
                        },
                    });
                Some(converted)
            }
            Err(e) => Some(Err(VendingError::from(e))),
        }
    }
}
