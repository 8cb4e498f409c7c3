//! Output module for report tables.
//!
//! A report exposes its column names and its rows as strings through [`CsvReport`];
//! [`write_csv`] serializes them to a file.

/// CSV serialization of report tables
mod csv;

pub use self::csv::write_csv;

/// A table that can be written as CSV: a header line followed by one line per row.
pub trait CsvReport {
	fn headers(&self) -> Vec<&'static str>;

	fn rows(&self) -> Vec<Vec<String>>;
}
