//! Tabular export adapters.
//!
//! Both adapters draw cells from `EXPORT_COLUMNS`, so the two formats always
//! share column order and header names.

mod csv;
mod spreadsheet;

pub use self::csv::CsvPersonsExporter;
pub use self::spreadsheet::{SHEET_NAME, SPREADSHEET_MAX_DATA_ROWS, SpreadsheetPersonsExporter};
