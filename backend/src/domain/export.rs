//! Tabular export layout shared by every export format.
//!
//! Column order and header names are fixed; each adapter only decides how a
//! cell is encoded in its own container.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::person::PersonRecord;

/// Date pattern used in exported files, e.g. `2006-08-16`.
pub const EXPORT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Errors raised while serialising an export.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    /// The output container could not be written.
    #[error("failed to serialise export: {message}")]
    Serialization {
        /// Description of the underlying writer failure.
        message: String,
    },
    /// The record count exceeds what the target format can hold.
    #[error("export of {rows} rows exceeds the format limit of {limit}")]
    RowLimitExceeded {
        /// Number of data rows requested.
        rows: usize,
        /// Maximum number of data rows the format supports.
        limit: usize,
    },
}

impl ExportError {
    /// Build a [`ExportError::Serialization`] from any displayable error.
    #[must_use]
    pub fn serialization(error: impl fmt::Display) -> Self {
        Self::Serialization {
            message: error.to_string(),
        }
    }
}

/// One exported column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportColumn {
    /// Full name.
    PersonName,
    /// Contact email.
    Email,
    /// Date of birth as `yyyy-MM-dd`.
    DateOfBirth,
    /// Derived age.
    Age,
    /// Gender.
    Gender,
    /// Country display name.
    Country,
    /// Postal address.
    Address,
    /// News letter opt-in flag.
    ReceiveNewsLetters,
}

/// Exported columns in output order.
pub const EXPORT_COLUMNS: [ExportColumn; 8] = [
    ExportColumn::PersonName,
    ExportColumn::Email,
    ExportColumn::DateOfBirth,
    ExportColumn::Age,
    ExportColumn::Gender,
    ExportColumn::Country,
    ExportColumn::Address,
    ExportColumn::ReceiveNewsLetters,
];

impl ExportColumn {
    /// Header text written in the first row.
    #[must_use]
    pub const fn header(self) -> &'static str {
        match self {
            Self::PersonName => "PersonName",
            Self::Email => "Email",
            Self::DateOfBirth => "DateOfBirth",
            Self::Age => "Age",
            Self::Gender => "Gender",
            Self::Country => "Country",
            Self::Address => "Address",
            Self::ReceiveNewsLetters => "ReceiveNewsLetters",
        }
    }

    /// Value of this column for `record`.
    #[must_use]
    pub fn cell(self, record: &PersonRecord) -> ExportCell {
        let text = |value: Option<&str>| {
            value.map_or(ExportCell::Empty, |v| ExportCell::Text(v.to_owned()))
        };
        match self {
            Self::PersonName => ExportCell::Text(record.name().to_owned()),
            Self::Email => text(record.email()),
            Self::DateOfBirth => record.date_of_birth().map_or(ExportCell::Empty, |dob| {
                ExportCell::Text(dob.format(EXPORT_DATE_FORMAT).to_string())
            }),
            Self::Age => record.age().map_or(ExportCell::Empty, ExportCell::Number),
            Self::Gender => text(record.gender().map(|g| g.as_str())),
            Self::Country => text(record.country()),
            Self::Address => text(record.address()),
            Self::ReceiveNewsLetters => ExportCell::Boolean(record.receive_news_letters()),
        }
    }
}

/// A typed cell value; adapters choose the native encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportCell {
    /// Text.
    Text(String),
    /// Whole number.
    Number(u32),
    /// Boolean flag.
    Boolean(bool),
    /// No value.
    Empty,
}

impl ExportCell {
    /// Plain-text rendering: numbers in decimal, booleans as `true`/`false`,
    /// empty cells as `""`.
    #[must_use]
    pub fn to_text(&self) -> String {
        match self {
            Self::Text(value) => value.clone(),
            Self::Number(value) => value.to_string(),
            Self::Boolean(value) => value.to_string(),
            Self::Empty => String::new(),
        }
    }
}

/// Returned when a string does not name an [`ExportFormat`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown export format: {value} (expected csv or xlsx)")]
pub struct ParseExportFormatError {
    /// The rejected input.
    pub value: String,
}

/// Supported export containers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    /// Comma-separated values.
    Csv,
    /// Zipped spreadsheet workbook.
    Spreadsheet,
}

impl ExportFormat {
    /// Suggested download file name.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Csv => "persons.csv",
            Self::Spreadsheet => "persons.xlsx",
        }
    }

    /// MIME type of the produced bytes.
    #[must_use]
    pub const fn content_type(self) -> &'static str {
        match self {
            Self::Csv => "text/csv",
            Self::Spreadsheet => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Csv => "csv",
            Self::Spreadsheet => "xlsx",
        })
    }
}

impl FromStr for ExportFormat {
    type Err = ParseExportFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "xlsx" | "spreadsheet" => Ok(Self::Spreadsheet),
            _ => Err(ParseExportFormatError {
                value: s.to_owned(),
            }),
        }
    }
}
