//! CSV rendering of person records.

use ::csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::domain::ports::PersonsExporter;
use crate::domain::{EXPORT_COLUMNS, ExportError, ExportFormat, PersonRecord};

/// Comma-separated export with one header row.
///
/// Fields are trimmed and quoted only when they contain the delimiter, a
/// quote or a line break. Every row, the last included, ends in `\n`.
///
/// # Examples
/// ```
/// use backend::domain::ports::PersonsExporter;
/// use backend::outbound::export::CsvPersonsExporter;
///
/// let bytes = CsvPersonsExporter.export(&[]).expect("header-only export");
/// assert!(bytes.starts_with(b"PersonName,Email,"));
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct CsvPersonsExporter;

impl PersonsExporter for CsvPersonsExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Csv
    }

    fn export(&self, records: &[PersonRecord]) -> Result<Vec<u8>, ExportError> {
        let mut writer = WriterBuilder::new()
            .quote_style(QuoteStyle::Necessary)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(Vec::new());

        writer
            .write_record(EXPORT_COLUMNS.iter().map(|column| column.header()))
            .map_err(ExportError::serialization)?;
        for record in records {
            let row = EXPORT_COLUMNS
                .iter()
                .map(|column| column.cell(record).to_text().trim().to_owned());
            writer
                .write_record(row)
                .map_err(ExportError::serialization)?;
        }

        writer.into_inner().map_err(ExportError::serialization)
    }
}
