//! Spreadsheet (`.xlsx`) rendering of person records.

use rust_xlsxwriter::{Color, Format, FormatPattern, Workbook, Worksheet, XlsxError};

use crate::domain::ports::PersonsExporter;
use crate::domain::{EXPORT_COLUMNS, ExportCell, ExportError, ExportFormat, PersonRecord};

/// Name of the single worksheet.
pub const SHEET_NAME: &str = "Persons";

/// Data rows a worksheet can hold below its header row.
pub const SPREADSHEET_MAX_DATA_ROWS: usize = 1_048_575;

const HEADER_FILL: Color = Color::RGB(0x00D3_D3D3);

/// Workbook export with one sheet and a styled header row.
///
/// Ages are written as numeric cells and the news letter flag as a native
/// boolean; dates are `yyyy-MM-dd` text. Columns are auto-fitted.
#[derive(Debug, Clone, Copy)]
pub struct SpreadsheetPersonsExporter {
    max_rows: usize,
}

impl SpreadsheetPersonsExporter {
    /// Exporter accepting up to `max_rows` data rows, capped at the
    /// worksheet limit.
    #[must_use]
    pub fn with_max_rows(max_rows: usize) -> Self {
        Self {
            max_rows: max_rows.min(SPREADSHEET_MAX_DATA_ROWS),
        }
    }
}

impl Default for SpreadsheetPersonsExporter {
    fn default() -> Self {
        Self {
            max_rows: SPREADSHEET_MAX_DATA_ROWS,
        }
    }
}

impl PersonsExporter for SpreadsheetPersonsExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Spreadsheet
    }

    fn export(&self, records: &[PersonRecord]) -> Result<Vec<u8>, ExportError> {
        if records.len() > self.max_rows {
            return Err(ExportError::RowLimitExceeded {
                rows: records.len(),
                limit: self.max_rows,
            });
        }

        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        fill_worksheet(worksheet, records).map_err(ExportError::serialization)?;
        workbook.save_to_buffer().map_err(ExportError::serialization)
    }
}

fn fill_worksheet(worksheet: &mut Worksheet, records: &[PersonRecord]) -> Result<(), XlsxError> {
    worksheet.set_name(SHEET_NAME)?;

    let header = Format::new()
        .set_bold()
        .set_pattern(FormatPattern::Solid)
        .set_background_color(HEADER_FILL);
    for (col, column) in (0_u16..).zip(EXPORT_COLUMNS) {
        worksheet.write_string_with_format(0, col, column.header(), &header)?;
    }

    for (row, record) in (1_u32..).zip(records) {
        for (col, column) in (0_u16..).zip(EXPORT_COLUMNS) {
            match column.cell(record) {
                ExportCell::Text(text) => {
                    worksheet.write_string(row, col, text)?;
                }
                ExportCell::Number(value) => {
                    worksheet.write_number(row, col, f64::from(value))?;
                }
                ExportCell::Boolean(value) => {
                    worksheet.write_boolean(row, col, value)?;
                }
                ExportCell::Empty => {}
            }
        }
    }

    worksheet.autofit();
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use calamine::{Data, Reader, Xlsx};
    use chrono::{NaiveDate, TimeZone, Utc};
    use rstest::rstest;

    use super::*;
    use crate::domain::{Gender, Person, PersonId};
    use crate::outbound::export::CsvPersonsExporter;
    use crate::test_support::sample_records;

    const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

    fn record(name: &str) -> PersonRecord {
        let person = Person::builder(PersonId::random(), name)
            .date_of_birth(NaiveDate::from_ymd_opt(1999, 4, 20).expect("valid date"))
            .gender(Gender::Other)
            .receive_news_letters(true)
            .build();
        let now = Utc
            .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
            .single()
            .expect("valid time");
        PersonRecord::materialize(&person, &[], now)
    }

    #[rstest]
    fn empty_export_is_a_workbook() {
        let bytes = SpreadsheetPersonsExporter::default()
            .export(&[])
            .expect("header-only workbook");

        assert!(bytes.starts_with(ZIP_MAGIC));
    }

    #[rstest]
    fn exports_records_into_a_workbook() {
        let records = vec![record("Mary"), record("Smith")];

        let bytes = SpreadsheetPersonsExporter::default()
            .export(&records)
            .expect("workbook");

        assert!(bytes.starts_with(ZIP_MAGIC));
        assert!(
            bytes
                .windows(b"xl/worksheets/sheet1.xml".len())
                .any(|w| w == b"xl/worksheets/sheet1.xml")
        );
    }

    fn read_rows(bytes: Vec<u8>) -> (Vec<String>, Vec<Vec<Data>>) {
        let mut workbook = Xlsx::new(Cursor::new(bytes)).expect("workbook opens");
        let sheet_names = workbook.sheet_names();
        let range = workbook.worksheet_range(SHEET_NAME).expect("persons sheet");
        let rows = range.rows().map(<[Data]>::to_vec).collect();
        (sheet_names, rows)
    }

    fn cell_text(cell: &Data) -> String {
        match cell {
            Data::String(text) => text.clone(),
            Data::Float(value) => value.to_string(),
            Data::Int(value) => value.to_string(),
            Data::Bool(value) => value.to_string(),
            Data::Empty => String::new(),
            other => panic!("unexpected cell {other:?}"),
        }
    }

    #[rstest]
    fn workbook_holds_one_persons_sheet_with_typed_cells() {
        let records = sample_records();

        let bytes = SpreadsheetPersonsExporter::default()
            .export(&records)
            .expect("workbook");
        let (sheet_names, rows) = read_rows(bytes);

        assert_eq!(sheet_names, [SHEET_NAME]);
        assert_eq!(rows.len(), records.len() + 1);
        let header: Vec<String> = rows
            .first()
            .expect("header row")
            .iter()
            .map(cell_text)
            .collect();
        assert_eq!(
            header,
            [
                "PersonName",
                "Email",
                "DateOfBirth",
                "Age",
                "Gender",
                "Country",
                "Address",
                "ReceiveNewsLetters"
            ]
        );
        assert_eq!(
            rows.get(1).expect("first person"),
            &vec![
                Data::String("Mary".to_owned()),
                Data::String("mary@example.com".to_owned()),
                Data::String("2006-08-16".to_owned()),
                Data::Float(18.0),
                Data::String("Female".to_owned()),
                Data::String("India".to_owned()),
                Data::String("1 Main Street".to_owned()),
                Data::Bool(true),
            ]
        );
        let smith = rows.get(2).expect("second person");
        assert_eq!(smith.get(5), Some(&Data::Empty));
        assert_eq!(smith.get(7), Some(&Data::Bool(false)));
    }

    #[rstest]
    fn workbook_cells_match_csv_fields() {
        let records = sample_records();
        let workbook = SpreadsheetPersonsExporter::default()
            .export(&records)
            .expect("workbook");
        let csv = CsvPersonsExporter.export(&records).expect("csv");

        let (_, rows) = read_rows(workbook);
        let workbook_rows: Vec<Vec<String>> = rows
            .iter()
            .map(|row| row.iter().map(cell_text).collect())
            .collect();
        let csv_rows: Vec<Vec<String>> = ::csv::ReaderBuilder::new()
            .has_headers(false)
            .from_reader(csv.as_slice())
            .records()
            .map(|row| row.expect("csv row").iter().map(str::to_owned).collect())
            .collect();

        assert_eq!(workbook_rows, csv_rows);
    }

    #[rstest]
    #[case(2, true)]
    #[case(3, false)]
    fn enforces_row_limit(#[case] limit: usize, #[case] exceeds: bool) {
        let records = vec![record("a"), record("b"), record("c")];

        let result = SpreadsheetPersonsExporter::with_max_rows(limit).export(&records);

        if exceeds {
            assert_eq!(result, Err(ExportError::RowLimitExceeded { rows: 3, limit }));
        } else {
            assert!(result.is_ok());
        }
    }

    #[rstest]
    fn reports_spreadsheet_format() {
        assert_eq!(
            SpreadsheetPersonsExporter::default().format(),
            ExportFormat::Spreadsheet
        );
    }
}
