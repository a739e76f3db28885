//! Person query-and-export pipeline.
//!
//! Composes the filter and sort engines with pagination for listings and with
//! an exporter for reports. The pipeline keeps no state between calls, so a
//! single instance may serve concurrent requests over different inputs.

use std::fmt;
use std::sync::Arc;

use pagination::{Page, PageRequest, paginate};
use tracing::info;

use super::export::{ExportError, ExportFormat};
use super::filter::filter_records;
use super::person::PersonRecord;
use super::ports::PersonsExporter;
use super::sort::{SortOrder, sort_records};

/// Field/substring pair selecting which records to keep.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    /// Field to search; absent means no filter.
    pub search_by: Option<String>,
    /// Substring to look for; absent or empty means no filter.
    pub search: Option<String>,
}

impl SearchQuery {
    /// Search `field` for `text`.
    #[must_use]
    pub fn new(field: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            search_by: Some(field.into()),
            search: Some(text.into()),
        }
    }
}

/// Everything a listing request can ask for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingQuery {
    /// Filter applied first.
    pub search: SearchQuery,
    /// Field to order by; absent keeps the filtered order.
    pub sort_by: Option<String>,
    /// Direction used when `sort_by` is present.
    pub sort_order: SortOrder,
    /// Page to return.
    pub page: PageRequest,
}

/// Filter → sort → paginate for listings, filter → export for reports.
///
/// # Examples
/// ```
/// use backend::domain::{
///     ListingQuery, Person, PersonId, PersonRecord, PersonsPipeline, SearchQuery, SortOrder,
/// };
/// use chrono::Utc;
/// use pagination::PageRequest;
///
/// let now = Utc::now();
/// let records: Vec<PersonRecord> = ["Mary", "Smith", "rahMAn"]
///     .into_iter()
///     .map(|name| Person::builder(PersonId::random(), name).build())
///     .map(|person| PersonRecord::materialize(&person, &[], now))
///     .collect();
/// let query = ListingQuery {
///     search: SearchQuery::new("name", "ma"),
///     sort_by: Some("name".to_owned()),
///     sort_order: SortOrder::Descending,
///     page: PageRequest::new(1, 1),
/// };
///
/// let page = PersonsPipeline::list(records, &query);
/// assert_eq!(page.total_pages(), 2);
/// assert_eq!(page.items().first().map(PersonRecord::name), Some("rahMAn"));
/// ```
#[derive(Clone)]
pub struct PersonsPipeline {
    csv: Arc<dyn PersonsExporter>,
    spreadsheet: Arc<dyn PersonsExporter>,
}

impl PersonsPipeline {
    /// Build a pipeline around the two export adapters.
    #[must_use]
    pub fn new(csv: Arc<dyn PersonsExporter>, spreadsheet: Arc<dyn PersonsExporter>) -> Self {
        Self { csv, spreadsheet }
    }

    /// Records whose `search_by` text contains `search`, ignoring case.
    #[must_use]
    pub fn get_filtered(
        records: Vec<PersonRecord>,
        search_by: Option<&str>,
        search: Option<&str>,
    ) -> Vec<PersonRecord> {
        filter_records(records, search_by, search)
    }

    /// Records stably ordered by `sort_by`.
    #[must_use]
    pub fn get_sorted(
        records: Vec<PersonRecord>,
        sort_by: Option<&str>,
        order: SortOrder,
    ) -> Vec<PersonRecord> {
        sort_records(records, sort_by, order)
    }

    /// One page of `records`; out-of-range parameters are corrected.
    #[must_use]
    pub fn get_page(records: Vec<PersonRecord>, page: i64, page_size: i64) -> Page<PersonRecord> {
        paginate(records, PageRequest::new(page, page_size))
    }

    /// Render `records` as CSV.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError`] when the CSV writer fails.
    pub fn export_csv(&self, records: &[PersonRecord]) -> Result<Vec<u8>, ExportError> {
        self.csv.export(records)
    }

    /// Render `records` as a spreadsheet workbook.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError`] when the workbook cannot be written.
    pub fn export_spreadsheet(&self, records: &[PersonRecord]) -> Result<Vec<u8>, ExportError> {
        self.spreadsheet.export(records)
    }

    /// Filter, sort and paginate `records` for a listing.
    #[must_use]
    pub fn list(records: Vec<PersonRecord>, query: &ListingQuery) -> Page<PersonRecord> {
        let filtered = Self::get_filtered(
            records,
            query.search.search_by.as_deref(),
            query.search.search.as_deref(),
        );
        let sorted = Self::get_sorted(filtered, query.sort_by.as_deref(), query.sort_order);
        let page = paginate(sorted, query.page);

        info!(
            page = page.page_number(),
            page_size = page.page_size(),
            total_items = page.total_items(),
            "listed person records"
        );
        page
    }

    /// Filter `records` and render them in `format`.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError`] when the exporter fails.
    pub fn report(
        &self,
        records: Vec<PersonRecord>,
        query: &SearchQuery,
        format: ExportFormat,
    ) -> Result<Vec<u8>, ExportError> {
        let filtered = Self::get_filtered(
            records,
            query.search_by.as_deref(),
            query.search.as_deref(),
        );
        let bytes = match format {
            ExportFormat::Csv => self.export_csv(&filtered)?,
            ExportFormat::Spreadsheet => self.export_spreadsheet(&filtered)?,
        };

        info!(
            format = %format,
            rows = filtered.len(),
            bytes = bytes.len(),
            "exported person records"
        );
        Ok(bytes)
    }
}

impl fmt::Debug for PersonsPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PersonsPipeline")
            .field("csv", &self.csv.format())
            .field("spreadsheet", &self.spreadsheet.format())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use chrono::{NaiveDate, TimeZone, Utc};
    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::{Person, PersonId};

    /// Records the rows it was asked to export.
    struct RecordingExporter {
        seen: Mutex<Vec<String>>,
        format: ExportFormat,
    }

    impl RecordingExporter {
        fn new(format: ExportFormat) -> Self {
            Self {
                seen: Mutex::new(Vec::new()),
                format,
            }
        }

        fn seen(&self) -> Vec<String> {
            self.seen.lock().expect("exporter mutex").clone()
        }
    }

    impl PersonsExporter for RecordingExporter {
        fn format(&self) -> ExportFormat {
            self.format
        }

        fn export(&self, records: &[PersonRecord]) -> Result<Vec<u8>, ExportError> {
            let names: Vec<String> = records.iter().map(|r| r.name().to_owned()).collect();
            let joined = names.join(",");
            *self.seen.lock().expect("exporter mutex") = names;
            Ok(joined.into_bytes())
        }
    }

    struct FailingExporter;

    impl PersonsExporter for FailingExporter {
        fn format(&self) -> ExportFormat {
            ExportFormat::Spreadsheet
        }

        fn export(&self, _records: &[PersonRecord]) -> Result<Vec<u8>, ExportError> {
            Err(ExportError::serialization("disk full"))
        }
    }

    fn record(name: &str, dob: (i32, u32, u32)) -> PersonRecord {
        let (y, m, d) = dob;
        let person = Person::builder(PersonId::random(), name)
            .date_of_birth(NaiveDate::from_ymd_opt(y, m, d).expect("valid date"))
            .build();
        let now = Utc
            .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
            .single()
            .expect("valid time");
        PersonRecord::materialize(&person, &[], now)
    }

    #[fixture]
    fn people() -> Vec<PersonRecord> {
        vec![
            record("Mary", (2010, 4, 20)),
            record("Smith", (1999, 4, 20)),
            record("rahMAn", (1998, 4, 20)),
        ]
    }

    fn names(records: &[PersonRecord]) -> Vec<&str> {
        records.iter().map(PersonRecord::name).collect()
    }

    #[rstest]
    fn composes_filter_sort_and_page(people: Vec<PersonRecord>) {
        let filtered = PersonsPipeline::get_filtered(people, Some("name"), Some("ma"));
        assert_eq!(names(&filtered), ["Mary", "rahMAn"]);

        let sorted = PersonsPipeline::get_sorted(filtered, Some("name"), SortOrder::Descending);
        assert_eq!(names(&sorted), ["rahMAn", "Mary"]);

        let page = PersonsPipeline::get_page(sorted, 1, 1);
        assert_eq!(names(page.items()), ["rahMAn"]);
        assert_eq!(page.total_pages(), 2);
        assert_eq!(page.total_items(), 2);
    }

    #[rstest]
    fn list_with_default_query_returns_first_page_unchanged(people: Vec<PersonRecord>) {
        let expected = people.clone();
        let page = PersonsPipeline::list(people, &ListingQuery::default());

        assert_eq!(page.items(), expected.as_slice());
        assert_eq!(page.page_number(), 1);
        assert_eq!(page.total_pages(), 1);
    }

    #[rstest]
    fn get_page_corrects_invalid_parameters(people: Vec<PersonRecord>) {
        let page = PersonsPipeline::get_page(people, 0, -5);

        assert_eq!(page.page_number(), 1);
        assert_eq!(page.page_size(), 1);
        assert_eq!(page.total_pages(), 3);
    }

    #[rstest]
    #[case(ExportFormat::Csv)]
    #[case(ExportFormat::Spreadsheet)]
    fn report_exports_only_filtered_records(
        people: Vec<PersonRecord>,
        #[case] format: ExportFormat,
    ) {
        let csv = Arc::new(RecordingExporter::new(ExportFormat::Csv));
        let spreadsheet = Arc::new(RecordingExporter::new(ExportFormat::Spreadsheet));
        let pipeline = PersonsPipeline::new(csv.clone(), spreadsheet.clone());

        let bytes = pipeline
            .report(people, &SearchQuery::new("dateOfBirth", "1999"), format)
            .expect("report succeeds");

        assert_eq!(bytes, b"Smith".to_vec());
        let (used, unused) = match format {
            ExportFormat::Csv => (csv, spreadsheet),
            ExportFormat::Spreadsheet => (spreadsheet, csv),
        };
        assert_eq!(used.seen(), ["Smith"]);
        assert!(unused.seen().is_empty());
    }

    #[rstest]
    fn report_propagates_serialization_failures(people: Vec<PersonRecord>) {
        let pipeline = PersonsPipeline::new(
            Arc::new(RecordingExporter::new(ExportFormat::Csv)),
            Arc::new(FailingExporter),
        );

        let result = pipeline.report(people, &SearchQuery::default(), ExportFormat::Spreadsheet);

        assert_eq!(
            result,
            Err(ExportError::Serialization {
                message: "disk full".to_owned()
            })
        );
    }
}
