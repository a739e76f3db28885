//! Behaviour tests for the person query pipeline.
//!
//! Scenarios run the filter, sort and pagination engines and both export
//! adapters over the shared sample persons.

#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]

use std::io::Cursor;

use backend::domain::ports::PersonsQuery;
use backend::domain::{
    EXPORT_COLUMNS, ExportError, ExportFormat, PersonRecord, PersonsPipeline, SearchQuery,
    SortOrder,
};
use backend::outbound::export::SHEET_NAME;
use backend::report::default_pipeline;
use backend::test_support::sample_query;
use calamine::{Data, Reader, Xlsx};
use pagination::Page;
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::{ScenarioState, given, scenario, then, when};

#[derive(Default, ScenarioState)]
struct World {
    records: Slot<Vec<PersonRecord>>,
    page: Slot<Page<PersonRecord>>,
    export: Slot<Result<Vec<u8>, ExportError>>,
}

impl World {
    fn records(&self) -> Vec<PersonRecord> {
        self.records.get().expect("records should be loaded")
    }

    fn page(&self) -> Page<PersonRecord> {
        self.page.get().expect("a page should be taken")
    }

    fn export_bytes(&self) -> Vec<u8> {
        self.export
            .get()
            .expect("an export should run")
            .expect("export should succeed")
    }
}

fn names(records: &[PersonRecord]) -> Vec<String> {
    records.iter().map(|r| r.name().to_owned()).collect()
}

fn split_names(list: &str) -> Vec<String> {
    list.split(',').map(|name| name.trim().to_owned()).collect()
}

#[fixture]
fn world() -> World {
    World::default()
}

#[given("the sample persons Mary, Smith and rahMAn")]
fn the_sample_persons(world: &World) {
    let records = sample_query()
        .list_person_records()
        .expect("in-memory query succeeds");
    world.records.set(records);
}

#[when("the records are filtered by {field} containing {text}")]
fn the_records_are_filtered(world: &World, field: String, text: String) {
    let filtered = PersonsPipeline::get_filtered(world.records(), Some(&field), Some(&text));
    world.records.set(filtered);
}

#[when("the records are sorted by {field} {order}")]
fn the_records_are_sorted(world: &World, field: String, order: SortOrder) {
    let sorted = PersonsPipeline::get_sorted(world.records(), Some(&field), order);
    world.records.set(sorted);
}

#[when("page {page} of size {size} is taken")]
fn a_page_is_taken(world: &World, page: i64, size: i64) {
    world
        .page
        .set(PersonsPipeline::get_page(world.records(), page, size));
}

#[when("the persons with {field} containing {text} are exported as {format}")]
fn the_persons_are_exported(world: &World, field: String, text: String, format: ExportFormat) {
    let query = SearchQuery::new(field, text);
    let result = default_pipeline().report(world.records(), &query, format);
    world.export.set(result);
}

#[then("the remaining names are {list}")]
fn the_remaining_names_are(world: &World, list: String) {
    assert_eq!(names(&world.records()), split_names(&list));
}

#[then("the page holds {list}")]
fn the_page_holds(world: &World, list: String) {
    assert_eq!(names(world.page().items()), split_names(&list));
}

#[then("the page reports {pages} total pages")]
fn the_page_reports_total_pages(world: &World, pages: usize) {
    assert_eq!(world.page().total_pages(), pages);
}

#[then("the page number is {number}")]
fn the_page_number_is(world: &World, number: usize) {
    assert_eq!(world.page().page_number(), number);
}

#[then("the page size is {size}")]
fn the_page_size_is(world: &World, size: usize) {
    assert_eq!(world.page().page_size(), size);
}

#[then("{name} is {age} years old")]
fn person_is_years_old(world: &World, name: String, age: u32) {
    let records = world.records();
    let record = records
        .iter()
        .find(|r| r.name() == name)
        .expect("person should exist");
    assert_eq!(record.age(), Some(age));
}

#[then("the CSV export holds a header and {rows} data row")]
fn the_csv_export_holds_rows(world: &World, rows: usize) {
    let text = String::from_utf8(world.export_bytes()).expect("utf-8 csv");
    assert_eq!(text.lines().count(), rows + 1);
    assert!(text.starts_with("PersonName,Email,DateOfBirth,Age,Gender,Country,Address,"));
}

#[then("the CSV export mentions {text}")]
fn the_csv_export_mentions(world: &World, text: String) {
    let csv = String::from_utf8(world.export_bytes()).expect("utf-8 csv");
    assert!(csv.contains(&text), "expected {text} in {csv}");
}

#[then("the export is a spreadsheet workbook")]
fn the_export_is_a_workbook(world: &World) {
    let bytes = world.export_bytes();
    assert!(bytes.starts_with(b"PK\x03\x04"));

    let mut workbook = Xlsx::new(Cursor::new(bytes)).expect("workbook opens");
    assert_eq!(workbook.sheet_names(), [SHEET_NAME]);
    let range = workbook.worksheet_range(SHEET_NAME).expect("persons sheet");
    let header: Vec<Data> = range.rows().next().expect("header row").to_vec();
    let expected: Vec<Data> = EXPORT_COLUMNS
        .iter()
        .map(|column| Data::String(column.header().to_owned()))
        .collect();
    assert_eq!(header, expected);
}

#[then("the spreadsheet holds {rows} data rows")]
fn the_spreadsheet_holds_rows(world: &World, rows: usize) {
    let mut workbook = Xlsx::new(Cursor::new(world.export_bytes())).expect("workbook opens");
    let range = workbook.worksheet_range(SHEET_NAME).expect("persons sheet");
    assert_eq!(range.rows().count(), rows + 1);
}

#[scenario(
    path = "tests/features/persons_pipeline.feature",
    name = "Filtering, sorting and paging a listing"
)]
fn filtering_sorting_and_paging(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/persons_pipeline.feature",
    name = "Unknown search fields leave the records unchanged"
)]
fn unknown_search_fields(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/persons_pipeline.feature",
    name = "Dates are searched in their long form"
)]
fn dates_are_searched_in_long_form(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/persons_pipeline.feature",
    name = "Out-of-range page parameters are corrected"
)]
fn out_of_range_page_parameters(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/persons_pipeline.feature",
    name = "Ages are derived from the clock"
)]
fn ages_are_derived_from_the_clock(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/persons_pipeline.feature",
    name = "Exporting filtered persons as CSV"
)]
fn exporting_filtered_persons_as_csv(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/persons_pipeline.feature",
    name = "Exporting persons as a spreadsheet"
)]
fn exporting_persons_as_a_spreadsheet(world: World) {
    let _ = world;
}
