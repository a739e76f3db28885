//! Domain primitives and the person query pipeline.
//!
//! Purpose: define the person record, the field registry that makes records
//! addressable by name, and the filter/sort/export engines built on it. Keep
//! types immutable and document invariants in each type's Rustdoc.
//!
//! Public surface:
//! - Person / PersonRecord — stored entity and pipeline record.
//! - FieldRegistry / Accessor — runtime field-name resolution.
//! - filter_records / sort_records — the two engines.
//! - PersonsPipeline — listing and report compositions.
//! - ExportColumn / ExportFormat — fixed export layout.

pub mod export;
pub mod fields;
mod filter;
pub mod person;
mod persons_pipeline;
pub mod ports;
mod sort;

pub use self::export::{
    EXPORT_COLUMNS, EXPORT_DATE_FORMAT, ExportCell, ExportColumn, ExportError, ExportFormat,
    ParseExportFormatError,
};
pub use self::fields::{
    Accessor, FieldDescriptor, FieldKind, FieldRegistry, PersonField, SEARCH_DATE_FORMAT,
    UnknownFieldError,
};
pub use self::filter::filter_records;
pub use self::person::{
    Country, CountryId, Gender, ParseGenderError, ParseIdError, Person, PersonBuilder, PersonId,
    PersonRecord, age_in_years,
};
pub use self::persons_pipeline::{ListingQuery, PersonsPipeline, SearchQuery};
pub use self::sort::{ParseSortOrderError, SortOrder, sort_records};
