//! One-shot person reports over example data.
//!
//! Loads the seed registry, serves its persons through the query port and
//! runs them through the pipeline: JSON output is a listing page, CSV and
//! spreadsheet output is a filtered export.

mod config;

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use cap_std::{ambient_authority, fs::Dir};
use mockable::Clock;
use pagination::PageRequest;
use thiserror::Error;
use tracing::info;

pub use self::config::ReportSettings;
use crate::domain::ports::{PersonsQuery, PersonsQueryError};
use crate::domain::{ExportError, ExportFormat, ListingQuery, PersonsPipeline, SearchQuery};
use crate::example_data::{ExampleDataError, ExamplePersonsQuery, load_registry};
use crate::outbound::export::{CsvPersonsExporter, SpreadsheetPersonsExporter};

/// Errors returned while producing or writing a report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    /// A configured value could not be interpreted.
    #[error("invalid value {value:?} for setting `{setting}`")]
    InvalidSetting {
        /// Setting name.
        setting: String,
        /// Rejected value.
        value: String,
    },
    /// Example data could not be loaded.
    #[error(transparent)]
    ExampleData(#[from] ExampleDataError),
    /// The persons query failed.
    #[error(transparent)]
    Query(#[from] PersonsQueryError),
    /// Rendering the export failed.
    #[error(transparent)]
    Export(#[from] ExportError),
    /// The listing page could not be serialised.
    #[error("failed to serialise listing: {message}")]
    Json {
        /// Serializer detail.
        message: String,
    },
    /// The report could not be written.
    #[error("failed to write report to {path}: {message}")]
    Io {
        /// Destination path.
        path: PathBuf,
        /// Underlying I/O error.
        message: String,
    },
}

impl ReportError {
    /// Build a [`ReportError::InvalidSetting`].
    #[must_use]
    pub fn invalid_setting(setting: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidSetting {
            setting: setting.into(),
            value: value.into(),
        }
    }

    fn io(path: &Path, error: impl fmt::Display) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            message: error.to_string(),
        }
    }
}

/// What a report run produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    /// One listing page as JSON.
    Json,
    /// A filtered export file.
    Export(ExportFormat),
}

impl ReportFormat {
    /// Suggested download name.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Json => "persons.json",
            Self::Export(format) => format.file_name(),
        }
    }

    /// MIME type of the payload.
    #[must_use]
    pub const fn content_type(self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Export(format) => format.content_type(),
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => f.write_str("json"),
            Self::Export(format) => fmt::Display::fmt(format, f),
        }
    }
}

impl FromStr for ReportFormat {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("json") {
            return Ok(Self::Json);
        }
        ExportFormat::from_str(s)
            .map(Self::Export)
            .map_err(|_| ReportError::invalid_setting("format", s))
    }
}

/// Bytes produced by [`run_report`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOutput {
    format: ReportFormat,
    bytes: Vec<u8>,
}

impl ReportOutput {
    /// Format of the payload.
    #[must_use]
    pub const fn format(&self) -> ReportFormat {
        self.format
    }

    /// Payload bytes.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consume the output, returning its payload.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// Pipeline wired to the CSV and spreadsheet adapters.
#[must_use]
pub fn default_pipeline() -> PersonsPipeline {
    PersonsPipeline::new(
        Arc::new(CsvPersonsExporter),
        Arc::new(SpreadsheetPersonsExporter::default()),
    )
}

/// Produce the report described by `settings`, computing ages from `clock`.
///
/// # Errors
///
/// Returns [`ReportError`] for malformed settings, unreadable example data or
/// a failed export. Unknown search or sort fields are not errors; they leave
/// the records unfiltered or unsorted.
///
/// # Examples
///
/// ```rust,no_run
/// use std::ffi::OsString;
/// use std::sync::Arc;
///
/// use backend::report::{ReportSettings, run_report};
/// use mockable::DefaultClock;
/// use ortho_config::OrthoConfig;
///
/// let settings = ReportSettings::load_from_iter([OsString::from("persons-report")])?;
/// let output = run_report(&settings, Arc::new(DefaultClock))?;
/// assert!(!output.bytes().is_empty());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn run_report(
    settings: &ReportSettings,
    clock: Arc<dyn Clock>,
) -> Result<ReportOutput, ReportError> {
    let format = settings.format()?;
    let sort_order = settings.sort_order()?;

    let registry = load_registry(&settings.registry_path())?;
    let query = ExamplePersonsQuery::from_seed(&registry, settings.seed_name(), clock)?;
    let records = query.list_person_records()?;

    let search = SearchQuery {
        search_by: settings.search_by.clone(),
        search: settings.search.clone(),
    };
    let bytes = match format {
        ReportFormat::Json => {
            let listing = ListingQuery {
                search,
                sort_by: Some(settings.sort_by().to_owned()),
                sort_order,
                page: PageRequest::new(settings.page, settings.page_size()),
            };
            let page = PersonsPipeline::list(records, &listing);
            serde_json::to_vec_pretty(&page).map_err(|error| ReportError::Json {
                message: error.to_string(),
            })?
        }
        ReportFormat::Export(export) => default_pipeline().report(records, &search, export)?,
    };

    info!(
        seed_key = settings.seed_name(),
        format = %format,
        content_type = format.content_type(),
        bytes = bytes.len(),
        "report generated"
    );
    Ok(ReportOutput { format, bytes })
}

/// Write `output` to `path`, creating missing parent directories.
///
/// # Errors
///
/// Returns [`ReportError::Io`] when the directory or file cannot be written.
pub fn write_report(output: &ReportOutput, path: &Path) -> Result<(), ReportError> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path
        .file_name()
        .ok_or_else(|| ReportError::io(path, "output path must be a file"))?;
    Dir::create_ambient_dir_all(parent, ambient_authority())
        .map_err(|error| ReportError::io(path, error))?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority())
        .map_err(|error| ReportError::io(path, error))?;
    dir.write(Path::new(file_name), output.bytes())
        .map_err(|error| ReportError::io(path, error))
}
