//! Report configuration loaded via OrthoConfig.

use std::path::PathBuf;
use std::str::FromStr;

use ortho_config::OrthoConfig;
use pagination::DEFAULT_PAGE_SIZE;
use serde::Deserialize;

use super::{ReportError, ReportFormat};
use crate::domain::SortOrder;

const DEFAULT_SEED_NAME: &str = "mossy-owl";
const DEFAULT_SORT_FIELD: &str = "name";

fn default_registry_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join("example-data")
        .join("seeds.json")
}

/// Values controlling one `persons-report` run.
///
/// Every field may come from the command line, a `PERSONS_REPORT_*`
/// environment variable or a configuration file.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "PERSONS_REPORT")]
pub struct ReportSettings {
    /// Optional registry path override.
    pub registry_path: Option<PathBuf>,
    /// Seed name to generate persons from.
    pub seed_name: Option<String>,
    /// Field to search.
    pub search_by: Option<String>,
    /// Substring to search for.
    pub search: Option<String>,
    /// Field to order listings by.
    pub sort_by: Option<String>,
    /// `asc` or `desc`.
    pub sort_order: Option<String>,
    /// One-based page number for listings. Not validated here.
    #[ortho_config(default = 1)]
    pub page: i64,
    /// Records per listing page.
    pub page_size: Option<i64>,
    /// `json`, `csv` or `xlsx`.
    pub format: Option<String>,
    /// File to write; standard output when absent.
    pub output: Option<PathBuf>,
}

impl ReportSettings {
    /// Return the configured registry path, falling back to the bundled
    /// fixture.
    #[must_use]
    pub fn registry_path(&self) -> PathBuf {
        self.registry_path
            .clone()
            .unwrap_or_else(default_registry_path)
    }

    /// Return the configured seed name, falling back to the default.
    #[must_use]
    pub fn seed_name(&self) -> &str {
        self.seed_name.as_deref().unwrap_or(DEFAULT_SEED_NAME)
    }

    /// Return the configured sort field, falling back to `name`.
    #[must_use]
    pub fn sort_by(&self) -> &str {
        self.sort_by.as_deref().unwrap_or(DEFAULT_SORT_FIELD)
    }

    /// Parse the configured sort order, defaulting to ascending.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::InvalidSetting`] for unrecognised values.
    pub fn sort_order(&self) -> Result<SortOrder, ReportError> {
        self.sort_order.as_deref().map_or(Ok(SortOrder::default()), |value| {
            SortOrder::from_str(value)
                .map_err(|_| ReportError::invalid_setting("sort_order", value))
        })
    }

    /// Requested page size, defaulting to the shared page size.
    #[must_use]
    pub fn page_size(&self) -> i64 {
        self.page_size.unwrap_or_else(|| {
            i64::try_from(DEFAULT_PAGE_SIZE).unwrap_or(i64::MAX)
        })
    }

    /// Parse the configured output format, defaulting to JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::InvalidSetting`] for unrecognised values.
    pub fn format(&self) -> Result<ReportFormat, ReportError> {
        self.format
            .as_deref()
            .map_or(Ok(ReportFormat::Json), ReportFormat::from_str)
    }
}
