//! Stable single-field ordering of person records.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use super::fields::FieldRegistry;
use super::person::PersonRecord;

/// Returned when a string does not name a [`SortOrder`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sort order: {value} (expected asc or desc)")]
pub struct ParseSortOrderError {
    /// The rejected input.
    pub value: String,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Smallest first.
    #[default]
    Ascending,
    /// Largest first.
    Descending,
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Ascending => "ASC",
            Self::Descending => "DESC",
        })
    }
}

impl FromStr for SortOrder {
    type Err = ParseSortOrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Ascending),
            "desc" | "descending" => Ok(Self::Descending),
            _ => Err(ParseSortOrderError {
                value: s.to_owned(),
            }),
        }
    }
}

/// Order `records` by `field_name` in the given direction.
///
/// The sort is stable in both directions: records comparing equal keep their
/// input order. An absent or blank field name returns `records` unchanged; an
/// unknown one is ignored with a warning.
///
/// # Examples
/// ```
/// use backend::domain::{Person, PersonId, PersonRecord, SortOrder, sort_records};
/// use chrono::Utc;
///
/// let now = Utc::now();
/// let records: Vec<PersonRecord> = ["Mary", "rahMAn"]
///     .into_iter()
///     .map(|name| Person::builder(PersonId::random(), name).build())
///     .map(|person| PersonRecord::materialize(&person, &[], now))
///     .collect();
///
/// let sorted = sort_records(records, Some("name"), SortOrder::Descending);
/// assert_eq!(sorted.first().map(PersonRecord::name), Some("rahMAn"));
/// ```
#[must_use]
pub fn sort_records(
    mut records: Vec<PersonRecord>,
    field_name: Option<&str>,
    order: SortOrder,
) -> Vec<PersonRecord> {
    let Some(field) = field_name.filter(|name| !name.trim().is_empty()) else {
        return records;
    };
    let accessor = match FieldRegistry::global().resolve(field) {
        Ok(accessor) => accessor,
        Err(error) => {
            warn!(field = %error.name, "ignoring sort on unknown field");
            return records;
        }
    };

    match order {
        SortOrder::Ascending => records.sort_by(|a, b| accessor.compare(a, b)),
        SortOrder::Descending => records.sort_by(|a, b| accessor.compare(b, a)),
    }

    debug!(
        field = accessor.descriptor().name(),
        order = %order,
        count = records.len(),
        "sorted person records"
    );
    records
}
