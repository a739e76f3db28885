//! Single-field substring filter over person records.

use tracing::{debug, warn};

use super::fields::FieldRegistry;
use super::person::PersonRecord;

/// Keep the records whose `field_name` text contains `needle`, ignoring case.
///
/// An absent or blank field name, or an absent or empty needle, means "no
/// filter" and returns `records` unchanged. A field name the registry does
/// not know is ignored with a warning. Matching is ordinal over lowercased
/// code points and preserves input order.
///
/// # Examples
/// ```
/// use backend::domain::{Person, PersonId, PersonRecord, filter_records};
/// use chrono::Utc;
///
/// let now = Utc::now();
/// let records: Vec<PersonRecord> = ["Mary", "Smith", "rahMAn"]
///     .into_iter()
///     .map(|name| Person::builder(PersonId::random(), name).build())
///     .map(|person| PersonRecord::materialize(&person, &[], now))
///     .collect();
///
/// let names: Vec<String> = filter_records(records, Some("name"), Some("ma"))
///     .iter()
///     .map(|r| r.name().to_owned())
///     .collect();
/// assert_eq!(names, ["Mary", "rahMAn"]);
/// ```
#[must_use]
pub fn filter_records(
    records: Vec<PersonRecord>,
    field_name: Option<&str>,
    needle: Option<&str>,
) -> Vec<PersonRecord> {
    let Some(field) = field_name.filter(|name| !name.trim().is_empty()) else {
        return records;
    };
    let Some(search) = needle.filter(|text| !text.is_empty()) else {
        return records;
    };
    let accessor = match FieldRegistry::global().resolve(field) {
        Ok(accessor) => accessor,
        Err(error) => {
            warn!(field = %error.name, "ignoring filter on unknown field");
            return records;
        }
    };

    let lowered = search.to_lowercase();
    let input = records.len();
    let kept: Vec<PersonRecord> = records
        .into_iter()
        .filter(|record| {
            accessor
                .search_text(record)
                .to_lowercase()
                .contains(&lowered)
        })
        .collect();

    debug!(
        field = accessor.descriptor().name(),
        input,
        output = kept.len(),
        "filtered person records"
    );
    kept
}
