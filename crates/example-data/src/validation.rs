//! Field validation mirroring the stored person limits.
//!
//! # Validation Rules
//!
//! - Person name: 1 to [`PERSON_NAME_MAX`] characters, not whitespace-only
//! - Email: at most [`EMAIL_MAX`] characters
//! - Address: at most [`ADDRESS_MAX`] characters

/// Maximum allowed length for a person name.
pub const PERSON_NAME_MAX: usize = 40;

/// Maximum allowed length for an email address.
pub const EMAIL_MAX: usize = 40;

/// Maximum allowed length for a postal address.
pub const ADDRESS_MAX: usize = 200;

/// Validates a person name against the stored limits.
///
/// # Examples
///
/// ```
/// use example_data::is_valid_person_name;
///
/// assert!(is_valid_person_name("Ada Lovelace"));
/// assert!(is_valid_person_name("O'Brien"));
/// assert!(!is_valid_person_name("   "));
/// assert!(!is_valid_person_name(&"x".repeat(41)));
/// ```
#[must_use]
pub fn is_valid_person_name(name: &str) -> bool {
    !name.trim().is_empty() && name.chars().count() <= PERSON_NAME_MAX
}

/// Returns `true` if `value` is at most `max` characters long.
#[must_use]
pub(crate) fn fits(value: &str, max: usize) -> bool {
    value.chars().count() <= max
}

/// Truncates `value` to at most `max` characters, preserving whole
/// characters.
#[must_use]
pub(crate) fn truncate_chars(value: &str, max: usize) -> String {
    value.chars().take(max).collect()
}
