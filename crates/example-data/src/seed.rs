//! Generated person seed types.
//!
//! These are the output types of person generation. They mirror the stored
//! person shape without depending on backend domain types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Gender of a generated person.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GenderSeed {
    /// Male.
    Male,
    /// Female.
    Female,
    /// Any other gender.
    Other,
}

impl GenderSeed {
    /// Every variant, in declaration order.
    pub const ALL: [Self; 3] = [Self::Male, Self::Female, Self::Other];
}

/// A generated example person record.
///
/// # Example
///
/// ```
/// use example_data::{ExamplePersonSeed, GenderSeed};
/// use uuid::Uuid;
///
/// let person = ExamplePersonSeed {
///     id: Uuid::new_v4(),
///     name: "Ada Lovelace".to_owned(),
///     email: "ada.lovelace@example.com".to_owned(),
///     date_of_birth: None,
///     gender: GenderSeed::Female,
///     country_id: None,
///     address: "12 Analytical Row, London".to_owned(),
///     receive_news_letters: true,
/// };
///
/// assert_eq!(person.name, "Ada Lovelace");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamplePersonSeed {
    /// Unique identifier for the person.
    pub id: Uuid,
    /// Full name.
    pub name: String,
    /// Contact email derived from the name.
    pub email: String,
    /// Date of birth, absent for a small share of persons.
    pub date_of_birth: Option<NaiveDate>,
    /// Gender.
    pub gender: GenderSeed,
    /// Country of residence, referencing a registry country.
    pub country_id: Option<Uuid>,
    /// Postal address.
    pub address: String,
    /// Whether the person opted into news letters.
    pub receive_news_letters: bool,
}
