//! Person data model.
//!
//! `Person` is the stored entity. `PersonRecord` is what flows through the
//! query pipeline: the stored fields joined with the country display name
//! and the age derived at materialisation time.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Number of quarter-days in a mean year (365.25 × 4).
const QUARTER_DAYS_PER_YEAR: i64 = 1461;

/// Returned when a string does not name a [`Gender`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown gender: {value}")]
pub struct ParseGenderError {
    /// The rejected input.
    pub value: String,
}

/// Returned when a string is not a valid identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid identifier: {value}")]
pub struct ParseIdError {
    /// The rejected input.
    pub value: String,
}

/// Stable person identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(Uuid);

impl PersonId {
    /// Wrap an existing UUID.
    #[must_use]
    pub const fn new(id: Uuid) -> Self {
        Self(id)
    }

    /// Generate a new random [`PersonId`].
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for PersonId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self).map_err(|_| ParseIdError {
            value: s.to_owned(),
        })
    }
}

/// Identifier of a reference country.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CountryId(Uuid);

impl CountryId {
    /// Wrap an existing UUID.
    #[must_use]
    pub const fn new(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for CountryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for CountryId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self).map_err(|_| ParseIdError {
            value: s.to_owned(),
        })
    }
}

/// Reference country a person may live in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    id: CountryId,
    name: String,
}

impl Country {
    /// Build a country from its identifier and display name.
    #[must_use]
    pub fn new(id: CountryId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Country identifier.
    #[must_use]
    pub const fn id(&self) -> CountryId {
        self.id
    }

    /// Country display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Gender of a person. Renders as `Male`, `Female` or `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    /// Male.
    Male,
    /// Female.
    Female,
    /// Any other gender.
    Other,
}

impl Gender {
    /// Canonical text form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = ParseGenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" => Ok(Self::Male),
            "female" => Ok(Self::Female),
            "other" => Ok(Self::Other),
            _ => Err(ParseGenderError {
                value: s.to_owned(),
            }),
        }
    }
}

/// Stored person entity.
///
/// Built through [`PersonBuilder`]; immutable once built.
///
/// # Examples
/// ```
/// use backend::domain::{Gender, Person, PersonId};
///
/// let person = Person::builder(PersonId::random(), "Ada Lovelace")
///     .email("ada@example.com")
///     .gender(Gender::Female)
///     .build();
/// assert_eq!(person.name(), "Ada Lovelace");
/// assert_eq!(person.gender(), Some(Gender::Female));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    id: PersonId,
    name: String,
    email: Option<String>,
    date_of_birth: Option<NaiveDate>,
    gender: Option<Gender>,
    country_id: Option<CountryId>,
    address: Option<String>,
    receive_news_letters: bool,
}

impl Person {
    /// Start building a person with the mandatory identity fields.
    pub fn builder(id: PersonId, name: impl Into<String>) -> PersonBuilder {
        PersonBuilder {
            person: Self {
                id,
                name: name.into(),
                email: None,
                date_of_birth: None,
                gender: None,
                country_id: None,
                address: None,
                receive_news_letters: false,
            },
        }
    }

    /// Person identifier.
    #[must_use]
    pub const fn id(&self) -> PersonId {
        self.id
    }

    /// Full name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Contact email, if recorded.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Date of birth, if recorded.
    #[must_use]
    pub const fn date_of_birth(&self) -> Option<NaiveDate> {
        self.date_of_birth
    }

    /// Gender, if recorded.
    #[must_use]
    pub const fn gender(&self) -> Option<Gender> {
        self.gender
    }

    /// Country reference, if recorded.
    #[must_use]
    pub const fn country_id(&self) -> Option<CountryId> {
        self.country_id
    }

    /// Postal address, if recorded.
    #[must_use]
    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    /// News letter opt-in flag.
    #[must_use]
    pub const fn receive_news_letters(&self) -> bool {
        self.receive_news_letters
    }
}

/// Builder for [`Person`].
#[derive(Debug, Clone)]
#[must_use]
pub struct PersonBuilder {
    person: Person,
}

impl PersonBuilder {
    /// Set the contact email.
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.person.email = Some(email.into());
        self
    }

    /// Set the date of birth.
    pub fn date_of_birth(mut self, date_of_birth: NaiveDate) -> Self {
        self.person.date_of_birth = Some(date_of_birth);
        self
    }

    /// Set the gender.
    pub fn gender(mut self, gender: Gender) -> Self {
        self.person.gender = Some(gender);
        self
    }

    /// Set the country reference.
    pub fn country_id(mut self, country_id: CountryId) -> Self {
        self.person.country_id = Some(country_id);
        self
    }

    /// Set the postal address.
    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.person.address = Some(address.into());
        self
    }

    /// Set the news letter opt-in flag.
    pub fn receive_news_letters(mut self, receive: bool) -> Self {
        self.person.receive_news_letters = receive;
        self
    }

    /// Finish building.
    pub fn build(self) -> Person {
        self.person
    }
}

/// Whole years between `date_of_birth` and `today`.
///
/// Elapsed days are divided by 365.25 and rounded to the nearest year.
/// Dates after `today` yield zero.
///
/// # Examples
/// ```
/// use backend::domain::age_in_years;
/// use chrono::NaiveDate;
///
/// let dob = NaiveDate::from_ymd_opt(2000, 1, 1).expect("valid date");
/// let today = NaiveDate::from_ymd_opt(2024, 12, 31).expect("valid date");
/// assert_eq!(age_in_years(dob, today), 25);
/// ```
#[must_use]
pub fn age_in_years(date_of_birth: NaiveDate, today: NaiveDate) -> u32 {
    let days = today.signed_duration_since(date_of_birth).num_days().max(0);
    // Round half up in quarter-day units; the divisor is odd so no exact
    // halves occur.
    let quarters = days
        .saturating_mul(4)
        .saturating_add(QUARTER_DAYS_PER_YEAR.div_euclid(2));
    u32::try_from(quarters.div_euclid(QUARTER_DAYS_PER_YEAR)).unwrap_or(u32::MAX)
}

/// A person as presented to the query pipeline.
///
/// ## Invariants
/// - `country` is the display name of `country_id` when the reference
///   resolves, otherwise absent.
/// - `age` is derived from `date_of_birth` at materialisation time and is
///   never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonRecord {
    id: PersonId,
    name: String,
    email: Option<String>,
    date_of_birth: Option<NaiveDate>,
    gender: Option<Gender>,
    country_id: Option<CountryId>,
    country: Option<String>,
    address: Option<String>,
    receive_news_letters: bool,
    age: Option<u32>,
}

impl PersonRecord {
    /// Join `person` with its country and derive the age as of `now`.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::{Country, CountryId, Person, PersonId, PersonRecord};
    /// use chrono::{NaiveDate, TimeZone, Utc};
    /// use uuid::Uuid;
    ///
    /// let india = Country::new(CountryId::new(Uuid::nil()), "India");
    /// let person = Person::builder(PersonId::random(), "Mary")
    ///     .date_of_birth(NaiveDate::from_ymd_opt(2010, 4, 20).expect("valid date"))
    ///     .country_id(india.id())
    ///     .build();
    /// let now = Utc.with_ymd_and_hms(2020, 4, 20, 0, 0, 0).single().expect("valid time");
    ///
    /// let record = PersonRecord::materialize(&person, &[india], now);
    /// assert_eq!(record.country(), Some("India"));
    /// assert_eq!(record.age(), Some(10));
    /// ```
    #[must_use]
    pub fn materialize(person: &Person, countries: &[Country], now: DateTime<Utc>) -> Self {
        let country = person.country_id().and_then(|id| {
            countries
                .iter()
                .find(|c| c.id() == id)
                .map(|c| c.name().to_owned())
        });
        let today = now.date_naive();

        Self {
            id: person.id(),
            name: person.name().to_owned(),
            email: person.email().map(ToOwned::to_owned),
            date_of_birth: person.date_of_birth(),
            gender: person.gender(),
            country_id: person.country_id(),
            country,
            address: person.address().map(ToOwned::to_owned),
            receive_news_letters: person.receive_news_letters(),
            age: person.date_of_birth().map(|dob| age_in_years(dob, today)),
        }
    }

    /// Person identifier.
    #[must_use]
    pub const fn id(&self) -> PersonId {
        self.id
    }

    /// Full name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Contact email, if recorded.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Date of birth, if recorded.
    #[must_use]
    pub const fn date_of_birth(&self) -> Option<NaiveDate> {
        self.date_of_birth
    }

    /// Gender, if recorded.
    #[must_use]
    pub const fn gender(&self) -> Option<Gender> {
        self.gender
    }

    /// Country reference, if recorded.
    #[must_use]
    pub const fn country_id(&self) -> Option<CountryId> {
        self.country_id
    }

    /// Resolved country display name.
    #[must_use]
    pub fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }

    /// Postal address, if recorded.
    #[must_use]
    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    /// News letter opt-in flag.
    #[must_use]
    pub const fn receive_news_letters(&self) -> bool {
        self.receive_news_letters
    }

    /// Age in whole years at materialisation time.
    #[must_use]
    pub const fn age(&self) -> Option<u32> {
        self.age
    }
}
