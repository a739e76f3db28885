//! Field registry for person records.
//!
//! Resolves a field name supplied at runtime to an [`Accessor`] that knows
//! how to render the field for substring search and how to order two records
//! by it. The registry is built once per process and is read-only afterwards,
//! so concurrent readers need no synchronisation.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::OnceLock;

use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

use super::person::PersonRecord;

/// Long-form date pattern used for search, e.g. `16 August 2006`.
pub const SEARCH_DATE_FORMAT: &str = "%d %B %Y";

/// Returned when a field name is not registered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown field: {name}")]
pub struct UnknownFieldError {
    /// The name that failed to resolve, as supplied.
    pub name: String,
}

/// Semantic kind of a field; drives search and comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Free text compared case-insensitively.
    Text,
    /// Enumeration rendered to text; compared like [`FieldKind::Text`].
    EnumText,
    /// Calendar date; searched in long form, ordered chronologically.
    Date,
    /// Boolean flag.
    Boolean,
    /// Opaque identifier.
    OpaqueId,
    /// Derived number.
    Number,
}

/// Every addressable person field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PersonField {
    /// Person identifier.
    Id,
    /// Full name.
    Name,
    /// Contact email.
    Email,
    /// Date of birth.
    DateOfBirth,
    /// Derived age in years.
    Age,
    /// Gender.
    Gender,
    /// Country reference.
    CountryId,
    /// Resolved country display name.
    Country,
    /// Postal address.
    Address,
    /// News letter opt-in flag.
    ReceiveNewsLetters,
}

impl PersonField {
    /// All fields in declaration order.
    pub const ALL: [Self; 10] = [
        Self::Id,
        Self::Name,
        Self::Email,
        Self::DateOfBirth,
        Self::Age,
        Self::Gender,
        Self::CountryId,
        Self::Country,
        Self::Address,
        Self::ReceiveNewsLetters,
    ];

    /// Canonical camelCase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Email => "email",
            Self::DateOfBirth => "dateOfBirth",
            Self::Age => "age",
            Self::Gender => "gender",
            Self::CountryId => "countryId",
            Self::Country => "country",
            Self::Address => "address",
            Self::ReceiveNewsLetters => "receiveNewsLetters",
        }
    }

    /// Declared kind.
    #[must_use]
    pub const fn kind(self) -> FieldKind {
        match self {
            Self::Id | Self::CountryId => FieldKind::OpaqueId,
            Self::Name | Self::Email | Self::Country | Self::Address => FieldKind::Text,
            Self::DateOfBirth => FieldKind::Date,
            Self::Age => FieldKind::Number,
            Self::Gender => FieldKind::EnumText,
            Self::ReceiveNewsLetters => FieldKind::Boolean,
        }
    }

    fn value(self, record: &PersonRecord) -> FieldValue<'_> {
        match self {
            Self::Id => FieldValue::Id(Some(*record.id().as_uuid())),
            Self::Name => FieldValue::Text(Some(record.name())),
            Self::Email => FieldValue::Text(record.email()),
            Self::DateOfBirth => FieldValue::Date(record.date_of_birth()),
            Self::Age => FieldValue::Number(record.age()),
            Self::Gender => FieldValue::Text(record.gender().map(|g| g.as_str())),
            Self::CountryId => FieldValue::Id(record.country_id().map(|id| *id.as_uuid())),
            Self::Country => FieldValue::Text(record.country()),
            Self::Address => FieldValue::Text(record.address()),
            Self::ReceiveNewsLetters => FieldValue::Boolean(record.receive_news_letters()),
        }
    }
}

/// Alternate spellings accepted by [`FieldRegistry::resolve`].
const ALIASES: [(&str, PersonField); 1] = [("personName", PersonField::Name)];

/// A registered field: its canonical name and kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    field: PersonField,
}

impl FieldDescriptor {
    /// The described field.
    #[must_use]
    pub const fn field(&self) -> PersonField {
        self.field
    }

    /// Canonical field name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.field.name()
    }

    /// Field kind.
    #[must_use]
    pub const fn kind(&self) -> FieldKind {
        self.field.kind()
    }
}

enum FieldValue<'a> {
    Text(Option<&'a str>),
    Date(Option<NaiveDate>),
    Boolean(bool),
    Id(Option<Uuid>),
    Number(Option<u32>),
}

impl FieldValue<'_> {
    fn search_text(&self) -> String {
        match self {
            Self::Text(value) => value.map(ToOwned::to_owned).unwrap_or_default(),
            Self::Date(value) => value
                .map(|date| date.format(SEARCH_DATE_FORMAT).to_string())
                .unwrap_or_default(),
            Self::Boolean(value) => value.to_string(),
            Self::Id(value) => value.map(|id| id.to_string()).unwrap_or_default(),
            Self::Number(value) => value.map(|n| n.to_string()).unwrap_or_default(),
        }
    }

    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => compare_text_ignore_case(*a, *b),
            (Self::Date(a), Self::Date(b)) => a.cmp(b),
            (Self::Boolean(a), Self::Boolean(b)) => a.cmp(b),
            (Self::Id(a), Self::Id(b)) => a.cmp(b),
            (Self::Number(a), Self::Number(b)) => a.cmp(b),
            // Both sides always come from the same field.
            _ => Ordering::Equal,
        }
    }
}

/// Ordinal comparison over uppercased code points; absent sorts first.
///
/// Upper-case folding sorts `_` and `[ \ ] ^` after every letter.
fn compare_text_ignore_case(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (Some(left), Some(right)) => left
            .chars()
            .flat_map(char::to_uppercase)
            .cmp(right.chars().flat_map(char::to_uppercase)),
        _ => a.is_some().cmp(&b.is_some()),
    }
}

/// Resolved handle on one field.
///
/// # Examples
/// ```
/// use backend::domain::FieldRegistry;
///
/// let accessor = FieldRegistry::global().resolve("PersonName").expect("registered");
/// assert_eq!(accessor.descriptor().name(), "name");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Accessor {
    descriptor: FieldDescriptor,
}

impl Accessor {
    /// Descriptor of the resolved field.
    #[must_use]
    pub const fn descriptor(&self) -> FieldDescriptor {
        self.descriptor
    }

    /// Text used for substring search. Absent values render as `""`.
    #[must_use]
    pub fn search_text(&self, record: &PersonRecord) -> String {
        self.descriptor.field.value(record).search_text()
    }

    /// Order two records by this field. Absent values sort first.
    #[must_use]
    pub fn compare(&self, a: &PersonRecord, b: &PersonRecord) -> Ordering {
        let field = self.descriptor.field;
        field.value(a).compare(&field.value(b))
    }
}

/// Process-wide mapping from field name to [`Accessor`].
#[derive(Debug)]
pub struct FieldRegistry {
    by_name: HashMap<String, PersonField>,
    descriptors: Vec<FieldDescriptor>,
}

static REGISTRY: OnceLock<FieldRegistry> = OnceLock::new();

impl FieldRegistry {
    /// The shared registry, built on first use.
    #[must_use]
    pub fn global() -> &'static Self {
        REGISTRY.get_or_init(Self::build)
    }

    fn build() -> Self {
        let canonical = PersonField::ALL
            .iter()
            .map(|field| (field.name(), *field));
        let by_name = canonical
            .chain(ALIASES)
            .map(|(name, field)| (name.to_lowercase(), field))
            .collect();
        let descriptors = PersonField::ALL
            .iter()
            .map(|field| FieldDescriptor { field: *field })
            .collect();

        Self {
            by_name,
            descriptors,
        }
    }

    /// Resolve `name` to an accessor.
    ///
    /// Matching ignores case and surrounding whitespace, and is otherwise
    /// exact.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownFieldError`] when no field is registered under
    /// `name`.
    pub fn resolve(&self, name: &str) -> Result<Accessor, UnknownFieldError> {
        self.by_name
            .get(&name.trim().to_lowercase())
            .map(|field| Accessor {
                descriptor: FieldDescriptor { field: *field },
            })
            .ok_or_else(|| UnknownFieldError {
                name: name.to_owned(),
            })
    }

    /// One descriptor per registered field.
    #[must_use]
    pub fn descriptors(&self) -> &[FieldDescriptor] {
        &self.descriptors
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use chrono::{TimeZone, Utc};
    use rstest::rstest;

    use super::*;
    use crate::domain::{Country, CountryId, Gender, Person, PersonId};

    fn record(name: &str, dob: Option<(i32, u32, u32)>) -> PersonRecord {
        let builder = Person::builder(PersonId::new(Uuid::from_u128(1)), name)
            .gender(Gender::Female)
            .receive_news_letters(true);
        let person = match dob {
            Some((y, m, d)) => builder
                .date_of_birth(NaiveDate::from_ymd_opt(y, m, d).expect("valid date"))
                .build(),
            None => builder.build(),
        };
        let now = Utc
            .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
            .single()
            .expect("valid time");
        PersonRecord::materialize(&person, &[], now)
    }

    #[rstest]
    #[case("name", PersonField::Name)]
    #[case("NAME", PersonField::Name)]
    #[case("PersonName", PersonField::Name)]
    #[case("  dateofbirth ", PersonField::DateOfBirth)]
    #[case("ReceiveNewsLetters", PersonField::ReceiveNewsLetters)]
    #[case("ID", PersonField::Id)]
    fn resolves_names_case_insensitively(#[case] name: &str, #[case] expected: PersonField) {
        let accessor = FieldRegistry::global().resolve(name).expect("registered");
        assert_eq!(accessor.descriptor().field(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("nam")]
    #[case("person name")]
    #[case("date_of_birth")]
    fn rejects_unregistered_names(#[case] name: &str) {
        assert_eq!(
            FieldRegistry::global().resolve(name),
            Err(UnknownFieldError {
                name: name.to_owned()
            })
        );
    }

    #[rstest]
    fn every_field_has_exactly_one_descriptor() {
        let descriptors = FieldRegistry::global().descriptors();
        let fields: HashSet<PersonField> =
            descriptors.iter().map(FieldDescriptor::field).collect();

        assert_eq!(descriptors.len(), PersonField::ALL.len());
        assert_eq!(fields.len(), PersonField::ALL.len());
    }

    #[rstest]
    fn date_search_text_uses_long_form() {
        let accessor = FieldRegistry::global().resolve("dateOfBirth").expect("registered");
        assert_eq!(
            accessor.search_text(&record("Ada", Some((2006, 8, 16)))),
            "16 August 2006"
        );
        assert_eq!(accessor.search_text(&record("Ada", None)), "");
    }

    #[rstest]
    #[case("gender", "Female")]
    #[case("receiveNewsLetters", "true")]
    #[case("email", "")]
    #[case("age", "")]
    #[case("id", "00000000-0000-0000-0000-000000000001")]
    fn search_text_renders_canonical_form(#[case] field: &str, #[case] expected: &str) {
        let accessor = FieldRegistry::global().resolve(field).expect("registered");
        assert_eq!(accessor.search_text(&record("Ada", None)), expected);
    }

    #[rstest]
    fn text_comparison_ignores_case() {
        let accessor = FieldRegistry::global().resolve("name").expect("registered");
        let lower = record("mary", None);
        let upper = record("MARY", None);
        let later = record("Smith", None);

        assert_eq!(accessor.compare(&lower, &upper), Ordering::Equal);
        assert_eq!(accessor.compare(&upper, &later), Ordering::Less);
    }

    #[rstest]
    #[case("a_b@x.com", "ab@x.com", Ordering::Greater)]
    #[case("A[B", "ab", Ordering::Greater)]
    #[case("Mary@x.com", "mary@X.COM", Ordering::Equal)]
    fn text_comparison_folds_to_upper_case(
        #[case] left: &str,
        #[case] right: &str,
        #[case] expected: Ordering,
    ) {
        let with_email = |email: &str| {
            let person = Person::builder(PersonId::new(Uuid::from_u128(1)), "Ada")
                .email(email)
                .build();
            PersonRecord::materialize(&person, &[], Utc::now())
        };
        let accessor = FieldRegistry::global().resolve("email").expect("registered");

        assert_eq!(
            accessor.compare(&with_email(left), &with_email(right)),
            expected
        );
    }

    #[rstest]
    fn absent_dates_sort_first() {
        let accessor = FieldRegistry::global().resolve("dateOfBirth").expect("registered");
        let absent = record("A", None);
        let present = record("B", Some((1990, 1, 1)));
        let later = record("C", Some((2000, 1, 1)));

        assert_eq!(accessor.compare(&absent, &present), Ordering::Less);
        assert_eq!(accessor.compare(&present, &later), Ordering::Less);
    }

    #[rstest]
    fn country_compares_by_display_name() {
        let accessor = FieldRegistry::global().resolve("country").expect("registered");
        let brazil = Country::new(CountryId::new(Uuid::from_u128(10)), "brazil");
        let chile = Country::new(CountryId::new(Uuid::from_u128(11)), "Chile");
        let now = Utc
            .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
            .single()
            .expect("valid time");
        let countries = [brazil.clone(), chile.clone()];
        let a = PersonRecord::materialize(
            &Person::builder(PersonId::random(), "A")
                .country_id(chile.id())
                .build(),
            &countries,
            now,
        );
        let b = PersonRecord::materialize(
            &Person::builder(PersonId::random(), "B")
                .country_id(brazil.id())
                .build(),
            &countries,
            now,
        );

        assert_eq!(accessor.compare(&b, &a), Ordering::Less);
    }
}
