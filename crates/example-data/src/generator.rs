//! Deterministic person generation from seed definitions.
//!
//! The same seed value always produces identical output, so a named seed is
//! enough to reproduce a demonstration data set.

use chrono::NaiveDate;
use fake::Fake;
use fake::faker::address::raw::{BuildingNumber, CityName, StreetName};
use fake::faker::name::raw::{FirstName, LastName};
use fake::locales::EN;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use uuid::Uuid;

use crate::error::GenerationError;
use crate::registry::{SeedDefinition, SeedRegistry};
use crate::seed::{ExamplePersonSeed, GenderSeed};
use crate::validation::{ADDRESS_MAX, EMAIL_MAX, fits, is_valid_person_name, truncate_chars};

/// Maximum number of attempts to generate a valid person name.
const MAX_NAME_ATTEMPTS: usize = 100;

/// Earliest generated birth year.
const BIRTH_YEAR_MIN: i32 = 1950;

/// Latest generated birth year.
const BIRTH_YEAR_MAX: i32 = 2010;

/// One in twenty persons has no recorded date of birth.
const MISSING_BIRTH_DATE_DENOMINATOR: u32 = 20;

/// One in ten persons has no recorded country.
const MISSING_COUNTRY_DENOMINATOR: u32 = 10;

const EMAIL_DOMAIN: &str = "example.com";

/// Generates example persons from a seed definition.
///
/// Uses the seed's `seed` value to initialise a deterministic RNG. The
/// generated persons have:
///
/// - Unique UUIDs (deterministically generated)
/// - Names within the stored length limit
/// - Emails derived from the name
/// - A birth date between 1950 and 2010 for roughly 95% of persons
/// - A uniformly chosen gender
/// - A registry country for roughly 90% of persons (none when the registry
///   lists no countries)
/// - A 50/50 news letter preference
///
/// # Errors
///
/// Returns [`GenerationError`] if name generation fails after maximum
/// retries.
///
/// # Example
///
/// ```
/// use example_data::{SeedRegistry, generate_example_persons};
///
/// let json = r#"{
///     "version": 1,
///     "countries": [],
///     "seeds": [{"name": "test", "seed": 42, "personCount": 3}]
/// }"#;
///
/// let registry = SeedRegistry::from_json(json).expect("valid");
/// let seed_def = registry.find_seed("test").expect("found");
/// let persons = generate_example_persons(&registry, seed_def).expect("generated");
///
/// let again = generate_example_persons(&registry, seed_def).expect("generated");
/// assert_eq!(persons, again);
/// ```
pub fn generate_example_persons(
    registry: &SeedRegistry,
    seed_def: &SeedDefinition,
) -> Result<Vec<ExamplePersonSeed>, GenerationError> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed_def.seed());
    let country_ids: Vec<Uuid> = registry.countries().iter().map(|c| c.id()).collect();

    (0..seed_def.person_count())
        .map(|_| generate_single_person(&mut rng, &country_ids))
        .collect()
}

fn generate_single_person(
    rng: &mut ChaCha8Rng,
    country_ids: &[Uuid],
) -> Result<ExamplePersonSeed, GenerationError> {
    let id = Uuid::from_u128(rng.random());
    let (first, last) = generate_name_parts(rng)?;
    let name = format!("{first} {last}");
    let email = derive_email(&first, &last);
    let address = generate_address(rng);
    let date_of_birth = generate_date_of_birth(rng);
    let gender = GenderSeed::ALL
        .choose(rng)
        .copied()
        .unwrap_or(GenderSeed::Other);
    let country_id = if rng.random_ratio(1, MISSING_COUNTRY_DENOMINATOR) {
        None
    } else {
        country_ids.choose(rng).copied()
    };
    let receive_news_letters = rng.random_bool(0.5);

    Ok(ExamplePersonSeed {
        id,
        name,
        email,
        date_of_birth,
        gender,
        country_id,
        address,
        receive_news_letters,
    })
}

/// Generates a first and last name whose combination passes validation.
fn generate_name_parts(rng: &mut ChaCha8Rng) -> Result<(String, String), GenerationError> {
    for _ in 0..MAX_NAME_ATTEMPTS {
        let first: String = FirstName(EN).fake_with_rng(rng);
        let last: String = LastName(EN).fake_with_rng(rng);
        let candidate = format!("{first} {last}");

        if is_valid_person_name(&candidate) {
            return Ok((first, last));
        }
    }

    Err(GenerationError::NameGenerationFailed {
        max_attempts: MAX_NAME_ATTEMPTS,
    })
}

/// Builds `first.last@example.com` from ASCII alphanumerics only.
fn derive_email(first: &str, last: &str) -> String {
    let local_part = |part: &str| -> String {
        part.chars()
            .filter(char::is_ascii_alphanumeric)
            .map(|c| c.to_ascii_lowercase())
            .collect()
    };
    let suffix = format!("@{EMAIL_DOMAIN}");
    let local = format!("{}.{}", local_part(first), local_part(last));
    let budget = EMAIL_MAX.saturating_sub(suffix.len());

    format!("{}{suffix}", truncate_chars(&local, budget))
}

fn generate_address(rng: &mut ChaCha8Rng) -> String {
    let number: String = BuildingNumber(EN).fake_with_rng(rng);
    let street: String = StreetName(EN).fake_with_rng(rng);
    let city: String = CityName(EN).fake_with_rng(rng);

    truncate_chars(&format!("{number} {street}, {city}"), ADDRESS_MAX)
}

fn generate_date_of_birth(rng: &mut ChaCha8Rng) -> Option<NaiveDate> {
    if rng.random_ratio(1, MISSING_BIRTH_DATE_DENOMINATOR) {
        return None;
    }
    let year = rng.random_range(BIRTH_YEAR_MIN..=BIRTH_YEAR_MAX);
    let month = rng.random_range(1..=12);
    // Day 28 exists in every month.
    let day = rng.random_range(1..=28);

    NaiveDate::from_ymd_opt(year, month, day)
}
