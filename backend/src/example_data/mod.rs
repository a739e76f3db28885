//! Example person data served through the persons query port.
//!
//! Reads a seed registry, generates its persons deterministically and adapts
//! them into domain [`Person`]s and [`Country`]s.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use cap_std::{ambient_authority, fs::Dir};
use example_data::{
    CountryDefinition, ExamplePersonSeed, GenderSeed, GenerationError, RegistryError,
    SeedRegistry, generate_example_persons,
};
use mockable::Clock;
use thiserror::Error;
use tracing::info;

use crate::domain::ports::{InMemoryPersonsQuery, PersonsQuery, PersonsQueryError};
use crate::domain::{Country, CountryId, Gender, Person, PersonId, PersonRecord};

/// Errors raised while loading or generating example persons.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExampleDataError {
    /// Registry file could not be read.
    #[error("failed to read registry at {path}: {message}")]
    RegistryRead {
        /// Path to the registry file.
        path: PathBuf,
        /// Underlying I/O error.
        message: String,
    },
    /// Registry parsing or lookup failed.
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),
    /// Person generation failed.
    #[error("generation error: {0}")]
    Generation(#[from] GenerationError),
    /// Seed name must not be empty.
    #[error("seed name must not be empty")]
    EmptySeedName,
}

impl ExampleDataError {
    fn registry_read(path: &Path, error: impl std::fmt::Display) -> Self {
        Self::RegistryRead {
            path: path.to_path_buf(),
            message: error.to_string(),
        }
    }
}

/// Read and validate the seed registry at `path`.
///
/// # Errors
///
/// Returns [`ExampleDataError::RegistryRead`] when the file cannot be read
/// and [`ExampleDataError::Registry`] when its contents are invalid.
pub fn load_registry(path: &Path) -> Result<SeedRegistry, ExampleDataError> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path
        .file_name()
        .ok_or_else(|| ExampleDataError::registry_read(path, "registry path must be a file"))?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority())
        .map_err(|error| ExampleDataError::registry_read(path, error))?;
    let contents = dir
        .read_to_string(Path::new(file_name))
        .map_err(|error| ExampleDataError::registry_read(path, error))?;
    Ok(SeedRegistry::from_json(&contents)?)
}

/// Persons generated from a named registry seed.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use backend::domain::ports::PersonsQuery;
/// use backend::example_data::ExamplePersonsQuery;
/// use example_data::SeedRegistry;
/// use mockable::DefaultClock;
///
/// let registry = SeedRegistry::from_json(
///     r#"{"version": 1, "seeds": [{"name": "tiny", "seed": 7, "personCount": 3}]}"#,
/// )?;
/// let query = ExamplePersonsQuery::from_seed(&registry, "tiny", Arc::new(DefaultClock))?;
/// assert_eq!(query.list_person_records()?.len(), 3);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct ExamplePersonsQuery {
    inner: InMemoryPersonsQuery,
}

impl ExamplePersonsQuery {
    /// Generate the persons of `seed_name` and serve them as of `clock`.
    ///
    /// # Errors
    ///
    /// Returns [`ExampleDataError`] when the seed name is blank, unknown, or
    /// generation fails.
    pub fn from_seed(
        registry: &SeedRegistry,
        seed_name: &str,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, ExampleDataError> {
        let seed_name = seed_name.trim();
        if seed_name.is_empty() {
            return Err(ExampleDataError::EmptySeedName);
        }

        let seed_def = registry.find_seed(seed_name)?;
        let seeds = generate_example_persons(registry, seed_def)?;
        info!(
            seed_key = seed_name,
            person_count = seeds.len(),
            "generated example persons"
        );

        let persons = seeds.iter().map(person_from_seed).collect();
        let countries = registry.countries().iter().map(country_from_definition).collect();
        Ok(Self {
            inner: InMemoryPersonsQuery::new(persons, countries, clock),
        })
    }
}

impl PersonsQuery for ExamplePersonsQuery {
    fn list_person_records(&self) -> Result<Vec<PersonRecord>, PersonsQueryError> {
        self.inner.list_person_records()
    }
}

const fn gender_from_seed(seed: GenderSeed) -> Gender {
    match seed {
        GenderSeed::Male => Gender::Male,
        GenderSeed::Female => Gender::Female,
        GenderSeed::Other => Gender::Other,
    }
}

fn person_from_seed(seed: &ExamplePersonSeed) -> Person {
    let mut builder = Person::builder(PersonId::new(seed.id), seed.name.as_str())
        .email(seed.email.as_str())
        .gender(gender_from_seed(seed.gender))
        .address(seed.address.as_str())
        .receive_news_letters(seed.receive_news_letters);
    if let Some(dob) = seed.date_of_birth {
        builder = builder.date_of_birth(dob);
    }
    if let Some(country_id) = seed.country_id {
        builder = builder.country_id(CountryId::new(country_id));
    }
    builder.build()
}

fn country_from_definition(definition: &CountryDefinition) -> Country {
    Country::new(CountryId::new(definition.id()), definition.name())
}
