//! Driving port for person listing queries.
//!
//! The pipeline never reads storage directly: it receives records that this
//! port has already joined with their country names. Tests and the report
//! binary back the port with in-memory data.

use std::fmt;
use std::sync::Arc;

use mockable::Clock;
use thiserror::Error;

use crate::domain::{Country, Person, PersonRecord};

/// Errors raised by [`PersonsQuery`] implementations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersonsQueryError {
    /// The backing source returned data that cannot be materialised.
    #[error("invalid person data: {message}")]
    InvalidData {
        /// Adapter-specific detail.
        message: String,
    },
}

impl PersonsQueryError {
    /// Build an [`PersonsQueryError::InvalidData`] error.
    #[must_use]
    pub fn invalid_data(message: impl Into<String>) -> Self {
        Self::InvalidData {
            message: message.into(),
        }
    }
}

/// Domain use-case port for listing person records.
pub trait PersonsQuery: Send + Sync {
    /// Return every person record, materialised as of the current time.
    fn list_person_records(&self) -> Result<Vec<PersonRecord>, PersonsQueryError>;
}

/// Persons and countries held in memory.
///
/// Ages are derived from the injected clock on every call, so two calls may
/// disagree if the clock advances between them. A person whose country id is
/// not among the held countries is reported as
/// [`PersonsQueryError::InvalidData`].
#[derive(Clone)]
pub struct InMemoryPersonsQuery {
    persons: Vec<Person>,
    countries: Vec<Country>,
    clock: Arc<dyn Clock>,
}

impl InMemoryPersonsQuery {
    /// Serve `persons`, resolving country names from `countries`.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use backend::domain::ports::{InMemoryPersonsQuery, PersonsQuery};
    /// use backend::domain::{Person, PersonId};
    /// use mockable::DefaultClock;
    ///
    /// let query = InMemoryPersonsQuery::new(
    ///     vec![Person::builder(PersonId::random(), "Ada").build()],
    ///     Vec::new(),
    ///     Arc::new(DefaultClock),
    /// );
    /// assert_eq!(query.list_person_records().expect("records").len(), 1);
    /// ```
    #[must_use]
    pub fn new(persons: Vec<Person>, countries: Vec<Country>, clock: Arc<dyn Clock>) -> Self {
        Self {
            persons,
            countries,
            clock,
        }
    }
}

impl fmt::Debug for InMemoryPersonsQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryPersonsQuery")
            .field("persons", &self.persons.len())
            .field("countries", &self.countries.len())
            .finish_non_exhaustive()
    }
}

impl PersonsQuery for InMemoryPersonsQuery {
    fn list_person_records(&self) -> Result<Vec<PersonRecord>, PersonsQueryError> {
        let now = self.clock.utc();
        self.persons
            .iter()
            .map(|person| {
                let record = PersonRecord::materialize(person, &self.countries, now);
                match record.country_id() {
                    Some(country_id) if record.country().is_none() => {
                        Err(PersonsQueryError::invalid_data(format!(
                            "person {} references unknown country {country_id}",
                            person.id()
                        )))
                    }
                    _ => Ok(record),
                }
            })
            .collect()
    }
}
