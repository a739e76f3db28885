//! Test utilities for the backend crate.
//!
//! Shared by unit tests (in `src/`) and integration tests (in `tests/`).
//! Compiled for tests and when the `test-support` feature is enabled.

use std::sync::Arc;

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use mockable::Clock;
use uuid::Uuid;

use crate::domain::ports::InMemoryPersonsQuery;
use crate::domain::{Country, CountryId, Gender, Person, PersonId, PersonRecord};

/// Clock frozen at a fixed instant.
#[derive(Debug, Clone, Copy)]
pub struct FixtureClock(DateTime<Utc>);

impl FixtureClock {
    /// Clock that always reports `now`.
    #[must_use]
    pub const fn new(now: DateTime<Utc>) -> Self {
        Self(now)
    }

    /// Clock frozen at midnight UTC on the given day.
    ///
    /// # Panics
    ///
    /// Panics when the date is not a valid calendar day.
    #[must_use]
    pub fn at_date(year: i32, month: u32, day: u32) -> Self {
        let now = Utc
            .with_ymd_and_hms(year, month, day, 0, 0, 0)
            .single()
            .unwrap_or_else(|| panic!("invalid fixture date {year}-{month}-{day}"));
        Self(now)
    }
}

impl Default for FixtureClock {
    fn default() -> Self {
        Self::at_date(2024, 8, 16)
    }
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Country used by [`sample_persons`].
#[must_use]
pub fn sample_country() -> Country {
    Country::new(CountryId::new(Uuid::from_u128(1)), "India")
}

/// Three persons named `Mary`, `Smith` and `rahMAn`, in that order.
///
/// # Panics
///
/// Never in practice; the embedded dates are valid.
#[must_use]
pub fn sample_persons() -> Vec<Person> {
    let date = |y, m, d| {
        NaiveDate::from_ymd_opt(y, m, d).unwrap_or_else(|| panic!("invalid date {y}-{m}-{d}"))
    };
    vec![
        Person::builder(PersonId::new(Uuid::from_u128(11)), "Mary")
            .email("mary@example.com")
            .date_of_birth(date(2006, 8, 16))
            .gender(Gender::Female)
            .country_id(sample_country().id())
            .address("1 Main Street")
            .receive_news_letters(true)
            .build(),
        Person::builder(PersonId::new(Uuid::from_u128(12)), "Smith")
            .email("smith@example.com")
            .date_of_birth(date(1990, 1, 2))
            .gender(Gender::Male)
            .address("22 Elm Road")
            .build(),
        Person::builder(PersonId::new(Uuid::from_u128(13)), "rahMAn")
            .date_of_birth(date(1985, 12, 31))
            .gender(Gender::Other)
            .country_id(sample_country().id())
            .receive_news_letters(true)
            .build(),
    ]
}

/// [`sample_persons`] materialised at the default [`FixtureClock`] instant.
#[must_use]
pub fn sample_records() -> Vec<PersonRecord> {
    let now = FixtureClock::default().utc();
    let countries = [sample_country()];
    sample_persons()
        .iter()
        .map(|person| PersonRecord::materialize(person, &countries, now))
        .collect()
}

/// In-memory query over [`sample_persons`] with the default fixture clock.
#[must_use]
pub fn sample_query() -> InMemoryPersonsQuery {
    InMemoryPersonsQuery::new(
        sample_persons(),
        vec![sample_country()],
        Arc::new(FixtureClock::default()),
    )
}

pub mod cap_fs {
    //! Capability-safe filesystem helpers for tests.
    //!
    //! The backend reads and writes files through `cap_std::fs::Dir`; these
    //! helpers let test suites do the same.

    use std::io;
    use std::path::Path;

    use cap_std::{ambient_authority, fs::Dir};

    /// Read a whole file through `cap_std`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use backend::test_support::cap_fs::{read_file, write_file};
    ///
    /// let path = std::env::temp_dir().join("cap-fs-read-example.txt");
    /// write_file(&path, b"hello\n")?;
    /// assert_eq!(read_file(&path)?, b"hello\n");
    /// # Ok::<(), std::io::Error>(())
    /// ```
    pub fn read_file(path: &Path) -> io::Result<Vec<u8>> {
        let (directory, file_name) = open_parent(path)?;
        directory.read(file_name)
    }

    /// Write bytes to a file through `cap_std`.
    pub fn write_file(path: &Path, contents: &[u8]) -> io::Result<()> {
        let (directory, file_name) = open_parent(path)?;
        directory.write(file_name, contents)
    }

    fn open_parent(path: &Path) -> io::Result<(Dir, &Path)> {
        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        let file_name = path.file_name().ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidInput, "path must include a file name")
        })?;
        let directory = Dir::open_ambient_dir(parent, ambient_authority())?;
        Ok((directory, Path::new(file_name)))
    }
}
