//! Seed registry types and JSON parsing.
//!
//! The registry holds the reference countries generated persons may live in
//! and the named seed definitions that drive deterministic generation.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use uuid::Uuid;

use crate::error::RegistryError;

/// Current supported registry version.
const SUPPORTED_VERSION: u32 = 1;

/// A seed registry containing reference countries and named seeds.
///
/// # Example
///
/// ```
/// use example_data::SeedRegistry;
///
/// let json = r#"{
///     "version": 1,
///     "countries": [{"id": "3fa85f64-5717-4562-b3fc-2c963f66afa6", "name": "Japan"}],
///     "seeds": [{"name": "test", "seed": 42, "personCount": 5}]
/// }"#;
///
/// let registry = SeedRegistry::from_json(json).expect("valid registry");
/// assert_eq!(registry.seeds().len(), 1);
/// assert_eq!(registry.countries()[0].name(), "Japan");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedRegistry {
    version: u32,
    countries: Vec<CountryDefinition>,
    seeds: Vec<SeedDefinition>,
}

impl SeedRegistry {
    /// Parses a seed registry from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if:
    /// - The JSON is malformed or required fields are missing
    /// - The version is unsupported
    /// - Any country ID is not a UUID or any country name is blank
    /// - The seeds array is empty
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let raw: RawSeedRegistry =
            serde_json::from_str(json).map_err(|e| RegistryError::ParseError {
                message: e.to_string(),
            })?;

        Self::from_raw(raw)
    }

    /// Loads a seed registry from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, RegistryError> {
        let contents = fs::read_to_string(path).map_err(|e| RegistryError::IoError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        Self::from_json(&contents)
    }

    fn from_raw(raw: RawSeedRegistry) -> Result<Self, RegistryError> {
        if raw.version != SUPPORTED_VERSION {
            return Err(RegistryError::UnsupportedVersion {
                expected: SUPPORTED_VERSION,
                actual: raw.version,
            });
        }

        let countries = raw
            .countries
            .into_iter()
            .enumerate()
            .map(|(index, country)| CountryDefinition::from_raw(index, country))
            .collect::<Result<Vec<_>, _>>()?;

        if raw.seeds.is_empty() {
            return Err(RegistryError::EmptySeeds);
        }

        let seeds = raw
            .seeds
            .into_iter()
            .map(|s| SeedDefinition {
                name: s.name,
                seed: s.seed,
                person_count: s.person_count,
            })
            .collect();

        Ok(Self {
            version: raw.version,
            countries,
            seeds,
        })
    }

    /// Returns the registry version.
    #[must_use]
    pub const fn version(&self) -> u32 {
        self.version
    }

    /// Returns the reference countries generated persons may be assigned to.
    #[must_use]
    pub fn countries(&self) -> &[CountryDefinition] {
        &self.countries
    }

    /// Returns all seed definitions.
    #[must_use]
    pub fn seeds(&self) -> &[SeedDefinition] {
        &self.seeds
    }

    /// Finds a seed definition by name.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::SeedNotFound`] if no seed with the given name
    /// exists.
    pub fn find_seed(&self, name: &str) -> Result<&SeedDefinition, RegistryError> {
        self.seeds
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| RegistryError::SeedNotFound {
                name: name.to_owned(),
            })
    }
}

/// A reference country listed in the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryDefinition {
    id: Uuid,
    name: String,
}

impl CountryDefinition {
    fn from_raw(index: usize, raw: RawCountryDefinition) -> Result<Self, RegistryError> {
        let id = Uuid::parse_str(&raw.id).map_err(|_| RegistryError::InvalidCountryId {
            index,
            value: raw.id.clone(),
        })?;
        let name = raw.name.trim();
        if name.is_empty() {
            return Err(RegistryError::EmptyCountryName { index });
        }

        Ok(Self {
            id,
            name: name.to_owned(),
        })
    }

    /// Returns the country identifier.
    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.id
    }

    /// Returns the country display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A named seed definition for deterministic person generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedDefinition {
    name: String,
    seed: u64,
    person_count: usize,
}

impl SeedDefinition {
    /// Returns the seed name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the RNG seed value.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns the number of persons to generate.
    #[must_use]
    pub const fn person_count(&self) -> usize {
        self.person_count
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSeedRegistry {
    version: u32,
    #[serde(default)]
    countries: Vec<RawCountryDefinition>,
    seeds: Vec<RawSeedDefinition>,
}

#[derive(Debug, Deserialize)]
struct RawCountryDefinition {
    id: String,
    name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSeedDefinition {
    name: String,
    seed: u64,
    person_count: usize,
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    const VALID_JSON: &str = r#"{
        "version": 1,
        "countries": [
            {"id": "3fa85f64-5717-4562-b3fc-2c963f66afa6", "name": "India"},
            {"id": "4fa85f64-5717-4562-b3fc-2c963f66afa7", "name": " Germany "}
        ],
        "seeds": [
            {"name": "mossy-owl", "seed": 2026, "personCount": 12},
            {"name": "snowy-penguin", "seed": 1234, "personCount": 5}
        ]
    }"#;

    #[test]
    fn parses_valid_registry() {
        let registry = SeedRegistry::from_json(VALID_JSON).expect("valid registry");

        assert_eq!(registry.version(), 1);
        assert_eq!(registry.countries().len(), 2);
        assert_eq!(registry.seeds().len(), 2);
    }

    #[test]
    fn trims_country_names() {
        let registry = SeedRegistry::from_json(VALID_JSON).expect("valid registry");
        let names: Vec<&str> = registry.countries().iter().map(CountryDefinition::name).collect();

        assert_eq!(names, ["India", "Germany"]);
    }

    #[test]
    fn countries_default_to_empty() {
        let json = r#"{"version": 1, "seeds": [{"name": "a", "seed": 1, "personCount": 1}]}"#;
        let registry = SeedRegistry::from_json(json).expect("valid registry");

        assert!(registry.countries().is_empty());
    }

    #[rstest]
    #[case::malformed_json("not valid json")]
    #[case::missing_version(r#"{"countries": [], "seeds": [{"name": "a", "seed": 1, "personCount": 1}]}"#)]
    #[case::missing_person_count(r#"{"version": 1, "seeds": [{"name": "a", "seed": 1}]}"#)]
    fn rejects_json_with_parse_error(#[case] json: &str) {
        let result = SeedRegistry::from_json(json);
        assert!(matches!(result, Err(RegistryError::ParseError { .. })));
    }

    #[rstest]
    #[case::unsupported_version(
        r#"{"version": 99, "countries": [], "seeds": [{"name": "a", "seed": 1, "personCount": 1}]}"#,
        RegistryError::UnsupportedVersion { expected: 1, actual: 99 }
    )]
    #[case::invalid_country_uuid(
        r#"{"version": 1, "countries": [{"id": "not-a-uuid", "name": "Peru"}], "seeds": [{"name": "a", "seed": 1, "personCount": 1}]}"#,
        RegistryError::InvalidCountryId { index: 0, value: "not-a-uuid".to_owned() }
    )]
    #[case::blank_country_name(
        r#"{"version": 1, "countries": [{"id": "3fa85f64-5717-4562-b3fc-2c963f66afa6", "name": "  "}], "seeds": [{"name": "a", "seed": 1, "personCount": 1}]}"#,
        RegistryError::EmptyCountryName { index: 0 }
    )]
    #[case::empty_seeds(r#"{"version": 1, "countries": [], "seeds": []}"#, RegistryError::EmptySeeds)]
    fn rejects_invalid_registry(#[case] json: &str, #[case] expected: RegistryError) {
        let result = SeedRegistry::from_json(json);
        assert_eq!(result, Err(expected));
    }

    #[test]
    fn returns_error_for_unknown_seed() {
        let registry = SeedRegistry::from_json(VALID_JSON).expect("valid registry");

        assert_eq!(
            registry.find_seed("unknown"),
            Err(RegistryError::SeedNotFound {
                name: "unknown".to_owned()
            })
        );
    }

    #[test]
    fn seed_definition_getters_work() {
        let registry = SeedRegistry::from_json(VALID_JSON).expect("valid registry");
        let seed = registry.find_seed("snowy-penguin").expect("seed found");

        assert_eq!(seed.name(), "snowy-penguin");
        assert_eq!(seed.seed(), 1234);
        assert_eq!(seed.person_count(), 5);
    }
}
