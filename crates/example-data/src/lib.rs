//! Deterministic example person data generation for demonstration purposes.
//!
//! This crate generates believable, reproducible person records from a JSON
//! seed registry. It is independent of backend domain types to avoid circular
//! dependencies; the backend converts the seeds at the point of use.
//!
//! # Overview
//!
//! The crate supports:
//!
//! - Loading seed registries (countries plus named seeds) from JSON files
//! - Deterministic person generation using named seeds
//! - Field validation matching the stored person limits
//!
//! # Example
//!
//! ```
//! use example_data::{SeedRegistry, generate_example_persons};
//!
//! let json = r#"{
//!     "version": 1,
//!     "countries": [{"id": "3fa85f64-5717-4562-b3fc-2c963f66afa6", "name": "India"}],
//!     "seeds": [{"name": "test-seed", "seed": 42, "personCount": 3}]
//! }"#;
//!
//! let registry = SeedRegistry::from_json(json).expect("valid registry");
//! let seed_def = registry.find_seed("test-seed").expect("seed exists");
//! let persons = generate_example_persons(&registry, seed_def).expect("generation succeeds");
//!
//! assert_eq!(persons.len(), 3);
//! ```

mod error;
mod generator;
mod registry;
mod seed;
mod validation;

pub use error::{GenerationError, RegistryError};
pub use generator::generate_example_persons;
pub use registry::{CountryDefinition, SeedDefinition, SeedRegistry};
pub use seed::{ExamplePersonSeed, GenderSeed};
pub use validation::{ADDRESS_MAX, EMAIL_MAX, PERSON_NAME_MAX, is_valid_person_name};
