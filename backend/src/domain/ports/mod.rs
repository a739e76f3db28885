//! Domain ports and supporting types for the hexagonal boundary.

mod persons_exporter;
mod persons_query;

pub use persons_exporter::PersonsExporter;
pub use persons_query::{InMemoryPersonsQuery, PersonsQuery, PersonsQueryError};
