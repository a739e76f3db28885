//! Outbound adapters implementing domain ports for external formats.
//!
//! - **export**: CSV and spreadsheet renderers behind `PersonsExporter`
//!
//! Adapters are thin translators that convert between domain types and
//! format-specific representations. They contain no business logic.

pub mod export;
