//! Driven port for rendering person records into a downloadable file.

use crate::domain::{ExportError, ExportFormat, PersonRecord};

/// Serialises person records into one export container.
///
/// Implementations are stateless: the same records always produce the same
/// bytes (container metadata aside), and an empty slice produces a
/// header-only file.
pub trait PersonsExporter: Send + Sync {
    /// Container this exporter produces.
    fn format(&self) -> ExportFormat;

    /// Render `records` using the fixed export columns.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError`] when the container cannot be written.
    fn export(&self, records: &[PersonRecord]) -> Result<Vec<u8>, ExportError>;
}
