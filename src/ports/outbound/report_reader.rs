use crate::shared::Result;
use crate::uniquify::domain::Analysis;
use std::path::Path;

/// ReportReader port for loading parsed reports
///
/// Implementations handle the wire format; the core only ever sees the typed
/// report model.
pub trait ReportReader {
    /// Reads every analysis held in the report file at `path`.
    ///
    /// # Errors
    /// Returns an error if the file is missing, unsafe to read, or not a
    /// valid report document
    fn read_reports(&self, path: &Path) -> Result<Vec<Analysis>>;
}
