use crate::ports::outbound::ReportReader;
use crate::shared::error::IngestError;
use crate::shared::security::{validate_report_file, MAX_REPORT_SIZE};
use crate::shared::Result;
use crate::uniquify::domain::Analysis;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::debug;

/// FileSystemReader adapter for JSON report files
///
/// Symlinks, non-regular files and files above the size limit are refused
/// before anything is read.
pub struct FileSystemReader {
    max_size: u64,
}

impl FileSystemReader {
    pub fn new() -> Self {
        Self {
            max_size: MAX_REPORT_SIZE,
        }
    }

    pub fn with_max_size(max_size: u64) -> Self {
        Self { max_size }
    }

    /// Parses report JSON held in memory.
    ///
    /// A top-level array holds several analyses. Fields the record model does
    /// not know are rejected.
    pub fn parse(&self, content: &str, path: &Path) -> Result<Vec<Analysis>> {
        let parse_error = |e: serde_json::Error| IngestError::ReportParseError {
            path: path.to_path_buf(),
            details: e.to_string(),
        };

        let document: Value = serde_json::from_str(content).map_err(parse_error)?;
        let analyses = match document {
            Value::Array(_) => serde_json::from_value::<Vec<Analysis>>(document),
            other => serde_json::from_value::<Analysis>(other).map(|analysis| vec![analysis]),
        }
        .map_err(parse_error)?;
        Ok(analyses)
    }
}

impl Default for FileSystemReader {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportReader for FileSystemReader {
    fn read_reports(&self, path: &Path) -> Result<Vec<Analysis>> {
        if !path.exists() {
            return Err(IngestError::ReportNotFound {
                path: path.to_path_buf(),
                suggestion: "Check the path, or pass report files as positional arguments"
                    .to_string(),
            }
            .into());
        }

        let size = validate_report_file(path, self.max_size)?;
        let content = fs::read_to_string(path).map_err(|e| IngestError::ReportParseError {
            path: path.to_path_buf(),
            details: e.to_string(),
        })?;
        let analyses = self.parse(&content, path)?;
        debug!(path = %path.display(), size, analyses = analyses.len(), "read report file");
        Ok(analyses)
    }
}
