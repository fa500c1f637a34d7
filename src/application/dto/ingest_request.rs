use super::IngestMode;
use std::path::PathBuf;

/// IngestRequest - Internal request DTO for the ingest use case
#[derive(Debug, Clone)]
pub struct IngestRequest {
    /// Report files, ingested in the given order
    pub paths: Vec<PathBuf>,
    pub mode: IngestMode,
}

impl IngestRequest {
    pub fn new(paths: Vec<PathBuf>, mode: IngestMode) -> Self {
        Self { paths, mode }
    }
}
