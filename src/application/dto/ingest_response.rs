use super::IngestMode;
use crate::uniquify::domain::ContentId;
use crate::uniquify::services::{BatchReport, ResolveStats};
use std::path::PathBuf;

/// What happened to one analysis of the run
#[derive(Debug, Clone, PartialEq)]
pub struct ReportOutcome {
    /// File the analysis was read from
    pub path: PathBuf,
    /// Content id of the stored analysis row
    pub root_id: ContentId,
    /// Per-report counters; only set in resolve mode
    pub stats: Option<ResolveStats>,
}

/// Facts about the run itself
#[derive(Debug, Clone, PartialEq)]
pub struct RunMetadata {
    /// RFC 3339 start time
    pub started_at: String,
    pub tool_name: String,
    pub tool_version: String,
    pub mode: IngestMode,
}

impl RunMetadata {
    pub fn new(started_at: String, mode: IngestMode) -> Self {
        Self {
            started_at,
            tool_name: env!("CARGO_PKG_NAME").to_string(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            mode,
        }
    }
}

/// IngestResponse - Result DTO of the ingest use case
#[derive(Debug, Clone)]
pub struct IngestResponse {
    pub reports: Vec<ReportOutcome>,
    /// Present in bulk mode
    pub batch: Option<BatchReport>,
    /// New rows committed by this run
    pub rows_written: usize,
    pub metadata: RunMetadata,
}

impl IngestResponse {
    pub fn analyses(&self) -> usize {
        self.reports.len()
    }

    /// Records that were already stored or already staged by this run.
    pub fn rows_reused(&self) -> usize {
        match &self.batch {
            Some(batch) => batch.already_present,
            None => self
                .reports
                .iter()
                .filter_map(|r| r.stats)
                .map(|s| s.cache_hits + s.store_hits)
                .sum(),
        }
    }
}
