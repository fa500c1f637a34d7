use crate::uniquify::domain::{ContentId, RecordKind};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// CI jobs that backfill report corpora use these to tell a rejected
/// ingestion apart from a broken invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Every report was ingested and committed
    Success = 0,
    /// The store or the engine rejected an ingestion (constraint violation,
    /// structural mismatch); the failing unit of work was rolled back
    IngestionFailed = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Anything else: unreadable report, bad config, unusable database path
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Classifies an error returned from an ingestion run.
    pub fn for_error(err: &anyhow::Error) -> Self {
        if err.downcast_ref::<rusqlite::Error>().is_some() {
            return ExitCode::IngestionFailed;
        }
        match err.downcast_ref::<IngestError>() {
            Some(IngestError::StructuralMismatch { .. })
            | Some(IngestError::MissingContentId { .. }) => ExitCode::IngestionFailed,
            _ => ExitCode::ApplicationError,
        }
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::IngestionFailed => write!(f, "Ingestion Failed (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Errors raised while reading, identifying and persisting reports.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Report file not found: {path}\n\n💡 Hint: {suggestion}")]
    ReportNotFound { path: PathBuf, suggestion: String },

    #[error("Failed to parse report file: {path}\nDetails: {details}\n\n💡 Hint: Reports must be JSON documents holding one analysis object or an array of them")]
    ReportParseError { path: PathBuf, details: String },

    #[error("{kind} record reached the store without a content id\n\n💡 Hint: Run identity assignment on the report before resolving it")]
    MissingContentId { kind: RecordKind },

    #[error("Structural mismatch for {kind} {id}: {details}")]
    StructuralMismatch {
        kind: RecordKind,
        id: ContentId,
        details: String,
    },

    #[error("Invalid database path: {path}\nReason: {reason}\n\n💡 Hint: Point --database at a regular file or a path that does not exist yet")]
    InvalidDatabasePath { path: PathBuf, reason: String },

    /// Validation error for value objects and configuration
    #[error("Validation error: {message}")]
    Validation { message: String },
}
