//! report-uniquify - content-addressed storage for static-analysis reports
//!
//! Reports are trees of records (analysis, metadata, findings, locations,
//! messages, traces...). Every record gets a content-derived id and is
//! stored once, no matter how many reports contain it; parents reference
//! the single stored copy.
//!
//! # Architecture
//!
//! - **Core** (`uniquify`): record model, node view, resolver, batch loader
//! - **Application Layer** (`application`): the ingest use case and its DTOs
//! - **Ports** (`ports`): store, report source and progress interfaces
//! - **Adapters** (`adapters`): SQLite, filesystem and console implementations
//! - **Shared** (`shared`): error types, result alias, input validation
//!
//! # Example
//!
//! ```no_run
//! use report_uniquify::prelude::*;
//! use std::path::PathBuf;
//!
//! # fn main() -> Result<()> {
//! let database = SqliteDatabase::open(&PathBuf::from("reports.db"))?;
//! let mut use_case = IngestReportsUseCase::new(
//!     database,
//!     FileSystemReader::new(),
//!     StderrProgressReporter::new(),
//! );
//!
//! let request = IngestRequest::new(vec![PathBuf::from("run.json")], IngestMode::Resolve);
//! let response = use_case.execute(request)?;
//! println!("{} new rows", response.rows_written);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod ports;
pub mod shared;
pub mod uniquify;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::FileSystemReader;
    pub use crate::adapters::outbound::sqlite::{SqliteDatabase, SqliteStore};
    pub use crate::application::dto::{IngestMode, IngestRequest, IngestResponse, ReportOutcome};
    pub use crate::application::use_cases::IngestReportsUseCase;
    pub use crate::ports::outbound::{
        ProgressReporter, RecordDatabase, RecordSession, RecordStore, ReportReader,
    };
    pub use crate::shared::error::{ExitCode, IngestError};
    pub use crate::shared::Result;
    pub use crate::uniquify::domain::{
        Analysis, ContentId, DedupCache, RecordKind, RecordRef, ReportTree, Row, Table, Value,
    };
    pub use crate::uniquify::services::{
        BatchLoader, BatchReport, IdentityAssigner, Identify, ResolveStats, Resolution, Resolver,
    };
}
