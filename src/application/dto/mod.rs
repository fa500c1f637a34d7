/// Data Transfer Objects for application layer
///
/// DTOs carry requests from the CLI into the use case and results back out,
/// keeping the core types out of the adapters' way.
mod ingest_mode;
mod ingest_request;
mod ingest_response;

pub use ingest_mode::IngestMode;
pub use ingest_request::IngestRequest;
pub use ingest_response::{IngestResponse, ReportOutcome, RunMetadata};
