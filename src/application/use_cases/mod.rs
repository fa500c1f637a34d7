/// Use cases module containing application orchestration
mod ingest_reports;

pub use ingest_reports::IngestReportsUseCase;
