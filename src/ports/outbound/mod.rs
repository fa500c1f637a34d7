/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the ingestion core uses
/// to reach the store, the report files and the console.
pub mod progress_reporter;
pub mod record_store;
pub mod report_reader;

pub use progress_reporter::ProgressReporter;
pub use record_store::{RecordDatabase, RecordSession, RecordStore};
pub use report_reader::ReportReader;
