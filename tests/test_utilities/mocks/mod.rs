/// Mock implementations for testing
mod counting_store;
mod in_memory_database;
mod mock_progress_reporter;
mod mock_report_reader;

pub use counting_store::CountingStore;
pub use in_memory_database::{InMemoryDatabase, InMemorySession};
pub use mock_progress_reporter::MockProgressReporter;
pub use mock_report_reader::MockReportReader;
