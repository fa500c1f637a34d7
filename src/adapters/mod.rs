/// Adapters layer - Infrastructure implementations
///
/// Concrete implementations of the outbound ports: SQLite storage, report
/// files on disk and console progress.
pub mod outbound;
