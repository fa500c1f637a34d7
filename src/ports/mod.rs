/// Ports module defining interfaces for hexagonal architecture
///
/// Only outbound (driven) ports exist: the store, the report source and
/// progress reporting.
pub mod outbound;
