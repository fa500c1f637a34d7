/// Result alias used across the crate.
///
/// Store errors travel inside `anyhow::Error` untouched, so callers can still
/// `downcast_ref::<rusqlite::Error>()` to inspect constraint violations.
pub type Result<T> = std::result::Result<T, anyhow::Error>;
