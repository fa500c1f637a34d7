mod database;
mod schema;
mod sqlite_store;

pub use database::SqliteDatabase;
pub use sqlite_store::SqliteStore;
