use super::schema::{quoted, PRAGMAS, SCHEMA};
use super::sqlite_store::SqliteStore;
use crate::ports::outbound::RecordDatabase;
use crate::shared::security::validate_database_path;
use crate::shared::Result;
use crate::uniquify::domain::Table;
use anyhow::Context;
use rusqlite::Connection;
use std::path::Path;
use tracing::debug;

/// SqliteDatabase adapter owning the SQLite connection.
///
/// Opening applies the connection pragmas and creates any missing tables;
/// [`RecordDatabase::begin`] hands out one transaction at a time.
pub struct SqliteDatabase {
    conn: Connection,
}

impl SqliteDatabase {
    /// Opens (or creates) a database file.
    ///
    /// # Errors
    /// Returns an error if the path is a symlink or not a regular file, or
    /// if SQLite cannot open it or apply the schema
    pub fn open(path: &Path) -> Result<Self> {
        validate_database_path(path)?;
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database {}", path.display()))?;
        debug!(path = %path.display(), "opened report database");
        Self::initialize(conn)
    }

    /// Private in-memory database, mostly for tests.
    pub fn in_memory() -> Result<Self> {
        Self::initialize(Connection::open_in_memory()?)
    }

    fn initialize(conn: Connection) -> Result<Self> {
        conn.execute_batch(PRAGMAS)?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    pub fn row_count(&self, table: Table) -> Result<usize> {
        let sql = format!("SELECT COUNT(*) FROM {}", quoted(table.name()));
        let count: i64 = self.conn.query_row(&sql, [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Rows across every report table.
    pub fn total_rows(&self) -> Result<usize> {
        Table::ALL
            .into_iter()
            .map(|table| self.row_count(table))
            .sum()
    }
}

impl RecordDatabase for SqliteDatabase {
    type Session<'a> = SqliteStore<'a>;

    fn begin(&mut self) -> Result<SqliteStore<'_>> {
        Ok(SqliteStore::new(self.conn.transaction()?))
    }
}
