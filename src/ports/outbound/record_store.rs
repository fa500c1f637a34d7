use crate::shared::Result;
use crate::uniquify::domain::{ContentId, RecordKind, Row};

/// RecordStore port for the durable backing store
///
/// Every call runs inside the caller's open unit of work. Store errors are
/// returned as they come from the backend so callers can downcast them.
pub trait RecordStore {
    /// Point lookup by primary key in the table of `kind`.
    ///
    /// Returns the stored row with its actual kind, which may differ from
    /// `kind` when the table is polymorphic.
    fn find(&self, kind: RecordKind, id: &ContentId) -> Result<Option<Row>>;

    /// Inserts a row. A duplicate primary key is an error.
    fn insert(&self, row: &Row) -> Result<()>;

    /// Inserts a row unless one with the same primary key exists.
    ///
    /// # Returns
    /// `true` when the row was written
    fn insert_if_absent(&self, row: &Row) -> Result<bool>;

    /// Defers foreign-key checking to the end of the unit of work.
    fn defer_constraints(&self) -> Result<()>;
}

/// An open unit of work against the store.
pub trait RecordSession: RecordStore {
    fn commit(self) -> Result<()>;

    fn rollback(self) -> Result<()>;
}

/// Source of store sessions.
pub trait RecordDatabase {
    type Session<'a>: RecordSession
    where
        Self: 'a;

    /// Opens a new unit of work.
    fn begin(&mut self) -> Result<Self::Session<'_>>;
}

impl<T: RecordStore + ?Sized> RecordStore for &T {
    fn find(&self, kind: RecordKind, id: &ContentId) -> Result<Option<Row>> {
        (**self).find(kind, id)
    }

    fn insert(&self, row: &Row) -> Result<()> {
        (**self).insert(row)
    }

    fn insert_if_absent(&self, row: &Row) -> Result<bool> {
        (**self).insert_if_absent(row)
    }

    fn defer_constraints(&self) -> Result<()> {
        (**self).defer_constraints()
    }
}
