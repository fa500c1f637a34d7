use report_uniquify::prelude::*;
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

type Key = (Table, ContentId);

/// In-memory RecordDatabase whose point lookups only see committed rows
///
/// Rows staged by an open session are invisible to `find`, so anything that
/// relies on seeing its own uncommitted writes has to get them elsewhere.
/// Foreign keys are checked at commit.
#[derive(Default)]
pub struct InMemoryDatabase {
    committed: BTreeMap<Key, Row>,
    pub commits: usize,
    pub rollbacks: usize,
    fail_on: Option<RecordKind>,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every insert of `kind` fail.
    pub fn failing_on(kind: RecordKind) -> Self {
        Self {
            fail_on: Some(kind),
            ..Self::default()
        }
    }

    pub fn row_count(&self, table: Table) -> usize {
        self.committed.keys().filter(|(t, _)| *t == table).count()
    }

    pub fn total_rows(&self) -> usize {
        self.committed.len()
    }

    pub fn get(&self, table: Table, id: &ContentId) -> Option<&Row> {
        self.committed.get(&(table, id.clone()))
    }

    pub fn rows(&self, table: Table) -> Vec<&Row> {
        self.committed
            .iter()
            .filter(|((t, _), _)| *t == table)
            .map(|(_, row)| row)
            .collect()
    }
}

pub struct InMemorySession<'a> {
    db: &'a mut InMemoryDatabase,
    staged: RefCell<BTreeMap<Key, Row>>,
    pub deferred: Cell<bool>,
}

impl InMemorySession<'_> {
    fn exists(&self, key: &Key) -> bool {
        self.db.committed.contains_key(key) || self.staged.borrow().contains_key(key)
    }

    fn check_foreign_keys(&self) -> Result<()> {
        for row in self.staged.borrow().values() {
            for (column, target) in row.table().references() {
                let Some(Value::Text(id)) = row.get(column) else {
                    continue;
                };
                let key = (*target, ContentId::new(id.clone())?);
                if !self.exists(&key) {
                    anyhow::bail!(
                        "FOREIGN KEY constraint failed: {}.{} -> {}",
                        row.table(),
                        column,
                        id
                    );
                }
            }
        }
        Ok(())
    }
}

impl RecordStore for InMemorySession<'_> {
    fn find(&self, kind: RecordKind, id: &ContentId) -> Result<Option<Row>> {
        Ok(self.db.committed.get(&(kind.table(), id.clone())).cloned())
    }

    fn insert(&self, row: &Row) -> Result<()> {
        if self.db.fail_on == Some(row.kind()) {
            anyhow::bail!("injected failure for {}", row.kind());
        }
        let key = (row.table(), row.id().clone());
        if self.exists(&key) {
            anyhow::bail!("UNIQUE constraint failed: {}.id", row.table());
        }
        self.staged.borrow_mut().insert(key, row.clone());
        Ok(())
    }

    fn insert_if_absent(&self, row: &Row) -> Result<bool> {
        let key = (row.table(), row.id().clone());
        if self.exists(&key) {
            return Ok(false);
        }
        self.insert(row)?;
        Ok(true)
    }

    fn defer_constraints(&self) -> Result<()> {
        self.deferred.set(true);
        Ok(())
    }
}

impl RecordSession for InMemorySession<'_> {
    fn commit(self) -> Result<()> {
        self.check_foreign_keys()?;
        let staged = self.staged.into_inner();
        self.db.committed.extend(staged);
        self.db.commits += 1;
        Ok(())
    }

    fn rollback(self) -> Result<()> {
        self.db.rollbacks += 1;
        Ok(())
    }
}

impl RecordDatabase for InMemoryDatabase {
    type Session<'a> = InMemorySession<'a>;

    fn begin(&mut self) -> Result<InMemorySession<'_>> {
        Ok(InMemorySession {
            db: self,
            staged: RefCell::new(BTreeMap::new()),
            deferred: Cell::new(false),
        })
    }
}
