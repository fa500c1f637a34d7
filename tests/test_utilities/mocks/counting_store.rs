use report_uniquify::prelude::*;
use std::cell::{Cell, RefCell};

/// RecordStore decorator recording every call made to the inner store
pub struct CountingStore<S> {
    inner: S,
    pub finds: Cell<usize>,
    pub inserts: Cell<usize>,
    pub conditional_inserts: Cell<usize>,
    pub deferrals: Cell<usize>,
    /// `(kind, id)` of every lookup, in call order
    pub lookups: RefCell<Vec<(RecordKind, ContentId)>>,
    /// Every row handed to `insert` or `insert_if_absent`, in call order
    pub written: RefCell<Vec<Row>>,
}

impl<S: RecordStore> CountingStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            finds: Cell::new(0),
            inserts: Cell::new(0),
            conditional_inserts: Cell::new(0),
            deferrals: Cell::new(0),
            lookups: RefCell::new(Vec::new()),
            written: RefCell::new(Vec::new()),
        }
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: RecordStore> RecordStore for CountingStore<S> {
    fn find(&self, kind: RecordKind, id: &ContentId) -> Result<Option<Row>> {
        self.finds.set(self.finds.get() + 1);
        self.lookups.borrow_mut().push((kind, id.clone()));
        self.inner.find(kind, id)
    }

    fn insert(&self, row: &Row) -> Result<()> {
        self.inserts.set(self.inserts.get() + 1);
        self.written.borrow_mut().push(row.clone());
        self.inner.insert(row)
    }

    fn insert_if_absent(&self, row: &Row) -> Result<bool> {
        self.conditional_inserts
            .set(self.conditional_inserts.get() + 1);
        self.written.borrow_mut().push(row.clone());
        self.inner.insert_if_absent(row)
    }

    fn defer_constraints(&self) -> Result<()> {
        self.deferrals.set(self.deferrals.get() + 1);
        self.inner.defer_constraints()
    }
}
