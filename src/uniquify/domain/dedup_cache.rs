use super::{ContentId, RecordKind, Row};
use std::collections::HashMap;

/// Canonical rows seen during one ingestion, keyed by `(kind, id)`.
///
/// Holds both rows staged by this ingestion and rows found in the store, so
/// uncommitted writes are always answered from here.
#[derive(Debug, Default, Clone)]
pub struct DedupCache {
    entries: HashMap<(RecordKind, ContentId), Row>,
}

impl DedupCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lookup(&self, kind: RecordKind, id: &ContentId) -> Option<&Row> {
        self.entries.get(&(kind, id.clone()))
    }

    pub fn contains(&self, kind: RecordKind, id: &ContentId) -> bool {
        self.lookup(kind, id).is_some()
    }

    /// Stores `row` as the canonical object for its key. The first row
    /// remembered for a key wins.
    pub fn remember(&mut self, row: Row) -> &Row {
        self.entries
            .entry((row.kind(), row.id().clone()))
            .or_insert(row)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
