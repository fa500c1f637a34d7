use super::resolver::walk_post_order;
use crate::ports::outbound::RecordStore;
use crate::shared::Result;
use crate::uniquify::domain::{ContentId, RecordKind, RecordRef, ReportTree, Row};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Outcome of one [`BatchLoader::bulk_load`] call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Distinct `(kind, id)` pairs across all roots
    pub distinct_records: usize,
    /// Rows actually written
    pub inserted: usize,
    /// Rows skipped because the store already had them
    pub already_present: usize,
    /// Distinct records per kind
    pub per_kind: BTreeMap<RecordKind, usize>,
}

/// BatchLoader service for corpus-wide ingestion
///
/// Collects the rows of every report into per-kind buckets keyed by content
/// id, then writes the buckets in [`RecordKind::INSERT_ORDER`] with
/// insert-if-absent semantics. Loading the same corpus twice writes nothing
/// the second time.
pub struct BatchLoader<'s, S: RecordStore + ?Sized> {
    store: &'s S,
}

impl<'s, S: RecordStore + ?Sized> BatchLoader<'s, S> {
    pub fn new(store: &'s S) -> Self {
        Self { store }
    }

    pub fn bulk_load<'a, I>(&self, roots: I) -> Result<BatchReport>
    where
        I: IntoIterator<Item = RecordRef<'a>>,
    {
        let buckets = collect(roots)?;

        let mut report = BatchReport::default();
        for (kind, rows) in &buckets {
            report.per_kind.insert(*kind, rows.len());
            report.distinct_records += rows.len();
        }

        // list elements reference owners stored in a later tier
        self.store.defer_constraints()?;

        for kind in RecordKind::INSERT_ORDER {
            let Some(rows) = buckets.get(&kind) else {
                continue;
            };
            let mut inserted = 0;
            for row in rows.values() {
                if self.store.insert_if_absent(row)? {
                    inserted += 1;
                }
            }
            debug!(%kind, distinct = rows.len(), inserted, "bulk inserted bucket");
            report.inserted += inserted;
            report.already_present += rows.len() - inserted;
        }

        info!(
            distinct = report.distinct_records,
            inserted = report.inserted,
            "bulk load staged"
        );
        Ok(report)
    }
}

type Buckets = BTreeMap<RecordKind, BTreeMap<ContentId, Row>>;

/// One full traversal per root; the first row seen for a key is kept.
fn collect<'a, I>(roots: I) -> Result<Buckets>
where
    I: IntoIterator<Item = RecordRef<'a>>,
{
    let mut buckets = Buckets::new();
    for root in roots {
        let mut tree = ReportTree::new(root);
        walk_post_order(&mut tree, |tree, node| {
            let Some((kind, id)) = tree.key(node)? else {
                return Ok(None);
            };
            let bucket = buckets.entry(kind).or_default();
            if let Some(existing) = bucket.get(&id) {
                return Ok(Some(existing.clone()));
            }
            let row = tree.pending_row(node)?;
            bucket.insert(id, row.clone());
            Ok(Some(row))
        })?;
    }
    Ok(buckets)
}
