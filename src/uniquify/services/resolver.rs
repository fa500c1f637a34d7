use crate::ports::outbound::RecordStore;
use crate::shared::error::IngestError;
use crate::shared::Result;
use crate::uniquify::domain::{DedupCache, NodeId, RecordRef, ReportTree, Row, ROOT};
use tracing::{debug, trace};

/// One entry of the explicit traversal stack.
#[derive(Debug, Clone, Copy)]
struct Frame {
    node: NodeId,
    next_child: usize,
}

/// Walks `tree` in strict post-order without recursion.
///
/// `finalize` runs exactly once per node, after all of the node's
/// descendants, and returns the node's canonical row (`None` for list
/// nodes). The row is linked into the parent before the walk moves on, and
/// the root's row is returned.
pub(crate) fn walk_post_order<'a, F>(tree: &mut ReportTree<'a>, mut finalize: F) -> Result<Row>
where
    F: FnMut(&mut ReportTree<'a>, NodeId) -> Result<Option<Row>>,
{
    let mut stack = vec![Frame {
        node: ROOT,
        next_child: 0,
    }];

    while let Some(frame) = stack.last_mut() {
        let node = frame.node;
        tree.fill_children(node);

        if let Some(child) = tree.children(node).get(frame.next_child).copied() {
            frame.next_child += 1;
            stack.push(Frame {
                node: child,
                next_child: 0,
            });
            continue;
        }

        stack.pop();
        let Some(row) = finalize(tree, node)? else {
            continue;
        };
        if node == ROOT {
            tree.mark_resolved(node, row.clone());
            return Ok(row);
        }
        tree.link_to_parent(node, row.id());
        tree.mark_resolved(node, row);
    }

    anyhow::bail!("Traversal ended without resolving the root record")
}

/// Counters for one [`Resolver::resolve`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveStats {
    /// Record nodes finalized (list nodes excluded)
    pub visited: usize,
    /// Nodes answered by the dedup cache
    pub cache_hits: usize,
    /// Nodes found already stored
    pub store_hits: usize,
    /// Point lookups issued against the store
    pub existence_checks: usize,
    /// Rows inserted
    pub written: usize,
}

/// Result of resolving one report.
#[derive(Debug)]
pub struct Resolution {
    /// Canonical row of the root record
    pub root: Row,
    /// The cache handed in, extended with everything this walk resolved
    pub cache: DedupCache,
    pub stats: ResolveStats,
}

/// Resolver service: turns a report tree into canonical stored rows.
///
/// Each record node is looked up in the dedup cache first, then (once) in the
/// store, and written only when neither knows it. Writes are staged in the
/// caller's session; the resolver never commits.
pub struct Resolver<'s, S: RecordStore + ?Sized> {
    store: &'s S,
}

impl<'s, S: RecordStore + ?Sized> Resolver<'s, S> {
    pub fn new(store: &'s S) -> Self {
        Self { store }
    }

    /// Resolves `root` and every record below it.
    ///
    /// # Errors
    /// Store errors are returned unchanged. A store hit of a different
    /// record kind is a [`IngestError::StructuralMismatch`]; a record without
    /// an id is a [`IngestError::MissingContentId`].
    pub fn resolve(&self, root: RecordRef<'_>, mut cache: DedupCache) -> Result<Resolution> {
        let mut tree = ReportTree::new(root);
        let mut stats = ResolveStats::default();

        let root = walk_post_order(&mut tree, |tree, node| {
            let Some((kind, id)) = tree.key(node)? else {
                return Ok(None);
            };
            stats.visited += 1;

            if let Some(row) = cache.lookup(kind, &id) {
                trace!(%kind, %id, "dedup cache hit");
                stats.cache_hits += 1;
                return Ok(Some(row.clone()));
            }

            if !tree.node(node).queried() {
                stats.existence_checks += 1;
                let stored = self.store.find(kind, &id)?;
                tree.record_query(node, stored.is_some());
                if let Some(stored) = stored {
                    if stored.kind() != kind {
                        return Err(IngestError::StructuralMismatch {
                            kind,
                            id,
                            details: format!("stored row is a {}", stored.kind()),
                        }
                        .into());
                    }
                    trace!(%kind, %id, "already stored");
                    stats.store_hits += 1;
                    return Ok(Some(cache.remember(stored).clone()));
                }
            }

            let row = tree.pending_row(node)?;
            self.store.insert(&row)?;
            debug!(%kind, %id, columns = row.column_count(), "inserted row");
            stats.written += 1;
            Ok(Some(cache.remember(row).clone()))
        })?;

        debug!(
            nodes = tree.len(),
            visited = stats.visited,
            written = stats.written,
            "resolved report tree"
        );
        Ok(Resolution {
            root,
            cache,
            stats,
        })
    }
}
