//! Lazy node view over a parsed report.
//!
//! Nodes live in an arena owned by [`ReportTree`] and refer to each other by
//! index. Children are materialized on first need; the parsed report is only
//! ever borrowed.

use super::record::{AttributeValue, ListRef, RecordRef};
use super::{ContentId, RecordKind, Row};
use crate::shared::error::IngestError;
use crate::shared::Result;
use std::collections::BTreeMap;

pub type NodeId = usize;

/// Arena index of the node passed to [`ReportTree::new`].
pub const ROOT: NodeId = 0;

/// What a node stands for.
#[derive(Debug, Clone, Copy)]
pub enum Subject<'a> {
    /// A storable record.
    Record(RecordRef<'a>),
    /// A collection attribute of the parent record; never stored.
    List(ListRef<'a>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeState {
    Unresolved,
    Resolved(Row),
}

#[derive(Debug)]
pub struct Node<'a> {
    subject: Subject<'a>,
    parent: Option<NodeId>,
    attribute_name: Option<&'static str>,
    children: Vec<NodeId>,
    children_filled: bool,
    queried: bool,
    resolved_in_store: bool,
    links: BTreeMap<String, ContentId>,
    state: NodeState,
}

impl<'a> Node<'a> {
    fn new(subject: Subject<'a>, parent: Option<NodeId>, attribute_name: Option<&'static str>) -> Self {
        Self {
            subject,
            parent,
            attribute_name,
            children: Vec::new(),
            children_filled: false,
            queried: false,
            resolved_in_store: false,
            links: BTreeMap::new(),
            state: NodeState::Unresolved,
        }
    }

    pub fn subject(&self) -> Subject<'a> {
        self.subject
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Role this node plays in its parent; `None` for list elements and the root.
    pub fn attribute_name(&self) -> Option<&'static str> {
        self.attribute_name
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn children_filled(&self) -> bool {
        self.children_filled
    }

    pub fn queried(&self) -> bool {
        self.queried
    }

    pub fn resolved_in_store(&self) -> bool {
        self.resolved_in_store
    }

    pub fn state(&self) -> &NodeState {
        &self.state
    }

    pub fn is_list(&self) -> bool {
        matches!(self.subject, Subject::List(_))
    }
}

/// Arena of materialized report nodes.
#[derive(Debug)]
pub struct ReportTree<'a> {
    nodes: Vec<Node<'a>>,
}

impl<'a> ReportTree<'a> {
    pub fn new(root: RecordRef<'a>) -> Self {
        Self {
            nodes: vec![Node::new(Subject::Record(root), None, None)],
        }
    }

    /// Number of nodes materialized so far.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> &Node<'a> {
        &self.nodes[id]
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id].children
    }

    /// Materializes the children of `id` once.
    ///
    /// Scalars stay on the owner. Null attributes produce nothing. A
    /// collection becomes a list node whose elements are its children.
    pub fn fill_children(&mut self, id: NodeId) {
        if self.nodes[id].children_filled {
            return;
        }

        let pending: Vec<(Subject<'a>, Option<&'static str>)> = match self.nodes[id].subject {
            Subject::Record(record) => record
                .attributes()
                .into_iter()
                .filter_map(|attribute| match attribute.value {
                    AttributeValue::Record(child) => {
                        Some((Subject::Record(child), Some(attribute.name)))
                    }
                    AttributeValue::List(list) => Some((Subject::List(list), Some(attribute.name))),
                    AttributeValue::Scalar(_) | AttributeValue::Null => None,
                })
                .collect(),
            Subject::List(list) => list
                .items()
                .into_iter()
                .map(|item| (Subject::Record(item), None))
                .collect(),
        };

        for (subject, attribute_name) in pending {
            let child = self.nodes.len();
            self.nodes.push(Node::new(subject, Some(id), attribute_name));
            self.nodes[id].children.push(child);
        }
        self.nodes[id].children_filled = true;
    }

    /// Dedup key of a record node; `None` for list nodes.
    pub fn key(&self, id: NodeId) -> Result<Option<(RecordKind, ContentId)>> {
        match self.nodes[id].subject {
            Subject::List(_) => Ok(None),
            Subject::Record(record) => {
                let content_id = record
                    .id()
                    .ok_or(IngestError::MissingContentId {
                        kind: record.kind(),
                    })?
                    .clone();
                Ok(Some((record.kind(), content_id)))
            }
        }
    }

    /// Builds the row this node would be stored as: its scalars, the ids of
    /// the children linked so far and, for a list element, the owner's id.
    pub fn pending_row(&self, id: NodeId) -> Result<Row> {
        let node = &self.nodes[id];
        let Subject::Record(record) = node.subject else {
            anyhow::bail!("List node {} has no row", id);
        };
        let content_id = record.id().ok_or(IngestError::MissingContentId {
            kind: record.kind(),
        })?;

        let mut row = Row::new(record.kind(), content_id.clone());
        for attribute in record.attributes() {
            if let AttributeValue::Scalar(value) = attribute.value {
                row.set(attribute.name, value);
            }
        }
        for (column, target) in &node.links {
            row.set(column.as_str(), target);
        }
        if let Some((column, owner_id)) = self.owner_link(id)? {
            row.set(column, &owner_id);
        }
        Ok(row)
    }

    /// Foreign key from a list element back to the record owning the list.
    ///
    /// The element's id does not cover its owner. An element already stored
    /// under an earlier owner keeps that link, so a later analysis or trace
    /// holding the same element gets no row pointing back at it.
    fn owner_link(&self, id: NodeId) -> Result<Option<(String, ContentId)>> {
        let Some(parent) = self.nodes[id].parent else {
            return Ok(None);
        };
        if !self.nodes[parent].is_list() {
            return Ok(None);
        }
        let Some(owner) = self.nodes[parent].parent else {
            return Ok(None);
        };
        match self.key(owner)? {
            Some((kind, owner_id)) => Ok(Some((kind.table().owner_column(), owner_id))),
            None => Ok(None),
        }
    }

    /// Points the parent's `<role>_id` column at the resolved child. Elements
    /// of a list carry the owner link themselves, so nothing changes there.
    pub fn link_to_parent(&mut self, id: NodeId, resolved: &ContentId) {
        let Some(parent) = self.nodes[id].parent else {
            return;
        };
        if self.nodes[parent].is_list() {
            return;
        }
        if let Some(role) = self.nodes[id].attribute_name {
            self.nodes[parent]
                .links
                .insert(format!("{}_id", role), resolved.clone());
        }
    }

    pub fn record_query(&mut self, id: NodeId, found: bool) {
        let node = &mut self.nodes[id];
        node.queried = true;
        node.resolved_in_store = found;
    }

    pub fn mark_resolved(&mut self, id: NodeId, row: Row) {
        self.nodes[id].state = NodeState::Resolved(row);
    }
}
