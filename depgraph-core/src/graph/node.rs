//! Graph Nodes
//!
//! This module defines the identity types that live in the dependency graph.

use std::fmt;

/// Identifier of a node in a [`DependencyGraph`](super::DependencyGraph).
///
/// Ids are handed out by the owning graph, starting at 0 and growing by one
/// for every distinct value it has ever seen. They are never reused, so an id
/// stays a valid index into the graph's dense tables after the node it names
/// has been removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// Get the raw ID value.
    pub fn raw(&self) -> usize {
        self.0
    }

    pub(crate) fn index(self) -> usize {
        self.0
    }
}

impl From<usize> for NodeId {
    fn from(id: usize) -> Self {
        Self(id)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity record kept for every value the graph has seen.
///
/// Records are created on first reference and never destroyed. Removing a
/// node only clears `active`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeRecord {
    /// Whether the node is currently part of the graph.
    pub active: bool,

    /// Stable identifier of the node.
    pub id: NodeId,

    /// Position of the node in first-insertion order.
    pub insertion_order: usize,
}

impl NodeRecord {
    /// Create the record for a value seen for the first time.
    ///
    /// Ids are assigned in insertion order, so both fields start out equal.
    pub(crate) fn new(position: usize) -> Self {
        Self {
            active: true,
            id: NodeId(position),
            insertion_order: position,
        }
    }

    /// Mark the node as removed.
    pub(crate) fn deactivate(&mut self) {
        self.active = false;
    }

    /// Bring a removed node back. Returns `true` if the state changed.
    pub(crate) fn reactivate(&mut self) -> bool {
        let changed = !self.active;
        self.active = true;
        changed
    }
}
