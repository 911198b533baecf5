//! Dependency Graph
//!
//! [`DependencyGraph`] owns a set of node values, the directed edges between
//! them, and the set of source nodes that every traversal starts from.
//!
//! # Lifecycle
//!
//! 1. Build the graph with [`add_source`](DependencyGraph::add_source),
//!    [`add_node`](DependencyGraph::add_node) and
//!    [`add_edge`](DependencyGraph::add_edge).
//!
//! 2. Prune it with [`remove_node`](DependencyGraph::remove_node) and
//!    [`remove_non_reachable`](DependencyGraph::remove_non_reachable).
//!
//! 3. Read it back with [`topological_sort`](DependencyGraph::topological_sort)
//!    or [`nodes`](DependencyGraph::nodes).
//!
//! # Soft Deletion
//!
//! Removing a node never erases it. Its identity record stays behind with the
//! `active` flag cleared, its id is never handed out again, and a source stays
//! a source. Only its edges are gone for good: adding the same value again
//! reactivates the old id with no edges at all.

use std::collections::BTreeSet;
use std::hash::Hash;

use indexmap::map::Entry;
use indexmap::IndexMap;
use tracing::{debug, trace};

use super::adjacency::Adjacency;
use super::node::{NodeId, NodeRecord};
use super::traversal;
use crate::error::{GraphError, Result};

/// Direction of the sequence produced by
/// [`DependencyGraph::topological_sort`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// For every edge `a -> b`, `a` comes before `b`.
    #[default]
    Topological,

    /// For every edge `a -> b`, `b` comes before `a`.
    Reverse,
}

/// A directed graph over values of `T`, deduplicated by value.
///
/// The map position of a value doubles as its [`NodeId`]: entries are only
/// ever appended, so the map is both the identity index and the
/// insertion-ordered node store.
#[derive(Debug, Clone)]
pub struct DependencyGraph<T> {
    /// Every value ever inserted, with its identity record.
    pub(super) nodes: IndexMap<T, NodeRecord>,

    /// Forward and reverse edges, indexed by id.
    pub(super) adjacency: Adjacency,

    /// Entry points for reachability and sorting.
    pub(super) sources: BTreeSet<NodeId>,
}

impl<T> DependencyGraph<T> {
    /// Create a new empty graph.
    pub fn new() -> Self {
        Self {
            nodes: IndexMap::new(),
            adjacency: Adjacency::default(),
            sources: BTreeSet::new(),
        }
    }

    /// Create an empty graph with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: IndexMap::with_capacity(capacity),
            adjacency: Adjacency::with_capacity(capacity),
            sources: BTreeSet::new(),
        }
    }

    /// Number of active nodes.
    pub fn len(&self) -> usize {
        self.nodes.values().filter(|record| record.active).count()
    }

    /// Whether the graph has no active nodes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of distinct values ever inserted, removed ones included.
    pub fn total_len(&self) -> usize {
        self.nodes.len()
    }

    /// Look up the value stored under `id`.
    ///
    /// Removed nodes keep their value, so this succeeds for any id the graph
    /// has handed out.
    pub fn node(&self, id: NodeId) -> Result<&T> {
        self.nodes
            .get_index(id.index())
            .map(|(node, _)| node)
            .ok_or(GraphError::UnknownNode(id))
    }

    /// Whether `id` names an active node.
    pub fn is_active(&self, id: NodeId) -> bool {
        self.nodes
            .get_index(id.index())
            .is_some_and(|(_, record)| record.active)
    }

    /// Source ids in ascending order, removed sources included.
    pub fn sources(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.sources.iter().copied()
    }

    /// Active nodes with their records, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&T, NodeRecord)> + '_ {
        self.nodes
            .iter()
            .filter(|(_, record)| record.active)
            .map(|(node, record)| (node, *record))
    }

    /// Every edge as `(src, dest)`, grouped by source in insertion order and
    /// ascending by destination within a group.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.iter().flat_map(move |(_, record)| {
            self.adjacency
                .successors(record.id)
                .iter()
                .map(move |&dest| (record.id, dest))
        })
    }

    /// Ids reachable from the sources through forward edges, ascending.
    pub fn reachable(&self) -> Vec<NodeId> {
        self.reachable_set().ids().collect()
    }

    fn reachable_set(&self) -> traversal::Visited {
        traversal::reachable(&self.adjacency, self.sources(), self.nodes.len())
    }

    fn values_of<'a>(&'a self, ids: &'a BTreeSet<NodeId>) -> impl Iterator<Item = &'a T> + 'a {
        ids.iter()
            .filter_map(move |id| self.nodes.get_index(id.index()))
            .map(|(node, _)| node)
    }
}

impl<T> Default for DependencyGraph<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> DependencyGraph<T>
where
    T: Eq + Hash + Clone,
{
    /// Add a node to the graph.
    ///
    /// A new value gets the next id. A removed value is reactivated under its
    /// old id, without the edges it had before. An active value is left alone.
    pub fn add_node(&mut self, node: T) -> NodeId {
        self.insert(node, false)
    }

    /// Add a node and register it as a traversal entry point.
    ///
    /// The source flag only applies when the value is new: a value the graph
    /// has already seen keeps whatever role it was first inserted with.
    pub fn add_source(&mut self, node: T) -> NodeId {
        self.insert(node, true)
    }

    fn insert(&mut self, node: T, is_source: bool) -> NodeId {
        match self.nodes.entry(node) {
            Entry::Occupied(mut entry) => {
                let record = entry.get_mut();
                if record.reactivate() {
                    trace!(id = %record.id, "reactivated node");
                }
                record.id
            }
            Entry::Vacant(entry) => {
                let record = NodeRecord::new(entry.index());
                entry.insert(record);
                self.adjacency.push_node(record.id);
                if is_source {
                    self.sources.insert(record.id);
                }
                trace!(id = %record.id, is_source, "inserted node");
                record.id
            }
        }
    }

    /// Add an edge `src -> dest`, inserting either endpoint if needed.
    ///
    /// Endpoints are added as plain nodes, never as sources. Adding an edge
    /// that already exists has no effect.
    pub fn add_edge(&mut self, src: T, dest: T) {
        let src = self.add_node(src);
        let dest = self.add_node(dest);
        if self.adjacency.insert(src, dest) {
            trace!(%src, %dest, "inserted edge");
        }
    }

    /// Remove a node from the graph.
    ///
    /// Also removes all edges involving this node. The node keeps its id and
    /// source membership. Returns `true` if an active node was removed.
    pub fn remove_node(&mut self, node: &T) -> bool {
        let Some(record) = self.nodes.get_mut(node) else {
            return false;
        };
        let id = record.id;
        let was_active = record.active;
        record.deactivate();

        let edges = self.adjacency.isolate(id);
        trace!(%id, edges, "removed node");
        was_active
    }

    /// Active values in the order they were first inserted.
    pub fn nodes(&self) -> Vec<T> {
        self.iter().map(|(node, _)| node.clone()).collect()
    }

    /// Whether there is a direct edge `src -> dest`.
    ///
    /// Unknown values are never connected.
    pub fn is_connected(&self, src: &T, dest: &T) -> bool {
        match (self.nodes.get(src), self.nodes.get(dest)) {
            (Some(src), Some(dest)) => self.adjacency.contains(src.id, dest.id),
            _ => false,
        }
    }

    /// Whether `node` is known and active.
    pub fn contains(&self, node: &T) -> bool {
        self.nodes.get(node).is_some_and(|record| record.active)
    }

    /// Id of a known value, active or not.
    pub fn node_id(&self, node: &T) -> Option<NodeId> {
        self.nodes.get(node).map(|record| record.id)
    }

    /// Identity record of a known value.
    pub fn record(&self, node: &T) -> Option<NodeRecord> {
        self.nodes.get(node).copied()
    }

    /// Whether `node` was inserted as a source.
    pub fn is_source(&self, node: &T) -> bool {
        self.node_id(node)
            .is_some_and(|id| self.sources.contains(&id))
    }

    /// Direct successors of `node`, ascending by id.
    pub fn successors<'a>(&'a self, node: &T) -> impl Iterator<Item = &'a T> + 'a {
        self.node_id(node)
            .into_iter()
            .flat_map(move |id| self.values_of(self.adjacency.successors(id)))
    }

    /// Direct predecessors of `node`, ascending by id.
    pub fn predecessors<'a>(&'a self, node: &T) -> impl Iterator<Item = &'a T> + 'a {
        self.node_id(node)
            .into_iter()
            .flat_map(move |id| self.values_of(self.adjacency.predecessors(id)))
    }

    /// Remove every active node that no source can reach.
    ///
    /// This is a one-off prune, not a standing rule: call it again after
    /// later removals. A graph without sources loses every node. Returns the
    /// number of nodes removed.
    pub fn remove_non_reachable(&mut self) -> usize {
        let reachable = self.reachable_set();

        let mut pruned = 0;
        for record in self.nodes.values_mut() {
            if record.active && !reachable.contains(record.id) {
                record.deactivate();
                self.adjacency.isolate(record.id);
                pruned += 1;
            }
        }

        debug!(reachable = reachable.len(), pruned, "pruned non-reachable nodes");
        pruned
    }

    /// Order the nodes reachable from the sources.
    ///
    /// Sources are walked depth-first in ascending id order with one shared
    /// visited set, and successors in ascending id order. Nodes no source can
    /// reach are left out. On a cycle the walk still terminates, but some
    /// edge on the cycle will point backwards in the result.
    pub fn topological_sort(&self, order: SortOrder) -> Vec<T> {
        let roots = self.sources().filter(|&id| self.is_active(id));
        let mut ids = traversal::post_order(&self.adjacency, roots, self.nodes.len());
        if order == SortOrder::Topological {
            ids.reverse();
        }

        debug!(nodes = ids.len(), ?order, "sorted dependency graph");
        ids.into_iter()
            .filter_map(|id| self.nodes.get_index(id.index()))
            .map(|(node, _)| node.clone())
            .collect()
    }
}
