//! Graph Traversals
//!
//! Depth-first walks over the forward edges of an [`Adjacency`] table.
//!
//! Both walks keep their own explicit stack instead of recursing, so a long
//! dependency chain costs heap memory rather than call-stack depth. Stacks
//! start out inline and only spill to the heap for deep graphs.

use std::collections::btree_set;

use smallvec::SmallVec;

use super::adjacency::Adjacency;
use super::node::NodeId;

/// Stack depth kept inline before spilling to the heap.
const INLINE_DEPTH: usize = 32;

/// A node being expanded, together with the successors still to look at.
type Frame<'a> = (NodeId, btree_set::Iter<'a, NodeId>);

/// Dense visited set indexed by [`NodeId`].
#[derive(Debug, Clone, Default)]
pub(crate) struct Visited {
    seen: Vec<bool>,
    count: usize,
}

impl Visited {
    pub(crate) fn new(node_count: usize) -> Self {
        Self {
            seen: vec![false; node_count],
            count: 0,
        }
    }

    /// Mark `id` as visited. Returns `true` if it was not visited before.
    pub(crate) fn insert(&mut self, id: NodeId) -> bool {
        if id.index() >= self.seen.len() {
            self.seen.resize(id.index() + 1, false);
        }
        let fresh = !self.seen[id.index()];
        if fresh {
            self.seen[id.index()] = true;
            self.count += 1;
        }
        fresh
    }

    pub(crate) fn contains(&self, id: NodeId) -> bool {
        self.seen.get(id.index()).copied().unwrap_or(false)
    }

    pub(crate) fn len(&self) -> usize {
        self.count
    }

    /// Visited ids in ascending order.
    pub(crate) fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.seen
            .iter()
            .enumerate()
            .filter(|(_, seen)| **seen)
            .map(|(index, _)| NodeId::from(index))
    }
}

/// Collect every id reachable from `roots` through forward edges.
///
/// The roots themselves are always part of the result. Visiting order is
/// unspecified; only the resulting set matters.
pub(crate) fn reachable<I>(adjacency: &Adjacency, roots: I, node_count: usize) -> Visited
where
    I: IntoIterator<Item = NodeId>,
{
    let mut visited = Visited::new(node_count);
    let mut stack: SmallVec<[NodeId; INLINE_DEPTH]> = SmallVec::new();

    for root in roots {
        if visited.insert(root) {
            stack.push(root);
        }
    }

    while let Some(node) = stack.pop() {
        for &next in adjacency.successors(node) {
            if visited.insert(next) {
                stack.push(next);
            }
        }
    }

    visited
}

/// Depth-first post-order over everything reachable from `roots`.
///
/// Roots are expanded in the order given, sharing one visited set, so a node
/// reachable from several roots is emitted once under the first root that
/// reaches it. Successors are expanded in ascending id order and a node is
/// emitted only after all of its unvisited descendants. Cycles are cut at the
/// first already-visited node, so the walk always terminates.
pub(crate) fn post_order<I>(adjacency: &Adjacency, roots: I, node_count: usize) -> Vec<NodeId>
where
    I: IntoIterator<Item = NodeId>,
{
    let mut visited = Visited::new(node_count);
    let mut order = Vec::new();
    let mut stack: SmallVec<[Frame<'_>; INLINE_DEPTH]> = SmallVec::new();

    for root in roots {
        if !visited.insert(root) {
            continue;
        }
        stack.push((root, adjacency.successors(root).iter()));

        while let Some((node, successors)) = stack.last_mut() {
            let node = *node;
            match successors.find(|next| !visited.contains(**next)) {
                Some(&next) => {
                    visited.insert(next);
                    stack.push((next, adjacency.successors(next).iter()));
                }
                None => {
                    stack.pop();
                    order.push(node);
                }
            }
        }
    }

    order
}
