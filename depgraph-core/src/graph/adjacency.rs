//! Adjacency Tables
//!
//! Forward and reverse edge sets, indexed densely by [`NodeId`].
//!
//! Every edge is stored twice: `dest` in the forward set of `src`, and `src`
//! in the reverse set of `dest`. All mutation goes through this type so the
//! two halves cannot drift apart.

use std::collections::BTreeSet;

use super::node::NodeId;

static NO_EDGES: BTreeSet<NodeId> = BTreeSet::new();

/// Paired forward/reverse adjacency for a graph with dense ids.
#[derive(Debug, Clone, Default)]
pub(crate) struct Adjacency {
    /// `forward[src]` holds every `dest` with an edge `src -> dest`.
    forward: Vec<BTreeSet<NodeId>>,

    /// `reverse[dest]` holds every `src` with an edge `src -> dest`.
    reverse: Vec<BTreeSet<NodeId>>,
}

impl Adjacency {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            forward: Vec::with_capacity(capacity),
            reverse: Vec::with_capacity(capacity),
        }
    }

    /// Allocate empty edge sets for a freshly assigned id.
    pub(crate) fn push_node(&mut self, id: NodeId) {
        debug_assert_eq!(id.index(), self.forward.len(), "ids must be dense");
        self.forward.push(BTreeSet::new());
        self.reverse.push(BTreeSet::new());
    }

    /// Insert `src -> dest`. Returns `false` if the edge already existed.
    pub(crate) fn insert(&mut self, src: NodeId, dest: NodeId) -> bool {
        let added = self.forward[src.index()].insert(dest);
        self.reverse[dest.index()].insert(src);
        added
    }

    /// Check for a direct edge `src -> dest`.
    pub(crate) fn contains(&self, src: NodeId, dest: NodeId) -> bool {
        self.successors(src).contains(&dest)
    }

    /// Destinations of `id`'s out-edges, ascending.
    pub(crate) fn successors(&self, id: NodeId) -> &BTreeSet<NodeId> {
        self.forward.get(id.index()).unwrap_or(&NO_EDGES)
    }

    /// Origins of `id`'s in-edges, ascending.
    pub(crate) fn predecessors(&self, id: NodeId) -> &BTreeSet<NodeId> {
        self.reverse.get(id.index()).unwrap_or(&NO_EDGES)
    }

    /// Drop every edge touching `id`, in both directions.
    ///
    /// Returns the number of distinct edges removed.
    pub(crate) fn isolate(&mut self, id: NodeId) -> usize {
        let Some(outgoing) = self.forward.get_mut(id.index()).map(std::mem::take) else {
            return 0;
        };
        for dest in &outgoing {
            self.reverse[dest.index()].remove(&id);
        }

        // A self-loop was already cleared from `reverse[id]` above.
        let incoming = std::mem::take(&mut self.reverse[id.index()]);
        for src in &incoming {
            self.forward[src.index()].remove(&id);
        }

        outgoing.len() + incoming.len()
    }

    #[cfg(test)]
    pub(crate) fn is_symmetric(&self) -> bool {
        let forward_ok = self.forward.iter().enumerate().all(|(src, dests)| {
            dests
                .iter()
                .all(|dest| self.reverse[dest.index()].contains(&NodeId::from(src)))
        });
        let reverse_ok = self.reverse.iter().enumerate().all(|(dest, srcs)| {
            srcs.iter()
                .all(|src| self.forward[src.index()].contains(&NodeId::from(dest)))
        });
        forward_ok && reverse_ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(nodes: usize) -> Adjacency {
        let mut adjacency = Adjacency::default();
        for i in 0..nodes {
            adjacency.push_node(NodeId::from(i));
        }
        adjacency
    }

    fn ids(raw: &[usize]) -> Vec<NodeId> {
        raw.iter().copied().map(NodeId::from).collect()
    }

    #[test]
    fn insert_records_both_directions() {
        let mut adjacency = table(3);

        assert!(adjacency.insert(NodeId::from(0), NodeId::from(2)));
        assert!(adjacency.contains(NodeId::from(0), NodeId::from(2)));
        assert!(!adjacency.contains(NodeId::from(2), NodeId::from(0)));
        assert!(adjacency.predecessors(NodeId::from(2)).contains(&NodeId::from(0)));
        assert!(adjacency.is_symmetric());
    }

    #[test]
    fn duplicate_edges_are_ignored() {
        let mut adjacency = table(2);

        assert!(adjacency.insert(NodeId::from(0), NodeId::from(1)));
        assert!(!adjacency.insert(NodeId::from(0), NodeId::from(1)));
        assert_eq!(adjacency.successors(NodeId::from(0)).len(), 1);
        assert_eq!(adjacency.predecessors(NodeId::from(1)).len(), 1);
    }

    #[test]
    fn successors_are_sorted_by_id() {
        let mut adjacency = table(5);
        for dest in [4, 1, 3] {
            adjacency.insert(NodeId::from(0), NodeId::from(dest));
        }

        let succ: Vec<NodeId> = adjacency.successors(NodeId::from(0)).iter().copied().collect();
        assert_eq!(succ, ids(&[1, 3, 4]));
    }

    #[test]
    fn isolate_clears_incident_edges() {
        let mut adjacency = table(4);
        // 0 -> 1 -> 2, 3 -> 1, 1 -> 3
        adjacency.insert(NodeId::from(0), NodeId::from(1));
        adjacency.insert(NodeId::from(1), NodeId::from(2));
        adjacency.insert(NodeId::from(3), NodeId::from(1));
        adjacency.insert(NodeId::from(1), NodeId::from(3));
        adjacency.insert(NodeId::from(0), NodeId::from(2));

        assert_eq!(adjacency.isolate(NodeId::from(1)), 4);

        assert!(adjacency.successors(NodeId::from(1)).is_empty());
        assert!(adjacency.predecessors(NodeId::from(1)).is_empty());
        assert_eq!(
            adjacency.successors(NodeId::from(0)).iter().copied().collect::<Vec<_>>(),
            ids(&[2])
        );
        assert!(adjacency.successors(NodeId::from(3)).is_empty());
        assert!(adjacency.is_symmetric());
    }

    #[test]
    fn isolate_handles_self_loops() {
        let mut adjacency = table(2);
        adjacency.insert(NodeId::from(0), NodeId::from(0));
        adjacency.insert(NodeId::from(0), NodeId::from(1));

        assert_eq!(adjacency.isolate(NodeId::from(0)), 2);
        assert!(adjacency.successors(NodeId::from(0)).is_empty());
        assert!(adjacency.predecessors(NodeId::from(0)).is_empty());
        assert!(adjacency.predecessors(NodeId::from(1)).is_empty());
        assert!(adjacency.is_symmetric());
    }

    #[test]
    fn unknown_ids_have_no_edges() {
        let mut adjacency = table(1);
        assert!(adjacency.successors(NodeId::from(9)).is_empty());
        assert!(adjacency.predecessors(NodeId::from(9)).is_empty());
        assert!(!adjacency.contains(NodeId::from(9), NodeId::from(0)));
        assert_eq!(adjacency.isolate(NodeId::from(9)), 0);
    }
}
