//! Dependency Graph
//!
//! This module implements the dependency graph that decides the order in
//! which derived work items are generated.
//!
//! # Overview
//!
//! The graph is a directed graph where:
//!
//! - Nodes are caller-supplied values, deduplicated by `Eq + Hash`
//! - Edges represent dependencies: `a -> b` means `a` is processed before `b`
//! - Source nodes are the entry points every traversal starts from
//!
//! Callers build the graph incrementally, prune what the sources can no
//! longer reach, and then walk the topological order.
//!
//! # Design Decisions
//!
//! 1. Nodes are identified by dense, never-reused ids. All internal tables are
//!    indexed by id rather than by value, so values are stored exactly once.
//!
//! 2. Removal is soft. A removed node keeps its id and record; only its edges
//!    and its `active` flag change.
//!
//! 3. We maintain both forward and reverse edges so that removing a node
//!    touches only its neighbours.
//!
//! 4. Cycles are tolerated rather than reported. Sorting a cyclic graph still
//!    terminates and returns every reachable node exactly once.

mod adjacency;
mod dependency;
mod node;
mod render;
mod traversal;

pub use dependency::{DependencyGraph, SortOrder};
pub use node::{NodeId, NodeRecord};
