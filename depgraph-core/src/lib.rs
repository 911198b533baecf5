//! Depgraph Core
//!
//! This crate provides the dependency graph used to order derivative
//! generation. It implements:
//!
//! - Value-deduplicated nodes with stable ids and soft deletion
//! - Forward and reverse adjacency kept in sync on every mutation
//! - Reachability pruning from a set of source nodes
//! - Deterministic topological ordering that tolerates cycles
//!
//! # Example
//!
//! ```rust
//! use depgraph_core::graph::{DependencyGraph, SortOrder};
//!
//! let mut graph = DependencyGraph::new();
//! graph.add_source("f");
//! graph.add_edge("f", "f_grad");
//! graph.add_edge("f_grad", "f_hessian");
//! graph.add_edge("g", "g_grad");
//!
//! // `g` is not reachable from any source.
//! assert_eq!(graph.remove_non_reachable(), 2);
//!
//! assert_eq!(
//!     graph.topological_sort(SortOrder::Topological),
//!     vec!["f", "f_grad", "f_hessian"],
//! );
//! ```

pub mod error;
pub mod graph;

pub use error::{GraphError, Result};
pub use graph::{DependencyGraph, NodeId, NodeRecord, SortOrder};
