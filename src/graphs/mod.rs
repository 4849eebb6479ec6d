//! Directed-acyclic-graph container and composition algebra.
//!
//! This module provides the generic [`Graph`] used throughout braidworks:
//! an insertion-ordered adjacency mapping with the mutation, composition,
//! and traversal operations workflow assembly is built from.
//!
//! # Core Concepts
//!
//! - **Nodes**: any [`GraphKey`](crate::types::GraphKey) value; plain
//!   strings for topology work, [`NodeHandle`](crate::types::NodeHandle)s
//!   for assembled workflows
//! - **Edges**: directed, duplicate-free, self-loop-free connections kept
//!   in insertion order
//! - **Composition**: [`Graph::extend`] splices linear chains,
//!   [`Graph::branchify`] expands Cartesian alternative combinations,
//!   [`Graph::join`] concatenates whole graphs
//! - **Traversal**: [`Graph::paths`] enumerates every root-to-endpoint
//!   path, [`Graph::search`] walks the reachable set depth- or
//!   breadth-first
//!
//! # Determinism
//!
//! Adjacency is an `IndexMap` keyed in insertion order and edge lists are
//! ordered vectors, so every derived view (roots, endpoints, paths, search
//! order) is reproducible across runs. Path enumeration depends on this:
//! result records are keyed by path position.
//!
//! # Quick Start
//!
//! ```rust
//! use braidworks::graphs::Graph;
//!
//! let mut graph: Graph<&str> = Graph::new();
//! graph.extend(&["wash", "dry", "fold"], None).unwrap();
//! graph.branchify(&[vec!["ship", "store"]], None).unwrap();
//!
//! assert_eq!(graph.roots(), vec!["wash"]);
//! assert_eq!(graph.paths().len(), 2);
//! ```

// Internal module declarations
mod adjacency;
mod compose;
mod traversal;

#[cfg(test)]
mod tests;

// Public re-exports
pub use adjacency::{Graph, GraphError};
