//! Adjacency storage and single-node/single-edge mutation.

use indexmap::IndexMap;
use miette::Diagnostic;
use thiserror::Error;

use crate::types::GraphKey;

/// Errors raised by graph mutation.
#[derive(Debug, Error, Diagnostic)]
pub enum GraphError {
    /// An edge from a node to itself was requested.
    #[error("self-loop rejected on node {node}")]
    #[diagnostic(
        code(braidworks::graphs::self_loop),
        help("Workflow graphs are acyclic; a node cannot feed itself.")
    )]
    SelfLoop { node: String },

    /// A deletion referenced a node the graph does not contain.
    #[error("node {node} is not in the graph")]
    #[diagnostic(code(braidworks::graphs::missing_node))]
    MissingNode { node: String },

    /// A deletion referenced an edge the graph does not contain.
    #[error("edge {from} -> {to} is not in the graph")]
    #[diagnostic(code(braidworks::graphs::missing_edge))]
    MissingEdge { from: String, to: String },
}

/// Directed acyclic graph over keys of type `N`.
///
/// Backed by an insertion-ordered adjacency mapping from each node to its
/// ordered successor list. Every node the graph knows about has an entry,
/// including nodes with no outgoing edges, so membership checks and
/// endpoint detection are plain map operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Graph<N: GraphKey> {
    pub(super) adjacency: IndexMap<N, Vec<N>>,
}

impl<N: GraphKey> Default for Graph<N> {
    fn default() -> Self {
        Self {
            adjacency: IndexMap::new(),
        }
    }
}

impl<N: GraphKey> Graph<N> {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a graph from `(from, to)` pairs.
    ///
    /// The inverse of [`Graph::edge_list`] for any graph without isolated
    /// nodes (an edge list cannot represent those).
    pub fn from_edges(edges: impl IntoIterator<Item = (N, N)>) -> Result<Self, GraphError> {
        let mut graph = Self::new();
        for (from, to) in edges {
            graph.add_edge(from, to)?;
        }
        Ok(graph)
    }

    /// Inserts a node, preserving any edges it already has.
    ///
    /// Re-adding an existing node is a no-op; its successor list is kept
    /// intact.
    pub fn add_node(&mut self, node: N) {
        self.adjacency.entry(node).or_default();
    }

    /// Inserts a directed edge, creating either endpoint as needed.
    ///
    /// Duplicate edges are ignored. Self-loops are rejected with
    /// [`GraphError::SelfLoop`].
    pub fn add_edge(&mut self, from: N, to: N) -> Result<(), GraphError> {
        if from == to {
            return Err(GraphError::SelfLoop {
                node: format!("{from:?}"),
            });
        }
        self.add_node(to.clone());
        let successors = self.adjacency.entry(from).or_default();
        if !successors.contains(&to) {
            successors.push(to);
        }
        Ok(())
    }

    /// Removes a node and every edge touching it.
    ///
    /// Incoming references from other nodes' successor lists are scrubbed
    /// as well, so no dangling edges remain.
    pub fn delete_node(&mut self, node: &N) -> Result<(), GraphError> {
        if self.adjacency.shift_remove(node).is_none() {
            return Err(GraphError::MissingNode {
                node: format!("{node:?}"),
            });
        }
        for successors in self.adjacency.values_mut() {
            successors.retain(|candidate| candidate != node);
        }
        Ok(())
    }

    /// Removes a single directed edge.
    pub fn delete_edge(&mut self, from: &N, to: &N) -> Result<(), GraphError> {
        let successors = self
            .adjacency
            .get_mut(from)
            .ok_or_else(|| GraphError::MissingEdge {
                from: format!("{from:?}"),
                to: format!("{to:?}"),
            })?;
        let Some(position) = successors.iter().position(|candidate| candidate == to) else {
            return Err(GraphError::MissingEdge {
                from: format!("{from:?}"),
                to: format!("{to:?}"),
            });
        };
        successors.remove(position);
        Ok(())
    }

    /// Returns true if the graph contains `node`.
    #[must_use]
    pub fn contains(&self, node: &N) -> bool {
        self.adjacency.contains_key(node)
    }

    /// Ordered successors of `node` (empty if absent or terminal).
    #[must_use]
    pub fn successors(&self, node: &N) -> &[N] {
        self.adjacency.get(node).map_or(&[], Vec::as_slice)
    }

    /// All nodes, in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &N> {
        self.adjacency.keys()
    }

    /// Nodes with no incoming edges, in insertion order.
    #[must_use]
    pub fn roots(&self) -> Vec<N> {
        self.adjacency
            .keys()
            .filter(|node| {
                !self
                    .adjacency
                    .values()
                    .any(|successors| successors.contains(node))
            })
            .cloned()
            .collect()
    }

    /// Nodes with no outgoing edges, in insertion order.
    #[must_use]
    pub fn endpoints(&self) -> Vec<N> {
        self.adjacency
            .iter()
            .filter(|(_, successors)| successors.is_empty())
            .map(|(node, _)| node.clone())
            .collect()
    }

    /// Every edge as a `(from, to)` pair, in insertion order.
    #[must_use]
    pub fn edge_list(&self) -> Vec<(N, N)> {
        self.adjacency
            .iter()
            .flat_map(|(from, successors)| {
                successors
                    .iter()
                    .map(move |to| (from.clone(), to.clone()))
            })
            .collect()
    }

    /// Number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }

    /// Returns true if the graph has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }
}
