//! Graph composition: chain splicing, Cartesian branching, concatenation.

use super::adjacency::{Graph, GraphError};
use crate::types::GraphKey;

impl<N: GraphKey> Graph<N> {
    /// Splices a linear chain of nodes onto the graph.
    ///
    /// Consecutive chain members are linked in order, and every anchor in
    /// `start` gains an edge to the chain's first member. When `start` is
    /// `None` or empty the current endpoints are used, so repeated extends
    /// grow the workflow tail-first; on an empty graph the chain simply
    /// becomes a standalone path.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use braidworks::graphs::Graph;
    ///
    /// let mut graph: Graph<&str> = Graph::new();
    /// graph.extend(&["load", "clean"], None).unwrap();
    /// graph.extend(&["report"], None).unwrap();
    /// assert_eq!(graph.paths(), vec![vec!["load", "clean", "report"]]);
    /// ```
    pub fn extend(&mut self, chain: &[N], start: Option<&[N]>) -> Result<(), GraphError> {
        let Some(first) = chain.first() else {
            return Ok(());
        };
        let anchors = self.resolve_anchors(start);
        self.add_node(first.clone());
        for anchor in anchors {
            self.add_edge(anchor, first.clone())?;
        }
        for pair in chain.windows(2) {
            self.add_edge(pair[0].clone(), pair[1].clone())?;
        }
        Ok(())
    }

    /// Expands alternative lists into one path per Cartesian combination.
    ///
    /// Each combination takes one member from every list and is spliced in
    /// via [`Graph::extend`], all from the same starting anchors (captured
    /// once, before any combination is added). Combinations sharing a
    /// member reuse its node, so the result is a braid rather than a set
    /// of disjoint chains; the number of root-to-endpoint paths grows as
    /// the product of the list lengths, which is the dominant cost driver
    /// of branch-heavy workflows.
    ///
    /// An empty alternative list yields no combinations and leaves the
    /// graph untouched.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use braidworks::graphs::Graph;
    ///
    /// let mut graph: Graph<&str> = Graph::new();
    /// graph.extend(&["start"], None).unwrap();
    /// graph
    ///     .branchify(&[vec!["a1", "a2"], vec!["b1", "b2"]], None)
    ///     .unwrap();
    /// assert_eq!(graph.paths().len(), 4);
    /// ```
    pub fn branchify(&mut self, alternatives: &[Vec<N>], start: Option<&[N]>) -> Result<(), GraphError> {
        let anchors = self.resolve_anchors(start);
        for combination in cartesian(alternatives) {
            self.extend(&combination, Some(&anchors))?;
        }
        Ok(())
    }

    /// Concatenates another graph onto this one.
    ///
    /// Every node and edge of `other` is copied in, then each of this
    /// graph's prior endpoints is connected to each of `other`'s roots. An
    /// empty receiver adopts `other` wholesale.
    pub fn join(&mut self, other: &Graph<N>) -> Result<(), GraphError> {
        if self.is_empty() {
            self.adjacency = other.adjacency.clone();
            return Ok(());
        }
        let anchors = self.endpoints();
        let roots = other.roots();
        for node in other.nodes() {
            self.add_node(node.clone());
        }
        for (from, to) in other.edge_list() {
            self.add_edge(from, to)?;
        }
        for anchor in &anchors {
            for root in &roots {
                self.add_edge(anchor.clone(), root.clone())?;
            }
        }
        Ok(())
    }

    /// Explicit non-empty `start` wins; otherwise fall back to the current
    /// endpoints so spliced chains stay connected to the existing graph.
    fn resolve_anchors(&self, start: Option<&[N]>) -> Vec<N> {
        match start {
            Some(anchors) if !anchors.is_empty() => anchors.to_vec(),
            _ => self.endpoints(),
        }
    }
}

/// Cartesian product of the alternative lists, combination-major.
///
/// The last list varies fastest, matching the order combinations are
/// spliced into the graph.
fn cartesian<N: Clone>(lists: &[Vec<N>]) -> Vec<Vec<N>> {
    let mut combinations: Vec<Vec<N>> = vec![Vec::new()];
    for list in lists {
        let mut grown = Vec::with_capacity(combinations.len() * list.len());
        for combination in &combinations {
            for item in list {
                let mut extended = combination.clone();
                extended.push(item.clone());
                grown.push(extended);
            }
        }
        combinations = grown;
    }
    combinations
}
