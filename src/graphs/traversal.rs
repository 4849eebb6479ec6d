//! Path enumeration and reachability search.

use rustc_hash::FxHashSet;
use std::collections::VecDeque;

use super::adjacency::Graph;
use crate::types::GraphKey;

impl<N: GraphKey> Graph<N> {
    /// Enumerates every root-to-endpoint simple path.
    ///
    /// Roots are taken in insertion order, then endpoints in insertion
    /// order, so the result is deterministic for a deterministically built
    /// graph. A single isolated node is both root and endpoint and yields
    /// the one-element path.
    ///
    /// Worst-case cost is exponential in the number of crossing
    /// alternatives.
    #[must_use]
    pub fn paths(&self) -> Vec<Vec<N>> {
        let roots = self.roots();
        let endpoints = self.endpoints();
        let mut found = Vec::new();
        for root in &roots {
            for endpoint in &endpoints {
                found.extend(self.find_paths(root, endpoint));
            }
        }
        found
    }

    /// Collects every simple path from `start` to `end`.
    ///
    /// Classic backtracking DFS: grow the current trail, recurse into each
    /// successor not already on the trail, record the trail whenever `end`
    /// is reached. A `start` the graph does not contain yields no paths.
    #[must_use]
    pub fn find_paths(&self, start: &N, end: &N) -> Vec<Vec<N>> {
        let mut found = Vec::new();
        if !self.contains(start) {
            return found;
        }
        let mut trail = Vec::new();
        self.backtrack(start, end, &mut trail, &mut found);
        found
    }

    fn backtrack(&self, current: &N, end: &N, trail: &mut Vec<N>, found: &mut Vec<Vec<N>>) {
        trail.push(current.clone());
        if current == end {
            found.push(trail.clone());
        } else {
            for successor in self.successors(current) {
                if !trail.contains(successor) {
                    self.backtrack(successor, end, trail, found);
                }
            }
        }
        trail.pop();
    }

    /// Visits every node reachable from `start`, returning the visit order.
    ///
    /// `depth_first` selects recursive depth-first descent; otherwise a
    /// queue-based breadth-first sweep is used. A visited set prevents
    /// re-entry, so shared successors appear once; cycle detection is not
    /// attempted. An unknown `start` yields an empty order.
    #[must_use]
    pub fn search(&self, start: &N, depth_first: bool) -> Vec<N> {
        if !self.contains(start) {
            return Vec::new();
        }
        let mut seen = FxHashSet::default();
        let mut order = Vec::new();
        if depth_first {
            self.descend(start, &mut seen, &mut order);
        } else {
            let mut queue = VecDeque::from([start.clone()]);
            seen.insert(start.clone());
            while let Some(current) = queue.pop_front() {
                for successor in self.successors(&current) {
                    if seen.insert(successor.clone()) {
                        queue.push_back(successor.clone());
                    }
                }
                order.push(current);
            }
        }
        order
    }

    fn descend(&self, current: &N, seen: &mut FxHashSet<N>, order: &mut Vec<N>) {
        seen.insert(current.clone());
        order.push(current.clone());
        for successor in self.successors(current) {
            if !seen.contains(successor) {
                self.descend(successor, seen, order);
            }
        }
    }
}
