//! Debug utilities for inspecting diagram structure.
//!
//! These are primarily useful in tests and during development.

use std::collections::{HashSet, VecDeque};

use crate::bdd::Bdd;
use crate::edge::Edge;
use crate::node::BddNode;

impl Bdd {
    /// Pool positions of every node reachable from `roots`.
    pub fn descendants(&self, roots: impl IntoIterator<Item = Edge>) -> HashSet<u32> {
        let mut visited = HashSet::new();
        let mut queue = VecDeque::from_iter(roots);

        while let Some(edge) = queue.pop_front() {
            if let Some(i) = edge.index() {
                if visited.insert(i) {
                    let node = self.node(i);
                    queue.push_back(node.low);
                    queue.push_back(node.high);
                }
            }
        }

        visited
    }

    /// Number of decision nodes in `f`.
    pub fn size(&self, f: Edge) -> usize {
        self.descendants([f]).len()
    }

    /// Check the structural invariants of every node reachable from `f`.
    ///
    /// Returns a description of the first violation found:
    /// out-of-order children, a redundant node, a complemented high edge,
    /// or a node that is not the canonical representative of its triple.
    pub fn check_invariants(&self, f: Edge) -> Result<(), String> {
        for i in self.descendants([f]) {
            let node: BddNode = self.node(i);
            for child in [node.low, node.high] {
                if self.level(child) <= node.variable {
                    return Err(format!("@{} = {}: child {} is out of order", i, node, child));
                }
            }
            if node.low == node.high {
                return Err(format!("@{} = {}: redundant node", i, node));
            }
            if node.high.is_complemented() {
                return Err(format!("@{} = {}: complemented high edge", i, node));
            }
            if self.find(&node) != Some(i) {
                return Err(format!("@{} = {}: duplicate node", i, node));
            }
        }
        Ok(())
    }
}
