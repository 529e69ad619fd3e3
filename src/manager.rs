//! The manager contract consumed by the node algebra.
//!
//! A manager owns the node pool, the unique table, and the computed tables.
//! The algebra never recurses on raw node structure: every sub-computation goes
//! back through the memoized entry points below, and every new node is created
//! through [`Manager::allocate`].

use crate::edge::Edge;
use crate::vars::{VarMap, VarSet};

pub trait Manager<N> {
    /// Canonical edge for `node`, creating it if needed.
    ///
    /// Must apply the reduction rule first and return the collapsed edge
    /// instead of allocating when it fires.
    fn allocate(&self, node: N) -> Edge;

    /// Node stored at the given pool position.
    fn node(&self, index: u32) -> N;

    /// The node an edge effectively points to, with the edge's complement
    /// pushed into the node's children. `None` for constants.
    fn resolve(&self, edge: Edge) -> Option<N>;

    fn and(&self, a: Edge, b: Edge) -> Edge;

    fn or(&self, a: Edge, b: Edge) -> Edge;

    fn exists(&self, a: Edge, vars: &VarSet) -> Edge;

    fn replace(&self, a: Edge, map: &VarMap) -> Edge;

    /// Order repair of `ite(x_variable, high, low)` where `low` and `high`
    /// are ordered internally but may contain `variable` or smaller ones.
    fn repair(&self, variable: u32, low: Edge, high: Edge) -> Edge;

    /// Render `edge` (negated iff `negated`) as nested conditionals.
    fn display(&self, edge: Edge, negated: bool) -> String;
}
