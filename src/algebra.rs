//! Node-level Boolean algebra.
//!
//! Each operation decides, for the current top variable, how to split the
//! operands into sub-problems and how to assemble the resulting node. The
//! sub-problems are solved by calling back into the [`Manager`], which memoizes
//! them; the algebra itself keeps no state.
//!
//! Operands are handed over already resolved: a complemented edge arrives as
//! the [flipped](NodeAlgebra::flip) node, so the cofactors seen here are always
//! the effective ones.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use log::debug;

use crate::edge::Edge;
use crate::manager::Manager;
use crate::node::BddNode;
use crate::vars::{VarMap, VarSet};

/// Level assigned to constants: below every variable.
pub const TERMINAL_LEVEL: u32 = u32::MAX;

/// Operation set of one node kind.
///
/// A manager is generic over the node kind it stores, and dispatches into this
/// trait on a cache miss.
pub trait NodeAlgebra: Copy + Eq + Sized {
    /// Canonical node for the single-variable function `x_variable`.
    fn id(variable: u32) -> Self;

    /// Top variable of the node.
    fn variable(&self) -> u32;

    /// The edge this node collapses to, if it is redundant.
    fn reduce(&self) -> Option<Edge>;

    /// Copy of the node with both children negated.
    fn flip(&self) -> Self;

    /// Conjunction of `a` (resolved to `left`) and `b` (resolved to `right`).
    fn and<M>(manager: &M, a: Edge, left: &Self, b: Edge, right: &Self) -> Edge
    where
        M: Manager<Self> + ?Sized;

    /// Existential quantification of `this` (resolved to `self`) over `vars`.
    fn exists<M>(&self, manager: &M, this: Edge, vars: &VarSet) -> Edge
    where
        M: Manager<Self> + ?Sized;

    /// Variable substitution of `this` (resolved to `self`) according to `map`.
    fn replace<M>(&self, manager: &M, this: Edge, map: &VarMap) -> Edge
    where
        M: Manager<Self> + ?Sized;

    /// Build `ite(x_variable, high, low)` while restoring the variable order.
    fn repair<M>(manager: &M, variable: u32, low: Edge, high: Edge) -> Edge
    where
        M: Manager<Self> + ?Sized;

    /// Render the node as `x ? high : low`.
    fn display<M>(&self, manager: &M, negated: bool) -> String
    where
        M: Manager<Self> + ?Sized;

    /// Record the branch taken at this node.
    fn sat(&self, high: bool, assignment: &mut BTreeMap<u32, bool>);
}

impl NodeAlgebra for BddNode {
    fn id(variable: u32) -> Self {
        BddNode::new(variable, Edge::False, Edge::True)
    }

    fn variable(&self) -> u32 {
        self.variable
    }

    fn reduce(&self) -> Option<Edge> {
        if self.low == self.high {
            Some(self.low)
        } else {
            None
        }
    }

    fn flip(&self) -> Self {
        BddNode::new(self.variable, -self.low, -self.high)
    }

    fn and<M>(manager: &M, a: Edge, left: &Self, b: Edge, right: &Self) -> Edge
    where
        M: Manager<Self> + ?Sized,
    {
        debug!("and(a = {}: {}, b = {}: {})", a, left, b, right);
        let node = match left.variable.cmp(&right.variable) {
            Ordering::Less => BddNode::new(
                left.variable,
                manager.and(left.low, b),
                manager.and(left.high, b),
            ),
            Ordering::Greater => BddNode::new(
                right.variable,
                manager.and(a, right.low),
                manager.and(a, right.high),
            ),
            Ordering::Equal => BddNode::new(
                left.variable,
                manager.and(left.low, right.low),
                manager.and(left.high, right.high),
            ),
        };
        manager.allocate(node)
    }

    fn exists<M>(&self, manager: &M, this: Edge, vars: &VarSet) -> Edge
    where
        M: Manager<Self> + ?Sized,
    {
        match vars.max() {
            Some(max) if self.variable <= max => {}
            _ => {
                debug!("exists: x{} is below every quantified variable", self.variable);
                return this;
            }
        }

        let low = manager.exists(self.low, vars);
        let high = manager.exists(self.high, vars);

        if vars.contains(self.variable) {
            debug!("exists: eliminating x{}", self.variable);
            manager.or(low, high)
        } else {
            manager.allocate(BddNode::new(self.variable, low, high))
        }
    }

    fn replace<M>(&self, manager: &M, this: Edge, map: &VarMap) -> Edge
    where
        M: Manager<Self> + ?Sized,
    {
        match map.max() {
            Some(max) if self.variable <= max => {}
            _ => return this,
        }

        let low = manager.replace(self.low, map);
        let high = manager.replace(self.high, map);
        let target = map.get(self.variable);
        debug!("replace: x{} -> x{}", self.variable, target);
        manager.repair(target, low, high)
    }

    fn repair<M>(manager: &M, variable: u32, low: Edge, high: Edge) -> Edge
    where
        M: Manager<Self> + ?Sized,
    {
        let low_node = manager.resolve(low);
        let high_node = manager.resolve(high);
        let low_level = low_node.map_or(TERMINAL_LEVEL, |n| n.variable);
        let high_level = high_node.map_or(TERMINAL_LEVEL, |n| n.variable);

        if variable < low_level && variable < high_level {
            return manager.allocate(BddNode::new(variable, low, high));
        }

        // Split both children on the smallest variable among them.
        let top = low_level.min(high_level);
        let split = |edge: Edge, node: Option<BddNode>| match node {
            Some(n) if n.variable == top => (n.low, n.high),
            _ => (edge, edge),
        };
        let (low0, low1) = split(low, low_node);
        let (high0, high1) = split(high, high_node);

        if top == variable {
            // The branch variable is already decided by the test itself.
            debug!("repair: x{} collides with a child", variable);
            return manager.allocate(BddNode::new(variable, low0, high1));
        }

        debug!("repair: lifting x{} above x{}", top, variable);
        let new_low = manager.repair(variable, low0, high0);
        let new_high = manager.repair(variable, low1, high1);
        manager.allocate(BddNode::new(top, new_low, new_high))
    }

    fn display<M>(&self, manager: &M, negated: bool) -> String
    where
        M: Manager<Self> + ?Sized,
    {
        format!(
            "(x{} ? {} : {})",
            self.variable,
            manager.display(self.high, negated),
            manager.display(self.low, negated)
        )
    }

    fn sat(&self, high: bool, assignment: &mut BTreeMap<u32, bool>) {
        assignment.insert(self.variable, high);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use test_log::test;

    use super::*;
    use crate::bdd::Bdd;

    /// Manager that forwards to [`Bdd`] and counts the recursive calls it receives.
    struct Counting<'a> {
        inner: &'a Bdd,
        calls: Cell<usize>,
    }

    impl Counting<'_> {
        fn tick(&self) {
            self.calls.set(self.calls.get() + 1);
        }
    }

    impl Manager<BddNode> for Counting<'_> {
        fn allocate(&self, node: BddNode) -> Edge {
            self.inner.allocate(node)
        }
        fn node(&self, index: u32) -> BddNode {
            self.inner.node(index)
        }
        fn resolve(&self, edge: Edge) -> Option<BddNode> {
            self.inner.resolve(edge)
        }
        fn and(&self, a: Edge, b: Edge) -> Edge {
            self.tick();
            self.inner.and(a, b)
        }
        fn or(&self, a: Edge, b: Edge) -> Edge {
            self.tick();
            self.inner.or(a, b)
        }
        fn exists(&self, a: Edge, vars: &VarSet) -> Edge {
            self.tick();
            self.inner.exists(a, vars)
        }
        fn replace(&self, a: Edge, map: &VarMap) -> Edge {
            self.tick();
            self.inner.replace(a, map)
        }
        fn repair(&self, variable: u32, low: Edge, high: Edge) -> Edge {
            self.tick();
            self.inner.repair(variable, low, high)
        }
        fn display(&self, edge: Edge, negated: bool) -> String {
            self.inner.display(edge, negated)
        }
    }

    #[test]
    fn test_reduce() {
        let n = BddNode::id(0);
        assert_eq!(n.reduce(), None);

        let bdd = Bdd::default();
        let e = bdd.mk_var(3);
        let m = BddNode::new(0, e, e);
        assert_eq!(m.reduce(), Some(e));
        let m = BddNode::new(0, Edge::True, Edge::True);
        assert_eq!(m.reduce(), Some(Edge::True));
    }

    #[test]
    fn test_flip_involution() {
        let bdd = Bdd::default();
        let x1 = bdd.mk_var(1);
        let node = BddNode::new(0, -x1, Edge::True);
        let flipped = node.flip();
        assert_eq!(flipped.low, x1);
        assert_eq!(flipped.high, Edge::False);
        assert_eq!(flipped.flip(), node);
    }

    #[test]
    fn test_id() {
        let node = BddNode::id(7);
        assert_eq!(node.variable, 7);
        assert_eq!(node.low, Edge::False);
        assert_eq!(node.high, Edge::True);
    }

    #[test]
    fn test_and_routes_through_manager() {
        let bdd = Bdd::default();
        let x0 = bdd.mk_var(0);
        let x1 = bdd.mk_var(1);
        let m = Counting {
            inner: &bdd,
            calls: Cell::new(0),
        };

        let left = bdd.resolve(x0).unwrap();
        let right = bdd.resolve(x1).unwrap();
        let res = BddNode::and(&m, x0, &left, x1, &right);

        // One sub-conjunction per cofactor of x0.
        assert_eq!(m.calls.get(), 2);
        assert_eq!(res, bdd.apply_and(x0, x1));
        let node = bdd.resolve(res).unwrap();
        assert_eq!(node.variable, 0);
        assert_eq!(node.low, Edge::False);
        assert_eq!(node.high, x1);
    }

    #[test]
    fn test_and_equal_variables() {
        let bdd = Bdd::default();
        let x0 = bdd.mk_var(0);
        let left = bdd.resolve(x0).unwrap();
        let right = bdd.resolve(-x0).unwrap();
        assert_eq!(BddNode::and(&bdd, x0, &left, -x0, &right), Edge::False);
        assert_eq!(BddNode::and(&bdd, x0, &left, x0, &left), x0);
    }

    #[test]
    fn test_exists_prunes_below_max() {
        let bdd = Bdd::default();
        let f = bdd.apply_and(bdd.mk_var(3), bdd.mk_var(4));
        let node = bdd.resolve(f).unwrap();
        let m = Counting {
            inner: &bdd,
            calls: Cell::new(0),
        };

        assert_eq!(node.exists(&m, f, &VarSet::from([0, 2])), f);
        assert_eq!(node.exists(&m, f, &VarSet::new()), f);
        assert_eq!(m.calls.get(), 0);
    }

    #[test]
    fn test_exists_eliminates_top() {
        let bdd = Bdd::default();
        let x0 = bdd.mk_var(0);
        let x1 = bdd.mk_var(1);
        let f = bdd.apply_and(x0, x1);
        let node = bdd.resolve(f).unwrap();
        assert_eq!(node.exists(&bdd, f, &VarSet::from([0])), x1);
    }

    #[test]
    fn test_repair_in_order() {
        let bdd = Bdd::default();
        let x3 = bdd.mk_var(3);
        let res = BddNode::repair(&bdd, 1, Edge::False, x3);
        let node = bdd.resolve(res).unwrap();
        assert_eq!(node, BddNode::new(1, Edge::False, x3));
    }

    #[test]
    fn test_repair_lifts_smaller_child() {
        let bdd = Bdd::default();
        let x0 = bdd.mk_var(0);
        // ite(x1, x0, 0) = x0 & x1
        let res = BddNode::repair(&bdd, 1, Edge::False, x0);
        assert_eq!(res, bdd.apply_and(x0, bdd.mk_var(1)));
    }

    #[test]
    fn test_repair_tie() {
        let bdd = Bdd::default();
        let x0 = bdd.mk_var(0);
        let x1 = bdd.mk_var(1);
        // ite(x2, x0 & x1, x0)
        let res = BddNode::repair(&bdd, 2, x0, bdd.apply_and(x0, x1));
        let x2 = bdd.mk_var(2);
        let expected = bdd.apply_and(x0, bdd.apply_or(-x2, x1));
        assert_eq!(res, expected);
    }

    #[test]
    fn test_repair_complemented_child() {
        let bdd = Bdd::default();
        let x0 = bdd.mk_var(0);
        // ite(x1, ~x0, x0) = x0 xor x1
        let res = BddNode::repair(&bdd, 1, x0, -x0);
        assert_eq!(res, bdd.apply_xor(x0, bdd.mk_var(1)));
    }

    #[test]
    fn test_repair_collision() {
        let bdd = Bdd::default();
        let x0 = bdd.mk_var(0);
        // ite(x0, x0, ~x0) = 1
        assert_eq!(BddNode::repair(&bdd, 0, -x0, x0), Edge::True);
        // ite(x0, ~x0, x0) = 0
        assert_eq!(BddNode::repair(&bdd, 0, x0, -x0), Edge::False);
    }

    #[test]
    fn test_display() {
        let bdd = Bdd::default();
        let x0 = bdd.mk_var(0);
        let node = bdd.resolve(x0).unwrap();
        assert_eq!(node.display(&bdd, false), "(x0 ? 1 : 0)");
        assert_eq!(node.display(&bdd, true), "(x0 ? 0 : 1)");
    }

    #[test]
    fn test_sat_records_branch() {
        let mut assignment = BTreeMap::new();
        BddNode::id(2).sat(true, &mut assignment);
        BddNode::id(5).sat(false, &mut assignment);
        assert_eq!(assignment, BTreeMap::from([(2, true), (5, false)]));
    }
}
