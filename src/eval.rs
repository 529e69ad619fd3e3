//! Operator sugar for building diagrams, and evaluation under an assignment.
//!
//! `x & y`, `x | y` and `x ^ y` on edges produce deferred operations that a
//! manager evaluates with [`Bdd::eval`].

use std::ops::{BitAnd, BitOr, BitXor};

use crate::bdd::Bdd;
use crate::edge::Edge;

pub struct BddAndOp {
    f: Edge,
    g: Edge,
}

impl BitAnd for Edge {
    type Output = BddAndOp;

    fn bitand(self, rhs: Self) -> Self::Output {
        BddAndOp { f: self, g: rhs }
    }
}

pub struct BddOrOp {
    f: Edge,
    g: Edge,
}

impl BitOr for Edge {
    type Output = BddOrOp;

    fn bitor(self, rhs: Self) -> Self::Output {
        BddOrOp { f: self, g: rhs }
    }
}

pub struct BddXorOp {
    f: Edge,
    g: Edge,
}

impl BitXor for Edge {
    type Output = BddXorOp;

    fn bitxor(self, rhs: Self) -> Self::Output {
        BddXorOp { f: self, g: rhs }
    }
}

pub trait Eval {
    fn eval(&self, bdd: &Bdd) -> Edge;
}

impl Eval for Edge {
    fn eval(&self, _bdd: &Bdd) -> Edge {
        *self
    }
}

impl Eval for BddAndOp {
    fn eval(&self, bdd: &Bdd) -> Edge {
        bdd.apply_and(self.f, self.g)
    }
}

impl Eval for BddOrOp {
    fn eval(&self, bdd: &Bdd) -> Edge {
        bdd.apply_or(self.f, self.g)
    }
}

impl Eval for BddXorOp {
    fn eval(&self, bdd: &Bdd) -> Edge {
        bdd.apply_xor(self.f, self.g)
    }
}

impl Bdd {
    pub fn eval(&self, value: impl Eval) -> Edge {
        value.eval(self)
    }

    /// Truth value of `f` when every variable `v` is set to `assignment(v)`.
    pub fn evaluate_with(&self, f: Edge, assignment: impl Fn(u32) -> bool) -> bool {
        let mut current = f;
        while let Some(node) = self.resolve(current) {
            current = node.child(assignment(node.variable));
        }
        self.is_one(current)
    }

    /// Truth value of `f` when variable `v` is set to `values[v]`.
    ///
    /// # Panics
    ///
    /// Panics if `f` tests a variable outside of `values`.
    pub fn evaluate(&self, f: Edge, values: &[bool]) -> bool {
        self.evaluate_with(f, |v| values[v as usize])
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    #[test]
    fn test_eval_ops() {
        let bdd = Bdd::default();
        let x = bdd.mk_var(0);
        let y = bdd.mk_var(1);
        assert_eq!(bdd.eval(x), x);
        assert_eq!(bdd.eval(x & y), bdd.apply_and(x, y));
        assert_eq!(bdd.eval(x | -y), bdd.apply_or(x, -y));
        assert_eq!(bdd.eval(x ^ y), bdd.apply_xor(x, y));
    }

    #[test]
    fn test_evaluate() {
        let bdd = Bdd::default();
        let x = bdd.mk_var(0);
        let y = bdd.mk_var(1);
        let f = bdd.apply_and(x, -y);

        assert!(bdd.evaluate(f, &[true, false]));
        assert!(!bdd.evaluate(f, &[true, true]));
        assert!(!bdd.evaluate(f, &[false, false]));
        assert!(bdd.evaluate(-f, &[false, false]));
        assert!(bdd.evaluate(bdd.one, &[]));
        assert!(!bdd.evaluate(bdd.zero, &[]));
    }
}
