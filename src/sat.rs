use std::collections::{BTreeMap, HashMap};

use num_bigint::BigUint;

use crate::algebra::NodeAlgebra;
use crate::bdd::Bdd;
use crate::edge::Edge;

impl Bdd {
    /// Returns one satisfying assignment for `f`, if any exists.
    ///
    /// Only the variables tested along the chosen path are assigned; the
    /// remaining ones are free. Returns `None` for the constant false function.
    pub fn one_sat(&self, f: Edge) -> Option<BTreeMap<u32, bool>> {
        if self.is_zero(f) {
            return None;
        }

        let mut assignment = BTreeMap::new();
        let mut current = f;

        // In a reduced diagram every edge except `0` is satisfiable,
        // so the walk never needs to backtrack.
        while let Some(node) = self.resolve(current) {
            let high = !self.is_zero(node.high);
            node.sat(high, &mut assignment);
            current = node.child(high);
        }
        debug_assert!(self.is_one(current));

        Some(assignment)
    }

    /// Number of satisfying assignments of `f` over variables `0..num_vars`.
    ///
    /// Every variable of `f` must be below `num_vars`.
    pub fn sat_count(&self, f: Edge, num_vars: usize) -> BigUint {
        let mut cache = HashMap::new();
        let max = BigUint::from(1u32) << num_vars;
        self.sat_count_(f, &max, &mut cache)
    }

    fn sat_count_(&self, f: Edge, max: &BigUint, cache: &mut HashMap<Edge, BigUint>) -> BigUint {
        let node = match self.resolve(f) {
            None if self.is_one(f) => return max.clone(),
            None => return BigUint::ZERO,
            Some(node) => node,
        };

        if let Some(count) = cache.get(&f) {
            return count.clone();
        }

        let count_low = self.sat_count_(node.low, max, cache);
        let count_high = self.sat_count_(node.high, max, cache);
        let count: BigUint = (count_low + count_high) >> 1;

        cache.insert(f, count.clone());
        count
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    #[test]
    fn test_one_sat() {
        let bdd = Bdd::default();
        let x0 = bdd.mk_var(0);
        let x1 = bdd.mk_var(1);
        let x2 = bdd.mk_var(2);

        let f = bdd.apply_and_many([x0, -x1, x2]);
        let assignment = bdd.one_sat(f).unwrap();
        assert_eq!(assignment, BTreeMap::from([(0, true), (1, false), (2, true)]));

        assert_eq!(bdd.one_sat(bdd.zero), None);
        assert_eq!(bdd.one_sat(bdd.one), Some(BTreeMap::new()));
    }

    #[test]
    fn test_one_sat_satisfies() {
        let bdd = Bdd::default();
        let x0 = bdd.mk_var(0);
        let x1 = bdd.mk_var(1);
        let x2 = bdd.mk_var(2);
        let f = bdd.apply_and(bdd.apply_xor(x0, x1), -x2);

        let assignment = bdd.one_sat(f).unwrap();
        let values: Vec<bool> = (0..3)
            .map(|v| assignment.get(&v).copied().unwrap_or(false))
            .collect();
        assert!(bdd.evaluate(f, &values));
    }

    #[test]
    fn test_sat_count() {
        let bdd = Bdd::default();
        let x0 = bdd.mk_var(0);
        let x1 = bdd.mk_var(1);
        let x2 = bdd.mk_var(2);

        let f = bdd.apply_or(x0, x1);
        assert_eq!(bdd.sat_count(f, 2), BigUint::from(3u32));
        assert_eq!(bdd.sat_count(f, 3), BigUint::from(6u32));
        assert_eq!(bdd.sat_count(-f, 3), BigUint::from(2u32));

        let g = bdd.apply_xor(bdd.apply_xor(x0, x1), x2);
        assert_eq!(bdd.sat_count(g, 3), BigUint::from(4u32));

        assert_eq!(bdd.sat_count(bdd.one, 4), BigUint::from(16u32));
        assert_eq!(bdd.sat_count(bdd.zero, 4), BigUint::ZERO);
    }
}
