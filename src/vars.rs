//! Variable sets and variable maps consumed by quantification and substitution.
//!
//! Both expose the largest variable they mention, which lets the recursions
//! stop as soon as the current node lies below every variable of interest.

use std::collections::{BTreeMap, BTreeSet};

/// Set of variables to quantify over.
#[derive(Debug, Clone, Default, Eq, PartialEq, Hash)]
pub struct VarSet(BTreeSet<u32>);

impl VarSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, variable: u32) -> bool {
        self.0.insert(variable)
    }

    pub fn contains(&self, variable: u32) -> bool {
        self.0.contains(&variable)
    }

    /// Largest member, or `None` for the empty set.
    pub fn max(&self) -> Option<u32> {
        self.0.last().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<u32> for VarSet {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<const N: usize> From<[u32; N]> for VarSet {
    fn from(variables: [u32; N]) -> Self {
        variables.into_iter().collect()
    }
}

/// Partial function from variables to variables, identity where unmapped.
#[derive(Debug, Clone, Default, Eq, PartialEq, Hash)]
pub struct VarMap(BTreeMap<u32, u32>);

impl VarMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map `from` to `to`, returning the previous image if any.
    pub fn insert(&mut self, from: u32, to: u32) -> Option<u32> {
        self.0.insert(from, to)
    }

    /// Image of `variable` (itself when unmapped).
    pub fn get(&self, variable: u32) -> u32 {
        self.0.get(&variable).copied().unwrap_or(variable)
    }

    /// Largest variable in the domain of the map.
    pub fn max(&self) -> Option<u32> {
        self.0.last_key_value().map(|(&k, _)| k)
    }

    /// Whether every mapped variable maps to itself.
    pub fn is_identity(&self) -> bool {
        self.0.iter().all(|(k, v)| k == v)
    }

    /// Map exchanging `a` and `b` in both directions.
    pub fn swap(a: u32, b: u32) -> Self {
        Self::from([(a, b), (b, a)])
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.0.iter().map(|(&k, &v)| (k, v))
    }
}

impl FromIterator<(u32, u32)> for VarMap {
    fn from_iter<I: IntoIterator<Item = (u32, u32)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<const N: usize> From<[(u32, u32); N]> for VarMap {
    fn from(pairs: [(u32, u32); N]) -> Self {
        pairs.into_iter().collect()
    }
}
