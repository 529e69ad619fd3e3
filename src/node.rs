use std::fmt::{Display, Formatter};

use crate::edge::Edge;
use crate::utils::{pairing3, MyHash};

/// Immutable decision node: `variable ? high : low`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct BddNode {
    pub variable: u32,
    pub low: Edge,
    pub high: Edge,
}

impl BddNode {
    pub const fn new(variable: u32, low: Edge, high: Edge) -> Self {
        Self {
            variable,
            low,
            high,
        }
    }

    /// Cofactor of the node for the given value of its variable.
    pub const fn child(&self, value: bool) -> Edge {
        if value {
            self.high
        } else {
            self.low
        }
    }
}

impl Default for BddNode {
    fn default() -> Self {
        Self {
            variable: 0,
            low: Edge::False,
            high: Edge::False,
        }
    }
}

impl MyHash for Edge {
    fn hash(&self) -> u64 {
        match *self {
            Edge::False => 0,
            Edge::True => 1,
            Edge::Node {
                index,
                complemented,
            } => ((index as u64) << 1 | complemented as u64) + 2,
        }
    }
}

impl MyHash for BddNode {
    fn hash(&self) -> u64 {
        pairing3(
            self.variable as u64,
            MyHash::hash(&self.low),
            MyHash::hash(&self.high),
        )
    }
}

impl Display for BddNode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "(x{}, {}, {})", self.variable, self.low, self.high)
    }
}
