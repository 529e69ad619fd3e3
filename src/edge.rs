use std::fmt::{Display, Formatter};
use std::ops::Neg;

/// A tagged reference to a diagram node.
///
/// An edge is either one of the two constants or a position in the node pool
/// together with a complement flag. A complemented edge denotes the negation of
/// the function stored at the target node, so a function and its negation share
/// one physical node.
///
/// `False` is treated as the complement of `True`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Edge {
    False,
    True,
    Node { index: u32, complemented: bool },
}

impl Edge {
    pub const ZERO: Edge = Edge::False;
    pub const ONE: Edge = Edge::True;

    /// Positive (uncomplemented) edge to the node at `index`.
    pub const fn positive(index: u32) -> Self {
        assert!(index != 0, "Position 0 is reserved");
        Edge::Node {
            index,
            complemented: false,
        }
    }

    pub const fn from_bool(value: bool) -> Self {
        if value {
            Edge::True
        } else {
            Edge::False
        }
    }

    pub const fn is_constant(self) -> bool {
        matches!(self, Edge::False | Edge::True)
    }

    /// Whether the edge carries a negation. `False` counts as negated `True`.
    pub const fn is_complemented(self) -> bool {
        match self {
            Edge::False => true,
            Edge::True => false,
            Edge::Node { complemented, .. } => complemented,
        }
    }

    /// Pool position of the target node, or `None` for constants.
    pub const fn index(self) -> Option<u32> {
        match self {
            Edge::Node { index, .. } => Some(index),
            _ => None,
        }
    }

    pub const fn negate(self) -> Self {
        match self {
            Edge::False => Edge::True,
            Edge::True => Edge::False,
            Edge::Node {
                index,
                complemented,
            } => Edge::Node {
                index,
                complemented: !complemented,
            },
        }
    }

    /// The edge with its complement flag cleared.
    pub const fn regular(self) -> Self {
        if self.is_complemented() {
            self.negate()
        } else {
            self
        }
    }

    /// Negate the edge iff `flag` is set.
    pub const fn negate_if(self, flag: bool) -> Self {
        if flag {
            self.negate()
        } else {
            self
        }
    }
}

impl Neg for Edge {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.negate()
    }
}

impl Display for Edge {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Edge::False => write!(f, "0"),
            Edge::True => write!(f, "1"),
            Edge::Node {
                index,
                complemented,
            } => write!(f, "{}@{}", if *complemented { "~" } else { "" }, index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negate_constants() {
        assert_eq!(-Edge::True, Edge::False);
        assert_eq!(-Edge::False, Edge::True);
        assert!(Edge::False.is_complemented());
        assert!(!Edge::True.is_complemented());
    }

    #[test]
    fn test_negate_node() {
        let e = Edge::positive(3);
        assert!(!e.is_complemented());
        assert!((-e).is_complemented());
        assert_eq!(-(-e), e);
        assert_eq!((-e).index(), Some(3));
        assert_eq!((-e).regular(), e);
        assert_ne!(e, -e);
    }

    #[test]
    fn test_display() {
        assert_eq!(Edge::positive(5).to_string(), "@5");
        assert_eq!((-Edge::positive(5)).to_string(), "~@5");
        assert_eq!(Edge::True.to_string(), "1");
        assert_eq!(Edge::False.to_string(), "0");
    }

    #[test]
    #[should_panic(expected = "Position 0 is reserved")]
    fn test_zero_position_panics() {
        Edge::positive(0);
    }
}
