//! # bdd-algebra: the node algebra of Binary Decision Diagrams
//!
//! A Binary Decision Diagram represents a boolean function as a rooted DAG over
//! an ordered set of variables. With a fixed order, every function has exactly
//! one reduced representation, so equality of functions is equality of edges.
//!
//! The crate is split along one seam:
//!
//! - **[`algebra`]**: the node-level operations ([`NodeAlgebra`][crate::algebra::NodeAlgebra]).
//!   Given resolved operands, they decide how to split on the top variable and how
//!   to assemble the result: conjunction, existential quantification, variable
//!   substitution with order repair, plus the reduction rule and small helpers.
//! - **[`manager`]**: the contract the algebra calls back into
//!   ([`Manager`][crate::manager::Manager]): canonical allocation, node lookup, and
//!   the memoized entry points. [`Bdd`][crate::bdd::Bdd] is the concrete manager.
//!
//! Negation is carried on edges ([`Edge`][crate::edge::Edge]), so `f` and `¬f`
//! share one node and `apply_not` is O(1). Variables are 0-indexed.
//!
//! ## Basic Usage
//!
//! ```rust
//! use bdd_algebra::bdd::Bdd;
//! use bdd_algebra::vars::{VarMap, VarSet};
//!
//! let bdd = Bdd::default();
//!
//! let x0 = bdd.mk_var(0);
//! let x1 = bdd.mk_var(1);
//!
//! // f = x0 AND (NOT x1)
//! let f = bdd.apply_and(x0, -x1);
//! assert_eq!(bdd.render(f), "(x0 ? (x1 ? 0 : 1) : 0)");
//!
//! // ∃x0. f = NOT x1
//! assert_eq!(bdd.exists(f, &VarSet::from([0])), -x1);
//!
//! // Swapping x0 and x1 gives (NOT x0) AND x1, still in variable order.
//! let g = bdd.replace(f, &VarMap::swap(0, 1));
//! assert_eq!(g, bdd.apply_and(-x0, x1));
//! ```

pub mod algebra;
pub mod bdd;
pub mod cache;
pub mod debug;
pub mod edge;
pub mod eval;
pub mod manager;
pub mod node;
pub mod sat;
pub mod table;
pub mod utils;
pub mod vars;
