//! The [`Bdd`] manager.
//!
//! `Bdd` owns every node. It hash-conses nodes through a unique [`Table`],
//! memoizes operations in a computed [`Cache`], and implements the
//! [`Manager`] contract that the node algebra calls back into.
//!
//! # Canonical form
//!
//! - No node has equal children (the reduction rule).
//! - The stored high edge of a node is never complemented; negation is pushed
//!   to the incoming edge instead. `False` counts as the complement of `True`.
//! - Variables strictly increase along every path.
//!
//! Under these rules two edges are equal iff they denote the same function.

use std::cell::RefCell;
use std::cmp::min;
use std::collections::HashMap;
use std::fmt::Debug;

use log::debug;

use crate::algebra::{NodeAlgebra, TERMINAL_LEVEL};
use crate::cache::Cache;
use crate::edge::Edge;
use crate::manager::Manager;
use crate::node::BddNode;
use crate::table::Table;
use crate::vars::{VarMap, VarSet};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum OpKey {
    And(Edge, Edge),
    Exists(Edge, u32),
    Replace(Edge, u32),
    Repair(u32, Edge, Edge),
}

/// Sizing of a [`Bdd`] manager.
#[derive(Debug, Clone)]
pub struct BddConfig {
    /// Node storage holds `2^storage_bits` cells (default: 20).
    pub storage_bits: usize,
    /// Initial capacity of the computed table, as a power of two (default: 16).
    pub cache_bits: usize,
}

impl Default for BddConfig {
    fn default() -> Self {
        Self {
            storage_bits: 20,
            cache_bits: 16,
        }
    }
}

pub struct Bdd {
    storage: RefCell<Table<BddNode>>,
    cache: RefCell<Cache<OpKey, Edge>>,
    var_sets: RefCell<HashMap<VarSet, u32>>,
    var_maps: RefCell<HashMap<VarMap, u32>>,
    pub zero: Edge,
    pub one: Edge,
}

impl Bdd {
    pub fn new(storage_bits: usize) -> Self {
        Self::with_config(&BddConfig {
            storage_bits,
            cache_bits: min(storage_bits, 16),
        })
    }

    pub fn with_config(config: &BddConfig) -> Self {
        assert!(
            config.storage_bits <= 31,
            "Storage bits should be in the range 0..=31"
        );
        debug!("new bdd with {:?}", config);

        Self {
            storage: RefCell::new(Table::new(config.storage_bits)),
            cache: RefCell::new(Cache::new(config.cache_bits)),
            var_sets: RefCell::new(HashMap::new()),
            var_maps: RefCell::new(HashMap::new()),
            zero: Edge::False,
            one: Edge::True,
        }
    }
}

impl Default for Bdd {
    fn default() -> Self {
        Bdd::with_config(&BddConfig::default())
    }
}

impl Debug for Bdd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let storage = self.storage.borrow();
        f.debug_struct("Bdd")
            .field("capacity", &storage.capacity())
            .field("size", &storage.size())
            .finish()
    }
}

impl Bdd {
    pub fn cache(&self) -> std::cell::Ref<'_, Cache<OpKey, Edge>> {
        self.cache.borrow()
    }

    /// Number of nodes allocated so far.
    pub fn num_nodes(&self) -> usize {
        self.storage.borrow().size()
    }

    pub fn is_zero(&self, f: Edge) -> bool {
        f == self.zero
    }
    pub fn is_one(&self, f: Edge) -> bool {
        f == self.one
    }
    pub fn is_terminal(&self, f: Edge) -> bool {
        f.is_constant()
    }

    /// Top variable of `f`, or `None` for constants.
    pub fn variable(&self, f: Edge) -> Option<u32> {
        f.index().map(|i| self.node(i).variable)
    }

    /// Level used for ordering comparisons: constants sort after every variable.
    pub(crate) fn level(&self, f: Edge) -> u32 {
        self.variable(f).unwrap_or(TERMINAL_LEVEL)
    }

    pub fn node(&self, index: u32) -> BddNode {
        *self.storage.borrow().value(index as usize)
    }

    /// Pool position holding `node`, if it was ever allocated.
    pub(crate) fn find(&self, node: &BddNode) -> Option<u32> {
        self.storage.borrow().find(node).map(|i| i as u32)
    }

    /// Effective node of `f`: the stored node, flipped if `f` is complemented.
    pub fn resolve(&self, f: Edge) -> Option<BddNode> {
        match f {
            Edge::Node {
                index,
                complemented,
            } => {
                let node = self.node(index);
                Some(if complemented { node.flip() } else { node })
            }
            Edge::False | Edge::True => None,
        }
    }

    fn effective(&self, f: Edge) -> BddNode {
        match self.resolve(f) {
            Some(node) => node,
            None => panic!("Constant edge {} has no node", f),
        }
    }

    pub fn low_node(&self, f: Edge) -> Edge {
        self.effective(f).low
    }
    pub fn high_node(&self, f: Edge) -> Edge {
        self.effective(f).high
    }

    pub fn mk_node(&self, v: u32, low: Edge, high: Edge) -> Edge {
        self.allocate(BddNode::new(v, low, high))
    }

    pub fn mk_var(&self, v: u32) -> Edge {
        self.allocate(BddNode::id(v))
    }

    fn var_set_id(&self, vars: &VarSet) -> u32 {
        let mut sets = self.var_sets.borrow_mut();
        if let Some(&id) = sets.get(vars) {
            return id;
        }
        let id = sets.len() as u32;
        sets.insert(vars.clone(), id);
        id
    }

    fn var_map_id(&self, map: &VarMap) -> u32 {
        let mut maps = self.var_maps.borrow_mut();
        if let Some(&id) = maps.get(map) {
            return id;
        }
        let id = maps.len() as u32;
        maps.insert(map.clone(), id);
        id
    }

    fn cached(&self, key: &OpKey) -> Option<Edge> {
        let res = self.cache.borrow_mut().get(key);
        if let Some(res) = res {
            debug!("cache: {:?} -> {}", key, res);
        }
        res
    }

    fn remember(&self, key: OpKey, res: Edge) {
        debug!("computed: {:?} -> {}", key, res);
        self.cache.borrow_mut().insert(key, res);
    }

    pub fn apply_not(&self, f: Edge) -> Edge {
        debug!("apply_not(f = {})", f);
        -f
    }

    pub fn apply_and(&self, u: Edge, v: Edge) -> Edge {
        Manager::and(self, u, v)
    }

    pub fn apply_or(&self, u: Edge, v: Edge) -> Edge {
        Manager::or(self, u, v)
    }

    pub fn apply_xor(&self, u: Edge, v: Edge) -> Edge {
        debug!("apply_xor(u = {}, v = {})", u, v);
        let left = self.apply_and(u, -v);
        let right = self.apply_and(-u, v);
        self.apply_or(left, right)
    }

    pub fn apply_eq(&self, u: Edge, v: Edge) -> Edge {
        debug!("apply_eq(u = {}, v = {})", u, v);
        -self.apply_xor(u, v)
    }

    pub fn apply_imply(&self, u: Edge, v: Edge) -> Edge {
        debug!("apply_imply(u = {}, v = {})", u, v);
        self.apply_or(-u, v)
    }

    pub fn apply_and_many(&self, nodes: impl IntoIterator<Item = Edge>) -> Edge {
        debug!("apply_and_many(...)");
        let mut res = self.one;
        for node in nodes.into_iter() {
            res = self.apply_and(res, node);
        }
        res
    }

    pub fn apply_or_many(&self, nodes: impl IntoIterator<Item = Edge>) -> Edge {
        debug!("apply_or_many(...)");
        let mut res = self.zero;
        for node in nodes.into_iter() {
            res = self.apply_or(res, node);
        }
        res
    }

    /// ∃vars. f
    pub fn exists(&self, f: Edge, vars: &VarSet) -> Edge {
        Manager::exists(self, f, vars)
    }

    /// ∀vars. f = ¬∃vars. ¬f
    pub fn forall(&self, f: Edge, vars: &VarSet) -> Edge {
        debug!("forall(f = {}, vars = {:?})", f, vars);
        -self.exists(-f, vars)
    }

    /// Relabel the variables of `f` according to `map`.
    pub fn replace(&self, f: Edge, map: &VarMap) -> Edge {
        Manager::replace(self, f, map)
    }

    /// Render `f` as nested `x ? high : low` conditionals.
    pub fn render(&self, f: Edge) -> String {
        Manager::display(self, f, false)
    }
}

impl Manager<BddNode> for Bdd {
    fn allocate(&self, node: BddNode) -> Edge {
        debug!("mk{}", node);

        if let Some(res) = node.reduce() {
            debug!("mk: duplicates {} == {}", node.low, node.high);
            return res;
        }

        if node.high.is_complemented() {
            debug!("mk: restoring canonicity");
            return -self.allocate(node.flip());
        }

        assert!(
            node.variable < self.level(node.low) && node.variable < self.level(node.high),
            "Variable order violated by {}",
            node
        );

        let i = self.storage.borrow_mut().put(node);
        Edge::positive(i as u32)
    }

    fn node(&self, index: u32) -> BddNode {
        Bdd::node(self, index)
    }

    fn resolve(&self, edge: Edge) -> Option<BddNode> {
        Bdd::resolve(self, edge)
    }

    fn and(&self, a: Edge, b: Edge) -> Edge {
        debug!("apply_and(a = {}, b = {})", a, b);

        if self.is_zero(a) || self.is_zero(b) {
            return self.zero;
        }
        if self.is_one(a) {
            return b;
        }
        if self.is_one(b) {
            return a;
        }
        if a == b {
            return a;
        }
        if a == -b {
            return self.zero;
        }

        let (a, b) = if a <= b { (a, b) } else { (b, a) };
        let key = OpKey::And(a, b);
        if let Some(res) = self.cached(&key) {
            return res;
        }

        let left = self.effective(a);
        let right = self.effective(b);
        let res = BddNode::and(self, a, &left, b, &right);

        self.remember(key, res);
        res
    }

    fn or(&self, a: Edge, b: Edge) -> Edge {
        debug!("apply_or(a = {}, b = {})", a, b);
        -Manager::and(self, -a, -b)
    }

    fn exists(&self, a: Edge, vars: &VarSet) -> Edge {
        debug!("exists(a = {}, vars = {:?})", a, vars);

        if a.is_constant() || vars.is_empty() {
            return a;
        }

        let key = OpKey::Exists(a, self.var_set_id(vars));
        if let Some(res) = self.cached(&key) {
            return res;
        }

        let res = self.effective(a).exists(self, a, vars);

        self.remember(key, res);
        res
    }

    fn replace(&self, a: Edge, map: &VarMap) -> Edge {
        debug!("replace(a = {}, map = {:?})", a, map);

        if a.is_constant() || map.max().is_none() {
            return a;
        }

        let key = OpKey::Replace(a, self.var_map_id(map));
        if let Some(res) = self.cached(&key) {
            return res;
        }

        let res = self.effective(a).replace(self, a, map);

        self.remember(key, res);
        res
    }

    fn repair(&self, variable: u32, low: Edge, high: Edge) -> Edge {
        debug!("repair(x{}, low = {}, high = {})", variable, low, high);

        let key = OpKey::Repair(variable, low, high);
        if let Some(res) = self.cached(&key) {
            return res;
        }

        let res = BddNode::repair(self, variable, low, high);

        self.remember(key, res);
        res
    }

    fn display(&self, edge: Edge, negated: bool) -> String {
        match edge {
            Edge::False | Edge::True => {
                if self.is_one(edge) != negated {
                    "1".to_string()
                } else {
                    "0".to_string()
                }
            }
            Edge::Node {
                index,
                complemented,
            } => self.node(index).display(self, negated != complemented),
        }
    }
}
