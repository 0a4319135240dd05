//! A library for working with logical (Boolean and multi-valued) networks and their explicit
//! state-transition graphs.
//!
//! A network is a mapping from node names to update functions (`Formula`). Given a
//! `BooleanNetwork`, the `dynamics` module builds its state-transition graph under
//! a chosen update mode (synchronous, fully asynchronous, general asynchronous, or periodic),
//! either for the whole state space or just for the part reachable from an initial state.
//! The `runs` module then provides bounded simulations which stop at fixed points.
//!
//! ```rust
//! use biodivine_lib_minibn::{BooleanNetwork, State};
//!
//! let network = BooleanNetwork::try_from_source("a <- b\nb <- a|b").unwrap();
//! let state: State = [("a", 0), ("b", 1)].into_iter().collect();
//! let image = network.evaluate(&state).unwrap();
//! assert_eq!(Some(1), image.get("a"));
//! ```

use indexmap::IndexMap;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;
use std::sync::Arc;

pub mod dynamics;
pub mod formatters;
pub mod hypercube;
pub mod io;
pub mod runs;

mod error;
pub use error::Error;

/// **(internal)** Configuration of the formula algebra and symbol resolution.
mod _impl_boolean_algebra;
/// **(internal)** Utility methods for `BooleanNetwork`.
mod _impl_boolean_network;
/// **(internal)** DNF canonicalization and hashing of `BooleanNetwork`.
mod _impl_boolean_network_dnf;
/// **(internal)** `BooleanNetwork` to and from its textual source.
mod _impl_boolean_network_source;
/// **(internal)** Construction, inspection and rewriting of `Formula`.
mod _impl_formula;
/// **(internal)** Semantic comparison of formulas using BDDs.
mod _impl_formula_bdd;
/// **(internal)** `Formula` parsing.
mod _impl_formula_parser;
/// **(internal)** Simplification and normal forms of `Formula`.
mod _impl_formula_simplify;
/// **(internal)** Signed influence graphs of networks.
mod _impl_influence_graph;
/// **(internal)** Named threshold constraints of multi-valued nodes.
mod _impl_level_constraints;
/// **(internal)** Utility methods for `LogicalModel`.
mod _impl_logical_model;
/// **(internal)** Utility methods for `MultiValuedNetwork`.
mod _impl_multi_valued_network;
/// **(internal)** Sanitization of node names shared by both network kinds.
mod _impl_node_names;
/// **(internal)** Utility methods for `Sign`.
mod _impl_sign;
/// **(internal)** Utility methods for `State`.
mod _impl_state;
/// **(internal)** Normalization of substitutions into symbol mappings.
mod _impl_substitution;
/// **(internal)** Utility methods for `Symbol`.
mod _impl_symbol;

pub use _impl_level_constraints::{
    at_least, at_most, equals, greater_than, less_than, not_equals,
};

/// A reference to a node of a logical network, as it appears inside a `Formula`.
///
/// In Boolean networks, a symbol is just a node name. In multi-valued networks, a symbol
/// can be *instantiated* with a threshold level (written as `name:level`), in which case
/// it is true whenever the node is at or above that level. A non-instantiated symbol
/// of a multi-valued node stands for level `1`.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Symbol {
    name: String,
    level: Option<u32>,
}

/// A Boolean formula over `Symbol`s.
///
/// Conjunctions and disjunctions are n-ary. A formula is not simplified automatically:
/// use `Formula::simplify` to obtain a canonical argument order and to eliminate
/// constants and redundant terms.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Formula {
    Const(bool),
    Symbol(Symbol),
    Not(Box<Formula>),
    And(Vec<Formula>),
    Or(Vec<Formula>),
}

/// Read-only configuration of the formula language used by a network.
///
/// It determines which characters (besides alphanumeric characters and `_`) can appear
/// in node names and whether symbols can carry threshold levels. The algebra of a network
/// is shared (not copied) by all clones of that network.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BooleanAlgebra {
    allowed_in_name: Vec<char>,
    multi_valued: bool,
}

/// A Boolean network: an ordered mapping from node names to their update formulas.
///
/// Symbols referenced by the formulas do not have to be declared as nodes (typically,
/// input nodes are declared as `a <- a`), but such undeclared symbols prevent concrete
/// evaluation and state-space exploration.
///
/// The insertion order of nodes is preserved and it determines the node order of update
/// modes. The textual output is always sorted by node name.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BooleanNetwork {
    algebra: Arc<BooleanAlgebra>,
    functions: IndexMap<String, Formula>,
}

/// A multi-valued network: every node has an ordered list of `(symbol, formula)` rules.
///
/// A rule with an instantiated symbol `a:k` gives the condition under which `a` reaches
/// at least level `k`. A rule with a plain symbol `a` makes `a` a Boolean node.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MultiValuedNetwork {
    algebra: Arc<BooleanAlgebra>,
    functions: IndexMap<String, Vec<(Symbol, Formula)>>,
}

/// Either kind of logical network.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum LogicalModel {
    Boolean(BooleanNetwork),
    MultiValued(MultiValuedNetwork),
}

/// A (global) state of a network: a mapping from node names to their levels.
///
/// For Boolean networks, levels are `0` or `1`. Equality of states does not depend
/// on the order of their entries.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct State(IndexMap<String, u32>);

/// A sign of an influence between two nodes.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Sign {
    Positive,
    Negative,
}

/// A canonical structure of a formula in disjunctive normal form: either a constant,
/// or a list of clauses where each clause is a list of `(symbol, polarity)` literals.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum DnfStructure {
    Const(bool),
    Clauses(Vec<Vec<(String, bool)>>),
}

/// A signed directed multigraph of influences between network nodes.
///
/// There is at most one edge for each `(regulator, target, sign)` triple, but a
/// regulator can influence the same target both positively and negatively.
#[derive(Clone, Debug, Default)]
pub struct InfluenceGraph {
    graph: DiGraph<String, Sign>,
    index: HashMap<String, NodeIndex>,
}

/// A value that can be substituted for a symbol.
///
/// Integer levels follow the Boolean convention: positive values are `true`, the rest is
/// `false`. Text is parsed as a formula by the algebra of the target network.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Value {
    Bool(bool),
    Level(i64),
    Text(String),
    Formula(Formula),
}

/// A key of a substitution: a node name (resolved to a symbol by the network's algebra),
/// or a formula which must be a single symbol.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Key {
    Name(String),
    Formula(Formula),
}

/// An ordered list of `Key -> Value` replacements that can be applied to the formulas
/// of a network.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Substitution {
    entries: Vec<(Key, Value)>,
}
