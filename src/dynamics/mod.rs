//! Explicit state-transition graphs of Boolean networks.
//!
//! An `UpdateMode` is bound to one `BooleanNetwork` and, for a given state, produces the
//! candidate successor states of one global step. Two families are provided:
//!
//!  - `ElementaryUpdateMode` updates every combination of `k` nodes (for `k` in a range),
//!    which covers the synchronous, fully asynchronous and general asynchronous modes;
//!  - `PeriodicUpdateMode` applies a fixed sequence of node blocks, each block using the
//!    values computed by the previous one (sequential, block-sequential and block-parallel
//!    modes).
//!
//! A `DynamicsBuilder` then drives an update mode to build the complete `DynamicsGraph`
//! (all 2^n states, enumerated in Gray code order), the part of the graph reachable from
//! an initial state, or a `RandomWalk`.
//!
//! Internally, states are encoded as `Vec<bool>` following the node order of the mode
//! (which is the insertion order of the network). Graph nodes are identified by the
//! string of node levels in this order, e.g. `"011"`.

use crate::{Error, State};
use fxhash::FxHashMap;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::io::Write;

/// **(internal)** Boolean networks compiled to index-based formulas.
mod _impl_compiled_network;
/// **(internal)** Construction of dynamics graphs and random walks.
mod _impl_dynamics_builder;
/// **(internal)** Update modes updating combinations of nodes.
mod _impl_elementary_update;
/// **(internal)** Update modes applying a fixed sequence of blocks.
mod _impl_periodic_update;
/// **(internal)** Iterator of a random walk.
mod _impl_random_walk;
/// **(internal)** Update modes selected by name.
mod _impl_update_mode_kind;

pub(crate) use _impl_compiled_network::CompiledNetwork;

/// A strategy producing the successors of a state in one global step.
pub trait UpdateMode {
    /// Nodes of the bound network, in the order used to encode states.
    fn nodes(&self) -> &[String];

    /// If set, a step which does not change the state is a valid transition.
    fn loops(&self) -> bool;

    /// Candidate successors of an encoded state.
    ///
    /// The iterator is computed from scratch on each call.
    fn step<'a>(&'a self, state: &[bool]) -> Box<dyn Iterator<Item = Vec<bool>> + 'a>;

    /// Candidate successors of a state.
    ///
    /// Fails if the state does not assign a Boolean level to every node.
    fn successors<'a>(
        &'a self,
        state: &State,
    ) -> Result<Box<dyn Iterator<Item = State> + 'a>, Error> {
        let state = encode_state(self.nodes(), state)?;
        let nodes = self.nodes();
        Ok(Box::new(
            self.step(&state).map(move |it| decode_state(nodes, &it)),
        ))
    }

    /// The canonical string of a state: node levels in the order of `nodes`.
    fn state_string(&self, state: &State) -> Result<String, Error> {
        Ok(state_string(&encode_state(self.nodes(), state)?))
    }

    /// Create a `DynamicsBuilder` for this update mode.
    fn builder(&self) -> DynamicsBuilder<'_, Self>
    where
        Self: Sized,
    {
        DynamicsBuilder::new(self)
    }
}

/// Encode a state following the given node order.
///
/// Fails with `Error::IncompleteState` when some node is missing and with
/// `Error::TypeMismatch` when a level is not Boolean.
pub fn encode_state(nodes: &[String], state: &State) -> Result<Vec<bool>, Error> {
    nodes
        .iter()
        .map(|node| match state.get(node) {
            Some(0) => Ok(false),
            Some(1) => Ok(true),
            Some(level) => Err(Error::TypeMismatch(format!(
                "level {} of `{}` is not Boolean",
                level, node
            ))),
            None => Err(Error::IncompleteState(node.clone())),
        })
        .collect()
}

/// Decode a state following the given node order.
pub fn decode_state(nodes: &[String], state: &[bool]) -> State {
    nodes
        .iter()
        .zip(state)
        .map(|(node, value)| (node.as_str(), u32::from(*value)))
        .collect()
}

/// **(internal)** The canonical string of an encoded state.
pub(crate) fn state_string(state: &[bool]) -> String {
    state.iter().map(|it| if *it { '1' } else { '0' }).collect()
}

/// A directed graph of states (identified by their canonical strings) and transitions.
///
/// There is at most one edge between two states.
#[derive(Clone, Debug, Default)]
pub struct DynamicsGraph {
    graph: DiGraph<String, ()>,
    index: FxHashMap<String, NodeIndex>,
}

/// Drives an `UpdateMode` to build dynamics graphs or random walks.
pub struct DynamicsBuilder<'a, M: UpdateMode + ?Sized> {
    mode: &'a M,
}

pub use _impl_elementary_update::ElementaryUpdateMode;
pub use _impl_periodic_update::PeriodicUpdateMode;
pub use _impl_random_walk::RandomWalk;
pub use _impl_update_mode_kind::UpdateModeKind;

impl DynamicsGraph {
    pub fn new() -> DynamicsGraph {
        DynamicsGraph::default()
    }

    /// Find or create the node of the given state string.
    pub fn add_state(&mut self, state: &str) -> NodeIndex {
        if let Some(index) = self.index.get(state) {
            return *index;
        }
        let index = self.graph.add_node(state.to_string());
        self.index.insert(state.to_string(), index);
        index
    }

    /// Add a transition (and its states, if they are new). Repeated transitions are ignored.
    pub fn add_transition(&mut self, source: &str, target: &str) {
        let source = self.add_state(source);
        let target = self.add_state(target);
        self.graph.update_edge(source, target, ());
    }

    pub fn num_states(&self) -> usize {
        self.graph.node_count()
    }

    pub fn num_transitions(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn contains_state(&self, state: &str) -> bool {
        self.index.contains_key(state)
    }

    /// State strings in the order in which they were added.
    pub fn states(&self) -> impl Iterator<Item = &str> {
        self.graph.node_weights().map(|it| it.as_str())
    }

    /// All transitions as `(source, target)` pairs.
    pub fn transitions(&self) -> impl Iterator<Item = (&str, &str)> {
        self.graph.edge_references().map(move |edge| {
            (
                self.graph[edge.source()].as_str(),
                self.graph[edge.target()].as_str(),
            )
        })
    }

    pub fn has_transition(&self, source: &str, target: &str) -> bool {
        match (self.index.get(source), self.index.get(target)) {
            (Some(source), Some(target)) => self.graph.contains_edge(*source, *target),
            _ => false,
        }
    }

    /// Sorted successors of a state.
    pub fn successors(&self, state: &str) -> Vec<&str> {
        let mut result = match self.index.get(state) {
            Some(index) => self
                .graph
                .neighbors_directed(*index, Direction::Outgoing)
                .map(|it| self.graph[it].as_str())
                .collect::<Vec<_>>(),
            None => Vec::new(),
        };
        result.sort();
        result
    }

    /// States with no outgoing transition, or only a self-loop.
    pub fn fixed_points(&self) -> Vec<&str> {
        let mut result = self
            .graph
            .node_indices()
            .filter(|index| {
                self.graph
                    .neighbors_directed(*index, Direction::Outgoing)
                    .all(|it| it == *index)
            })
            .map(|index| self.graph[index].as_str())
            .collect::<Vec<_>>();
        result.sort();
        result
    }

    /// The underlying `petgraph` graph.
    pub fn as_graph(&self) -> &DiGraph<String, ()> {
        &self.graph
    }

    /// Convert this graph to a `.dot` string.
    pub fn to_dot(&self) -> String {
        let mut buffer: Vec<u8> = Vec::new();
        self.write_as_dot(&mut buffer)
            .expect("I/O error converting `DynamicsGraph` to `.dot`.");
        String::from_utf8(buffer).expect("Invalid UTF formatting in .dot string.")
    }

    pub fn write_as_dot(&self, output: &mut dyn Write) -> Result<(), std::io::Error> {
        writeln!(output, "digraph G {{")?;
        for index in self.graph.node_indices() {
            writeln!(output, "s{} [label=\"{}\"];", index.index(), self.graph[index])?;
        }
        for edge in self.graph.edge_references() {
            writeln!(
                output,
                "s{} -> s{};",
                edge.source().index(),
                edge.target().index()
            )?;
        }
        writeln!(output, "}}")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::dynamics::{decode_state, encode_state, DynamicsGraph};
    use crate::{Error, State};

    #[test]
    fn state_encoding() {
        let nodes = vec!["a".to_string(), "b".to_string()];
        let x: State = [("b", 1), ("a", 0)].into_iter().collect();
        assert_eq!(vec![false, true], encode_state(&nodes, &x).unwrap());
        assert_eq!(x, decode_state(&nodes, &[false, true]));

        let y: State = [("a", 0)].into_iter().collect();
        assert!(matches!(encode_state(&nodes, &y), Err(Error::IncompleteState(n)) if n == "b"));
        let z: State = [("a", 0), ("b", 2)].into_iter().collect();
        assert!(matches!(encode_state(&nodes, &z), Err(Error::TypeMismatch(_))));
    }

    #[test]
    fn dynamics_graph() {
        let mut graph = DynamicsGraph::new();
        graph.add_transition("00", "01");
        graph.add_transition("00", "01");
        graph.add_transition("00", "10");
        graph.add_transition("01", "01");
        graph.add_state("11");
        assert_eq!(4, graph.num_states());
        assert_eq!(3, graph.num_transitions());
        assert_eq!(vec!["01", "10"], graph.successors("00"));
        assert!(graph.has_transition("01", "01"));
        assert!(!graph.has_transition("01", "00"));
        assert_eq!(vec!["01", "10", "11"], graph.fixed_points());
        assert!(graph.to_dot().contains("s0 -> s1;"));
    }
}
