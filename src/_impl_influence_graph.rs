use crate::{BooleanNetwork, InfluenceGraph, MultiValuedNetwork, Sign};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::HashMap;
use std::io::Write;

impl InfluenceGraph {
    /// **(internal)** Create an empty graph.
    pub(crate) fn new() -> InfluenceGraph {
        InfluenceGraph {
            graph: DiGraph::new(),
            index: HashMap::new(),
        }
    }

    /// **(internal)** Find or create the graph node of `name`.
    pub(crate) fn ensure_node(&mut self, name: &str) -> NodeIndex {
        if let Some(index) = self.index.get(name) {
            return *index;
        }
        let index = self.graph.add_node(name.to_string());
        self.index.insert(name.to_string(), index);
        index
    }

    /// **(internal)** Add a `regulator -> target` edge unless an edge with the same
    /// sign already exists.
    pub(crate) fn add_influence(&mut self, regulator: &str, target: &str, sign: Sign) {
        let source = self.ensure_node(regulator);
        let target = self.ensure_node(target);
        let exists = self
            .graph
            .edges_connecting(source, target)
            .any(|edge| *edge.weight() == sign);
        if !exists {
            self.graph.add_edge(source, target, sign);
        }
    }

    pub fn num_nodes(&self) -> usize {
        self.graph.node_count()
    }

    pub fn num_edges(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.graph.node_weights().map(|it| it.as_str())
    }

    /// All `(regulator, target, sign)` triples.
    pub fn influences(&self) -> impl Iterator<Item = (&str, &str, Sign)> {
        self.graph.edge_references().map(move |edge| {
            (
                self.graph[edge.source()].as_str(),
                self.graph[edge.target()].as_str(),
                *edge.weight(),
            )
        })
    }

    pub fn has_influence(&self, regulator: &str, target: &str, sign: Sign) -> bool {
        match (self.index.get(regulator), self.index.get(target)) {
            (Some(source), Some(target)) => self
                .graph
                .edges_connecting(*source, *target)
                .any(|edge| *edge.weight() == sign),
            _ => false,
        }
    }

    /// Regulators of `target` together with the sign of their influence.
    pub fn regulators(&self, target: &str) -> Vec<(&str, Sign)> {
        let Some(target) = self.index.get(target) else {
            return Vec::new();
        };
        let mut result = self
            .graph
            .edges_directed(*target, Direction::Incoming)
            .map(|edge| (self.graph[edge.source()].as_str(), *edge.weight()))
            .collect::<Vec<_>>();
        result.sort();
        result
    }

    /// The underlying `petgraph` multigraph.
    pub fn as_graph(&self) -> &DiGraph<String, Sign> {
        &self.graph
    }

    /// Convert this graph to a `.dot` string.
    pub fn to_dot(&self) -> String {
        let mut buffer: Vec<u8> = Vec::new();
        self.write_as_dot(&mut buffer)
            .expect("I/O error converting `InfluenceGraph` to `.dot`.");
        String::from_utf8(buffer).expect("Invalid UTF formatting in .dot string.")
    }

    pub fn write_as_dot(&self, output: &mut dyn Write) -> Result<(), std::io::Error> {
        writeln!(output, "digraph G {{")?;
        for index in self.graph.node_indices() {
            writeln!(output, "v{} [label=\"{}\"];", index.index(), self.graph[index])?;
        }
        for edge in self.graph.edge_references() {
            let (color, arrow) = match edge.weight() {
                Sign::Positive => ("#4abd73", "normal"),
                Sign::Negative => ("#d05d5d", "tee"),
            };
            writeln!(
                output,
                "v{} -> v{} [label=\"{}\", color=\"{}\", arrowhead=\"{}\"];",
                edge.source().index(),
                edge.target().index(),
                edge.weight(),
                color,
                arrow
            )?;
        }
        writeln!(output, "}}")?;
        Ok(())
    }
}

impl BooleanNetwork {
    /// The signed influences read from the literals of the simplified update functions.
    ///
    /// Every network node is a node of the graph, followed by symbols which are referenced
    /// but not declared.
    pub fn influence_graph(&self) -> InfluenceGraph {
        let mut graph = InfluenceGraph::new();
        for node in self.nodes() {
            graph.ensure_node(node);
        }
        for (node, formula) in self.iter() {
            for (symbol, polarity) in formula.simplify().literals() {
                graph.add_influence(symbol.get_name(), node, Sign::from(polarity));
            }
        }
        graph
    }
}

impl MultiValuedNetwork {
    /// The signed influences read from the literals of every rule of every node.
    ///
    /// Threshold symbols `a:k` are influences of the node `a`.
    pub fn influence_graph(&self) -> InfluenceGraph {
        let mut graph = InfluenceGraph::new();
        for node in self.nodes() {
            graph.ensure_node(node);
        }
        for (node, rules) in self.iter() {
            for (_, formula) in rules {
                for (symbol, polarity) in formula.simplify().literals() {
                    graph.add_influence(symbol.get_name(), node, Sign::from(polarity));
                }
            }
        }
        graph
    }
}

#[cfg(test)]
mod tests {
    use crate::Sign::{Negative, Positive};
    use crate::{BooleanNetwork, MultiValuedNetwork};
    use pretty_assertions::assert_eq;

    #[test]
    fn boolean_influence_graph() {
        let bn = BooleanNetwork::try_from_source(
            "a <- (b & !c) | (!b & c)\nb <- a | a\nc <- !a & x",
        )
        .unwrap();
        let graph = bn.influence_graph();
        assert_eq!(vec!["a", "b", "c", "x"], graph.nodes().collect::<Vec<_>>());
        assert_eq!(
            vec![("b", Positive), ("b", Negative), ("c", Positive), ("c", Negative)],
            graph.regulators("a")
        );
        assert_eq!(vec![("a", Positive)], graph.regulators("b"));
        assert!(graph.has_influence("a", "c", Negative));
        assert!(!graph.has_influence("a", "c", Positive));
        assert_eq!(7, graph.num_edges());

        let dot = graph.to_dot();
        assert!(dot.starts_with("digraph G {"));
        assert!(dot.contains("[label=\"-\", color=\"#d05d5d\", arrowhead=\"tee\"]"));
    }

    #[test]
    fn negation_is_a_single_negative_influence() {
        let bn = BooleanNetwork::try_from_source("a <- !b\nb <- b").unwrap();
        let graph = bn.influence_graph();
        assert_eq!(
            vec![("b", "a", Negative), ("b", "b", Positive)],
            graph.influences().collect::<Vec<_>>()
        );
        assert_eq!(vec![("b", Negative)], graph.regulators("a"));

        let mn = MultiValuedNetwork::try_from_source("a:2 <- !a:1").unwrap();
        let graph = mn.influence_graph();
        assert_eq!(1, graph.num_edges());
        assert!(graph.has_influence("a", "a", Negative));
    }

    #[test]
    fn multi_valued_influence_graph() {
        let mn = MultiValuedNetwork::try_from_source("a:1 <- b\na:2 <- b:2 & !c\nb <- !a:2\nc <- c")
            .unwrap();
        let graph = mn.influence_graph();
        assert_eq!(3, graph.num_nodes());
        assert_eq!(vec![("b", Positive), ("c", Negative)], graph.regulators("a"));
        assert_eq!(vec![("a", Negative)], graph.regulators("b"));
        assert_eq!(vec![("c", Positive)], graph.regulators("c"));
    }
}
