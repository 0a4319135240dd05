use crate::dynamics::{CompiledNetwork, UpdateMode};
use crate::{BooleanNetwork, Error};
use std::iter;

/// Deterministic update mode applying a fixed sequence of blocks of nodes.
///
/// In one step, the blocks are applied in order: all nodes of a block are updated
/// simultaneously, using the state produced by the previous block. Loops are enabled
/// by default.
#[derive(Clone, Debug)]
pub struct PeriodicUpdateMode {
    network: CompiledNetwork,
    sequence: Vec<Vec<usize>>,
    loops: bool,
}

impl PeriodicUpdateMode {
    /// Create a block-sequential update mode from a sequence of blocks.
    ///
    /// Fails if the sequence or one of its blocks is empty, or if a block contains
    /// an unknown node.
    pub fn new(network: &BooleanNetwork, sequence: &[Vec<&str>]) -> Result<PeriodicUpdateMode, Error> {
        let network = CompiledNetwork::new(network)?;
        if sequence.is_empty() {
            return Err(Error::InvalidUpdateSequence(
                "the sequence has no blocks".to_string(),
            ));
        }
        let mut blocks = Vec::with_capacity(sequence.len());
        for (i, block) in sequence.iter().enumerate() {
            if block.is_empty() {
                return Err(Error::InvalidUpdateSequence(format!("block {} is empty", i)));
            }
            let mut indices = block
                .iter()
                .map(|node| {
                    network
                        .find_node(node)
                        .ok_or_else(|| Error::UnknownNode(node.to_string()))
                })
                .collect::<Result<Vec<_>, _>>()?;
            indices.sort_unstable();
            indices.dedup();
            blocks.push(indices);
        }
        Ok(PeriodicUpdateMode {
            network,
            sequence: blocks,
            loops: true,
        })
    }

    /// Same as `new`.
    pub fn block_sequential(
        network: &BooleanNetwork,
        sequence: &[Vec<&str>],
    ) -> Result<PeriodicUpdateMode, Error> {
        PeriodicUpdateMode::new(network, sequence)
    }

    /// Update one node at a time, in the given order.
    pub fn sequential(network: &BooleanNetwork, order: &[&str]) -> Result<PeriodicUpdateMode, Error> {
        let sequence = order.iter().map(|it| vec![*it]).collect::<Vec<_>>();
        PeriodicUpdateMode::new(network, &sequence)
    }

    /// Run several sequences of nodes in parallel.
    ///
    /// Every block is an ordered sequence of nodes. Shorter blocks are repeated until they
    /// are at least as long as the longest one, then the `i`-th element of the resulting
    /// sequence updates the `i`-th nodes of all blocks together. A node which appears in
    /// several blocks at the same position is updated only once at that position.
    pub fn block_parallel(
        network: &BooleanNetwork,
        blocks: &[Vec<&str>],
    ) -> Result<PeriodicUpdateMode, Error> {
        if blocks.is_empty() {
            return Err(Error::InvalidUpdateSequence(
                "there are no blocks".to_string(),
            ));
        }
        if let Some(i) = blocks.iter().position(|it| it.is_empty()) {
            return Err(Error::InvalidUpdateSequence(format!("block {} is empty", i)));
        }
        let length = blocks.iter().map(|it| it.len()).max().unwrap_or_default();
        let repeated = blocks
            .iter()
            .map(|block| {
                let times = (length + block.len() - 1) / block.len();
                iter::repeat(block.iter())
                    .take(times)
                    .flatten()
                    .cloned()
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>();
        let sequence = (0..length)
            .map(|i| repeated.iter().map(|block| block[i]).collect::<Vec<_>>())
            .collect::<Vec<_>>();
        PeriodicUpdateMode::new(network, &sequence)
    }

    pub fn with_loops(mut self, loops: bool) -> PeriodicUpdateMode {
        self.loops = loops;
        self
    }

    /// The blocks of this mode, as node names.
    pub fn sequence(&self) -> Vec<Vec<&str>> {
        let nodes = self.network.nodes();
        self.sequence
            .iter()
            .map(|block| block.iter().map(|i| nodes[*i].as_str()).collect())
            .collect()
    }
}

impl UpdateMode for PeriodicUpdateMode {
    fn nodes(&self) -> &[String] {
        self.network.nodes()
    }

    fn loops(&self) -> bool {
        self.loops
    }

    fn step<'a>(&'a self, state: &[bool]) -> Box<dyn Iterator<Item = Vec<bool>> + 'a> {
        let mut y = state.to_vec();
        for block in &self.sequence {
            let values = block
                .iter()
                .map(|i| self.network.eval_node(*i, &y))
                .collect::<Vec<_>>();
            for (i, value) in block.iter().zip(values) {
                y[*i] = value;
            }
        }
        Box::new(iter::once(y))
    }
}

#[cfg(test)]
mod tests {
    use crate::dynamics::{PeriodicUpdateMode, UpdateMode};
    use crate::{BooleanNetwork, Error};
    use pretty_assertions::assert_eq;

    fn network() -> BooleanNetwork {
        // A negative cycle of length 2 and a copy of `a`.
        BooleanNetwork::try_from_source("a <- !b\nb <- a\nc <- a").unwrap()
    }

    #[test]
    fn sequential_updates() {
        let bn = network();
        let mode = PeriodicUpdateMode::sequential(&bn, &["a", "b", "c"]).unwrap();
        // a := !b = 1, then b := a = 1, then c := a = 1.
        assert_eq!(vec![vec![true, true, true]], mode.step(&[false, false, false]).collect::<Vec<_>>());
        let mode = PeriodicUpdateMode::sequential(&bn, &["c", "b", "a"]).unwrap();
        // c := a = 0, b := a = 0, a := !b = 1.
        assert_eq!(vec![vec![true, false, false]], mode.step(&[false, false, false]).collect::<Vec<_>>());
        assert!(mode.loops());
    }

    #[test]
    fn block_sequential_updates() {
        let bn = network();
        let mode = PeriodicUpdateMode::block_sequential(&bn, &[vec!["a", "b"], vec!["c"]]).unwrap();
        // a and b together: a := 1, b := 0; then c := 1.
        assert_eq!(vec![vec![true, false, true]], mode.step(&[false, false, false]).collect::<Vec<_>>());
    }

    #[test]
    fn block_parallel_sequence() {
        let bn = network();
        let mode = PeriodicUpdateMode::block_parallel(&bn, &[vec!["a", "b", "c"], vec!["b"]]).unwrap();
        assert_eq!(
            vec![vec!["a", "b"], vec!["b"], vec!["b", "c"]],
            mode.sequence()
        );
        // The second block is repeated to [a, a], so `a` appears twice at position 0.
        let mode = PeriodicUpdateMode::block_parallel(&bn, &[vec!["a", "b"], vec!["a"]]).unwrap();
        assert_eq!(vec![vec!["a"], vec!["a", "b"]], mode.sequence());
    }

    #[test]
    fn invalid_sequences() {
        let bn = network();
        assert!(matches!(
            PeriodicUpdateMode::new(&bn, &[]),
            Err(Error::InvalidUpdateSequence(_))
        ));
        assert!(matches!(
            PeriodicUpdateMode::new(&bn, &[vec!["a"], vec![]]),
            Err(Error::InvalidUpdateSequence(_))
        ));
        assert!(matches!(
            PeriodicUpdateMode::sequential(&bn, &["a", "x"]),
            Err(Error::UnknownNode(n)) if n == "x"
        ));
    }
}
