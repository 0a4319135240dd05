use crate::dynamics::{CompiledNetwork, UpdateMode};
use crate::{BooleanNetwork, Error};
use itertools::Itertools;

/// Update mode in which every combination of `k` nodes (for `k` between `min_k` and
/// `max_k`) can be updated in one step.
///
/// A combination produces a successor only if at least one of its nodes changes value,
/// unless `loops` is set.
#[derive(Clone, Debug)]
pub struct ElementaryUpdateMode {
    network: CompiledNetwork,
    min_k: usize,
    max_k: usize,
    loops: bool,
}

impl ElementaryUpdateMode {
    /// Create an elementary update mode with the given combination sizes.
    ///
    /// Fails if some update function references a symbol which is not a node of the network.
    pub fn new(
        network: &BooleanNetwork,
        min_k: usize,
        max_k: usize,
    ) -> Result<ElementaryUpdateMode, Error> {
        Ok(ElementaryUpdateMode {
            network: CompiledNetwork::new(network)?,
            min_k,
            max_k,
            loops: false,
        })
    }

    /// Exactly one node is updated in each step.
    pub fn fully_asynchronous(network: &BooleanNetwork) -> Result<ElementaryUpdateMode, Error> {
        ElementaryUpdateMode::new(network, 1, 1)
    }

    /// Any non-empty set of nodes can be updated in one step.
    pub fn general_asynchronous(network: &BooleanNetwork) -> Result<ElementaryUpdateMode, Error> {
        ElementaryUpdateMode::new(network, 1, network.num_nodes())
    }

    /// All nodes are updated in every step. Loops are enabled, so fixed points have
    /// a self-loop.
    pub fn synchronous(network: &BooleanNetwork) -> Result<ElementaryUpdateMode, Error> {
        let n = network.num_nodes();
        Ok(ElementaryUpdateMode::new(network, n, n)?.with_loops(true))
    }

    /// Same as `synchronous`.
    pub fn parallel(network: &BooleanNetwork) -> Result<ElementaryUpdateMode, Error> {
        ElementaryUpdateMode::synchronous(network)
    }

    pub fn with_loops(mut self, loops: bool) -> ElementaryUpdateMode {
        self.loops = loops;
        self
    }

    pub fn min_k(&self) -> usize {
        self.min_k
    }

    pub fn max_k(&self) -> usize {
        self.max_k
    }
}

impl UpdateMode for ElementaryUpdateMode {
    fn nodes(&self) -> &[String] {
        self.network.nodes()
    }

    fn loops(&self) -> bool {
        self.loops
    }

    fn step<'a>(&'a self, state: &[bool]) -> Box<dyn Iterator<Item = Vec<bool>> + 'a> {
        let x = state.to_vec();
        let image = self.network.image(&x);
        let n = self.network.num_nodes();
        let max_k = self.max_k.min(n);
        let iterator = (self.min_k..=max_k)
            .flat_map(move |k| (0..n).combinations(k))
            .filter_map(move |combination| {
                let changed = combination.iter().any(|i| x[*i] != image[*i]);
                if !changed && !self.loops {
                    return None;
                }
                let mut y = x.clone();
                for i in combination {
                    y[i] = image[i];
                }
                Some(y)
            });
        Box::new(iterator)
    }
}
