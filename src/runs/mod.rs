//! Bounded concrete simulations of Boolean networks.
//!
//! A `Run` starts in an initial state and performs at most `k` steps. In each step, it
//! computes the image of the current state and collects the nodes whose value would change.
//! If there is no such node, the run stops (a fixed point was reached). Otherwise, a
//! `SelectionPolicy` decides which of the changed nodes are actually updated.
//!
//! The first item of a run is always the initial state.

use crate::dynamics::{decode_state, encode_state, CompiledNetwork};
use crate::{BooleanNetwork, Error, LogicalModel, State};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::trace;

/// Decides which of the changed nodes are updated in one step of a `Run`.
pub trait SelectionPolicy {
    /// Select a non-empty sub-sequence of `changed` (a non-empty list of node indices).
    fn select(&mut self, changed: &[usize]) -> Vec<usize>;
}

/// Update all changed nodes.
#[derive(Clone, Copy, Debug, Default)]
pub struct Synchronous;

/// Update one changed node, chosen uniformly at random.
#[derive(Clone, Debug)]
pub struct FullyAsynchronous {
    rng: StdRng,
}

/// Update a uniformly random non-empty subset of the changed nodes.
#[derive(Clone, Debug)]
pub struct GeneralAsynchronous {
    rng: StdRng,
}

impl SelectionPolicy for Synchronous {
    fn select(&mut self, changed: &[usize]) -> Vec<usize> {
        changed.to_vec()
    }
}

impl FullyAsynchronous {
    /// Policy seeded from the operating system.
    pub fn new() -> FullyAsynchronous {
        FullyAsynchronous {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> FullyAsynchronous {
        FullyAsynchronous {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for FullyAsynchronous {
    fn default() -> Self {
        FullyAsynchronous::new()
    }
}

impl SelectionPolicy for FullyAsynchronous {
    fn select(&mut self, changed: &[usize]) -> Vec<usize> {
        changed.choose(&mut self.rng).cloned().into_iter().collect()
    }
}

impl GeneralAsynchronous {
    /// Policy seeded from the operating system.
    pub fn new() -> GeneralAsynchronous {
        GeneralAsynchronous {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> GeneralAsynchronous {
        GeneralAsynchronous {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for GeneralAsynchronous {
    fn default() -> Self {
        GeneralAsynchronous::new()
    }
}

impl SelectionPolicy for GeneralAsynchronous {
    fn select(&mut self, changed: &[usize]) -> Vec<usize> {
        if changed.is_empty() {
            return Vec::new();
        }
        // Rejection sampling of a non-zero mask.
        loop {
            let mask = (0..changed.len())
                .map(|_| self.rng.gen::<bool>())
                .collect::<Vec<_>>();
            if mask.iter().any(|it| *it) {
                return changed
                    .iter()
                    .zip(mask)
                    .filter(|(_, selected)| *selected)
                    .map(|(i, _)| *i)
                    .collect();
            }
        }
    }
}

/// A run of at most `k` steps of a Boolean network.
pub struct Run<P: SelectionPolicy> {
    network: CompiledNetwork,
    current: Option<Vec<bool>>,
    started: bool,
    remaining: usize,
    policy: P,
}

pub type SyncRun = Run<Synchronous>;
pub type FAsyncRun = Run<FullyAsynchronous>;
pub type GAsyncRun = Run<GeneralAsynchronous>;

impl<P: SelectionPolicy> Run<P> {
    /// Create a run of at most `k` steps starting in `initial`.
    ///
    /// Fails if `initial` does not assign a Boolean level to every node, or if some update
    /// function uses a symbol which is not a node.
    pub fn new(
        network: &BooleanNetwork,
        initial: &State,
        k: usize,
        policy: P,
    ) -> Result<Run<P>, Error> {
        let network = CompiledNetwork::new(network)?;
        let initial = encode_state(network.nodes(), initial)?;
        Ok(Run {
            network,
            current: Some(initial),
            started: false,
            remaining: k,
            policy,
        })
    }

    /// Same as `new`, but multi-valued models fail with `Error::UnsupportedNetwork`.
    pub fn from_model(
        model: &LogicalModel,
        initial: &State,
        k: usize,
        policy: P,
    ) -> Result<Run<P>, Error> {
        Run::new(model.as_boolean()?, initial, k, policy)
    }
}

impl SyncRun {
    pub fn synchronous(
        network: &BooleanNetwork,
        initial: &State,
        k: usize,
    ) -> Result<SyncRun, Error> {
        Run::new(network, initial, k, Synchronous)
    }
}

impl FAsyncRun {
    /// Fully asynchronous run; without a `seed`, the generator is seeded from the OS.
    pub fn fully_asynchronous(
        network: &BooleanNetwork,
        initial: &State,
        k: usize,
        seed: Option<u64>,
    ) -> Result<FAsyncRun, Error> {
        let policy = seed
            .map(FullyAsynchronous::with_seed)
            .unwrap_or_default();
        Run::new(network, initial, k, policy)
    }
}

impl GAsyncRun {
    /// General asynchronous run; without a `seed`, the generator is seeded from the OS.
    pub fn general_asynchronous(
        network: &BooleanNetwork,
        initial: &State,
        k: usize,
        seed: Option<u64>,
    ) -> Result<GAsyncRun, Error> {
        let policy = seed
            .map(GeneralAsynchronous::with_seed)
            .unwrap_or_default();
        Run::new(network, initial, k, policy)
    }
}

impl<P: SelectionPolicy> Iterator for Run<P> {
    type Item = State;

    fn next(&mut self) -> Option<Self::Item> {
        let mut current = self.current.take()?;
        if !self.started {
            self.started = true;
            let state = decode_state(self.network.nodes(), &current);
            self.current = Some(current);
            return Some(state);
        }
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let image = self.network.image(&current);
        let changed = (0..current.len())
            .filter(|i| current[*i] != image[*i])
            .collect::<Vec<_>>();
        if changed.is_empty() {
            return None;
        }
        let selected = self.policy.select(&changed);
        trace!(changed = changed.len(), selected = selected.len(), "Run step.");
        for i in selected {
            current[i] = image[i];
        }
        let state = decode_state(self.network.nodes(), &current);
        self.current = Some(current);
        Some(state)
    }
}

#[cfg(test)]
mod tests {
    use crate::runs::{FAsyncRun, GAsyncRun, GeneralAsynchronous, Run, SelectionPolicy, SyncRun};
    use crate::{BooleanNetwork, Error, LogicalModel, MultiValuedNetwork, State};
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    fn state(a: u32, b: u32) -> State {
        [("a", a), ("b", b)].into_iter().collect()
    }

    fn network() -> BooleanNetwork {
        BooleanNetwork::try_from_source("a <- b\nb <- a | b").unwrap()
    }

    #[test]
    fn runs_from_fixed_point() {
        let bn = network();
        let x = state(1, 1);
        let run = SyncRun::synchronous(&bn, &x, 10).unwrap();
        assert_eq!(vec![x.clone()], run.collect::<Vec<_>>());
        assert_eq!(1, FAsyncRun::fully_asynchronous(&bn, &x, 10, Some(1)).unwrap().count());
        assert_eq!(1, GAsyncRun::general_asynchronous(&bn, &x, 10, None).unwrap().count());
    }

    #[test]
    fn synchronous_run() {
        let bn = BooleanNetwork::try_from_source("a <- !b\nb <- a").unwrap();
        let run = SyncRun::synchronous(&bn, &state(0, 0), 4).unwrap().collect::<Vec<_>>();
        assert_eq!(
            vec![state(0, 0), state(1, 0), state(1, 1), state(0, 1), state(0, 0)],
            run
        );
        assert_eq!(1, SyncRun::synchronous(&bn, &state(0, 0), 0).unwrap().count());
    }

    #[test]
    fn asynchronous_runs() {
        let bn = network();
        let run = FAsyncRun::fully_asynchronous(&bn, &state(0, 1), 5, Some(3))
            .unwrap()
            .collect::<Vec<_>>();
        assert_eq!(vec![state(0, 1), state(1, 1)], run);

        let bn = BooleanNetwork::try_from_source("a <- !a\nb <- !b").unwrap();
        let run = FAsyncRun::fully_asynchronous(&bn, &state(0, 0), 20, Some(3))
            .unwrap()
            .collect::<Vec<_>>();
        assert_eq!(21, run.len());
        for pair in run.windows(2) {
            assert_eq!(1, pair[1].differences(&pair[0]).count());
        }
    }

    #[test]
    fn general_selection_covers_all_subsets() {
        let mut policy = GeneralAsynchronous::with_seed(17);
        let mut seen = HashSet::new();
        for _ in 0..200 {
            let selected = policy.select(&[0, 2, 5]);
            assert!(!selected.is_empty());
            seen.insert(selected);
        }
        assert_eq!(7, seen.len());
    }

    #[test]
    fn runs_require_boolean_networks() {
        let mn = MultiValuedNetwork::try_from_source("a:2 <- a:1").unwrap();
        let model = LogicalModel::from(mn);
        let result = Run::from_model(&model, &state(0, 0), 3, crate::runs::Synchronous);
        assert!(matches!(result, Err(Error::UnsupportedNetwork(_))));
        let incomplete: State = [("a", 1)].into_iter().collect();
        assert!(matches!(
            SyncRun::synchronous(&network(), &incomplete, 3),
            Err(Error::IncompleteState(_))
        ));
    }
}
