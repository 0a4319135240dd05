use crate::dynamics::{decode_state, UpdateMode};
use crate::hypercube::HypercubeCollection;
use crate::State;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// A random trajectory of an update mode.
///
/// The first item is always the initial state. In every step, one of the candidate
/// successors is chosen uniformly at random. The walk ends when there is no successor,
/// or when the only successor is the current state. It also ends after the configured
/// number of `steps` (`0` means unbounded), or once a reached state satisfies the stop
/// condition or matches the `stop_at` hypercubes.
///
/// A walk is an iterator: it can be consumed only once.
pub struct RandomWalk<'a, M: UpdateMode + ?Sized> {
    mode: &'a M,
    current: Option<Vec<bool>>,
    started: bool,
    steps: usize,
    taken: usize,
    stop_condition: Option<Box<dyn Fn(&State) -> bool + 'a>>,
    stop_at: Option<HypercubeCollection>,
    rng: StdRng,
}

impl<'a, M: UpdateMode + ?Sized> RandomWalk<'a, M> {
    /// **(internal)** A walk starting in an (already validated) encoded state.
    pub(crate) fn new(mode: &'a M, initial: Vec<bool>) -> RandomWalk<'a, M> {
        RandomWalk {
            mode,
            current: Some(initial),
            started: false,
            steps: 0,
            taken: 0,
            stop_condition: None,
            stop_at: None,
            rng: StdRng::from_entropy(),
        }
    }

    /// Stop after the given number of steps (`0` means unbounded).
    pub fn steps(mut self, steps: usize) -> RandomWalk<'a, M> {
        self.steps = steps;
        self
    }

    /// Stop once a reached state satisfies `condition`.
    pub fn stop_condition<F>(mut self, condition: F) -> RandomWalk<'a, M>
    where
        F: Fn(&State) -> bool + 'a,
    {
        self.stop_condition = Some(Box::new(condition));
        self
    }

    /// Stop once a reached state matches one of the given hypercubes (or states).
    ///
    /// This is combined with `stop_condition` (the walk stops when either holds).
    pub fn stop_at<H: Into<HypercubeCollection>>(mut self, target: H) -> RandomWalk<'a, M> {
        self.stop_at = Some(target.into());
        self
    }

    /// Use a deterministic random generator.
    pub fn seed(mut self, seed: u64) -> RandomWalk<'a, M> {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// **(internal)** Test the stop condition and the `stop_at` target.
    fn should_stop(&self, state: &State) -> bool {
        let by_condition = self
            .stop_condition
            .as_ref()
            .map(|condition| condition(state))
            .unwrap_or(false);
        let by_target = self
            .stop_at
            .as_ref()
            .map(|target| target.match_state(state))
            .unwrap_or(false);
        by_condition || by_target
    }
}

impl<'a, M: UpdateMode + ?Sized> Iterator for RandomWalk<'a, M> {
    type Item = State;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current.take()?;
        if !self.started {
            self.started = true;
            let state = decode_state(self.mode.nodes(), &current);
            self.current = Some(current);
            return Some(state);
        }
        let candidates = self.mode.step(&current).collect::<Vec<_>>();
        if candidates.is_empty() || (candidates.len() == 1 && candidates[0] == current) {
            return None;
        }
        let next = candidates.choose(&mut self.rng)?.clone();
        self.taken += 1;
        let state = decode_state(self.mode.nodes(), &next);
        let finished = (self.steps != 0 && self.taken >= self.steps) || self.should_stop(&state);
        if !finished {
            self.current = Some(next);
        }
        Some(state)
    }
}
