use crate::dynamics::{encode_state, state_string, DynamicsBuilder, DynamicsGraph, RandomWalk, UpdateMode};
use crate::{Error, State};
use fxhash::FxHashSet;
use tracing::{debug, trace};

impl<'a, M: UpdateMode + ?Sized> DynamicsBuilder<'a, M> {
    pub fn new(mode: &'a M) -> DynamicsBuilder<'a, M> {
        DynamicsBuilder { mode }
    }

    /// Build the graph of all `2^n` states.
    ///
    /// States are visited in the reflected binary Gray code order, starting from the
    /// all-zero state, so each state differs from the previous one in exactly one node.
    /// Fails with `Error::StateSpaceTooLarge` when the network has 64 or more nodes.
    pub fn full(&self) -> Result<DynamicsGraph, Error> {
        let n = self.mode.nodes().len();
        if n >= 64 {
            return Err(Error::StateSpaceTooLarge(n));
        }
        let mut graph = DynamicsGraph::new();
        let mut x = vec![false; n];
        self.push(&mut graph, &x);
        for m in 1..(1u64 << n) {
            // The m-th Gray code differs from the previous one in bit `trailing_zeros(m)`.
            let flip = m.trailing_zeros() as usize;
            x[flip] = !x[flip];
            self.push(&mut graph, &x);
        }
        debug!(
            states = graph.num_states(),
            transitions = graph.num_transitions(),
            "Full dynamics computed."
        );
        Ok(graph)
    }

    /// Build the part of the graph reachable from `initial`.
    pub fn partial(&self, initial: &State) -> Result<DynamicsGraph, Error> {
        let initial = encode_state(self.mode.nodes(), initial)?;
        let mut graph = DynamicsGraph::new();
        let mut todo = FxHashSet::default();
        let mut done = FxHashSet::default();
        todo.insert(initial);
        while let Some(x) = todo.iter().next().cloned() {
            todo.remove(&x);
            for y in self.push(&mut graph, &x) {
                if !done.contains(&y) && y != x {
                    todo.insert(y);
                }
            }
            done.insert(x);
        }
        debug!(
            states = graph.num_states(),
            transitions = graph.num_transitions(),
            "Reachable dynamics computed."
        );
        Ok(graph)
    }

    /// Start a random walk in `initial`. See `RandomWalk` for the available options.
    pub fn random_walk(&self, initial: &State) -> Result<RandomWalk<'a, M>, Error> {
        let initial = encode_state(self.mode.nodes(), initial)?;
        Ok(RandomWalk::new(self.mode, initial))
    }

    /// **(internal)** Add a state and its outgoing transitions to the graph. Returns
    /// all successors of the state.
    fn push(&self, graph: &mut DynamicsGraph, x: &[bool]) -> Vec<Vec<bool>> {
        let source = state_string(x);
        trace!(state = %source, "Exploring state.");
        graph.add_state(&source);
        let successors = self.mode.step(x).collect::<Vec<_>>();
        for y in &successors {
            let target = state_string(y);
            if target != source || self.mode.loops() {
                graph.add_transition(&source, &target);
            }
        }
        successors
    }
}

#[cfg(test)]
mod tests {
    use crate::dynamics::{DynamicsBuilder, ElementaryUpdateMode, PeriodicUpdateMode, UpdateMode};
    use crate::{BooleanNetwork, Error, State};
    use pretty_assertions::assert_eq;

    fn network() -> BooleanNetwork {
        BooleanNetwork::try_from_source("a <- b\nb <- a | b").unwrap()
    }

    #[test]
    fn full_asynchronous_dynamics() {
        let mode = ElementaryUpdateMode::fully_asynchronous(&network()).unwrap();
        let graph = mode.builder().full().unwrap();
        assert_eq!(4, graph.num_states());
        // 01 -> 11, 10 -> 00, 10 -> 11
        assert_eq!(3, graph.num_transitions());
        assert!(graph.has_transition("01", "11"));
        assert!(graph.has_transition("10", "00"));
        assert!(graph.has_transition("10", "11"));
        assert_eq!(vec!["00", "11"], graph.fixed_points());
        // Gray code order of the visited states.
        assert_eq!(vec!["00", "10", "11", "01"], graph.states().collect::<Vec<_>>());
    }

    #[test]
    fn full_synchronous_dynamics() {
        let bn = BooleanNetwork::try_from_source("a <- !c\nb <- a\nc <- b & a").unwrap();
        let mode = ElementaryUpdateMode::synchronous(&bn).unwrap();
        let graph = DynamicsBuilder::new(&mode).full().unwrap();
        assert_eq!(8, graph.num_states());
        // Exactly one successor per state (including self-loops).
        assert_eq!(8, graph.num_transitions());
        for state in graph.states() {
            assert_eq!(1, graph.successors(state).len());
        }
    }

    #[test]
    fn partial_dynamics() {
        let bn = BooleanNetwork::try_from_source("a <- !a\nb <- a & b\nc <- c").unwrap();
        let mode = ElementaryUpdateMode::general_asynchronous(&bn).unwrap();
        let initial: State = [("a", 0), ("b", 1), ("c", 0)].into_iter().collect();
        let graph = mode.builder().partial(&initial).unwrap();
        // `c` never changes and `b` can only decrease.
        assert_eq!(4, graph.num_states());
        assert!(graph.contains_state("010"));
        assert!(graph.contains_state("000"));
        assert!(!graph.contains_state("001"));

        let incomplete: State = [("a", 0)].into_iter().collect();
        assert!(matches!(mode.builder().partial(&incomplete), Err(Error::IncompleteState(_))));
    }

    #[test]
    fn periodic_dynamics_with_loops() {
        let bn = BooleanNetwork::try_from_source("a <- a\nb <- a").unwrap();
        let mode = PeriodicUpdateMode::sequential(&bn, &["a", "b"]).unwrap();
        let graph = mode.builder().full().unwrap();
        assert!(graph.has_transition("00", "00"));
        assert!(graph.has_transition("10", "11"));
        let graph = mode.clone().with_loops(false).builder().full().unwrap();
        assert!(!graph.has_transition("00", "00"));
        assert_eq!(4, graph.num_states());
    }

    #[test]
    fn dynamic_dispatch() {
        let bn = network();
        let modes: Vec<Box<dyn UpdateMode>> = vec![
            Box::new(ElementaryUpdateMode::fully_asynchronous(&bn).unwrap()),
            Box::new(PeriodicUpdateMode::sequential(&bn, &["b", "a"]).unwrap()),
        ];
        for mode in &modes {
            let graph = DynamicsBuilder::new(mode.as_ref()).full().unwrap();
            assert_eq!(4, graph.num_states());
        }
    }
}
