//! Partial states (hypercubes) and their unions.
//!
//! A `Hypercube` fixes the levels of some nodes and leaves the other nodes free. It
//! matches every state which agrees with all its fixed nodes. A `HypercubeCollection`
//! matches a state if any of its hypercubes does. Both can be built from a `State`, which
//! gives a hypercube with every node fixed.

use crate::State;
use indexmap::IndexMap;
use std::fmt::{Display, Formatter};

/// A partial state: every node is either fixed to a level, or free (`None`).
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Hypercube(IndexMap<String, Option<u32>>);

/// A union of hypercubes.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct HypercubeCollection(Vec<Hypercube>);

impl Hypercube {
    pub fn new() -> Hypercube {
        Hypercube::default()
    }

    /// Fix `node` to `level`.
    pub fn fix(mut self, node: &str, level: u32) -> Hypercube {
        self.0.insert(node.to_string(), Some(level));
        self
    }

    /// Make `node` free.
    pub fn free(mut self, node: &str) -> Hypercube {
        self.0.insert(node.to_string(), None);
        self
    }

    pub fn set(&mut self, node: &str, level: Option<u32>) {
        self.0.insert(node.to_string(), level);
    }

    /// `Some(None)` if the node is free, `None` if the hypercube does not mention it.
    pub fn get(&self, node: &str) -> Option<Option<u32>> {
        self.0.get(node).cloned()
    }

    pub fn num_fixed(&self) -> usize {
        self.0.values().filter(|it| it.is_some()).count()
    }

    pub fn num_free(&self) -> usize {
        self.0.values().filter(|it| it.is_none()).count()
    }

    /// True if `state` has the level of every fixed node. A fixed node which the state
    /// does not assign is a mismatch.
    pub fn match_state(&self, state: &State) -> bool {
        self.0.iter().all(|(node, level)| match level {
            Some(level) => state.get(node) == Some(*level),
            None => true,
        })
    }

    /// Restrict this hypercube to the given nodes.
    pub fn project(&self, nodes: &[&str]) -> Hypercube {
        Hypercube(
            self.0
                .iter()
                .filter(|(node, _)| nodes.contains(&node.as_str()))
                .map(|(node, level)| (node.clone(), *level))
                .collect(),
        )
    }
}

impl From<&State> for Hypercube {
    fn from(state: &State) -> Self {
        Hypercube(
            state
                .iter()
                .map(|(node, level)| (node.to_string(), Some(level)))
                .collect(),
        )
    }
}

impl From<State> for Hypercube {
    fn from(state: State) -> Self {
        Hypercube::from(&state)
    }
}

/// Written as `{a: 1, b: *}`.
impl Display for Hypercube {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (i, (node, level)) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            match level {
                Some(level) => write!(f, "{}: {}", node, level)?,
                None => write!(f, "{}: *", node)?,
            }
        }
        write!(f, "}}")
    }
}

impl HypercubeCollection {
    pub fn new() -> HypercubeCollection {
        HypercubeCollection::default()
    }

    pub fn push(&mut self, hypercube: Hypercube) {
        self.0.push(hypercube);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Hypercube> {
        self.0.iter()
    }

    /// True if some hypercube of the collection matches the state.
    pub fn match_state(&self, state: &State) -> bool {
        self.0.iter().any(|it| it.match_state(state))
    }
}

impl From<Hypercube> for HypercubeCollection {
    fn from(value: Hypercube) -> Self {
        HypercubeCollection(vec![value])
    }
}

impl From<&State> for HypercubeCollection {
    fn from(value: &State) -> Self {
        HypercubeCollection::from(Hypercube::from(value))
    }
}

impl From<State> for HypercubeCollection {
    fn from(value: State) -> Self {
        HypercubeCollection::from(Hypercube::from(value))
    }
}

impl From<Vec<Hypercube>> for HypercubeCollection {
    fn from(value: Vec<Hypercube>) -> Self {
        HypercubeCollection(value)
    }
}

impl FromIterator<Hypercube> for HypercubeCollection {
    fn from_iter<T: IntoIterator<Item = Hypercube>>(iter: T) -> Self {
        HypercubeCollection(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use crate::hypercube::{Hypercube, HypercubeCollection};
    use crate::State;

    #[test]
    fn hypercube_matching() {
        let h = Hypercube::new().fix("a", 1).free("b");
        assert_eq!("{a: 1, b: *}", h.to_string());
        assert_eq!((1, 1), (h.num_fixed(), h.num_free()));
        assert_eq!(Some(None), h.get("b"));
        assert_eq!(None, h.get("c"));

        let x: State = [("a", 1), ("b", 0)].into_iter().collect();
        let y: State = [("a", 0), ("b", 1)].into_iter().collect();
        let z: State = [("b", 1)].into_iter().collect();
        assert!(h.match_state(&x));
        assert!(!h.match_state(&y));
        assert!(!h.match_state(&z));
        assert!(h.project(&["b"]).match_state(&z));
    }

    #[test]
    fn collection_matching() {
        let x: State = [("a", 1), ("b", 0)].into_iter().collect();
        let y: State = [("a", 0), ("b", 1)].into_iter().collect();
        let collection: HypercubeCollection = vec![
            Hypercube::from(&x),
            Hypercube::new().fix("a", 0).fix("b", 0),
        ]
        .into_iter()
        .collect();
        assert_eq!(2, collection.len());
        assert!(collection.match_state(&x));
        assert!(!collection.match_state(&y));
        assert!(HypercubeCollection::from(y.clone()).match_state(&y));
        assert!(HypercubeCollection::new().is_empty());
    }
}
