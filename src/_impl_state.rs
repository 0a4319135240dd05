use crate::State;
use indexmap::IndexMap;
use std::fmt::{Display, Formatter};
use std::ops::Index;

impl State {
    pub fn new() -> State {
        State(IndexMap::new())
    }

    /// Level of the given node, if the state assigns one.
    pub fn get(&self, node: &str) -> Option<u32> {
        self.0.get(node).cloned()
    }

    /// Assign a level to a node. Returns the previous level, if any.
    pub fn set(&mut self, node: &str, level: u32) -> Option<u32> {
        self.0.insert(node.to_string(), level)
    }

    /// Builder-style variant of `set`.
    pub fn with(mut self, node: &str, level: u32) -> State {
        self.set(node, level);
        self
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, node: &str) -> bool {
        self.0.contains_key(node)
    }

    /// Iterate over `(node, level)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(|it| it.as_str())
    }

    /// Names of nodes whose level differs between the two states. Nodes assigned by only
    /// one of the states are ignored.
    pub fn differences<'a>(&'a self, other: &'a State) -> impl Iterator<Item = &'a str> {
        self.iter().filter_map(move |(node, level)| match other.get(node) {
            Some(other_level) if other_level != level => Some(node),
            _ => None,
        })
    }
}

impl<S: Into<String>> FromIterator<(S, u32)> for State {
    fn from_iter<T: IntoIterator<Item = (S, u32)>>(iter: T) -> Self {
        State(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl Index<&str> for State {
    type Output = u32;

    fn index(&self, node: &str) -> &Self::Output {
        &self.0[node]
    }
}

/// Written as `{a: 0, b: 1}`, in insertion order.
impl Display for State {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (i, (node, level)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", node, level)?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use crate::State;

    #[test]
    fn state_basics() {
        let x: State = [("a", 0), ("b", 1)].into_iter().collect();
        let y = State::new().with("b", 1).with("a", 0);
        assert_eq!(x, y);
        assert_eq!(1, x["b"]);
        assert_eq!(None, x.get("c"));
        assert_eq!("{a: 0, b: 1}", x.to_string());

        let z = y.clone().with("a", 1);
        assert_eq!(vec!["a"], z.differences(&x).collect::<Vec<_>>());
        assert_eq!(0, x.differences(&y).count());
    }
}
