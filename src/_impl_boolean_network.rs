use crate::_impl_node_names::{rename_table, sanitized_names};
use crate::{BooleanAlgebra, BooleanNetwork, Error, Formula, State, Substitution, Symbol};
use indexmap::IndexMap;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Basic methods for building and inspecting `BooleanNetwork`s.
impl BooleanNetwork {
    /// Create an empty network using the default (Boolean) algebra.
    pub fn new() -> BooleanNetwork {
        BooleanNetwork::with_algebra(Arc::new(BooleanAlgebra::boolean()))
    }

    /// Create an empty network which uses the given (shared) algebra.
    pub fn with_algebra(algebra: Arc<BooleanAlgebra>) -> BooleanNetwork {
        BooleanNetwork {
            algebra,
            functions: IndexMap::new(),
        }
    }

    pub fn algebra(&self) -> &Arc<BooleanAlgebra> {
        &self.algebra
    }

    /// True if the two networks use the very same algebra instance.
    pub fn shares_algebra(&self, other: &BooleanNetwork) -> bool {
        Arc::ptr_eq(&self.algebra, &other.algebra)
    }

    /// Set the update function of `node`, creating the node if it does not exist.
    ///
    /// Returns the previous function of the node, if any.
    pub fn set_formula(&mut self, node: &str, formula: Formula) -> Option<Formula> {
        self.functions.insert(node.to_string(), formula)
    }

    /// Parse `formula` and set it as the update function of `node`.
    pub fn set_string_formula(&mut self, node: &str, formula: &str) -> Result<(), Error> {
        let formula = self.algebra.parse(formula)?;
        self.set_formula(node, formula);
        Ok(())
    }

    pub fn get_formula(&self, node: &str) -> Option<&Formula> {
        self.functions.get(node)
    }

    /// Remove a node (and its function) from the network. References to the node in
    /// other functions are kept.
    pub fn remove(&mut self, node: &str) -> Option<Formula> {
        self.functions.shift_remove(node)
    }

    pub fn contains(&self, node: &str) -> bool {
        self.functions.contains_key(node)
    }

    pub fn num_nodes(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Node names in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.functions.keys().map(|it| it.as_str())
    }

    /// Iterate over `(node, function)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Formula)> {
        self.functions.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// The symbol referring to the given node.
    pub fn mk_var(&self, node: &str) -> Formula {
        Formula::mk_symbol(self.algebra.symbol(node))
    }

    /// The state where every node is at level `0`.
    pub fn zero(&self) -> State {
        self.nodes().map(|it| (it, 0)).collect()
    }

    /// Nodes whose update function is exactly their own symbol.
    pub fn inputs(&self) -> Vec<&str> {
        self.iter()
            .filter(|(node, formula)| formula.as_symbol() == Some(&self.algebra.symbol(node)))
            .map(|(node, _)| node)
            .collect()
    }

    /// Check that both networks have the same nodes with equivalent update functions.
    pub fn is_equivalent(&self, other: &BooleanNetwork) -> bool {
        self.num_nodes() == other.num_nodes()
            && self.iter().all(|(node, formula)| {
                other
                    .get_formula(node)
                    .map(|it| it.is_equivalent(formula))
                    .unwrap_or(false)
            })
    }
}

impl Default for BooleanNetwork {
    fn default() -> Self {
        BooleanNetwork::new()
    }
}

/// Evaluation and rewriting.
impl BooleanNetwork {
    /// Compute the image of a state: the value of every update function in `state`.
    ///
    /// Nodes that are not assigned by the state remain symbolic, in which case the result is
    /// not a state and `Error::Uninstantiated` is returned. Use `evaluate_symbolic` to obtain
    /// such partial results. Levels other than `0` and `1` are an `Error::TypeMismatch`.
    pub fn evaluate(&self, state: &State) -> Result<State, Error> {
        if let Some((node, level)) = state.iter().find(|(_, level)| *level > 1) {
            return Err(Error::TypeMismatch(format!(
                "level {} of `{}` is not Boolean",
                level, node
            )));
        }
        let image = self.evaluate_symbolic(&Substitution::from(state))?;
        image
            .into_iter()
            .map(|(node, formula)| match formula.as_const() {
                Some(value) => Ok((node, u32::from(value))),
                None => Err(Error::Uninstantiated(node)),
            })
            .collect()
    }

    /// Substitute into every update function and simplify the results.
    pub fn evaluate_symbolic(
        &self,
        substitution: &Substitution,
    ) -> Result<IndexMap<String, Formula>, Error> {
        let substitution = substitution.normalize(&self.algebra)?;
        Ok(self
            .functions
            .iter()
            .map(|(node, formula)| (node.clone(), formula.subs(&substitution, true)))
            .collect())
    }

    /// Replace the function of `node` by its simplified substitution.
    pub fn rewrite(&mut self, node: &str, substitution: &Substitution) -> Result<(), Error> {
        let substitution = substitution.normalize(&self.algebra)?;
        let formula = self
            .functions
            .get_mut(node)
            .ok_or_else(|| Error::UnknownNode(node.to_string()))?;
        *formula = formula.subs(&substitution, true);
        Ok(())
    }

    /// Rename a node, including all references to it in update functions.
    ///
    /// The renamed node is moved to the end of the node order. Fails if `new_name` is
    /// already a node of this network.
    pub fn rename(&mut self, old_name: &str, new_name: &str) -> Result<(), Error> {
        if old_name == new_name {
            return Ok(());
        }
        self.quick_rename(old_name, new_name)?;
        let mut names = HashMap::new();
        names.insert(old_name.to_string(), new_name.to_string());
        self.rename_references(&names);
        Ok(())
    }

    /// Replace every character outside of `[A-Za-z0-9_]` in node names by `_`.
    ///
    /// Conflicting names receive a numeric suffix (`_2`, `_3`, ...). Returns the mapping
    /// of renamed nodes.
    pub fn sanitize_names(&mut self) -> Result<IndexMap<String, String>, Error> {
        let renamed = sanitized_names(self.nodes());
        for (old_name, new_name) in &renamed {
            self.quick_rename(old_name, new_name)?;
        }
        if !renamed.is_empty() {
            self.rename_references(&rename_table(&renamed));
        }
        Ok(renamed)
    }

    /// **(internal)** Move the function of `old_name` to `new_name` without touching
    /// references.
    fn quick_rename(&mut self, old_name: &str, new_name: &str) -> Result<(), Error> {
        if self.contains(new_name) {
            return Err(Error::NodeExists(new_name.to_string()));
        }
        let formula = self
            .functions
            .shift_remove(old_name)
            .ok_or_else(|| Error::UnknownNode(old_name.to_string()))?;
        self.functions.insert(new_name.to_string(), formula);
        Ok(())
    }

    /// **(internal)** Rename symbols in all update functions (no simplification).
    fn rename_references(&mut self, names: &HashMap<String, String>) {
        for formula in self.functions.values_mut() {
            *formula = formula.rename_symbols(names);
        }
    }
}

/// Constants.
impl BooleanNetwork {
    /// Nodes whose simplified update function is a constant, with their values.
    pub fn constants(&self) -> IndexMap<String, bool> {
        self.iter()
            .filter_map(|(node, formula)| {
                formula
                    .simplify()
                    .as_const()
                    .map(|value| (node.to_string(), value))
            })
            .collect()
    }

    /// Substitute constant nodes into the other update functions until no new constant
    /// appears.
    ///
    /// The result is a copy of this network in which every node that is (transitively)
    /// determined by constants has a constant update function. Constant nodes are kept;
    /// see `eliminate_constants` for a variant which removes them.
    pub fn propagate_constants(&self) -> BooleanNetwork {
        let mut network = self.clone();
        let mut constants = self.constants();
        let mut known: HashMap<Symbol, Formula> = HashMap::new();
        let mut rounds = 0;
        while !constants.is_empty() {
            rounds += 1;
            for (node, value) in &constants {
                known.insert(self.algebra.symbol(node), Formula::mk_const(*value));
                network.set_formula(node, Formula::mk_const(*value));
            }
            let mut discovered = IndexMap::new();
            for (node, formula) in network.functions.iter_mut() {
                if formula.as_const().is_some() {
                    continue;
                }
                *formula = formula.subs(&known, true);
                if let Some(value) = formula.as_const() {
                    discovered.insert(node.clone(), value);
                }
            }
            constants = discovered;
        }
        debug!(
            rounds,
            constants = network.constants().len(),
            "Constant propagation finished."
        );
        network
    }

    /// Propagate constants and remove the constant nodes from the result.
    pub fn eliminate_constants(&self) -> BooleanNetwork {
        let mut network = self.propagate_constants();
        network.functions.retain(|_, formula| formula.as_const().is_none());
        network
    }
}
