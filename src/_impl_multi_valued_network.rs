use crate::_impl_node_names::{rename_table, sanitized_names};
use crate::{BooleanAlgebra, Error, Formula, MultiValuedNetwork, Substitution, Symbol};
use indexmap::IndexMap;
use std::collections::{BTreeMap, HashMap};
use std::fmt::{Display, Formatter};
use std::sync::Arc;

impl MultiValuedNetwork {
    /// Create an empty network using the default multi-valued algebra.
    pub fn new() -> MultiValuedNetwork {
        MultiValuedNetwork::with_algebra(Arc::new(BooleanAlgebra::multi_valued()))
    }

    pub fn with_algebra(algebra: Arc<BooleanAlgebra>) -> MultiValuedNetwork {
        MultiValuedNetwork {
            algebra,
            functions: IndexMap::new(),
        }
    }

    pub fn algebra(&self) -> &Arc<BooleanAlgebra> {
        &self.algebra
    }

    /// Read a network from rules `node[:threshold] <- formula`, one per line.
    pub fn try_from_source(source: &str) -> Result<MultiValuedNetwork, Error> {
        let mut network = MultiValuedNetwork::new();
        network.import_source(source)?;
        Ok(network)
    }

    /// Append the rules of `source` to this network. Empty lines and text after `#`
    /// are ignored.
    pub fn import_source(&mut self, source: &str) -> Result<(), Error> {
        for (i, line) in source.lines().enumerate() {
            let line = line.split('#').next().unwrap_or_default().trim();
            if line.is_empty() {
                continue;
            }
            let (target, formula) = line
                .split_once("<-")
                .ok_or_else(|| Error::Parse(format!("no `<-` in `{}`", line)).at_line(i + 1))?;
            let target = target.trim();
            if target.is_empty() {
                return Err(Error::Parse("missing target node".to_string()).at_line(i + 1));
            }
            let formula = self
                .algebra
                .parse(formula.trim())
                .map_err(|e| e.at_line(i + 1))?;
            let symbol = self.algebra.symbol(target);
            self.append(symbol, formula);
        }
        Ok(())
    }

    /// Add a rule to the node of `symbol`, creating the node if necessary.
    ///
    /// Rules of a node stay sorted by ascending threshold; a rule is placed after
    /// existing rules of the same threshold.
    pub fn append(&mut self, symbol: Symbol, formula: Formula) {
        let rules = self
            .functions
            .entry(symbol.get_name().to_string())
            .or_default();
        let position = rules.partition_point(|(it, _)| it.threshold() <= symbol.threshold());
        rules.insert(position, (symbol, formula));
    }

    /// Parse both the rule symbol and its formula and append the rule.
    pub fn append_formula(&mut self, symbol: &str, formula: &str) -> Result<(), Error> {
        let formula = self.algebra.parse(formula)?;
        self.append(self.algebra.symbol(symbol), formula);
        Ok(())
    }

    /// Make `node` a Boolean node with the given update function.
    pub fn set_formula(&mut self, node: &str, formula: Formula) {
        self.functions
            .insert(node.to_string(), vec![(Symbol::new(node), formula)]);
    }

    /// Replace the rules of `node` by one rule per threshold, in ascending order.
    pub fn set_thresholds(&mut self, node: &str, thresholds: BTreeMap<u32, Formula>) {
        let rules = thresholds
            .into_iter()
            .map(|(level, formula)| (Symbol::with_level(node, level), formula))
            .collect();
        self.functions.insert(node.to_string(), rules);
    }

    pub fn get_rules(&self, node: &str) -> Option<&[(Symbol, Formula)]> {
        self.functions.get(node).map(|it| it.as_slice())
    }

    pub fn contains(&self, node: &str) -> bool {
        self.functions.contains_key(node)
    }

    pub fn num_nodes(&self) -> usize {
        self.functions.len()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.functions.keys().map(|it| it.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[(Symbol, Formula)])> {
        self.functions
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// The highest threshold of `node` (`1` for Boolean nodes).
    pub fn max_level(&self, node: &str) -> Option<u32> {
        self.functions
            .get(node)
            .and_then(|rules| rules.iter().map(|(symbol, _)| symbol.threshold()).max())
    }

    /// True if every node has only non-instantiated rules.
    pub fn is_boolean(&self) -> bool {
        self.functions
            .values()
            .all(|rules| rules.iter().all(|(symbol, _)| !symbol.is_instantiated()))
    }

    /// A copy of this network with all formulas simplified.
    pub fn simplify(&self) -> MultiValuedNetwork {
        let mut network = self.clone();
        for rules in network.functions.values_mut() {
            for (_, formula) in rules.iter_mut() {
                *formula = formula.simplify();
            }
        }
        network
    }

    /// Rewrite the rules of a node using a substitution.
    ///
    /// If `symbol` is instantiated (`a:2`), only the rules of this threshold are rewritten,
    /// otherwise every rule of the node is.
    pub fn rewrite(&mut self, symbol: &Symbol, substitution: &Substitution) -> Result<(), Error> {
        let substitution = substitution.normalize(&self.algebra)?;
        let rules = self
            .functions
            .get_mut(symbol.get_name())
            .ok_or_else(|| Error::UnknownNode(symbol.get_name().to_string()))?;
        for (rule, formula) in rules.iter_mut() {
            if !symbol.is_instantiated() || rule == symbol {
                *formula = formula.subs(&substitution, true);
            }
        }
        Ok(())
    }

    /// Rename a node, its rule symbols and every reference to it.
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

    /// Replace every character outside of `[A-Za-z0-9_]` in node names by `_`, resolving
    /// conflicts with numeric suffixes. Returns the mapping of renamed nodes.
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

    /// Write all rules, sorted by node name (rules of one node keep their order).
    pub fn source(&self, separator: &str) -> String {
        let mut nodes = self.iter().collect::<Vec<_>>();
        nodes.sort_by(|(a, _), (b, _)| a.cmp(b));
        let mut buffer = String::new();
        for (_, rules) in nodes {
            for (symbol, formula) in rules {
                buffer.push_str(&format!("{}{}{}\n", symbol, separator, formula));
            }
        }
        buffer
    }

    fn quick_rename(&mut self, old_name: &str, new_name: &str) -> Result<(), Error> {
        if self.contains(new_name) {
            return Err(Error::NodeExists(new_name.to_string()));
        }
        let rules = self
            .functions
            .shift_remove(old_name)
            .ok_or_else(|| Error::UnknownNode(old_name.to_string()))?;
        let rules = rules
            .into_iter()
            .map(|(symbol, formula)| (symbol.renamed(new_name), formula))
            .collect();
        self.functions.insert(new_name.to_string(), rules);
        Ok(())
    }

    fn rename_references(&mut self, names: &HashMap<String, String>) {
        for rules in self.functions.values_mut() {
            for (_, formula) in rules.iter_mut() {
                *formula = formula.rename_symbols(names);
            }
        }
    }
}

impl Default for MultiValuedNetwork {
    fn default() -> Self {
        MultiValuedNetwork::new()
    }
}

impl Display for MultiValuedNetwork {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.source(" <- "))
    }
}
