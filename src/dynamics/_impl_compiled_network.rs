use crate::{BooleanNetwork, Error, Formula};
use fxhash::FxHashMap;

/// **(internal)** A formula where symbols are replaced by indices of network nodes.
#[derive(Clone, Debug)]
enum CompiledFormula {
    Const(bool),
    Var(usize),
    Not(Box<CompiledFormula>),
    And(Vec<CompiledFormula>),
    Or(Vec<CompiledFormula>),
}

/// **(internal)** A Boolean network prepared for fast evaluation of encoded states.
///
/// Every symbol used in an update function must be a node of the network.
#[derive(Clone, Debug)]
pub(crate) struct CompiledNetwork {
    nodes: Vec<String>,
    functions: Vec<CompiledFormula>,
}

impl CompiledFormula {
    fn compile(formula: &Formula, index: &FxHashMap<&str, usize>) -> Result<CompiledFormula, Error> {
        Ok(match formula {
            Formula::Const(value) => CompiledFormula::Const(*value),
            Formula::Symbol(symbol) => match index.get(symbol.get_name()) {
                Some(i) if !symbol.is_instantiated() => CompiledFormula::Var(*i),
                Some(_) => {
                    return Err(Error::TypeMismatch(format!(
                        "threshold symbol `{}` in a Boolean network",
                        symbol
                    )))
                }
                None => return Err(Error::UnknownNode(symbol.get_name().to_string())),
            },
            Formula::Not(inner) => CompiledFormula::Not(Box::new(Self::compile(inner, index)?)),
            Formula::And(args) => CompiledFormula::And(
                args.iter()
                    .map(|it| Self::compile(it, index))
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            Formula::Or(args) => CompiledFormula::Or(
                args.iter()
                    .map(|it| Self::compile(it, index))
                    .collect::<Result<Vec<_>, _>>()?,
            ),
        })
    }

    fn eval(&self, state: &[bool]) -> bool {
        match self {
            CompiledFormula::Const(value) => *value,
            CompiledFormula::Var(i) => state[*i],
            CompiledFormula::Not(inner) => !inner.eval(state),
            CompiledFormula::And(args) => args.iter().all(|it| it.eval(state)),
            CompiledFormula::Or(args) => args.iter().any(|it| it.eval(state)),
        }
    }
}

impl CompiledNetwork {
    pub fn new(network: &BooleanNetwork) -> Result<CompiledNetwork, Error> {
        let nodes = network.nodes().map(|it| it.to_string()).collect::<Vec<_>>();
        let index = network
            .nodes()
            .enumerate()
            .map(|(i, node)| (node, i))
            .collect::<FxHashMap<_, _>>();
        let functions = network
            .iter()
            .map(|(_, formula)| CompiledFormula::compile(formula, &index))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(CompiledNetwork { nodes, functions })
    }

    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Index of the given node.
    pub fn find_node(&self, node: &str) -> Option<usize> {
        self.nodes.iter().position(|it| it == node)
    }

    /// Value of the update function of node `i` in `state`.
    pub fn eval_node(&self, i: usize, state: &[bool]) -> bool {
        self.functions[i].eval(state)
    }

    /// The full image of `state`.
    pub fn image(&self, state: &[bool]) -> Vec<bool> {
        self.functions.iter().map(|it| it.eval(state)).collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::dynamics::CompiledNetwork;
    use crate::{BooleanNetwork, Error};

    #[test]
    fn compiled_evaluation() {
        let bn = BooleanNetwork::try_from_source("a <- b\nb <- a | b\nc <- !a & !c").unwrap();
        let compiled = CompiledNetwork::new(&bn).unwrap();
        assert_eq!(3, compiled.num_nodes());
        assert_eq!(Some(2), compiled.find_node("c"));
        assert_eq!(vec![true, true, true], compiled.image(&[false, true, false]));
        assert_eq!(vec![true, true, false], compiled.image(&[true, true, true]));
        assert_eq!(vec![false, false, true], compiled.image(&[false, false, false]));

        let bn = BooleanNetwork::try_from_source("a <- b").unwrap();
        assert!(matches!(CompiledNetwork::new(&bn), Err(Error::UnknownNode(n)) if n == "b"));
    }
}
