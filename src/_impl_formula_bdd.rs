use crate::Formula::*;
use crate::{Formula, Symbol};
use biodivine_lib_bdd::{Bdd, BddVariable, BddVariableSet};
use std::collections::{BTreeSet, HashMap};

impl Formula {
    /// Check whether two formulas represent the same Boolean function.
    ///
    /// Every distinct `Symbol` is treated as an independent proposition, i.e. threshold
    /// levels of multi-valued symbols are not related to each other.
    pub fn is_equivalent(&self, other: &Formula) -> bool {
        let mut symbols = self.symbols();
        symbols.extend(other.symbols());
        let (context, mapping) = symbolic_context(&symbols);
        self.to_bdd(&context, &mapping) == other.to_bdd(&context, &mapping)
    }

    /// **(internal)** Build a `Bdd` of this formula, assuming `mapping` covers every symbol.
    fn to_bdd(&self, context: &BddVariableSet, mapping: &HashMap<Symbol, BddVariable>) -> Bdd {
        match self {
            Const(true) => context.mk_true(),
            Const(false) => context.mk_false(),
            Formula::Symbol(symbol) => context.mk_var(mapping[symbol]),
            Not(inner) => inner.to_bdd(context, mapping).not(),
            And(args) => args.iter().fold(context.mk_true(), |acc, it| {
                acc.and(&it.to_bdd(context, mapping))
            }),
            Or(args) => args.iter().fold(context.mk_false(), |acc, it| {
                acc.or(&it.to_bdd(context, mapping))
            }),
        }
    }
}

/// **(internal)** Allocate one anonymous BDD variable per symbol.
fn symbolic_context(symbols: &BTreeSet<Symbol>) -> (BddVariableSet, HashMap<Symbol, BddVariable>) {
    let context = BddVariableSet::new_anonymous(symbols.len() as u16);
    let mapping = symbols
        .iter()
        .cloned()
        .zip(context.variables())
        .collect::<HashMap<_, _>>();
    (context, mapping)
}

#[cfg(test)]
mod tests {
    use crate::BooleanAlgebra;

    #[test]
    fn formula_equivalence() {
        let algebra = BooleanAlgebra::boolean();
        let parse = |value: &str| algebra.parse(value).unwrap();
        assert!(parse("a & b").is_equivalent(&parse("b & a")));
        assert!(parse("!(a | b)").is_equivalent(&parse("!a & !b")));
        assert!(parse("a | !a").is_equivalent(&parse("1")));
        assert!(parse("(a & b) | (!a & c) | (b & c)").is_equivalent(&parse("(a & b) | (!a & c)")));
        assert!(!parse("a").is_equivalent(&parse("b")));
        assert!(!parse("a | b").is_equivalent(&parse("a & b")));
    }
}
