use crate::Formula::*;
use crate::{Formula, Symbol};
use std::collections::{BTreeSet, HashMap};
use std::fmt::{Display, Formatter};

/// Constructor and destructor utility methods. These mainly avoid unnecessary boxing
/// and exhaustive pattern matching when not necessary.
impl Formula {
    /// Create a `true` formula.
    pub fn mk_true() -> Formula {
        Const(true)
    }

    /// Create a `false` formula.
    pub fn mk_false() -> Formula {
        Const(false)
    }

    pub fn mk_const(value: bool) -> Formula {
        Const(value)
    }

    /// Create a formula consisting of a single `symbol`.
    pub fn mk_symbol(symbol: Symbol) -> Formula {
        Formula::Symbol(symbol)
    }

    /// Create a formula consisting of a single plain symbol with the given `name`.
    pub fn mk_var(name: &str) -> Formula {
        Formula::Symbol(Symbol::new(name))
    }

    /// Create a `!phi` formula, where `phi` is an inner `Formula`.
    pub fn mk_not(inner: Formula) -> Formula {
        Not(Box::new(inner))
    }

    /// Create an n-ary conjunction.
    pub fn mk_and(args: Vec<Formula>) -> Formula {
        And(args)
    }

    /// Create an n-ary disjunction.
    pub fn mk_or(args: Vec<Formula>) -> Formula {
        Or(args)
    }

    /// Negate this formula.
    pub fn negation(self) -> Formula {
        Formula::mk_not(self)
    }

    /// Create a conjunction.
    pub fn and(self, other: Formula) -> Formula {
        And(vec![self, other])
    }

    /// Create a disjunction.
    pub fn or(self, other: Formula) -> Formula {
        Or(vec![self, other])
    }

    /// If `Const`, return the value, otherwise return `None`.
    pub fn as_const(&self) -> Option<bool> {
        match self {
            Const(value) => Some(*value),
            _ => None,
        }
    }

    /// If `Symbol`, return the symbol, otherwise return `None`.
    pub fn as_symbol(&self) -> Option<&Symbol> {
        match self {
            Formula::Symbol(symbol) => Some(symbol),
            _ => None,
        }
    }

    /// If `Not`, return the inner formula, otherwise return `None`.
    pub fn as_not(&self) -> Option<&Formula> {
        match self {
            Not(inner) => Some(inner),
            _ => None,
        }
    }

    /// If `And`, return the arguments, otherwise return `None`.
    pub fn as_and(&self) -> Option<&[Formula]> {
        match self {
            And(args) => Some(args),
            _ => None,
        }
    }

    /// If `Or`, return the arguments, otherwise return `None`.
    pub fn as_or(&self) -> Option<&[Formula]> {
        match self {
            Or(args) => Some(args),
            _ => None,
        }
    }

    /// If this is a literal (a symbol or a negated symbol), return the symbol and its polarity.
    pub fn as_literal(&self) -> Option<(&Symbol, bool)> {
        match self {
            Formula::Symbol(symbol) => Some((symbol, true)),
            Not(inner) => inner.as_symbol().map(|it| (it, false)),
            _ => None,
        }
    }

    pub fn is_literal(&self) -> bool {
        self.as_literal().is_some()
    }
}

/// Inspection and rewriting.
impl Formula {
    /// Iterate through all nodes of the abstract syntax tree of this formula in post-order.
    pub fn walk_postorder<F>(&self, action: &mut F)
    where
        F: FnMut(&Formula),
    {
        match self {
            Const(_) | Formula::Symbol(_) => action(self),
            Not(inner) => {
                inner.walk_postorder(action);
                action(self);
            }
            And(args) | Or(args) => {
                for arg in args {
                    arg.walk_postorder(action);
                }
                action(self);
            }
        }
    }

    /// Return a sorted set of all symbols that appear in this formula.
    pub fn symbols(&self) -> BTreeSet<Symbol> {
        let mut result = BTreeSet::new();
        self.walk_postorder(&mut |it: &Formula| {
            if let Formula::Symbol(symbol) = it {
                result.insert(symbol.clone());
            }
        });
        result
    }

    /// Return the set of `(symbol, polarity)` literals that appear in the negation normal
    /// form of this formula.
    pub fn literals(&self) -> BTreeSet<(Symbol, bool)> {
        fn collect(formula: &Formula, result: &mut BTreeSet<(Symbol, bool)>) {
            if let Some((symbol, polarity)) = formula.as_literal() {
                // A negative literal is a leaf: its inner symbol is not a positive occurrence.
                result.insert((symbol.clone(), polarity));
                return;
            }
            match formula {
                And(args) | Or(args) => args.iter().for_each(|it| collect(it, result)),
                Not(inner) => collect(inner, result),
                Const(_) | Formula::Symbol(_) => (),
            }
        }

        let mut result = BTreeSet::new();
        collect(&self.literalize(), &mut result);
        result
    }

    /// Push every negation down to the symbols (negation normal form).
    ///
    /// Negated constants are evaluated, double negations disappear and De Morgan's laws
    /// are applied to conjunctions and disjunctions.
    pub fn literalize(&self) -> Formula {
        fn recursion(formula: &Formula, invert: bool) -> Formula {
            match formula {
                Const(value) => Const(*value != invert),
                Formula::Symbol(_) => {
                    if invert {
                        formula.clone().negation()
                    } else {
                        formula.clone()
                    }
                }
                Not(inner) => recursion(inner, !invert),
                And(args) => {
                    let args = args.iter().map(|it| recursion(it, invert)).collect();
                    if invert {
                        Or(args)
                    } else {
                        And(args)
                    }
                }
                Or(args) => {
                    let args = args.iter().map(|it| recursion(it, invert)).collect();
                    if invert {
                        And(args)
                    } else {
                        Or(args)
                    }
                }
            }
        }

        recursion(self, false)
    }

    /// Replace every symbol which appears in `substitution` by its associated formula.
    ///
    /// If `simplify` is set, the result is simplified.
    pub fn subs(&self, substitution: &HashMap<Symbol, Formula>, simplify: bool) -> Formula {
        fn recursion(formula: &Formula, substitution: &HashMap<Symbol, Formula>) -> Formula {
            match formula {
                Const(_) => formula.clone(),
                Formula::Symbol(symbol) => substitution
                    .get(symbol)
                    .cloned()
                    .unwrap_or_else(|| formula.clone()),
                Not(inner) => recursion(inner, substitution).negation(),
                And(args) => And(args.iter().map(|it| recursion(it, substitution)).collect()),
                Or(args) => Or(args.iter().map(|it| recursion(it, substitution)).collect()),
            }
        }

        let result = recursion(self, substitution);
        if simplify {
            result.simplify()
        } else {
            result
        }
    }

    /// Rename the nodes referenced by symbols, keeping their threshold levels.
    pub fn rename_symbols(&self, names: &HashMap<String, String>) -> Formula {
        match self {
            Const(_) => self.clone(),
            Formula::Symbol(symbol) => match names.get(symbol.get_name()) {
                Some(name) => Formula::Symbol(symbol.renamed(name)),
                None => self.clone(),
            },
            Not(inner) => inner.rename_symbols(names).negation(),
            And(args) => And(args.iter().map(|it| it.rename_symbols(names)).collect()),
            Or(args) => Or(args.iter().map(|it| it.rename_symbols(names)).collect()),
        }
    }

    /// If possible, evaluate this formula using the given (partial) `valuation` of symbols.
    ///
    /// Note that even a partial valuation can be enough. For example, `a & b` is false
    /// whenever `a` is false, regardless of `b`. If the result cannot be determined,
    /// the method returns `None`.
    pub fn evaluate<F>(&self, valuation: &F) -> Option<bool>
    where
        F: Fn(&Symbol) -> Option<bool>,
    {
        match self {
            Const(value) => Some(*value),
            Formula::Symbol(symbol) => valuation(symbol),
            Not(inner) => inner.evaluate(valuation).map(|it| !it),
            And(args) => {
                let mut result = Some(true);
                for arg in args {
                    match arg.evaluate(valuation) {
                        Some(false) => return Some(false),
                        Some(true) => (),
                        None => result = None,
                    }
                }
                result
            }
            Or(args) => {
                let mut result = Some(false);
                for arg in args {
                    match arg.evaluate(valuation) {
                        Some(true) => return Some(true),
                        Some(false) => (),
                        None => result = None,
                    }
                }
                result
            }
        }
    }
}

/// Operands which are not literals are enclosed in parentheses. Constants are
/// written as `1` and `0`.
impl Display for Formula {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        fn write_operand(f: &mut Formatter<'_>, operand: &Formula) -> std::fmt::Result {
            match operand {
                Const(_) | Formula::Symbol(_) => write!(f, "{}", operand),
                Not(inner) if inner.as_symbol().is_some() => write!(f, "{}", operand),
                _ => write!(f, "({})", operand),
            }
        }

        fn write_args(f: &mut Formatter<'_>, args: &[Formula], op: &str) -> std::fmt::Result {
            for (i, arg) in args.iter().enumerate() {
                if i > 0 {
                    write!(f, "{}", op)?;
                }
                write_operand(f, arg)?;
            }
            Ok(())
        }

        match self {
            Const(true) => write!(f, "1"),
            Const(false) => write!(f, "0"),
            Formula::Symbol(symbol) => write!(f, "{}", symbol),
            Not(inner) => {
                write!(f, "!")?;
                write_operand(f, inner)
            }
            And(args) if args.is_empty() => write!(f, "1"),
            Or(args) if args.is_empty() => write!(f, "0"),
            And(args) => write_args(f, args, "&"),
            Or(args) => write_args(f, args, "|"),
        }
    }
}
