use crate::Formula::*;
use crate::{DnfStructure, Formula};
use std::cmp::Ordering;
use std::fmt::{Display, Formatter};

impl Formula {
    /// Simplify this formula.
    ///
    /// The result has no nested operators of the same kind, no constants below the root,
    /// no repeated or complementary operands, no double negations, and its operands are
    /// sorted (literals first, ordered by symbol, positive before negative). Furthermore,
    /// absorption (`a & (a | b) = a`), negative absorption (`a & (!a | b) = a & b`)
    /// and elimination (`(a & b) | (a & !b) = a`) are applied.
    ///
    /// Rewriting is repeated until nothing changes, hence `simplify` is idempotent.
    pub fn simplify(&self) -> Formula {
        let mut current = simplify_once(self);
        loop {
            let next = simplify_once(&current);
            if next == current {
                return current;
            }
            current = next;
        }
    }

    /// Convert this formula to a simplified disjunctive normal form.
    pub fn to_dnf(&self) -> Formula {
        normal_form(self, false)
    }

    /// Convert this formula to a simplified conjunctive normal form.
    pub fn to_cnf(&self) -> Formula {
        normal_form(self, true)
    }

    /// Extra simplification of a well-formed DNF.
    ///
    /// If this formula is a disjunction of clauses of literals and some symbol appears
    /// both positively and negatively, the formula is converted to CNF and back, which
    /// can merge clauses that plain simplification keeps apart. Otherwise, the formula
    /// is returned unchanged. This is a syntactic heuristic, not a minimization procedure.
    pub fn simplify_dnf(&self) -> Formula {
        match self.dnf_suspects() {
            Some(true) => self.to_cnf().to_dnf(),
            _ => self.clone(),
        }
    }

    /// Read the clause structure of a formula which is already in DNF.
    ///
    /// Operands that are not literals are kept as they are displayed. With `sort`, both
    /// literals and clauses are sorted, which makes the structure canonical.
    pub fn dnf_structure(&self, sort: bool) -> DnfStructure {
        fn literal(formula: &Formula) -> (String, bool) {
            match formula.as_literal() {
                Some((symbol, polarity)) => (symbol.to_string(), polarity),
                None => (formula.to_string(), true),
            }
        }

        if let Const(value) = self {
            return DnfStructure::Const(*value);
        }
        let clauses = match self {
            Or(args) => args.as_slice(),
            _ => std::slice::from_ref(self),
        };
        let mut clauses = clauses
            .iter()
            .map(|clause| {
                let literals = match clause {
                    And(args) => args.as_slice(),
                    _ => std::slice::from_ref(clause),
                };
                let mut literals = literals.iter().map(literal).collect::<Vec<_>>();
                if sort {
                    literals.sort();
                }
                literals
            })
            .collect::<Vec<_>>();
        if sort {
            clauses.sort();
        }
        DnfStructure::Clauses(clauses)
    }

    /// **(internal)** `None` if this is not a well-formed DNF, otherwise whether some
    /// symbol appears with both polarities.
    fn dnf_suspects(&self) -> Option<bool> {
        fn clause_literals(formula: &Formula) -> Option<Vec<(&crate::Symbol, bool)>> {
            if let Some(literal) = formula.as_literal() {
                return Some(vec![literal]);
            }
            formula
                .as_and()?
                .iter()
                .map(|it| it.as_literal())
                .collect::<Option<Vec<_>>>()
        }

        let literals = match self {
            Const(_) => return Some(false),
            Or(args) => {
                let mut result = Vec::new();
                for arg in args {
                    result.append(&mut clause_literals(arg)?);
                }
                result
            }
            _ => clause_literals(self)?,
        };
        Some(literals.iter().any(|(symbol, polarity)| {
            literals.contains(&(*symbol, !*polarity))
        }))
    }
}

impl Display for DnfStructure {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            DnfStructure::Const(value) => write!(f, "{}", value),
            DnfStructure::Clauses(clauses) => {
                write!(f, "[")?;
                for (i, clause) in clauses.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "[")?;
                    for (j, (name, polarity)) in clause.iter().enumerate() {
                        if j > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "({}, {})", name, polarity)?;
                    }
                    write!(f, "]")?;
                }
                write!(f, "]")
            }
        }
    }
}

/// **(internal)** Order of operands in a simplified formula: literals first (by symbol,
/// positive before negative), then everything else in the natural order.
fn operand_order(left: &Formula, right: &Formula) -> Ordering {
    match (left.as_literal(), right.as_literal()) {
        (Some((l_symbol, l_pol)), Some((r_symbol, r_pol))) => {
            l_symbol.cmp(r_symbol).then(r_pol.cmp(&l_pol))
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => left.cmp(right),
    }
}

/// **(internal)** Test whether `left` is syntactically the negation of `right`.
fn is_complement(left: &Formula, right: &Formula) -> bool {
    match (left, right) {
        (Not(inner), _) if inner.as_ref() == right => true,
        (_, Not(inner)) if inner.as_ref() == left => true,
        _ => false,
    }
}

/// **(internal)** One bottom-up pass of the rewriting rules.
fn simplify_once(formula: &Formula) -> Formula {
    match formula {
        Const(_) | Formula::Symbol(_) => formula.clone(),
        Not(inner) => match simplify_once(inner) {
            Const(value) => Const(!value),
            Not(inner) => *inner,
            inner => Formula::mk_not(inner),
        },
        And(args) => simplify_operator(args, true),
        Or(args) => simplify_operator(args, false),
    }
}

/// **(internal)** Operands of `formula` when viewed as an operator of the given kind.
fn operands(formula: &Formula, conjunction: bool) -> &[Formula] {
    match (formula, conjunction) {
        (And(args), true) | (Or(args), false) => args,
        _ => std::slice::from_ref(formula),
    }
}

/// **(internal)** Build an operator of the given kind, collapsing trivial argument lists.
fn mk_operator(mut args: Vec<Formula>, conjunction: bool) -> Formula {
    match args.len() {
        0 => Const(conjunction),
        1 => args.remove(0),
        _ if conjunction => And(args),
        _ => Or(args),
    }
}

/// **(internal)** Simplify an n-ary conjunction (or disjunction).
///
/// "Dual" operands are those of the opposite operator (disjunctions inside a conjunction).
fn simplify_operator(args: &[Formula], conjunction: bool) -> Formula {
    let annihilator = !conjunction;

    let mut flat = Vec::with_capacity(args.len());
    for arg in args {
        match simplify_once(arg) {
            Const(value) if value == annihilator => return Const(annihilator),
            Const(_) => (),
            simplified => flat.extend(operands(&simplified, conjunction).iter().cloned()),
        }
    }
    flat.sort_by(operand_order);
    flat.dedup();

    // Complementation: `a & !a = 0` and `a | !a = 1`.
    for (i, left) in flat.iter().enumerate() {
        if flat[(i + 1)..].iter().any(|right| is_complement(left, right)) {
            return Const(annihilator);
        }
    }

    // Absorption: a dual operand is redundant if it contains all operands of some
    // other dual operand, or if it contains some other (non-dual) operand.
    let dual = !conjunction;
    let mut removed = vec![false; flat.len()];
    for i in 0..flat.len() {
        let outer = operands(&flat[i], dual);
        if outer.len() < 2 {
            continue;
        }
        for j in 0..flat.len() {
            if i == j || removed[j] {
                continue;
            }
            let inner = operands(&flat[j], dual);
            if inner.iter().all(|it| outer.contains(it)) {
                removed[i] = true;
                break;
            }
        }
    }
    let mut flat = flat
        .into_iter()
        .zip(removed)
        .filter(|(_, removed)| !removed)
        .map(|(it, _)| it)
        .collect::<Vec<_>>();

    // Negative absorption: `a & (!a | b) = a & b`.
    let plain = flat
        .iter()
        .filter(|it| operands(it, dual).len() == 1)
        .cloned()
        .collect::<Vec<_>>();
    let mut changed = false;
    for arg in flat.iter_mut() {
        let items = operands(arg, dual);
        if items.len() < 2 {
            continue;
        }
        let kept = items
            .iter()
            .filter(|item| !plain.iter().any(|p| is_complement(p, item)))
            .cloned()
            .collect::<Vec<_>>();
        if kept.len() != items.len() {
            *arg = mk_operator(kept, dual);
            changed = true;
        }
    }
    if changed {
        // The rewritten operands are simplified again by the next pass.
        return mk_operator(flat, conjunction);
    }

    // Elimination: `(a & b) | (a & !b) = a`.
    for i in 0..flat.len() {
        for j in (i + 1)..flat.len() {
            if let Some(merged) = eliminate(&flat[i], &flat[j], dual) {
                flat.remove(j);
                flat[i] = merged;
                return mk_operator(flat, conjunction);
            }
        }
    }

    mk_operator(flat, conjunction)
}

/// **(internal)** If two dual operands differ in exactly one complementary pair of
/// items, return their common part.
fn eliminate(left: &Formula, right: &Formula, dual: bool) -> Option<Formula> {
    let left_items = operands(left, dual);
    let right_items = operands(right, dual);
    if left_items.len() != right_items.len() {
        return None;
    }
    let left_only = left_items
        .iter()
        .filter(|it| !right_items.contains(it))
        .collect::<Vec<_>>();
    let right_only = right_items
        .iter()
        .filter(|it| !left_items.contains(it))
        .collect::<Vec<_>>();
    if left_only.len() == 1 && right_only.len() == 1 && is_complement(left_only[0], right_only[0])
    {
        let common = left_items
            .iter()
            .filter(|it| *it != left_only[0])
            .cloned()
            .collect::<Vec<_>>();
        Some(mk_operator(common, dual))
    } else {
        None
    }
}

/// **(internal)** Compute a DNF (or a CNF when `conjunctive` is set) by distributing
/// the literalized formula.
fn normal_form(formula: &Formula, conjunctive: bool) -> Formula {
    /// Outer list is the outer operator, inner lists are clauses of literals.
    fn clauses(formula: &Formula, conjunctive: bool) -> Vec<Vec<Formula>> {
        match formula {
            Const(value) => {
                if *value != conjunctive {
                    vec![vec![]]
                } else {
                    vec![]
                }
            }
            Formula::Symbol(_) => vec![vec![formula.clone()]],
            Not(inner) if inner.as_symbol().is_some() => vec![vec![formula.clone()]],
            Not(_) => clauses(&formula.literalize(), conjunctive),
            And(args) | Or(args) => {
                let outer = matches!(formula, And(_)) == conjunctive;
                if outer {
                    args.iter()
                        .flat_map(|it| clauses(it, conjunctive))
                        .collect()
                } else {
                    let mut product = vec![vec![]];
                    for arg in args {
                        let arg_clauses = clauses(arg, conjunctive);
                        let mut next = Vec::with_capacity(product.len() * arg_clauses.len());
                        for prefix in &product {
                            for clause in &arg_clauses {
                                let mut joined: Vec<Formula> = prefix.clone();
                                joined.extend(clause.iter().cloned());
                                next.push(joined);
                            }
                        }
                        product = next;
                    }
                    product
                }
            }
        }
    }

    let prepared = formula.simplify().literalize().simplify();
    let clauses = clauses(&prepared, conjunctive)
        .into_iter()
        .map(|clause| mk_operator(clause, !conjunctive))
        .collect::<Vec<_>>();
    mk_operator(clauses, conjunctive).simplify()
}
