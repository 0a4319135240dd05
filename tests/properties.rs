//! Property-based tests of formula rewriting and elementary update modes.

use biodivine_lib_minibn::dynamics::{ElementaryUpdateMode, UpdateMode};
use biodivine_lib_minibn::{BooleanNetwork, Formula, State, Symbol};
use proptest::prelude::*;
use std::collections::BTreeSet;

const NODES: [&str; 3] = ["a", "b", "c"];

/// Formulas over the nodes `a`, `b` and `c`, with constants.
fn arb_formula() -> impl Strategy<Value = Formula> {
    let leaf = prop_oneof![
        prop::sample::select(NODES.to_vec()).prop_map(Formula::mk_var),
        any::<bool>().prop_map(Formula::mk_const),
    ];
    leaf.prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            inner.clone().prop_map(Formula::mk_not),
            prop::collection::vec(inner.clone(), 0..4).prop_map(Formula::mk_and),
            prop::collection::vec(inner, 0..4).prop_map(Formula::mk_or),
        ]
    })
}

/// Formulas built from `a`, `b`, `c` and constants using only conjunction and disjunction.
fn arb_positive_formula() -> impl Strategy<Value = Formula> {
    let leaf = prop_oneof![
        prop::sample::select(NODES.to_vec()).prop_map(Formula::mk_var),
        any::<bool>().prop_map(Formula::mk_const),
    ];
    leaf.prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Formula::mk_and),
            prop::collection::vec(inner, 0..4).prop_map(Formula::mk_or),
        ]
    })
}

/// True if the literal `symbol` with the given polarity appears in `formula`, without
/// looking inside other literals.
fn has_literal(formula: &Formula, symbol: &Symbol, polarity: bool) -> bool {
    if let Some((it, it_polarity)) = formula.as_literal() {
        return it == symbol && it_polarity == polarity;
    }
    match formula {
        Formula::And(args) | Formula::Or(args) => {
            args.iter().any(|it| has_literal(it, symbol, polarity))
        }
        Formula::Not(inner) => has_literal(inner, symbol, polarity),
        Formula::Const(_) | Formula::Symbol(_) => false,
    }
}

fn arb_network() -> impl Strategy<Value = BooleanNetwork> {
    prop::collection::vec(arb_formula(), NODES.len()).prop_map(|formulas| {
        let mut network = BooleanNetwork::new();
        for (node, formula) in NODES.iter().zip(formulas) {
            network.set_formula(node, formula);
        }
        network
    })
}

fn arb_state() -> impl Strategy<Value = State> {
    prop::collection::vec(any::<bool>(), NODES.len()).prop_map(|values| {
        NODES
            .iter()
            .zip(values)
            .map(|(node, value)| (*node, u32::from(value)))
            .collect()
    })
}

proptest! {
    #[test]
    fn simplify_is_idempotent(formula in arb_formula()) {
        let once = formula.simplify();
        prop_assert_eq!(once.simplify(), once);
    }

    #[test]
    fn rewriting_preserves_semantics(formula in arb_formula()) {
        prop_assert!(formula.is_equivalent(&formula.simplify()));
        prop_assert!(formula.is_equivalent(&formula.literalize()));
        prop_assert!(formula.is_equivalent(&formula.to_dnf()));
        prop_assert!(formula.is_equivalent(&formula.to_cnf()));
        prop_assert!(formula.is_equivalent(&formula.to_dnf().simplify_dnf()));
    }

    #[test]
    fn literals_occur_in_negation_normal_form(formula in arb_formula()) {
        let literalized = formula.literalize();
        for (symbol, polarity) in formula.literals() {
            prop_assert!(has_literal(&literalized, &symbol, polarity));
        }
    }

    #[test]
    fn positive_formulas_have_positive_literals(formula in arb_positive_formula()) {
        let literals = formula.literals();
        prop_assert!(literals.iter().all(|(_, polarity)| *polarity));
        let symbols = literals.into_iter().map(|(it, _)| it).collect::<BTreeSet<_>>();
        prop_assert_eq!(formula.symbols(), symbols);
    }

    #[test]
    fn dnf_structure_is_stable(network in arb_network()) {
        prop_assert_eq!(network.as_dnf(), network.as_dnf());
        prop_assert_eq!(network.make_hash(false), network.make_hash(false));
    }

    #[test]
    fn elementary_mode_cardinalities(network in arb_network(), state in arb_state()) {
        let image = network.evaluate(&state).unwrap();
        let changed = state.differences(&image).count();

        let fully = ElementaryUpdateMode::fully_asynchronous(&network).unwrap();
        prop_assert_eq!(changed, fully.successors(&state).unwrap().count());

        let general = ElementaryUpdateMode::general_asynchronous(&network).unwrap();
        let expected = (1usize << NODES.len()) - (1usize << (NODES.len() - changed));
        prop_assert_eq!(expected, general.successors(&state).unwrap().count());

        let synchronous = ElementaryUpdateMode::synchronous(&network).unwrap();
        let successors = synchronous.successors(&state).unwrap().collect::<Vec<_>>();
        prop_assert_eq!(vec![image], successors);
    }
}
