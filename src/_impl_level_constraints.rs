//! Threshold constraints over the levels of a multi-valued node.
//!
//! A symbol `a:k` is true whenever `a` is at level `k` or above. Comparisons of a node
//! level with a constant are therefore expressed as (negated) threshold symbols.

use crate::{Formula, Symbol};

fn threshold(node: &str, level: u32) -> Formula {
    Formula::mk_symbol(Symbol::with_level(node, level))
}

/// `node >= level`
pub fn at_least(node: &str, level: u32) -> Formula {
    threshold(node, level)
}

/// `node > level`
pub fn greater_than(node: &str, level: u32) -> Formula {
    match level.checked_add(1) {
        Some(next) => threshold(node, next),
        None => Formula::mk_false(),
    }
}

/// `node <= level`
pub fn at_most(node: &str, level: u32) -> Formula {
    match level.checked_add(1) {
        Some(next) => threshold(node, next).negation(),
        None => Formula::mk_true(),
    }
}

/// `node < level`
pub fn less_than(node: &str, level: u32) -> Formula {
    threshold(node, level).negation()
}

/// `node == level`
pub fn equals(node: &str, level: u32) -> Formula {
    match level.checked_add(1) {
        Some(next) => threshold(node, level).and(threshold(node, next).negation()),
        None => threshold(node, level),
    }
}

/// `node != level`
pub fn not_equals(node: &str, level: u32) -> Formula {
    match level.checked_add(1) {
        Some(next) => threshold(node, level).negation().or(threshold(node, next)),
        None => threshold(node, level).negation(),
    }
}

#[cfg(test)]
mod tests {
    use crate::{at_least, at_most, equals, greater_than, less_than, not_equals, Formula};

    #[test]
    fn threshold_constructors() {
        assert_eq!("a:2", at_least("a", 2).to_string());
        assert_eq!("a:3", greater_than("a", 2).to_string());
        assert_eq!("!a:3", at_most("a", 2).to_string());
        assert_eq!("!a:2", less_than("a", 2).to_string());
        assert_eq!("a:1&!a:2", equals("a", 1).to_string());
        assert_eq!("!a:1|a:2", not_equals("a", 1).to_string());
        assert!(not_equals("a", 1).is_equivalent(&equals("a", 1).negation()));
    }

    #[test]
    fn highest_level() {
        let max = u32::MAX;
        assert_eq!(Formula::mk_false(), greater_than("a", max));
        assert_eq!(Formula::mk_true(), at_most("a", max));
        assert_eq!(format!("a:{}", max), equals("a", max).to_string());
        assert_eq!(format!("!a:{}", max), not_equals("a", max).to_string());
    }
}
