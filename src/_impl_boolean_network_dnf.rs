use crate::{BooleanNetwork, DnfStructure};
use indexmap::IndexMap;
use sha2::{Digest, Sha256};

impl BooleanNetwork {
    /// The clause structure of the DNF of every update function.
    pub fn as_dnf(&self) -> IndexMap<String, DnfStructure> {
        self.iter()
            .map(|(node, formula)| (node.to_string(), formula.to_dnf().dnf_structure(false)))
            .collect()
    }

    /// Compute a hash of this network based on the DNF of its update functions.
    ///
    /// Networks that differ only in the syntax of their functions (operand order,
    /// redundant parentheses, double negations, ...) have the same hash. With `simplify`,
    /// the `Formula::simplify_dnf` heuristic is applied to every DNF first. Note that
    /// this is not a semantic check: two equivalent functions can still have different
    /// DNFs and hence different hashes.
    pub fn make_hash(&self, simplify: bool) -> String {
        let mut functions = self.iter().collect::<Vec<_>>();
        functions.sort_by(|(a, _), (b, _)| a.cmp(b));
        let mut hasher = Sha256::new();
        for (node, formula) in functions {
            let structure = if formula.as_const().is_some() {
                formula.dnf_structure(true)
            } else {
                let dnf = formula.to_dnf();
                if simplify {
                    dnf.simplify_dnf().dnf_structure(true)
                } else {
                    dnf.dnf_structure(true)
                }
            };
            hasher.update(format!("({}, {});", node, structure).as_bytes());
        }
        format!("{:x}", hasher.finalize())
    }

    /// A copy of this network where every function is simplified, including the extra
    /// `Formula::simplify_dnf` step.
    pub fn simplify(&self) -> BooleanNetwork {
        let mut network = self.clone();
        for formula in network.functions.values_mut() {
            *formula = formula.simplify().simplify_dnf();
        }
        network
    }
}
