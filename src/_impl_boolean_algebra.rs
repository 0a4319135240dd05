use crate::_impl_formula_parser::parse_formula;
use crate::{BooleanAlgebra, Error, Formula, Symbol};

/// Characters which can appear in node names in addition to alphanumeric characters and `_`.
const DEFAULT_ALLOWED_IN_NAME: [char; 4] = ['.', '_', ':', '-'];

impl Default for BooleanAlgebra {
    fn default() -> Self {
        BooleanAlgebra::boolean()
    }
}

impl BooleanAlgebra {
    /// Algebra of Boolean networks: symbols are plain node names.
    pub fn boolean() -> BooleanAlgebra {
        BooleanAlgebra {
            allowed_in_name: DEFAULT_ALLOWED_IN_NAME.to_vec(),
            multi_valued: false,
        }
    }

    /// Algebra of multi-valued networks: a trailing `:<int>` of a name is a threshold level.
    pub fn multi_valued() -> BooleanAlgebra {
        BooleanAlgebra {
            allowed_in_name: DEFAULT_ALLOWED_IN_NAME.to_vec(),
            multi_valued: true,
        }
    }

    /// Create an algebra with a custom set of extra name characters.
    pub fn with_allowed_in_name(allowed_in_name: &[char], multi_valued: bool) -> BooleanAlgebra {
        BooleanAlgebra {
            allowed_in_name: allowed_in_name.to_vec(),
            multi_valued,
        }
    }

    pub fn is_multi_valued(&self) -> bool {
        self.multi_valued
    }

    /// Check if the given char can appear in a node name.
    pub fn is_valid_in_name(&self, c: char) -> bool {
        c.is_alphanumeric() || c == '_' || self.allowed_in_name.contains(&c)
    }

    /// Resolve a name into a symbol of this algebra.
    pub fn symbol(&self, name: &str) -> Symbol {
        if self.multi_valued {
            Symbol::parse_multi_valued(name)
        } else {
            Symbol::new(name)
        }
    }

    /// Resolve several names at once.
    pub fn symbols(&self, names: &[&str]) -> Vec<Symbol> {
        names.iter().map(|it| self.symbol(it)).collect()
    }

    /// Parse a formula written using `!`, `&`, `|`, parentheses and constants `0`/`1`.
    pub fn parse(&self, expression: &str) -> Result<Formula, Error> {
        parse_formula(self, expression)
    }
}

#[cfg(test)]
mod tests {
    use crate::{BooleanAlgebra, Symbol};

    #[test]
    fn symbol_resolution() {
        let boolean = BooleanAlgebra::boolean();
        let multi = BooleanAlgebra::multi_valued();
        assert_eq!(Symbol::new("a:2"), boolean.symbol("a:2"));
        assert_eq!(Symbol::with_level("a", 2), multi.symbol("a:2"));
        assert!(boolean.is_valid_in_name('-'));
        assert!(!boolean.is_valid_in_name('<'));

        let strict = BooleanAlgebra::with_allowed_in_name(&[], false);
        assert!(!strict.is_valid_in_name('-'));
        assert!(strict.parse("a-b").is_err());
        assert!(boolean.parse("a-b").is_ok());
    }
}
