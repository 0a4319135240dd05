use crate::{BooleanAlgebra, Error, Formula, Key, State, Substitution, Symbol, Value};
use std::collections::HashMap;

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Level(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Level(i64::from(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Level(i64::from(value))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<Formula> for Value {
    fn from(value: Formula) -> Self {
        Value::Formula(value)
    }
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Key::Name(value.to_string())
    }
}

impl From<String> for Key {
    fn from(value: String) -> Self {
        Key::Name(value)
    }
}

impl From<Symbol> for Key {
    fn from(value: Symbol) -> Self {
        Key::Formula(Formula::mk_symbol(value))
    }
}

impl From<Formula> for Key {
    fn from(value: Formula) -> Self {
        Key::Formula(value)
    }
}

impl Value {
    /// **(internal)** Convert this value into a formula of the given algebra.
    fn into_formula(self, algebra: &BooleanAlgebra) -> Result<Formula, Error> {
        Ok(match self {
            Value::Bool(value) => Formula::mk_const(value),
            Value::Level(value) => Formula::mk_const(value > 0),
            Value::Text(value) => algebra.parse(&value)?,
            Value::Formula(value) => value,
        })
    }
}

impl Key {
    /// **(internal)** Resolve this key into a symbol of the given algebra.
    fn into_symbol(self, algebra: &BooleanAlgebra) -> Result<Symbol, Error> {
        match self {
            Key::Name(name) => Ok(algebra.symbol(&name)),
            Key::Formula(Formula::Symbol(symbol)) => Ok(symbol),
            Key::Formula(other) => Err(Error::TypeMismatch(format!(
                "substitution key `{}` is not a symbol",
                other
            ))),
        }
    }
}

impl Substitution {
    pub fn new() -> Substitution {
        Substitution::default()
    }

    /// Builder-style variant of `insert`.
    pub fn with<K: Into<Key>, V: Into<Value>>(mut self, key: K, value: V) -> Substitution {
        self.insert(key, value);
        self
    }

    /// Add a replacement. Later entries override earlier entries of the same symbol.
    pub fn insert<K: Into<Key>, V: Into<Value>>(&mut self, key: K, value: V) {
        self.entries.push((key.into(), value.into()));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve keys into symbols and values into formulas.
    ///
    /// Fails with `Error::TypeMismatch` if some key is a formula other than a symbol,
    /// or with `Error::Parse` when a textual value is not a valid formula.
    pub fn normalize(&self, algebra: &BooleanAlgebra) -> Result<HashMap<Symbol, Formula>, Error> {
        let mut result = HashMap::with_capacity(self.entries.len());
        for (key, value) in &self.entries {
            let symbol = key.clone().into_symbol(algebra)?;
            let formula = value.clone().into_formula(algebra)?;
            result.insert(symbol, formula);
        }
        Ok(result)
    }
}

impl<K: Into<Key>, V: Into<Value>> FromIterator<(K, V)> for Substitution {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Substitution {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Every node of the state is replaced by its level.
impl From<&State> for Substitution {
    fn from(state: &State) -> Self {
        state.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::{BooleanAlgebra, Error, Formula, State, Substitution, Symbol};

    #[test]
    fn substitution_normalization() {
        let algebra = BooleanAlgebra::boolean();
        let substitution = Substitution::new()
            .with("a", true)
            .with("b", 0)
            .with("c", 3)
            .with(Symbol::new("d"), "x & y")
            .with(Formula::mk_var("e"), Formula::mk_var("z"));
        let normalized = substitution.normalize(&algebra).unwrap();
        assert_eq!(5, normalized.len());
        assert_eq!(Formula::mk_true(), normalized[&Symbol::new("a")]);
        assert_eq!(Formula::mk_false(), normalized[&Symbol::new("b")]);
        assert_eq!(Formula::mk_true(), normalized[&Symbol::new("c")]);
        assert_eq!("x&y", normalized[&Symbol::new("d")].to_string());
        assert_eq!(Formula::mk_var("z"), normalized[&Symbol::new("e")]);
    }

    #[test]
    fn substitution_errors() {
        let algebra = BooleanAlgebra::boolean();
        let bad_key = Substitution::new().with(algebra.parse("a & b").unwrap(), 1);
        assert!(matches!(
            bad_key.normalize(&algebra),
            Err(Error::TypeMismatch(_))
        ));
        let bad_value = Substitution::new().with("a", "a &");
        assert!(matches!(bad_value.normalize(&algebra), Err(Error::Parse(_))));
    }

    #[test]
    fn substitution_from_state() {
        let state: State = [("a", 1), ("b", 0)].into_iter().collect();
        let substitution = Substitution::from(&state);
        let normalized = substitution
            .normalize(&BooleanAlgebra::multi_valued())
            .unwrap();
        assert_eq!(Formula::mk_true(), normalized[&Symbol::new("a")]);
        assert_eq!(Formula::mk_false(), normalized[&Symbol::new("b")]);
    }
}
