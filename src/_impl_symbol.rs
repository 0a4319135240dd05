use crate::Symbol;
use std::fmt::{Display, Formatter};

impl Symbol {
    /// Create a plain (non-instantiated) symbol.
    pub fn new(name: &str) -> Symbol {
        Symbol {
            name: name.to_string(),
            level: None,
        }
    }

    /// Create a symbol instantiated with the given threshold `level`.
    pub fn with_level(name: &str, level: u32) -> Symbol {
        Symbol {
            name: name.to_string(),
            level: Some(level),
        }
    }

    /// Name of the node this symbol refers to.
    pub fn get_name(&self) -> &str {
        self.name.as_str()
    }

    /// Threshold level of this symbol, if it is instantiated.
    pub fn get_level(&self) -> Option<u32> {
        self.level
    }

    pub fn is_instantiated(&self) -> bool {
        self.level.is_some()
    }

    /// The threshold guarded by this symbol. Plain symbols guard level `1`.
    pub fn threshold(&self) -> u32 {
        self.level.unwrap_or(1)
    }

    /// The plain symbol of the same node.
    pub fn node_symbol(&self) -> Symbol {
        Symbol::new(self.name.as_str())
    }

    /// The symbol of the same node, instantiated at `level`.
    pub fn at_level(&self, level: u32) -> Symbol {
        Symbol::with_level(self.name.as_str(), level)
    }

    /// **(internal)** Same symbol, but referring to a node with a different name.
    pub(crate) fn renamed(&self, name: &str) -> Symbol {
        Symbol {
            name: name.to_string(),
            level: self.level,
        }
    }

    /// **(internal)** Read a multi-valued symbol: a trailing `:<int>` is a threshold level,
    /// anything else is a plain node name.
    pub(crate) fn parse_multi_valued(token: &str) -> Symbol {
        if let Some((name, level)) = token.rsplit_once(':') {
            if let Ok(level) = level.parse::<u32>() {
                return Symbol::with_level(name, level);
            }
        }
        Symbol::new(token)
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.level {
            Some(level) => write!(f, "{}:{}", self.name, level),
            None => write!(f, "{}", self.name),
        }
    }
}
