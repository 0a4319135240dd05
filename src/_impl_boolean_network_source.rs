use crate::{BooleanNetwork, Error};
use lazy_static::lazy_static;
use regex::Regex;
use std::convert::TryFrom;
use std::fmt::{Display, Formatter};
use tracing::warn;

lazy_static! {
    static ref ARROW_RULE: Regex = Regex::new(r"^(?P<target>.*?)<-(?P<formula>.*)$").unwrap();
    static ref COMMA_RULE: Regex = Regex::new(r"^(?P<target>[^,]*),(?P<formula>.*)$").unwrap();
}

impl BooleanNetwork {
    /// Read a network from its textual source.
    ///
    /// Every non-empty line is a rule `node <- formula` or `node, formula` (the arrow takes
    /// precedence when both appear). Text after `#` is a comment. The first rule which reads
    /// `targets, factors` (or `targets <- factors`) is a header and is skipped.
    pub fn try_from_source(source: &str) -> Result<BooleanNetwork, Error> {
        let mut network = BooleanNetwork::new();
        network.import_source(source)?;
        Ok(network)
    }

    /// Add the rules of `source` to this network. A rule for an existing node replaces
    /// its update function.
    pub fn import_source(&mut self, source: &str) -> Result<(), Error> {
        let mut header_seen = false;
        for (i, line) in source.lines().enumerate() {
            let line = line.split('#').next().unwrap_or_default().trim();
            if line.is_empty() {
                continue;
            }
            let (target, formula) = split_rule(line).map_err(|e| e.at_line(i + 1))?;
            if !header_seen && target == "targets" && formula == "factors" {
                header_seen = true;
                continue;
            }
            if target.is_empty() {
                return Err(Error::Parse("missing target node".to_string()).at_line(i + 1));
            }
            let formula = self.algebra.parse(formula).map_err(|e| e.at_line(i + 1))?;
            if self.set_formula(target, formula).is_some() {
                warn!(node = target, line = i + 1, "Duplicate rule replaces the previous one.");
            }
        }
        Ok(())
    }

    /// Write the rules of this network, sorted by node name, using the given separator.
    pub fn source(&self, separator: &str) -> String {
        let mut rules = self.iter().collect::<Vec<_>>();
        rules.sort_by(|(a, _), (b, _)| a.cmp(b));
        let mut buffer = String::new();
        for (node, formula) in rules {
            buffer.push_str(&format!("{}{}{}\n", node, separator, formula));
        }
        buffer
    }

    /// The `bnet` representation: a `targets, factors` header followed by the rules.
    pub fn to_bnet(&self) -> String {
        format!("targets, factors\n{}", self.source(", "))
    }
}

/// **(internal)** Split a rule into its (trimmed) target and formula parts.
fn split_rule(line: &str) -> Result<(&str, &str), Error> {
    let captures = ARROW_RULE
        .captures(line)
        .or_else(|| COMMA_RULE.captures(line))
        .ok_or_else(|| Error::Parse(format!("no separator in `{}`", line)))?;
    let target = captures.name("target").map(|it| it.as_str()).unwrap_or_default();
    let formula = captures.name("formula").map(|it| it.as_str()).unwrap_or_default();
    Ok((target.trim(), formula.trim()))
}

impl TryFrom<&str> for BooleanNetwork {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        BooleanNetwork::try_from_source(value)
    }
}

/// Rules separated by ` <- `.
impl Display for BooleanNetwork {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.source(" <- "))
    }
}
