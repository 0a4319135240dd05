use crate::{BooleanNetwork, Error, InfluenceGraph, LogicalModel, MultiValuedNetwork};
use std::fmt::{Display, Formatter};

impl LogicalModel {
    /// The Boolean network of this model, or `Error::UnsupportedNetwork`.
    pub fn as_boolean(&self) -> Result<&BooleanNetwork, Error> {
        match self {
            LogicalModel::Boolean(network) => Ok(network),
            LogicalModel::MultiValued(_) => Err(Error::UnsupportedNetwork(
                "only Boolean networks are supported".to_string(),
            )),
        }
    }

    pub fn as_multi_valued(&self) -> Option<&MultiValuedNetwork> {
        match self {
            LogicalModel::MultiValued(network) => Some(network),
            LogicalModel::Boolean(_) => None,
        }
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self, LogicalModel::Boolean(_))
    }

    pub fn num_nodes(&self) -> usize {
        match self {
            LogicalModel::Boolean(network) => network.num_nodes(),
            LogicalModel::MultiValued(network) => network.num_nodes(),
        }
    }

    /// Textual source of the underlying network, sorted by node name.
    pub fn source(&self, separator: &str) -> String {
        match self {
            LogicalModel::Boolean(network) => network.source(separator),
            LogicalModel::MultiValued(network) => network.source(separator),
        }
    }

    pub fn influence_graph(&self) -> InfluenceGraph {
        match self {
            LogicalModel::Boolean(network) => network.influence_graph(),
            LogicalModel::MultiValued(network) => network.influence_graph(),
        }
    }
}

impl From<BooleanNetwork> for LogicalModel {
    fn from(value: BooleanNetwork) -> Self {
        LogicalModel::Boolean(value)
    }
}

impl From<MultiValuedNetwork> for LogicalModel {
    fn from(value: MultiValuedNetwork) -> Self {
        LogicalModel::MultiValued(value)
    }
}

impl Display for LogicalModel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.source(" <- "))
    }
}
