use crate::dynamics::{DynamicsGraph, ElementaryUpdateMode, UpdateMode};
use crate::{BooleanNetwork, Error, State};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Update modes which can be selected by name.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum UpdateModeKind {
    /// `asynchronous` or `fully-asynchronous`
    FullyAsynchronous,
    /// `general`
    GeneralAsynchronous,
    /// `synchronous` or `parallel`
    Synchronous,
}

impl FromStr for UpdateModeKind {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "asynchronous" | "fully-asynchronous" => Ok(UpdateModeKind::FullyAsynchronous),
            "general" => Ok(UpdateModeKind::GeneralAsynchronous),
            "synchronous" | "parallel" => Ok(UpdateModeKind::Synchronous),
            _ => Err(Error::UnknownUpdateMode(value.to_string())),
        }
    }
}

impl Display for UpdateModeKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            UpdateModeKind::FullyAsynchronous => write!(f, "fully-asynchronous"),
            UpdateModeKind::GeneralAsynchronous => write!(f, "general"),
            UpdateModeKind::Synchronous => write!(f, "synchronous"),
        }
    }
}

impl UpdateModeKind {
    /// Create the update mode of this kind for the given network.
    pub fn mk_update_mode(&self, network: &BooleanNetwork) -> Result<ElementaryUpdateMode, Error> {
        match self {
            UpdateModeKind::FullyAsynchronous => ElementaryUpdateMode::fully_asynchronous(network),
            UpdateModeKind::GeneralAsynchronous => {
                ElementaryUpdateMode::general_asynchronous(network)
            }
            UpdateModeKind::Synchronous => ElementaryUpdateMode::synchronous(network),
        }
    }
}

impl BooleanNetwork {
    /// Compute the dynamics graph of this network under the named update mode.
    ///
    /// With `initial`, only the states reachable from it are explored. The `loops` flag
    /// overrides the default of the mode.
    pub fn dynamics(
        &self,
        update_mode: &str,
        initial: Option<&State>,
        loops: Option<bool>,
    ) -> Result<DynamicsGraph, Error> {
        let kind = UpdateModeKind::from_str(update_mode)?;
        let mut mode = kind.mk_update_mode(self)?;
        if let Some(loops) = loops {
            mode = mode.with_loops(loops);
        }
        match initial {
            Some(initial) => mode.builder().partial(initial),
            None => mode.builder().full(),
        }
    }
}
