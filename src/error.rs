use thiserror::Error;

/// Errors reported by the operations of this crate.
///
/// Errors are always propagated to the caller unchanged. The only exception is constant
/// propagation, which is a bounded fixed-point computation and cannot fail.
#[derive(Debug, Error)]
pub enum Error {
    /// A malformed source line or formula.
    #[error("syntax error: {0}")]
    Parse(String),

    /// A node cannot be renamed because the new name is already taken.
    #[error("node `{0}` already exists")]
    NodeExists(String),

    /// An operation refers to a node which the network does not define.
    #[error("unknown node `{0}`")]
    UnknownNode(String),

    /// A state does not assign a level to every node of the network.
    #[error("state has no value for node `{0}`")]
    IncompleteState(String),

    /// An unsupported key or value in a substitution, or an invalid level in a state.
    #[error("type mismatch: {0}")]
    TypeMismatch(String),

    /// The update function of a node did not reduce to a constant during evaluation.
    #[error("update function of `{0}` is not fully instantiated")]
    Uninstantiated(String),

    /// A dynamics was requested for an update mode with an unrecognized name.
    #[error("unknown update mode `{0}`")]
    UnknownUpdateMode(String),

    /// The operation only supports Boolean networks.
    #[error("unsupported network: {0}")]
    UnsupportedNetwork(String),

    /// The block sequence of a periodic update mode is not valid.
    #[error("invalid update sequence: {0}")]
    InvalidUpdateSequence(String),

    /// The state space of the network cannot be enumerated.
    #[error("cannot enumerate 2^{0} states")]
    StateSpaceTooLarge(usize),

    /// There is no formatter registered under the given name.
    #[error("unknown formatter `{0}`")]
    UnknownFormatter(String),

    /// Formatters were used before their context was initialized.
    #[error("formatter context is not initialized")]
    FormattersNotInitialized,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// **(internal)** Attach a (1-based) source line number to a parse error.
    pub(crate) fn at_line(self, line: usize) -> Error {
        match self {
            Error::Parse(message) => Error::Parse(format!("line {}: {}", line, message)),
            other => other,
        }
    }
}
