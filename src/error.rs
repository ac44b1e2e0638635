//! Error types for circuit simulation

use thiserror::Error;

/// Result type for simulation operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or simulating a circuit
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Qubit count outside the range supported by the chosen engine
    #[error("Invalid qubit count {count}: must be between {min} and {max} (inclusive)")]
    InvalidQubitCount { count: usize, min: usize, max: usize },

    /// The circuit grid does not have one lane per qubit
    #[error("Circuit has {actual} lanes, but {expected} qubits were requested")]
    LaneCountMismatch { expected: usize, actual: usize },

    /// A cell label outside the gate vocabulary
    #[error("Unknown gate '{label}'")]
    UnknownGate { label: String },

    /// A multi-qubit symbol found while evaluating lanes in isolation
    #[error("Gate '{symbol}' on lane {lane}, step {step} cannot be simulated on a single lane")]
    UnsupportedInLane { symbol: String, lane: usize, step: usize },

    /// Fragments of a multi-qubit gate that do not form a valid gate
    #[error("Malformed multi-qubit gate at step {step}: {reason}")]
    MalformedPlacement { step: usize, reason: String },

    /// A composed time step whose dimension does not match the register
    #[error("Operator for step {step} has dimension {actual}, expected {expected}")]
    ArityMismatch { step: usize, expected: usize, actual: usize },

    /// Mode and engine that cannot be used together
    #[error("Engine '{engine}' does not support {mode} simulation")]
    UnsupportedCombination { mode: String, engine: String },

    /// A gate that cannot be placed at the requested position
    #[error("Cannot place gate at lane {lane}, step {step}: {reason}")]
    InvalidPlacement { lane: usize, step: usize, reason: String },

    /// Invalid simulator configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    pub(crate) fn malformed(step: usize, reason: impl Into<String>) -> Self {
        Error::MalformedPlacement { step, reason: reason.into() }
    }

    pub(crate) fn placement(lane: usize, step: usize, reason: impl Into<String>) -> Self {
        Error::InvalidPlacement { lane, step, reason: reason.into() }
    }
}
