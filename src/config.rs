//! Simulator configuration

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Largest register the matrix and truth table engines accept
pub const MAX_QUBITS: usize = 7;

/// Configuration for a [`Simulator`](crate::Simulator).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulatorConfig {
    /// Upper bound on the qubit count (at most [`MAX_QUBITS`]).
    pub max_qubits: usize,
    /// Seed for the oracle coin flip and shot sampling. `None` draws from entropy.
    pub seed: Option<u64>,
    /// Number of samples taken by the built-in reference engine.
    pub shots: usize,
    /// Decimal places kept in reported probabilities.
    pub decimals: u32,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            max_qubits: MAX_QUBITS,
            seed: None,
            shots: 50,
            decimals: 2,
        }
    }
}

impl SimulatorConfig {
    /// Config with a fixed seed, for reproducible runs.
    pub fn deterministic(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Default::default()
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.max_qubits == 0 || self.max_qubits > MAX_QUBITS {
            return Err(Error::InvalidConfig(format!(
                "max_qubits must be between 1 and {}, got {}",
                MAX_QUBITS, self.max_qubits
            )));
        }
        if self.shots == 0 {
            return Err(Error::InvalidConfig("shots must be at least 1".to_string()));
        }
        // f64 carries ~15 significant decimal digits
        if self.decimals > 15 {
            return Err(Error::InvalidConfig(format!(
                "decimals must be at most 15, got {}",
                self.decimals
            )));
        }
        Ok(())
    }
}
