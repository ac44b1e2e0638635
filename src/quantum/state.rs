// src/quantum/state.rs
//! Quantum state representations
//!
//! `StateVector` is the joint state of the whole register, `LaneState` the
//! state of one qubit evaluated in isolation.

use std::fmt;

use ndarray::{Array1, Array2};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use super::gate::constants::{ONE, ZERO};

/// Ket label `|b1…bn⟩` for a basis index, lane 0 first
pub fn ket_label(index: usize, qubit_count: usize) -> String {
    format!("|{:0width$b}⟩", index, width = qubit_count)
}

/// State vector representation of a joint register state
#[derive(Clone, Debug, PartialEq)]
pub struct StateVector {
    /// Number of qubits
    qubit_count: usize,

    /// The state vector as an array of complex amplitudes
    amplitudes: Array1<Complex64>,
}

impl StateVector {
    /// Create a new state vector in the computational basis state |index⟩
    pub fn computational_basis(qubit_count: usize, index: usize) -> Result<Self> {
        let dim = 1 << qubit_count;

        if index >= dim {
            return Err(Error::InvalidConfig(format!(
                "Index {} is out of range for {}-qubit state",
                index, qubit_count
            )));
        }

        let mut amplitudes = Array1::zeros(dim);
        amplitudes[index] = ONE;

        Ok(StateVector {
            qubit_count,
            amplitudes,
        })
    }

    /// Create the zero state |00...0⟩
    pub fn zero_state(qubit_count: usize) -> Self {
        let mut amplitudes = Array1::zeros(1 << qubit_count);
        amplitudes[0] = ONE;
        StateVector {
            qubit_count,
            amplitudes,
        }
    }

    /// Returns the number of qubits in this state
    pub fn qubit_count(&self) -> usize {
        self.qubit_count
    }

    /// Returns the dimension of the Hilbert space (2^n for n qubits)
    pub fn dimension(&self) -> usize {
        self.amplitudes.len()
    }

    /// Get a reference to the amplitudes
    pub fn amplitudes(&self) -> &Array1<Complex64> {
        &self.amplitudes
    }

    /// Calculate the probability of measuring the given basis index
    pub fn probability(&self, index: usize) -> f64 {
        self.amplitudes
            .get(index)
            .map(|amplitude| amplitude.norm_sqr())
            .unwrap_or(0.0)
    }

    /// Probabilities of every basis state, in ascending index order
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(|a| a.norm_sqr()).collect()
    }

    /// Apply an operator to this state, returning the transformed state
    pub fn apply_matrix(&self, matrix: &Array2<Complex64>) -> Result<Self> {
        let dim = self.dimension();

        if matrix.dim() != (dim, dim) {
            return Err(Error::ArityMismatch {
                step: 0,
                expected: dim,
                actual: matrix.nrows(),
            });
        }

        Ok(StateVector {
            qubit_count: self.qubit_count,
            amplitudes: matrix.dot(&self.amplitudes),
        })
    }

    /// Check that the state is normalized
    pub fn is_normalized(&self) -> bool {
        let norm_sqr: f64 = self.amplitudes.iter().map(|amp| amp.norm_sqr()).sum();
        (norm_sqr - 1.0).abs() < 1e-10
    }
}

impl fmt::Display for StateVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (index, amplitude) in self.amplitudes.iter().enumerate() {
            if amplitude.norm_sqr() < 1e-12 {
                continue;
            }
            if !first {
                write!(f, " + ")?;
            }
            write!(f, "({:.4}){}", amplitude, ket_label(index, self.qubit_count))?;
            first = false;
        }
        if first {
            write!(f, "0")?;
        }
        Ok(())
    }
}

/// State of a single qubit evaluated without its neighbours: α|0⟩ + β|1⟩
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LaneState {
    pub alpha: Complex64,
    pub beta: Complex64,
}

impl LaneState {
    pub fn new(alpha: Complex64, beta: Complex64) -> Self {
        LaneState { alpha, beta }
    }

    /// The |0⟩ state
    pub fn zero() -> Self {
        LaneState::new(ONE, ZERO)
    }

    /// The |1⟩ state
    pub fn one() -> Self {
        LaneState::new(ZERO, ONE)
    }

    /// Probabilities of reading 0 and 1
    pub fn probabilities(&self) -> [f64; 2] {
        [self.alpha.norm_sqr(), self.beta.norm_sqr()]
    }

    pub fn to_array(&self) -> Array1<Complex64> {
        Array1::from(vec![self.alpha, self.beta])
    }

    pub fn from_array(amplitudes: &Array1<Complex64>) -> Self {
        LaneState::new(amplitudes[0], amplitudes[1])
    }

    /// Component-wise comparison with a tolerance
    pub fn approx_eq(&self, other: &LaneState, epsilon: f64) -> bool {
        (self.alpha - other.alpha).norm() < epsilon && (self.beta - other.beta).norm() < epsilon
    }
}

impl Default for LaneState {
    fn default() -> Self {
        LaneState::zero()
    }
}

impl fmt::Display for LaneState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.4}, {:.4}]", self.alpha, self.beta)
    }
}
