//! Whole-register state evolution
//!
//! The evolver starts from |0…0⟩, applies the circuit operator once and
//! reports one labelled probability per basis state.
use std::fmt;

use ndarray::Array2;
use num_complex::Complex64;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::Result;
use crate::quantum::circuit::Circuit;
use crate::quantum::state::{ket_label, StateVector};
use super::operator::circuit_operator;

/// Round to a fixed number of decimal places
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Probability of one basis state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasisProbability {
    /// Basis index, lane 0 is the most significant bit
    pub index: usize,
    /// Ket label such as `|01⟩`
    pub label: String,
    /// Rounded probability
    pub probability: f64,
}

impl fmt::Display for BasisProbability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Probability of {} :  {}", self.label, self.probability)
    }
}

/// Result of simulating a whole circuit with the matrix engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WholeCircuitResult {
    qubit_count: usize,
    amplitudes: Vec<Complex64>,
    entries: Vec<BasisProbability>,
}

impl WholeCircuitResult {
    pub fn qubit_count(&self) -> usize {
        self.qubit_count
    }

    /// One entry per basis state, in ascending index order
    pub fn entries(&self) -> &[BasisProbability] {
        &self.entries
    }

    /// Final amplitudes, in ascending index order
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Unrounded probabilities, in ascending index order
    pub fn exact_probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(|a| a.norm_sqr()).collect()
    }

    /// Sum of the unrounded probabilities
    pub fn total_probability(&self) -> f64 {
        self.amplitudes.iter().map(|a| a.norm_sqr()).sum()
    }

    /// Rounded probability for a ket label such as `|10⟩`
    pub fn probability_of(&self, label: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|entry| entry.label == label)
            .map(|entry| entry.probability)
    }

    /// Ket label and rounded probability pairs, in ascending index order
    pub fn pairs(&self) -> Vec<(String, f64)> {
        self.entries
            .iter()
            .map(|entry| (entry.label.clone(), entry.probability))
            .collect()
    }
}

impl fmt::Display for WholeCircuitResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            writeln!(f, "{}", entry)?;
        }
        Ok(())
    }
}

/// Evolves the zero state under a circuit operator
#[derive(Debug, Clone)]
pub struct StatevectorSimulator {
    decimals: u32,
}

impl Default for StatevectorSimulator {
    fn default() -> Self {
        StatevectorSimulator { decimals: 2 }
    }
}

impl StatevectorSimulator {
    /// Create an evolver reporting probabilities with the given precision
    pub fn new(decimals: u32) -> Self {
        StatevectorSimulator { decimals }
    }

    /// Apply an operator to |0…0⟩
    pub fn evolve(&self, qubit_count: usize, operator: &Array2<Complex64>) -> Result<StateVector> {
        StateVector::zero_state(qubit_count).apply_matrix(operator)
    }

    /// Turn a final state into labelled, rounded probabilities
    pub fn report(&self, state: &StateVector) -> WholeCircuitResult {
        let qubit_count = state.qubit_count();
        let entries = state
            .amplitudes()
            .iter()
            .enumerate()
            .map(|(index, amplitude)| BasisProbability {
                index,
                label: ket_label(index, qubit_count),
                probability: round_to(amplitude.norm_sqr(), self.decimals),
            })
            .collect();

        if !state.is_normalized() {
            warn!(qubit_count, "final state is not normalized");
        }

        WholeCircuitResult {
            qubit_count,
            amplitudes: state.amplitudes().to_vec(),
            entries,
        }
    }

    /// Simulate a compacted circuit end to end
    pub fn run<R: Rng>(&self, circuit: &Circuit, rng: &mut R) -> Result<WholeCircuitResult> {
        let operator = circuit_operator(circuit, rng)?;
        let state = self.evolve(circuit.qubit_count(), &operator)?;
        debug!(
            qubit_count = circuit.qubit_count(),
            steps = circuit.width(),
            "evolved circuit"
        );
        Ok(self.report(&state))
    }
}
