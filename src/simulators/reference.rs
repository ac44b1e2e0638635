//! Reference engines that report sampled measurements
//!
//! A reference engine runs the whole circuit and returns measurement counts
//! instead of exact probabilities. The simulator talks to it through
//! [`ReferenceEngine`], so an external simulator can be plugged in; the
//! built-in [`SamplingEngine`] samples from the matrix engine's final state.

use std::collections::BTreeMap;
use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::quantum::circuit::Circuit;
use crate::quantum::state::{ket_label, StateVector};
use super::operator::circuit_operator;

/// Measurement counts over repeated runs of a circuit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampledResult {
    pub qubit_count: usize,
    pub shots: usize,
    /// Observed basis states keyed by ket label
    pub counts: BTreeMap<String, usize>,
}

impl SampledResult {
    /// Fraction of shots that produced the given ket label
    pub fn frequency(&self, label: &str) -> f64 {
        if self.shots == 0 {
            return 0.0;
        }
        self.counts.get(label).copied().unwrap_or(0) as f64 / self.shots as f64
    }
}

impl fmt::Display for SampledResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (label, count) in &self.counts {
            writeln!(f, "{} : {}/{}", label, count, self.shots)?;
        }
        Ok(())
    }
}

/// A whole-circuit engine that reports measurement samples
pub trait ReferenceEngine {
    /// Name used in logs
    fn name(&self) -> &str;

    /// Run a compacted circuit and sample its measurement outcomes
    fn run(&mut self, circuit: &Circuit) -> Result<SampledResult>;
}

/// Samples measurement outcomes from the matrix engine's final state
#[derive(Debug, Clone)]
pub struct SamplingEngine {
    shots: usize,
    rng: StdRng,
}

impl SamplingEngine {
    /// Create an engine taking `shots` samples per run
    pub fn new(shots: usize, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        SamplingEngine { shots, rng }
    }

    pub fn shots(&self) -> usize {
        self.shots
    }

    /// Draw one basis index from the state's distribution
    fn sample_index(&mut self, probabilities: &[f64], total: f64) -> usize {
        let random_val = self.rng.gen::<f64>() * total;

        let mut cumulative = 0.0;
        for (index, probability) in probabilities.iter().enumerate() {
            cumulative += probability;
            if random_val < cumulative {
                return index;
            }
        }

        // Rounding can leave random_val just above the last cumulative value
        probabilities
            .iter()
            .rposition(|&p| p > 0.0)
            .unwrap_or(0)
    }
}

impl ReferenceEngine for SamplingEngine {
    fn name(&self) -> &str {
        "sampling"
    }

    fn run(&mut self, circuit: &Circuit) -> Result<SampledResult> {
        let qubit_count = circuit.qubit_count();
        let operator = circuit_operator(circuit, &mut self.rng)?;
        let state = StateVector::zero_state(qubit_count).apply_matrix(&operator)?;

        let probabilities = state.probabilities();
        let total: f64 = probabilities.iter().sum();

        let mut counts = BTreeMap::new();
        for _ in 0..self.shots {
            let index = self.sample_index(&probabilities, total);
            *counts.entry(ket_label(index, qubit_count)).or_insert(0) += 1;
        }

        debug!(qubit_count, shots = self.shots, outcomes = counts.len(), "sampled circuit");

        Ok(SampledResult {
            qubit_count,
            shots: self.shots,
            counts,
        })
    }
}
