//! Simulation entry points
//!
//! [`Simulator`] validates the request, compacts the circuit once and
//! dispatches to the selected engine.

use std::collections::BTreeMap;
use std::fmt;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::SimulatorConfig;
use crate::error::{Error, Result};
use crate::quantum::circuit::Circuit;
use crate::quantum::state::LaneState;
use crate::simulators::lane::{LaneEvaluator, MatrixLaneEvaluator, TruthTableLaneEvaluator};
use crate::simulators::reference::{ReferenceEngine, SampledResult, SamplingEngine};
use crate::simulators::statevector::{StatevectorSimulator, WholeCircuitResult};

/// How the circuit is simulated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    /// Evolve the full register
    WholeCircuit,
    /// Evaluate every lane as an isolated qubit
    SingleLane,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::WholeCircuit => write!(f, "whole-circuit"),
            Mode::SingleLane => write!(f, "single-lane"),
        }
    }
}

/// Which engine runs the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Engine {
    /// Catalog matrices and Kronecker products
    Matrix,
    /// The installed [`ReferenceEngine`]
    Reference,
    /// Per-gate truth tables
    TruthTable,
}

impl Engine {
    /// Whether this engine can run in the given mode
    pub fn supports(&self, mode: Mode) -> bool {
        match (self, mode) {
            (Engine::Matrix, _) => true,
            (Engine::Reference, Mode::WholeCircuit) => true,
            (Engine::TruthTable, Mode::SingleLane) => true,
            _ => false,
        }
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Engine::Matrix => write!(f, "matrix"),
            Engine::Reference => write!(f, "reference"),
            Engine::TruthTable => write!(f, "truth table"),
        }
    }
}

/// Result of a simulation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SimulationOutcome {
    /// Labelled basis probabilities from the matrix engine
    Probabilities(WholeCircuitResult),
    /// Measurement counts from the reference engine
    Samples(SampledResult),
    /// Final state of every lane, keyed by lane index
    Lanes(BTreeMap<usize, LaneState>),
}

impl SimulationOutcome {
    pub fn as_probabilities(&self) -> Option<&WholeCircuitResult> {
        match self {
            SimulationOutcome::Probabilities(result) => Some(result),
            _ => None,
        }
    }

    pub fn as_samples(&self) -> Option<&SampledResult> {
        match self {
            SimulationOutcome::Samples(result) => Some(result),
            _ => None,
        }
    }

    pub fn as_lanes(&self) -> Option<&BTreeMap<usize, LaneState>> {
        match self {
            SimulationOutcome::Lanes(lanes) => Some(lanes),
            _ => None,
        }
    }
}

impl fmt::Display for SimulationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationOutcome::Probabilities(result) => write!(f, "{}", result),
            SimulationOutcome::Samples(result) => write!(f, "{}", result),
            SimulationOutcome::Lanes(lanes) => {
                for (lane, state) in lanes {
                    writeln!(f, "q{}: {}", lane, state)?;
                }
                Ok(())
            }
        }
    }
}

/// Circuit simulator
///
/// Owns the random source used for oracle coin flips, so two runs with the
/// same seed see the same oracle draws.
pub struct Simulator {
    config: SimulatorConfig,
    rng: StdRng,
    evolver: StatevectorSimulator,
    reference: Box<dyn ReferenceEngine>,
}

impl Simulator {
    /// Create a simulator from a validated configuration
    pub fn new(config: SimulatorConfig) -> Result<Self> {
        config.validate()?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        // Offset so the sampler does not replay the oracle's draws
        let reference = SamplingEngine::new(config.shots, config.seed.map(|s| s.wrapping_add(1)));

        Ok(Simulator {
            evolver: StatevectorSimulator::new(config.decimals),
            reference: Box::new(reference),
            rng,
            config,
        })
    }

    /// Replace the reference engine
    pub fn with_reference_engine(mut self, engine: Box<dyn ReferenceEngine>) -> Self {
        self.reference = engine;
        self
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Simulate the full register
    ///
    /// The matrix engine reports exact probabilities, the reference engine
    /// reports measurement samples.
    pub fn simulate_whole_circuit(
        &mut self,
        qubit_count: usize,
        circuit: &Circuit,
        engine: Engine,
    ) -> Result<SimulationOutcome> {
        self.check_request(Mode::WholeCircuit, engine, qubit_count, circuit)?;
        let compacted = circuit.compact();

        debug!(qubit_count, %engine, steps = compacted.width(), "simulating whole circuit");

        match engine {
            Engine::Matrix => {
                let result = self.evolver.run(&compacted, &mut self.rng)?;
                Ok(SimulationOutcome::Probabilities(result))
            }
            Engine::Reference => {
                debug!(reference = self.reference.name(), "delegating to reference engine");
                let result = self.reference.run(&compacted)?;
                Ok(SimulationOutcome::Samples(result))
            }
            Engine::TruthTable => Err(unsupported(Mode::WholeCircuit, engine)),
        }
    }

    /// Simulate every lane as an isolated qubit starting from |0⟩
    pub fn simulate_each_lane(
        &mut self,
        qubit_count: usize,
        circuit: &Circuit,
        engine: Engine,
    ) -> Result<BTreeMap<usize, LaneState>> {
        self.check_request(Mode::SingleLane, engine, qubit_count, circuit)?;
        let compacted = circuit.compact();

        debug!(qubit_count, %engine, steps = compacted.width(), "simulating lanes");

        let evaluator: &dyn LaneEvaluator = match engine {
            Engine::Matrix => &MatrixLaneEvaluator,
            Engine::TruthTable => &TruthTableLaneEvaluator,
            Engine::Reference => return Err(unsupported(Mode::SingleLane, engine)),
        };

        compacted
            .lanes()
            .iter()
            .enumerate()
            .map(|(lane, cells)| Ok((lane, evaluator.evaluate(lane, cells)?)))
            .collect()
    }

    /// Simulate in the given mode with the given engine
    pub fn simulate(
        &mut self,
        mode: Mode,
        engine: Engine,
        qubit_count: usize,
        circuit: &Circuit,
    ) -> Result<SimulationOutcome> {
        match mode {
            Mode::WholeCircuit => self.simulate_whole_circuit(qubit_count, circuit, engine),
            Mode::SingleLane => self
                .simulate_each_lane(qubit_count, circuit, engine)
                .map(SimulationOutcome::Lanes),
        }
    }

    fn check_request(
        &self,
        mode: Mode,
        engine: Engine,
        qubit_count: usize,
        circuit: &Circuit,
    ) -> Result<()> {
        if qubit_count == 0 || qubit_count > self.config.max_qubits {
            return Err(Error::InvalidQubitCount {
                count: qubit_count,
                min: 1,
                max: self.config.max_qubits,
            });
        }
        if circuit.qubit_count() != qubit_count {
            return Err(Error::LaneCountMismatch {
                expected: qubit_count,
                actual: circuit.qubit_count(),
            });
        }
        if !engine.supports(mode) {
            return Err(unsupported(mode, engine));
        }
        Ok(())
    }
}

impl Default for Simulator {
    fn default() -> Self {
        let config = SimulatorConfig::default();
        Simulator {
            rng: StdRng::from_entropy(),
            evolver: StatevectorSimulator::new(config.decimals),
            reference: Box::new(SamplingEngine::new(config.shots, None)),
            config,
        }
    }
}

impl fmt::Debug for Simulator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Simulator")
            .field("config", &self.config)
            .field("reference", &self.reference.name())
            .finish()
    }
}

fn unsupported(mode: Mode, engine: Engine) -> Error {
    Error::UnsupportedCombination {
        mode: mode.to_string(),
        engine: engine.to_string(),
    }
}
