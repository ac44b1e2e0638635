//! Small-register quantum circuit simulation
//!
//! This crate simulates circuits drawn on a grid of lanes (qubits) and time
//! steps. A whole circuit is folded into one unitary by Kronecker products
//! and applied to |0…0⟩; alternatively each lane can be evaluated as an
//! isolated qubit, either with catalog matrices or with per-gate truth tables.

pub mod config;
pub mod error;
pub mod quantum;
pub mod simulator;
pub mod simulators;

pub use config::{SimulatorConfig, MAX_QUBITS};
pub use error::{Error, Result};
pub use quantum::{Cell, Circuit, CircuitBuilder, GateSymbol, LaneState, StandardGate, StateVector};
pub use simulator::{Engine, Mode, SimulationOutcome, Simulator};
pub use simulators::{ReferenceEngine, SampledResult, SamplingEngine, WholeCircuitResult};

// Create a prelude module for convenient imports
pub mod prelude {
    pub use crate::quantum::prelude::*;
    pub use crate::simulator::{Engine, Mode, SimulationOutcome, Simulator};
    pub use crate::simulators::{LaneEvaluator, WholeCircuitResult};
    pub use crate::{Error, Result, SimulatorConfig};
}

// Version and crate information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const CRATE_NAME: &str = env!("CARGO_PKG_NAME");
