//! Quantum circuit simulators
//!
//! This module provides the operator builder, the whole-register state
//! evolver, the single-lane evaluators and the reference engine seam.

pub mod operator;
pub mod statevector;
pub mod lane;
pub mod reference;

pub use operator::{circuit_operator, ColumnLayout, GatePlacement};
pub use statevector::{BasisProbability, StatevectorSimulator, WholeCircuitResult};
pub use lane::{LaneEvaluator, MatrixLaneEvaluator, TruthTableLaneEvaluator};
pub use reference::{ReferenceEngine, SampledResult, SamplingEngine};
