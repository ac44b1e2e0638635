// src/quantum/mod.rs
//! Quantum circuit building blocks
//!
//! Gate vocabulary and matrices, the circuit grid, and state types.

pub mod gate;
pub mod gate_operations;
pub mod circuit;
pub mod state;
pub mod presets;

pub use gate::{GateSymbol, MultiQubitGate, StandardGate};
pub use circuit::{Cell, Circuit, CircuitBuilder, DEFAULT_WIDTH};
pub use state::{LaneState, StateVector};

/// Re-export commonly used types
pub mod prelude {
    pub use super::{GateSymbol, MultiQubitGate, StandardGate};
    pub use super::{Cell, Circuit, CircuitBuilder};
    pub use super::{LaneState, StateVector};
}
