//! Single-lane evaluation
//!
//! Each lane is treated as an isolated qubit, ignoring any entanglement with
//! its neighbours. Two interchangeable evaluators are provided: one that
//! multiplies catalog matrices, and one that applies per-gate truth tables.

use num_complex::Complex64;

use crate::error::{Error, Result};
use crate::quantum::circuit::Cell;
use crate::quantum::gate::constants::{FRAC_1_SQRT_2, I, ONE, ZERO};
use crate::quantum::gate::GateSymbol;
use crate::quantum::state::LaneState;

/// Evaluates one lane's gate sequence on a lone qubit
pub trait LaneEvaluator {
    /// Apply one gate to the current state
    fn apply(&self, symbol: GateSymbol, state: LaneState) -> Option<LaneState>;

    /// Evaluate a lane starting from `initial`.
    ///
    /// `lane` is the lane index reported in errors. Empty cells are no-ops;
    /// multi-qubit fragments are rejected.
    fn evaluate_from(&self, lane: usize, cells: &[Cell], initial: LaneState) -> Result<LaneState> {
        cells
            .iter()
            .enumerate()
            .try_fold(initial, |state, (step, cell)| match cell {
                Cell::Empty => Ok(state),
                Cell::Gate(symbol) => self.apply(*symbol, state).ok_or_else(|| {
                    Error::UnsupportedInLane {
                        symbol: symbol.to_string(),
                        lane,
                        step,
                    }
                }),
            })
    }

    /// Evaluate a lane starting from |0⟩
    fn evaluate(&self, lane: usize, cells: &[Cell]) -> Result<LaneState> {
        self.evaluate_from(lane, cells, LaneState::zero())
    }
}

/// Multiplies each gate's 2×2 matrix onto the lane state
#[derive(Debug, Clone, Copy, Default)]
pub struct MatrixLaneEvaluator;

impl LaneEvaluator for MatrixLaneEvaluator {
    fn apply(&self, symbol: GateSymbol, state: LaneState) -> Option<LaneState> {
        let matrix = symbol.single_qubit_matrix()?;
        Some(LaneState::from_array(&matrix.dot(&state.to_array())))
    }
}

/// Applies literal truth tables, with shortcuts for the basis states
#[derive(Debug, Clone, Copy, Default)]
pub struct TruthTableLaneEvaluator;

impl TruthTableLaneEvaluator {
    fn is_zero(state: &LaneState) -> bool {
        state.alpha == ONE && state.beta == ZERO
    }

    fn is_one(state: &LaneState) -> bool {
        state.alpha == ZERO && state.beta == ONE
    }

    fn gate_x(state: LaneState) -> LaneState {
        if Self::is_zero(&state) {
            LaneState::one()
        } else if Self::is_one(&state) {
            LaneState::zero()
        } else {
            LaneState::new(state.beta, state.alpha)
        }
    }

    fn gate_y(state: LaneState) -> LaneState {
        if Self::is_zero(&state) {
            LaneState::new(ZERO, I)
        } else if Self::is_one(&state) {
            LaneState::new(-I, ZERO)
        } else {
            LaneState::new(-I * state.beta, I * state.alpha)
        }
    }

    fn gate_z(state: LaneState) -> LaneState {
        if Self::is_zero(&state) {
            state
        } else if Self::is_one(&state) {
            LaneState::new(ZERO, -ONE)
        } else {
            LaneState::new(state.alpha, -state.beta)
        }
    }

    fn gate_h(state: LaneState) -> LaneState {
        let h = Complex64::new(FRAC_1_SQRT_2, 0.0);
        if Self::is_zero(&state) {
            LaneState::new(h, h)
        } else if Self::is_one(&state) {
            LaneState::new(h, -h)
        } else {
            LaneState::new(h * (state.alpha + state.beta), h * (state.alpha - state.beta))
        }
    }

    fn gate_s(state: LaneState) -> LaneState {
        if Self::is_zero(&state) {
            state
        } else if Self::is_one(&state) {
            LaneState::new(ZERO, I)
        } else {
            LaneState::new(state.alpha, I * state.beta)
        }
    }

    fn gate_t(state: LaneState) -> LaneState {
        let phase = Complex64::new(FRAC_1_SQRT_2, FRAC_1_SQRT_2);
        if Self::is_zero(&state) {
            state
        } else if Self::is_one(&state) {
            LaneState::new(ZERO, phase)
        } else {
            LaneState::new(state.alpha, phase * state.beta)
        }
    }
}

impl LaneEvaluator for TruthTableLaneEvaluator {
    fn apply(&self, symbol: GateSymbol, state: LaneState) -> Option<LaneState> {
        match symbol {
            GateSymbol::PauliX => Some(Self::gate_x(state)),
            GateSymbol::PauliY => Some(Self::gate_y(state)),
            GateSymbol::PauliZ => Some(Self::gate_z(state)),
            GateSymbol::Hadamard => Some(Self::gate_h(state)),
            GateSymbol::S => Some(Self::gate_s(state)),
            GateSymbol::T => Some(Self::gate_t(state)),
            GateSymbol::Identity | GateSymbol::Measurement => Some(state),
            GateSymbol::Control
            | GateSymbol::CNot
            | GateSymbol::Swap
            | GateSymbol::Toffoli
            | GateSymbol::Toffoli1
            | GateSymbol::Toffoli2
            | GateSymbol::Fredkin
            | GateSymbol::Fredkin1
            | GateSymbol::Fredkin2
            | GateSymbol::DeutschOracle
            | GateSymbol::DeutschOracleControl => None,
        }
    }
}
