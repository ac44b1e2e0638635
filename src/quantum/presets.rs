// src/quantum/presets.rs
//! Ready-made algorithm circuits

use crate::error::Result;
use super::circuit::{Circuit, CircuitBuilder};

/// Deutsch's algorithm on two qubits.
///
/// ```text
/// q0: ----H---*---H---M
/// q1: X---H---f---H---M
/// ```
///
/// The oracle is drawn at simulation time. Lane 0 ends in |0⟩ when the
/// oracle is constant and in |1⟩ when it is balanced.
pub fn deutsch() -> Result<Circuit> {
    let mut builder = CircuitBuilder::new(2);
    builder
        .x(1, 0)?
        .h(0, 1)?
        .h(1, 1)?
        .deutsch_oracle(1, 2)?
        .h(0, 3)?
        .h(1, 3)?
        .measure(0, 4)?
        .measure(1, 4)?;
    Ok(builder.build())
}

/// Grover search over two bits for the marked pattern `[x1, x2]`.
///
/// Lanes 0 and 1 hold the search register, lane 2 the oracle ancilla. The
/// oracle is a Toffoli onto the ancilla, with X gates around it on every lane
/// whose marked bit is 0. After one iteration lanes 0 and 1 read the marked
/// pattern with certainty.
pub fn grover(marked: [bool; 2]) -> Result<Circuit> {
    let mut builder = CircuitBuilder::new(3);
    builder.x(2, 0)?.h(0, 1)?.h(1, 1)?.h(2, 1)?;

    for (lane, &bit) in marked.iter().enumerate() {
        if !bit {
            builder.x(lane, 2)?.x(lane, 4)?;
        }
    }
    builder.toffoli(2, 3)?;

    // Diffusion on the search register
    builder
        .h(0, 5)?
        .h(1, 5)?
        .x(0, 6)?
        .x(1, 6)?
        .h(1, 7)?
        .cnot(0, 1, 8)?
        .h(1, 9)?
        .x(0, 10)?
        .x(1, 10)?
        .h(0, 11)?
        .h(1, 11)?;

    Ok(builder.build())
}
