// src/quantum/gate.rs
//! Gate catalog
//!
//! This module defines the closed vocabulary of gate symbols a circuit grid
//! may contain, and the fixed operator matrices those symbols stand for.

use std::fmt;
use std::str::FromStr;

use ndarray::{array, Array1, Array2};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Common complex numbers used in quantum gates
pub mod constants {
    use num_complex::Complex64;

    /// The imaginary unit i
    pub const I: Complex64 = Complex64::new(0.0, 1.0);

    /// 1/sqrt(2)
    pub const FRAC_1_SQRT_2: f64 = std::f64::consts::FRAC_1_SQRT_2;

    /// Complex zero
    pub const ZERO: Complex64 = Complex64::new(0.0, 0.0);

    /// Complex one
    pub const ONE: Complex64 = Complex64::new(1.0, 0.0);
}

/// Label the circuit grid uses for an unoccupied cell
pub const EMPTY_LABEL: &str = "0";

/// A symbol that can occupy one cell of the circuit grid.
///
/// Single-qubit symbols stand on their own. Every other symbol is a fragment
/// of a multi-qubit gate and only makes sense together with its sibling
/// fragments in the same time step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GateSymbol {
    /// Pauli-X gate (NOT gate)
    #[serde(rename = "Pauli-X-Gate")]
    PauliX,
    /// Pauli-Y gate
    #[serde(rename = "Pauli-Y-Gate")]
    PauliY,
    /// Pauli-Z gate
    #[serde(rename = "Pauli-Z-Gate")]
    PauliZ,
    /// Hadamard gate
    #[serde(rename = "Hadamard Gate")]
    Hadamard,
    /// Phase gate
    #[serde(rename = "S Gate")]
    S,
    /// π/8 gate
    #[serde(rename = "T Gate")]
    T,
    /// Identity, also used to pad gaps
    Identity,
    /// Measurement marker, acts as identity on the amplitudes
    Measurement,
    /// Control lane of a CNOT
    Control,
    /// Target lane of a CNOT
    #[serde(rename = "CNot Gate")]
    CNot,
    /// Either lane of a SWAP
    #[serde(rename = "Swap Gate")]
    Swap,
    /// Target of a Toffoli, two lanes below its first control
    #[serde(rename = "Toffoli Gate")]
    Toffoli,
    /// First Toffoli control
    Toffoli1,
    /// Second Toffoli control
    Toffoli2,
    /// Control of a Fredkin, directly above the swapped pair
    #[serde(rename = "Fredkin Gate")]
    Fredkin,
    /// First swapped lane of a Fredkin
    Fredkin1,
    /// Second swapped lane of a Fredkin
    Fredkin2,
    /// Target lane of the Deutsch oracle
    #[serde(rename = "Deutsch Oracle")]
    DeutschOracle,
    /// Input lane of the Deutsch oracle, directly above the target
    #[serde(rename = "Deutsch OracleC")]
    DeutschOracleControl,
}

impl GateSymbol {
    /// Every symbol in the vocabulary
    pub const ALL: [GateSymbol; 19] = [
        GateSymbol::PauliX,
        GateSymbol::PauliY,
        GateSymbol::PauliZ,
        GateSymbol::Hadamard,
        GateSymbol::S,
        GateSymbol::T,
        GateSymbol::Identity,
        GateSymbol::Measurement,
        GateSymbol::Control,
        GateSymbol::CNot,
        GateSymbol::Swap,
        GateSymbol::Toffoli,
        GateSymbol::Toffoli1,
        GateSymbol::Toffoli2,
        GateSymbol::Fredkin,
        GateSymbol::Fredkin1,
        GateSymbol::Fredkin2,
        GateSymbol::DeutschOracle,
        GateSymbol::DeutschOracleControl,
    ];

    /// The label the circuit editor uses for this symbol
    pub fn label(&self) -> &'static str {
        match self {
            GateSymbol::PauliX => "Pauli-X-Gate",
            GateSymbol::PauliY => "Pauli-Y-Gate",
            GateSymbol::PauliZ => "Pauli-Z-Gate",
            GateSymbol::Hadamard => "Hadamard Gate",
            GateSymbol::S => "S Gate",
            GateSymbol::T => "T Gate",
            GateSymbol::Identity => "Identity",
            GateSymbol::Measurement => "Measurement",
            GateSymbol::Control => "Control",
            GateSymbol::CNot => "CNot Gate",
            GateSymbol::Swap => "Swap Gate",
            GateSymbol::Toffoli => "Toffoli Gate",
            GateSymbol::Toffoli1 => "Toffoli1",
            GateSymbol::Toffoli2 => "Toffoli2",
            GateSymbol::Fredkin => "Fredkin Gate",
            GateSymbol::Fredkin1 => "Fredkin1",
            GateSymbol::Fredkin2 => "Fredkin2",
            GateSymbol::DeutschOracle => "Deutsch Oracle",
            GateSymbol::DeutschOracleControl => "Deutsch OracleC",
        }
    }

    /// The catalog gate of a single-qubit symbol, `None` for fragments
    pub fn standard_gate(&self) -> Option<StandardGate> {
        match self {
            GateSymbol::PauliX => Some(StandardGate::X),
            GateSymbol::PauliY => Some(StandardGate::Y),
            GateSymbol::PauliZ => Some(StandardGate::Z),
            GateSymbol::Hadamard => Some(StandardGate::H),
            GateSymbol::S => Some(StandardGate::S),
            GateSymbol::T => Some(StandardGate::T),
            GateSymbol::Identity | GateSymbol::Measurement => Some(StandardGate::I(1)),
            _ => None,
        }
    }

    /// The 2×2 matrix of a single-qubit symbol
    pub fn single_qubit_matrix(&self) -> Option<Array2<Complex64>> {
        self.standard_gate().map(|gate| gate.matrix())
    }

    /// Number of lanes spanned by the gate this symbol belongs to
    pub fn arity(&self) -> usize {
        self.family().map_or(1, |gate| gate.qubit_count())
    }

    /// Whether this symbol acts on its own lane only
    pub fn is_single_qubit(&self) -> bool {
        self.family().is_none()
    }

    /// The multi-qubit gate this fragment belongs to
    pub fn family(&self) -> Option<MultiQubitGate> {
        match self {
            GateSymbol::Control | GateSymbol::CNot => Some(MultiQubitGate::CNot),
            GateSymbol::Swap => Some(MultiQubitGate::Swap),
            GateSymbol::Toffoli | GateSymbol::Toffoli1 | GateSymbol::Toffoli2 => {
                Some(MultiQubitGate::Toffoli)
            }
            GateSymbol::Fredkin | GateSymbol::Fredkin1 | GateSymbol::Fredkin2 => {
                Some(MultiQubitGate::Fredkin)
            }
            GateSymbol::DeutschOracle | GateSymbol::DeutschOracleControl => {
                Some(MultiQubitGate::DeutschOracle)
            }
            GateSymbol::PauliX
            | GateSymbol::PauliY
            | GateSymbol::PauliZ
            | GateSymbol::Hadamard
            | GateSymbol::S
            | GateSymbol::T
            | GateSymbol::Identity
            | GateSymbol::Measurement => None,
        }
    }
}

impl fmt::Display for GateSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for GateSymbol {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GateSymbol::ALL
            .iter()
            .copied()
            .find(|symbol| symbol.label() == s)
            .ok_or_else(|| Error::UnknownGate { label: s.to_string() })
    }
}

/// Logical gates that occupy more than one lane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MultiQubitGate {
    CNot,
    Swap,
    Toffoli,
    Fredkin,
    /// Unknown one-bit function, either constant or balanced
    DeutschOracle,
}

impl MultiQubitGate {
    /// Number of lanes the gate acts on
    pub fn qubit_count(&self) -> usize {
        match self {
            MultiQubitGate::CNot | MultiQubitGate::Swap | MultiQubitGate::DeutschOracle => 2,
            MultiQubitGate::Toffoli | MultiQubitGate::Fredkin => 3,
        }
    }
}

impl fmt::Display for MultiQubitGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MultiQubitGate::CNot => "CNOT",
            MultiQubitGate::Swap => "SWAP",
            MultiQubitGate::Toffoli => "Toffoli",
            MultiQubitGate::Fredkin => "Fredkin",
            MultiQubitGate::DeutschOracle => "Deutsch oracle",
        };
        f.write_str(name)
    }
}

/// Fixed operator matrices known to the simulator
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StandardGate {
    /// Identity gate on the given number of qubits; `I(0)` is the 1×1 identity
    I(usize),

    /// Pauli-X gate (NOT gate)
    X,

    /// Pauli-Y gate
    Y,

    /// Pauli-Z gate
    Z,

    /// Hadamard gate
    H,

    /// Phase gate (S gate)
    S,

    /// π/8 gate (T gate)
    T,

    /// CNOT with the control on the upper lane
    CNotControlAbove,

    /// CNOT with the control on the lower lane
    CNotControlBelow,

    /// SWAP gate
    Swap,

    /// Toffoli gate (CCNOT), target on the lowest lane
    Toffoli,

    /// Fredkin gate (CSWAP), control on the highest lane
    Fredkin,
}

impl StandardGate {
    /// Returns the number of qubits this gate acts on
    pub fn qubit_count(&self) -> usize {
        match self {
            StandardGate::I(n) => *n,
            StandardGate::X | StandardGate::Y | StandardGate::Z |
            StandardGate::H | StandardGate::S | StandardGate::T => 1,
            StandardGate::CNotControlAbove | StandardGate::CNotControlBelow |
            StandardGate::Swap => 2,
            StandardGate::Toffoli | StandardGate::Fredkin => 3,
        }
    }

    /// Returns the matrix representation of this gate
    pub fn matrix(&self) -> Array2<Complex64> {
        use constants::*;
        match self {
            StandardGate::I(n) => identity(1 << n),
            StandardGate::X => {
                array![
                    [ZERO, ONE],
                    [ONE, ZERO]
                ]
            },
            StandardGate::Y => {
                array![
                    [ZERO, -I],
                    [I, ZERO]
                ]
            },
            StandardGate::Z => {
                array![
                    [ONE, ZERO],
                    [ZERO, -ONE]
                ]
            },
            StandardGate::H => {
                let factor = Complex64::new(FRAC_1_SQRT_2, 0.0);
                array![
                    [factor, factor],
                    [factor, -factor]
                ]
            },
            StandardGate::S => {
                array![
                    [ONE, ZERO],
                    [ZERO, I]
                ]
            },
            StandardGate::T => {
                array![
                    [ONE, ZERO],
                    [ZERO, Complex64::new(FRAC_1_SQRT_2, FRAC_1_SQRT_2)]
                ]
            },
            // Flip the low bit when the high bit is set
            StandardGate::CNotControlAbove => permutation(4, |i| if i & 0b10 != 0 { i ^ 0b01 } else { i }),
            // Flip the high bit when the low bit is set
            StandardGate::CNotControlBelow => permutation(4, |i| if i & 0b01 != 0 { i ^ 0b10 } else { i }),
            StandardGate::Swap => permutation(4, |i| ((i & 0b01) << 1) | ((i & 0b10) >> 1)),
            StandardGate::Toffoli => permutation(8, |i| if i & 0b110 == 0b110 { i ^ 0b001 } else { i }),
            StandardGate::Fredkin => permutation(8, |i| {
                if i & 0b100 != 0 {
                    0b100 | ((i & 0b001) << 1) | ((i & 0b010) >> 1)
                } else {
                    i
                }
            }),
        }
    }

    /// Returns a display name for this gate
    pub fn name(&self) -> String {
        match self {
            StandardGate::I(n) => format!("I({})", n),
            StandardGate::X => "X".to_string(),
            StandardGate::Y => "Y".to_string(),
            StandardGate::Z => "Z".to_string(),
            StandardGate::H => "H".to_string(),
            StandardGate::S => "S".to_string(),
            StandardGate::T => "T".to_string(),
            StandardGate::CNotControlAbove => "CNOT(c↓)".to_string(),
            StandardGate::CNotControlBelow => "CNOT(c↑)".to_string(),
            StandardGate::Swap => "SWAP".to_string(),
            StandardGate::Toffoli => "Toffoli".to_string(),
            StandardGate::Fredkin => "Fredkin".to_string(),
        }
    }
}

/// Identity matrix of the given dimension
pub fn identity(dim: usize) -> Array2<Complex64> {
    Array2::from_diag(&Array1::from_elem(dim, constants::ONE))
}

/// Permutation matrix sending basis state `i` to `map(i)`
fn permutation(dim: usize, map: impl Fn(usize) -> usize) -> Array2<Complex64> {
    let mut matrix = Array2::zeros((dim, dim));
    for i in 0..dim {
        matrix[[map(i), i]] = constants::ONE;
    }
    matrix
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_unitary(m: &Array2<Complex64>) -> bool {
        let adjoint = m.t().mapv(|z| z.conj());
        let product = adjoint.dot(m);
        let id = identity(m.nrows());
        product
            .iter()
            .zip(id.iter())
            .all(|(a, b)| (a - b).norm() < 1e-10)
    }

    #[test]
    fn test_labels_round_trip_through_from_str() {
        for symbol in GateSymbol::ALL {
            assert_eq!(symbol.label().parse::<GateSymbol>().unwrap(), symbol);
        }
        assert!(matches!(
            "Rx Gate".parse::<GateSymbol>(),
            Err(Error::UnknownGate { .. })
        ));
    }

    #[test]
    fn test_catalog_matrices_are_unitary() {
        let gates = [
            StandardGate::X, StandardGate::Y, StandardGate::Z, StandardGate::H,
            StandardGate::S, StandardGate::T, StandardGate::CNotControlAbove,
            StandardGate::CNotControlBelow, StandardGate::Swap,
            StandardGate::Toffoli, StandardGate::Fredkin,
        ];
        for gate in gates {
            let m = gate.matrix();
            assert_eq!(m.nrows(), 1 << gate.qubit_count(), "{}", gate.name());
            assert!(is_unitary(&m), "{} is not unitary", gate.name());
        }
    }

    #[test]
    fn test_identity_sizes() {
        assert_eq!(StandardGate::I(0).matrix().dim(), (1, 1));
        assert_eq!(StandardGate::I(1).matrix().dim(), (2, 2));
        assert_eq!(StandardGate::I(2).matrix().dim(), (4, 4));
    }

    #[test]
    fn test_cnot_orientations_match_reference_tables() {
        let above = StandardGate::CNotControlAbove.matrix();
        // |10⟩ -> |11⟩
        assert_eq!(above[[3, 2]], constants::ONE);
        assert_eq!(above[[2, 3]], constants::ONE);

        let below = StandardGate::CNotControlBelow.matrix();
        // |01⟩ -> |11⟩
        assert_eq!(below[[3, 1]], constants::ONE);
        assert_eq!(below[[1, 3]], constants::ONE);
        assert_eq!(below[[2, 2]], constants::ONE);
    }

    #[test]
    fn test_fragments_report_their_family() {
        assert_eq!(GateSymbol::Toffoli1.family(), Some(MultiQubitGate::Toffoli));
        assert_eq!(GateSymbol::Control.family(), Some(MultiQubitGate::CNot));
        assert!(GateSymbol::Measurement.is_single_qubit());
        assert!(GateSymbol::Swap.single_qubit_matrix().is_none());
    }
}
