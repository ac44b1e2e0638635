use ndarray::Array2;
use num_complex::Complex64;

use quasim::quantum::gate::constants::{FRAC_1_SQRT_2, I, ONE, ZERO};
use quasim::quantum::gate::{identity, GateSymbol, MultiQubitGate, StandardGate};
use quasim::quantum::gate_operations::{chain, kron, spread, tensor_all};
use quasim::Error;

/// Helper function for comparing matrices with tolerance
fn matrix_approx_eq(a: &Array2<Complex64>, b: &Array2<Complex64>, epsilon: f64) -> bool {
    a.dim() == b.dim() && a.iter().zip(b.iter()).all(|(x, y)| (x - y).norm() < epsilon)
}

fn is_unitary(m: &Array2<Complex64>) -> bool {
    let adjoint = m.t().mapv(|c| c.conj());
    matrix_approx_eq(&adjoint.dot(m), &identity(m.nrows()), 1e-10)
}

/// Column `input` of a permutation matrix has its single 1 at the returned row
fn image_of(m: &Array2<Complex64>, input: usize) -> usize {
    (0..m.nrows())
        .find(|&row| m[[row, input]] == ONE)
        .unwrap_or_else(|| panic!("column {} is not a basis vector", input))
}

#[test]
fn test_catalog_gates_are_unitary() {
    let gates = [
        StandardGate::I(0),
        StandardGate::I(1),
        StandardGate::I(3),
        StandardGate::X,
        StandardGate::Y,
        StandardGate::Z,
        StandardGate::H,
        StandardGate::S,
        StandardGate::T,
        StandardGate::CNotControlAbove,
        StandardGate::CNotControlBelow,
        StandardGate::Swap,
        StandardGate::Toffoli,
        StandardGate::Fredkin,
    ];

    for gate in gates {
        let m = gate.matrix();
        assert_eq!(m.nrows(), 1 << gate.qubit_count(), "{}", gate.name());
        assert!(is_unitary(&m), "{} is not unitary", gate.name());
    }
}

#[test]
fn test_single_qubit_entries() {
    let h = StandardGate::H.matrix();
    assert!((h[[1, 1]].re + FRAC_1_SQRT_2).abs() < 1e-12);

    let y = StandardGate::Y.matrix();
    assert_eq!(y[[0, 1]], -I);
    assert_eq!(y[[1, 0]], I);

    let t = StandardGate::T.matrix();
    assert!((t[[1, 1]] - Complex64::new(FRAC_1_SQRT_2, FRAC_1_SQRT_2)).norm() < 1e-12);
    assert_eq!(t[[0, 1]], ZERO);
}

#[test]
fn test_cnot_orientations() {
    let above = StandardGate::CNotControlAbove.matrix();
    // |10⟩ → |11⟩, |01⟩ unchanged
    assert_eq!(image_of(&above, 0b10), 0b11);
    assert_eq!(image_of(&above, 0b01), 0b01);

    let below = StandardGate::CNotControlBelow.matrix();
    // |01⟩ → |11⟩, |10⟩ unchanged
    assert_eq!(image_of(&below, 0b01), 0b11);
    assert_eq!(image_of(&below, 0b10), 0b10);
}

#[test]
fn test_three_qubit_permutations() {
    let toffoli = StandardGate::Toffoli.matrix();
    for input in 0..8 {
        let expected = if input >> 1 == 0b11 { input ^ 1 } else { input };
        assert_eq!(image_of(&toffoli, input), expected);
    }

    let fredkin = StandardGate::Fredkin.matrix();
    assert_eq!(image_of(&fredkin, 0b101), 0b110);
    assert_eq!(image_of(&fredkin, 0b110), 0b101);
    assert_eq!(image_of(&fredkin, 0b001), 0b001);
    assert_eq!(image_of(&fredkin, 0b111), 0b111);
}

#[test]
fn test_labels_round_trip_through_from_str() {
    for symbol in GateSymbol::ALL {
        let parsed: GateSymbol = symbol.label().parse().unwrap();
        assert_eq!(parsed, symbol);
    }

    let err = "Phase Gate".parse::<GateSymbol>().unwrap_err();
    assert_eq!(err, Error::UnknownGate { label: "Phase Gate".to_string() });
}

#[test]
fn test_symbol_families() {
    assert_eq!(GateSymbol::Control.family(), Some(MultiQubitGate::CNot));
    assert_eq!(GateSymbol::Fredkin2.family(), Some(MultiQubitGate::Fredkin));
    assert_eq!(
        GateSymbol::DeutschOracleControl.family(),
        Some(MultiQubitGate::DeutschOracle)
    );
    assert_eq!(GateSymbol::Toffoli2.arity(), 3);
    assert_eq!(GateSymbol::Swap.arity(), 2);
    assert_eq!(GateSymbol::T.arity(), 1);
    assert!(GateSymbol::Measurement.is_single_qubit());
    assert!(GateSymbol::Identity.single_qubit_matrix().is_some());
    assert!(GateSymbol::Toffoli1.single_qubit_matrix().is_none());
}

#[test]
fn test_kron_is_msb_first() {
    // X on lane 0 of two lanes flips the most significant bit
    let x_i = kron(&StandardGate::X.matrix(), &identity(2));
    assert_eq!(image_of(&x_i, 0b00), 0b10);

    let folded = tensor_all(&[StandardGate::X.matrix(), identity(2)]);
    assert!(matrix_approx_eq(&folded, &x_i, 1e-12));
}

#[test]
fn test_spread_matches_orientation_gates() {
    let cnot = StandardGate::CNotControlAbove.matrix();
    let reversed = spread(&cnot, &[1, 0], 2);
    assert!(matrix_approx_eq(&reversed, &StandardGate::CNotControlBelow.matrix(), 1e-12));

    // CNOT from lane 0 onto lane 2, lane 1 untouched
    let wide = spread(&cnot, &[0, 2], 3);
    assert_eq!(image_of(&wide, 0b100), 0b101);
    assert_eq!(image_of(&wide, 0b110), 0b111);
    assert_eq!(image_of(&wide, 0b010), 0b010);
}

#[test]
fn test_chain_applies_first_operator_first() {
    let h = StandardGate::H.matrix();
    let s = StandardGate::S.matrix();
    let chained = chain(&[h.clone(), s.clone()], 2);
    assert!(matrix_approx_eq(&chained, &s.dot(&h), 1e-12));
    assert!(!matrix_approx_eq(&chained, &h.dot(&s), 1e-12));
}
