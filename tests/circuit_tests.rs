use quasim::quantum::circuit::{Cell, Circuit, CircuitBuilder, DEFAULT_WIDTH};
use quasim::quantum::gate::GateSymbol;
use quasim::simulators::operator::{ColumnLayout, GatePlacement};
use quasim::quantum::gate::MultiQubitGate;
use quasim::Error;

fn labels(rows: &[&[&str]]) -> Vec<Vec<String>> {
    rows.iter()
        .map(|row| row.iter().map(|s| s.to_string()).collect())
        .collect()
}

#[test]
fn test_compact_trims_and_pads() {
    let circuit = Circuit::from_labels(&labels(&[
        &["Hadamard Gate", "0", "0", "0"],
        &["0", "0", "Pauli-X-Gate", "0"],
    ]))
    .unwrap();

    let compacted = circuit.compact();
    assert_eq!(compacted.width(), 3);
    assert_eq!(
        compacted.to_labels(),
        labels(&[
            &["Hadamard Gate", "Identity", "Identity"],
            &["Identity", "Identity", "Pauli-X-Gate"],
        ])
    );
}

#[test]
fn test_compact_empty_circuit_keeps_one_identity_column() {
    let compacted = Circuit::with_default_width(3).compact();
    assert_eq!(compacted.width(), 1);
    for lane in 0..3 {
        assert_eq!(compacted.get(lane, 0), Some(Cell::Gate(GateSymbol::Identity)));
    }
}

#[test]
fn test_compact_is_idempotent() {
    let mut builder = CircuitBuilder::new(3);
    builder.h(0, 0).unwrap().cnot(0, 2, 4).unwrap();
    let once = builder.build().compact();
    assert_eq!(once.compact(), once);
}

#[test]
fn test_unknown_label_is_rejected() {
    let result = Circuit::from_labels(&labels(&[&["Hadamard Gate", "Sqrt-X"]]));
    assert_eq!(result.unwrap_err(), Error::UnknownGate { label: "Sqrt-X".to_string() });
}

#[test]
fn test_builder_defaults_and_display() {
    let mut builder = CircuitBuilder::new(2);
    builder.h(0, 0).unwrap().cnot(0, 1, 1).unwrap();
    let circuit = builder.build();
    assert_eq!(circuit.width(), DEFAULT_WIDTH);
    assert_eq!(circuit.get(0, 1), Some(Cell::Gate(GateSymbol::Control)));
    assert_eq!(circuit.get(1, 1), Some(Cell::Gate(GateSymbol::CNot)));
    assert!(circuit.to_string().contains("⊕"));
}

#[test]
fn test_builder_rejects_bad_positions() {
    let mut builder = CircuitBuilder::new(3);
    assert!(matches!(builder.toffoli(1, 0), Err(Error::InvalidPlacement { .. })));
    assert!(matches!(builder.fredkin(1, 0), Err(Error::InvalidPlacement { .. })));
    assert!(matches!(builder.deutsch_oracle(0, 0), Err(Error::InvalidPlacement { .. })));
    assert!(matches!(builder.cnot(1, 1, 0), Err(Error::InvalidPlacement { .. })));
    assert!(matches!(builder.x(3, 0), Err(Error::InvalidPlacement { .. })));

    builder.h(1, 2).unwrap();
    // Occupied lane aborts the whole gate
    assert!(builder.toffoli(2, 2).is_err());
    let circuit = builder.build();
    assert_eq!(circuit.get(0, 2), Some(Cell::Empty));
    assert_eq!(circuit.get(2, 2), Some(Cell::Empty));
}

#[test]
fn test_remove_gate_clears_all_fragments() {
    let mut builder = CircuitBuilder::new(4);
    builder.fredkin(1, 0).unwrap().swap(0, 3, 1).unwrap();
    let mut circuit = builder.build();

    let removed = circuit.remove_gate(2, 0).unwrap();
    assert_eq!(removed, Cell::Gate(GateSymbol::Fredkin1));
    assert!((0..4).all(|lane| circuit.get(lane, 0) == Some(Cell::Empty)));

    circuit.remove_gate(0, 1).unwrap();
    assert_eq!(circuit.get(3, 1), Some(Cell::Empty));
    assert!(circuit.is_empty());
}

#[test]
fn test_column_layout_pairs_cnot_in_lane_order() {
    let column = [
        Cell::Gate(GateSymbol::CNot),
        Cell::Gate(GateSymbol::Hadamard),
        Cell::Gate(GateSymbol::Control),
    ];
    let layout = ColumnLayout::parse(0, &column).unwrap();
    assert_eq!(
        layout.placements(),
        &[GatePlacement { gate: MultiQubitGate::CNot, lanes: vec![2, 0] }]
    );
    assert_eq!(layout.placements()[0].span(), (0, 2));
}

#[test]
fn test_column_layout_rejects_malformed_gates() {
    let orphan = [Cell::Gate(GateSymbol::Control), Cell::Empty];
    assert!(matches!(
        ColumnLayout::parse(3, &orphan),
        Err(Error::MalformedPlacement { step: 3, .. })
    ));

    let bad_offset = [
        Cell::Gate(GateSymbol::Toffoli1),
        Cell::Gate(GateSymbol::Toffoli),
        Cell::Empty,
    ];
    assert!(matches!(
        ColumnLayout::parse(0, &bad_offset),
        Err(Error::MalformedPlacement { .. })
    ));

    let lone_swap = [Cell::Gate(GateSymbol::Swap), Cell::Gate(GateSymbol::PauliX)];
    assert!(ColumnLayout::parse(0, &lone_swap).is_err());

    // CNOT and SWAP spans cross
    let crossing = [
        Cell::Gate(GateSymbol::Control),
        Cell::Gate(GateSymbol::Swap),
        Cell::Gate(GateSymbol::CNot),
        Cell::Gate(GateSymbol::Swap),
    ];
    assert!(matches!(
        ColumnLayout::parse(1, &crossing),
        Err(Error::MalformedPlacement { step: 1, .. })
    ));
}

#[test]
fn test_labels_round_trip() {
    let mut builder = CircuitBuilder::with_width(1, 2);
    builder.h(0, 0).unwrap();
    let circuit = builder.build();
    assert_eq!(circuit.to_labels(), labels(&[&["Hadamard Gate", "0"]]));
    let rebuilt = Circuit::from_labels(&circuit.to_labels()).unwrap();
    assert_eq!(rebuilt, circuit);
}

#[test]
fn test_remove_gate_keeps_neighbouring_cnot() {
    let mut builder = CircuitBuilder::new(4);
    builder.cnot(0, 1, 0).unwrap().cnot(2, 3, 0).unwrap();
    let mut circuit = builder.build();

    circuit.remove_gate(2, 0).unwrap();
    assert_eq!(circuit.get(0, 0), Some(Cell::Gate(GateSymbol::Control)));
    assert_eq!(circuit.get(1, 0), Some(Cell::Gate(GateSymbol::CNot)));
    assert_eq!(circuit.get(2, 0), Some(Cell::Empty));
    assert_eq!(circuit.get(3, 0), Some(Cell::Empty));

    // Reversed orientation pairs the same way
    let mut builder = CircuitBuilder::new(4);
    builder.cnot(1, 0, 0).unwrap().cnot(3, 2, 0).unwrap();
    let mut circuit = builder.build();
    circuit.remove_gate(1, 0).unwrap();
    assert_eq!(circuit.get(0, 0), Some(Cell::Empty));
    assert_eq!(circuit.get(2, 0), Some(Cell::Gate(GateSymbol::CNot)));
    assert_eq!(circuit.get(3, 0), Some(Cell::Gate(GateSymbol::Control)));
}

#[test]
fn test_remove_gate_keeps_neighbouring_swap() {
    let mut builder = CircuitBuilder::new(4);
    builder.swap(0, 1, 0).unwrap().swap(2, 3, 0).unwrap();
    let mut circuit = builder.build();

    circuit.remove_gate(2, 0).unwrap();
    assert_eq!(circuit.get(0, 0), Some(Cell::Gate(GateSymbol::Swap)));
    assert_eq!(circuit.get(1, 0), Some(Cell::Gate(GateSymbol::Swap)));
    assert_eq!(circuit.get(3, 0), Some(Cell::Empty));

    let remaining = ColumnLayout::parse(0, &circuit.column(0).unwrap()).unwrap();
    assert_eq!(
        remaining.placements(),
        &[GatePlacement { gate: MultiQubitGate::Swap, lanes: vec![0, 1] }]
    );
}

#[test]
fn test_deserialize_round_trip() {
    let mut builder = CircuitBuilder::with_width(2, 3);
    builder.h(0, 0).unwrap().cnot(0, 1, 1).unwrap();
    let circuit = builder.build();

    let json = serde_json::to_string(&circuit).unwrap();
    let rebuilt: Circuit = serde_json::from_str(&json).unwrap();
    assert_eq!(rebuilt, circuit);
}

#[test]
fn test_deserialize_rejects_ragged_grid() {
    let ragged = r#"{"lanes":[[{"Gate":"Pauli-X-Gate"},{"Gate":"Pauli-X-Gate"}],["Empty"]],"width":2}"#;
    assert!(serde_json::from_str::<Circuit>(ragged).is_err());

    let wrong_width = r#"{"lanes":[["Empty","Empty"],["Empty","Empty"]],"width":3}"#;
    assert!(serde_json::from_str::<Circuit>(wrong_width).is_err());
}
