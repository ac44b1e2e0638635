// src/quantum/circuit.rs
//! Circuit grid
//!
//! A circuit is a rectangular table of cells: one row per qubit lane, one
//! column per time step. Multi-qubit gates occupy one cell per lane they
//! act on, all in the same column.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use super::gate::{GateSymbol, EMPTY_LABEL};

/// Number of time steps the circuit editor offers
pub const DEFAULT_WIDTH: usize = 15;

/// One cell of the circuit grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Gate(GateSymbol),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn symbol(&self) -> Option<GateSymbol> {
        match self {
            Cell::Empty => None,
            Cell::Gate(symbol) => Some(*symbol),
        }
    }

    /// Parse a cell label; `"0"` and the empty string are empty cells
    pub fn from_label(label: &str) -> Result<Self> {
        let label = label.trim();
        if label.is_empty() || label == EMPTY_LABEL {
            return Ok(Cell::Empty);
        }
        label.parse().map(Cell::Gate)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Cell::Empty => EMPTY_LABEL,
            Cell::Gate(symbol) => symbol.label(),
        }
    }
}

impl From<GateSymbol> for Cell {
    fn from(symbol: GateSymbol) -> Self {
        Cell::Gate(symbol)
    }
}

/// A quantum circuit laid out as lanes × time steps
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCircuit")]
pub struct Circuit {
    lanes: Vec<Vec<Cell>>,
    width: usize,
}

/// Unchecked wire form of a [`Circuit`]
#[derive(Deserialize)]
struct RawCircuit {
    lanes: Vec<Vec<Cell>>,
    width: usize,
}

impl TryFrom<RawCircuit> for Circuit {
    type Error = Error;

    fn try_from(raw: RawCircuit) -> Result<Self> {
        let declared = raw.width;
        let mut circuit = Circuit::from_cells(raw.lanes)?;
        if circuit.lanes.is_empty() {
            circuit.width = declared;
        } else if circuit.width != declared {
            return Err(Error::placement(
                0,
                circuit.width,
                format!("lanes have {} steps, but width is {}", circuit.width, declared),
            ));
        }
        Ok(circuit)
    }
}

impl Circuit {
    /// Create an empty circuit
    pub fn new(qubit_count: usize, width: usize) -> Self {
        Circuit {
            lanes: vec![vec![Cell::Empty; width]; qubit_count],
            width,
        }
    }

    /// Create an empty circuit with the editor's default width
    pub fn with_default_width(qubit_count: usize) -> Self {
        Self::new(qubit_count, DEFAULT_WIDTH)
    }

    /// Build a circuit from rows of cell labels, as produced by the editor
    pub fn from_labels<S: AsRef<str>>(rows: &[Vec<S>]) -> Result<Self> {
        let width = rows.first().map(|row| row.len()).unwrap_or(0);
        let mut lanes = Vec::with_capacity(rows.len());

        for (lane, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(Error::placement(
                    lane,
                    row.len(),
                    format!("lane has {} steps, expected {}", row.len(), width),
                ));
            }
            let cells = row
                .iter()
                .map(|label| Cell::from_label(label.as_ref()))
                .collect::<Result<Vec<_>>>()?;
            lanes.push(cells);
        }

        Ok(Circuit { lanes, width })
    }

    /// Build a circuit from rows of cells
    pub fn from_cells(lanes: Vec<Vec<Cell>>) -> Result<Self> {
        let width = lanes.first().map(|row| row.len()).unwrap_or(0);
        if let Some((lane, row)) = lanes.iter().enumerate().find(|(_, row)| row.len() != width) {
            return Err(Error::placement(
                lane,
                row.len(),
                format!("lane has {} steps, expected {}", row.len(), width),
            ));
        }
        Ok(Circuit { lanes, width })
    }

    /// The grid as rows of labels
    pub fn to_labels(&self) -> Vec<Vec<String>> {
        self.lanes
            .iter()
            .map(|row| row.iter().map(|cell| cell.label().to_string()).collect())
            .collect()
    }

    /// Number of lanes (qubits)
    pub fn qubit_count(&self) -> usize {
        self.lanes.len()
    }

    /// Number of time steps
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn get(&self, lane: usize, step: usize) -> Option<Cell> {
        self.lanes.get(lane).and_then(|row| row.get(step)).copied()
    }

    /// The cells of one lane in time order
    pub fn lane(&self, lane: usize) -> Option<&[Cell]> {
        self.lanes.get(lane).map(|row| row.as_slice())
    }

    /// The cells of one time step in lane order
    pub fn column(&self, step: usize) -> Option<Vec<Cell>> {
        if step >= self.width {
            return None;
        }
        Some(self.lanes.iter().map(|row| row[step]).collect())
    }

    pub fn lanes(&self) -> &[Vec<Cell>] {
        &self.lanes
    }

    /// Whether no cell holds a gate
    pub fn is_empty(&self) -> bool {
        self.lanes.iter().flatten().all(Cell::is_empty)
    }

    /// Put a symbol into a free cell
    pub fn place(&mut self, lane: usize, step: usize, symbol: GateSymbol) -> Result<()> {
        self.check_position(lane, step)?;
        if let Cell::Gate(existing) = self.lanes[lane][step] {
            return Err(Error::placement(
                lane,
                step,
                format!("cell already holds '{}'", existing),
            ));
        }
        self.lanes[lane][step] = Cell::Gate(symbol);
        Ok(())
    }

    /// Empty a single cell, returning what it held
    pub fn clear_cell(&mut self, lane: usize, step: usize) -> Result<Cell> {
        self.check_position(lane, step)?;
        Ok(std::mem::take(&mut self.lanes[lane][step]))
    }

    /// Remove the gate at a cell together with the fragments that belong to it.
    ///
    /// Fixed-offset gates lose all their role cells; for CNOT and SWAP the
    /// partner is found by pairing the step's fragments in lane order.
    pub fn remove_gate(&mut self, lane: usize, step: usize) -> Result<Cell> {
        self.check_position(lane, step)?;
        let partner = self.paired_lane(lane, step);
        let removed = self.clear_cell(lane, step)?;
        let Cell::Gate(symbol) = removed else {
            return Ok(removed);
        };

        let offsets: &[isize] = match symbol {
            GateSymbol::Toffoli => &[-2, -1],
            GateSymbol::Toffoli1 => &[1, 2],
            GateSymbol::Toffoli2 => &[-1, 1],
            GateSymbol::Fredkin => &[1, 2],
            GateSymbol::Fredkin1 => &[-1, 1],
            GateSymbol::Fredkin2 => &[-2, -1],
            GateSymbol::DeutschOracle => &[-1],
            GateSymbol::DeutschOracleControl => &[1],
            _ => &[],
        };
        for offset in offsets {
            let other = lane as isize + offset;
            if other >= 0 && (other as usize) < self.qubit_count() {
                let other = other as usize;
                if self.lanes[other][step].symbol().and_then(|s| s.family()) == symbol.family() {
                    self.lanes[other][step] = Cell::Empty;
                }
            }
        }

        if let Some(other) = partner {
            self.lanes[other][step] = Cell::Empty;
        }

        Ok(removed)
    }

    /// Lane of the CNOT or SWAP fragment paired with the one at `lane`.
    ///
    /// Fragments pair in lane order, the same way the simulator reads a step.
    fn paired_lane(&self, lane: usize, step: usize) -> Option<usize> {
        let mut open_cnot: Option<(usize, GateSymbol)> = None;
        let mut open_swap: Option<usize> = None;

        for (other, row) in self.lanes.iter().enumerate() {
            let pair = match row[step] {
                Cell::Gate(symbol @ (GateSymbol::Control | GateSymbol::CNot)) => {
                    match open_cnot.take() {
                        Some((first, first_symbol)) if first_symbol != symbol => Some((first, other)),
                        _ => {
                            open_cnot = Some((other, symbol));
                            None
                        }
                    }
                }
                Cell::Gate(GateSymbol::Swap) => match open_swap.take() {
                    Some(first) => Some((first, other)),
                    None => {
                        open_swap = Some(other);
                        None
                    }
                },
                _ => None,
            };

            match pair {
                Some((first, second)) if first == lane => return Some(second),
                Some((first, second)) if second == lane => return Some(first),
                _ => {}
            }
        }
        None
    }

    /// Trim unused trailing steps and pad every gap with `Identity`.
    ///
    /// The result has `last_occupied_step + 1` columns (one column for a
    /// circuit with no gates at all).
    pub fn compact(&self) -> Circuit {
        let last_gate = self
            .lanes
            .iter()
            .filter_map(|row| row.iter().rposition(|cell| !cell.is_empty()))
            .max()
            .unwrap_or(0);
        let width = (last_gate + 1).min(self.width);

        let lanes = self
            .lanes
            .iter()
            .map(|row| {
                row.iter()
                    .take(width)
                    .map(|cell| match cell {
                        Cell::Empty => Cell::Gate(GateSymbol::Identity),
                        gate => *gate,
                    })
                    .collect()
            })
            .collect();

        Circuit { lanes, width }
    }

    fn check_position(&self, lane: usize, step: usize) -> Result<()> {
        if lane >= self.qubit_count() {
            return Err(Error::placement(
                lane,
                step,
                format!("lane out of range for {} qubits", self.qubit_count()),
            ));
        }
        if step >= self.width {
            return Err(Error::placement(
                lane,
                step,
                format!("step out of range for width {}", self.width),
            ));
        }
        Ok(())
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (lane, row) in self.lanes.iter().enumerate() {
            write!(f, "q{}:", lane)?;
            for cell in row {
                let short = match cell {
                    Cell::Empty => "-",
                    Cell::Gate(symbol) => match symbol {
                        GateSymbol::PauliX => "X",
                        GateSymbol::PauliY => "Y",
                        GateSymbol::PauliZ => "Z",
                        GateSymbol::Hadamard => "H",
                        GateSymbol::S => "S",
                        GateSymbol::T => "T",
                        GateSymbol::Identity => "I",
                        GateSymbol::Measurement => "M",
                        GateSymbol::Control
                        | GateSymbol::Toffoli1
                        | GateSymbol::Toffoli2
                        | GateSymbol::Fredkin
                        | GateSymbol::DeutschOracleControl => "*",
                        GateSymbol::CNot | GateSymbol::Toffoli => "⊕",
                        GateSymbol::Swap | GateSymbol::Fredkin1 | GateSymbol::Fredkin2 => "x",
                        GateSymbol::DeutschOracle => "f",
                    },
                };
                write!(f, "---{}", short)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Places whole logical gates onto a circuit grid
pub struct CircuitBuilder {
    circuit: Circuit,
}

impl CircuitBuilder {
    /// Create a builder over an empty circuit of the default width
    pub fn new(qubit_count: usize) -> Self {
        CircuitBuilder {
            circuit: Circuit::with_default_width(qubit_count),
        }
    }

    /// Create a builder over an empty circuit of the given width
    pub fn with_width(qubit_count: usize, width: usize) -> Self {
        CircuitBuilder {
            circuit: Circuit::new(qubit_count, width),
        }
    }

    /// Build the circuit
    pub fn build(self) -> Circuit {
        self.circuit
    }

    /// Place any single-qubit symbol
    pub fn single(&mut self, symbol: GateSymbol, lane: usize, step: usize) -> Result<&mut Self> {
        if !symbol.is_single_qubit() {
            return Err(Error::placement(
                lane,
                step,
                format!("'{}' is a fragment of a multi-qubit gate", symbol),
            ));
        }
        self.circuit.place(lane, step, symbol)?;
        Ok(self)
    }

    /// Add a Pauli-X gate
    pub fn x(&mut self, lane: usize, step: usize) -> Result<&mut Self> {
        self.single(GateSymbol::PauliX, lane, step)
    }

    /// Add a Pauli-Y gate
    pub fn y(&mut self, lane: usize, step: usize) -> Result<&mut Self> {
        self.single(GateSymbol::PauliY, lane, step)
    }

    /// Add a Pauli-Z gate
    pub fn z(&mut self, lane: usize, step: usize) -> Result<&mut Self> {
        self.single(GateSymbol::PauliZ, lane, step)
    }

    /// Add a Hadamard gate
    pub fn h(&mut self, lane: usize, step: usize) -> Result<&mut Self> {
        self.single(GateSymbol::Hadamard, lane, step)
    }

    /// Add an S gate
    pub fn s(&mut self, lane: usize, step: usize) -> Result<&mut Self> {
        self.single(GateSymbol::S, lane, step)
    }

    /// Add a T gate
    pub fn t(&mut self, lane: usize, step: usize) -> Result<&mut Self> {
        self.single(GateSymbol::T, lane, step)
    }

    /// Add a measurement marker
    pub fn measure(&mut self, lane: usize, step: usize) -> Result<&mut Self> {
        self.single(GateSymbol::Measurement, lane, step)
    }

    /// Add a CNOT; control and target may be any two distinct lanes
    pub fn cnot(&mut self, control: usize, target: usize, step: usize) -> Result<&mut Self> {
        self.place_group(
            step,
            &[(control, GateSymbol::Control), (target, GateSymbol::CNot)],
        )
    }

    /// Add a SWAP between any two distinct lanes
    pub fn swap(&mut self, a: usize, b: usize, step: usize) -> Result<&mut Self> {
        self.place_group(step, &[(a, GateSymbol::Swap), (b, GateSymbol::Swap)])
    }

    /// Add a Toffoli whose controls are the two lanes directly above `target`
    pub fn toffoli(&mut self, target: usize, step: usize) -> Result<&mut Self> {
        if target < 2 {
            return Err(Error::placement(
                target,
                step,
                "a Toffoli target needs two lanes above it",
            ));
        }
        self.place_group(
            step,
            &[
                (target - 2, GateSymbol::Toffoli1),
                (target - 1, GateSymbol::Toffoli2),
                (target, GateSymbol::Toffoli),
            ],
        )
    }

    /// Add a Fredkin whose swapped lanes are the two directly below `control`
    pub fn fredkin(&mut self, control: usize, step: usize) -> Result<&mut Self> {
        if control + 2 >= self.circuit.qubit_count() {
            return Err(Error::placement(
                control,
                step,
                "a Fredkin control needs two lanes below it",
            ));
        }
        self.place_group(
            step,
            &[
                (control, GateSymbol::Fredkin),
                (control + 1, GateSymbol::Fredkin1),
                (control + 2, GateSymbol::Fredkin2),
            ],
        )
    }

    /// Add the Deutsch oracle with its input on the lane directly above `target`
    pub fn deutsch_oracle(&mut self, target: usize, step: usize) -> Result<&mut Self> {
        if target == 0 {
            return Err(Error::placement(
                target,
                step,
                "the oracle target needs an input lane above it",
            ));
        }
        self.place_group(
            step,
            &[
                (target - 1, GateSymbol::DeutschOracleControl),
                (target, GateSymbol::DeutschOracle),
            ],
        )
    }

    /// Check every cell of a multi-qubit gate before writing any of them
    fn place_group(&mut self, step: usize, cells: &[(usize, GateSymbol)]) -> Result<&mut Self> {
        for (i, &(lane, _)) in cells.iter().enumerate() {
            if cells[..i].iter().any(|&(other, _)| other == lane) {
                return Err(Error::placement(lane, step, "a gate cannot use the same lane twice"));
            }
            self.circuit.check_position(lane, step)?;
            if let Cell::Gate(existing) = self.circuit.lanes[lane][step] {
                return Err(Error::placement(
                    lane,
                    step,
                    format!("cell already holds '{}'", existing),
                ));
            }
        }
        for &(lane, symbol) in cells {
            self.circuit.lanes[lane][step] = Cell::Gate(symbol);
        }
        Ok(self)
    }
}
