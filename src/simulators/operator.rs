//! Circuit-wide operator construction
//!
//! Every time step of a compacted circuit becomes one register-wide matrix:
//! the step is first parsed into single-qubit gates and multi-qubit gate
//! placements, each lane then contributes one tensor factor, and the factors
//! are folded together with the Kronecker product. The step matrices are
//! chained so that the first step acts first.

use ndarray::Array2;
use num_complex::Complex64;
use rand::Rng;
use tracing::trace;

use crate::error::{Error, Result};
use crate::quantum::circuit::{Cell, Circuit};
use crate::quantum::gate::{identity, GateSymbol, MultiQubitGate, StandardGate};
use crate::quantum::gate_operations::{chain, spread, tensor_all};

/// A multi-qubit gate located in one step: the gate and its lanes in role order.
///
/// Role order is control before target for CNOT and the oracle, the two
/// controls before the target for Toffoli, the control before the swapped
/// pair for Fredkin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatePlacement {
    pub gate: MultiQubitGate,
    pub lanes: Vec<usize>,
}

impl GatePlacement {
    /// First and last lane the gate touches
    pub fn span(&self) -> (usize, usize) {
        let lo = self.lanes.iter().copied().min().unwrap_or(0);
        let hi = self.lanes.iter().copied().max().unwrap_or(0);
        (lo, hi)
    }
}

/// One time step, split into single-qubit gates and multi-qubit placements
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnLayout {
    step: usize,
    symbols: Vec<GateSymbol>,
    placements: Vec<GatePlacement>,
}

impl ColumnLayout {
    /// Locate and validate every multi-qubit gate in a column.
    ///
    /// CNOT and SWAP fragments pair up in lane order; Toffoli, Fredkin and
    /// oracle fragments must sit at their fixed offsets. Empty cells count
    /// as `Identity`.
    pub fn parse(step: usize, column: &[Cell]) -> Result<Self> {
        let symbols: Vec<GateSymbol> = column
            .iter()
            .map(|cell| cell.symbol().unwrap_or(GateSymbol::Identity))
            .collect();

        let mut placements = Vec::new();
        let mut open_cnot: Option<(usize, GateSymbol)> = None;
        let mut open_swap: Option<usize> = None;

        for (lane, &symbol) in symbols.iter().enumerate() {
            match symbol {
                GateSymbol::Control | GateSymbol::CNot => match open_cnot.take() {
                    None => open_cnot = Some((lane, symbol)),
                    Some((first, first_symbol)) if first_symbol != symbol => {
                        let lanes = if symbol == GateSymbol::CNot {
                            vec![first, lane]
                        } else {
                            vec![lane, first]
                        };
                        placements.push(GatePlacement { gate: MultiQubitGate::CNot, lanes });
                    }
                    Some((first, _)) => {
                        return Err(Error::malformed(
                            step,
                            format!("lanes {} and {} both hold '{}'", first, lane, symbol),
                        ));
                    }
                },
                GateSymbol::Swap => match open_swap.take() {
                    None => open_swap = Some(lane),
                    Some(first) => placements.push(GatePlacement {
                        gate: MultiQubitGate::Swap,
                        lanes: vec![first, lane],
                    }),
                },
                GateSymbol::Toffoli => {
                    let lanes = expect_roles(
                        step,
                        &symbols,
                        lane,
                        &[(-2, GateSymbol::Toffoli1), (-1, GateSymbol::Toffoli2)],
                    )?;
                    placements.push(GatePlacement {
                        gate: MultiQubitGate::Toffoli,
                        lanes: vec![lanes[0], lanes[1], lane],
                    });
                }
                GateSymbol::Toffoli1 => {
                    expect_roles(step, &symbols, lane, &[(2, GateSymbol::Toffoli)])?;
                }
                GateSymbol::Toffoli2 => {
                    expect_roles(step, &symbols, lane, &[(1, GateSymbol::Toffoli)])?;
                }
                GateSymbol::Fredkin => {
                    let lanes = expect_roles(
                        step,
                        &symbols,
                        lane,
                        &[(1, GateSymbol::Fredkin1), (2, GateSymbol::Fredkin2)],
                    )?;
                    placements.push(GatePlacement {
                        gate: MultiQubitGate::Fredkin,
                        lanes: vec![lane, lanes[0], lanes[1]],
                    });
                }
                GateSymbol::Fredkin1 => {
                    expect_roles(step, &symbols, lane, &[(-1, GateSymbol::Fredkin)])?;
                }
                GateSymbol::Fredkin2 => {
                    expect_roles(step, &symbols, lane, &[(-2, GateSymbol::Fredkin)])?;
                }
                GateSymbol::DeutschOracle => {
                    let lanes = expect_roles(
                        step,
                        &symbols,
                        lane,
                        &[(-1, GateSymbol::DeutschOracleControl)],
                    )?;
                    placements.push(GatePlacement {
                        gate: MultiQubitGate::DeutschOracle,
                        lanes: vec![lanes[0], lane],
                    });
                }
                GateSymbol::DeutschOracleControl => {
                    expect_roles(step, &symbols, lane, &[(1, GateSymbol::DeutschOracle)])?;
                }
                GateSymbol::PauliX
                | GateSymbol::PauliY
                | GateSymbol::PauliZ
                | GateSymbol::Hadamard
                | GateSymbol::S
                | GateSymbol::T
                | GateSymbol::Identity
                | GateSymbol::Measurement => {}
            }
        }

        if let Some((lane, symbol)) = open_cnot {
            return Err(Error::malformed(
                step,
                format!("'{}' on lane {} has no matching CNOT fragment", symbol, lane),
            ));
        }
        if let Some(lane) = open_swap {
            return Err(Error::malformed(
                step,
                format!("SWAP on lane {} has no partner lane", lane),
            ));
        }

        placements.sort_by_key(|placement| placement.span().0);
        for pair in placements.windows(2) {
            let (_, first_hi) = pair[0].span();
            let (second_lo, _) = pair[1].span();
            if second_lo <= first_hi {
                return Err(Error::malformed(
                    step,
                    format!(
                        "{} on lanes {:?} overlaps {} on lanes {:?}",
                        pair[0].gate, pair[0].lanes, pair[1].gate, pair[1].lanes
                    ),
                ));
            }
        }

        Ok(ColumnLayout { step, symbols, placements })
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn qubit_count(&self) -> usize {
        self.symbols.len()
    }

    /// Multi-qubit gates of this step, ordered by their first lane
    pub fn placements(&self) -> &[GatePlacement] {
        &self.placements
    }

    /// One tensor factor per lane.
    ///
    /// A multi-qubit gate spanning `lo..=hi` contributes its whole block at
    /// lane `lo` (single-qubit gates inside the span folded in) and the 1×1
    /// identity at every other lane of the span.
    pub fn lane_factors<R: Rng>(&self, rng: &mut R) -> Result<Vec<Array2<Complex64>>> {
        let mut factors = Vec::with_capacity(self.symbols.len());
        let mut placements = self.placements.iter().peekable();
        let mut covered_until = None;

        for (lane, symbol) in self.symbols.iter().enumerate() {
            if let Some(hi) = covered_until {
                if lane <= hi {
                    factors.push(identity(1));
                    continue;
                }
            }

            if let Some(placement) = placements.next_if(|p| p.span().0 == lane) {
                let (_, hi) = placement.span();
                factors.push(self.block_matrix(placement, rng)?);
                covered_until = Some(hi);
                continue;
            }

            factors.push(self.single_matrix(lane, *symbol)?);
        }

        Ok(factors)
    }

    /// The register-wide operator of this step
    pub fn operator<R: Rng>(&self, rng: &mut R) -> Result<Array2<Complex64>> {
        let factors = self.lane_factors(rng)?;
        let operator = tensor_all(&factors);

        let expected = 1 << self.symbols.len();
        if operator.nrows() != expected {
            return Err(Error::ArityMismatch {
                step: self.step,
                expected,
                actual: operator.nrows(),
            });
        }

        trace!(
            step = self.step,
            gates = self.placements.len(),
            dimension = expected,
            "built step operator"
        );
        Ok(operator)
    }

    fn single_matrix(&self, lane: usize, symbol: GateSymbol) -> Result<Array2<Complex64>> {
        symbol.single_qubit_matrix().ok_or_else(|| {
            Error::malformed(
                self.step,
                format!("'{}' on lane {} is not part of any gate", symbol, lane),
            )
        })
    }

    fn block_matrix<R: Rng>(
        &self,
        placement: &GatePlacement,
        rng: &mut R,
    ) -> Result<Array2<Complex64>> {
        let (lo, hi) = placement.span();
        let width = hi - lo + 1;

        let gate = resolve_gate(placement, rng);
        let relative: Vec<usize> = {
            let mut lanes: Vec<usize> = placement.lanes.iter().map(|lane| lane - lo).collect();
            lanes.sort_unstable();
            lanes
        };
        let gate_block = spread(&gate.matrix(), &relative, width);

        if width == placement.lanes.len() {
            return Ok(gate_block);
        }

        // Lanes the gate jumps over keep their own single-qubit gates
        let passengers = (lo..=hi)
            .map(|lane| {
                if placement.lanes.contains(&lane) {
                    Ok(identity(2))
                } else {
                    self.single_matrix(lane, self.symbols[lane])
                }
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(gate_block.dot(&tensor_all(&passengers)))
    }
}

/// Pick the catalog matrix for a placed gate, oriented for its lane order.
///
/// The matrix acts on the gate's lanes sorted top to bottom. Every Deutsch
/// oracle draws a fresh coin flip between the identity (constant function)
/// and a CNOT (balanced function).
pub fn resolve_gate<R: Rng>(placement: &GatePlacement, rng: &mut R) -> StandardGate {
    match placement.gate {
        MultiQubitGate::CNot => {
            if placement.lanes[0] < placement.lanes[1] {
                StandardGate::CNotControlAbove
            } else {
                StandardGate::CNotControlBelow
            }
        }
        MultiQubitGate::Swap => StandardGate::Swap,
        MultiQubitGate::Toffoli => StandardGate::Toffoli,
        MultiQubitGate::Fredkin => StandardGate::Fredkin,
        MultiQubitGate::DeutschOracle => {
            let balanced = rng.gen_bool(0.5);
            trace!(lanes = ?placement.lanes, balanced, "resolved Deutsch oracle");
            if balanced {
                StandardGate::CNotControlAbove
            } else {
                StandardGate::I(2)
            }
        }
    }
}

/// Build the operator of a whole compacted circuit.
///
/// Steps are chained in time order, so the result is `M_last · … · M_0`.
pub fn circuit_operator<R: Rng>(circuit: &Circuit, rng: &mut R) -> Result<Array2<Complex64>> {
    let dim = 1 << circuit.qubit_count();
    let operators = (0..circuit.width())
        .map(|step| {
            let column = circuit.column(step).unwrap_or_default();
            ColumnLayout::parse(step, &column)?.operator(rng)
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(chain(&operators, dim))
}

/// Roles of a fixed-offset gate, checked relative to `lane`.
///
/// Returns the absolute lanes of the expected roles, in the order given.
fn expect_roles(
    step: usize,
    symbols: &[GateSymbol],
    lane: usize,
    roles: &[(isize, GateSymbol)],
) -> Result<Vec<usize>> {
    roles
        .iter()
        .map(|&(offset, expected)| {
            let other = lane as isize + offset;
            let found = usize::try_from(other)
                .ok()
                .and_then(|other| symbols.get(other).map(|symbol| (other, *symbol)));
            match found {
                Some((other, symbol)) if symbol == expected => Ok(other),
                _ => Err(Error::malformed(
                    step,
                    format!(
                        "'{}' on lane {} expects '{}' on lane {}",
                        symbols[lane], lane, expected, other
                    ),
                )),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn column(labels: &[GateSymbol]) -> Vec<Cell> {
        labels.iter().copied().map(Cell::Gate).collect()
    }

    #[test]
    fn test_adjacent_cnot_control_above_uses_catalog_matrix() {
        let mut rng = StdRng::seed_from_u64(7);
        let layout = ColumnLayout::parse(0, &column(&[GateSymbol::Control, GateSymbol::CNot])).unwrap();
        let op = layout.operator(&mut rng).unwrap();
        assert_eq!(op, StandardGate::CNotControlAbove.matrix());

        let factors = layout.lane_factors(&mut rng).unwrap();
        assert_eq!(factors[1].dim(), (1, 1));
    }

    #[test]
    fn test_adjacent_cnot_control_below() {
        let mut rng = StdRng::seed_from_u64(7);
        let layout = ColumnLayout::parse(0, &column(&[GateSymbol::CNot, GateSymbol::Control])).unwrap();
        assert_eq!(layout.placements()[0].lanes, vec![1, 0]);
        let op = layout.operator(&mut rng).unwrap();
        assert_eq!(op, StandardGate::CNotControlBelow.matrix());
    }

    #[test]
    fn test_orphan_control_is_rejected() {
        let result = ColumnLayout::parse(3, &column(&[GateSymbol::Control, GateSymbol::Identity]));
        assert!(matches!(result, Err(Error::MalformedPlacement { step: 3, .. })));
    }

    #[test]
    fn test_two_controls_in_a_row_are_rejected() {
        let result = ColumnLayout::parse(
            0,
            &column(&[GateSymbol::Control, GateSymbol::Control, GateSymbol::CNot]),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_toffoli_offsets_are_checked() {
        let ok = ColumnLayout::parse(
            0,
            &column(&[GateSymbol::Toffoli1, GateSymbol::Toffoli2, GateSymbol::Toffoli]),
        )
        .unwrap();
        assert_eq!(ok.placements()[0].lanes, vec![0, 1, 2]);

        let wrong = ColumnLayout::parse(
            0,
            &column(&[GateSymbol::Toffoli2, GateSymbol::Toffoli1, GateSymbol::Toffoli]),
        );
        assert!(wrong.is_err());
    }

    #[test]
    fn test_overlapping_spans_are_rejected() {
        let result = ColumnLayout::parse(
            0,
            &column(&[
                GateSymbol::Control,
                GateSymbol::Swap,
                GateSymbol::CNot,
                GateSymbol::Swap,
            ]),
        );
        assert!(matches!(result, Err(Error::MalformedPlacement { .. })));
    }

    #[test]
    fn test_spanning_gate_keeps_passenger_gate() {
        let mut rng = StdRng::seed_from_u64(1);
        // CNOT 0 -> 2 with X riding on lane 1
        let layout = ColumnLayout::parse(
            0,
            &column(&[GateSymbol::Control, GateSymbol::PauliX, GateSymbol::CNot]),
        )
        .unwrap();
        let op = layout.operator(&mut rng).unwrap();
        assert_eq!(op.dim(), (8, 8));
        // |100⟩ -> |111⟩
        assert_eq!(op[[0b111, 0b100]], Complex64::new(1.0, 0.0));
        // |000⟩ -> |010⟩
        assert_eq!(op[[0b010, 0b000]], Complex64::new(1.0, 0.0));
    }
}
