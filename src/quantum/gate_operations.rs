// src/quantum/gate_operations.rs
//! Matrix operations used to assemble register-wide operators

use ndarray::Array2;
use num_complex::Complex64;

use super::gate::identity;

/// Kronecker product `a ⊗ b`
pub fn kron(a: &Array2<Complex64>, b: &Array2<Complex64>) -> Array2<Complex64> {
    ndarray::linalg::kron(a, b)
}

/// Tensor a sequence of matrices together, leftmost factor first.
///
/// An empty sequence yields the 1×1 identity.
pub fn tensor_all<'a, I>(factors: I) -> Array2<Complex64>
where
    I: IntoIterator<Item = &'a Array2<Complex64>>,
{
    factors
        .into_iter()
        .fold(identity(1), |acc, factor| kron(&acc, factor))
}

/// Expand a gate acting on `targets` to a register of `total_qubits` lanes.
///
/// `targets` lists the register lanes in the order of the gate's own qubits,
/// so the gate's most significant qubit acts on `targets[0]`. Lanes not in
/// `targets` are left untouched. Lane 0 is the most significant bit.
pub fn spread(
    gate_matrix: &Array2<Complex64>,
    targets: &[usize],
    total_qubits: usize,
) -> Array2<Complex64> {
    let dim = 1 << total_qubits;
    let num_target = targets.len();
    let mut result = Array2::zeros((dim, dim));

    let other_mask = (0..total_qubits)
        .filter(|q| !targets.contains(q))
        .fold(0usize, |mask, q| mask | (1 << (total_qubits - 1 - q)));

    for i in 0..dim {
        for j in 0..dim {
            // Non-target bits must match
            if (i & other_mask) != (j & other_mask) {
                continue;
            }

            // Extract the target qubits into a smaller index
            let mut sub_i = 0;
            let mut sub_j = 0;
            for (k, &q) in targets.iter().enumerate() {
                let shift_full = total_qubits - 1 - q;
                let bit_i = (i >> shift_full) & 1;
                let bit_j = (j >> shift_full) & 1;
                sub_i |= bit_i << ((num_target - 1) - k);
                sub_j |= bit_j << ((num_target - 1) - k);
            }

            result[[i, j]] = gate_matrix[[sub_i, sub_j]];
        }
    }

    result
}

/// Chain operators in time order: the first operator is applied first.
pub fn chain<'a, I>(operators: I, dim: usize) -> Array2<Complex64>
where
    I: IntoIterator<Item = &'a Array2<Complex64>>,
{
    operators
        .into_iter()
        .fold(identity(dim), |acc, op| op.dot(&acc))
}
