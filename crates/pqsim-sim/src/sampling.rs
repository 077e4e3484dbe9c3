//! Terminal-measurement sampling.
//!
//! Sampling never collapses or mutates a statetensor; it only draws basis
//! states from `|ψ_i|²`.

use std::collections::BTreeMap;

use pqsim_ir::validate_register;
use rand::Rng;
use rand::distributions::{Distribution, WeightedIndex};

use crate::error::{SimError, SimResult};
use crate::expectation::{check_register, pauli_expectation};
use crate::hamiltonian::Hamiltonian;
use crate::statetensor::StateTensor;

/// Draw `shots` basis-state indices from the measurement distribution.
pub fn sample_bitstrings<R: Rng + ?Sized>(
    state: &StateTensor,
    shots: usize,
    rng: &mut R,
) -> SimResult<Vec<usize>> {
    if shots == 0 {
        return Err(SimError::InvalidShots(shots));
    }
    let probabilities = state.probabilities();
    let dist = WeightedIndex::new(&probabilities)
        .map_err(|_| SimError::InvalidAmplitudes(state.as_array().shape().to_vec()))?;
    Ok((0..shots).map(|_| dist.sample(rng)).collect())
}

/// Expand basis-state indices into bit vectors, qubit 0 first.
///
/// Fails with [`SimError::IndexOutOfRange`] for an index that does not fit
/// in `num_qubits` bits.
pub fn integers_to_bitstrings(indices: &[usize], num_qubits: usize) -> SimResult<Vec<Vec<u8>>> {
    validate_register(num_qubits)?;
    let dim = 1usize << num_qubits;
    indices
        .iter()
        .map(|&index| {
            if index >= dim {
                return Err(SimError::IndexOutOfRange { index, dim });
            }
            Ok((0..num_qubits)
                .map(|q| ((index >> (num_qubits - 1 - q)) & 1) as u8)
                .collect())
        })
        .collect()
}

/// Inverse of [`integers_to_bitstrings`].
pub fn bitstrings_to_integers(bitstrings: &[Vec<u8>]) -> Vec<usize> {
    bitstrings
        .iter()
        .map(|bits| bits.iter().fold(0usize, |acc, &b| (acc << 1) | usize::from(b & 1)))
        .collect()
}

/// Histogram of sampled outcomes keyed by bitstring (qubit 0 leftmost).
pub fn bitstring_counts(indices: &[usize], num_qubits: usize) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for &index in indices {
        *counts
            .entry(format!("{index:0num_qubits$b}"))
            .or_insert(0) += 1;
    }
    counts
}

/// Shot-based estimate of `⟨ψ|H|ψ⟩`.
///
/// Each term's Pauli measurement is simulated as `shots` ±1 outcomes with
/// `P(+1) = (1 + ⟨P⟩)/2`. Only the real part of each coefficient
/// contributes.
pub fn sampled_expectation<R: Rng + ?Sized>(
    state: &StateTensor,
    hamiltonian: &Hamiltonian,
    shots: usize,
    rng: &mut R,
) -> SimResult<f64> {
    if shots == 0 {
        return Err(SimError::InvalidShots(shots));
    }
    check_register(state, hamiltonian)?;
    let mut total = 0.0;
    for term in hamiltonian.terms() {
        let exact = pauli_expectation(state, &term.pauli)?.re.clamp(-1.0, 1.0);
        let p_plus = ((1.0 + exact) / 2.0).clamp(0.0, 1.0);
        let plus = (0..shots).filter(|_| rng.gen_bool(p_plus)).count();
        let mean = (2.0 * plus as f64 - shots as f64) / shots as f64;
        total += term.coeff.re * mean;
    }
    Ok(total)
}
