//! Expectation values of Pauli-sum Hamiltonians.
//!
//! Each term is evaluated by contracting its Pauli tensor onto a copy of the
//! statetensor and taking the inner product with the original:
//! `⟨ψ|H|ψ⟩ = Σ_k c_k ⟨ψ|P_k|ψ⟩`.

use num_complex::Complex64;
use tracing::warn;

use crate::error::{SimError, SimResult};
use crate::hamiltonian::{Hamiltonian, PauliString};
use crate::statetensor::StateTensor;

/// Imaginary parts below this are treated as rounding noise.
pub const IMAG_TOLERANCE: f64 = 1e-9;

/// `⟨ψ|P|ψ⟩` for a single Pauli string. The identity string gives `⟨ψ|ψ⟩`.
pub fn pauli_expectation(state: &StateTensor, pauli: &PauliString) -> SimResult<Complex64> {
    match pauli.tensor()? {
        None => state.inner(state),
        Some(tensor) => {
            let applied = state.clone().contract(&tensor, &pauli.qubits())?;
            state.inner(&applied)
        }
    }
}

/// Full complex expectation `Σ_k c_k ⟨ψ|P_k|ψ⟩`.
pub fn expectation_complex(state: &StateTensor, hamiltonian: &Hamiltonian) -> SimResult<Complex64> {
    check_register(state, hamiltonian)?;
    let mut total = Complex64::new(0.0, 0.0);
    for term in hamiltonian.terms() {
        total += term.coeff * pauli_expectation(state, &term.pauli)?;
    }
    Ok(total)
}

/// Real expectation value `⟨ψ|H|ψ⟩`.
///
/// A Hermitian Hamiltonian yields a real value up to rounding. For a
/// non-Hermitian one the imaginary part is discarded and a warning logged.
pub fn expectation(state: &StateTensor, hamiltonian: &Hamiltonian) -> SimResult<f64> {
    let value = expectation_complex(state, hamiltonian)?;
    if value.im.abs() > IMAG_TOLERANCE {
        warn!(
            re = value.re,
            im = value.im,
            "expectation has a non-negligible imaginary part, Hamiltonian is not Hermitian"
        );
    }
    Ok(value.re)
}

pub(crate) fn check_register(state: &StateTensor, hamiltonian: &Hamiltonian) -> SimResult<()> {
    if state.num_qubits() != hamiltonian.num_qubits() {
        return Err(SimError::ShapeMismatch {
            expected: hamiltonian.num_qubits(),
            got: state.num_qubits(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hamiltonian::{PauliOp, PauliTerm};

    #[test]
    fn test_z_on_basis_states() {
        let h = Hamiltonian::new(vec![PauliTerm::z(1, 1.0)], 2).unwrap();
        let zero = StateTensor::basis(2, 0b00).unwrap();
        let one = StateTensor::basis(2, 0b01).unwrap();
        assert!((expectation(&zero, &h).unwrap() - 1.0).abs() < 1e-12);
        assert!((expectation(&one, &h).unwrap() + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_identity_term_scales_norm() {
        let h = Hamiltonian::new(vec![PauliTerm::constant(2.5)], 3).unwrap();
        let psi = StateTensor::basis(3, 5).unwrap();
        assert!((expectation(&psi, &h).unwrap() - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_y_expectation_uses_complex_entries() {
        // |+i> = (|0> + i|1>)/√2 has <Y> = 1
        let s = std::f64::consts::FRAC_1_SQRT_2;
        let psi =
            StateTensor::from_amplitudes(vec![Complex64::new(s, 0.0), Complex64::new(0.0, s)])
                .unwrap();
        let y = PauliString::from_ops([(0, PauliOp::Y)]);
        let value = pauli_expectation(&psi, &y).unwrap();
        assert!((value - Complex64::new(1.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn test_non_hermitian_keeps_imaginary_part() {
        let h = Hamiltonian::new(
            vec![PauliTerm::new(Complex64::new(0.0, 2.0), PauliString::identity())],
            1,
        )
        .unwrap();
        let psi = StateTensor::zero(1).unwrap();
        let full = expectation_complex(&psi, &h).unwrap();
        assert!((full - Complex64::new(0.0, 2.0)).norm() < 1e-12);
        assert!(expectation(&psi, &h).unwrap().abs() < 1e-12);
    }

    #[test]
    fn test_register_mismatch() {
        let h = Hamiltonian::new(vec![PauliTerm::z(0, 1.0)], 2).unwrap();
        let psi = StateTensor::zero(3).unwrap();
        assert!(matches!(
            expectation(&psi, &h),
            Err(SimError::ShapeMismatch { expected: 2, got: 3 })
        ));
    }
}
