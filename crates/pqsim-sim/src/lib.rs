//! Statetensor simulation of parameterized circuits.
//!
//! Evaluates a [`pqsim_ir::CircuitDescriptor`] against a flat parameter
//! vector by contracting each gate tensor onto a rank-`n` statetensor, and
//! scores the result against a sum-of-Paulis [`Hamiltonian`]:
//!
//! - **Simulation**: [`params_to_statetensor`] folds the circuit's gates onto
//!   `|0…0⟩` in order
//! - **Expectation**: [`statetensor_to_expectation`] computes `⟨ψ|H|ψ⟩`
//! - **Binding**: [`ParameterBinding`] and the `*_fn` factories package both
//!   as pure functions of the parameters
//!
//! Every evaluation is deterministic and free of side effects, so an outer
//! optimizer can differentiate through it by finite differences or any
//! black-box scheme.
//!
//! # Quick start
//!
//! ```rust
//! use pqsim_ir::CircuitBuilder;
//! use pqsim_sim::{Hamiltonian, PauliTerm, params_to_expectation};
//!
//! let mut builder = CircuitBuilder::new(2);
//! builder.ry(0, 0).cx(0, 1);
//! let circuit = builder.build().unwrap();
//!
//! let h = Hamiltonian::new(vec![PauliTerm::zz(0, 1, 1.0)], 2).unwrap();
//!
//! // Ry(θ)|0> then CX leaves qubits perfectly correlated: <Z0 Z1> = 1
//! let value = params_to_expectation(&circuit, &h, &[0.8]).unwrap();
//! assert!((value - 1.0).abs() < 1e-12);
//! ```

pub mod binding;
pub mod error;
pub mod expectation;
pub mod hamiltonian;
pub mod sampling;
pub mod simulator;
pub mod statetensor;

pub use binding::{
    ParameterBinding, params_to_expectation, params_to_expectation_fn, params_to_statetensor,
    params_to_statetensor_fn, statetensor_to_expectation, statetensor_to_expectation_fn,
};
pub use error::{SimError, SimResult};
pub use expectation::{IMAG_TOLERANCE, expectation, expectation_complex, pauli_expectation};
pub use hamiltonian::{Hamiltonian, PauliOp, PauliString, PauliTerm, build_hamiltonian};
pub use sampling::{
    bitstring_counts, bitstrings_to_integers, integers_to_bitstrings, sample_bitstrings,
    sampled_expectation,
};
pub use simulator::{apply, apply_from};
pub use statetensor::StateTensor;
