//! Pure `params → statetensor → expectation` functions.
//!
//! Descriptors are borrowed or shared, never mutated, so every function here
//! can be called from any number of threads and differentiated by an outer
//! framework treating it as a black box.

use std::sync::Arc;

use pqsim_ir::CircuitDescriptor;
use rayon::prelude::*;
use tracing::debug;

use crate::error::{SimError, SimResult};
use crate::expectation::expectation;
use crate::hamiltonian::Hamiltonian;
use crate::simulator::apply;
use crate::statetensor::StateTensor;

/// Evaluate `circuit` on `|0…0⟩` with `params`.
pub fn params_to_statetensor(
    circuit: &CircuitDescriptor,
    params: &[f64],
) -> SimResult<StateTensor> {
    apply(circuit, params)
}

/// Real expectation of `hamiltonian` on `state`.
pub fn statetensor_to_expectation(
    state: &StateTensor,
    hamiltonian: &Hamiltonian,
) -> SimResult<f64> {
    expectation(state, hamiltonian)
}

/// Composition of [`params_to_statetensor`] and [`statetensor_to_expectation`].
pub fn params_to_expectation(
    circuit: &CircuitDescriptor,
    hamiltonian: &Hamiltonian,
    params: &[f64],
) -> SimResult<f64> {
    check_registers(circuit, hamiltonian)?;
    expectation(&apply(circuit, params)?, hamiltonian)
}

/// Closure form of [`params_to_statetensor`] bound to one circuit.
pub fn params_to_statetensor_fn(
    circuit: &CircuitDescriptor,
) -> impl Fn(&[f64]) -> SimResult<StateTensor> + '_ {
    move |params: &[f64]| apply(circuit, params)
}

/// Closure form of [`statetensor_to_expectation`] bound to one Hamiltonian.
pub fn statetensor_to_expectation_fn(
    hamiltonian: &Hamiltonian,
) -> impl Fn(&StateTensor) -> SimResult<f64> + '_ {
    move |state: &StateTensor| expectation(state, hamiltonian)
}

/// Closure form of [`params_to_expectation`]. Register sizes are checked
/// once, here.
pub fn params_to_expectation_fn<'a>(
    circuit: &'a CircuitDescriptor,
    hamiltonian: &'a Hamiltonian,
) -> SimResult<impl Fn(&[f64]) -> SimResult<f64> + 'a> {
    check_registers(circuit, hamiltonian)?;
    Ok(move |params: &[f64]| expectation(&apply(circuit, params)?, hamiltonian))
}

fn check_registers(circuit: &CircuitDescriptor, hamiltonian: &Hamiltonian) -> SimResult<()> {
    if circuit.num_qubits() != hamiltonian.num_qubits() {
        return Err(SimError::ShapeMismatch {
            expected: hamiltonian.num_qubits(),
            got: circuit.num_qubits(),
        });
    }
    Ok(())
}

/// A circuit paired with the Hamiltonian it is scored against.
///
/// Both descriptors are shared behind `Arc`, so a binding is cheap to clone
/// and can be moved into worker threads.
#[derive(Debug, Clone)]
pub struct ParameterBinding {
    circuit: Arc<CircuitDescriptor>,
    hamiltonian: Arc<Hamiltonian>,
}

impl ParameterBinding {
    /// Pair `circuit` with `hamiltonian`; both must span the same register.
    pub fn new(
        circuit: impl Into<Arc<CircuitDescriptor>>,
        hamiltonian: impl Into<Arc<Hamiltonian>>,
    ) -> SimResult<Self> {
        let circuit = circuit.into();
        let hamiltonian = hamiltonian.into();
        check_registers(&circuit, &hamiltonian)?;
        Ok(Self {
            circuit,
            hamiltonian,
        })
    }

    /// The bound circuit.
    pub fn circuit(&self) -> &CircuitDescriptor {
        &self.circuit
    }

    /// The bound Hamiltonian.
    pub fn hamiltonian(&self) -> &Hamiltonian {
        &self.hamiltonian
    }

    /// Minimum parameter-vector length.
    pub fn num_params(&self) -> usize {
        self.circuit.num_params()
    }

    /// `params → statetensor`.
    pub fn statetensor(&self, params: &[f64]) -> SimResult<StateTensor> {
        apply(&self.circuit, params)
    }

    /// `statetensor → expectation`.
    pub fn expectation_of(&self, state: &StateTensor) -> SimResult<f64> {
        expectation(state, &self.hamiltonian)
    }

    /// `params → expectation`.
    pub fn expectation(&self, params: &[f64]) -> SimResult<f64> {
        self.expectation_of(&self.statetensor(params)?)
    }

    /// Evaluate many independent parameter vectors in parallel.
    ///
    /// Results are returned in input order. The first failure aborts the
    /// whole batch.
    pub fn expectation_batch(&self, batch: &[Vec<f64>]) -> SimResult<Vec<f64>> {
        debug!(
            batch = batch.len(),
            threads = rayon::current_num_threads(),
            "evaluating parameter batch"
        );
        batch
            .par_iter()
            .map(|params| self.expectation(params))
            .collect()
    }
}
