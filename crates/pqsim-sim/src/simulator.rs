//! Circuit evaluation.
//!
//! Gates are applied strictly in declaration order, each one contracted onto
//! the statetensor produced by the previous step.

use pqsim_ir::CircuitDescriptor;
use tracing::trace;

use crate::error::{SimError, SimResult};
use crate::statetensor::StateTensor;

/// Evaluate `circuit` on `|0…0⟩` with the given parameter vector.
///
/// Fails with [`SimError::ParameterCount`] before doing any work if `params`
/// is shorter than [`CircuitDescriptor::num_params`]. Extra trailing
/// parameters are ignored.
pub fn apply(circuit: &CircuitDescriptor, params: &[f64]) -> SimResult<StateTensor> {
    check_params(circuit, params)?;
    let state = StateTensor::zero(circuit.num_qubits())?;
    run(circuit, params, state)
}

/// Evaluate `circuit` starting from a caller-supplied statetensor.
pub fn apply_from(
    circuit: &CircuitDescriptor,
    params: &[f64],
    state: StateTensor,
) -> SimResult<StateTensor> {
    check_params(circuit, params)?;
    if state.num_qubits() != circuit.num_qubits() {
        return Err(SimError::ShapeMismatch {
            expected: circuit.num_qubits(),
            got: state.num_qubits(),
        });
    }
    run(circuit, params, state)
}

fn check_params(circuit: &CircuitDescriptor, params: &[f64]) -> SimResult<()> {
    if params.len() < circuit.num_params() {
        return Err(SimError::ParameterCount {
            required: circuit.num_params(),
            got: params.len(),
        });
    }
    Ok(())
}

fn run(
    circuit: &CircuitDescriptor,
    params: &[f64],
    mut state: StateTensor,
) -> SimResult<StateTensor> {
    for (step, entry) in circuit.entries().iter().enumerate() {
        trace!(step, gate = entry.name(), qubits = ?entry.qubits(), "contracting gate");
        let tensor = entry.tensor(params)?;
        state = state.contract(&tensor, entry.qubits())?;
    }
    Ok(state)
}
