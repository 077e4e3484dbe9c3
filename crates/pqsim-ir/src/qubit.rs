//! Qubit index validation shared by circuits and Hamiltonians.

use crate::error::{IrError, IrResult};

/// Largest register a dense statetensor is allowed to span.
pub const MAX_QUBITS: usize = 30;

/// Check that a register size is usable.
pub fn validate_register(num_qubits: usize) -> IrResult<()> {
    if num_qubits == 0 {
        return Err(IrError::EmptyRegister);
    }
    if num_qubits > MAX_QUBITS {
        return Err(IrError::RegisterTooLarge {
            num_qubits,
            max: MAX_QUBITS,
        });
    }
    Ok(())
}

/// Check that every target lies in `[0, num_qubits)` and none repeats.
pub fn validate_targets(
    qubits: &[usize],
    num_qubits: usize,
    gate_name: Option<&str>,
) -> IrResult<()> {
    for (pos, &qubit) in qubits.iter().enumerate() {
        if qubit >= num_qubits {
            return Err(IrError::QubitOutOfRange {
                qubit,
                num_qubits,
                gate_name: gate_name.map(str::to_string),
            });
        }
        if qubits[..pos].contains(&qubit) {
            return Err(IrError::DuplicateQubit {
                qubit,
                gate_name: gate_name.map(str::to_string),
            });
        }
    }
    Ok(())
}
