//! Error types for the IR crate.

use thiserror::Error;

/// Validation errors raised while resolving gates and building descriptors.
///
/// Every variant is detected at construction time, before any descriptor
/// becomes observable.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Gate name is not in the registry.
    #[error("Unknown gate '{0}'")]
    UnknownGate(String),

    /// Qubit index outside `[0, n)`.
    #[error("Qubit {qubit} out of range for a {num_qubits}-qubit register{}", format_gate_context(.gate_name))]
    QubitOutOfRange {
        /// The offending qubit index.
        qubit: usize,
        /// Size of the register.
        num_qubits: usize,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// Gate requires different number of qubits.
    #[error("Gate '{gate_name}' requires {expected} qubits, got {got}")]
    QubitCountMismatch {
        /// Name of the gate.
        gate_name: String,
        /// Operand count of the gate.
        expected: usize,
        /// Number of target qubits supplied.
        got: usize,
    },

    /// Named gate was bound to the wrong number of parameters.
    #[error("Gate '{gate_name}' takes {expected} parameters, got {got}")]
    ParameterArityMismatch {
        /// Name of the gate.
        gate_name: String,
        /// Number of parameters the gate takes.
        expected: usize,
        /// Number of parameter indices supplied.
        got: usize,
    },

    /// Duplicate qubit in operation.
    #[error("Duplicate qubit {qubit} in operation{}", format_gate_context(.gate_name))]
    DuplicateQubit {
        /// The duplicate qubit.
        qubit: usize,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// A parameter index points past the end of the parameter vector.
    #[error("Gate '{gate_name}' reads parameter {index}, but only {len} were supplied")]
    ParameterIndexOutOfRange {
        /// Name of the gate.
        gate_name: String,
        /// The missing parameter index.
        index: usize,
        /// Length of the supplied parameter vector.
        len: usize,
    },

    /// Parallel input sequences have different lengths.
    #[error("Expected {expected} {what}, got {got}")]
    LengthMismatch {
        /// Which sequence was short or long.
        what: &'static str,
        /// Length implied by the leading sequence.
        expected: usize,
        /// Actual length.
        got: usize,
    },

    /// A generator produced a tensor of the wrong shape.
    #[error("Generator '{gate_name}' produced shape {got:?}, expected a {num_qubits}-qubit unitary")]
    GeneratorShape {
        /// Name of the generator.
        gate_name: String,
        /// Arity implied by the target list.
        num_qubits: usize,
        /// Shape actually returned.
        got: Vec<usize>,
    },

    /// Matrix is not square with a power-of-two side.
    #[error("Gate matrix of shape {0:?} is not a 2^k x 2^k unitary")]
    InvalidMatrixShape(Vec<usize>),

    /// Register has no qubits.
    #[error("Register must contain at least one qubit")]
    EmptyRegister,

    /// Register is too large to hold a dense statetensor.
    #[error("Register of {num_qubits} qubits exceeds the limit of {max}")]
    RegisterTooLarge {
        /// Requested qubit count.
        num_qubits: usize,
        /// Largest supported register.
        max: usize,
    },

    /// Unrecognised Pauli symbol.
    #[error("Invalid Pauli operator '{0}'")]
    InvalidPauli(String),
}

/// Helper function to format optional gate context.
#[allow(clippy::ref_option)]
fn format_gate_context(gate_name: &Option<String>) -> String {
    match gate_name {
        Some(name) => format!(" (gate: {name})"),
        None => String::new(),
    }
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
