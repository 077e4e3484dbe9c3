//! Error types for the sim crate.

use pqsim_ir::IrError;
use thiserror::Error;

/// Errors produced while building Hamiltonians or evaluating circuits.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SimError {
    /// A descriptor failed validation.
    #[error("Validation error: {0}")]
    Validation(#[from] IrError),

    /// The parameter vector is shorter than the circuit requires.
    #[error("Circuit requires at least {required} parameters, got {got}")]
    ParameterCount {
        /// Minimum parameter-vector length.
        required: usize,
        /// Length supplied.
        got: usize,
    },

    /// Statetensor and descriptor disagree on the number of qubits.
    #[error("Shape mismatch: expected {expected} qubits, got {got}")]
    ShapeMismatch {
        /// Qubit count of the descriptor.
        expected: usize,
        /// Qubit count of the statetensor.
        got: usize,
    },

    /// Amplitudes do not form a `[2; n]` tensor.
    #[error("Amplitude array of shape {0:?} is not a statetensor")]
    InvalidAmplitudes(Vec<usize>),

    /// Basis-state index outside `[0, 2^n)`.
    #[error("Basis-state index {index} out of range for dimension {dim}")]
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// Hilbert-space dimension `2^n`.
        dim: usize,
    },

    /// Shot count must be at least 1.
    #[error("shots must be at least 1, got {0}")]
    InvalidShots(usize),

    /// Internal reshape failed.
    #[error("Tensor layout error: {0}")]
    Layout(#[from] ndarray::ShapeError),
}

impl SimError {
    /// True for errors raised while validating a descriptor.
    pub fn is_validation(&self) -> bool {
        matches!(self, SimError::Validation(_))
    }
}

/// Result type for simulation operations.
pub type SimResult<T> = Result<T, SimError>;
