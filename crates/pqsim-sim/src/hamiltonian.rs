//! Hamiltonian data structures.
//!
//! A Hamiltonian is a sum of weighted Pauli strings:
//!
//!   H = Σ_k  c_k · P_k
//!
//! where each P_k is a tensor product of single-qubit Pauli operators
//! (I, X, Y, Z) on distinct qubits and c_k ∈ ℂ. Hermitian Hamiltonians have
//! real coefficients.
//!
//! # Example
//!
//! ```rust
//! use pqsim_sim::hamiltonian::{Hamiltonian, PauliTerm};
//!
//! // H = -1.0·Z₀Z₁  +  0.5·X₀
//! let h = Hamiltonian::new(
//!     vec![PauliTerm::zz(0, 1, -1.0), "0.5 * X0".parse().unwrap()],
//!     2,
//! )
//! .unwrap();
//! assert_eq!(h.n_terms(), 2);
//! assert_eq!(h.to_string(), "-1.00000000 * Z0 Z1 + 0.50000000 * X0");
//! ```

use std::fmt;
use std::str::FromStr;

use ndarray::Array2;
use ndarray::linalg::kron;
use num_complex::Complex64;
use pqsim_ir::gate::{pauli_x, pauli_y, pauli_z};
use pqsim_ir::{GateTensor, IrError, IrResult, validate_register, validate_targets};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::SimResult;

/// Single-qubit Pauli operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PauliOp {
    /// Identity.
    I,
    /// Pauli-X.
    X,
    /// Pauli-Y.
    Y,
    /// Pauli-Z.
    Z,
}

impl PauliOp {
    /// The 2×2 matrix of this operator.
    pub fn matrix(self) -> Array2<Complex64> {
        match self {
            PauliOp::I => Array2::eye(2),
            PauliOp::X => pauli_x(),
            PauliOp::Y => pauli_y(),
            PauliOp::Z => pauli_z(),
        }
    }

    fn symbol(self) -> char {
        match self {
            PauliOp::I => 'I',
            PauliOp::X => 'X',
            PauliOp::Y => 'Y',
            PauliOp::Z => 'Z',
        }
    }
}

impl fmt::Display for PauliOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for PauliOp {
    type Err = IrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "I" | "i" => Ok(PauliOp::I),
            "X" | "x" => Ok(PauliOp::X),
            "Y" | "y" => Ok(PauliOp::Y),
            "Z" | "z" => Ok(PauliOp::Z),
            other => Err(IrError::InvalidPauli(other.to_string())),
        }
    }
}

/// A tensor product of Pauli operators on indexed qubits.
///
/// Stored as a sorted `Vec<(qubit_index, PauliOp)>` with Identity factors
/// omitted. Qubits not listed are implicitly I.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PauliString {
    /// Non-identity factors, sorted by qubit index ascending.
    ops: Vec<(usize, PauliOp)>,
}

impl PauliString {
    /// Construct from an iterator of (qubit, op) pairs.
    ///
    /// Identity operators are dropped; the remaining ops are sorted by qubit.
    /// Repeated qubits are kept here and rejected by [`Hamiltonian::new`].
    pub fn from_ops(ops: impl IntoIterator<Item = (usize, PauliOp)>) -> Self {
        let mut v: Vec<(usize, PauliOp)> = ops
            .into_iter()
            .filter(|(_, op)| *op != PauliOp::I)
            .collect();
        v.sort_by_key(|(q, _)| *q);
        Self { ops: v }
    }

    /// Construct a Z⊗Z⊗...⊗Z string spanning the given qubits.
    pub fn zz(qubits: impl IntoIterator<Item = usize>) -> Self {
        Self::from_ops(qubits.into_iter().map(|q| (q, PauliOp::Z)))
    }

    /// The identity string.
    pub fn identity() -> Self {
        Self { ops: vec![] }
    }

    /// Return the non-identity (qubit, op) pairs, sorted by qubit index.
    pub fn ops(&self) -> &[(usize, PauliOp)] {
        &self.ops
    }

    /// Qubits with a non-identity factor, ascending.
    pub fn qubits(&self) -> Vec<usize> {
        self.ops.iter().map(|(q, _)| *q).collect()
    }

    /// True if there are no non-identity operators.
    pub fn is_identity(&self) -> bool {
        self.ops.is_empty()
    }

    /// The highest qubit index referenced, or `None` for an identity string.
    pub fn max_qubit(&self) -> Option<usize> {
        self.ops.last().map(|(q, _)| *q)
    }

    /// Kronecker product of the non-identity factors in qubit order, or
    /// `None` for the identity string.
    pub fn tensor(&self) -> IrResult<Option<GateTensor>> {
        let Some(((_, first), rest)) = self.ops.split_first() else {
            return Ok(None);
        };
        let matrix = rest
            .iter()
            .fold(first.matrix(), |acc, (_, op)| kron(&acc, &op.matrix()));
        GateTensor::from_matrix(matrix).map(Some)
    }
}

impl fmt::Display for PauliString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ops.is_empty() {
            return write!(f, "I");
        }
        for (i, (qubit, op)) in self.ops.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{op}{qubit}")?;
        }
        Ok(())
    }
}

/// A single weighted Pauli term: `coeff · pauli`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PauliTerm {
    /// Complex coefficient.
    pub coeff: Complex64,
    /// The Pauli string.
    pub pauli: PauliString,
}

impl PauliTerm {
    /// Create a new term.
    pub fn new(coeff: impl Into<Complex64>, pauli: PauliString) -> Self {
        Self {
            coeff: coeff.into(),
            pauli,
        }
    }

    /// Shorthand: single-qubit Z term.
    pub fn z(qubit: usize, coeff: f64) -> Self {
        Self::new(coeff, PauliString::from_ops([(qubit, PauliOp::Z)]))
    }

    /// Shorthand: ZZ coupling term.
    pub fn zz(q0: usize, q1: usize, coeff: f64) -> Self {
        Self::new(
            coeff,
            PauliString::from_ops([(q0, PauliOp::Z), (q1, PauliOp::Z)]),
        )
    }

    /// Shorthand: single-qubit X term.
    pub fn x(qubit: usize, coeff: f64) -> Self {
        Self::new(coeff, PauliString::from_ops([(qubit, PauliOp::X)]))
    }

    /// Shorthand: coefficient times identity.
    pub fn constant(coeff: f64) -> Self {
        Self::new(coeff, PauliString::identity())
    }
}

impl fmt::Display for PauliTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.coeff.im == 0.0 {
            write!(f, "{:.8}", self.coeff.re)?;
        } else {
            write!(f, "{:.8}", self.coeff)?;
        }
        if !self.pauli.is_identity() {
            write!(f, " * {}", self.pauli)?;
        }
        Ok(())
    }
}

/// Parses `"<coeff> * X0 Z3"`, `"<coeff>"` (identity) or `"X0 Z3"`
/// (coefficient 1). The coefficient may be complex, e.g. `"0.5-0.25i"`.
impl FromStr for PauliTerm {
    type Err = IrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || IrError::InvalidPauli(s.trim().to_string());
        if s.trim().is_empty() {
            return Err(invalid());
        }
        let (coeff, operators) = match s.split_once('*') {
            Some((c, ops)) => (c.trim().parse::<Complex64>().map_err(|_| invalid())?, ops),
            None => match s.trim().parse::<Complex64>() {
                Ok(c) => (c, ""),
                Err(_) => (Complex64::new(1.0, 0.0), s),
            },
        };

        let mut ops = Vec::new();
        for token in operators.split_whitespace() {
            let mut chars = token.chars();
            let symbol = chars.next().ok_or_else(invalid)?;
            let op: PauliOp = symbol.to_string().parse()?;
            let qubit = chars.as_str().parse::<usize>().map_err(|_| invalid())?;
            ops.push((qubit, op));
        }
        if ops.is_empty() && s.contains('*') {
            return Err(invalid());
        }
        Ok(Self::new(coeff, PauliString::from_ops(ops)))
    }
}

/// A validated sum-of-Pauli-strings Hamiltonian on a fixed register.
///
/// H = Σ_k  c_k · P_k
///
/// Duplicate terms are allowed and contribute by linearity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hamiltonian {
    num_qubits: usize,
    terms: Vec<PauliTerm>,
}

impl Hamiltonian {
    /// Validate `terms` against a register of `num_qubits` qubits.
    pub fn new(terms: Vec<PauliTerm>, num_qubits: usize) -> IrResult<Self> {
        validate_register(num_qubits)?;
        for term in &terms {
            validate_targets(&term.pauli.qubits(), num_qubits, None)?;
        }
        debug!(num_qubits, num_terms = terms.len(), "built hamiltonian");
        Ok(Self { num_qubits, terms })
    }

    /// Build from three parallel sequences: per-term Pauli letters, per-term
    /// qubit indices and per-term coefficients.
    ///
    /// Identity letters are accepted and dropped. Fails on any length
    /// mismatch, out-of-range index or repeated qubit within a term.
    pub fn build<C>(
        pauli_specs: &[Vec<PauliOp>],
        qubit_indices: &[Vec<usize>],
        coefficients: &[C],
        num_qubits: usize,
    ) -> IrResult<Self>
    where
        C: Into<Complex64> + Copy,
    {
        if qubit_indices.len() != pauli_specs.len() {
            return Err(IrError::LengthMismatch {
                what: "qubit index lists",
                expected: pauli_specs.len(),
                got: qubit_indices.len(),
            });
        }
        if coefficients.len() != pauli_specs.len() {
            return Err(IrError::LengthMismatch {
                what: "coefficients",
                expected: pauli_specs.len(),
                got: coefficients.len(),
            });
        }
        validate_register(num_qubits)?;

        let mut terms = Vec::with_capacity(pauli_specs.len());
        for ((paulis, qubits), &coeff) in pauli_specs.iter().zip(qubit_indices).zip(coefficients) {
            if paulis.len() != qubits.len() {
                return Err(IrError::LengthMismatch {
                    what: "qubit indices in Pauli term",
                    expected: paulis.len(),
                    got: qubits.len(),
                });
            }
            validate_targets(qubits, num_qubits, None)?;
            let pauli = PauliString::from_ops(qubits.iter().copied().zip(paulis.iter().copied()));
            terms.push(PauliTerm::new(coeff, pauli));
        }
        Self::new(terms, num_qubits)
    }

    /// Number of qubits in the register.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// All terms.
    pub fn terms(&self) -> &[PauliTerm] {
        &self.terms
    }

    /// Number of terms.
    pub fn n_terms(&self) -> usize {
        self.terms.len()
    }

    /// True if the Hamiltonian has no terms.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Spectral norm upper bound: Σ |c_k|.
    pub fn lambda(&self) -> f64 {
        self.terms.iter().map(|t| t.coeff.norm()).sum()
    }

    /// The minimum number of qubits required to represent this Hamiltonian.
    ///
    /// Returns 0 if the Hamiltonian is empty or purely identity.
    pub fn min_qubits(&self) -> usize {
        self.terms
            .iter()
            .filter_map(|t| t.pauli.max_qubit())
            .max()
            .map_or(0, |q| q + 1)
    }

    /// True if every coefficient is real within `tol`.
    pub fn is_hermitian(&self, tol: f64) -> bool {
        self.terms.iter().all(|t| t.coeff.im.abs() <= tol)
    }
}

impl fmt::Display for Hamiltonian {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.terms.is_empty() {
            return write!(f, "0");
        }
        for (i, term) in self.terms.iter().enumerate() {
            if i > 0 {
                write!(f, " + ")?;
            }
            write!(f, "{term}")?;
        }
        Ok(())
    }
}

/// Build a Hamiltonian from three parallel sequences; see [`Hamiltonian::build`].
pub fn build_hamiltonian<C>(
    pauli_specs: &[Vec<PauliOp>],
    qubit_indices: &[Vec<usize>],
    coefficients: &[C],
    num_qubits: usize,
) -> SimResult<Hamiltonian>
where
    C: Into<Complex64> + Copy,
{
    Ok(Hamiltonian::build(pauli_specs, qubit_indices, coefficients, num_qubits)?)
}
