//! Dense statetensors and the gate contraction kernel.
//!
//! A statetensor over `n` qubits is a rank-`n` complex array with every axis
//! of length 2. Axis `q` is qubit `q`; read in row-major order, qubit 0 is
//! the most significant bit of the basis-state index.

use ndarray::{Array2, ArrayD, IxDyn};
use num_complex::Complex64;
use pqsim_ir::{GateTensor, validate_register, validate_targets};

use crate::error::{SimError, SimResult};

/// Full amplitude tensor of an `n`-qubit register.
#[derive(Debug, Clone, PartialEq)]
pub struct StateTensor {
    data: ArrayD<Complex64>,
}

impl StateTensor {
    /// The all-zero basis state `|0…0⟩`.
    pub fn zero(num_qubits: usize) -> SimResult<Self> {
        Self::basis(num_qubits, 0)
    }

    /// Computational basis state with the given row-major index.
    pub fn basis(num_qubits: usize, index: usize) -> SimResult<Self> {
        validate_register(num_qubits)?;
        let dim = 1usize << num_qubits;
        if index >= dim {
            return Err(SimError::IndexOutOfRange { index, dim });
        }
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); dim];
        amplitudes[index] = Complex64::new(1.0, 0.0);
        Self::from_amplitudes(amplitudes)
    }

    /// Wrap a `[2; n]` array.
    pub fn from_array(data: ArrayD<Complex64>) -> SimResult<Self> {
        let shape = data.shape();
        if shape.is_empty() || shape.iter().any(|&d| d != 2) {
            return Err(SimError::InvalidAmplitudes(shape.to_vec()));
        }
        validate_register(shape.len())?;
        Ok(Self {
            data: data.as_standard_layout().into_owned(),
        })
    }

    /// Build from a flat vector of `2^n` amplitudes in row-major order.
    pub fn from_amplitudes(amplitudes: Vec<Complex64>) -> SimResult<Self> {
        let len = amplitudes.len();
        if len < 2 || !len.is_power_of_two() {
            return Err(SimError::InvalidAmplitudes(vec![len]));
        }
        let num_qubits = len.trailing_zeros() as usize;
        validate_register(num_qubits)?;
        let data = ArrayD::from_shape_vec(IxDyn(&vec![2; num_qubits]), amplitudes)?;
        Ok(Self { data })
    }

    /// Number of qubits (tensor rank).
    pub fn num_qubits(&self) -> usize {
        self.data.ndim()
    }

    /// Borrow the underlying tensor.
    pub fn as_array(&self) -> &ArrayD<Complex64> {
        &self.data
    }

    /// Take the underlying tensor.
    pub fn into_array(self) -> ArrayD<Complex64> {
        self.data
    }

    /// Amplitudes flattened in row-major order.
    pub fn amplitudes(&self) -> Vec<Complex64> {
        self.data.iter().copied().collect()
    }

    /// Amplitude of one basis state, or `None` if the index is out of range.
    pub fn amplitude(&self, index: usize) -> Option<Complex64> {
        self.data
            .as_slice()
            .and_then(|s| s.get(index))
            .copied()
    }

    /// Measurement probabilities `|ψ_i|²` in row-major order.
    pub fn probabilities(&self) -> Vec<f64> {
        self.data.iter().map(Complex64::norm_sqr).collect()
    }

    /// Squared norm `⟨ψ|ψ⟩`.
    pub fn norm_sqr(&self) -> f64 {
        self.data.iter().map(Complex64::norm_sqr).sum()
    }

    /// Inner product `⟨self|other⟩`.
    pub fn inner(&self, other: &StateTensor) -> SimResult<Complex64> {
        if other.num_qubits() != self.num_qubits() {
            return Err(SimError::ShapeMismatch {
                expected: self.num_qubits(),
                got: other.num_qubits(),
            });
        }
        Ok(self
            .data
            .iter()
            .zip(other.data.iter())
            .map(|(a, b)| a.conj() * b)
            .sum())
    }

    /// Contract `gate` onto the axes named by `targets`, consuming `self`.
    ///
    /// The gate's `j`-th operand acts on axis `targets[j]`. Axes not named
    /// keep their position. Targets need not be adjacent or sorted.
    pub fn contract(self, gate: &GateTensor, targets: &[usize]) -> SimResult<Self> {
        let n = self.num_qubits();
        let k = targets.len();
        if gate.num_qubits() != k {
            return Err(SimError::ShapeMismatch {
                expected: gate.num_qubits(),
                got: k,
            });
        }
        validate_targets(targets, n, None)?;

        // targets first, remaining axes in their original order
        let mut perm: Vec<usize> = targets.to_vec();
        perm.extend((0..n).filter(|q| !targets.contains(q)));

        let moved = self.data.permuted_axes(perm.as_slice());
        let block =
            Array2::from_shape_vec((1 << k, 1 << (n - k)), moved.iter().copied().collect())?;
        let product = gate.matrix().dot(&block);
        let restored = product.into_shape_with_order(IxDyn(&vec![2; n]))?;

        let mut inverse = vec![0; n];
        for (j, &axis) in perm.iter().enumerate() {
            inverse[axis] = j;
        }
        let data = restored
            .permuted_axes(inverse.as_slice())
            .as_standard_layout()
            .into_owned();
        Ok(Self { data })
    }
}
