//! Gate tensors.
//!
//! A `k`-qubit gate is stored as its `2^k × 2^k` matrix. The same data read
//! as a rank-`2k` tensor of shape `[2; 2k]` has the output index of each
//! operand first and the input indices last, which is the form contracted
//! against a statetensor.

use ndarray::{Array2, ArrayD, Ix2, IxDyn};
use num_complex::Complex64;

use crate::error::{IrError, IrResult};

/// Dense unitary acting on `k` qubits.
#[derive(Debug, Clone, PartialEq)]
pub struct GateTensor {
    matrix: Array2<Complex64>,
    num_qubits: usize,
}

impl GateTensor {
    /// Wrap a `2^k × 2^k` matrix with `k >= 1`.
    pub fn from_matrix(matrix: Array2<Complex64>) -> IrResult<Self> {
        let (rows, cols) = matrix.dim();
        if rows != cols || rows < 2 || !rows.is_power_of_two() {
            return Err(IrError::InvalidMatrixShape(vec![rows, cols]));
        }
        Ok(Self {
            num_qubits: rows.trailing_zeros() as usize,
            matrix: matrix.as_standard_layout().into_owned(),
        })
    }

    /// Accept either a `2^k × 2^k` matrix or a `[2; 2k]` tensor.
    pub fn from_array(array: ArrayD<Complex64>) -> IrResult<Self> {
        let shape = array.shape().to_vec();
        let rank = shape.len();
        let matrix = if rank == 2 {
            array
                .into_dimensionality::<Ix2>()
                .map_err(|_| IrError::InvalidMatrixShape(shape))?
        } else if rank > 2 && rank % 2 == 0 && shape.iter().all(|&d| d == 2) {
            let dim = 1usize << (rank / 2);
            let data: Vec<Complex64> = array.iter().copied().collect();
            Array2::from_shape_vec((dim, dim), data)
                .map_err(|_| IrError::InvalidMatrixShape(shape))?
        } else {
            return Err(IrError::InvalidMatrixShape(shape));
        };
        Self::from_matrix(matrix)
    }

    /// Number of qubits this gate acts on.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// The gate as a `2^k × 2^k` matrix.
    pub fn matrix(&self) -> &Array2<Complex64> {
        &self.matrix
    }

    /// The gate as a rank-`2k` tensor of shape `[2; 2k]`.
    pub fn tensor(&self) -> IrResult<ArrayD<Complex64>> {
        self.matrix
            .clone()
            .into_shape_with_order(IxDyn(&vec![2; 2 * self.num_qubits]))
            .map_err(|_| IrError::InvalidMatrixShape(self.matrix.shape().to_vec()))
    }

    /// Conjugate transpose.
    #[must_use]
    pub fn dagger(&self) -> Self {
        Self {
            matrix: self
                .matrix
                .t()
                .mapv(|z| z.conj())
                .as_standard_layout()
                .into_owned(),
            num_qubits: self.num_qubits,
        }
    }

    /// Whether `U†U` equals the identity within `tol` element-wise.
    pub fn is_unitary(&self, tol: f64) -> bool {
        let product = self.dagger().matrix.dot(&self.matrix);
        product.indexed_iter().all(|((r, c), z)| {
            let expected = if r == c { 1.0 } else { 0.0 };
            (z.re - expected).abs() <= tol && z.im.abs() <= tol
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn c(re: f64) -> Complex64 {
        Complex64::new(re, 0.0)
    }

    #[test]
    fn test_from_matrix_rejects_bad_shapes() {
        let rect = Array2::<Complex64>::zeros((2, 4));
        assert!(matches!(
            GateTensor::from_matrix(rect),
            Err(IrError::InvalidMatrixShape(_))
        ));
        let three = Array2::<Complex64>::zeros((3, 3));
        assert!(GateTensor::from_matrix(three).is_err());
    }

    #[test]
    fn test_tensor_view_matches_matrix() {
        // CX: |10> -> |11>
        let cx = array![
            [c(1.0), c(0.0), c(0.0), c(0.0)],
            [c(0.0), c(1.0), c(0.0), c(0.0)],
            [c(0.0), c(0.0), c(0.0), c(1.0)],
            [c(0.0), c(0.0), c(1.0), c(0.0)],
        ];
        let gate = GateTensor::from_matrix(cx).unwrap();
        assert_eq!(gate.num_qubits(), 2);
        let t = gate.tensor().unwrap();
        assert_eq!(t.shape(), &[2, 2, 2, 2]);
        // out (1,1) <- in (1,0)
        assert_eq!(t[IxDyn(&[1, 1, 1, 0])], c(1.0));
        assert_eq!(t[IxDyn(&[1, 0, 1, 0])], c(0.0));

        let back = GateTensor::from_array(t).unwrap();
        assert_eq!(back, gate);
    }

    #[test]
    fn test_is_unitary() {
        let h = std::f64::consts::FRAC_1_SQRT_2;
        let hadamard = GateTensor::from_matrix(array![[c(h), c(h)], [c(h), c(-h)]]).unwrap();
        assert!(hadamard.is_unitary(1e-12));

        let scaled = GateTensor::from_matrix(array![[c(2.0), c(0.0)], [c(0.0), c(1.0)]]).unwrap();
        assert!(!scaled.is_unitary(1e-12));
    }
}
