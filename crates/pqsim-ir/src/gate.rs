//! Gate registry.
//!
//! A gate step is specified either by a registry name (`"h"`, `"cx"`,
//! `"rz"`, ...) or by a user-supplied generator that maps a slice of real
//! parameters to a unitary. Both resolve, once, into a [`Unitary`] that the
//! simulator evaluates against the parameter vector on every call.

use std::borrow::Cow;
use std::f64::consts::FRAC_1_SQRT_2;
use std::fmt;
use std::sync::Arc;

use ndarray::linalg::kron;
use ndarray::{Array2, ArrayD, array};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::tensor::GateTensor;

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);
const I: Complex64 = Complex64::new(0.0, 1.0);

fn re(v: f64) -> Complex64 {
    Complex64::new(v, 0.0)
}

/// Gates known to the registry.
///
/// Angles are in radians. Rotations follow `R_P(θ) = exp(-iθP/2)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StandardGate {
    // Single-qubit fixed gates
    /// Identity gate.
    I,
    /// Pauli-X gate.
    X,
    /// Pauli-Y gate.
    Y,
    /// Pauli-Z gate.
    Z,
    /// Hadamard gate.
    H,
    /// S gate (sqrt(Z)).
    S,
    /// S-dagger gate.
    Sdg,
    /// T gate (fourth root of Z).
    T,
    /// T-dagger gate.
    Tdg,
    /// sqrt(X) gate.
    SX,
    /// sqrt(X)-dagger gate.
    SXdg,

    // Single-qubit parameterized gates
    /// Rotation around X axis.
    Rx,
    /// Rotation around Y axis.
    Ry,
    /// Rotation around Z axis.
    Rz,
    /// Phase gate diag(1, e^{iλ}).
    P,
    /// Universal single-qubit gate U(θ, φ, λ).
    U,

    // Two-qubit gates
    /// Controlled-X (CNOT); first operand is the control.
    CX,
    /// Controlled-Y gate.
    CY,
    /// Controlled-Z gate.
    CZ,
    /// Controlled-Hadamard gate.
    CH,
    /// SWAP gate.
    Swap,
    /// iSWAP gate.
    ISwap,
    /// Controlled rotation around X.
    CRx,
    /// Controlled rotation around Y.
    CRy,
    /// Controlled rotation around Z.
    CRz,
    /// Controlled phase gate.
    CP,
    /// XX rotation gate.
    RXX,
    /// YY rotation gate.
    RYY,
    /// ZZ rotation gate.
    RZZ,

    // Three-qubit gates
    /// Toffoli gate (CCX).
    CCX,
    /// Fredkin gate (CSWAP).
    CSwap,
}

impl StandardGate {
    /// Every registered gate.
    pub const ALL: [StandardGate; 31] = [
        StandardGate::I,
        StandardGate::X,
        StandardGate::Y,
        StandardGate::Z,
        StandardGate::H,
        StandardGate::S,
        StandardGate::Sdg,
        StandardGate::T,
        StandardGate::Tdg,
        StandardGate::SX,
        StandardGate::SXdg,
        StandardGate::Rx,
        StandardGate::Ry,
        StandardGate::Rz,
        StandardGate::P,
        StandardGate::U,
        StandardGate::CX,
        StandardGate::CY,
        StandardGate::CZ,
        StandardGate::CH,
        StandardGate::Swap,
        StandardGate::ISwap,
        StandardGate::CRx,
        StandardGate::CRy,
        StandardGate::CRz,
        StandardGate::CP,
        StandardGate::RXX,
        StandardGate::RYY,
        StandardGate::RZZ,
        StandardGate::CCX,
        StandardGate::CSwap,
    ];

    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::I => "id",
            StandardGate::X => "x",
            StandardGate::Y => "y",
            StandardGate::Z => "z",
            StandardGate::H => "h",
            StandardGate::S => "s",
            StandardGate::Sdg => "sdg",
            StandardGate::T => "t",
            StandardGate::Tdg => "tdg",
            StandardGate::SX => "sx",
            StandardGate::SXdg => "sxdg",
            StandardGate::Rx => "rx",
            StandardGate::Ry => "ry",
            StandardGate::Rz => "rz",
            StandardGate::P => "p",
            StandardGate::U => "u",
            StandardGate::CX => "cx",
            StandardGate::CY => "cy",
            StandardGate::CZ => "cz",
            StandardGate::CH => "ch",
            StandardGate::Swap => "swap",
            StandardGate::ISwap => "iswap",
            StandardGate::CRx => "crx",
            StandardGate::CRy => "cry",
            StandardGate::CRz => "crz",
            StandardGate::CP => "cp",
            StandardGate::RXX => "rxx",
            StandardGate::RYY => "ryy",
            StandardGate::RZZ => "rzz",
            StandardGate::CCX => "ccx",
            StandardGate::CSwap => "cswap",
        }
    }

    /// Look a gate up by name, ignoring case.
    ///
    /// Accepts the canonical names from [`StandardGate::name`] plus common
    /// aliases (`cnot`, `v`, `vdg`, `phase`, `u1`, `u3`, `toffoli`, ...).
    pub fn from_name(name: &str) -> Option<Self> {
        let lower = name.trim().to_ascii_lowercase();
        let gate = match lower.as_str() {
            "i" | "id" => StandardGate::I,
            "cnot" => StandardGate::CX,
            "v" => StandardGate::SX,
            "vdg" => StandardGate::SXdg,
            "phase" | "u1" => StandardGate::P,
            "u3" => StandardGate::U,
            "cphase" | "cu1" => StandardGate::CP,
            "xx" => StandardGate::RXX,
            "yy" => StandardGate::RYY,
            "zz" => StandardGate::RZZ,
            "toffoli" => StandardGate::CCX,
            "fredkin" => StandardGate::CSwap,
            other => return Self::ALL.iter().copied().find(|g| g.name() == other),
        };
        Some(gate)
    }

    /// Get the number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(&self) -> usize {
        match self {
            StandardGate::I
            | StandardGate::X
            | StandardGate::Y
            | StandardGate::Z
            | StandardGate::H
            | StandardGate::S
            | StandardGate::Sdg
            | StandardGate::T
            | StandardGate::Tdg
            | StandardGate::SX
            | StandardGate::SXdg
            | StandardGate::Rx
            | StandardGate::Ry
            | StandardGate::Rz
            | StandardGate::P
            | StandardGate::U => 1,

            StandardGate::CX
            | StandardGate::CY
            | StandardGate::CZ
            | StandardGate::CH
            | StandardGate::Swap
            | StandardGate::ISwap
            | StandardGate::CRx
            | StandardGate::CRy
            | StandardGate::CRz
            | StandardGate::CP
            | StandardGate::RXX
            | StandardGate::RYY
            | StandardGate::RZZ => 2,

            StandardGate::CCX | StandardGate::CSwap => 3,
        }
    }

    /// Number of real parameters this gate takes.
    #[inline]
    pub fn num_params(&self) -> usize {
        match self {
            StandardGate::Rx
            | StandardGate::Ry
            | StandardGate::Rz
            | StandardGate::P
            | StandardGate::CRx
            | StandardGate::CRy
            | StandardGate::CRz
            | StandardGate::CP
            | StandardGate::RXX
            | StandardGate::RYY
            | StandardGate::RZZ => 1,
            StandardGate::U => 3,
            _ => 0,
        }
    }

    /// Check if this gate has parameters.
    pub fn is_parameterized(&self) -> bool {
        self.num_params() > 0
    }

    /// Unitary matrix for the given parameters.
    ///
    /// Fails with [`IrError::ParameterArityMismatch`] unless `params` holds
    /// exactly [`StandardGate::num_params`] values.
    pub fn matrix(&self, params: &[f64]) -> IrResult<Array2<Complex64>> {
        if params.len() != self.num_params() {
            return Err(IrError::ParameterArityMismatch {
                gate_name: self.name().to_string(),
                expected: self.num_params(),
                got: params.len(),
            });
        }
        Ok(self.matrix_unchecked(params))
    }

    /// Matrix for a slice already known to hold `num_params` values.
    fn matrix_unchecked(&self, params: &[f64]) -> Array2<Complex64> {
        let theta = params.first().copied().unwrap_or(0.0);
        match self {
            StandardGate::I => Array2::eye(2),
            StandardGate::X => pauli_x(),
            StandardGate::Y => pauli_y(),
            StandardGate::Z => pauli_z(),
            StandardGate::H => array![
                [re(FRAC_1_SQRT_2), re(FRAC_1_SQRT_2)],
                [re(FRAC_1_SQRT_2), re(-FRAC_1_SQRT_2)]
            ],
            StandardGate::S => phase(std::f64::consts::FRAC_PI_2),
            StandardGate::Sdg => phase(-std::f64::consts::FRAC_PI_2),
            StandardGate::T => phase(std::f64::consts::FRAC_PI_4),
            StandardGate::Tdg => phase(-std::f64::consts::FRAC_PI_4),
            StandardGate::SX => sqrt_x(),
            StandardGate::SXdg => sqrt_x().mapv(|z| z.conj()),
            StandardGate::Rx => pauli_rotation(&pauli_x(), theta),
            StandardGate::Ry => pauli_rotation(&pauli_y(), theta),
            StandardGate::Rz => pauli_rotation(&pauli_z(), theta),
            StandardGate::P => phase(theta),
            StandardGate::U => {
                let (phi, lambda) = (params[1], params[2]);
                let (c, s) = ((theta / 2.0).cos(), (theta / 2.0).sin());
                array![
                    [re(c), -Complex64::from_polar(s, lambda)],
                    [
                        Complex64::from_polar(s, phi),
                        Complex64::from_polar(c, phi + lambda)
                    ]
                ]
            }
            StandardGate::CX => controlled(&pauli_x()),
            StandardGate::CY => controlled(&pauli_y()),
            StandardGate::CZ => controlled(&pauli_z()),
            StandardGate::CH => controlled(&StandardGate::H.matrix_unchecked(&[])),
            StandardGate::Swap => array![
                [ONE, ZERO, ZERO, ZERO],
                [ZERO, ZERO, ONE, ZERO],
                [ZERO, ONE, ZERO, ZERO],
                [ZERO, ZERO, ZERO, ONE]
            ],
            StandardGate::ISwap => array![
                [ONE, ZERO, ZERO, ZERO],
                [ZERO, ZERO, I, ZERO],
                [ZERO, I, ZERO, ZERO],
                [ZERO, ZERO, ZERO, ONE]
            ],
            StandardGate::CRx => controlled(&pauli_rotation(&pauli_x(), theta)),
            StandardGate::CRy => controlled(&pauli_rotation(&pauli_y(), theta)),
            StandardGate::CRz => controlled(&pauli_rotation(&pauli_z(), theta)),
            StandardGate::CP => controlled(&phase(theta)),
            StandardGate::RXX => pauli_rotation(&kron(&pauli_x(), &pauli_x()), theta),
            StandardGate::RYY => pauli_rotation(&kron(&pauli_y(), &pauli_y()), theta),
            StandardGate::RZZ => pauli_rotation(&kron(&pauli_z(), &pauli_z()), theta),
            StandardGate::CCX => controlled(&controlled(&pauli_x())),
            StandardGate::CSwap => controlled(&StandardGate::Swap.matrix_unchecked(&[])),
        }
    }
}

impl fmt::Display for StandardGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Pauli-X matrix.
pub fn pauli_x() -> Array2<Complex64> {
    array![[ZERO, ONE], [ONE, ZERO]]
}

/// Pauli-Y matrix.
pub fn pauli_y() -> Array2<Complex64> {
    array![[ZERO, -I], [I, ZERO]]
}

/// Pauli-Z matrix.
pub fn pauli_z() -> Array2<Complex64> {
    array![[ONE, ZERO], [ZERO, -ONE]]
}

fn phase(lambda: f64) -> Array2<Complex64> {
    array![[ONE, ZERO], [ZERO, Complex64::from_polar(1.0, lambda)]]
}

fn sqrt_x() -> Array2<Complex64> {
    let p = Complex64::new(0.5, 0.5);
    let m = Complex64::new(0.5, -0.5);
    array![[p, m], [m, p]]
}

/// `exp(-iθP/2) = cos(θ/2)·I - i·sin(θ/2)·P` for an involutory `P`.
fn pauli_rotation(pauli: &Array2<Complex64>, theta: f64) -> Array2<Complex64> {
    let dim = pauli.nrows();
    let (c, s) = ((theta / 2.0).cos(), (theta / 2.0).sin());
    Array2::<Complex64>::eye(dim).mapv(|z| z * c) + pauli.mapv(|z| z * Complex64::new(0.0, -s))
}

/// Block-diagonal `|0><0| ⊗ I + |1><1| ⊗ U`.
fn controlled(u: &Array2<Complex64>) -> Array2<Complex64> {
    let dim = u.nrows();
    let mut out = Array2::<Complex64>::eye(2 * dim);
    out.slice_mut(ndarray::s![dim.., dim..]).assign(u);
    out
}

/// Signature of a user-supplied gate generator.
///
/// The returned array is either a `2^k × 2^k` matrix or a `[2; 2k]` tensor.
pub type GeneratorFn = dyn Fn(&[f64]) -> ArrayD<Complex64> + Send + Sync;

/// A named, shareable gate generator.
#[derive(Clone)]
pub struct GateGenerator {
    name: String,
    func: Arc<GeneratorFn>,
}

impl GateGenerator {
    /// Wrap a function returning a matrix or tensor.
    pub fn new(
        name: impl Into<String>,
        func: impl Fn(&[f64]) -> ArrayD<Complex64> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    /// Wrap a function returning a `2^k × 2^k` matrix.
    pub fn from_matrix_fn(
        name: impl Into<String>,
        func: impl Fn(&[f64]) -> Array2<Complex64> + Send + Sync + 'static,
    ) -> Self {
        Self::new(name, move |params| func(params).into_dyn())
    }

    /// A registry gate whose angles are multiplied by `scale`.
    ///
    /// Used for cost layers such as `Rz(w·γ)` where `w` is a fixed edge weight.
    /// Missing angles are taken as zero and surplus ones are ignored.
    pub fn scaled(gate: StandardGate, scale: f64) -> Self {
        Self::from_matrix_fn(format!("{}*{scale}", gate.name()), move |params| {
            let mut angles = vec![0.0; gate.num_params()];
            for (angle, p) in angles.iter_mut().zip(params) {
                *angle = p * scale;
            }
            gate.matrix_unchecked(&angles)
        })
    }

    /// Name used in error messages and the gate triple.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Evaluate the generator and check that it yields a `num_qubits` unitary.
    pub fn evaluate(&self, params: &[f64], num_qubits: usize) -> IrResult<GateTensor> {
        let array = (self.func)(params);
        let shape = array.shape().to_vec();
        let tensor = GateTensor::from_array(array).map_err(|_| IrError::GeneratorShape {
            gate_name: self.name.clone(),
            num_qubits,
            got: shape.clone(),
        })?;
        if tensor.num_qubits() != num_qubits {
            return Err(IrError::GeneratorShape {
                gate_name: self.name.clone(),
                num_qubits,
                got: shape,
            });
        }
        Ok(tensor)
    }
}

impl fmt::Debug for GateGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GateGenerator")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// How a circuit step names its gate.
#[derive(Debug, Clone)]
pub enum GateSpec {
    /// A registry name such as `"h"` or `"CX"`.
    Named(String),
    /// A user-supplied generator.
    Generator(GateGenerator),
}

impl GateSpec {
    /// Display name of the specification.
    pub fn name(&self) -> &str {
        match self {
            GateSpec::Named(name) => name,
            GateSpec::Generator(g) => g.name(),
        }
    }

    /// Resolve against the registry for a step with `num_targets` qubits and
    /// `num_params` parameter indices.
    pub fn resolve(&self, num_targets: usize, num_params: usize) -> IrResult<Unitary> {
        match self {
            GateSpec::Named(name) => {
                let gate = StandardGate::from_name(name)
                    .ok_or_else(|| IrError::UnknownGate(name.clone()))?;
                if gate.num_qubits() != num_targets {
                    return Err(IrError::QubitCountMismatch {
                        gate_name: gate.name().to_string(),
                        expected: gate.num_qubits(),
                        got: num_targets,
                    });
                }
                if gate.num_params() != num_params {
                    return Err(IrError::ParameterArityMismatch {
                        gate_name: gate.name().to_string(),
                        expected: gate.num_params(),
                        got: num_params,
                    });
                }
                if gate.is_parameterized() {
                    Ok(Unitary::Standard(gate))
                } else {
                    let matrix = gate.matrix(&[])?;
                    Ok(Unitary::Constant(GateTensor::from_matrix(matrix)?))
                }
            }
            GateSpec::Generator(generator) => {
                generator.evaluate(&vec![0.0; num_params], num_targets)?;
                Ok(Unitary::Generator(generator.clone()))
            }
        }
    }
}

impl From<&str> for GateSpec {
    fn from(name: &str) -> Self {
        GateSpec::Named(name.to_string())
    }
}

impl From<String> for GateSpec {
    fn from(name: String) -> Self {
        GateSpec::Named(name)
    }
}

impl From<StandardGate> for GateSpec {
    fn from(gate: StandardGate) -> Self {
        GateSpec::Named(gate.name().to_string())
    }
}

impl From<GateGenerator> for GateSpec {
    fn from(generator: GateGenerator) -> Self {
        GateSpec::Generator(generator)
    }
}

/// A resolved unitary-generating function.
#[derive(Debug, Clone)]
pub enum Unitary {
    /// Fixed gate, tensor computed once.
    Constant(GateTensor),
    /// Parameterized registry gate.
    Standard(StandardGate),
    /// User-supplied generator.
    Generator(GateGenerator),
}

impl Unitary {
    /// Gate tensor for the parameters bound to this step.
    pub fn evaluate(&self, params: &[f64], num_qubits: usize) -> IrResult<Cow<'_, GateTensor>> {
        match self {
            Unitary::Constant(tensor) => Ok(Cow::Borrowed(tensor)),
            Unitary::Standard(gate) => {
                let matrix = gate.matrix(params)?;
                Ok(Cow::Owned(GateTensor::from_matrix(matrix)?))
            }
            Unitary::Generator(generator) => {
                Ok(Cow::Owned(generator.evaluate(params, num_qubits)?))
            }
        }
    }
}
