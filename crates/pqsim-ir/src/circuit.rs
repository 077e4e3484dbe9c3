//! Circuit descriptors.
//!
//! A [`CircuitDescriptor`] is an immutable, validated sequence of gate
//! entries. It is built once and then evaluated against any number of
//! parameter vectors; nothing in it changes after construction.

use std::borrow::Cow;

use tracing::debug;

use crate::error::{IrError, IrResult};
use crate::gate::{GateGenerator, GateSpec, StandardGate, Unitary};
use crate::qubit::{validate_register, validate_targets};
use crate::tensor::GateTensor;

/// One resolved step of a circuit.
#[derive(Debug, Clone)]
pub struct GateEntry {
    name: String,
    unitary: Unitary,
    qubits: Box<[usize]>,
    params: Box<[usize]>,
}

impl GateEntry {
    /// Gate name (registry name or generator name).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Target qubits in operand order.
    pub fn qubits(&self) -> &[usize] {
        &self.qubits
    }

    /// Indices into the flat parameter vector.
    pub fn param_indices(&self) -> &[usize] {
        &self.params
    }

    /// Number of qubits the gate acts on.
    pub fn arity(&self) -> usize {
        self.qubits.len()
    }

    /// The resolved unitary-generating function.
    pub fn unitary(&self) -> &Unitary {
        &self.unitary
    }

    /// Gate tensor with this entry's parameters gathered from `params`.
    ///
    /// Fails with [`IrError::ParameterIndexOutOfRange`] if `params` is too
    /// short for one of this entry's indices.
    pub fn tensor(&self, params: &[f64]) -> IrResult<Cow<'_, GateTensor>> {
        let bound = self
            .params
            .iter()
            .map(|&index| {
                params
                    .get(index)
                    .copied()
                    .ok_or_else(|| IrError::ParameterIndexOutOfRange {
                        gate_name: self.name.clone(),
                        index,
                        len: params.len(),
                    })
            })
            .collect::<IrResult<Vec<f64>>>()?;
        self.unitary.evaluate(&bound, self.qubits.len())
    }

    fn shifted(&self, offset: usize) -> Self {
        Self {
            params: self.params.iter().map(|p| p + offset).collect(),
            ..self.clone()
        }
    }
}

/// An immutable, validated parameterized circuit.
#[derive(Debug, Clone)]
pub struct CircuitDescriptor {
    num_qubits: usize,
    entries: Vec<GateEntry>,
    num_params: usize,
}

impl CircuitDescriptor {
    /// Build and validate a circuit from three parallel sequences.
    ///
    /// `qubit_indices[i]` and `param_indices[i]` belong to `gate_specs[i]`.
    /// Fails if the sequences differ in length, a gate is unknown, a target
    /// is out of range or repeated, or a gate's arity or parameter count does
    /// not match its bindings.
    pub fn build<S: Into<GateSpec>>(
        gate_specs: impl IntoIterator<Item = S>,
        qubit_indices: &[Vec<usize>],
        param_indices: &[Vec<usize>],
        num_qubits: usize,
    ) -> IrResult<Self> {
        validate_register(num_qubits)?;
        let specs: Vec<GateSpec> = gate_specs.into_iter().map(Into::into).collect();
        if qubit_indices.len() != specs.len() {
            return Err(IrError::LengthMismatch {
                what: "qubit index lists",
                expected: specs.len(),
                got: qubit_indices.len(),
            });
        }
        if param_indices.len() != specs.len() {
            return Err(IrError::LengthMismatch {
                what: "parameter index lists",
                expected: specs.len(),
                got: param_indices.len(),
            });
        }

        let mut entries = Vec::with_capacity(specs.len());
        for ((spec, qubits), params) in specs.iter().zip(qubit_indices).zip(param_indices) {
            validate_targets(qubits, num_qubits, Some(spec.name()))?;
            let unitary = spec.resolve(qubits.len(), params.len())?;
            let name = match spec {
                GateSpec::Named(n) => {
                    StandardGate::from_name(n).map_or_else(|| n.clone(), |g| g.name().to_string())
                }
                GateSpec::Generator(g) => g.name().to_string(),
            };
            entries.push(GateEntry {
                name,
                unitary,
                qubits: qubits.as_slice().into(),
                params: params.as_slice().into(),
            });
        }

        let num_params = required_params(&entries);
        debug!(
            num_qubits,
            num_gates = entries.len(),
            num_params,
            "built circuit descriptor"
        );
        Ok(Self {
            num_qubits,
            entries,
            num_params,
        })
    }

    /// Number of qubits in the register.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Minimum parameter-vector length: highest referenced index + 1, or 0.
    pub fn num_params(&self) -> usize {
        self.num_params
    }

    /// Entries in application order.
    pub fn entries(&self) -> &[GateEntry] {
        &self.entries
    }

    /// Number of gate entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the circuit has no gates.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Circuit depth: the longest chain of gates sharing a qubit.
    pub fn depth(&self) -> usize {
        let mut layer = vec![0usize; self.num_qubits];
        for entry in &self.entries {
            let next = entry.qubits().iter().map(|&q| layer[q]).max().unwrap_or(0) + 1;
            for &q in entry.qubits() {
                layer[q] = next;
            }
        }
        layer.into_iter().max().unwrap_or(0)
    }

    /// The `(gate names, qubit indices, parameter indices)` triple, as handed
    /// to external circuit printers.
    pub fn gate_triple(&self) -> (Vec<String>, Vec<Vec<usize>>, Vec<Vec<usize>>) {
        let names = self.entries.iter().map(|e| e.name.clone()).collect();
        let qubits = self.entries.iter().map(|e| e.qubits.to_vec()).collect();
        let params = self.entries.iter().map(|e| e.params.to_vec()).collect();
        (names, qubits, params)
    }

    /// Repeat this circuit `reps` times, shifting every parameter index by
    /// `param_stride` on each repetition.
    ///
    /// With `param_stride == 0` all repetitions share the same parameters.
    #[must_use]
    pub fn repeat(&self, reps: usize, param_stride: usize) -> Self {
        let entries: Vec<GateEntry> = (0..reps)
            .flat_map(|r| self.entries.iter().map(move |e| e.shifted(r * param_stride)))
            .collect();
        Self {
            num_qubits: self.num_qubits,
            num_params: required_params(&entries),
            entries,
        }
    }

    /// Append `other` after this circuit. Both must span the same register.
    pub fn then(&self, other: &CircuitDescriptor) -> IrResult<Self> {
        if other.num_qubits != self.num_qubits {
            return Err(IrError::LengthMismatch {
                what: "qubits in appended circuit",
                expected: self.num_qubits,
                got: other.num_qubits,
            });
        }
        let entries: Vec<GateEntry> = self.entries.iter().chain(&other.entries).cloned().collect();
        Ok(Self {
            num_qubits: self.num_qubits,
            num_params: required_params(&entries),
            entries,
        })
    }
}

fn required_params(entries: &[GateEntry]) -> usize {
    entries
        .iter()
        .flat_map(|e| e.params.iter())
        .max()
        .map_or(0, |&p| p + 1)
}

/// Build a circuit from three parallel sequences; see [`CircuitDescriptor::build`].
pub fn build_circuit<S: Into<GateSpec>>(
    gate_specs: impl IntoIterator<Item = S>,
    qubit_indices: &[Vec<usize>],
    param_indices: &[Vec<usize>],
    num_qubits: usize,
) -> IrResult<CircuitDescriptor> {
    CircuitDescriptor::build(gate_specs, qubit_indices, param_indices, num_qubits)
}

/// Chained builder that collects gate steps and validates them in
/// [`CircuitBuilder::build`].
///
/// ```rust
/// use pqsim_ir::CircuitBuilder;
///
/// let mut builder = CircuitBuilder::new(2);
/// builder.h(0).cx(0, 1).rz(0, 1);
/// let circuit = builder.build().unwrap();
/// assert_eq!(circuit.len(), 3);
/// assert_eq!(circuit.num_params(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct CircuitBuilder {
    num_qubits: usize,
    specs: Vec<GateSpec>,
    qubits: Vec<Vec<usize>>,
    params: Vec<Vec<usize>>,
}

impl CircuitBuilder {
    /// Create an empty builder for `num_qubits` qubits.
    pub fn new(num_qubits: usize) -> Self {
        Self {
            num_qubits,
            specs: vec![],
            qubits: vec![],
            params: vec![],
        }
    }

    /// Append any gate.
    pub fn gate(
        &mut self,
        spec: impl Into<GateSpec>,
        qubits: &[usize],
        params: &[usize],
    ) -> &mut Self {
        self.specs.push(spec.into());
        self.qubits.push(qubits.to_vec());
        self.params.push(params.to_vec());
        self
    }

    /// Append a generator gate.
    pub fn generator(
        &mut self,
        generator: GateGenerator,
        qubits: &[usize],
        params: &[usize],
    ) -> &mut Self {
        self.gate(generator, qubits, params)
    }

    // =========================================================================
    // Registry shorthands
    // =========================================================================

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: usize) -> &mut Self {
        self.gate(StandardGate::H, &[qubit], &[])
    }

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: usize) -> &mut Self {
        self.gate(StandardGate::X, &[qubit], &[])
    }

    /// Apply Pauli-Y gate.
    pub fn y(&mut self, qubit: usize) -> &mut Self {
        self.gate(StandardGate::Y, &[qubit], &[])
    }

    /// Apply Pauli-Z gate.
    pub fn z(&mut self, qubit: usize) -> &mut Self {
        self.gate(StandardGate::Z, &[qubit], &[])
    }

    /// Apply Rx with the angle at `param`.
    pub fn rx(&mut self, param: usize, qubit: usize) -> &mut Self {
        self.gate(StandardGate::Rx, &[qubit], &[param])
    }

    /// Apply Ry with the angle at `param`.
    pub fn ry(&mut self, param: usize, qubit: usize) -> &mut Self {
        self.gate(StandardGate::Ry, &[qubit], &[param])
    }

    /// Apply Rz with the angle at `param`.
    pub fn rz(&mut self, param: usize, qubit: usize) -> &mut Self {
        self.gate(StandardGate::Rz, &[qubit], &[param])
    }

    /// Apply CX with `control` as the first operand.
    pub fn cx(&mut self, control: usize, target: usize) -> &mut Self {
        self.gate(StandardGate::CX, &[control, target], &[])
    }

    /// Apply CZ.
    pub fn cz(&mut self, control: usize, target: usize) -> &mut Self {
        self.gate(StandardGate::CZ, &[control, target], &[])
    }

    /// Apply SWAP.
    pub fn swap(&mut self, q1: usize, q2: usize) -> &mut Self {
        self.gate(StandardGate::Swap, &[q1, q2], &[])
    }

    /// Validate and build the descriptor.
    pub fn build(&self) -> IrResult<CircuitDescriptor> {
        CircuitDescriptor::build(self.specs.clone(), &self.qubits, &self.params, self.num_qubits)
    }
}
