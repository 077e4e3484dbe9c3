//! pqsim Circuit Descriptors
//!
//! This crate holds the static half of the simulator: the gate registry, the
//! dense gate tensors it produces, and the immutable circuit descriptors that
//! the `pqsim-sim` crate evaluates.
//!
//! # Core Components
//!
//! - **Gates**: [`StandardGate`] for the built-in registry, [`GateGenerator`]
//!   for caller-supplied parameterized unitaries
//! - **Tensors**: [`GateTensor`] wrapping a `2^k × 2^k` unitary
//! - **Circuits**: [`CircuitDescriptor`] built from parallel gate, qubit and
//!   parameter-index sequences, or incrementally with [`CircuitBuilder`]
//!
//! # Example: Bell pair with a trailing rotation
//!
//! ```rust
//! use pqsim_ir::build_circuit;
//!
//! let circuit = build_circuit(
//!     ["H", "CX", "Rz"],
//!     &[vec![0], vec![0, 1], vec![1]],
//!     &[vec![], vec![], vec![0]],
//!     2,
//! )
//! .unwrap();
//!
//! assert_eq!(circuit.num_params(), 1);
//! assert_eq!(circuit.depth(), 3);
//! ```
//!
//! # Conventions
//!
//! Qubit 0 is the most significant bit of a basis-state index and the first
//! axis of a statetensor. Multi-qubit gates act on their operands in the
//! order given, so for `CX` the first operand is the control. Rotation angles
//! are in radians: `Rx(θ) = exp(-iθX/2)`.
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Params | Description |
//! |------|--------|--------|-------------|
//! | `id`, `x`, `y`, `z`, `h` | 1 | 0 | Identity, Paulis, Hadamard |
//! | `s`, `sdg`, `t`, `tdg`, `sx`, `sxdg` | 1 | 0 | Phase and root-of-X gates |
//! | `rx`, `ry`, `rz`, `p` | 1 | 1 | Rotations and phase |
//! | `u` | 1 | 3 | Universal single-qubit gate U(θ,φ,λ) |
//! | `cx`, `cy`, `cz`, `ch` | 2 | 0 | Controlled gates |
//! | `swap`, `iswap` | 2 | 0 | Swaps |
//! | `crx`, `cry`, `crz`, `cp` | 2 | 1 | Controlled rotations |
//! | `rxx`, `ryy`, `rzz` | 2 | 1 | Two-qubit Pauli rotations |
//! | `ccx`, `cswap` | 3 | 0 | Toffoli and Fredkin |

pub mod circuit;
pub mod error;
pub mod gate;
pub mod qubit;
pub mod tensor;

pub use circuit::{CircuitBuilder, CircuitDescriptor, GateEntry, build_circuit};
pub use error::{IrError, IrResult};
pub use gate::{GateGenerator, GateSpec, GeneratorFn, StandardGate, Unitary};
pub use qubit::{MAX_QUBITS, validate_register, validate_targets};
pub use tensor::GateTensor;
