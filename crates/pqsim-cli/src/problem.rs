//! Problem files: a circuit and the Hamiltonian it is scored against.
//!
//! ```yaml
//! num_qubits: 2
//! prepare:
//!   - { gate: h, qubits: [0] }
//!   - { gate: h, qubits: [1] }
//! circuit:
//!   - { gate: rx, qubits: [0], params: [0] }
//!   - { gate: cx, qubits: [0, 1] }
//!   - { gate: rz, qubits: [1], params: [1], scale: 0.5 }
//!   - { gate: cx, qubits: [0, 1] }
//! repeat: { reps: 3, param_stride: 2 }
//! hamiltonian:
//!   - "0.5 * Z0 Z1"
//!   - { paulis: "X", qubits: [1], coefficient: -0.25 }
//!   - { paulis: "Y", qubits: [0], coefficient: { re: 0.1, im: 0.0 } }
//! ```
//!
//! `prepare` runs once; `circuit` is repeated `repeat.reps` times with its
//! parameter indices shifted by `param_stride` on each repetition.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use num_complex::Complex64;
use pqsim_ir::{CircuitDescriptor, GateGenerator, GateSpec, StandardGate};
use pqsim_sim::{Hamiltonian, PauliOp, PauliTerm, build_hamiltonian};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::is_json;

/// On-disk problem description.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProblemFile {
    /// Register size.
    pub num_qubits: usize,

    /// Steps applied once, before the repeated body.
    #[serde(default)]
    pub prepare: Vec<GateStep>,

    /// Circuit body.
    #[serde(default)]
    pub circuit: Vec<GateStep>,

    /// Optional repetition of the body.
    #[serde(default)]
    pub repeat: Option<RepeatSpec>,

    /// Hamiltonian terms.
    #[serde(default)]
    pub hamiltonian: Vec<TermSpec>,
}

/// One gate application.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GateStep {
    /// Registry gate name.
    pub gate: String,
    /// Target qubits in operand order.
    pub qubits: Vec<usize>,
    /// Parameter-vector indices.
    #[serde(default)]
    pub params: Vec<usize>,
    /// Fixed multiplier on a one-parameter gate's angle.
    #[serde(default)]
    pub scale: Option<f64>,
}

/// Repetition of the circuit body.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RepeatSpec {
    /// Number of repetitions.
    pub reps: usize,
    /// Parameter-index shift per repetition.
    #[serde(default)]
    pub param_stride: usize,
}

/// A Hamiltonian term, either as an expression or as explicit fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TermSpec {
    /// `"0.5 * Z0 Z1"`
    Expr(String),
    /// Explicit Pauli letters, qubits and coefficient.
    Fields {
        /// One letter per qubit, e.g. `"ZZ"`.
        paulis: String,
        /// Qubit for each letter.
        qubits: Vec<usize>,
        /// Real or complex weight.
        coefficient: Coefficient,
    },
}

/// A real number or `{re, im}`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Coefficient {
    /// Real weight.
    Real(f64),
    /// Complex weight.
    Complex {
        /// Real part.
        re: f64,
        /// Imaginary part.
        #[serde(default)]
        im: f64,
    },
}

impl From<Coefficient> for Complex64 {
    fn from(c: Coefficient) -> Self {
        match c {
            Coefficient::Real(re) => Complex64::new(re, 0.0),
            Coefficient::Complex { re, im } => Complex64::new(re, im),
        }
    }
}

/// Validated descriptors built from a [`ProblemFile`].
#[derive(Debug, Clone)]
pub struct Problem {
    pub circuit: CircuitDescriptor,
    pub hamiltonian: Hamiltonian,
}

impl ProblemFile {
    /// Read a problem file; `.json` is parsed as JSON, anything else as YAML.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            bail!("File not found: {}", path.display());
        }
        let source = fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;

        if is_json(path) {
            serde_json::from_str(&source)
                .with_context(|| format!("Invalid JSON problem file: {}", path.display()))
        } else {
            serde_yaml_ng::from_str(&source)
                .with_context(|| format!("Invalid YAML problem file: {}", path.display()))
        }
    }

    /// Build and validate the circuit and Hamiltonian.
    pub fn build(&self) -> Result<Problem> {
        let prepare = build_steps(&self.prepare, self.num_qubits).context("in `prepare`")?;
        let mut body = build_steps(&self.circuit, self.num_qubits).context("in `circuit`")?;
        if let Some(repeat) = self.repeat {
            body = body.repeat(repeat.reps, repeat.param_stride);
        }
        let circuit = prepare.then(&body)?;

        let mut paulis = Vec::with_capacity(self.hamiltonian.len());
        let mut qubits = Vec::with_capacity(self.hamiltonian.len());
        let mut coefficients = Vec::with_capacity(self.hamiltonian.len());
        for (i, term) in self.hamiltonian.iter().enumerate() {
            let (p, q, c) = term
                .to_parts()
                .with_context(|| format!("in Hamiltonian term {i}"))?;
            paulis.push(p);
            qubits.push(q);
            coefficients.push(c);
        }
        let hamiltonian = build_hamiltonian(&paulis, &qubits, &coefficients, self.num_qubits)?;

        info!(
            num_qubits = self.num_qubits,
            gates = circuit.len(),
            params = circuit.num_params(),
            terms = hamiltonian.n_terms(),
            "loaded problem"
        );
        Ok(Problem {
            circuit,
            hamiltonian,
        })
    }
}

impl TermSpec {
    fn to_parts(&self) -> Result<(Vec<PauliOp>, Vec<usize>, Complex64)> {
        match self {
            TermSpec::Expr(expr) => {
                let term: PauliTerm = expr.parse()?;
                let (qubits, ops) = term.pauli.ops().iter().copied().unzip();
                Ok((ops, qubits, term.coeff))
            }
            TermSpec::Fields {
                paulis,
                qubits,
                coefficient,
            } => {
                let ops = paulis
                    .chars()
                    .filter(|c| !c.is_whitespace())
                    .map(|c| c.to_string().parse::<PauliOp>())
                    .collect::<Result<Vec<_>, _>>()?;
                Ok((ops, qubits.clone(), (*coefficient).into()))
            }
        }
    }
}

fn build_steps(steps: &[GateStep], num_qubits: usize) -> Result<CircuitDescriptor> {
    let specs = steps.iter().map(GateStep::spec).collect::<Result<Vec<_>>>()?;
    let qubits: Vec<Vec<usize>> = steps.iter().map(|s| s.qubits.clone()).collect();
    let params: Vec<Vec<usize>> = steps.iter().map(|s| s.params.clone()).collect();
    Ok(CircuitDescriptor::build(specs, &qubits, &params, num_qubits)?)
}

impl GateStep {
    fn spec(&self) -> Result<GateSpec> {
        let Some(scale) = self.scale else {
            return Ok(GateSpec::from(self.gate.as_str()));
        };
        match StandardGate::from_name(&self.gate) {
            Some(gate) if gate.num_params() == 1 && self.params.len() == 1 => {
                Ok(GateGenerator::scaled(gate, scale).into())
            }
            Some(gate) if gate.num_params() == 1 => bail!(
                "Gate '{gate}' takes 1 parameter, got {}",
                self.params.len()
            ),
            Some(gate) => bail!(
                "`scale` needs a one-parameter gate, '{gate}' takes {}",
                gate.num_params()
            ),
            None => bail!("Unknown gate '{}'", self.gate),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QAOA: &str = r#"
num_qubits: 3
prepare:
  - { gate: h, qubits: [0] }
  - { gate: h, qubits: [1] }
  - { gate: h, qubits: [2] }
circuit:
  - { gate: rx, qubits: [0], params: [0] }
  - { gate: rx, qubits: [1], params: [0] }
  - { gate: rx, qubits: [2], params: [0] }
  - { gate: cx, qubits: [0, 2] }
  - { gate: rz, qubits: [2], params: [1], scale: 0.75 }
  - { gate: cx, qubits: [0, 2] }
repeat: { reps: 2, param_stride: 2 }
hamiltonian:
  - "0.75 * Z0 Z2"
  - { paulis: "ZZ", qubits: [0, 1], coefficient: 0.5 }
  - { paulis: "X", qubits: [1], coefficient: { re: -0.2 } }
"#;

    #[test]
    fn test_yaml_problem_builds() {
        let file: ProblemFile = serde_yaml_ng::from_str(QAOA).unwrap();
        let problem = file.build().unwrap();
        assert_eq!(problem.circuit.num_qubits(), 3);
        assert_eq!(problem.circuit.len(), 3 + 2 * 6);
        assert_eq!(problem.circuit.num_params(), 4);
        assert_eq!(problem.hamiltonian.n_terms(), 3);
        assert_eq!(
            problem.hamiltonian.terms()[2].coeff,
            Complex64::new(-0.2, 0.0)
        );
        let (names, _, _) = problem.circuit.gate_triple();
        assert_eq!(names[7], "rz*0.75");
    }

    #[test]
    fn test_json_problem_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bell.json");
        std::fs::write(
            &path,
            r#"{
                "num_qubits": 2,
                "circuit": [
                    {"gate": "h", "qubits": [0]},
                    {"gate": "cx", "qubits": [0, 1]}
                ],
                "hamiltonian": ["Z0 Z1"]
            }"#,
        )
        .unwrap();
        let problem = ProblemFile::from_file(&path).unwrap().build().unwrap();
        assert_eq!(problem.circuit.num_params(), 0);
        assert_eq!(problem.hamiltonian.n_terms(), 1);
    }

    #[test]
    fn test_scale_on_fixed_gate_is_rejected() {
        let file: ProblemFile = serde_yaml_ng::from_str(
            "num_qubits: 1\ncircuit:\n  - { gate: h, qubits: [0], scale: 2.0 }\n",
        )
        .unwrap();
        let err = file.build().unwrap_err();
        assert!(format!("{err:#}").contains("one-parameter"));
    }

    #[test]
    fn test_invalid_gate_reports_context() {
        let file: ProblemFile = serde_yaml_ng::from_str(
            "num_qubits: 2\ncircuit:\n  - { gate: cx, qubits: [0, 2] }\n",
        )
        .unwrap();
        let err = file.build().unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("in `circuit`"), "{msg}");
        assert!(msg.contains("Qubit 2"), "{msg}");
    }

    #[test]
    fn test_scaled_gate_needs_one_param() {
        let file: ProblemFile = serde_yaml_ng::from_str(
            "num_qubits: 1\ncircuit:\n  - { gate: rz, qubits: [0], scale: 2.0 }\n",
        )
        .unwrap();
        assert!(file.build().is_err());
    }

    #[test]
    fn test_bad_pauli_letter() {
        let file: ProblemFile = serde_yaml_ng::from_str(
            "num_qubits: 1\nhamiltonian:\n  - { paulis: \"Q\", qubits: [0], coefficient: 1.0 }\n",
        )
        .unwrap();
        assert!(file.build().is_err());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let parsed: Result<ProblemFile, _> =
            serde_yaml_ng::from_str("num_qubits: 1\ncircut: []\n");
        assert!(parsed.is_err());
    }
}
