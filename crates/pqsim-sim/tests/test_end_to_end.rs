//! End-to-end QAOA-style cost evaluation on a 4-qubit weighted graph.

use pqsim_ir::{CircuitBuilder, CircuitDescriptor, GateGenerator, StandardGate};
use pqsim_sim::{Hamiltonian, ParameterBinding, PauliTerm, params_to_expectation_fn};

const NUM_QUBITS: usize = 4;
const LAYERS: usize = 3;
const EDGES: [(usize, usize, f64); 4] = [
    (0, 1, 0.6794174),
    (1, 2, 0.2963785),
    (0, 2, 0.2863201),
    (1, 3, 0.31746793),
];

fn hamiltonian() -> Hamiltonian {
    Hamiltonian::new(
        EDGES.iter().map(|&(i, j, w)| PauliTerm::zz(i, j, w)).collect(),
        NUM_QUBITS,
    )
    .unwrap()
}

/// H on every qubit, then `LAYERS` repetitions of a mixer with angle
/// `params[2l]` and a cost layer with angle `params[2l + 1]`.
fn ansatz() -> CircuitDescriptor {
    let mut prefix = CircuitBuilder::new(NUM_QUBITS);
    for q in 0..NUM_QUBITS {
        prefix.h(q);
    }

    let mut layer = CircuitBuilder::new(NUM_QUBITS);
    for q in 0..NUM_QUBITS {
        layer.rx(0, q);
    }
    for &(i, j, w) in &EDGES {
        layer
            .cx(i, j)
            .generator(GateGenerator::scaled(StandardGate::Rz, w), &[j], &[1])
            .cx(i, j);
    }

    let prefix = prefix.build().unwrap();
    let layers = layer.build().unwrap().repeat(LAYERS, 2);
    prefix.then(&layers).unwrap()
}

fn central_gradient(f: &impl Fn(&[f64]) -> f64, params: &[f64], h: f64) -> Vec<f64> {
    (0..params.len())
        .map(|k| {
            let mut plus = params.to_vec();
            let mut minus = params.to_vec();
            plus[k] += h;
            minus[k] -= h;
            (f(&plus) - f(&minus)) / (2.0 * h)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Structure
// ---------------------------------------------------------------------------

#[test]
fn ansatz_shape() {
    let circuit = ansatz();
    assert_eq!(circuit.num_qubits(), NUM_QUBITS);
    assert_eq!(circuit.num_params(), 2 * LAYERS);
    // 4 H + 3 * (4 Rx + 4 * 3)
    assert_eq!(circuit.len(), 4 + LAYERS * (4 + 4 * 3));
}

// ---------------------------------------------------------------------------
// Cost
// ---------------------------------------------------------------------------

#[test]
fn cost_is_zero_at_all_zero_parameters() {
    let circuit = ansatz();
    let h = hamiltonian();
    let cost = params_to_expectation_fn(&circuit, &h).unwrap();
    let value = cost(&[0.0; 2 * LAYERS]).unwrap();
    assert!(value.abs() < 1e-12, "cost at zero = {value}");
}

#[test]
fn cost_is_bounded_by_coefficient_sum() {
    let binding = ParameterBinding::new(ansatz(), hamiltonian()).unwrap();
    let bound = binding.hamiltonian().lambda();
    for seed in 0..5 {
        let params: Vec<f64> = (0..2 * LAYERS)
            .map(|k| ((seed * 7 + k) as f64 * 0.37).sin())
            .collect();
        let value = binding.expectation(&params).unwrap();
        assert!(value.abs() <= bound + 1e-9);
    }
}

#[test]
fn one_gradient_step_decreases_cost() {
    let binding = ParameterBinding::new(ansatz(), hamiltonian()).unwrap();
    let cost = |p: &[f64]| binding.expectation(p).unwrap();

    let params = [0.3, 0.7, 0.5, 0.2, 0.9, 0.4];
    let before = cost(&params);
    let grad = central_gradient(&cost, &params, 1e-6);
    let grad_norm: f64 = grad.iter().map(|g| g * g).sum::<f64>().sqrt();
    assert!(grad_norm > 1e-4, "gradient vanished: {grad:?}");

    let step = 0.01;
    let next: Vec<f64> = params.iter().zip(&grad).map(|(p, g)| p - step * g).collect();
    let after = cost(&next);
    assert!(after < before, "cost went from {before} to {after}");
}

#[test]
fn evaluation_is_deterministic() {
    let binding = ParameterBinding::new(ansatz(), hamiltonian()).unwrap();
    let params = [0.11, -0.4, 1.2, 0.05, -0.9, 0.33];
    let a = binding.statetensor(&params).unwrap();
    let b = binding.statetensor(&params).unwrap();
    assert_eq!(a, b);
    assert!((a.norm_sqr() - 1.0).abs() < 1e-9);
}
