//! Tests for circuit evaluation on statetensors.

use num_complex::Complex64;
use pqsim_ir::{CircuitBuilder, CircuitDescriptor, GateGenerator, StandardGate, build_circuit};
use pqsim_sim::{SimError, StateTensor, apply, params_to_statetensor};
use proptest::prelude::*;

fn max_diff(a: &StateTensor, b: &StateTensor) -> f64 {
    a.amplitudes()
        .iter()
        .zip(b.amplitudes().iter())
        .map(|(x, y)| (x - y).norm())
        .fold(0.0, f64::max)
}

// ---------------------------------------------------------------------------
// Gate order and operand order
// ---------------------------------------------------------------------------

#[test]
fn swapping_non_commuting_gates_changes_state() {
    let hz = CircuitBuilder::new(1).h(0).rz(0, 0).build().unwrap();
    let zh = CircuitBuilder::new(1).rz(0, 0).h(0).build().unwrap();
    let a = apply(&hz, &[0.9]).unwrap();
    let b = apply(&zh, &[0.9]).unwrap();
    assert!(max_diff(&a, &b) > 1e-3);
}

#[test]
fn controlled_gate_operand_order_matters() {
    let forward = CircuitBuilder::new(2).x(0).cx(0, 1).build().unwrap();
    let reverse = CircuitBuilder::new(2).x(0).cx(1, 0).build().unwrap();
    let f = apply(&forward, &[]).unwrap();
    let r = apply(&reverse, &[]).unwrap();
    assert_eq!(f.amplitude(0b11), Some(Complex64::new(1.0, 0.0)));
    assert_eq!(r.amplitude(0b10), Some(Complex64::new(1.0, 0.0)));
}

#[test]
fn non_adjacent_pairs_are_supported() {
    let circuit = CircuitBuilder::new(4).x(3).cx(3, 0).swap(0, 2).build().unwrap();
    let psi = apply(&circuit, &[]).unwrap();
    // |0001> -> |1001> -> |0011>
    assert_eq!(psi.amplitude(0b0011), Some(Complex64::new(1.0, 0.0)));
}

#[test]
fn three_qubit_gate_on_scattered_targets() {
    let circuit = build_circuit(
        ["x", "x", "ccx"],
        &[vec![4], vec![0], vec![4, 0, 2]],
        &[vec![], vec![], vec![]],
        5,
    )
    .unwrap();
    let psi = apply(&circuit, &[]).unwrap();
    assert!((psi.probabilities()[0b10101] - 1.0).abs() < 1e-12);
}

// ---------------------------------------------------------------------------
// Parameters
// ---------------------------------------------------------------------------

#[test]
fn rotation_at_zero_is_identity() {
    let with = CircuitBuilder::new(2).h(0).cx(0, 1).ry(0, 1).build().unwrap();
    let without = CircuitBuilder::new(2).h(0).cx(0, 1).build().unwrap();
    let a = params_to_statetensor(&with, &[0.0]).unwrap();
    let b = params_to_statetensor(&without, &[]).unwrap();
    assert!(max_diff(&a, &b) < 1e-12);
}

#[test]
fn shared_parameter_feeds_every_reference() {
    let circuit = CircuitBuilder::new(2).ry(0, 0).ry(0, 1).build().unwrap();
    let psi = apply(&circuit, &[std::f64::consts::PI]).unwrap();
    assert!((psi.probabilities()[0b11] - 1.0).abs() < 1e-12);
}

#[test]
fn parameter_count_checked_before_work() {
    let circuit = CircuitBuilder::new(2).rx(0, 0).rz(3, 1).build().unwrap();
    let err = apply(&circuit, &[0.1, 0.2, 0.3]).unwrap_err();
    assert!(matches!(err, SimError::ParameterCount { required: 4, got: 3 }));
    assert!(!err.is_validation());
}

#[test]
fn generator_misbehaving_at_evaluation_is_a_validation_error() {
    // Well-formed when probed with zeros, wrong size for any other angle.
    let flaky = GateGenerator::new("flaky", |params: &[f64]| {
        if params[0] == 0.0 {
            StandardGate::Rx.matrix(params).unwrap().into_dyn()
        } else {
            StandardGate::CX.matrix(&[]).unwrap().into_dyn()
        }
    });
    let circuit = CircuitBuilder::new(1)
        .generator(flaky, &[0], &[0])
        .build()
        .unwrap();
    assert!(apply(&circuit, &[0.0]).is_ok());
    let err = apply(&circuit, &[0.5]).unwrap_err();
    assert!(err.is_validation());
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
enum Step {
    Named(&'static str, usize),
    Rotation(&'static str, usize, usize),
    Pair(&'static str, usize, usize),
}

fn arb_circuit() -> impl Strategy<Value = (CircuitDescriptor, Vec<f64>)> {
    (1_usize..=6).prop_flat_map(|n| {
        let one = prop_oneof![Just("h"), Just("x"), Just("s"), Just("t"), Just("sx")];
        let rot = prop_oneof![Just("rx"), Just("ry"), Just("rz"), Just("p")];
        let two = prop_oneof![Just("cx"), Just("cz"), Just("swap"), Just("iswap"), Just("ch")];
        let step = prop_oneof![
            (one, 0..n).prop_map(|(g, q)| Step::Named(g, q)),
            (rot, 0..n, 0_usize..4).prop_map(|(g, q, p)| Step::Rotation(g, q, p)),
            (two, 0..n, 0..n).prop_map(|(g, a, b)| Step::Pair(g, a, b)),
        ];
        (
            Just(n),
            prop::collection::vec(step, 0..=20),
            prop::collection::vec(-3.2_f64..3.2, 4),
        )
            .prop_map(|(n, steps, params)| {
                let mut builder = CircuitBuilder::new(n);
                for step in steps {
                    match step {
                        Step::Named(g, q) => {
                            builder.gate(g, &[q], &[]);
                        }
                        Step::Rotation(g, q, p) => {
                            builder.gate(g, &[q], &[p]);
                        }
                        Step::Pair(g, a, b) if a != b => {
                            builder.gate(g, &[a, b], &[]);
                        }
                        Step::Pair(..) => {}
                    }
                }
                (builder.build().unwrap(), params)
            })
    })
}

proptest! {
    #[test]
    fn norm_is_conserved((circuit, params) in arb_circuit()) {
        let psi = apply(&circuit, &params).unwrap();
        prop_assert!((psi.norm_sqr() - 1.0).abs() < 1e-9, "norm² = {}", psi.norm_sqr());
    }

    #[test]
    fn identical_builds_give_identical_states((circuit, params) in arb_circuit()) {
        let (names, qubits, param_indices) = circuit.gate_triple();
        let rebuilt = build_circuit(names, &qubits, &param_indices, circuit.num_qubits()).unwrap();
        let a = apply(&circuit, &params).unwrap();
        let b = apply(&rebuilt, &params).unwrap();
        prop_assert_eq!(a, b);
    }
}
