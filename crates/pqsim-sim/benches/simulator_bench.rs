//! Benchmarks for statetensor evaluation
//!
//! Run with: cargo bench -p pqsim-sim

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use pqsim_ir::{CircuitBuilder, CircuitDescriptor};
use pqsim_sim::{Hamiltonian, ParameterBinding, PauliTerm, StateTensor, apply};

/// Hardware-efficient ansatz: Ry on every qubit, then a CX ladder, `layers` times.
fn ansatz(num_qubits: usize, layers: usize) -> CircuitDescriptor {
    let mut layer = CircuitBuilder::new(num_qubits);
    for q in 0..num_qubits {
        layer.ry(q, q);
    }
    for q in 0..num_qubits - 1 {
        layer.cx(q, q + 1);
    }
    layer.build().unwrap().repeat(layers, num_qubits)
}

fn ising(num_qubits: usize) -> Hamiltonian {
    let mut terms: Vec<PauliTerm> = (0..num_qubits - 1)
        .map(|q| PauliTerm::zz(q, q + 1, -1.0))
        .collect();
    terms.extend((0..num_qubits).map(|q| PauliTerm::x(q, -0.5)));
    Hamiltonian::new(terms, num_qubits).unwrap()
}

/// Benchmark a single gate contraction on registers of growing size
fn bench_contraction(c: &mut Criterion) {
    let mut group = c.benchmark_group("contraction");

    for num_qubits in &[4, 8, 12, 16] {
        let gate = CircuitBuilder::new(*num_qubits).cx(0, num_qubits - 1).build().unwrap();
        let tensor = gate.entries()[0].tensor(&[]).unwrap().into_owned();
        let targets = [0, num_qubits - 1];
        group.bench_with_input(
            BenchmarkId::new("cx_far", num_qubits),
            num_qubits,
            |b, &n| {
                b.iter(|| {
                    let psi = StateTensor::zero(n).unwrap();
                    black_box(psi.contract(&tensor, &targets).unwrap())
                });
            },
        );
    }

    group.finish();
}

/// Benchmark full circuit evaluation
fn bench_apply(c: &mut Criterion) {
    let mut group = c.benchmark_group("apply");

    for num_qubits in &[4, 8, 12] {
        let circuit = ansatz(*num_qubits, 4);
        let params: Vec<f64> = (0..circuit.num_params()).map(|k| k as f64 * 0.1).collect();
        group.bench_with_input(
            BenchmarkId::new("ansatz", num_qubits),
            &circuit,
            |b, circuit| {
                b.iter(|| black_box(apply(circuit, &params).unwrap()));
            },
        );
    }

    group.finish();
}

/// Benchmark batched expectation evaluation
fn bench_expectation_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("expectation_batch");
    let num_qubits = 8;
    let binding = ParameterBinding::new(ansatz(num_qubits, 3), ising(num_qubits)).unwrap();
    let batch: Vec<Vec<f64>> = (0..64)
        .map(|i| (0..binding.num_params()).map(|k| (i * k) as f64 * 0.01).collect())
        .collect();

    group.bench_function("ising_8q_64", |b| {
        b.iter(|| black_box(binding.expectation_batch(&batch).unwrap()));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_contraction,
    bench_apply,
    bench_expectation_batch,
);

criterion_main!(benches);
