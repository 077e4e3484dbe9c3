//! Check command implementation.

use std::path::Path;

use anyhow::Result;
use console::style;
use serde::Serialize;

use super::common::{is_json_format, load_problem};

#[derive(Serialize)]
struct Summary {
    num_qubits: usize,
    gates: usize,
    depth: usize,
    num_params: usize,
    terms: usize,
    lambda: f64,
    hermitian: bool,
    hamiltonian: String,
}

/// Execute the check command.
pub fn execute(input: &Path, format: &str) -> Result<()> {
    let json = is_json_format(format)?;
    let problem = load_problem(input, json)?;
    let circuit = &problem.circuit;
    let hamiltonian = &problem.hamiltonian;

    let summary = Summary {
        num_qubits: circuit.num_qubits(),
        gates: circuit.len(),
        depth: circuit.depth(),
        num_params: circuit.num_params(),
        terms: hamiltonian.n_terms(),
        lambda: hamiltonian.lambda(),
        hermitian: hamiltonian.is_hermitian(1e-12),
        hamiltonian: hamiltonian.to_string(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("{} Problem is valid", style("✓").green().bold());
    println!("  Qubits:      {}", summary.num_qubits);
    println!("  Gates:       {} (depth {})", summary.gates, summary.depth);
    println!("  Parameters:  {}", summary.num_params);
    println!("  Terms:       {} (λ = {:.6})", summary.terms, summary.lambda);
    println!("  H = {}", style(&summary.hamiltonian).dim());
    if !summary.hermitian {
        println!(
            "  {} Hamiltonian has complex coefficients; expectation values keep only the real part",
            style("!").yellow().bold()
        );
    }
    Ok(())
}
