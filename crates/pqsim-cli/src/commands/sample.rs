//! Sample command implementation.

use std::path::Path;

use anyhow::Result;
use console::style;
use pqsim_sim::{ParameterBinding, bitstring_counts, sample_bitstrings, sampled_expectation};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde_json::json;
use tracing::info;

use super::common::{is_json_format, load_problem, resolve_params};

/// Execute the sample command.
pub fn execute(
    input: &Path,
    params: Option<&[f64]>,
    shots: usize,
    seed: Option<u64>,
    format: &str,
) -> Result<()> {
    let json = is_json_format(format)?;
    let problem = load_problem(input, json)?;
    let binding = ParameterBinding::new(problem.circuit, problem.hamiltonian)?;
    let params = resolve_params(params, binding.num_params());

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    info!(shots, ?seed, "sampling");

    let state = binding.statetensor(&params)?;
    let exact = binding.expectation_of(&state)?;
    let outcomes = sample_bitstrings(&state, shots, &mut rng)?;
    let counts = bitstring_counts(&outcomes, state.num_qubits());
    let estimate = sampled_expectation(&state, binding.hamiltonian(), shots, &mut rng)?;

    if json {
        let report = json!({
            "shots": shots,
            "seed": seed,
            "params": params,
            "counts": counts,
            "estimate": estimate,
            "exact": exact,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{} Sampled {} shots", style("✓").green().bold(), shots);
    println!("  ⟨H⟩ estimate = {}", style(format!("{estimate:.6}")).yellow().bold());
    println!("  ⟨H⟩ exact    = {exact:.6}");
    println!();

    let mut sorted: Vec<_> = counts.into_iter().collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    let column = state.num_qubits().max(5);
    println!("  {:<column$}  {:>8}  {:>8}", "State", "Count", "Freq");
    for (bits, count) in sorted {
        let freq = count as f64 / shots as f64;
        println!("  {bits:<column$}  {count:>8}  {freq:>8.4}");
    }
    Ok(())
}
