//! Evaluate command implementation.

use std::path::Path;

use anyhow::Result;
use console::style;
use pqsim_sim::ParameterBinding;
use serde_json::json;

use super::common::{is_json_format, load_problem, resolve_params};

/// Execute the evaluate command.
pub fn execute(
    input: &Path,
    params: Option<&[f64]>,
    show_probabilities: bool,
    format: &str,
) -> Result<()> {
    let json = is_json_format(format)?;
    let problem = load_problem(input, json)?;
    let binding = ParameterBinding::new(problem.circuit, problem.hamiltonian)?;
    let params = resolve_params(params, binding.num_params());

    let state = binding.statetensor(&params)?;
    let value = binding.expectation_of(&state)?;
    let num_qubits = state.num_qubits();

    if json {
        let mut report = json!({
            "num_qubits": num_qubits,
            "params": params,
            "expectation": value,
        });
        if show_probabilities {
            report["probabilities"] = json!(state.probabilities());
        }
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{} Evaluated {} parameters", style("✓").green().bold(), params.len());
    println!("  ⟨H⟩ = {}", style(format!("{value:.10}")).yellow().bold());

    if show_probabilities {
        println!();
        let column = num_qubits.max(5);
        println!("  {:<column$}  Probability", "State");
        for (index, p) in state.probabilities().iter().enumerate() {
            if *p > 1e-12 {
                let bits = format!("{index:0num_qubits$b}");
                println!("  {bits:<column$}  {p:.8}");
            }
        }
    }
    Ok(())
}
