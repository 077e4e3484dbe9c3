//! Helpers shared by the command implementations.

use std::path::Path;

use anyhow::Result;
use console::style;

use crate::problem::{Problem, ProblemFile};

/// Load and validate a problem file, announcing it on stdout.
pub fn load_problem(path: &Path, quiet: bool) -> Result<Problem> {
    if !quiet {
        println!(
            "{} Loading {}",
            style("→").cyan().bold(),
            style(path.display()).green()
        );
    }
    ProblemFile::from_file(path)?.build()
}

/// Explicit parameters, or a zero vector sized to the circuit.
pub fn resolve_params(params: Option<&[f64]>, num_params: usize) -> Vec<f64> {
    match params {
        Some(p) => p.to_vec(),
        None => vec![0.0; num_params],
    }
}

/// Reject unknown `--format` values up front.
pub fn is_json_format(format: &str) -> Result<bool> {
    match format {
        "json" => Ok(true),
        "table" => Ok(false),
        other => anyhow::bail!("Unknown output format '{other}' (expected table or json)"),
    }
}
