//! Batch command implementation.
//!
//! Parameter vectors are evaluated in chunks so the progress bar advances
//! while the simulator fans each chunk out across the rayon pool.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use pqsim_sim::ParameterBinding;

use super::common::load_problem;
use crate::config::is_json;

const CHUNK_SIZE: usize = 64;

/// Execute the batch command.
pub fn execute(input: &Path, params_file: &Path, output: Option<&Path>) -> Result<()> {
    let to_stdout = output.is_none();
    let problem = load_problem(input, to_stdout)?;
    let binding = ParameterBinding::new(problem.circuit, problem.hamiltonian)?;
    let batch = load_batch(params_file)?;
    if batch.is_empty() {
        bail!("No parameter vectors in {}", params_file.display());
    }

    let progress = ProgressBar::new(batch.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.cyan} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
            .context("invalid progress template")?
            .progress_chars("=> "),
    );
    progress.set_message("evaluating");

    let mut values = Vec::with_capacity(batch.len());
    for (i, chunk) in batch.chunks(CHUNK_SIZE).enumerate() {
        let chunk_values = binding
            .expectation_batch(chunk)
            .with_context(|| format!("in parameter vectors starting at {}", i * CHUNK_SIZE))?;
        values.extend(chunk_values);
        progress.inc(chunk.len() as u64);
    }
    progress.finish_and_clear();

    let rendered = serde_json::to_string_pretty(&values)?;
    match output {
        Some(path) => {
            fs::write(path, rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!(
                "{} Evaluated {} parameter vectors",
                style("✓").green().bold(),
                values.len()
            );
            println!("  Output: {}", style(path.display()).green());
        }
        None => println!("{rendered}"),
    }
    Ok(())
}

/// Read a list of parameter vectors from YAML or JSON.
fn load_batch(path: &Path) -> Result<Vec<Vec<f64>>> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    if is_json(path) {
        serde_json::from_str(&source)
            .with_context(|| format!("Invalid JSON parameter file: {}", path.display()))
    } else {
        serde_yaml_ng::from_str(&source)
            .with_context(|| format!("Invalid YAML parameter file: {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_batch_yaml_and_json() {
        let dir = tempfile::tempdir().unwrap();
        let yaml = dir.path().join("params.yaml");
        fs::write(&yaml, "- [0.1, 0.2]\n- [0.3, -0.4]\n").unwrap();
        assert_eq!(load_batch(&yaml).unwrap(), vec![vec![0.1, 0.2], vec![0.3, -0.4]]);

        let json = dir.path().join("params.json");
        fs::write(&json, "[[1.5], [2.5]]").unwrap();
        assert_eq!(load_batch(&json).unwrap(), vec![vec![1.5], vec![2.5]]);
    }

    #[test]
    fn test_load_batch_rejects_scalars() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("params.json");
        fs::write(&path, "[1.0, 2.0]").unwrap();
        assert!(load_batch(&path).is_err());
    }
}
