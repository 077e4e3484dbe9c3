//! pqsim command-line interface.
//!
//! Loads a problem file (circuit plus Hamiltonian), binds parameter vectors
//! and reports exact or shot-sampled expectation values.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::style;

mod commands;
mod config;
mod logging;
mod problem;

use commands::{batch, check, evaluate, sample, version};
use config::Settings;

/// pqsim - parameterized quantum circuit simulation
#[derive(Parser)]
#[command(name = "pqsim")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Settings file (YAML or JSON)
    #[arg(short, long, global = true, env = "PQSIM_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a problem file and summarize it
    Check {
        /// Problem file (YAML or JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Compute the exact expectation value for one parameter vector
    Evaluate {
        /// Problem file (YAML or JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Comma-separated parameters (defaults to all zeros)
        #[arg(short, long, value_delimiter = ',', allow_hyphen_values = true)]
        params: Option<Vec<f64>>,

        /// Also print basis-state probabilities
        #[arg(long)]
        probabilities: bool,

        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Sample measurement outcomes and a shot-based expectation estimate
    Sample {
        /// Problem file (YAML or JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Comma-separated parameters (defaults to all zeros)
        #[arg(short, long, value_delimiter = ',', allow_hyphen_values = true)]
        params: Option<Vec<f64>>,

        /// Number of shots (overrides settings)
        #[arg(short, long)]
        shots: Option<usize>,

        /// RNG seed (overrides settings)
        #[arg(long)]
        seed: Option<u64>,

        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Evaluate many parameter vectors in parallel
    Batch {
        /// Problem file (YAML or JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// File holding a list of parameter vectors (YAML or JSON)
        #[arg(short = 'P', long)]
        params_file: PathBuf,

        /// Output file for JSON results (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show version information
    Version,
}

fn main() {
    let cli = Cli::parse();

    let settings = match Settings::load(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            std::process::exit(1);
        }
    };

    // Setup logging
    let level = logging::verbosity_level(cli.verbose).unwrap_or(settings.logging.level.as_str());
    let format = settings
        .tracing_format()
        .unwrap_or(logging::TracingFormat::Console);
    logging::init_tracing(level, format);

    // Execute command
    let result = match cli.command {
        Commands::Check { input, format } => check::execute(&input, &format),

        Commands::Evaluate {
            input,
            params,
            probabilities,
            format,
        } => evaluate::execute(&input, params.as_deref(), probabilities, &format),

        Commands::Sample {
            input,
            params,
            shots,
            seed,
            format,
        } => sample::execute(
            &input,
            params.as_deref(),
            shots.unwrap_or(settings.sampling.shots),
            seed.or(settings.sampling.seed),
            &format,
        ),

        Commands::Batch {
            input,
            params_file,
            output,
        } => batch::execute(&input, &params_file, output.as_deref()),

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }
}
