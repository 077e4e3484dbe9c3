//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - parameterized quantum circuit simulation",
        style("pqsim").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  pqsim-ir   Gate registry and circuit descriptors");
    println!("  pqsim-sim  Statetensor simulator, Hamiltonians and expectation values");
    println!("  pqsim-cli  Command-line interface");
    println!();
    println!(
        "Threads:    {}",
        style(std::thread::available_parallelism().map_or(1, |n| n.get())).dim()
    );
    println!("License:    {}", style("Apache-2.0").dim());
}
