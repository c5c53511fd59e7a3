//! photocard CLI entrypoint.
//!
//! Thin wrapper over the `cli` module: parse args, dispatch to single-template
//! or directory processing, and exit with appropriate status. For programmatic
//! use, prefer the library API (`photocard::api`).

use clap::Parser;

mod cli;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = cli::CliArgs::parse();
    cli::run(args)
}
