//! Command Line Interface (CLI) layer.
//!
//! This module defines argument parsing (`args`), error types (`errors`),
//! and the orchestration logic (`runner`) for single-template and directory
//! flows. It wires user-provided options to `photocard::api`.
//!
//! If you are embedding the splitter into another application, prefer the
//! library API over calling the CLI code.
pub mod args;
pub mod errors;
pub mod runner;

pub use args::CliArgs;
pub use runner::run;
