#![warn(missing_docs)]

//! qlgen command-line interface
//!
//! Drives the load -> normalize -> render -> write pipeline over a batch of
//! spec files, with per-spec failure isolation and human diagnostics.

pub mod batch;
pub mod cli;
pub mod error;
pub mod logging;
pub mod output;

pub use batch::{discover_specs, run_batch, SpecOutcome};
pub use cli::Cli;
pub use error::CliError;
pub use output::OutputStyle;
