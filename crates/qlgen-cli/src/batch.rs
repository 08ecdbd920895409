//! Batch processing with per-spec isolation
//!
//! Each spec is processed completely before the next begins; a failing spec
//! is recorded in its outcome and never aborts the batch. Outcomes come back
//! as a results collection so the caller decides how to report them.

use std::path::{Path, PathBuf};

use tracing::warn;

use qlgen_render::{Dispatcher, DispatcherConfig, RenderedFile};
use qlgen_specs::{load_spec_file, SPEC_SUFFIX};

use crate::error::CliError;

/// Result of processing one spec file
#[derive(Debug)]
pub struct SpecOutcome {
    /// The spec file this outcome belongs to
    pub path: PathBuf,
    /// Rendered files, or the failure that abandoned this spec
    pub result: Result<Vec<RenderedFile>, CliError>,
}

/// Find every spec file in the current working directory
pub fn discover_specs() -> Result<Vec<PathBuf>, glob::PatternError> {
    let pattern = format!("*{SPEC_SUFFIX}");
    let mut specs = Vec::new();
    for entry in glob::glob(&pattern)? {
        match entry {
            Ok(path) => specs.push(path),
            Err(err) => warn!(%err, "skipping unreadable directory entry"),
        }
    }
    Ok(specs)
}

/// Process every spec, continuing past failures.
///
/// Dispatcher construction (template registration) is the only error that
/// propagates; it is independent of any particular spec.
pub fn run_batch(
    paths: &[PathBuf],
    config: DispatcherConfig,
) -> Result<Vec<SpecOutcome>, qlgen_render::GenerationError> {
    let dispatcher = Dispatcher::with_config(config)?;
    Ok(paths
        .iter()
        .map(|path| SpecOutcome {
            path: path.clone(),
            result: process_spec(&dispatcher, path),
        })
        .collect())
}

fn process_spec(dispatcher: &Dispatcher, path: &Path) -> Result<Vec<RenderedFile>, CliError> {
    let spec = load_spec_file(path)?;
    Ok(dispatcher.dispatch(&spec)?)
}
