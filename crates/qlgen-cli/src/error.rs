//! Error type for one spec's processing

use thiserror::Error;

use qlgen_render::GenerationError;
use qlgen_specs::SpecError;

/// Failure while processing a single spec; never aborts the batch
#[derive(Debug, Error)]
pub enum CliError {
    /// Loading or validating the spec failed
    #[error(transparent)]
    Spec(#[from] SpecError),

    /// Rendering or writing output failed
    #[error(transparent)]
    Generation(#[from] GenerationError),
}
