//! Error types for rendering and dispatch

use thiserror::Error;

/// Errors that can occur while rendering and writing output files
#[derive(Debug, Error)]
pub enum GenerationError {
    /// A template failed to compile at registration time
    #[error("template error: {0}")]
    TemplateError(#[from] handlebars::TemplateError),

    /// Rendering a registered template failed
    #[error("render error: {0}")]
    RenderError(#[from] handlebars::RenderError),

    /// IO error while writing an output file
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
