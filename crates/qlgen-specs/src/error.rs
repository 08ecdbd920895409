//! Error types for spec loading and normalization

use std::io;

use thiserror::Error;

use crate::models::MAXARGS;

/// Errors that can occur while loading a library spec
#[derive(Debug, Error)]
pub enum SpecError {
    /// The mandatory [Library] section is absent
    #[error("Library section missing in spec {0}")]
    MissingLibrarySection(String),

    /// Parse error with line information
    #[error("parse error at line {line}: {message}")]
    Parse {
        /// Line number where the error occurred (1-based)
        line: usize,
        /// Error message
        message: String,
    },

    /// An argument appears in both the exogenous and the endogenous set
    #[error("argument '{name}' of function {function} cannot be both exogenous and endogenous")]
    RoleConflict {
        /// Function whose role sets conflict
        function: String,
        /// Argument claimed by both sets
        name: String,
    },

    /// Declared arguments left uncovered after wildcard resolution
    #[error("arguments {uncovered:?} of function {function} not specified as exogenous or endogenous")]
    RoleCoverageGap {
        /// Function with the coverage gap
        function: String,
        /// Declared arguments missing from both role sets
        uncovered: Vec<String>,
    },

    /// `derivative` is neither "continuous" nor "discontinuous"
    #[error("invalid derivative value '{value}' for function {function}")]
    InvalidDerivative {
        /// Function carrying the bad value
        function: String,
        /// The offending value
        value: String,
    },

    /// More arguments declared than the supported maximum arity
    #[error("function {function} declares {count} arguments, at most {max} are supported", max = MAXARGS)]
    TooManyArguments {
        /// Function with too many arguments
        function: String,
        /// Number of declared arguments
        count: usize,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}
