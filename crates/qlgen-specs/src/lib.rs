#![warn(missing_docs)]

//! Extrinsic function library spec parsing and normalization
//!
//! Reads `.spec` documents describing a function library, validates them,
//! and normalizes them into a canonical model (library metadata plus an
//! ordered function table with resolved argument roles) for the render
//! stage to consume.

pub mod document;
pub mod error;
pub mod loader;
pub mod models;
pub mod roles;

pub use document::{Document, Section};
pub use error::SpecError;
pub use loader::{load_spec_file, load_spec_str, stub_from_path, LIBRARY_SECTION, SPEC_SUFFIX};
pub use models::{
    Derivative, FunctionSpec, LibraryMetadata, LibrarySpec, APIVERSION, MAXARGS,
};
pub use roles::{resolve_roles, RoleResolutionError, WILDCARD};
