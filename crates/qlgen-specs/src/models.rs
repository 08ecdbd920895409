//! Canonical in-memory model for library specs
//!
//! A spec document normalizes into a `LibrarySpec`: library-wide metadata plus
//! an ordered collection of function entries with resolved argument roles.

use std::collections::BTreeMap;

use serde::Serialize;

/// Maximal number of function arguments
pub const MAXARGS: usize = 20;

/// API version injected by the loader, never read from the spec
pub const APIVERSION: u32 = 2;

/// Default values merged under every section before section-specific
/// values override them.
// NOTE: when changing, also update the spec-format documentation
pub(crate) const DEFAULTS: &[(&str, &str)] = &[
    ("languages", ""),
    ("libraryversion", "1"),
    ("vendor", "GAMS Development Corporation"),
    ("needlicense", "0"),
    ("notinequation", "0"),
    ("zeroripple", "0"),
    ("derivative", "continuous"),
    ("arguments", ""),
    ("exogenous", ""),
    ("endogenous", "__OTHER__"),
    ("maxderivative", "2"),
];

/// Whether derivatives of a function are continuous
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Derivative {
    /// Derivatives are continuous everywhere
    Continuous,
    /// Derivatives have discontinuities
    Discontinuous,
}

impl Derivative {
    /// Parse the spec-level value; anything other than the two recognized
    /// spellings is rejected by the loader.
    pub(crate) fn parse(value: &str) -> Option<Self> {
        match value {
            "continuous" => Some(Derivative::Continuous),
            "discontinuous" => Some(Derivative::Discontinuous),
            _ => None,
        }
    }
}

/// Library-wide metadata from the [Library] section
#[derive(Debug, Clone, Serialize)]
pub struct LibraryMetadata {
    /// Base name derived from the spec file name (path and `.spec` suffix
    /// stripped), used to construct default output names
    pub stub: String,
    /// Explicit library name override; when absent each target computes
    /// `stub + suffix`
    pub name: Option<String>,
    /// Requested target languages, matched by substring
    pub languages: String,
    /// Fixed API version, assigned by the loader
    pub apiversion: u32,
    /// Extra symbol names to export, when declared
    pub extraexports: Option<Vec<String>>,
    /// Remaining descriptive scalars (vendor, libraryversion, description,
    /// ...), passed through to rendering uninterpreted
    pub fields: BTreeMap<String, String>,
}

impl LibraryMetadata {
    /// Look up a pass-through field, defaulting to the empty string
    pub fn field(&self, key: &str) -> &str {
        self.fields.get(key).map(String::as_str).unwrap_or("")
    }
}

/// One declared function with resolved arguments and roles
#[derive(Debug, Clone, Serialize)]
pub struct FunctionSpec {
    /// Function name (the section name)
    pub name: String,
    /// Ordered argument names, right-padded with empty strings up to
    /// `MAXARGS` entries
    pub args: Vec<String>,
    /// Number of required arguments
    pub argmin: usize,
    /// Number of required plus optional arguments
    pub argmax: usize,
    /// Argument name -> endogenous flag (1 = endogenous); the empty
    /// placeholder name always maps to 0
    pub endogenous: BTreeMap<String, u8>,
    /// Continuity of the function's derivatives
    pub derivative: Derivative,
    /// Remaining scalars inherited from the defaults layer or overridden
    /// per function (zeroripple, notinequation, maxderivative, ...)
    pub fields: BTreeMap<String, String>,
}

impl FunctionSpec {
    /// Look up a pass-through field, defaulting to the empty string
    pub fn field(&self, key: &str) -> &str {
        self.fields.get(key).map(String::as_str).unwrap_or("")
    }

    /// The declared (non-placeholder) argument names
    pub fn declared_args(&self) -> &[String] {
        &self.args[..self.argmax]
    }
}

/// A fully normalized spec: metadata plus functions in declaration order
#[derive(Debug, Clone, Serialize)]
pub struct LibrarySpec {
    /// Library-wide metadata
    pub library: LibraryMetadata,
    /// Functions in the order their sections appear in the spec
    pub functions: Vec<FunctionSpec>,
}
