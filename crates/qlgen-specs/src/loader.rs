//! Spec loading and normalization
//!
//! Reads a spec document, merges the defaults layer under every section,
//! resolves each function's argument list and roles, and produces the
//! canonical `LibrarySpec`. All validation failures are local to the spec
//! being loaded so a batch can continue with its remaining inputs.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::document::{Document, Section};
use crate::error::SpecError;
use crate::models::{
    Derivative, FunctionSpec, LibraryMetadata, LibrarySpec, APIVERSION, DEFAULTS, MAXARGS,
};
use crate::roles::{resolve_roles, RoleResolutionError};

/// Name of the mandatory library section
pub const LIBRARY_SECTION: &str = "Library";

/// File suffix recognized for spec files
pub const SPEC_SUFFIX: &str = ".spec";

/// Load and normalize a spec file
pub fn load_spec_file(path: &Path) -> Result<LibrarySpec, SpecError> {
    let content = fs::read_to_string(path)?;
    load_spec_str(&content, &stub_from_path(path))
}

/// Load and normalize a spec from a string; `stub` is the identifier the
/// spec was loaded under (for files, the basename minus the suffix).
pub fn load_spec_str(content: &str, stub: &str) -> Result<LibrarySpec, SpecError> {
    let doc = Document::parse(content)?;

    let library_section = doc
        .section(LIBRARY_SECTION)
        .ok_or_else(|| SpecError::MissingLibrarySection(stub.to_string()))?;

    let stub_default = [("stub", stub)];
    let mut lib_fields = doc.merged(library_section, DEFAULTS, &stub_default)?;

    let name = lib_fields.remove("name");
    let languages = lib_fields.remove("languages").unwrap_or_default();
    let extraexports = lib_fields.remove("extraexports").map(|value| {
        value
            .split_whitespace()
            .map(str::to_string)
            .collect::<Vec<String>>()
    });
    lib_fields.remove("stub");
    // the API version is owned by the generator, never by the spec
    lib_fields.remove("apiversion");

    let library = LibraryMetadata {
        stub: stub.to_string(),
        name,
        languages,
        apiversion: APIVERSION,
        extraexports,
        fields: lib_fields,
    };

    let mut functions = Vec::new();
    for section in doc.sections().filter(|s| s.name != LIBRARY_SECTION) {
        functions.push(normalize_function(&doc, section, stub)?);
    }
    debug!(stub, functions = functions.len(), "normalized spec");

    Ok(LibrarySpec { library, functions })
}

/// Derive the stub from a spec path: basename with the `.spec` suffix removed
pub fn stub_from_path(path: &Path) -> String {
    let base = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    match base.strip_suffix(SPEC_SUFFIX) {
        Some(stub) => stub.to_string(),
        None => base,
    }
}

fn normalize_function(
    doc: &Document,
    section: &Section,
    stub: &str,
) -> Result<FunctionSpec, SpecError> {
    let name = section.name.clone();
    let stub_default = [("stub", stub)];
    let mut fields = doc.merged(section, DEFAULTS, &stub_default)?;

    // split arguments at the optional '|' into required and optional groups
    let arguments = fields.remove("arguments").unwrap_or_default();
    let groups: Vec<&str> = arguments.split('|').collect();
    if groups.len() > 2 {
        warn!(
            function = %name,
            arguments = %arguments,
            "at most one | allowed in arguments specification; ignoring extra groups"
        );
    }
    let required: Vec<String> = groups[0].split_whitespace().map(str::to_string).collect();
    let optional: Vec<String> = groups
        .get(1)
        .map(|g| g.split_whitespace().map(str::to_string).collect())
        .unwrap_or_default();

    let argmin = required.len();
    let argmax = argmin + optional.len();
    if argmax > MAXARGS {
        return Err(SpecError::TooManyArguments {
            function: name,
            count: argmax,
        });
    }

    let declared: Vec<String> = required.into_iter().chain(optional).collect();
    let mut args = declared.clone();
    args.resize(MAXARGS, String::new());

    // role sets; a stray '|' is spec-writer convenience, not an operator
    let exo_raw = fields.remove("exogenous").unwrap_or_default();
    let endo_raw = fields.remove("endogenous").unwrap_or_default();
    let (_, endo) = resolve_roles(&declared, &split_names(&exo_raw), &split_names(&endo_raw))
        .map_err(|err| match err {
            RoleResolutionError::Conflict { name: arg } => SpecError::RoleConflict {
                function: name.clone(),
                name: arg,
            },
            RoleResolutionError::CoverageGap { uncovered } => SpecError::RoleCoverageGap {
                function: name.clone(),
                uncovered,
            },
        })?;

    let mut endogenous: BTreeMap<String, u8> = args
        .iter()
        .map(|arg| (arg.clone(), u8::from(endo.contains(arg))))
        .collect();
    // the placeholder name maps to 0 even when no slot is padded
    endogenous.insert(String::new(), 0);

    let derivative_raw = fields.remove("derivative").unwrap_or_default();
    let derivative = Derivative::parse(&derivative_raw).ok_or(SpecError::InvalidDerivative {
        function: name.clone(),
        value: derivative_raw,
    })?;

    fields.remove("stub");

    Ok(FunctionSpec {
        name,
        args,
        argmin,
        argmax,
        endogenous,
        derivative,
        fields,
    })
}

fn split_names(value: &str) -> BTreeSet<String> {
    value
        .split_whitespace()
        .filter(|token| *token != "|")
        .map(str::to_string)
        .collect()
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    /// Unique lowercase identifiers usable as argument names
    fn arb_arg_names() -> impl Strategy<Value = Vec<String>> {
        proptest::collection::btree_set("[a-z][a-z0-9]{0,5}", 0..MAXARGS)
            .prop_map(|set| set.into_iter().collect())
    }

    proptest! {
        /// For any valid spec, `argmin <= argmax <= MAXARGS`, the first
        /// `argmax` entries of `args` are the declared names and the rest
        /// are empty placeholders.
        #[test]
        fn argument_bookkeeping_invariants(
            names in arb_arg_names(),
            split in 0..=MAXARGS,
        ) {
            let split = split.min(names.len());
            let (required, optional) = names.split_at(split);
            let arguments = format!("{} | {}", required.join(" "), optional.join(" "));
            let content = format!("[Library]\n[f]\narguments = {arguments}\n");

            let spec = load_spec_str(&content, "s").expect("load failed");
            let f = &spec.functions[0];

            prop_assert_eq!(f.argmin, required.len());
            prop_assert_eq!(f.argmax, names.len());
            prop_assert!(f.argmin <= f.argmax && f.argmax <= MAXARGS);
            prop_assert_eq!(f.args.len(), MAXARGS);
            prop_assert!(f.args[..f.argmax].iter().all(|a| !a.is_empty()));
            prop_assert!(f.args[f.argmax..].iter().all(|a| a.is_empty()));
        }

        /// Every declared argument maps to exactly 0 or 1 in the endogenous
        /// bitmap and the placeholder name always maps to 0.
        #[test]
        fn endogenous_bitmap_is_total(names in arb_arg_names()) {
            let content = format!(
                "[Library]\n[f]\narguments = {}\n",
                names.join(" ")
            );
            let spec = load_spec_str(&content, "s").expect("load failed");
            let f = &spec.functions[0];

            for name in &names {
                let flag = f.endogenous.get(name).copied();
                prop_assert!(flag == Some(0) || flag == Some(1));
            }
            prop_assert_eq!(f.endogenous.get("").copied(), Some(0));
        }
    }
}
