//! Render context construction
//!
//! Templates are pure string substitution, so everything they need is
//! precomputed here: 1-based function indices, zero-padded argument slot
//! numbers, the continuous-derivative flag. Only the declared arguments of
//! each function are exposed; padding placeholders never reach a template.

use serde::Serialize;

use qlgen_specs::{Derivative, FunctionSpec, LibrarySpec};

/// Everything a template can reference
#[derive(Debug, Clone, Serialize)]
pub struct RenderContext {
    /// Library-level values
    pub library: LibraryContext,
    /// Functions in declaration order
    pub functions: Vec<FunctionContext>,
}

/// Library-level template values
#[derive(Debug, Clone, Serialize)]
pub struct LibraryContext {
    /// Effective library name for the output being rendered
    pub name: String,
    /// Stub the name was derived from
    pub stub: String,
    /// Generator API version
    pub apiversion: u32,
    /// Library version string
    pub libraryversion: String,
    /// Vendor string
    pub vendor: String,
    /// Library description
    pub description: String,
    /// Whether the library needs a license
    pub needlicense: String,
    /// Number of declared functions
    pub nfunctions: usize,
    /// Extra symbols to export
    pub extraexports: Vec<String>,
}

/// Per-function template values
#[derive(Debug, Clone, Serialize)]
pub struct FunctionContext {
    /// 1-based function number
    pub index: usize,
    /// Function name
    pub name: String,
    /// Function description
    pub description: String,
    /// Whether the function may not appear in equations
    pub notinequation: String,
    /// Zero-ripple flag
    pub zeroripple: String,
    /// Highest supported derivative order
    pub maxderivative: String,
    /// Number of required arguments
    pub argmin: usize,
    /// Number of required plus optional arguments
    pub argmax: usize,
    /// 1 when derivatives are continuous, 0 otherwise
    pub continuous_derivative: u8,
    /// Declared arguments with their slot numbers and roles
    pub args: Vec<ArgContext>,
}

/// One declared argument slot
#[derive(Debug, Clone, Serialize)]
pub struct ArgContext {
    /// Zero-padded 1-based slot number ("01", "02", ...)
    pub slot: String,
    /// Argument name
    pub name: String,
    /// 1 when the argument is endogenous
    pub endogenous: u8,
}

/// Build the render context for one output of one target. The effective
/// name differs between outputs of the same library, so it is passed in.
pub fn build_context(spec: &LibrarySpec, effective_name: &str) -> RenderContext {
    let library = LibraryContext {
        name: effective_name.to_string(),
        stub: spec.library.stub.clone(),
        apiversion: spec.library.apiversion,
        libraryversion: spec.library.field("libraryversion").to_string(),
        vendor: spec.library.field("vendor").to_string(),
        description: spec.library.field("description").to_string(),
        needlicense: spec.library.field("needlicense").to_string(),
        nfunctions: spec.functions.len(),
        extraexports: spec.library.extraexports.clone().unwrap_or_default(),
    };

    let functions = spec
        .functions
        .iter()
        .enumerate()
        .map(|(i, f)| function_context(i + 1, f))
        .collect();

    RenderContext { library, functions }
}

fn function_context(index: usize, f: &FunctionSpec) -> FunctionContext {
    let args = f
        .declared_args()
        .iter()
        .enumerate()
        .map(|(i, name)| ArgContext {
            slot: format!("{:02}", i + 1),
            name: name.clone(),
            endogenous: f.endogenous.get(name).copied().unwrap_or(0),
        })
        .collect();

    FunctionContext {
        index,
        name: f.name.clone(),
        description: f.field("description").to_string(),
        notinequation: f.field("notinequation").to_string(),
        zeroripple: f.field("zeroripple").to_string(),
        maxderivative: f.field("maxderivative").to_string(),
        argmin: f.argmin,
        argmax: f.argmax,
        continuous_derivative: u8::from(f.derivative == Derivative::Continuous),
        args,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qlgen_specs::load_spec_str;

    const SPEC: &str = "\
[Library]
languages = C
description = test library

[foo]
description = a function
arguments = a b | c
exogenous = a b
endogenous = c
derivative = discontinuous
";

    #[test]
    fn context_precomputes_indices_and_slots() {
        let spec = load_spec_str(SPEC, "tri").expect("load failed");
        let ctx = build_context(&spec, "tricclib");

        assert_eq!(ctx.library.name, "tricclib");
        assert_eq!(ctx.library.nfunctions, 1);
        assert_eq!(ctx.library.apiversion, qlgen_specs::APIVERSION);

        let f = &ctx.functions[0];
        assert_eq!(f.index, 1);
        assert_eq!(f.continuous_derivative, 0);
        assert_eq!(f.args.len(), 3);
        assert_eq!(f.args[0].slot, "01");
        assert_eq!(f.args[2].slot, "03");
        assert_eq!(f.args[2].name, "c");
        assert_eq!(f.args[2].endogenous, 1);
        assert_eq!(f.args[0].endogenous, 0);
    }

    #[test]
    fn padding_placeholders_are_excluded() {
        let spec = load_spec_str(SPEC, "tri").expect("load failed");
        let ctx = build_context(&spec, "tricclib");
        assert!(ctx.functions[0].args.iter().all(|a| !a.name.is_empty()));
    }
}
