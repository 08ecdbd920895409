//! Target-language table
//!
//! Each target is recognized by a token matched as a substring against the
//! library's `languages` field and produces one or two coordinated outputs.
//! Some targets pair a primary source file with a module-definition
//! companion; the companion may use a different name suffix (the Fortran90
//! definition file names the C-callable shim library, not the ifort one).

use qlgen_specs::LibraryMetadata;

/// Identifier of an embedded template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateId {
    /// C binding source
    C,
    /// Windows module-definition companion file
    ModuleDef,
    /// Delphi include file
    Delphi,
    /// Fortran90 binding source
    Fortran90,
}

impl TemplateId {
    /// All embedded templates, for registry setup
    pub const ALL: [TemplateId; 4] = [
        TemplateId::C,
        TemplateId::ModuleDef,
        TemplateId::Delphi,
        TemplateId::Fortran90,
    ];

    /// Registry name of the template
    pub fn name(self) -> &'static str {
        match self {
            TemplateId::C => "ql_c",
            TemplateId::ModuleDef => "ql_def",
            TemplateId::Delphi => "ql_delphi",
            TemplateId::Fortran90 => "ql_fortran90",
        }
    }

    /// Embedded template source
    pub(crate) fn source(self) -> &'static str {
        match self {
            TemplateId::C => include_str!("../templates/ql_c.hbs"),
            TemplateId::ModuleDef => include_str!("../templates/ql_def.hbs"),
            TemplateId::Delphi => include_str!("../templates/ql_delphi.hbs"),
            TemplateId::Fortran90 => include_str!("../templates/ql_fortran90.hbs"),
        }
    }
}

/// One output file of a target
#[derive(Debug, Clone, Copy)]
pub struct TargetOutput {
    /// Suffix appended to the stub when no explicit name override is given
    pub name_suffix: &'static str,
    /// Suffix appended to the effective name to form the output file name
    pub file_suffix: &'static str,
    /// Template rendering this output
    pub template: TemplateId,
}

impl TargetOutput {
    /// Effective library name for this output: the explicit override when
    /// present, else `stub + name_suffix`
    pub fn effective_name(&self, library: &LibraryMetadata) -> String {
        match &library.name {
            Some(name) => name.clone(),
            None => format!("{}{}", library.stub, self.name_suffix),
        }
    }

    /// Output file name for this output
    pub fn file_name(&self, library: &LibraryMetadata) -> String {
        format!("{}{}", self.effective_name(library), self.file_suffix)
    }
}

/// A supported target language
#[derive(Debug, Clone, Copy)]
pub struct Target {
    /// Recognition token, matched by substring against `languages`
    pub token: &'static str,
    /// Outputs produced for this target
    pub outputs: &'static [TargetOutput],
}

/// All supported targets, processed independently in this order
pub const TARGETS: &[Target] = &[
    Target {
        token: "C",
        outputs: &[
            TargetOutput {
                name_suffix: "cclib",
                file_suffix: "ql.c",
                template: TemplateId::C,
            },
            TargetOutput {
                name_suffix: "cclib",
                file_suffix: ".def",
                template: TemplateId::ModuleDef,
            },
        ],
    },
    Target {
        token: "Delphi",
        outputs: &[TargetOutput {
            name_suffix: "dclib",
            file_suffix: "ql.inc",
            template: TemplateId::Delphi,
        }],
    },
    Target {
        token: "Fortran90",
        outputs: &[
            TargetOutput {
                name_suffix: "ifortlib",
                file_suffix: "ql.f90",
                template: TemplateId::Fortran90,
            },
            TargetOutput {
                name_suffix: "fclib",
                file_suffix: ".def",
                template: TemplateId::ModuleDef,
            },
        ],
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn metadata(stub: &str, name: Option<&str>) -> LibraryMetadata {
        LibraryMetadata {
            stub: stub.to_string(),
            name: name.map(str::to_string),
            languages: String::new(),
            apiversion: qlgen_specs::APIVERSION,
            extraexports: None,
            fields: BTreeMap::new(),
        }
    }

    #[test]
    fn default_names_derive_from_the_stub() {
        let lib = metadata("tri", None);
        let c = &TARGETS[0];
        assert_eq!(c.outputs[0].file_name(&lib), "tricclibql.c");
        assert_eq!(c.outputs[1].file_name(&lib), "tricclib.def");
    }

    #[test]
    fn explicit_name_override_wins_for_every_output() {
        let lib = metadata("fit", Some("fitfclib"));
        let c = &TARGETS[0];
        assert_eq!(c.outputs[0].file_name(&lib), "fitfclibql.c");
        assert_eq!(c.outputs[1].file_name(&lib), "fitfclib.def");
    }

    #[test]
    fn fortran_companion_def_uses_its_own_suffix() {
        let lib = metadata("tri", None);
        let fortran = TARGETS
            .iter()
            .find(|t| t.token == "Fortran90")
            .expect("Fortran90 target missing");
        assert_eq!(fortran.outputs[0].file_name(&lib), "triifortlibql.f90");
        assert_eq!(fortran.outputs[1].file_name(&lib), "trifclib.def");
    }

    #[test]
    fn delphi_produces_a_single_include_file() {
        let lib = metadata("tri", None);
        let delphi = TARGETS
            .iter()
            .find(|t| t.token == "Delphi")
            .expect("Delphi target missing");
        assert_eq!(delphi.outputs.len(), 1);
        assert_eq!(delphi.outputs[0].file_name(&lib), "tridclibql.inc");
    }
}
