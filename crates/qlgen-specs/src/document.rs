//! Parser for the sectioned key/value spec format
//!
//! Spec documents are organized into `[Name]` sections of `key = value`
//! pairs. Keys are lowercased on read, `#` and `;` start full-line comments,
//! indented lines continue the previous value, and a bare key without a
//! separator is a flag-only key with an empty value. Values may interpolate
//! other keys from the same section (or the defaults layer) with `%(key)s`.

use std::collections::BTreeMap;

use crate::error::SpecError;

/// Maximum number of `%(key)s` substitution passes per value
const MAX_INTERPOLATION_DEPTH: usize = 10;

/// One named section as an ordered association list
#[derive(Debug, Clone)]
pub struct Section {
    /// Section name, case-sensitive
    pub name: String,
    entries: Vec<(String, String)>,
}

impl Section {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            entries: Vec::new(),
        }
    }

    /// Set a key, overriding an earlier occurrence in place
    fn set(&mut self, key: String, value: String) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    fn append_to_last(&mut self, continuation: &str) -> bool {
        match self.entries.last_mut() {
            Some((_, value)) => {
                if !value.is_empty() {
                    value.push(' ');
                }
                value.push_str(continuation);
                true
            }
            None => false,
        }
    }

    /// Look up a raw (uninterpolated) value
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate entries in declaration order
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// A parsed spec document: sections in declaration order
#[derive(Debug, Clone)]
pub struct Document {
    sections: Vec<Section>,
}

impl Document {
    /// Parse a spec document from a string
    pub fn parse(input: &str) -> Result<Self, SpecError> {
        let mut sections: Vec<Section> = Vec::new();

        for (idx, raw) in input.lines().enumerate() {
            let lineno = idx + 1;
            let line = raw.trim_end();
            let trimmed = line.trim_start();

            if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with(';') {
                continue;
            }

            if trimmed.starts_with('[') && line == trimmed {
                let name = trimmed
                    .strip_prefix('[')
                    .and_then(|rest| rest.strip_suffix(']'))
                    .ok_or_else(|| SpecError::Parse {
                        line: lineno,
                        message: format!("malformed section header: {trimmed}"),
                    })?
                    .trim();
                if sections.iter().any(|s| s.name == name) {
                    return Err(SpecError::Parse {
                        line: lineno,
                        message: format!("duplicate section: {name}"),
                    });
                }
                sections.push(Section::new(name));
                continue;
            }

            let section = match sections.last_mut() {
                Some(section) => section,
                None => {
                    return Err(SpecError::Parse {
                        line: lineno,
                        message: format!("entry before any section header: {trimmed}"),
                    })
                }
            };

            // indented lines continue the previous value
            if line != trimmed {
                if section.append_to_last(trimmed) {
                    continue;
                }
                return Err(SpecError::Parse {
                    line: lineno,
                    message: format!("continuation line with no preceding key: {trimmed}"),
                });
            }

            let (key, value) = split_entry(line);
            section.set(key.to_lowercase(), value.to_string());
        }

        Ok(Self { sections })
    }

    /// Look up a section by its exact name
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }

    /// Iterate sections in declaration order
    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    /// Merge the defaults layer under a section and resolve `%(key)s`
    /// interpolation, producing a plain key/value map.
    pub fn merged(
        &self,
        section: &Section,
        defaults: &[(&str, &str)],
        extra_defaults: &[(&str, &str)],
    ) -> Result<BTreeMap<String, String>, SpecError> {
        let mut merged: BTreeMap<String, String> = defaults
            .iter()
            .chain(extra_defaults.iter())
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        for (key, value) in section.entries() {
            merged.insert(key.to_string(), value.to_string());
        }
        interpolate(&merged)
    }
}

/// Split a line into key and value at the first `=` or `:` separator.
/// A line without a separator is a flag-only key with an empty value.
fn split_entry(line: &str) -> (&str, &str) {
    let pos = line
        .char_indices()
        .find(|(_, c)| *c == '=' || *c == ':')
        .map(|(i, _)| i);
    match pos {
        Some(i) => (line[..i].trim(), line[i + 1..].trim()),
        None => (line.trim(), ""),
    }
}

/// Resolve `%(key)s` references within a merged key/value map.
///
/// References resolve against the same map, iteratively, with a fixed depth
/// cap; `%%` escapes a literal percent sign. An unknown reference is a parse
/// error attributed to the value that contains it.
fn interpolate(map: &BTreeMap<String, String>) -> Result<BTreeMap<String, String>, SpecError> {
    let mut resolved = BTreeMap::new();
    for (key, value) in map {
        let mut current = value.clone();
        for _ in 0..MAX_INTERPOLATION_DEPTH {
            if !current.contains('%') {
                break;
            }
            current = substitute_once(&current, map)?;
        }
        resolved.insert(key.clone(), current.replace("%%", "%"));
    }
    Ok(resolved)
}

fn substitute_once(
    value: &str,
    map: &BTreeMap<String, String>,
) -> Result<String, SpecError> {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;
    while let Some(pos) = rest.find("%(") {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 2..];
        let close = after.find(")s").ok_or_else(|| SpecError::Parse {
            line: 0,
            message: format!("unterminated interpolation in value: {value}"),
        })?;
        let name = &after[..close];
        match map.get(name) {
            Some(replacement) => out.push_str(replacement),
            None => {
                return Err(SpecError::Parse {
                    line: 0,
                    message: format!("interpolation references unknown key: {name}"),
                })
            }
        }
        rest = &after[close + 2..];
    }
    out.push_str(rest);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_sections_in_order() {
        let doc = Document::parse("[Library]\nlanguages = C\n[sin]\narguments = x\n[cos]\n")
            .expect("parse failed");
        let names: Vec<&str> = doc.sections().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Library", "sin", "cos"]);
        assert_eq!(doc.section("Library").unwrap().get("languages"), Some("C"));
    }

    #[test]
    fn keys_are_lowercased_and_support_colon_separator() {
        let doc = Document::parse("[Library]\nVendor: ACME\n").expect("parse failed");
        assert_eq!(doc.section("Library").unwrap().get("vendor"), Some("ACME"));
    }

    #[test]
    fn flag_only_key_has_empty_value() {
        let doc = Document::parse("[Library]\nneedlicense\n").expect("parse failed");
        assert_eq!(doc.section("Library").unwrap().get("needlicense"), Some(""));
    }

    #[test]
    fn later_duplicate_key_overrides() {
        let doc = Document::parse("[Library]\nvendor = a\nvendor = b\n").expect("parse failed");
        let section = doc.section("Library").unwrap();
        assert_eq!(section.get("vendor"), Some("b"));
        assert_eq!(section.entries().count(), 1);
    }

    #[test]
    fn comments_and_blank_lines_are_skipped() {
        let doc = Document::parse("# header\n\n[Library]\n; note\nvendor = x\n")
            .expect("parse failed");
        assert_eq!(doc.section("Library").unwrap().get("vendor"), Some("x"));
    }

    #[test]
    fn continuation_lines_extend_the_previous_value() {
        let doc = Document::parse("[f]\narguments = a b\n    c d\n").expect("parse failed");
        assert_eq!(doc.section("f").unwrap().get("arguments"), Some("a b c d"));
    }

    #[test]
    fn duplicate_section_is_rejected() {
        let err = Document::parse("[Library]\n[Library]\n").unwrap_err();
        assert!(matches!(err, SpecError::Parse { line: 2, .. }));
    }

    #[test]
    fn entry_before_section_is_rejected() {
        let err = Document::parse("vendor = x\n").unwrap_err();
        assert!(matches!(err, SpecError::Parse { line: 1, .. }));
    }

    #[test]
    fn merged_applies_defaults_then_overrides() {
        let doc = Document::parse("[f]\nvendor = override\n").expect("parse failed");
        let section = doc.section("f").unwrap();
        let merged = doc
            .merged(section, &[("vendor", "default"), ("other", "kept")], &[])
            .expect("merge failed");
        assert_eq!(merged.get("vendor").unwrap(), "override");
        assert_eq!(merged.get("other").unwrap(), "kept");
    }

    #[test]
    fn interpolation_resolves_against_section_and_defaults() {
        let doc = Document::parse("[f]\ndescription = lib for %(stub)s\n").expect("parse failed");
        let section = doc.section("f").unwrap();
        let merged = doc
            .merged(section, &[], &[("stub", "tri")])
            .expect("merge failed");
        assert_eq!(merged.get("description").unwrap(), "lib for tri");
    }

    #[test]
    fn double_percent_escapes_literal_percent() {
        let doc = Document::parse("[f]\ndescription = 100%% pure\n").expect("parse failed");
        let section = doc.section("f").unwrap();
        let merged = doc.merged(section, &[], &[]).expect("merge failed");
        assert_eq!(merged.get("description").unwrap(), "100% pure");
    }

    #[test]
    fn unknown_interpolation_reference_is_an_error() {
        let doc = Document::parse("[f]\ndescription = %(nosuch)s\n").expect("parse failed");
        let section = doc.section("f").unwrap();
        assert!(doc.merged(section, &[], &[]).is_err());
    }
}
