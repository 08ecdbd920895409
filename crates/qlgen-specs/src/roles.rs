//! Two-phase resolution of argument roles
//!
//! Each declared argument is either exogenous or endogenous. A role set
//! consisting of exactly the wildcard token means "every declared argument
//! not explicitly on the other side". Resolution is a pure function of the
//! declared arguments and the two literal sets so it stays independently
//! testable.

use std::collections::BTreeSet;

/// Wildcard token standing for "all other declared arguments"
pub const WILDCARD: &str = "__OTHER__";

/// Failures local to role resolution; the loader attributes them to a
/// function when converting into `SpecError`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleResolutionError {
    /// An argument appears in both sets
    Conflict {
        /// The argument claimed by both sets
        name: String,
    },
    /// Declared arguments covered by neither set after wildcard resolution
    CoverageGap {
        /// The uncovered argument names
        uncovered: Vec<String>,
    },
}

/// Resolve the exogenous/endogenous partition over the declared arguments.
///
/// Phase one checks the literal sets for conflicts, phase two applies the
/// wildcard complement rule and checks that the union covers every declared
/// argument. Returns the resolved `(exogenous, endogenous)` sets.
pub fn resolve_roles(
    declared: &[String],
    exogenous: &BTreeSet<String>,
    endogenous: &BTreeSet<String>,
) -> Result<(BTreeSet<String>, BTreeSet<String>), RoleResolutionError> {
    if let Some(name) = exogenous.intersection(endogenous).next() {
        return Err(RoleResolutionError::Conflict { name: name.clone() });
    }

    let declared_set: BTreeSet<String> = declared.iter().cloned().collect();

    let mut exo = exogenous.clone();
    let mut endo = endogenous.clone();
    if is_wildcard(&exo) {
        exo = declared_set.difference(&endo).cloned().collect();
    }
    if is_wildcard(&endo) {
        endo = declared_set.difference(&exo).cloned().collect();
    }

    let uncovered: Vec<String> = declared_set
        .iter()
        .filter(|name| !exo.contains(*name) && !endo.contains(*name))
        .cloned()
        .collect();
    if !uncovered.is_empty() {
        return Err(RoleResolutionError::CoverageGap { uncovered });
    }

    Ok((exo, endo))
}

fn is_wildcard(set: &BTreeSet<String>) -> bool {
    set.len() == 1 && set.iter().next().map(String::as_str) == Some(WILDCARD)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn set(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn wildcard_endogenous_takes_the_complement() {
        let (exo, endo) = resolve_roles(
            &args(&["a", "b", "c", "d"]),
            &set(&["a", "b"]),
            &set(&[WILDCARD]),
        )
        .expect("resolution failed");
        assert_eq!(exo, set(&["a", "b"]));
        assert_eq!(endo, set(&["c", "d"]));
    }

    #[test]
    fn wildcard_exogenous_takes_the_complement() {
        let (exo, endo) = resolve_roles(
            &args(&["x", "y", "z"]),
            &set(&[WILDCARD]),
            &set(&["z"]),
        )
        .expect("resolution failed");
        assert_eq!(exo, set(&["x", "y"]));
        assert_eq!(endo, set(&["z"]));
    }

    #[test]
    fn explicit_partition_passes_through() {
        let (exo, endo) = resolve_roles(&args(&["a", "b"]), &set(&["a"]), &set(&["b"]))
            .expect("resolution failed");
        assert_eq!(exo, set(&["a"]));
        assert_eq!(endo, set(&["b"]));
    }

    #[test]
    fn shared_argument_is_a_conflict() {
        let err = resolve_roles(&args(&["x"]), &set(&["x"]), &set(&["x"])).unwrap_err();
        assert_eq!(err, RoleResolutionError::Conflict { name: "x".into() });
    }

    #[test]
    fn uncovered_arguments_are_reported_by_name() {
        let err = resolve_roles(&args(&["a", "b", "c"]), &set(&["a"]), &set(&["b"]))
            .unwrap_err();
        assert_eq!(
            err,
            RoleResolutionError::CoverageGap {
                uncovered: vec!["c".to_string()]
            }
        );
    }

    #[test]
    fn no_arguments_resolves_to_empty_sets() {
        let (exo, endo) = resolve_roles(&[], &set(&[]), &set(&[WILDCARD]))
            .expect("resolution failed");
        assert!(exo.is_empty());
        assert!(endo.is_empty());
    }

    #[test]
    fn wildcard_on_both_sides_conflicts_on_the_token() {
        // the literal sets intersect on the wildcard token itself
        let err = resolve_roles(&args(&["a", "b"]), &set(&[WILDCARD]), &set(&[WILDCARD]))
            .unwrap_err();
        assert_eq!(
            err,
            RoleResolutionError::Conflict {
                name: WILDCARD.to_string()
            }
        );
    }
}
