//! Command-line argument definitions

use std::path::PathBuf;

use clap::Parser;

/// Generate query-library bindings from extrinsic function library specs
#[derive(Debug, Parser)]
#[command(name = "qlgen", version, about)]
pub struct Cli {
    /// Spec files to process; when omitted, every *.spec file in the
    /// current directory is processed
    pub specs: Vec<PathBuf>,

    /// Directory generated files are written into
    #[arg(long, default_value = ".")]
    pub out_dir: PathBuf,

    /// Render everything but write nothing
    #[arg(long)]
    pub dry_run: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_explicit_specs_and_flags() {
        let cli = Cli::parse_from(["qlgen", "tri.spec", "fit.spec", "--dry-run"]);
        assert_eq!(cli.specs.len(), 2);
        assert!(cli.dry_run);
        assert_eq!(cli.out_dir, PathBuf::from("."));
    }

    #[test]
    fn defaults_to_directory_discovery() {
        let cli = Cli::parse_from(["qlgen"]);
        assert!(cli.specs.is_empty());
        assert!(!cli.dry_run);
    }
}
