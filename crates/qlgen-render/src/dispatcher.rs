//! Per-target render and write orchestration
//!
//! Walks the target table, matches each recognition token against the
//! library's `languages` field, renders every output of each matched target,
//! and writes the results. Unrecognized tokens in `languages` are skipped so
//! spec files may list targets this version does not implement.

use std::fs;
use std::path::PathBuf;

use tracing::{debug, info};

use qlgen_specs::LibrarySpec;

use crate::context::build_context;
use crate::engine::TemplateEngine;
use crate::error::GenerationError;
use crate::targets::TARGETS;

/// Configuration for output dispatch
#[derive(Debug, Clone)]
pub struct DispatcherConfig {
    /// Directory output files are written to
    pub out_dir: PathBuf,
    /// When set, render everything but write nothing
    pub dry_run: bool,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("."),
            dry_run: false,
        }
    }
}

/// One rendered output file
#[derive(Debug, Clone)]
pub struct RenderedFile {
    /// Path the file was (or would be) written to
    pub path: PathBuf,
    /// Token of the target that produced it
    pub target: &'static str,
    /// Rendered text
    pub content: String,
    /// Whether the file was written to disk
    pub written: bool,
}

/// Renders and writes output files for a normalized spec
pub struct Dispatcher {
    engine: TemplateEngine,
    config: DispatcherConfig,
}

impl Dispatcher {
    /// Create a dispatcher with default configuration
    pub fn new() -> Result<Self, GenerationError> {
        Self::with_config(DispatcherConfig::default())
    }

    /// Create a dispatcher with custom configuration
    pub fn with_config(config: DispatcherConfig) -> Result<Self, GenerationError> {
        Ok(Self {
            engine: TemplateEngine::new()?,
            config,
        })
    }

    /// Render and write every output of every requested target.
    ///
    /// All matched targets are processed, no early exit. Returns the
    /// rendered files in target-table order.
    pub fn dispatch(&self, spec: &LibrarySpec) -> Result<Vec<RenderedFile>, GenerationError> {
        let mut rendered = Vec::new();

        for target in TARGETS {
            if !spec.library.languages.contains(target.token) {
                debug!(target = target.token, "target not requested");
                continue;
            }

            for output in target.outputs {
                let effective_name = output.effective_name(&spec.library);
                let context = build_context(spec, &effective_name);
                let content = self.engine.render(output.template, &context)?;

                let path = self.config.out_dir.join(output.file_name(&spec.library));
                info!(
                    target = target.token,
                    path = %path.display(),
                    dry_run = self.config.dry_run,
                    "generating"
                );
                if !self.config.dry_run {
                    fs::write(&path, &content)?;
                }

                rendered.push(RenderedFile {
                    path,
                    target: target.token,
                    content,
                    written: !self.config.dry_run,
                });
            }
        }

        Ok(rendered)
    }
}
