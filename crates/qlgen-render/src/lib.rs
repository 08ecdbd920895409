#![warn(missing_docs)]

//! Template rendering and per-target output dispatch
//!
//! Consumes the canonical model produced by `qlgen-specs`, selects the
//! templates for each requested target language, and writes the rendered
//! binding sources. Templates are embedded handlebars files; rendering is
//! pure string substitution over a precomputed context.

pub mod context;
pub mod dispatcher;
pub mod engine;
pub mod error;
pub mod targets;

pub use context::{build_context, ArgContext, FunctionContext, LibraryContext, RenderContext};
pub use dispatcher::{Dispatcher, DispatcherConfig, RenderedFile};
pub use engine::TemplateEngine;
pub use error::GenerationError;
pub use targets::{Target, TargetOutput, TemplateId, TARGETS};
