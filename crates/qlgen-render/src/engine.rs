//! Handlebars registry with the embedded templates
//!
//! The engine is the opaque rendering service of the pipeline: given a
//! template identifier and a render context it produces text, nothing else.
//! HTML escaping is disabled since every output is program source.

use handlebars::{no_escape, Handlebars};

use crate::context::RenderContext;
use crate::error::GenerationError;
use crate::targets::TemplateId;

/// Renders embedded templates against a `RenderContext`
pub struct TemplateEngine {
    registry: Handlebars<'static>,
}

impl TemplateEngine {
    /// Create an engine with every embedded template registered
    pub fn new() -> Result<Self, GenerationError> {
        let mut registry = Handlebars::new();
        registry.register_escape_fn(no_escape);
        for id in TemplateId::ALL {
            registry.register_template_string(id.name(), id.source())?;
        }
        Ok(Self { registry })
    }

    /// Render one template against a context
    pub fn render(
        &self,
        id: TemplateId,
        context: &RenderContext,
    ) -> Result<String, GenerationError> {
        Ok(self.registry.render(id.name(), context)?)
    }
}
