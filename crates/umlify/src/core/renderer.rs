//! Core renderer trait for diagram output
//!
//! A renderer is pure templating over a finished [`SourceModel`]; it performs
//! no analysis of its own.

use anyhow::Result;

use super::SourceModel;

/// Core trait for model renderers
///
/// # Example
/// ```
/// use umlify::core::Renderer;
/// use umlify::render::SummaryRenderer;
///
/// let model = umlify::analyze("class Dog extends Animal { }").unwrap();
/// let text = SummaryRenderer::new().render(&model).unwrap();
/// assert!(text.contains("Dog"));
/// ```
pub trait Renderer: Send + Sync {
    /// The output type of this renderer
    type Output;

    /// Render the model into the output format
    fn render(&self, model: &SourceModel) -> Result<Self::Output>;

    /// Get the name of this renderer
    fn name(&self) -> &'static str;

    /// Get the supported output format
    fn format(&self) -> &'static str;
}
