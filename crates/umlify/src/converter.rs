//! Conversion façade
//!
//! Wraps the analysis pipeline with the two fail-fast checks (empty input,
//! no types found) and runs every renderer over the resulting model.

use anyhow::Result;
use serde::Serialize;
use std::sync::OnceLock;
use tracing::{debug, info, span, warn, Level};

use crate::core::{AnalyzerConfig, ConvertError, RenderOptions, Renderer, SourceModel, TypeDeclaration};
use crate::parser::SourceParser;
use crate::render::{group_by_kind, PanelRenderer, RelationshipGroup, SummaryRenderer, UxfRenderer};

/// Element counts of a converted model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Summary {
    pub class_count: usize,
    pub relationship_count: usize,
    pub field_count: usize,
    pub method_count: usize,
}

impl Summary {
    pub fn of(model: &SourceModel) -> Self {
        Self {
            class_count: model.class_count(),
            relationship_count: model.relationship_count(),
            field_count: model.field_count(),
            method_count: model.method_count(),
        }
    }
}

/// Everything produced by one successful conversion
#[derive(Debug, Clone, Serialize)]
pub struct Conversion {
    pub model: SourceModel,
    /// UMLet `.uxf` document
    pub uml_text: String,
    pub panel_text: String,
    pub relationship_text: String,
    pub summary: Summary,
}

/// Short per-type digest for debugging why something did or did not match
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassDigest {
    pub name: String,
    pub kind: &'static str,
    pub field_count: usize,
    pub method_count: usize,
    pub super_type: Option<String>,
    pub interfaces: Vec<String>,
}

impl ClassDigest {
    fn of(declaration: &TypeDeclaration) -> Self {
        let kind = if declaration.is_interface() {
            "interface"
        } else if declaration.is_enum() {
            "enum"
        } else {
            "class"
        };
        Self {
            name: declaration.name.clone(),
            kind,
            field_count: declaration.fields.len(),
            method_count: declaration.methods.len(),
            super_type: declaration.super_type.clone(),
            interfaces: declaration.interfaces.clone(),
        }
    }
}

/// Model plus per-type digests and relationships grouped by kind
#[derive(Debug, Clone, Serialize)]
pub struct DetailedAnalysis {
    pub model: SourceModel,
    pub classes: Vec<ClassDigest>,
    pub relationships_by_kind: Vec<RelationshipGroup>,
}

/// Source-to-diagram converter
///
/// Cheap to construct; holds nothing but its configuration.
#[derive(Debug, Clone, Default)]
pub struct Converter {
    parser: SourceParser,
}

impl Converter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: AnalyzerConfig) -> Self {
        Self {
            parser: SourceParser::with_config(config),
        }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        self.parser.config()
    }

    /// Analyze source into a model without rendering
    ///
    /// Fails with [`ConvertError::EmptyInput`] for blank input and with
    /// [`ConvertError::NoTypesFound`] when no type declaration matched.
    pub fn analyze(&self, source: &str) -> Result<SourceModel> {
        if source.trim().is_empty() {
            warn!("Rejected empty input");
            return Err(ConvertError::EmptyInput.into());
        }

        let model = self.parser.parse_source(source);
        if model.classes.is_empty() {
            let error = ConvertError::no_types_found(&model.package_name, model.imports.len());
            warn!(%error, "No types found");
            return Err(error.into());
        }

        Ok(model)
    }

    /// Analyze and render with every renderer
    pub fn convert(&self, source: &str, options: &RenderOptions) -> Result<Conversion> {
        let convert_span = span!(Level::INFO, "convert", input_len = source.len());
        let _enter = convert_span.enter();

        info!("Starting conversion");

        let model = self.analyze(source)?;
        debug!(
            class_count = model.class_count(),
            relationship_count = model.relationship_count(),
            "Analysis completed"
        );

        let render_span = span!(Level::DEBUG, "pipeline_render");
        let render_enter = render_span.enter();
        let uml_text = UxfRenderer::with_layout(options.layout).render(&model)?;
        let panel_text = PanelRenderer::new().render(&model)?;
        let relationship_text = SummaryRenderer::new().render(&model)?;
        drop(render_enter);

        let summary = Summary::of(&model);
        info!(
            class_count = summary.class_count,
            relationship_count = summary.relationship_count,
            "Conversion completed"
        );

        Ok(Conversion {
            model,
            uml_text,
            panel_text,
            relationship_text,
            summary,
        })
    }

    /// Analyze and attach per-type digests and grouped relationships
    pub fn analyze_detailed(&self, source: &str) -> Result<DetailedAnalysis> {
        let model = self.analyze(source)?;
        let classes = model.classes.iter().map(ClassDigest::of).collect();
        let relationships_by_kind = group_by_kind(&model.relationships);
        Ok(DetailedAnalysis {
            model,
            classes,
            relationships_by_kind,
        })
    }
}

/// Process-wide converter with the default configuration
///
/// A convenience only; [`Converter::new`] is just as cheap.
pub fn shared() -> &'static Converter {
    static SHARED: OnceLock<Converter> = OnceLock::new();
    SHARED.get_or_init(Converter::new)
}

/// Convert source to a UMLet `.uxf` document with default options
///
/// # Example
/// ```
/// let uxf = umlify::convert_to_umlet("class Car { }").unwrap();
/// assert!(uxf.contains("<id>UMLClass</id>"));
/// ```
pub fn convert_to_umlet(source: &str) -> Result<String> {
    Ok(shared().convert(source, &RenderOptions::default())?.uml_text)
}

/// Readable relationship report for source
pub fn relationship_text(source: &str) -> Result<String> {
    let model = shared().analyze(source)?;
    SummaryRenderer::new().render(&model)
}
