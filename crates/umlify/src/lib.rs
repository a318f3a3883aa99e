//! Umlify - Extract class structure and UML relationships from source text
//!
//! A library for recovering classes, interfaces and enums from Java-style
//! source with pattern matching and brace balancing, inferring how the types
//! relate to each other, and rendering the result for UMLet.
//!
//! # Quick Start
//!
//! ```rust
//! let uxf = umlify::convert("class Car { private Engine engine; public Car() { engine = new Engine(); } }").unwrap();
//! assert!(uxf.contains("<diagram program=\"umlet\""));
//! ```
//!
//! # Advanced Usage
//!
//! For more control, use the individual components:
//!
//! ```rust
//! use umlify::prelude::*;
//!
//! let source = "class Service { private Logger logger; Service(Logger logger) { this.logger = logger; } }";
//!
//! // Analyze into a model
//! let model = SourceParser::new().parse_source(source);
//! assert_eq!(model.class_count(), 1);
//! assert_eq!(model.relationships[0].kind, RelationshipKind::Aggregation);
//!
//! // Render the relationship report
//! let report = SummaryRenderer::new().render(&model).unwrap();
//! assert!(report.contains("Service ───◇ Logger"));
//! ```

pub mod converter;
pub mod core;
pub mod parser;
pub mod render;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use crate::converter::{convert_to_umlet, relationship_text, shared, Conversion, Converter, Summary};
pub use crate::core::*;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::converter::{Conversion, Converter};
    pub use crate::core::{
        AnalyzerConfig, ConvertError, LayoutOptions, Parser, Relationship, RelationshipKind,
        RenderOptions, Renderer, SourceModel, TypeDeclaration, TypeKind, Visibility,
    };
    pub use crate::parser::{RelationshipAnalyzer, SourceParser};
    pub use crate::render::{PanelRenderer, SummaryRenderer, UxfRenderer};
}

/// Analyze source into a model
///
/// Fails on blank input or when no type declaration is found.
///
/// # Example
/// ```rust
/// use umlify::RelationshipKind;
///
/// let model = umlify::analyze("class Dog extends Animal implements Runnable { }").unwrap();
/// assert_eq!(model.class_count(), 1);
/// assert_eq!(model.relationships[0].kind, RelationshipKind::Inheritance);
/// ```
pub fn analyze(source: &str) -> anyhow::Result<SourceModel> {
    Converter::new().analyze(source)
}

/// Convert source to a UMLet `.uxf` document with default layout
///
/// # Example
/// ```rust
/// use umlify::ConvertError;
///
/// let err = umlify::convert("int x = 5;").unwrap_err();
/// assert!(matches!(
///     err.downcast_ref::<ConvertError>(),
///     Some(ConvertError::NoTypesFound { .. })
/// ));
/// ```
pub fn convert(source: &str) -> anyhow::Result<String> {
    convert_with_options(source, &RenderOptions::default())
}

/// Convert source to a UMLet `.uxf` document with the given options
pub fn convert_with_options(source: &str, options: &RenderOptions) -> anyhow::Result<String> {
    Ok(Converter::new().convert(source, options)?.uml_text)
}
