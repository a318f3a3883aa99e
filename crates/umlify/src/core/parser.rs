//! Core parser trait for class source text
//!
//! A parser turns raw source into a [`SourceModel`]. Pattern mismatches are
//! absorbed silently and only show up as missing entries in the model.

use anyhow::Result;

use super::SourceModel;

/// Core trait for source parsers
///
/// # Example
/// ```
/// use umlify::core::Parser;
/// use umlify::parser::SourceParser;
///
/// let parser = SourceParser::new();
/// let model = parser.parse("class Car { private Engine engine; }").unwrap();
/// assert_eq!(model.class_count(), 1);
/// ```
pub trait Parser: Send + Sync {
    /// Parse source text into a model
    fn parse(&self, input: &str) -> Result<SourceModel>;

    /// Get the name of this parser
    fn name(&self) -> &'static str;

    /// Get the version of this parser
    fn version(&self) -> &'static str;

    /// Check if the input contains anything this parser recognizes
    fn can_parse(&self, input: &str) -> bool;
}
