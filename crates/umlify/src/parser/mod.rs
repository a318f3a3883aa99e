//! Source analysis pipeline
//!
//! Preprocess → declaration scan + type extraction → member extraction →
//! relationship analysis. Every stage works on the cleaned text produced by
//! [`preprocess`].

mod basic_types;
mod declarations;
mod members;
mod preprocess;
mod relationships;
mod structure;

pub use basic_types::{base_type, is_basic_type, BASIC_TYPES};
pub use declarations::{scan_imports, scan_package};
pub use members::{extract_members, parse_parameters};
pub use preprocess::preprocess;
pub use relationships::{find_type_body, RelationshipAnalyzer};
pub use structure::{balanced_block_body, block_body, brace_depth, contains_type_header, extract_types};

use anyhow::Result;
use tracing::{debug, info, span, Level};

use crate::core::{AnalyzerConfig, Parser, SourceModel};

/// Runs the full analysis pipeline over one source text
///
/// Holds no state between calls besides its configuration.
#[derive(Debug, Clone, Default)]
pub struct SourceParser {
    analyzer: RelationshipAnalyzer,
}

impl SourceParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: AnalyzerConfig) -> Self {
        Self {
            analyzer: RelationshipAnalyzer::with_config(config),
        }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        self.analyzer.config()
    }

    /// Analyze raw source into a model
    ///
    /// Never fails: anything that does not match is left out of the model.
    pub fn parse_source(&self, source: &str) -> SourceModel {
        let parse_span = span!(Level::INFO, "parse_source", input_len = source.len());
        let _enter = parse_span.enter();

        let code = preprocess(source);
        let package_name = scan_package(&code);
        let imports = scan_imports(&code);
        debug!(
            package = %package_name,
            import_count = imports.len(),
            "Declarations scanned"
        );

        let classes = extract_types(&code, &package_name);
        let relationships = self.analyzer.analyze_relationships(&code, &classes);

        info!(
            class_count = classes.len(),
            relationship_count = relationships.len(),
            "Source analyzed"
        );

        SourceModel {
            package_name,
            imports,
            classes,
            relationships,
        }
    }
}

impl Parser for SourceParser {
    fn parse(&self, input: &str) -> Result<SourceModel> {
        Ok(self.parse_source(input))
    }

    fn name(&self) -> &'static str {
        "java-source"
    }

    fn version(&self) -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    fn can_parse(&self, input: &str) -> bool {
        contains_type_header(&preprocess(input))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{RelationshipKind, TypeKind};

    const GARAGE: &str = r#"
        package com.example.garage;

        import java.util.List;
        import static java.lang.Math.max;

        /** A car with an engine it builds itself. */
        public class Car {
            private Engine engine;
            private static int count = 0;

            public Car() {
                this.engine = new Engine("V8 {turbo}");
            }

            public void drive(Road road) {
                // a } in a comment
                System.out.println("driving");
            }
        }

        interface Vehicle { void drive(Road road); }
    "#;

    #[test]
    fn test_parse_source() {
        let model = SourceParser::new().parse_source(GARAGE);
        assert_eq!(model.package_name, "com.example.garage");
        assert_eq!(model.imports.len(), 2);
        assert!(model.imports[1].is_static);

        assert_eq!(model.class_count(), 2);
        let car = model.get_class("Car").unwrap();
        assert_eq!(car.kind, TypeKind::Class);
        assert_eq!(car.package_name, "com.example.garage");
        assert_eq!(car.fields.len(), 2);
        assert_eq!(car.constructors.len(), 1);
        assert_eq!(car.methods.len(), 1);

        let vehicle = model.get_class("Vehicle").unwrap();
        assert!(vehicle.methods[0].is_abstract);
    }

    #[test]
    fn test_parse_source_relationships() {
        let model = SourceParser::new().parse_source(GARAGE);
        let kinds: Vec<_> = model
            .relationships
            .iter()
            .map(|r| (r.source.as_str(), r.target.as_str(), r.kind))
            .collect();
        assert_eq!(
            kinds,
            vec![
                ("Car", "Engine", RelationshipKind::Composition),
                ("Car", "Road", RelationshipKind::Dependency),
                ("Vehicle", "Road", RelationshipKind::Dependency),
            ]
        );
    }

    #[test]
    fn test_parser_trait() {
        let parser = SourceParser::new();
        assert_eq!(parser.name(), "java-source");
        assert!(parser.can_parse("public enum Color { RED }"));
        assert!(!parser.can_parse("int x = 5;"));
        assert!(!parser.can_parse("String s = \"class Fake {\";"));

        let model = parser.parse("class A { }").unwrap();
        assert_eq!(model.class_count(), 1);
    }

    #[test]
    fn test_config_is_passed_to_analyzer() {
        let parser = SourceParser::with_config(AnalyzerConfig::new().with_field_associations(true));
        assert!(parser.config().field_associations);

        let model = parser.parse_source("class Car { Engine engine; }");
        assert_eq!(model.relationship_count(), 1);
        assert_eq!(model.relationships[0].kind, RelationshipKind::Association);
    }

    #[test]
    fn test_parse_is_deterministic() {
        let parser = SourceParser::new();
        assert_eq!(parser.parse_source(GARAGE), parser.parse_source(GARAGE));
    }
}
