//! Relationship inference between extracted types
//!
//! Declared relationships (inheritance, implementation) come straight from
//! the type headers. Ownership relationships are inferred from how a type
//! obtains the objects held in its fields, checked in priority order:
//!
//! 1. `new T(` inside a constructor body is composition
//! 2. a constructor parameter of type `T` is aggregation
//! 3. `new T(` inside a method body is aggregation
//! 4. a field of type `T` with no other evidence is association, only when
//!    [`AnalyzerConfig::field_associations`] is enabled
//!
//! The first heuristic to match claims the target type. Every method
//! parameter whose type no stronger relationship links becomes its own
//! dependency entry.

use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, span, trace, Level};

use super::basic_types::{base_type, is_basic_type};
use super::structure::{balanced_block_body, block_body};
use crate::core::{
    AnalyzerConfig, FieldDeclaration, Location, Relationship, RelationshipDetails,
    RelationshipKind, TypeDeclaration,
};

static METHOD_BODY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"\b(?:public|private|protected)?\s*(?:static\s+)?(?:final\s+|abstract\s+)?\s*",
        r"([a-zA-Z_][a-zA-Z0-9_<>\[\]]*|void)\s+([a-zA-Z_][a-zA-Z0-9_]*)\s*\([^)]*\)\s*\{",
    ))
    .unwrap()
});

static NEW_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"new\s+([a-zA-Z_][a-zA-Z0-9_]*)\s*\(").unwrap());

/// Field types still eligible for an ownership relationship, in field order
#[derive(Debug, Default)]
struct OwnableTypes(Vec<String>);

impl OwnableTypes {
    fn from_fields(fields: &[FieldDeclaration]) -> Self {
        let mut types = Self::default();
        for field in fields {
            let base = base_type(&field.type_name);
            if !is_basic_type(&base) && !types.0.contains(&base) {
                types.0.push(base);
            }
        }
        types
    }

    fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Remove `type_name` from the set, returning whether it was present
    fn claim(&mut self, type_name: &str) -> bool {
        match self.0.iter().position(|t| t == type_name) {
            Some(index) => {
                self.0.remove(index);
                true
            }
            None => false,
        }
    }

    fn remaining(&self) -> &[String] {
        &self.0
    }
}

/// Infers relationships for a list of extracted types
#[derive(Debug, Clone, Default)]
pub struct RelationshipAnalyzer {
    config: AnalyzerConfig,
}

impl RelationshipAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Analyze every type in extraction order
    ///
    /// `code` must be the same cleaned source the types were extracted from;
    /// each type's body is located again by name.
    pub fn analyze_relationships(&self, code: &str, types: &[TypeDeclaration]) -> Vec<Relationship> {
        let analyze_span = span!(Level::DEBUG, "analyze_relationships", type_count = types.len());
        let _enter = analyze_span.enter();

        let mut relationships = Vec::new();
        for declaration in types {
            let name = declaration.name.as_str();

            if let Some(super_type) = &declaration.super_type {
                relationships.push(Relationship::new(
                    name,
                    super_type.as_str(),
                    RelationshipKind::Inheritance,
                ));
            }
            for interface in &declaration.interfaces {
                relationships.push(Relationship::new(
                    name,
                    interface.as_str(),
                    RelationshipKind::Implementation,
                ));
            }

            let Some(body) = find_type_body(code, name) else {
                debug!(name, "Type header not found on rescan, skipping body analysis");
                continue;
            };

            self.find_ownership(declaration, body, &mut relationships);
            find_dependencies(declaration, &mut relationships);
        }

        debug!(relationship_count = relationships.len(), "Relationship analysis completed");
        relationships
    }

    fn find_ownership(
        &self,
        declaration: &TypeDeclaration,
        body: &str,
        relationships: &mut Vec<Relationship>,
    ) {
        let name = declaration.name.as_str();
        let mut ownable = OwnableTypes::from_fields(&declaration.fields);
        if ownable.is_empty() {
            return;
        }

        for constructor_body in constructor_bodies(body, name) {
            for target in new_targets(constructor_body) {
                if ownable.claim(target) {
                    trace!(source = name, to = target, "Composition from constructor");
                    relationships.push(
                        Relationship::new(name, target, RelationshipKind::Composition)
                            .with_details(RelationshipDetails::at(Location::Constructor)),
                    );
                }
            }
        }

        for constructor in declaration.all_constructors() {
            for parameter in &constructor.parameters {
                let target = base_type(&parameter.type_name);
                if ownable.claim(&target) {
                    trace!(source = name, to = %target, "Aggregation from constructor parameter");
                    relationships.push(
                        Relationship::new(name, target, RelationshipKind::Aggregation).with_details(
                            RelationshipDetails::at(Location::ConstructorParameter)
                                .with_parameter(parameter.name.as_str()),
                        ),
                    );
                }
            }
        }

        for (method, method_body) in method_bodies(body, name) {
            for target in new_targets(method_body) {
                if ownable.claim(target) {
                    trace!(source = name, to = target, method, "Aggregation from method");
                    relationships.push(
                        Relationship::new(name, target, RelationshipKind::Aggregation).with_details(
                            RelationshipDetails::at(Location::Method).with_member(method),
                        ),
                    );
                }
            }
        }

        if self.config.field_associations {
            for target in ownable.remaining() {
                let mut details = RelationshipDetails::at(Location::Field);
                if let Some(field) = declaration
                    .fields
                    .iter()
                    .find(|f| base_type(&f.type_name) == *target)
                {
                    details = details.with_member(field.name.as_str());
                }
                relationships.push(
                    Relationship::new(name, target.as_str(), RelationshipKind::Association)
                        .with_details(details),
                );
            }
        }
    }
}

/// One dependency per method parameter unless a non-dependency relationship
/// already links the pair
fn find_dependencies(declaration: &TypeDeclaration, relationships: &mut Vec<Relationship>) {
    let name = declaration.name.as_str();
    for method in &declaration.methods {
        for parameter in &method.parameters {
            let target = base_type(&parameter.type_name);
            if is_basic_type(&target) {
                continue;
            }
            if relationships
                .iter()
                .any(|r| r.kind != RelationshipKind::Dependency && r.links(name, &target))
            {
                trace!(source = name, to = %target, "Dependency pre-empted");
                continue;
            }
            relationships.push(
                Relationship::new(name, target, RelationshipKind::Dependency).with_details(
                    RelationshipDetails::default()
                        .with_member(method.name.as_str())
                        .with_parameter(parameter.name.as_str()),
                ),
            );
        }
    }
}

/// Body of the first `class|interface|enum <name> ... {` header in `code`
///
/// No word boundary follows the name, so `Car` also matches the header of a
/// `CarFactory` that appears first.
pub fn find_type_body<'a>(code: &'a str, name: &str) -> Option<&'a str> {
    let pattern = format!(
        r"\b(?:class|interface|enum)\s+{}\s*(?:<[^>]*>)?[^{{]*\{{",
        regex::escape(name)
    );
    let header = Regex::new(&pattern).ok()?.find(code)?;
    Some(block_body(code, header.end() - 1))
}

fn constructor_bodies<'a>(body: &'a str, name: &str) -> Vec<&'a str> {
    let pattern = format!(
        r"\b(?:public|private|protected)?\s*{}\s*\([^)]*\)\s*\{{",
        regex::escape(name)
    );
    let Ok(constructor_re) = Regex::new(&pattern) else {
        return Vec::new();
    };
    constructor_re
        .find_iter(body)
        .filter_map(|m| balanced_block_body(body, m.end() - 1))
        .collect()
}

/// `(method name, body)` for every method header with a return type
fn method_bodies<'a>(body: &'a str, type_name: &str) -> Vec<(&'a str, &'a str)> {
    METHOD_BODY_RE
        .captures_iter(body)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let method = caps.get(2)?.as_str();
            if method == type_name {
                return None;
            }
            Some((method, balanced_block_body(body, whole.end() - 1)?))
        })
        .collect()
}

fn new_targets(body: &str) -> impl Iterator<Item = &str> {
    NEW_RE
        .captures_iter(body)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
}
