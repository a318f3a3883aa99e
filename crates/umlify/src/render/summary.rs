//! Human-readable relationship report

use anyhow::Result;
use serde::Serialize;
use std::fmt::Write;

use crate::core::{Location, Relationship, RelationshipKind, Renderer, SourceModel};

/// Relationships of one kind, in analysis order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelationshipGroup {
    pub kind: RelationshipKind,
    pub relationships: Vec<Relationship>,
}

/// One group per relationship kind, in [`RelationshipKind::ALL`] order,
/// including empty groups
pub fn group_by_kind(relationships: &[Relationship]) -> Vec<RelationshipGroup> {
    RelationshipKind::ALL
        .iter()
        .map(|&kind| RelationshipGroup {
            kind,
            relationships: relationships.iter().filter(|r| r.kind == kind).cloned().collect(),
        })
        .collect()
}

/// Arrow drawn between source and target in the report
pub fn arrow(kind: RelationshipKind) -> &'static str {
    match kind {
        RelationshipKind::Inheritance => "───▷",
        RelationshipKind::Implementation => "┈┈┈▷",
        RelationshipKind::Composition => "───◆",
        RelationshipKind::Aggregation => "───◇",
        RelationshipKind::Association => "─────",
        RelationshipKind::Dependency => "┈┈┈→",
    }
}

fn title(kind: RelationshipKind) -> &'static str {
    match kind {
        RelationshipKind::Inheritance => "Inheritance",
        RelationshipKind::Implementation => "Interface implementation",
        RelationshipKind::Composition => "Composition",
        RelationshipKind::Aggregation => "Aggregation",
        RelationshipKind::Association => "Association",
        RelationshipKind::Dependency => "Dependency",
    }
}

fn legend(kind: RelationshipKind) -> &'static str {
    match kind {
        RelationshipKind::Inheritance => "(solid line, hollow triangle)",
        RelationshipKind::Implementation => "(dashed line, hollow triangle)",
        RelationshipKind::Composition => "(solid line, filled diamond)",
        RelationshipKind::Aggregation => "(solid line, hollow diamond)",
        RelationshipKind::Association => "(plain line)",
        RelationshipKind::Dependency => "(dashed line, open arrow)",
    }
}

/// Where the evidence for a relationship was found, if recorded
fn provenance(relationship: &Relationship) -> Option<String> {
    let details = &relationship.details;
    match (details.location, relationship.kind) {
        (Some(Location::Constructor), _) => Some("- object created in constructor".to_string()),
        (Some(Location::ConstructorParameter), _) => Some(format!(
            "- received as constructor parameter `{}`",
            details.parameter.as_deref().unwrap_or("?")
        )),
        (Some(Location::Method), _) => Some(match &details.member {
            Some(method) => format!("- object created in method `{method}`"),
            None => "- object created in a method".to_string(),
        }),
        (Some(Location::Field), _) => details
            .member
            .as_ref()
            .map(|field| format!("- field: {field}")),
        (None, RelationshipKind::Dependency) => match (&details.member, &details.parameter) {
            (Some(method), Some(parameter)) => Some(format!("- method: {method}({parameter})")),
            _ => None,
        },
        (None, _) => None,
    }
}

const NOTHING_FOUND: &str = "No relationships between classes were found.

The analyzer looks for:
- inheritance through `extends`
- interface implementation through `implements`
- objects created with `new` (composition, aggregation)
- objects received as constructor parameters (aggregation)
- other classes used as method parameters (dependency)
";

/// Numbered relationship report grouped by kind
#[derive(Debug, Clone, Copy, Default)]
pub struct SummaryRenderer;

impl SummaryRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for SummaryRenderer {
    type Output = String;

    fn render(&self, model: &SourceModel) -> Result<String> {
        if model.relationships.is_empty() {
            return Ok(NOTHING_FOUND.to_string());
        }

        let mut output = String::from("■ Relationship overview\n");
        writeln!(output, "Relationships found: {}\n", model.relationship_count())?;

        let mut number = 0;
        for group in group_by_kind(&model.relationships) {
            for relationship in &group.relationships {
                number += 1;
                writeln!(output, "{number}. {}:", title(group.kind))?;
                writeln!(
                    output,
                    "   {} {} {}",
                    relationship.source,
                    arrow(group.kind),
                    relationship.target
                )?;
                writeln!(output, "   {}", legend(group.kind))?;
                if let Some(line) = provenance(relationship) {
                    writeln!(output, "   {line}")?;
                }
                output.push('\n');
            }
        }

        Ok(output)
    }

    fn name(&self) -> &'static str {
        "summary"
    }

    fn format(&self) -> &'static str {
        "text"
    }
}
