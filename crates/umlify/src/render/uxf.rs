//! UMLet `.uxf` document output

use anyhow::{Context, Result};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Write;
use tracing::{debug, span, Level};

use super::layout::{ClassBox, GridLayout, RelationLine};
use super::panel::panel_text;
use crate::core::{LayoutOptions, RelationshipKind, Renderer, SourceModel};

const UMLET_VERSION: &str = "14.3.0";
const ZOOM_LEVEL: &str = "10";

/// UMLet line type for a relationship; the arrow head sits on the first point
pub fn line_type(kind: RelationshipKind) -> &'static str {
    match kind {
        RelationshipKind::Inheritance => "<<-",
        RelationshipKind::Implementation => "<<.",
        RelationshipKind::Composition => "<<<<-",
        RelationshipKind::Aggregation => "<<<-",
        RelationshipKind::Association => "-",
        RelationshipKind::Dependency => "<.",
    }
}

/// Renders the model as a single UMLet diagram
#[derive(Debug, Clone, Default)]
pub struct UxfRenderer {
    layout: GridLayout,
}

impl UxfRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_layout(options: LayoutOptions) -> Self {
        Self {
            layout: GridLayout::new(options),
        }
    }

    fn write_document<W: Write>(&self, writer: &mut Writer<W>, model: &SourceModel) -> Result<()> {
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("no"))))?;

        let mut diagram = BytesStart::new("diagram");
        diagram.push_attribute(("program", "umlet"));
        diagram.push_attribute(("version", UMLET_VERSION));
        writer.write_event(Event::Start(diagram))?;
        write_text_element(writer, "zoom_level", ZOOM_LEVEL)?;

        let boxes = self.layout.layout_classes(model);
        for (declaration, class_box) in model.classes.iter().zip(&boxes) {
            write_class(writer, class_box, &panel_text(declaration))?;
        }
        for relationship in &model.relationships {
            let line = self.layout.route(relationship, &boxes);
            write_relation(writer, &line, line_type(relationship.kind))?;
        }

        writer.write_event(Event::End(BytesEnd::new("diagram")))?;
        Ok(())
    }
}

fn write_text_element<W: Write>(writer: &mut Writer<W>, tag: &str, text: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

fn write_coordinates<W: Write>(
    writer: &mut Writer<W>,
    x: i32,
    y: i32,
    width: i32,
    height: i32,
) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new("coordinates")))?;
    write_text_element(writer, "x", &x.to_string())?;
    write_text_element(writer, "y", &y.to_string())?;
    write_text_element(writer, "w", &width.to_string())?;
    write_text_element(writer, "h", &height.to_string())?;
    writer.write_event(Event::End(BytesEnd::new("coordinates")))?;
    Ok(())
}

fn write_class<W: Write>(writer: &mut Writer<W>, class_box: &ClassBox, panel: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new("element")))?;
    write_text_element(writer, "id", "UMLClass")?;
    write_coordinates(writer, class_box.x, class_box.y, class_box.width, class_box.height)?;
    write_text_element(writer, "panel_attributes", panel)?;
    writer.write_event(Event::Empty(BytesStart::new("additional_attributes")))?;
    writer.write_event(Event::End(BytesEnd::new("element")))?;
    Ok(())
}

fn write_relation<W: Write>(writer: &mut Writer<W>, line: &RelationLine, line_type: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new("element")))?;
    write_text_element(writer, "id", "Relation")?;
    write_coordinates(writer, line.x, line.y, line.width, line.height)?;
    write_text_element(writer, "panel_attributes", &format!("lt={line_type}"))?;
    write_text_element(writer, "additional_attributes", &line.attributes())?;
    writer.write_event(Event::End(BytesEnd::new("element")))?;
    Ok(())
}

impl Renderer for UxfRenderer {
    type Output = String;

    fn render(&self, model: &SourceModel) -> Result<String> {
        let render_span = span!(
            Level::DEBUG,
            "render_uxf",
            class_count = model.class_count(),
            relationship_count = model.relationship_count()
        );
        let _enter = render_span.enter();

        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
        self.write_document(&mut writer, model)?;
        let document =
            String::from_utf8(writer.into_inner()).context("UMLet document is not valid UTF-8")?;

        debug!(output_len = document.len(), "UMLet document rendered");
        Ok(document)
    }

    fn name(&self) -> &'static str {
        "uxf"
    }

    fn format(&self) -> &'static str {
        "xml"
    }
}
