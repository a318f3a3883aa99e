//! UMLet panel text
//!
//! The text UMLet shows inside a class box, plus a copy-paste document that
//! lists every panel and the inheritance/implementation relation stubs.

use anyhow::Result;
use std::fmt::Write;

use crate::core::{FieldDeclaration, MethodDeclaration, Parameter, Renderer, SourceModel, TypeDeclaration};

/// Panel text for one type
///
/// ```text
/// <<interface>>      (interfaces and enums only)
/// Name               (/Name/ when abstract)
/// --
/// fields             (one blank line when there are none)
/// --
/// constructors, then methods
/// ```
pub fn panel_text(declaration: &TypeDeclaration) -> String {
    let mut text = String::new();

    if declaration.is_interface() {
        text.push_str("<<interface>>\n");
    } else if declaration.is_enum() {
        text.push_str("<<enumeration>>\n");
    }

    if declaration.is_abstract() {
        let _ = writeln!(text, "/{}/", declaration.name);
    } else {
        let _ = writeln!(text, "{}", declaration.name);
    }
    text.push_str("--\n");

    if declaration.fields.is_empty() {
        text.push('\n');
    }
    for field in &declaration.fields {
        let _ = writeln!(text, "{}", field_line(field));
    }
    text.push_str("--\n");

    for constructor in &declaration.constructors {
        let _ = writeln!(text, "{}", constructor_line(constructor));
    }
    for method in &declaration.methods {
        let _ = writeln!(text, "{}", method_line(method));
    }
    if declaration.constructors.is_empty() && declaration.methods.is_empty() {
        text.push('\n');
    }

    text.trim().to_string()
}

fn field_line(field: &FieldDeclaration) -> String {
    let line = format!("{} {} : {}", field.visibility().to_char(), field.name, field.type_name);
    if field.is_static() {
        format!("_{line}_")
    } else {
        line
    }
}

fn parameter_list(parameters: &[Parameter]) -> String {
    parameters
        .iter()
        .map(|p| format!("{} : {}", p.name, p.type_name))
        .collect::<Vec<_>>()
        .join(", ")
}

fn constructor_line(constructor: &MethodDeclaration) -> String {
    format!(
        "{} {}({})",
        constructor.visibility().to_char(),
        constructor.name,
        parameter_list(&constructor.parameters)
    )
}

fn method_line(method: &MethodDeclaration) -> String {
    let mut line = format!(
        "{} {}({}) : {}",
        method.visibility().to_char(),
        method.name,
        parameter_list(&method.parameters),
        method.return_type().unwrap_or("void")
    );
    if method.is_abstract {
        line = format!("/{line}/");
    }
    if method.is_static() {
        line = format!("_{line}_");
    }
    line
}

/// Relation stubs for declared supertypes and interfaces
///
/// Each stub is a comment, the UMLet line type, then the supertype and the
/// subtype on their own lines.
pub fn declared_relation_stubs(classes: &[TypeDeclaration]) -> String {
    let mut text = String::new();
    for declaration in classes {
        if let Some(super_type) = &declaration.super_type {
            let _ = writeln!(text, "// {} extends {}", declaration.name, super_type);
            let _ = writeln!(text, "type=lt=<|-\n{}\n{}\n", super_type, declaration.name);
        }
        for interface in &declaration.interfaces {
            let _ = writeln!(text, "// {} implements {}", declaration.name, interface);
            let _ = writeln!(text, "type=lt=<<|..\n{}\n{}\n", interface, declaration.name);
        }
    }
    text
}

/// Copy-paste document with every panel
#[derive(Debug, Clone, Copy, Default)]
pub struct PanelRenderer;

impl PanelRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for PanelRenderer {
    type Output = String;

    fn render(&self, model: &SourceModel) -> Result<String> {
        let mut output = String::from("// UMLet Text Output\n");
        if let Some(package) = model.package() {
            writeln!(output, "// Package: {package}")?;
        }
        output.push_str("// --- Class Definitions ---\n\n");

        for declaration in &model.classes {
            writeln!(output, "{}\n", panel_text(declaration))?;
        }

        if model.classes.len() > 1 {
            output.push_str("// --- Relations (inheritance, implementation) ---\n\n");
            output.push_str(&declared_relation_stubs(&model.classes));
        }

        Ok(output)
    }

    fn name(&self) -> &'static str {
        "panel"
    }

    fn format(&self) -> &'static str {
        "text"
    }
}
