//! Field and method extraction from an isolated type body
//!
//! Both passes match declaration patterns across the whole body and then
//! keep only matches at relative brace depth zero, which rejects locals
//! inside method bodies and members of nested types.

use regex::{Captures, Regex};
use std::sync::LazyLock;
use tracing::{debug, trace};

use super::structure::brace_depth;
use crate::core::{
    FieldDeclaration, MethodDeclaration, Modifier, ModifierSet, Parameter, TypeDeclaration,
    TypeKind,
};

static FIELD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"\b(public|private|protected)?\s*",
        r"(?:(static|final)\s+)?(?:(static|final)\s+)?\s*",
        r"([a-zA-Z_][a-zA-Z0-9_<>\[\]]*)\s+([a-zA-Z_][a-zA-Z0-9_]*)\s*",
        r"(?:=\s*[^;]+)?\s*;",
    ))
    .unwrap()
});

static METHOD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"\b(public|private|protected)?\s*",
        r"(?:(static|final|abstract)\s+)?(?:(static|final|abstract)\s+)?\s*",
        r"(?:([a-zA-Z_][a-zA-Z0-9_<>\[\]]*|void)\s+)?",
        r"([a-zA-Z_][a-zA-Z0-9_]*)\s*\(([^)]*)\)\s*",
        r"(?:throws\s+[^{;]+)?\s*[{;]",
    ))
    .unwrap()
});

static PARAMETER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:final\s+)?([a-zA-Z_][a-zA-Z0-9_<>\[\]]*)\s+([a-zA-Z_][a-zA-Z0-9_]*)").unwrap()
});

/// Populate fields, methods and constructors of `declaration` from its body
pub fn extract_members(declaration: &mut TypeDeclaration, body: &str) {
    extract_fields(declaration, body);
    extract_methods(declaration, body);
    debug!(
        name = %declaration.name,
        fields = declaration.fields.len(),
        methods = declaration.methods.len(),
        constructors = declaration.constructors.len(),
        "Member extraction completed"
    );
}

/// Only text strictly before the match start counts toward its depth
fn is_top_level(body: &str, start: usize) -> bool {
    brace_depth(&body[..start]) == 0
}

fn modifiers_from(caps: &Captures<'_>, groups: [usize; 3]) -> ModifierSet {
    groups
        .iter()
        .filter_map(|&g| caps.get(g))
        .filter_map(|m| Modifier::from_keyword(m.as_str()))
        .collect()
}

fn extract_fields(declaration: &mut TypeDeclaration, body: &str) {
    for caps in FIELD_RE.captures_iter(body) {
        let (Some(whole), Some(type_name), Some(name)) = (caps.get(0), caps.get(4), caps.get(5))
        else {
            continue;
        };

        if !is_top_level(body, whole.start()) {
            trace!(field = name.as_str(), "Rejected nested field match");
            continue;
        }

        let mut field = FieldDeclaration::new(name.as_str(), type_name.as_str());
        field.modifiers = modifiers_from(&caps, [1, 2, 3]);
        trace!(field = %field.name, type_name = %field.type_name, "Accepted field");
        declaration.add_field(field);
    }
}

/// A match that is really an initializer or a `new` expression, such as the
/// tail of `Engine engine = new Engine();`
fn is_expression(body: &str, start: usize, return_type: Option<&str>) -> bool {
    return_type == Some("new") || body[..start].trim_end().ends_with('=')
}

fn extract_methods(declaration: &mut TypeDeclaration, body: &str) {
    for caps in METHOD_RE.captures_iter(body) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(5)) else {
            continue;
        };
        let return_type = caps.get(4).map(|m| m.as_str());

        if !is_top_level(body, whole.start()) {
            trace!(method = name.as_str(), "Rejected nested method match");
            continue;
        }
        if is_expression(body, whole.start(), return_type) {
            trace!(method = name.as_str(), "Rejected expression match");
            continue;
        }

        let modifiers = modifiers_from(&caps, [1, 2, 3]);
        let mut member = if name.as_str() == declaration.name {
            MethodDeclaration::constructor(name.as_str())
        } else {
            MethodDeclaration::method(name.as_str(), return_type.map(str::to_string))
        };
        member.modifiers = modifiers;
        member.is_abstract =
            modifiers.contains(Modifier::Abstract) || declaration.kind == TypeKind::Interface;

        let parameter_list = caps.get(6).map_or("", |m| m.as_str());
        if !parameter_list.trim().is_empty() {
            member.parameters = parse_parameters(parameter_list);
        }

        trace!(
            member = %member.name,
            constructor = member.is_constructor(),
            parameters = member.parameters.len(),
            "Accepted method"
        );
        declaration.add_member(member);
    }
}

/// Split a parameter list on commas and keep `Type name` pairs
///
/// Generic arguments containing commas are split too; a part that no longer
/// looks like `Type name` is dropped.
pub fn parse_parameters(list: &str) -> Vec<Parameter> {
    list.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .filter_map(|part| {
            let caps = PARAMETER_RE.captures(part)?;
            Some(Parameter::new(caps.get(2)?.as_str(), caps.get(1)?.as_str()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ReturnKind, Visibility};

    fn class_with(body: &str) -> TypeDeclaration {
        let mut declaration = TypeDeclaration::new("Car", TypeKind::Class);
        extract_members(&mut declaration, body);
        declaration
    }

    #[test]
    fn test_simple_fields() {
        let car = class_with(" private Engine engine; public static final int MAX = 4; String name; ");
        assert_eq!(car.fields.len(), 3);

        assert_eq!(car.fields[0].name, "engine");
        assert_eq!(car.fields[0].type_name, "Engine");
        assert_eq!(car.fields[0].visibility(), Visibility::Private);

        assert_eq!(car.fields[1].name, "MAX");
        assert!(car.fields[1].is_static());
        assert!(car.fields[1].is_final());
        assert_eq!(car.fields[1].visibility(), Visibility::Public);

        assert_eq!(car.fields[2].visibility(), Visibility::Package);
    }

    #[test]
    fn test_final_static_order() {
        let car = class_with(" private final static Wheel spare; ");
        assert!(car.fields[0].is_static());
        assert!(car.fields[0].is_final());
    }

    #[test]
    fn test_generic_and_array_field_types() {
        let car = class_with(" private List<Wheel> wheels; private Seat[] seats; ");
        assert_eq!(car.fields[0].type_name, "List<Wheel>");
        assert_eq!(car.fields[1].type_name, "Seat[]");
    }

    #[test]
    fn test_local_variable_is_not_a_field() {
        let car = class_with(" private int speed; void drive() { String temp; int x = 1; } ");
        assert_eq!(car.fields.len(), 1);
        assert_eq!(car.fields[0].name, "speed");
    }

    #[test]
    fn test_field_with_new_initializer() {
        let car = class_with(" private Engine engine = new Engine(); ");
        assert_eq!(car.fields.len(), 1);
        assert_eq!(car.fields[0].name, "engine");
        assert!(car.methods.is_empty());
        assert!(car.constructors.is_empty());
    }

    #[test]
    fn test_constructor_and_methods() {
        let car = class_with(
            " public Car(Engine engine, final String name) { this.engine = engine; } \
              public void drive() { } \
              protected static int count() { return 0; } ",
        );

        assert_eq!(car.constructors.len(), 1);
        let ctor = &car.constructors[0];
        assert!(ctor.is_constructor());
        assert_eq!(ctor.returns, ReturnKind::Constructor);
        assert_eq!(ctor.parameters.len(), 2);
        assert_eq!(ctor.parameters[0], Parameter::new("engine", "Engine"));
        assert_eq!(ctor.parameters[1], Parameter::new("name", "String"));

        assert_eq!(car.methods.len(), 2);
        assert_eq!(car.methods[0].name, "drive");
        assert_eq!(car.methods[0].return_type(), Some("void"));
        assert_eq!(car.methods[1].name, "count");
        assert!(car.methods[1].is_static());
        assert_eq!(car.methods[1].visibility(), Visibility::Protected);
    }

    #[test]
    fn test_abstract_method() {
        let car = class_with(" public abstract void honk(); ");
        assert!(car.methods[0].is_abstract);
    }

    #[test]
    fn test_interface_methods_are_abstract() {
        let mut drawable = TypeDeclaration::new("Drawable", TypeKind::Interface);
        extract_members(&mut drawable, " void draw(); default void reset() { } ");
        assert!(drawable.methods.iter().all(|m| m.is_abstract));
    }

    #[test]
    fn test_throws_clause() {
        let car = class_with(" public void load(String path) throws IOException, ParseException { } ");
        assert_eq!(car.methods.len(), 1);
        assert_eq!(car.methods[0].parameters[0].type_name, "String");
    }

    #[test]
    fn test_nested_control_flow_is_not_a_method() {
        let car = class_with(" void drive() { if (fast) { while (x) { } } } ");
        assert_eq!(car.methods.len(), 1);
        assert_eq!(car.methods[0].name, "drive");
    }

    #[test]
    fn test_parse_parameters() {
        let params = parse_parameters("final int a, Wheel[] wheels , List<Door> doors");
        assert_eq!(params.len(), 3);
        assert_eq!(params[0], Parameter::new("a", "int"));
        assert_eq!(params[1], Parameter::new("wheels", "Wheel[]"));
        assert_eq!(params[2], Parameter::new("doors", "List<Door>"));
    }

    #[test]
    fn test_parse_parameters_splits_generic_commas() {
        let params = parse_parameters("Map<String, Integer> counts");
        assert_eq!(params, vec![Parameter::new("counts", "Integer>")]);
    }

    #[test]
    fn test_depth_uses_prefix_only() {
        assert!(is_top_level(" int a; ", 1));
        assert!(!is_top_level(" { int a; ", 3));
    }
}
