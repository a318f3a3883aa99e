//! Extracted source model
//!
//! Stores the declared types, their members, and the relationships inferred
//! between them. Every value is rebuilt from scratch on each analysis call.

use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;

use super::types::{Location, Modifier, ModifierSet, RelationshipKind, TypeKind, Visibility};

/// A method or constructor parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
}

impl Parameter {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }
}

/// A field declared at the top level of a type body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDeclaration {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub modifiers: ModifierSet,
}

impl FieldDeclaration {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            modifiers: ModifierSet::new(),
        }
    }

    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.modifiers.insert(modifier);
        self
    }

    pub fn visibility(&self) -> Visibility {
        self.modifiers.visibility()
    }

    pub fn is_static(&self) -> bool {
        self.modifiers.contains(Modifier::Static)
    }

    pub fn is_final(&self) -> bool {
        self.modifiers.contains(Modifier::Final)
    }
}

/// What a method header says about its result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "type", rename_all = "lowercase")]
pub enum ReturnKind {
    /// The header names the owning type: no return type
    Constructor,
    /// A declared return type, including `void`
    Value(String),
    /// No return type was matched and the name is not the owning type's
    Unspecified,
}

/// A method or constructor declared at the top level of a type body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodDeclaration {
    pub name: String,
    pub returns: ReturnKind,
    pub modifiers: ModifierSet,
    pub parameters: Vec<Parameter>,
    pub is_abstract: bool,
}

impl MethodDeclaration {
    /// Create a method; `return_type` of `None` yields [`ReturnKind::Unspecified`]
    pub fn method(name: impl Into<String>, return_type: Option<String>) -> Self {
        Self {
            name: name.into(),
            returns: return_type.map_or(ReturnKind::Unspecified, ReturnKind::Value),
            modifiers: ModifierSet::new(),
            parameters: Vec::new(),
            is_abstract: false,
        }
    }

    pub fn constructor(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            returns: ReturnKind::Constructor,
            modifiers: ModifierSet::new(),
            parameters: Vec::new(),
            is_abstract: false,
        }
    }

    pub fn with_modifiers(mut self, modifiers: ModifierSet) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn is_constructor(&self) -> bool {
        matches!(self.returns, ReturnKind::Constructor)
    }

    /// The declared return type; `None` for constructors and unmatched returns
    pub fn return_type(&self) -> Option<&str> {
        match &self.returns {
            ReturnKind::Value(t) => Some(t),
            _ => None,
        }
    }

    pub fn visibility(&self) -> Visibility {
        self.modifiers.visibility()
    }

    pub fn is_static(&self) -> bool {
        self.modifiers.contains(Modifier::Static)
    }

    pub fn is_final(&self) -> bool {
        self.modifiers.contains(Modifier::Final)
    }
}

/// A class, interface, or enum declaration
///
/// The `is_*` flags are read from `kind` and `modifiers` on every call, so
/// editing either field directly keeps them current.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDeclaration {
    pub name: String,
    pub kind: TypeKind,
    pub package_name: String,
    pub modifiers: ModifierSet,
    pub fields: Vec<FieldDeclaration>,
    pub methods: Vec<MethodDeclaration>,
    pub constructors: Vec<MethodDeclaration>,
    pub super_type: Option<String>,
    pub interfaces: Vec<String>,
}

impl TypeDeclaration {
    pub fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            package_name: String::new(),
            modifiers: ModifierSet::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            constructors: Vec::new(),
            super_type: None,
            interfaces: Vec::new(),
        }
    }

    pub fn add_modifier(&mut self, modifier: Modifier) {
        self.modifiers.insert(modifier);
    }

    pub fn is_interface(&self) -> bool {
        self.kind == TypeKind::Interface
    }

    pub fn is_abstract(&self) -> bool {
        self.kind == TypeKind::Abstract || self.modifiers.contains(Modifier::Abstract)
    }

    pub fn is_enum(&self) -> bool {
        self.kind == TypeKind::Enum
    }

    pub fn is_final(&self) -> bool {
        self.modifiers.contains(Modifier::Final)
    }

    pub fn add_field(&mut self, field: FieldDeclaration) {
        self.fields.push(field);
    }

    /// Route a member to `constructors` or `methods` by its return kind
    pub fn add_member(&mut self, member: MethodDeclaration) {
        if member.is_constructor() {
            self.constructors.push(member);
        } else {
            self.methods.push(member);
        }
    }

    /// Constructors, including any stray constructor entries in `methods`
    pub fn all_constructors(&self) -> impl Iterator<Item = &MethodDeclaration> {
        self.constructors
            .iter()
            .chain(self.methods.iter().filter(|m| m.is_constructor()))
    }
}

impl Serialize for TypeDeclaration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("TypeDeclaration", 13)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("kind", &self.kind)?;
        state.serialize_field("package_name", &self.package_name)?;
        state.serialize_field("modifiers", &self.modifiers)?;
        state.serialize_field("fields", &self.fields)?;
        state.serialize_field("methods", &self.methods)?;
        state.serialize_field("constructors", &self.constructors)?;
        state.serialize_field("super_type", &self.super_type)?;
        state.serialize_field("interfaces", &self.interfaces)?;
        state.serialize_field("is_interface", &self.is_interface())?;
        state.serialize_field("is_abstract", &self.is_abstract())?;
        state.serialize_field("is_enum", &self.is_enum())?;
        state.serialize_field("is_final", &self.is_final())?;
        state.end()
    }
}

/// An `import` statement
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Import {
    pub is_static: bool,
    pub path: String,
}

/// Provenance attached to an inferred relationship
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct RelationshipDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    /// Originating method or field name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameter: Option<String>,
}

impl RelationshipDetails {
    pub fn at(location: Location) -> Self {
        Self {
            location: Some(location),
            ..Self::default()
        }
    }

    pub fn with_member(mut self, member: impl Into<String>) -> Self {
        self.member = Some(member.into());
        self
    }

    pub fn with_parameter(mut self, parameter: impl Into<String>) -> Self {
        self.parameter = Some(parameter.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.location.is_none() && self.member.is_none() && self.parameter.is_none()
    }
}

/// A relationship between two type names
///
/// Both ends are unresolved names and may reference types outside the
/// parsed source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Relationship {
    pub source: String,
    pub target: String,
    pub kind: RelationshipKind,
    pub details: RelationshipDetails,
}

impl Relationship {
    pub fn new(source: impl Into<String>, target: impl Into<String>, kind: RelationshipKind) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            kind,
            details: RelationshipDetails::default(),
        }
    }

    pub fn with_details(mut self, details: RelationshipDetails) -> Self {
        self.details = details;
        self
    }

    pub fn links(&self, source: &str, target: &str) -> bool {
        self.source == source && self.target == target
    }
}

/// Everything extracted from one source text
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SourceModel {
    pub package_name: String,
    pub imports: Vec<Import>,
    pub classes: Vec<TypeDeclaration>,
    pub relationships: Vec<Relationship>,
}

impl SourceModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn package(&self) -> Option<&str> {
        if self.package_name.is_empty() {
            None
        } else {
            Some(&self.package_name)
        }
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    pub fn relationship_count(&self) -> usize {
        self.relationships.len()
    }

    pub fn field_count(&self) -> usize {
        self.classes.iter().map(|c| c.fields.len()).sum()
    }

    /// Number of non-constructor methods across all types
    pub fn method_count(&self) -> usize {
        self.classes.iter().map(|c| c.methods.len()).sum()
    }

    /// First declaration with the given name
    pub fn get_class(&self, name: &str) -> Option<&TypeDeclaration> {
        self.classes.iter().find(|c| c.name == name)
    }

    pub fn relationships_of_kind(
        &self,
        kind: RelationshipKind,
    ) -> impl Iterator<Item = &Relationship> {
        self.relationships.iter().filter(move |r| r.kind == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_empty_type() {
        let declaration = TypeDeclaration::new("Animal", TypeKind::Class);
        assert_eq!(declaration.name, "Animal");
        assert!(declaration.fields.is_empty());
        assert!(declaration.super_type.is_none());
        assert!(!declaration.is_abstract());
        assert!(!declaration.is_interface());
    }

    #[test]
    fn test_flags_follow_modifiers() {
        let mut declaration = TypeDeclaration::new("Shape", TypeKind::Class);
        assert!(!declaration.is_abstract());
        declaration.add_modifier(Modifier::Abstract);
        assert!(declaration.is_abstract());
        declaration.add_modifier(Modifier::Final);
        assert!(declaration.is_final());
    }

    #[test]
    fn test_flags_follow_direct_field_edits() {
        let mut declaration = TypeDeclaration::new("Shape", TypeKind::Class);
        declaration.modifiers.insert(Modifier::Abstract);
        assert!(declaration.is_abstract());

        declaration.modifiers = ModifierSet::new();
        assert!(!declaration.is_abstract());

        declaration.kind = TypeKind::Interface;
        assert!(declaration.is_interface());
        assert!(!declaration.is_enum());

        declaration.kind = TypeKind::Enum;
        assert!(declaration.is_enum());
        assert!(!declaration.is_interface());
    }

    #[test]
    fn test_serialized_flags_match_getters() {
        let mut declaration = TypeDeclaration::new("Shape", TypeKind::Interface);
        declaration.modifiers.insert(Modifier::Final);
        let json = serde_json::to_value(&declaration).unwrap();
        assert_eq!(json["is_interface"], true);
        assert_eq!(json["is_abstract"], false);
        assert_eq!(json["is_final"], true);
        assert_eq!(json["name"], "Shape");
    }

    #[test]
    fn test_flags_follow_kind() {
        assert!(TypeDeclaration::new("Runnable", TypeKind::Interface).is_interface());
        assert!(TypeDeclaration::new("Color", TypeKind::Enum).is_enum());
        assert!(TypeDeclaration::new("Base", TypeKind::Abstract).is_abstract());
    }

    #[test]
    fn test_add_member_routes_constructors() {
        let mut declaration = TypeDeclaration::new("Car", TypeKind::Class);
        declaration.add_member(MethodDeclaration::constructor("Car"));
        declaration.add_member(MethodDeclaration::method("drive", Some("void".to_string())));

        assert_eq!(declaration.constructors.len(), 1);
        assert_eq!(declaration.methods.len(), 1);
        assert_eq!(declaration.all_constructors().count(), 1);
    }

    #[test]
    fn test_return_kinds() {
        let ctor = MethodDeclaration::constructor("Car");
        assert!(ctor.is_constructor());
        assert_eq!(ctor.return_type(), None);

        let method = MethodDeclaration::method("size", Some("int".to_string()));
        assert_eq!(method.return_type(), Some("int"));

        let bare = MethodDeclaration::method("foo", None);
        assert_eq!(bare.returns, ReturnKind::Unspecified);
        assert!(!bare.is_constructor());
    }

    #[test]
    fn test_field_flags() {
        let field = FieldDeclaration::new("COUNT", "int")
            .with_modifier(Modifier::Private)
            .with_modifier(Modifier::Static)
            .with_modifier(Modifier::Final);
        assert_eq!(field.visibility(), Visibility::Private);
        assert!(field.is_static());
        assert!(field.is_final());
    }

    #[test]
    fn test_model_counts() {
        let mut car = TypeDeclaration::new("Car", TypeKind::Class);
        car.add_field(FieldDeclaration::new("engine", "Engine"));
        car.add_member(MethodDeclaration::constructor("Car"));
        car.add_member(MethodDeclaration::method("drive", Some("void".to_string())));

        let model = SourceModel {
            classes: vec![car],
            relationships: vec![Relationship::new(
                "Car",
                "Engine",
                RelationshipKind::Composition,
            )],
            ..SourceModel::default()
        };

        assert_eq!(model.class_count(), 1);
        assert_eq!(model.field_count(), 1);
        assert_eq!(model.method_count(), 1);
        assert_eq!(model.relationship_count(), 1);
        assert!(model.get_class("Car").is_some());
        assert!(model.get_class("Bus").is_none());
        assert_eq!(
            model.relationships_of_kind(RelationshipKind::Composition).count(),
            1
        );
        assert!(model.package().is_none());
    }

    #[test]
    fn test_details_builder() {
        let details = RelationshipDetails::at(Location::Method)
            .with_member("process")
            .with_parameter("order");
        assert_eq!(details.location, Some(Location::Method));
        assert_eq!(details.member.as_deref(), Some("process"));
        assert!(!details.is_empty());
        assert!(RelationshipDetails::default().is_empty());
    }
}
