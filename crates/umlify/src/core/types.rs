//! Core type definitions for class analysis
//!
//! This module contains the closed enumerations used throughout umlify:
//! declaration kinds, modifiers, member visibility, and relationship kinds.

use serde::Serialize;
use std::fmt;

/// The kind of a type declaration
///
/// `Abstract` exists for declarations built programmatically; the structural
/// extractor itself records `abstract class` as `Class` plus the `abstract`
/// modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    #[default]
    Class,
    Interface,
    Enum,
    Abstract,
}

impl TypeKind {
    /// Map a header keyword (`class`, `interface`, `enum`) to a kind
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "class" => Some(TypeKind::Class),
            "interface" => Some(TypeKind::Interface),
            "enum" => Some(TypeKind::Enum),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TypeKind::Class => "class",
            TypeKind::Interface => "interface",
            TypeKind::Enum => "enum",
            TypeKind::Abstract => "abstract",
        }
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A declaration modifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Modifier {
    Public,
    Private,
    Protected,
    Static,
    Final,
    Abstract,
}

impl Modifier {
    pub const ALL: [Modifier; 6] = [
        Modifier::Public,
        Modifier::Private,
        Modifier::Protected,
        Modifier::Static,
        Modifier::Final,
        Modifier::Abstract,
    ];

    /// Parse a modifier keyword; surrounding whitespace is ignored
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.trim() {
            "public" => Some(Modifier::Public),
            "private" => Some(Modifier::Private),
            "protected" => Some(Modifier::Protected),
            "static" => Some(Modifier::Static),
            "final" => Some(Modifier::Final),
            "abstract" => Some(Modifier::Abstract),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Modifier::Public => "public",
            Modifier::Private => "private",
            Modifier::Protected => "protected",
            Modifier::Static => "static",
            Modifier::Final => "final",
            Modifier::Abstract => "abstract",
        }
    }

    fn bit(self) -> u8 {
        match self {
            Modifier::Public => 1 << 0,
            Modifier::Private => 1 << 1,
            Modifier::Protected => 1 << 2,
            Modifier::Static => 1 << 3,
            Modifier::Final => 1 << 4,
            Modifier::Abstract => 1 << 5,
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A set of modifiers over the closed [`Modifier`] enumeration
///
/// Stored as a bit set, so inserting the same modifier twice is a no-op and
/// iteration always follows declaration order of [`Modifier::ALL`].
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct ModifierSet(u8);

impl ModifierSet {
    pub fn new() -> Self {
        Self(0)
    }

    pub fn insert(&mut self, modifier: Modifier) {
        self.0 |= modifier.bit();
    }

    pub fn with(mut self, modifier: Modifier) -> Self {
        self.insert(modifier);
        self
    }

    pub fn contains(&self, modifier: Modifier) -> bool {
        self.0 & modifier.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn iter(&self) -> impl Iterator<Item = Modifier> + '_ {
        Modifier::ALL.into_iter().filter(|m| self.contains(*m))
    }

    /// Visibility derived from the set; `public` wins over `private`, which
    /// wins over `protected`
    pub fn visibility(&self) -> Visibility {
        if self.contains(Modifier::Public) {
            Visibility::Public
        } else if self.contains(Modifier::Private) {
            Visibility::Private
        } else if self.contains(Modifier::Protected) {
            Visibility::Protected
        } else {
            Visibility::Package
        }
    }
}

impl FromIterator<Modifier> for ModifierSet {
    fn from_iter<I: IntoIterator<Item = Modifier>>(iter: I) -> Self {
        let mut set = ModifierSet::new();
        for modifier in iter {
            set.insert(modifier);
        }
        set
    }
}

impl fmt::Debug for ModifierSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl Serialize for ModifierSet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

/// Visibility of a member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,    // +
    Private,   // -
    Protected, // #
    #[default]
    Package, // ~
}

impl Visibility {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Visibility::Public),
            '-' => Some(Visibility::Private),
            '#' => Some(Visibility::Protected),
            '~' => Some(Visibility::Package),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Visibility::Public => '+',
            Visibility::Private => '-',
            Visibility::Protected => '#',
            Visibility::Package => '~',
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Visibility::Public => write!(f, "public"),
            Visibility::Private => write!(f, "private"),
            Visibility::Protected => write!(f, "protected"),
            Visibility::Package => write!(f, "package"),
        }
    }
}

/// Relationship kinds between types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationshipKind {
    Inheritance,
    Implementation,
    Composition,
    Aggregation,
    Association,
    Dependency,
}

impl RelationshipKind {
    /// All kinds in report order
    pub const ALL: [RelationshipKind; 6] = [
        RelationshipKind::Inheritance,
        RelationshipKind::Implementation,
        RelationshipKind::Composition,
        RelationshipKind::Aggregation,
        RelationshipKind::Association,
        RelationshipKind::Dependency,
    ];

    /// Inheritance and implementation come straight from the declaration
    /// header and never compete with the inferred kinds
    pub fn is_declared(&self) -> bool {
        matches!(
            self,
            RelationshipKind::Inheritance | RelationshipKind::Implementation
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RelationshipKind::Inheritance => "inheritance",
            RelationshipKind::Implementation => "implementation",
            RelationshipKind::Composition => "composition",
            RelationshipKind::Aggregation => "aggregation",
            RelationshipKind::Association => "association",
            RelationshipKind::Dependency => "dependency",
        }
    }
}

impl fmt::Display for RelationshipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the evidence for an inferred relationship was found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Location {
    Constructor,
    ConstructorParameter,
    Method,
    Field,
}

impl Location {
    pub fn as_str(&self) -> &'static str {
        match self {
            Location::Constructor => "constructor",
            Location::ConstructorParameter => "constructor-parameter",
            Location::Method => "method",
            Location::Field => "field",
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
