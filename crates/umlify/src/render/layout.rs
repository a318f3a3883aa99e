//! Grid layout for UMLet class boxes and relation lines
//!
//! Boxes are placed row by row on a fixed grid. Relation lines connect the
//! facing edges of two boxes; a relation whose other end is not a parsed
//! type becomes a short stub leaving the known box.

use crate::core::{LayoutOptions, Relationship, RelationshipKind, SourceModel, TypeDeclaration};

const LINE_HEIGHT: i32 = 15;
const BOX_PADDING: i32 = 20;
const MIN_BOX_HEIGHT: i32 = 80;
const STUB_LENGTH: i32 = 80;
const RELATION_MARGIN: i32 = 10;

/// Height of a class box: one line for the name plus a separator and one
/// line per member for each non-empty section
pub fn class_height(declaration: &TypeDeclaration) -> i32 {
    let mut lines = 1;
    if !declaration.fields.is_empty() {
        lines += 1 + declaration.fields.len();
    }
    let operations = declaration.methods.len() + declaration.constructors.len();
    if operations > 0 {
        lines += 1 + operations;
    }
    MIN_BOX_HEIGHT.max(lines as i32 * LINE_HEIGHT + BOX_PADDING)
}

/// A positioned class box
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassBox {
    pub name: String,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl ClassBox {
    fn left_mid(&self) -> (i32, i32) {
        (self.x, self.y + self.height / 2)
    }

    fn right_mid(&self) -> (i32, i32) {
        (self.x + self.width, self.y + self.height / 2)
    }

    fn top_mid(&self) -> (i32, i32) {
        (self.x + self.width / 2, self.y)
    }

    fn bottom_mid(&self) -> (i32, i32) {
        (self.x + self.width / 2, self.y + self.height)
    }
}

/// A relation line in UMLet coordinates
///
/// `points` are relative to `(x, y)`; the first point carries the arrow head.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationLine {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub points: [(i32, i32); 2],
}

impl RelationLine {
    fn between(head: (i32, i32), tail: (i32, i32)) -> Self {
        let x = head.0.min(tail.0) - RELATION_MARGIN;
        let y = head.1.min(tail.1) - RELATION_MARGIN;
        Self {
            x,
            y,
            width: (head.0 - tail.0).abs() + 2 * RELATION_MARGIN,
            height: (head.1 - tail.1).abs() + 2 * RELATION_MARGIN,
            points: [(head.0 - x, head.1 - y), (tail.0 - x, tail.1 - y)],
        }
    }

    /// `additional_attributes` value: `x1;y1;x2;y2` with one decimal
    pub fn attributes(&self) -> String {
        let [(x1, y1), (x2, y2)] = self.points;
        format!("{x1}.0;{y1}.0;{x2}.0;{y2}.0")
    }
}

/// Whether the arrow head belongs at the target end of the line
pub fn head_at_target(kind: RelationshipKind) -> bool {
    matches!(
        kind,
        RelationshipKind::Inheritance | RelationshipKind::Implementation | RelationshipKind::Dependency
    )
}

/// Places class boxes and routes relation lines
#[derive(Debug, Clone, Default)]
pub struct GridLayout {
    options: LayoutOptions,
}

impl GridLayout {
    pub fn new(options: LayoutOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    /// One box per parsed type, in model order
    pub fn layout_classes(&self, model: &SourceModel) -> Vec<ClassBox> {
        model
            .classes
            .iter()
            .enumerate()
            .map(|(index, declaration)| {
                let (x, y) = self.options.position(index);
                ClassBox {
                    name: declaration.name.clone(),
                    x,
                    y,
                    width: self.options.class_width,
                    height: class_height(declaration),
                }
            })
            .collect()
    }

    /// Route a relationship between already placed boxes
    ///
    /// Names resolve to the first box with that name.
    pub fn route(&self, relationship: &Relationship, boxes: &[ClassBox]) -> RelationLine {
        let find = |name: &str| boxes.iter().find(|b| b.name == name);
        let source = find(&relationship.source);
        let target = find(&relationship.target);

        let (source_point, target_point) = match (source, target) {
            (Some(s), Some(t)) if s != t => facing_edges(s, t),
            (Some(s), _) => {
                let start = s.right_mid();
                (start, (start.0 + STUB_LENGTH, start.1))
            }
            (None, Some(t)) => {
                let end = t.left_mid();
                ((end.0 - STUB_LENGTH, end.1), end)
            }
            (None, None) => {
                let origin = (self.options.base_x, self.options.base_y);
                (origin, (origin.0 + STUB_LENGTH, origin.1))
            }
        };

        if head_at_target(relationship.kind) {
            RelationLine::between(target_point, source_point)
        } else {
            RelationLine::between(source_point, target_point)
        }
    }
}

/// Anchor points on the edges of `from` and `to` that face each other
fn facing_edges(from: &ClassBox, to: &ClassBox) -> ((i32, i32), (i32, i32)) {
    if from.y == to.y {
        if from.x <= to.x {
            (from.right_mid(), to.left_mid())
        } else {
            (from.left_mid(), to.right_mid())
        }
    } else if from.y < to.y {
        (from.bottom_mid(), to.top_mid())
    } else {
        (from.top_mid(), to.bottom_mid())
    }
}
