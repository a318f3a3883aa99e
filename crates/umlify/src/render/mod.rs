//! Output renderers for an analyzed [`SourceModel`](crate::core::SourceModel)
//!
//! - [`PanelRenderer`]: UMLet panel text for copy-paste
//! - [`UxfRenderer`]: a complete UMLet `.uxf` document
//! - [`SummaryRenderer`]: a readable relationship report

mod layout;
mod panel;
mod summary;
mod uxf;

pub use layout::{class_height, head_at_target, ClassBox, GridLayout, RelationLine};
pub use panel::{declared_relation_stubs, panel_text, PanelRenderer};
pub use summary::{arrow, group_by_kind, RelationshipGroup, SummaryRenderer};
pub use uxf::{line_type, UxfRenderer};
