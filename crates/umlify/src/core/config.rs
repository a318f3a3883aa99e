//! Analyzer and rendering configuration

use serde::Serialize;

/// Switches for the relationship analyzer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct AnalyzerConfig {
    /// Report plain field references (no construction, no injection) as
    /// associations. Off by default.
    pub field_associations: bool,
}

impl AnalyzerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field_associations(mut self, enabled: bool) -> Self {
        self.field_associations = enabled;
        self
    }
}

/// Grid placement of class boxes in the UMLet document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LayoutOptions {
    pub base_x: i32,
    pub base_y: i32,
    pub columns: usize,
    pub column_spacing: i32,
    pub row_spacing: i32,
    pub class_width: i32,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            base_x: 100,
            base_y: 100,
            columns: 3,
            column_spacing: 300,
            row_spacing: 200,
            class_width: 200,
        }
    }
}

impl LayoutOptions {
    /// Top-left corner of the box for the `index`-th type
    pub fn position(&self, index: usize) -> (i32, i32) {
        let columns = self.columns.max(1);
        let column = (index % columns) as i32;
        let row = (index / columns) as i32;
        (
            self.base_x + column * self.column_spacing,
            self.base_y + row * self.row_spacing,
        )
    }
}

/// Options passed to the conversion façade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RenderOptions {
    pub layout: LayoutOptions,
}

impl RenderOptions {
    pub fn new(layout: LayoutOptions) -> Self {
        Self { layout }
    }
}
