//! Terminal colorization for the relationship report
//!
//! Applies ANSI escape codes to report elements using crossterm.

use crossterm::style::{Color, Stylize};

/// Colorize a relationship report using ANSI escape codes
///
/// - Arrow heads: Yellow (triangles), Magenta (diamonds), Green (dependency)
/// - Arrow shafts: Cyan
/// - Section header marker: Blue
/// - Everything else: Default (terminal color)
pub fn colorize_output(input: &str) -> String {
    let mut result = String::with_capacity(input.len() * 2);

    for line in input.lines() {
        for c in line.chars() {
            let colored = match c {
                '─' | '┈' => format!("{}", c.to_string().with(Color::Cyan)),
                '▷' => format!("{}", c.to_string().with(Color::Yellow)),
                '◆' | '◇' => format!("{}", c.to_string().with(Color::Magenta)),
                '→' => format!("{}", c.to_string().with(Color::Green)),
                '■' => format!("{}", c.to_string().with(Color::Blue)),
                _ => c.to_string(),
            };
            result.push_str(&colored);
        }
        result.push('\n');
    }

    // Keep the input's trailing newline state
    if !input.ends_with('\n') && result.ends_with('\n') {
        result.pop();
    }

    result
}
