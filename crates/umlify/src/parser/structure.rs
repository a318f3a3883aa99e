//! Type declaration extraction
//!
//! Finds `class`/`interface`/`enum` headers with a regular expression and
//! isolates each body with an explicit brace-balancing scan, since no regular
//! expression can match arbitrarily nested braces. The scan relies on the
//! preprocessor having already removed braces inside literals and comments.

use regex::{Captures, Regex};
use std::sync::LazyLock;
use tracing::{debug, span, trace, Level};

use super::members::extract_members;
use crate::core::{Modifier, TypeDeclaration, TypeKind};

static TYPE_HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"\b(public\s+|private\s+|protected\s+)?",
        r"(abstract\s+|final\s+|static\s+)?",
        r"(class|interface|enum)\s+([a-zA-Z_][a-zA-Z0-9_]*)\s*",
        r"(?:<[^>]*>)?\s*",
        r"(?:extends\s+([a-zA-Z_][a-zA-Z0-9_.<>\s]*?))?\s*",
        r"(?:implements\s+([^{]+?))?\s*\{",
    ))
    .unwrap()
});

/// Net brace depth of `text`: opening minus closing braces
pub fn brace_depth(text: &str) -> i64 {
    text.bytes().fold(0i64, |depth, b| match b {
        b'{' => depth + 1,
        b'}' => depth - 1,
        _ => depth,
    })
}

/// Index of the `}` that closes the brace at `open`, if any
fn matching_close(code: &str, open: usize) -> Option<usize> {
    let mut depth = 1usize;
    for (offset, b) in code.as_bytes()[open + 1..].iter().enumerate() {
        match b {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + 1 + offset);
                }
            }
            _ => {}
        }
    }
    None
}

/// Text strictly between the brace at `open` and its matching `}`
///
/// An unbalanced block runs to the end of the text.
pub fn block_body(code: &str, open: usize) -> &str {
    match matching_close(code, open) {
        Some(close) => &code[open + 1..close],
        None => &code[open + 1..],
    }
}

/// Like [`block_body`], but an unbalanced block yields `None`
pub fn balanced_block_body(code: &str, open: usize) -> Option<&str> {
    matching_close(code, open).map(|close| &code[open + 1..close])
}

/// Whether cleaned source contains at least one type header
pub fn contains_type_header(code: &str) -> bool {
    TYPE_HEADER_RE.is_match(code)
}

/// Extract every type declaration from cleaned source, in source order
///
/// Nested declarations are found as well, since scanning resumes right after
/// each header's opening brace.
pub fn extract_types(code: &str, package: &str) -> Vec<TypeDeclaration> {
    let extract_span = span!(Level::DEBUG, "extract_types", code_len = code.len());
    let _enter = extract_span.enter();

    let mut types = Vec::new();
    for caps in TYPE_HEADER_RE.captures_iter(code) {
        let Some(mut declaration) = declaration_from_header(&caps, package) else {
            continue;
        };
        let Some(header) = caps.get(0) else {
            continue;
        };
        let open = header.end() - 1;
        let body = block_body(code, open);

        extract_members(&mut declaration, body);
        trace!(
            name = %declaration.name,
            kind = %declaration.kind,
            body_len = body.len(),
            "Extracted type"
        );
        types.push(declaration);
    }

    debug!(type_count = types.len(), "Type extraction completed");
    types
}

fn declaration_from_header(caps: &Captures<'_>, package: &str) -> Option<TypeDeclaration> {
    let kind = TypeKind::from_keyword(caps.get(3)?.as_str())?;
    let name = caps.get(4)?.as_str();

    let mut declaration = TypeDeclaration::new(name, kind);
    declaration.package_name = package.to_string();

    for group in [1, 2] {
        if let Some(modifier) = caps.get(group).and_then(|m| Modifier::from_keyword(m.as_str())) {
            declaration.add_modifier(modifier);
        }
    }

    declaration.super_type = caps
        .get(5)
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty());

    if let Some(implements) = caps.get(6) {
        declaration.interfaces = implements
            .as_str()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
    }

    Some(declaration)
}
