//! Source normalization
//!
//! Later stages count braces and match declarations with regular
//! expressions, so anything that can hide a brace, semicolon, or quote has to
//! be neutralized first.

use regex::{Captures, Regex};
use std::sync::LazyLock;
use tracing::trace;

static STRING_LITERAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""(?:[^"\\]|\\.)*""#).unwrap());
static CHAR_LITERAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"'(?:[^'\\]|\\.)*'").unwrap());
static BLOCK_COMMENT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)/\*.*?\*/").unwrap());
static LINE_COMMENT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)//.*$").unwrap());
static ANNOTATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@[a-zA-Z_][a-zA-Z0-9_]*(?:\([^)]*\))?").unwrap());
static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Clean raw source so it is safe for structural matching
///
/// In order: string literals and char literals become numbered placeholders
/// (one counter shared by both), block comments, line comments and
/// annotations are removed, and whitespace runs collapse to one space.
/// Malformed literals are left as they are; this never fails.
pub fn preprocess(source: &str) -> String {
    let mut literal_index = 0usize;

    let code = STRING_LITERAL_RE.replace_all(source, |_: &Captures| {
        let placeholder = format!("\"STRING_LITERAL_{}\"", literal_index);
        literal_index += 1;
        placeholder
    });
    let code = CHAR_LITERAL_RE.replace_all(&code, |_: &Captures| {
        let placeholder = format!("'CHAR_LITERAL_{}'", literal_index);
        literal_index += 1;
        placeholder
    });
    let code = BLOCK_COMMENT_RE.replace_all(&code, "");
    let code = LINE_COMMENT_RE.replace_all(&code, "");
    let code = ANNOTATION_RE.replace_all(&code, "");
    let code = WHITESPACE_RE.replace_all(&code, " ");

    trace!(
        input_len = source.len(),
        output_len = code.len(),
        literals = literal_index,
        "Preprocessed source"
    );
    code.into_owned()
}
