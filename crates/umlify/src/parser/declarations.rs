//! Package and import scanning
//!
//! Pure metadata: nothing here affects structural or relationship analysis.

use regex::Regex;
use std::sync::LazyLock;

use crate::core::Import;

static PACKAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"package\s+([a-zA-Z_][a-zA-Z0-9_.]*)\s*;").unwrap());
static IMPORT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"import\s+(static\s+)?([a-zA-Z_][a-zA-Z0-9_.*]*)\s*;").unwrap());

/// First `package x.y.z;` declaration, or an empty string
pub fn scan_package(code: &str) -> String {
    PACKAGE_RE
        .captures(code)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Every `import [static] path;` statement in source order
pub fn scan_imports(code: &str) -> Vec<Import> {
    IMPORT_RE
        .captures_iter(code)
        .filter_map(|caps| {
            let path = caps.get(2)?.as_str().to_string();
            Some(Import {
                is_static: caps.get(1).is_some(),
                path,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_package() {
        assert_eq!(scan_package("package com.example.cars; class A {}"), "com.example.cars");
        assert_eq!(scan_package("class A {}"), "");
    }

    #[test]
    fn test_only_first_package_counts() {
        assert_eq!(scan_package("package a.b; package c.d;"), "a.b");
    }

    #[test]
    fn test_scan_imports() {
        let imports = scan_imports(
            "import java.util.List; import static java.lang.Math.max; import java.io.*;",
        );
        assert_eq!(imports.len(), 3);
        assert_eq!(imports[0].path, "java.util.List");
        assert!(!imports[0].is_static);
        assert_eq!(imports[1].path, "java.lang.Math.max");
        assert!(imports[1].is_static);
        assert_eq!(imports[2].path, "java.io.*");
    }

    #[test]
    fn test_no_imports() {
        assert!(scan_imports("class A {}").is_empty());
    }
}
