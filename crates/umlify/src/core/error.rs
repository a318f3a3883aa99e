//! Core error types for source conversion
//!
//! Only two conditions are reported as errors. Every other pattern that fails
//! to match is absorbed and simply shows up as a missing entry in the model.

use thiserror::Error;

/// Placeholder shown when no package declaration was found
pub const NO_PACKAGE: &str = "none";

/// Errors raised by the conversion pipeline
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConvertError {
    #[error("Empty input: no source text to analyze")]
    EmptyInput,

    #[error(
        "No class, interface or enum declaration found (package: {}, imports: {})",
        package.as_deref().unwrap_or(NO_PACKAGE),
        import_count
    )]
    NoTypesFound {
        package: Option<String>,
        import_count: usize,
    },
}

impl ConvertError {
    /// Create a new no-types error from the scanned declaration metadata
    pub fn no_types_found(package: &str, import_count: usize) -> Self {
        Self::NoTypesFound {
            package: if package.is_empty() {
                None
            } else {
                Some(package.to_string())
            },
            import_count,
        }
    }

    /// Package name as reported in diagnostics
    pub fn package_label(&self) -> Option<&str> {
        match self {
            Self::NoTypesFound { package, .. } => {
                Some(package.as_deref().unwrap_or(NO_PACKAGE))
            }
            Self::EmptyInput => None,
        }
    }
}
