//! Error display and propagation tests

use umlify::{analyze, convert, ConvertError, Converter, NO_PACKAGE};

#[test]
fn test_empty_input_display() {
    assert_eq!(
        ConvertError::EmptyInput.to_string(),
        "Empty input: no source text to analyze"
    );
}

#[test]
fn test_no_types_found_display() {
    let error = ConvertError::no_types_found("", 0);
    assert_eq!(
        error.to_string(),
        "No class, interface or enum declaration found (package: none, imports: 0)"
    );
    assert_eq!(error.package_label(), Some(NO_PACKAGE));
    assert_eq!(ConvertError::EmptyInput.package_label(), None);
}

#[test]
fn test_no_types_found_with_package() {
    let error = ConvertError::no_types_found("com.example", 3);
    assert_eq!(
        error.to_string(),
        "No class, interface or enum declaration found (package: com.example, imports: 3)"
    );
    assert_eq!(error.package_label(), Some("com.example"));
}

#[test]
fn test_placeholder_constant() {
    assert_eq!(NO_PACKAGE, "none");
}

#[test]
fn test_statement_without_type() {
    let err = analyze("int x = 5;").unwrap_err();
    assert_eq!(
        err.downcast_ref::<ConvertError>(),
        Some(&ConvertError::NoTypesFound {
            package: None,
            import_count: 0,
        })
    );
}

#[test]
fn test_whitespace_only_is_empty_input() {
    for input in ["", " ", "\n\n", "\t \r\n"] {
        let err = convert(input).unwrap_err();
        assert_eq!(
            err.downcast_ref::<ConvertError>(),
            Some(&ConvertError::EmptyInput),
            "input {input:?}"
        );
    }
}

#[test]
fn test_comment_only_input_has_no_types() {
    let err = analyze("// class Hidden { }\n/* interface Gone { } */").unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ConvertError>(),
        Some(ConvertError::NoTypesFound { .. })
    ));
}

#[test]
fn test_diagnostics_report_package_and_imports() {
    let source = r#"
        package org.sample.util;
        import java.util.List;
        import java.util.Map;
        import static java.util.Collections.emptyList;

        // nothing declared here
    "#;
    let err = Converter::new().analyze(source).unwrap_err();
    assert_eq!(
        err.downcast_ref::<ConvertError>(),
        Some(&ConvertError::NoTypesFound {
            package: Some("org.sample.util".to_string()),
            import_count: 3,
        })
    );
}

#[test]
fn test_errors_are_std_errors() {
    fn assert_error<E: std::error::Error + Send + Sync + 'static>(_: &E) {}
    assert_error(&ConvertError::EmptyInput);

    let wrapped: anyhow::Error = ConvertError::EmptyInput.into();
    assert!(wrapped.is::<ConvertError>());
}
