//! Tests for error types

use bids_automodel::Error;

#[test]
fn test_variables_error() {
    let error = Error::Variables("trial_type has type Int32".to_string());
    let error_str = format!("{error}");
    assert!(error_str.contains("Variable loading error"));
    assert!(error_str.contains("Int32"));
}

#[test]
fn test_scan_length_error() {
    let error = Error::ScanLength {
        task: "rest".to_string(),
        run: "sub-01_task-rest_run-1".to_string(),
    };
    let error_str = format!("{error}");
    assert!(error_str.contains("Cannot determine scan length"));
    assert!(error_str.contains("sub-01_task-rest_run-1"));
    assert!(error_str.contains("rest"));
    assert!(error_str.contains("Pass an explicit scan_length"));
}

#[test]
fn test_invalid_input_error() {
    let error = Error::InvalidInput("passthrough at Run level".to_string());
    let error_str = format!("{error}");
    assert!(error_str.contains("Invalid input"));
    assert!(error_str.contains("passthrough at Run level"));
}

#[test]
fn test_serialization_error_conversion() {
    let json_error = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
    let error: Error = json_error.into();
    let error_str = format!("{error}");
    assert!(error_str.contains("Serialization error"));
}

#[test]
fn test_arrow_error_conversion() {
    let arrow_error = arrow::error::ArrowError::SchemaError("bad schema".to_string());
    let error: Error = arrow_error.into();
    let error_str = format!("{error}");
    assert!(error_str.contains("Arrow error"));
    assert!(error_str.contains("bad schema"));
}

#[test]
fn test_other_error() {
    let error = Error::Other("custom error message".to_string());
    let error_str = format!("{error}");
    assert_eq!(error_str, "custom error message");
}

#[test]
fn test_error_debug() {
    let error = Error::InvalidInput("x".to_string());
    let debug_str = format!("{error:?}");
    assert!(debug_str.contains("InvalidInput"));
}

#[test]
fn test_result_type_alias() {
    #[allow(clippy::unnecessary_wraps)]
    fn returns_result() -> bids_automodel::Result<i32> {
        Ok(42)
    }

    let result = returns_result();
    assert!(result.is_ok());
    assert_eq!(result.unwrap(), 42);
}

#[test]
fn test_result_type_alias_error() {
    fn returns_error() -> bids_automodel::Result<i32> {
        Err(Error::Other("test error".to_string()))
    }

    let result = returns_error();
    assert!(result.is_err());
}
