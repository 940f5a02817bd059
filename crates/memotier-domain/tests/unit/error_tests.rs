//! Unit tests for domain error types

use memotier_domain::Error;

#[test]
fn test_invalid_argument_error() {
    let error = Error::invalid_argument("bad glob");
    match error {
        Error::InvalidArgument { message } => assert_eq!(message, "bad glob"),
        _ => panic!("Expected InvalidArgument error"),
    }
}

#[test]
fn test_primary_store_error_with_source() {
    let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
    let error = Error::primary_store_with_source("GET failed", io);
    assert!(error.is_primary_store());
    assert_eq!(error.to_string(), "Primary store error: GET failed");
    assert!(std::error::Error::source(&error).is_some());
}

#[test]
fn test_json_error_conversion() {
    let parse: Result<serde_json::Value, _> = serde_json::from_str("{not json");
    let error: Error = parse.unwrap_err().into();
    assert!(matches!(error, Error::Json { .. }));
    assert!(!error.is_primary_store());
}

#[test]
fn test_config_error_display() {
    let error = Error::config("default TTL cannot be 0");
    assert_eq!(
        error.to_string(),
        "Configuration error: default TTL cannot be 0"
    );
}
