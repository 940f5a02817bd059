//! Error Extension Tests

use memotier_domain::error::Error;
use memotier_infrastructure::error_ext::ErrorContext;
use std::io;

fn not_found() -> Result<(), io::Error> {
    Err(io::Error::new(io::ErrorKind::NotFound, "missing.toml"))
}

#[test]
fn test_context() {
    let err = not_found().context("Loading settings").unwrap_err();
    assert!(matches!(err, Error::Infrastructure { .. }));
    assert!(err.to_string().contains("Loading settings: missing.toml"));
}

#[test]
fn test_with_context_is_lazy() {
    let ok: Result<u8, io::Error> = Ok(1);
    let value = ok
        .with_context(|| -> String { panic!("context built for a success") })
        .unwrap();
    assert_eq!(value, 1);

    let err = not_found()
        .with_context(|| format!("Reading {}", "memotier.toml"))
        .unwrap_err();
    assert!(err.to_string().contains("Reading memotier.toml"));
}

#[test]
fn test_io_and_config_context() {
    let err = not_found().io_context("Writing config").unwrap_err();
    assert!(matches!(err, Error::Io { .. }));

    let err = not_found().config_context("Parsing config").unwrap_err();
    assert!(matches!(err, Error::Configuration { .. }));
    assert!(std::error::Error::source(&err).is_some());
}
