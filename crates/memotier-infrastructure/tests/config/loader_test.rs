//! Configuration Loader Tests
//!
//! Every test runs inside a figment jail so environment variables and the
//! working directory stay isolated.

use figment::Jail;
use memotier_domain::constants::{DEFAULT_CACHE_NAMESPACE, DEFAULT_CACHE_TTL_SECS};
use memotier_infrastructure::config::{AppConfig, ConfigLoader};
use memotier_infrastructure::constants::{DEFAULT_LOG_LEVEL, PRIMARY_OPERATION_TIMEOUT_MS};

fn load(loader: &ConfigLoader) -> figment::error::Result<AppConfig> {
    loader.load().map_err(|e| e.to_string().into())
}

#[test]
fn test_config_loader_defaults() {
    Jail::expect_with(|_jail| {
        let config = load(&ConfigLoader::new())?;

        assert_eq!(config.cache.namespace, DEFAULT_CACHE_NAMESPACE);
        assert_eq!(config.cache.default_ttl_secs, DEFAULT_CACHE_TTL_SECS);
        assert_eq!(config.cache.operation_timeout_ms, PRIMARY_OPERATION_TIMEOUT_MS);
        assert!(config.cache.redis_url.is_none());
        assert_eq!(config.logging.level, DEFAULT_LOG_LEVEL);
        Ok(())
    });
}

#[test]
fn test_config_loader_reads_working_directory_file() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "memotier.toml",
            r#"
            [cache]
            namespace = "consulting"
            default_ttl_secs = 120
            redis_url = "redis://cache.internal:6379/0"

            [logging]
            level = "debug"
            "#,
        )?;

        let config = load(&ConfigLoader::new())?;
        assert_eq!(config.cache.namespace, "consulting");
        assert_eq!(config.cache.default_ttl_secs, 120);
        assert_eq!(
            config.cache.redis_url.as_deref(),
            Some("redis://cache.internal:6379/0")
        );
        assert_eq!(config.logging.level, "debug");
        Ok(())
    });
}

#[test]
fn test_environment_overrides_file() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "custom.toml",
            r#"
            [cache]
            default_ttl_secs = 120
            "#,
        )?;
        jail.set_env("MEMOTIER_CACHE__DEFAULT_TTL_SECS", "45");
        jail.set_env("MEMOTIER_LOGGING__JSON_FORMAT", "true");

        let loader = ConfigLoader::new().with_config_path(jail.directory().join("custom.toml"));
        let config = load(&loader)?;
        assert_eq!(config.cache.default_ttl_secs, 45);
        assert!(config.logging.json_format);
        Ok(())
    });
}

#[test]
fn test_custom_env_prefix() {
    Jail::expect_with(|jail| {
        jail.set_env("CONSULTATOR_CACHE__NAMESPACE", "staging");
        jail.set_env("MEMOTIER_CACHE__NAMESPACE", "ignored");

        let config = load(&ConfigLoader::new().with_env_prefix("CONSULTATOR"))?;
        assert_eq!(config.cache.namespace, "staging");
        Ok(())
    });
}

#[test]
fn test_missing_explicit_file_falls_back_to_defaults() {
    Jail::expect_with(|jail| {
        let loader = ConfigLoader::new().with_config_path(jail.directory().join("absent.toml"));
        assert!(loader.config_path().is_some());

        let config = load(&loader)?;
        assert_eq!(config, AppConfig::default());
        Ok(())
    });
}

#[test]
fn test_zero_ttl_is_rejected() {
    Jail::expect_with(|jail| {
        jail.set_env("MEMOTIER_CACHE__DEFAULT_TTL_SECS", "0");

        let err = ConfigLoader::new().load().unwrap_err();
        assert!(err.to_string().contains("TTL"));
        Ok(())
    });
}

#[test]
fn test_invalid_values_are_rejected() {
    Jail::expect_with(|jail| {
        jail.set_env("MEMOTIER_CACHE__NAMESPACE", "has space");
        assert!(ConfigLoader::new().load().is_err());

        jail.set_env("MEMOTIER_CACHE__NAMESPACE", "ok");
        jail.set_env("MEMOTIER_CACHE__OPERATION_TIMEOUT_MS", "0");
        assert!(ConfigLoader::new().load().is_err());

        jail.set_env("MEMOTIER_CACHE__OPERATION_TIMEOUT_MS", "100");
        jail.set_env("MEMOTIER_LOGGING__LEVEL", "loud");
        let err = ConfigLoader::new().load().unwrap_err();
        assert!(err.to_string().contains("Invalid log level"));
        Ok(())
    });
}

#[test]
fn test_malformed_file_is_a_configuration_error() {
    Jail::expect_with(|jail| {
        jail.create_file("memotier.toml", "[cache]\ndefault_ttl_secs = \"soon\"\n")?;

        let err = ConfigLoader::new().load().unwrap_err();
        assert!(err.to_string().starts_with("Configuration error"));
        Ok(())
    });
}

#[test]
fn test_save_then_load() {
    Jail::expect_with(|jail| {
        let path = jail.directory().join("saved.toml");
        let loader = ConfigLoader::new().with_config_path(&path);

        let mut config = AppConfig::default();
        config.cache.namespace = "saved".to_string();
        config.cache.redis_url = Some("redis://localhost:6379".to_string());
        loader
            .save_to_file(&config, &path)
            .map_err(|e| e.to_string())?;

        assert_eq!(load(&loader)?, config);
        Ok(())
    });
}
