//! Configuration loading from disk.

use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::config::schema::ServerConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ServerConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: ServerConfig = toml::from_str(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Load `path` (or the defaults), apply a bind address override, then validate.
pub fn resolve_config(
    path: Option<&Path>,
    bind_address: Option<String>,
) -> Result<ServerConfig, ConfigError> {
    let mut config = match path {
        Some(path) => load_config(path)?,
        None => ServerConfig::default(),
    };
    if let Some(bind_address) = bind_address {
        config.listener.bind_address = bind_address;
    }

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::FingerprintStrategy;

    fn write_temp(name: &str, content: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("etag-interceptor-{}-{name}", std::process::id()));
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_valid_file() {
        let path = write_temp(
            "valid.toml",
            r#"
            [listener]
            bind_address = "127.0.0.1:3000"

            [cache]
            strategy = { kind = "static", value = "release-42" }
            "#,
        );
        let config = load_config(&path).unwrap();
        assert_eq!(config.listener.bind_address, "127.0.0.1:3000");
        assert_eq!(
            config.cache.strategy,
            FingerprintStrategy::Static { value: "release-42".into() }
        );
        fs::remove_file(path).unwrap_or_default();
    }

    #[test]
    fn test_load_reports_validation() {
        let path = write_temp("invalid.toml", "[cache]\nmax_body_bytes = 0\n");
        let err = load_config(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref e) if e == &[ValidationError::ZeroBodyLimit]));
        assert_eq!(
            err.to_string(),
            "Validation failed: cache.max_body_bytes must be greater than zero"
        );
        fs::remove_file(path).unwrap_or_default();
    }

    #[test]
    fn test_resolve_defaults() {
        let config = resolve_config(None, None).unwrap();
        assert_eq!(config, ServerConfig::default());
    }

    #[test]
    fn test_resolve_validates_bind_override() {
        let config = resolve_config(None, Some("127.0.0.1:4000".into())).unwrap();
        assert_eq!(config.listener.bind_address, "127.0.0.1:4000");

        let err = resolve_config(None, Some("not-an-address".into())).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Validation(ref e) if e == &[ValidationError::BindAddress("not-an-address".into())]
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
