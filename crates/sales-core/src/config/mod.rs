//! Application configuration schemas.
//!
//! All configuration structs are deserialized via the `config` crate from
//! optional TOML files and `SALES__`-prefixed environment variables. Each
//! sub-module represents a logical configuration section.

pub mod database;
pub mod logging;
pub mod repository;

use serde::{Deserialize, Serialize};

pub use self::database::{DatabaseConfig, StoreProvider};
pub use self::logging::LoggingConfig;
pub use self::repository::RepositoryConfig;

use crate::error::AppError;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Document store connection settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Repository behavior settings.
    #[serde(default)]
    pub repository: RepositoryConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration.
    ///
    /// Merges `config/default` with an environment-specific overlay
    /// (`config/{env}`) and environment variables prefixed with `SALES__`
    /// (e.g. `SALES__DATABASE__URI`). Every file is optional.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("SALES")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }

    /// Load configuration from a single TOML string (used by tests and
    /// embedders that manage their own files).
    pub fn from_toml(source: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?;
        Ok(config.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_sections_missing() {
        let config = AppConfig::from_toml("").expect("empty config");
        assert_eq!(config.database.provider, StoreProvider::Mongodb);
        assert_eq!(config.database.collection_prefix, "zc_");
        assert!(!config.repository.strict_filters);
        assert_eq!(config.repository.collation_locale, "en");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_overrides_from_toml() {
        let config = AppConfig::from_toml(
            r#"
            [database]
            provider = "memory"
            database_name = "shop"
            operation_timeout_seconds = 5

            [repository]
            strict_filters = true
            "#,
        )
        .expect("valid config");
        assert_eq!(config.database.provider, StoreProvider::Memory);
        assert_eq!(config.database.database_name, "shop");
        assert_eq!(
            config.database.operation_timeout(),
            Some(std::time::Duration::from_secs(5))
        );
        assert!(config.repository.strict_filters);
    }
}
