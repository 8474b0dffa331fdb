use std::path::Path;

use anyhow::{Context, Result};
use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use crate::errors::{MarketError, MarketResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// MongoDB connection string.
    pub url: String,
    /// Database holding the `tasks` and `bids` collections.
    pub database: String,
    /// Startup connection attempts before the process gives up.
    pub connect_attempts: u32,
    /// Fixed delay between connection attempts.
    pub connect_retry_delay_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub bind_address: String,
    /// Browser origins allowed by the CORS layer. Requests from any other
    /// origin are rejected at the transport layer.
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    pub log_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub api: ApiConfig,
    pub observability: ObservabilityConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                url: "mongodb://localhost:27017".to_string(),
                database: "taskmarket".to_string(),
                connect_attempts: 5,
                connect_retry_delay_seconds: 5,
            },
            api: ApiConfig {
                bind_address: "0.0.0.0:5000".to_string(),
                cors_origins: vec![
                    "http://localhost:5173".to_string(),
                    "https://freelancer-489e7.web.app".to_string(),
                ],
            },
            observability: ObservabilityConfig {
                log_level: "info".to_string(),
            },
        }
    }
}

impl AppConfig {
    /// Loads configuration from a TOML file (explicit path, or the first of
    /// the default locations that exists), then applies `TASKMARKET_*`
    /// environment overrides. Missing file falls back to built-in defaults.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut builder = ConfigBuilder::builder();

        if let Some(path) = config_path {
            if Path::new(path).exists() {
                builder = builder.add_source(File::new(path, FileFormat::Toml));
            } else {
                return Err(anyhow::anyhow!("config file does not exist: {}", path));
            }
        } else {
            let default_paths = [
                "config/taskmarket.toml",
                "taskmarket.toml",
                "/etc/taskmarket/config.toml",
            ];

            let mut config_file_found = false;
            for path in &default_paths {
                if Path::new(path).exists() {
                    builder = builder.add_source(File::new(path, FileFormat::Toml));
                    config_file_found = true;
                    break;
                }
            }

            if !config_file_found {
                builder = builder
                    .set_default("database.url", "mongodb://localhost:27017")?
                    .set_default("database.database", "taskmarket")?
                    .set_default("database.connect_attempts", 5)?
                    .set_default("database.connect_retry_delay_seconds", 5)?
                    .set_default("api.bind_address", "0.0.0.0:5000")?
                    .set_default(
                        "api.cors_origins",
                        vec!["http://localhost:5173", "https://freelancer-489e7.web.app"],
                    )?
                    .set_default("observability.log_level", "info")?;
            }
        }

        builder = builder.add_source(
            Environment::with_prefix("TASKMARKET")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("api.cors_origins")
                .try_parsing(true),
        );

        let config: AppConfig = builder
            .build()
            .context("failed to assemble configuration sources")?
            .try_deserialize()
            .context("failed to deserialize configuration")?;

        config.validate().context("invalid configuration")?;

        Ok(config)
    }

    pub fn validate(&self) -> MarketResult<()> {
        self.database.validate()?;
        self.api.validate()?;
        Ok(())
    }
}

impl DatabaseConfig {
    pub fn validate(&self) -> MarketResult<()> {
        if !self.url.starts_with("mongodb://") && !self.url.starts_with("mongodb+srv://") {
            return Err(MarketError::config_error(
                "database.url must start with mongodb:// or mongodb+srv://",
            ));
        }
        if self.database.trim().is_empty() {
            return Err(MarketError::config_error("database.database must not be empty"));
        }
        if self.connect_attempts == 0 {
            return Err(MarketError::config_error(
                "database.connect_attempts must be at least 1",
            ));
        }
        Ok(())
    }
}

impl ApiConfig {
    pub fn validate(&self) -> MarketResult<()> {
        if self.bind_address.parse::<std::net::SocketAddr>().is_err() {
            return Err(MarketError::config_error(
                "api.bind_address must be a host:port socket address",
            ));
        }
        if self.cors_origins.iter().any(|o| o.trim().is_empty()) {
            return Err(MarketError::config_error(
                "api.cors_origins must not contain empty entries",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.database.connect_attempts, 5);
        assert_eq!(config.api.bind_address, "0.0.0.0:5000");
        assert_eq!(config.api.cors_origins.len(), 2);
    }

    #[test]
    fn test_database_config_validation() {
        let mut config = AppConfig::default().database;
        assert!(config.validate().is_ok());

        config.url = "postgresql://localhost/taskmarket".to_string();
        assert!(config.validate().is_err());

        let mut config = AppConfig::default().database;
        config.database = "  ".to_string();
        assert!(config.validate().is_err());

        let mut config = AppConfig::default().database;
        config.connect_attempts = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_api_config_validation() {
        let mut config = AppConfig::default().api;
        assert!(config.validate().is_ok());

        config.bind_address = "not-an-address".to_string();
        assert!(config.validate().is_err());

        let mut config = AppConfig::default().api;
        config.cors_origins = vec!["http://localhost:5173".to_string(), "".to_string()];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let result = AppConfig::load(Some("/nonexistent/taskmarket.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_config_serialization_round_trip() {
        let config = AppConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: AppConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.database.url, config.database.url);
        assert_eq!(parsed.api.cors_origins, config.api.cors_origins);
    }
}
