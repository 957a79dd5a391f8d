//! Application configuration management.
//!
//! Configuration is loaded from a YAML file with environment variable overrides. The file path
//! defaults to `config.yaml` but can be given with `-f` or the `TRACKER_CONFIG` environment
//! variable.
//!
//! ## Loading Priority
//!
//! Sources are merged in this order (later sources override earlier ones):
//!
//! 1. **YAML config file** - base configuration (default: `config.yaml`)
//! 2. **Environment variables** - variables prefixed with `TRACKER_`
//! 3. **DATABASE_URL** - overrides `database.url` if set
//!
//! Nested values use double underscores, e.g. `TRACKER_DATABASE__POOL__MAX_CONNECTIONS=20`.
//!
//! ## Environment Variable Examples
//!
//! ```bash
//! TRACKER_PORT=9090
//! DATABASE_URL="sqlite:///var/lib/tracker/tracker.db"
//! TRACKER_CORS__ALLOWED_ORIGINS='["http://localhost:5173"]'
//! TRACKER_ENABLE_METRICS=true
//! ```

use clap::Parser;
use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use crate::errors::Error;

/// Command line: where the config lives, and whether to only check it.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// YAML configuration file
    #[arg(short = 'f', long, env = "TRACKER_CONFIG", default_value = "config.yaml")]
    pub config: String,

    /// Load and validate the configuration, then exit
    #[arg(long)]
    pub validate: bool,
}

/// Root configuration, loaded from YAML and environment variables.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Listen address
    pub host: String,
    pub port: u16,
    /// SQLite database settings
    pub database: DatabaseConfig,
    /// Set from the raw `DATABASE_URL` environment variable; folded into `database.url` on load
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_url: Option<String>,
    /// Cross-origin settings for the browser client
    pub cors: CorsConfig,
    /// Serve Prometheus metrics at `/internal/metrics`
    pub enable_metrics: bool,
    /// Export spans over OTLP (endpoint and headers come from the standard `OTEL_*` variables)
    pub enable_otel_export: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseConfig {
    /// SQLite connection string, e.g. `sqlite://tracker.db` or `sqlite::memory:`
    pub url: String,
    pub pool: PoolSettings,
}

/// Connection pool parameters passed straight to `SqlitePoolOptions`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct PoolSettings {
    pub max_connections: u32,
    pub min_connections: u32,
    /// How long a request waits for a free connection, e.g. `30s`
    #[serde(with = "humantime_serde")]
    pub acquire_timeout: Duration,
}

/// Which browser origins may call the API.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct CorsConfig {
    pub allowed_origins: Vec<CorsOrigin>,
    pub allow_credentials: bool,
    /// Seconds a browser may cache a preflight response
    pub max_age: Option<u64>,
}

/// An allowed CORS origin: `*` or an origin URL such as `http://localhost:5173`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub enum CorsOrigin {
    Wildcard,
    Url(Url),
}

impl TryFrom<String> for CorsOrigin {
    type Error = url::ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.trim() == "*" {
            Ok(CorsOrigin::Wildcard)
        } else {
            Url::parse(value.trim()).map(CorsOrigin::Url)
        }
    }
}

impl From<CorsOrigin> for String {
    fn from(origin: CorsOrigin) -> Self {
        match origin {
            CorsOrigin::Wildcard => "*".to_string(),
            CorsOrigin::Url(url) => url.into(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8081,
            database: DatabaseConfig::default(),
            database_url: None,
            cors: CorsConfig::default(),
            enable_metrics: false,
            enable_otel_export: false,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://tracker.db".to_string(),
            pool: PoolSettings::default(),
        }
    }
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 5,
            min_connections: 0,
            acquire_timeout: Duration::from_secs(30),
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![CorsOrigin::Wildcard],
            allow_credentials: false,
            max_age: Some(3600),
        }
    }
}

impl Config {
    #[allow(clippy::result_large_err)]
    pub fn load(args: &Args) -> Result<Self, figment::Error> {
        let mut config: Self = Self::figment(args).extract()?;

        if let Some(url) = config.database_url.take() {
            config.database.url = url;
        }

        config.validate().map_err(|e| figment::Error::from(e.to_string()))?;
        Ok(config)
    }

    /// Reject settings that would only fail later, at connect or request time.
    pub fn validate(&self) -> Result<(), Error> {
        if self.database.url.trim().is_empty() {
            return Err(Error::invalid_config("database.url cannot be empty"));
        }

        let pool = &self.database.pool;
        if pool.max_connections == 0 {
            return Err(Error::invalid_config("database.pool.max_connections must be at least 1"));
        }
        if pool.min_connections > pool.max_connections {
            return Err(Error::invalid_config(format!(
                "database.pool.min_connections ({}) exceeds max_connections ({})",
                pool.min_connections, pool.max_connections
            )));
        }

        let has_wildcard = self
            .cors
            .allowed_origins
            .iter()
            .any(|origin| matches!(origin, CorsOrigin::Wildcard));
        if has_wildcard && self.cors.allow_credentials {
            return Err(Error::invalid_config(
                "cors.allow_credentials cannot be combined with the wildcard origin '*'",
            ));
        }

        Ok(())
    }

    pub fn figment(args: &Args) -> Figment {
        Figment::new()
            .merge(Yaml::file(&args.config))
            .merge(Env::prefixed("TRACKER_").ignore(&["config"]).split("__"))
            .merge(Env::raw().only(&["DATABASE_URL"]))
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    fn args(path: &str) -> Args {
        Args {
            config: path.to_string(),
            validate: false,
        }
    }

    #[test]
    fn test_defaults_without_config_file() {
        Jail::expect_with(|_jail| {
            let config = Config::load(&args("missing.yaml"))?;

            assert_eq!(config.bind_address(), "0.0.0.0:8081");
            assert_eq!(config.database.url, "sqlite://tracker.db");
            assert_eq!(config.database.pool.max_connections, 5);
            assert!(!config.enable_metrics);
            assert!(!config.enable_otel_export);

            Ok(())
        });
    }

    #[test]
    fn test_yaml_values() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "test.yaml",
                r#"
port: 9000
database:
  url: sqlite://data/habits.db
  pool:
    max_connections: 8
    acquire_timeout: 5s
cors:
  allowed_origins:
    - http://localhost:5173
  allow_credentials: true
enable_metrics: true
"#,
            )?;

            let config = Config::load(&args("test.yaml"))?;

            assert_eq!(config.port, 9000);
            assert_eq!(config.database.url, "sqlite://data/habits.db");
            assert_eq!(config.database.pool.max_connections, 8);
            assert_eq!(config.database.pool.min_connections, 0); // still default
            assert_eq!(config.database.pool.acquire_timeout, Duration::from_secs(5));
            assert!(matches!(
                config.cors.allowed_origins.as_slice(),
                [CorsOrigin::Url(url)] if url.as_str() == "http://localhost:5173/"
            ));
            assert!(config.cors.allow_credentials);
            assert!(config.enable_metrics);

            Ok(())
        });
    }

    #[test]
    fn test_env_override() {
        Jail::expect_with(|jail| {
            jail.create_file("test.yaml", "host: 10.0.0.1\nport: 9000\n")?;

            jail.set_env("TRACKER_PORT", "8080");
            jail.set_env("TRACKER_DATABASE__POOL__MAX_CONNECTIONS", "12");

            let config = Config::load(&args("test.yaml"))?;

            // Env vars should override
            assert_eq!(config.port, 8080);
            assert_eq!(config.database.pool.max_connections, 12);
            // YAML values should be preserved
            assert_eq!(config.host, "10.0.0.1");

            Ok(())
        });
    }

    #[test]
    fn test_database_url_env_wins() {
        Jail::expect_with(|jail| {
            jail.create_file("test.yaml", "database:\n  url: sqlite://from-yaml.db\n")?;
            jail.set_env("DATABASE_URL", "sqlite://from-env.db");

            let config = Config::load(&args("test.yaml"))?;

            assert_eq!(config.database.url, "sqlite://from-env.db");
            assert!(config.database_url.is_none());

            Ok(())
        });
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        Jail::expect_with(|jail| {
            jail.create_file("test.yaml", "prot: 9000\n")?;

            assert!(Config::load(&args("test.yaml")).is_err());

            Ok(())
        });
    }

    #[test]
    fn test_malformed_origin_is_rejected() {
        Jail::expect_with(|jail| {
            jail.create_file("test.yaml", "cors:\n  allowed_origins:\n    - not a url\n")?;

            assert!(Config::load(&args("test.yaml")).is_err());

            Ok(())
        });
    }

    #[test]
    fn test_validation_rejects_wildcard_with_credentials() {
        let mut config = Config::default();
        config.cors.allowed_origins = vec![CorsOrigin::Wildcard];
        config.cors.allow_credentials = true;

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("wildcard"));
    }

    #[test]
    fn test_validation_rejects_bad_pool_sizes() {
        let mut config = Config::default();
        config.database.pool.max_connections = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.database.pool.max_connections = 2;
        config.database.pool.min_connections = 3;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_empty_database_url() {
        let mut config = Config::default();
        config.database.url = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_valid_config() {
        assert!(Config::default().validate().is_ok());
    }
}
