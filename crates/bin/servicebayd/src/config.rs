//! Daemon configuration.
//!
//! Read from an optional `servicebay.toml` in the working directory, then
//! overridden by environment variables:
//!
//! | Variable                  | Field               |
//! |---------------------------|---------------------|
//! | `SERVICEBAY_BIND`         | `server.bind`       |
//! | `SERVICEBAY_DATABASE_URL` | `database.url`      |
//! | `SERVICEBAY_LOG`          | `logging.filter`    |
//! | `RUST_LOG`                | `logging.filter`    |
//!
//! `RUST_LOG` wins over `SERVICEBAY_LOG` when both are set.

use std::net::SocketAddr;

use serde::Deserialize;

const CONFIG_FILE: &str = "servicebay.toml";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
}

/// HTTP listener.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Socket address the API listens on.
    pub bind: SocketAddr,
}

/// Appointment and technician store.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseConfig {
    /// sqlx `SQLite` URL; `?mode=rwc` creates the file on first start.
    pub url: String,
}

/// Log output.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// `EnvFilter` directive.
    pub filter: String,
}

impl Config {
    /// Load `servicebay.toml` (if present) and apply environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed, an
    /// override is malformed, or the result fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        let file = match std::fs::read_to_string(CONFIG_FILE) {
            Ok(content) => Some(content),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => None,
            Err(err) => return Err(ConfigError::Io(err)),
        };
        Self::from_sources(file.as_deref(), |key| std::env::var(key).ok())
    }

    /// Build a configuration from file contents and a variable lookup.
    fn from_sources(
        file: Option<&str>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut config = match file {
            Some(content) => toml::from_str(content)?,
            None => Self::default(),
        };

        if let Some(value) = lookup("SERVICEBAY_BIND") {
            config.server.bind = value
                .parse()
                .map_err(|_| ConfigError::InvalidOverride {
                    key: "SERVICEBAY_BIND",
                    value,
                })?;
        }
        if let Some(value) = lookup("SERVICEBAY_DATABASE_URL") {
            config.database.url = value;
        }
        if let Some(value) = lookup("RUST_LOG").or_else(|| lookup("SERVICEBAY_LOG")) {
            config.logging.filter = value;
        }

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.bind.port() == 0 {
            return Err(ConfigError::Validation("server port must be non-zero"));
        }
        if self.database.url.trim().is_empty() {
            return Err(ConfigError::Validation("database url must not be empty"));
        }
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([0, 0, 0, 0], 3000)),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:servicebay.db?mode=rwc".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "servicebayd=info,servicebay=info,tower_http=debug".to_string(),
        }
    }
}

/// Why the daemon could not be configured.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read servicebay.toml")]
    Io(#[source] std::io::Error),

    #[error("failed to parse servicebay.toml")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value {value:?} for {key}")]
    InvalidOverride { key: &'static str, value: String },

    #[error("invalid configuration: {0}")]
    Validation(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn env(vars: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |key| {
            vars.iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| (*value).to_string())
        }
    }

    #[test]
    fn should_use_defaults_when_nothing_is_configured() {
        let config = Config::from_sources(None, no_env).unwrap();
        assert_eq!(config.server.bind, SocketAddr::from(([0, 0, 0, 0], 3000)));
        assert_eq!(config.database.url, "sqlite:servicebay.db?mode=rwc");
        assert_eq!(
            config.logging.filter,
            "servicebayd=info,servicebay=info,tower_http=debug"
        );
    }

    #[test]
    fn should_read_every_section_from_file() {
        let file = "
            [server]
            bind = '127.0.0.1:9090'

            [database]
            url = 'sqlite:shop.db'

            [logging]
            filter = 'debug'
        ";
        let config = Config::from_sources(Some(file), no_env).unwrap();
        assert_eq!(config.server.bind, SocketAddr::from(([127, 0, 0, 1], 9090)));
        assert_eq!(config.database.url, "sqlite:shop.db");
        assert_eq!(config.logging.filter, "debug");
    }

    #[test]
    fn should_keep_defaults_for_sections_missing_from_file() {
        let config = Config::from_sources(Some("[logging]\nfilter = 'warn'"), no_env).unwrap();
        assert_eq!(config.server.bind.port(), 3000);
        assert_eq!(config.logging.filter, "warn");
    }

    #[test]
    fn should_reject_unknown_keys_in_file() {
        let result = Config::from_sources(Some("[server]\nhost = '127.0.0.1'"), no_env);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn should_let_environment_win_over_file() {
        let file = "
            [server]
            bind = '127.0.0.1:9090'

            [database]
            url = 'sqlite:shop.db'
        ";
        let config = Config::from_sources(
            Some(file),
            env(&[
                ("SERVICEBAY_BIND", "0.0.0.0:8081"),
                ("SERVICEBAY_DATABASE_URL", "sqlite::memory:"),
            ]),
        )
        .unwrap();
        assert_eq!(config.server.bind, SocketAddr::from(([0, 0, 0, 0], 8081)));
        assert_eq!(config.database.url, "sqlite::memory:");
    }

    #[test]
    fn should_prefer_rust_log_over_servicebay_log() {
        let config = Config::from_sources(
            None,
            env(&[("SERVICEBAY_LOG", "warn"), ("RUST_LOG", "trace")]),
        )
        .unwrap();
        assert_eq!(config.logging.filter, "trace");

        let config = Config::from_sources(None, env(&[("SERVICEBAY_LOG", "warn")])).unwrap();
        assert_eq!(config.logging.filter, "warn");
    }

    #[test]
    fn should_fail_on_malformed_bind_override() {
        let result = Config::from_sources(None, env(&[("SERVICEBAY_BIND", "localhost")]));
        assert!(matches!(
            result,
            Err(ConfigError::InvalidOverride {
                key: "SERVICEBAY_BIND",
                ..
            })
        ));
    }

    #[test]
    fn should_reject_zero_port() {
        let result = Config::from_sources(None, env(&[("SERVICEBAY_BIND", "127.0.0.1:0")]));
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn should_reject_empty_database_url() {
        let result = Config::from_sources(None, env(&[("SERVICEBAY_DATABASE_URL", " ")]));
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }
}
