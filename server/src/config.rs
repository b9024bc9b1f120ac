use anyhow::{Context, Result};
use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use database::PoolSettings;

/// Prefix for layered environment overrides, e.g. `TASKS_SERVER__PORT`
const ENV_PREFIX: &str = "TASKS";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct DatabaseConfig {
    /// Optional database URL. If not provided, a per-user SQLite file is used
    pub url: Option<String>,
    /// Maximum number of database connections in the pool
    pub max_connections: u32,
    /// Connection timeout in seconds
    pub connection_timeout: u64,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ServerConfig {
    /// Listen address for the HTTP server
    pub listen_addr: String,
    /// Port number to listen on
    pub port: u16,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Log format (pretty, json, compact)
    pub format: LogFormat,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
    Compact,
}

impl Config {
    /// Load configuration from the embedded defaults, `CONFIG_FILE` and the
    /// process environment
    pub fn from_env() -> Result<Self> {
        let vars: HashMap<String, String> = env::vars().collect();
        let config_file = vars.get("CONFIG_FILE").map(PathBuf::from);
        Self::load(config_file.as_deref(), &vars)
    }

    /// Load configuration from a specific file path on top of the defaults
    pub fn from_file(path: &str) -> Result<Self> {
        let vars: HashMap<String, String> = env::vars().collect();
        Self::load(Some(std::path::Path::new(path)), &vars)
    }

    /// Build the layered configuration against an explicit set of variables
    ///
    /// Layers, lowest precedence first: embedded defaults, the optional
    /// file, `TASKS_*` variables, then `DATABASE_URL`, `LISTEN_ADDR`, `PORT`
    /// and `LOG_LEVEL`.
    pub fn load(
        config_file: Option<&std::path::Path>,
        vars: &HashMap<String, String>,
    ) -> Result<Self> {
        let mut builder = ConfigBuilder::builder().add_source(File::from_str(
            include_str!("../config/default.toml"),
            FileFormat::Toml,
        ));

        if let Some(path) = config_file {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml));
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(Some(vars.clone())),
        );

        let config = builder
            .build()
            .context("Failed to build configuration")?;

        let mut result: Config = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        result.apply_standard_env_vars(vars)?;
        Ok(result)
    }

    /// Apply standard environment variables (DATABASE_URL, LISTEN_ADDR, PORT, LOG_LEVEL)
    fn apply_standard_env_vars(&mut self, vars: &HashMap<String, String>) -> Result<()> {
        if let Some(database_url) = vars.get("DATABASE_URL") {
            self.database.url = Some(database_url.clone());
        }

        if let Some(listen_addr) = vars.get("LISTEN_ADDR") {
            self.server.listen_addr = listen_addr.clone();
        }

        if let Some(port) = vars.get("PORT") {
            self.server.port = port
                .parse()
                .with_context(|| format!("Invalid PORT value: {port}"))?;
        }

        if let Some(log_level) = vars.get("LOG_LEVEL") {
            self.logging.level = log_level.clone();
        }

        Ok(())
    }

    /// Get the database URL with the per-user default as fallback
    pub fn database_url(&self) -> String {
        match &self.database.url {
            Some(url) => url.clone(),
            None => Self::default_database_url(),
        }
    }

    /// Default SQLite location: `$XDG_DATA_HOME/tasks-api/tasks.sqlite`, else
    /// `$HOME/tasks.sqlite`
    pub fn default_database_url() -> String {
        if let Ok(xdg_data) = env::var("XDG_DATA_HOME") {
            return format!("sqlite://{xdg_data}/tasks-api/tasks.sqlite");
        }

        let home = env::var("HOME")
            .or_else(|_| env::var("USERPROFILE"))
            .unwrap_or_else(|_| ".".to_string());
        format!("sqlite://{home}/tasks.sqlite")
    }

    /// Get the server socket address
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.listen_addr, self.server.port)
    }

    /// Pool sizing handed to the SQLite store
    pub fn pool_settings(&self) -> PoolSettings {
        PoolSettings {
            max_connections: self.database.max_connections,
            acquire_timeout: Duration::from_secs(self.database.connection_timeout),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        match self.logging.level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(anyhow::anyhow!(
                    "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                    self.logging.level
                ));
            }
        }

        let database_url = self.database_url();
        if !database_url.starts_with("sqlite:") {
            return Err(anyhow::anyhow!(
                "Only SQLite databases are supported. URL must start with 'sqlite:'. Got: {}",
                database_url
            ));
        }

        if self.server.port == 0 {
            return Err(anyhow::anyhow!("Server port cannot be 0"));
        }

        if self.database.max_connections == 0 {
            return Err(anyhow::anyhow!(
                "Database max_connections must be greater than 0"
            ));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                url: None,
                max_connections: 5,
                connection_timeout: 30,
            },
            server: ServerConfig {
                listen_addr: "127.0.0.1".to_string(),
                port: 8000,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: LogFormat::Pretty,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn test_embedded_defaults_match_default_impl() {
        let config = Config::load(None, &HashMap::new()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_database_url_with_default() {
        let config = Config::default();
        let url = config.database_url();
        assert!(url.starts_with("sqlite://"));
        assert!(url.ends_with("tasks.sqlite"));
    }

    #[test]
    fn test_database_url_with_custom() {
        let mut config = Config::default();
        config.database.url = Some("sqlite://custom.db".to_string());
        assert_eq!(config.database_url(), "sqlite://custom.db");
    }

    #[test]
    fn test_server_address() {
        let config = Config::default();
        assert_eq!(config.server_address(), "127.0.0.1:8000");
    }

    #[test]
    fn test_config_validation() {
        assert!(Config::default().validate().is_ok());

        let mut invalid = Config::default();
        invalid.logging.level = "invalid".to_string();
        assert!(invalid.validate().is_err());

        let mut invalid = Config::default();
        invalid.database.url = Some("postgres://localhost/tasks".to_string());
        assert!(invalid.validate().is_err());

        let mut invalid = Config::default();
        invalid.server.port = 0;
        assert!(invalid.validate().is_err());

        let mut invalid = Config::default();
        invalid.database.max_connections = 0;
        assert!(invalid.validate().is_err());

        let mut memory = Config::default();
        memory.database.url = Some("sqlite::memory:".to_string());
        assert!(memory.validate().is_ok());
    }

    #[test]
    fn test_prefixed_environment_override() {
        let config = Config::load(
            None,
            &vars(&[
                ("TASKS_SERVER__PORT", "9100"),
                ("TASKS_DATABASE__MAX_CONNECTIONS", "12"),
                ("TASKS_LOGGING__FORMAT", "json"),
            ]),
        )
        .unwrap();

        assert_eq!(config.server.port, 9100);
        assert_eq!(config.database.max_connections, 12);
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_standard_variables_win_over_prefixed() {
        let config = Config::load(
            None,
            &vars(&[
                ("TASKS_SERVER__PORT", "9100"),
                ("PORT", "9200"),
                ("DATABASE_URL", "sqlite://test.db"),
                ("LISTEN_ADDR", "0.0.0.0"),
                ("LOG_LEVEL", "debug"),
            ]),
        )
        .unwrap();

        assert_eq!(config.server.port, 9200);
        assert_eq!(config.database.url.as_deref(), Some("sqlite://test.db"));
        assert_eq!(config.server_address(), "0.0.0.0:9200");
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_invalid_port_variable() {
        let result = Config::load(None, &vars(&[("PORT", "eighty")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_file_layer() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[server]\nport = 7000\n\n[logging]\nlevel = \"warn\"").unwrap();

        let config = Config::load(Some(file.path()), &HashMap::new()).unwrap();
        assert_eq!(config.server.port, 7000);
        assert_eq!(config.logging.level, "warn");
        // Keys absent from the file keep their defaults
        assert_eq!(config.server.listen_addr, "127.0.0.1");
    }

    #[test]
    fn test_pool_settings() {
        let settings = Config::default().pool_settings();
        assert_eq!(settings.max_connections, 5);
        assert_eq!(settings.acquire_timeout, Duration::from_secs(30));
    }
}
