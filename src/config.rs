//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::sheets::{SheetsConfig, MEMORY_URL};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub dashboard: DashboardConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Spreadsheet backend configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    /// Web-app URL, or `memory:` for the in-process store
    #[serde(default = "default_backend_url")]
    pub url: String,

    #[serde(default = "default_backend_timeout")]
    pub request_timeout_secs: u64,
}

fn default_backend_url() -> String {
    MEMORY_URL.to_string()
}

fn default_backend_timeout() -> u64 {
    10
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: default_backend_url(),
            request_timeout_secs: default_backend_timeout(),
        }
    }
}

impl BackendConfig {
    pub fn sheets_config(&self) -> SheetsConfig {
        SheetsConfig {
            base_url: self.url.clone(),
            request_timeout_secs: self.request_timeout_secs,
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8501
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Dashboard page configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "default_title")]
    pub title: String,

    #[serde(default = "default_form_title")]
    pub form_title: String,
}

fn default_title() -> String {
    "Machine History".to_string()
}

fn default_form_title() -> String {
    "Add Record".to_string()
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            form_title: default_form_title(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|error| ConfigError::Parse {
            path: path.to_path_buf(),
            error,
        })
    }

    fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Standard config file locations, in search order
    pub fn default_paths() -> Vec<PathBuf> {
        [
            dirs::config_dir().map(|p| p.join("maintlog").join("config.toml")),
            Some(PathBuf::from("/etc/maintlog/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Load from default locations or environment.
    ///
    /// Returns the file that was used, if any. A config file that exists
    /// but cannot be read or parsed is an error.
    pub fn load_default() -> Result<(Self, Option<PathBuf>), ConfigError> {
        Self::load_first(&Self::default_paths())
    }

    /// Load the explicit path if given, otherwise search the default locations
    pub fn resolve(explicit: Option<&Path>) -> Result<(Self, Option<PathBuf>), ConfigError> {
        match explicit {
            Some(path) => Ok((Self::load_with_env(path)?, Some(path.to_path_buf()))),
            None => Self::load_default(),
        }
    }

    fn load_first(paths: &[PathBuf]) -> Result<(Self, Option<PathBuf>), ConfigError> {
        match paths.iter().find(|path| path.exists()) {
            Some(path) => Ok((Self::load_with_env(path)?, Some(path.clone()))),
            None => Ok((Self::from_env(), None)),
        }
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("MAINTLOG_BACKEND_URL") {
            self.backend.url = url;
        }
        if let Some(timeout) = lookup("MAINTLOG_BACKEND_TIMEOUT_SECS") {
            if let Ok(t) = timeout.parse() {
                self.backend.request_timeout_secs = t;
            }
        }

        if let Some(host) = lookup("MAINTLOG_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("MAINTLOG_PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }

        if let Some(level) = lookup("MAINTLOG_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("MAINTLOG_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Maintlog Configuration
#
# Environment variables override these settings:
# - MAINTLOG_BACKEND_URL
# - MAINTLOG_BACKEND_TIMEOUT_SECS
# - MAINTLOG_HOST
# - MAINTLOG_PORT
# - MAINTLOG_LOG_LEVEL
# - MAINTLOG_LOG_FORMAT

[backend]
# Spreadsheet web-app URL (the deployed /exec endpoint).
# "memory:" runs against an in-process demo store.
url = "memory:"

# Request timeout in seconds
request_timeout_secs = 10

[server]
# Dashboard host
host = "0.0.0.0"

# Dashboard port
port = 8501

[dashboard]
# Page heading above the record table
title = "Machine History"

# Heading above the entry form
form_title = "Add Record"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.backend.url, MEMORY_URL);
        assert_eq!(config.backend.request_timeout_secs, 10);
        assert_eq!(config.server.addr(), "0.0.0.0:8501");
        assert_eq!(config.dashboard.title, "Machine History");
    }

    #[test]
    fn test_generated_config_parses() {
        let config = Config::parse(&generate_default_config()).unwrap();
        assert_eq!(config.server.port, 8501);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[backend]\nurl = \"https://example.test/exec\"\n\n[server]\nport = 9000"
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.backend.url, "https://example.test/exec");
        assert_eq!(config.backend.request_timeout_secs, 10);
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
    }

    #[test]
    fn test_load_errors() {
        let err = Config::load(Path::new("/nonexistent/maintlog.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nport = \"not a port\"").unwrap();
        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("MAINTLOG_BACKEND_URL", "https://example.test/exec"),
            ("MAINTLOG_PORT", "8080"),
            ("MAINTLOG_BACKEND_TIMEOUT_SECS", "soon"),
            ("MAINTLOG_LOG_FORMAT", "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.backend.url, "https://example.test/exec");
        assert_eq!(config.server.port, 8080);
        // Unparseable values are ignored
        assert_eq!(config.backend.request_timeout_secs, 10);
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_search_uses_first_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        let first = dir.path().join("first.toml");
        let second = dir.path().join("second.toml");
        std::fs::write(&first, "[server]\nport = 9001").unwrap();
        std::fs::write(&second, "[server]\nport = 9002").unwrap();

        let (config, source) = Config::load_first(&[missing.clone(), first.clone(), second]).unwrap();
        assert_eq!(config.server.port, 9001);
        assert_eq!(source, Some(first));

        let (config, source) = Config::load_first(&[missing]).unwrap();
        assert_eq!(config.server.port, 8501);
        assert_eq!(source, None);
    }

    #[test]
    fn test_broken_file_in_search_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let broken = dir.path().join("config.toml");
        let fallback = dir.path().join("fallback.toml");
        std::fs::write(
            &broken,
            "[backend]\nurl = \"https://sheet.example/exec\"\n\n[server]\nport = \"oops\"",
        )
        .unwrap();
        std::fs::write(&fallback, "[server]\nport = 9002").unwrap();

        // Must not fall through to a later file or to the demo store
        let err = Config::load_first(&[broken, fallback]).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_resolve_explicit_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[dashboard]\ntitle = \"Line 3\"").unwrap();

        let (config, source) = Config::resolve(Some(file.path())).unwrap();
        assert_eq!(config.dashboard.title, "Line 3");
        assert_eq!(source.as_deref(), Some(file.path()));
    }
}
