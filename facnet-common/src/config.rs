//! Configuration loading
//!
//! Config file resolution follows this priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable `FACNET_CONFIG`
//! 3. `<config dir>/facnet/config.toml` (platform config directory)
//!
//! A missing config file is not fatal: compiled defaults are used and the
//! returned [`ConfigSource`] says so. Environment overrides are applied on top
//! of the file.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const CONFIG_ENV_VAR: &str = "FACNET_CONFIG";
pub const BACKEND_URL_ENV_VAR: &str = "FACNET_BACKEND_URL";
pub const BACKEND_KEY_ENV_VAR: &str = "FACNET_BACKEND_KEY";
pub const PORT_ENV_VAR: &str = "FACNET_PORT";
pub const LOG_LEVEL_ENV_VAR: &str = "FACNET_LOG_LEVEL";

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5740;

/// Complete TOML configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub server: ServerConfig,
    pub backend: BackendConfig,
    pub logging: LoggingConfig,
}

/// HTTP listener settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

/// Hosted backend settings
///
/// Without a `url` the service runs in offline mode and every page falls back
/// to built-in data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub url: Option<String>,
    pub anon_key: Option<String>,
    pub centers_table: String,
    pub comments_table: String,
    pub logo_bucket: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: None,
            anon_key: None,
            centers_table: "incubation_centers".to_string(),
            comments_table: "comments_incubation".to_string(),
            logo_bucket: "incubation-logos".to_string(),
        }
    }
}

impl BackendConfig {
    /// Backend URL without trailing slash, if one is configured
    pub fn base_url(&self) -> Option<String> {
        self.url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map(|url| url.trim_end_matches('/').to_string())
    }

    pub fn is_configured(&self) -> bool {
        self.base_url().is_some()
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Locate the config file
///
/// Returns `None` when no candidate exists; callers then use defaults.
pub fn resolve_config_path(cli_arg: Option<&Path>) -> Option<PathBuf> {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return Some(path.to_path_buf());
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        if !path.trim().is_empty() {
            return Some(PathBuf::from(path));
        }
    }

    // Priority 3: Platform config directory
    default_config_path().filter(|path| path.exists())
}

/// `<config dir>/facnet/config.toml` for the current platform
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("facnet").join("config.toml"))
}

/// Where a loaded configuration came from
///
/// Loading usually happens before logging is set up, so the outcome is
/// returned and reported by the caller once a subscriber is installed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Parsed from this file
    File(PathBuf),
    /// A path was given but nothing exists there; defaults in use
    MissingFile(PathBuf),
    /// No candidate path at all; defaults in use
    Defaults,
}

impl ConfigSource {
    /// Log the outcome (warning when defaults replaced a requested file)
    pub fn log(&self) {
        match self {
            ConfigSource::File(path) => info!("Loaded config from {}", path.display()),
            ConfigSource::MissingFile(path) => warn!(
                "Config file not found at {}, using defaults",
                path.display()
            ),
            ConfigSource::Defaults => warn!("No config file found, using defaults"),
        }
    }
}

/// Read and parse a TOML config file
///
/// A missing file yields defaults. An unreadable or malformed file is an
/// error.
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    if !path.exists() {
        return Ok(TomlConfig::default());
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
    let config = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))?;
    Ok(config)
}

/// Apply `FACNET_*` environment overrides
pub fn apply_env_overrides(config: &mut TomlConfig) -> Result<()> {
    if let Ok(url) = std::env::var(BACKEND_URL_ENV_VAR) {
        config.backend.url = Some(url);
    }
    if let Ok(key) = std::env::var(BACKEND_KEY_ENV_VAR) {
        config.backend.anon_key = Some(key);
    }
    if let Ok(port) = std::env::var(PORT_ENV_VAR) {
        config.server.port = port
            .trim()
            .parse()
            .map_err(|_| Error::Config(format!("{} is not a valid port: {}", PORT_ENV_VAR, port)))?;
    }
    if let Ok(level) = std::env::var(LOG_LEVEL_ENV_VAR) {
        config.logging.level = level;
    }
    Ok(())
}

/// Resolve, load and override the configuration in one step
pub fn load_config(cli_arg: Option<&Path>) -> Result<(TomlConfig, ConfigSource)> {
    let (mut config, source) = match resolve_config_path(cli_arg) {
        Some(path) if path.exists() => (load_toml_config(&path)?, ConfigSource::File(path)),
        Some(path) => (TomlConfig::default(), ConfigSource::MissingFile(path)),
        None => (TomlConfig::default(), ConfigSource::Defaults),
    };
    apply_env_overrides(&mut config)?;
    Ok((config, source))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_strips_trailing_slash() {
        let backend = BackendConfig {
            url: Some("https://demo.example.co/".to_string()),
            ..Default::default()
        };
        assert_eq!(backend.base_url().as_deref(), Some("https://demo.example.co"));
        assert!(backend.is_configured());
    }

    #[test]
    fn test_blank_url_is_not_configured() {
        let backend = BackendConfig {
            url: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(backend.base_url().is_none());
        assert!(!backend.is_configured());
        assert!(!BackendConfig::default().is_configured());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: TomlConfig = toml::from_str(
            r#"
            [backend]
            url = "https://demo.example.co"
            "#,
        )
        .unwrap();

        assert_eq!(config.backend.url.as_deref(), Some("https://demo.example.co"));
        assert_eq!(config.backend.centers_table, "incubation_centers");
        assert_eq!(config.backend.comments_table, "comments_incubation");
        assert_eq!(config.backend.logo_bucket, "incubation-logos");
        assert_eq!(config.server.port, DEFAULT_PORT);
        assert_eq!(config.logging.level, "info");
    }
}
