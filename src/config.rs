//! Application configuration persisted as TOML under the app directory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::app_dirs;
use crate::school::ClassId;

/// Default filename used to store the app configuration.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Settings loaded from and saved to the TOML config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base URL of the school backend serving the `/api` endpoints.
    #[serde(default = "default_backend_base_url")]
    pub backend_base_url: String,
    /// Base URL of the generative-AI endpoint.
    #[serde(default = "default_assist_base_url")]
    pub assist_base_url: String,
    /// Model identifier sent with every assist request.
    #[serde(default = "default_assist_model")]
    pub assist_model: String,
    /// Class the user last had open, restored on startup.
    #[serde(default)]
    pub last_selected_class: Option<ClassId>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_base_url: default_backend_base_url(),
            assist_base_url: default_assist_base_url(),
            assist_model: default_assist_model(),
            last_selected_class: None,
        }
    }
}

fn default_backend_base_url() -> String {
    "http://127.0.0.1:8080".to_string()
}

fn default_assist_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_assist_model() -> String {
    "gemini-3-flash-preview".to_string()
}

/// Errors raised while loading or saving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config at {path}: {source}")]
    ParseToml {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Failed to serialize config to TOML at {path}: {source}")]
    SerializeToml {
        path: PathBuf,
        source: toml::ser::Error,
    },
    #[error("Failed to create config directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write config at {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid base URL '{value}': {source}")]
    InvalidBaseUrl {
        value: String,
        source: url::ParseError,
    },
    #[error("No suitable config directory found")]
    NoConfigDir,
}

/// Resolve the configuration file path, ensuring the app directory exists.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    let dir = app_dirs::app_root_dir().map_err(map_app_dir_error)?;
    Ok(dir.join(CONFIG_FILE_NAME))
}

/// Load configuration from disk, returning defaults if the file is missing.
pub fn load_or_default() -> Result<AppConfig, ConfigError> {
    let path = config_path()?;
    load_from(&path)
}

/// Load configuration from a specific path, returning defaults if missing.
pub fn load_from(path: &Path) -> Result<AppConfig, ConfigError> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&text).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

/// Persist configuration, overwriting any previous contents.
pub fn save(config: &AppConfig) -> Result<(), ConfigError> {
    let path = config_path()?;
    save_to_path(config, &path)
}

/// Save configuration to a specific path, creating parent directories as needed.
pub fn save_to_path(config: &AppConfig, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| ConfigError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let text = toml::to_string_pretty(config).map_err(|source| ConfigError::SerializeToml {
        path: path.to_path_buf(),
        source,
    })?;
    std::fs::write(path, text).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse and normalize a base URL, trimming any trailing slash.
///
/// Endpoint paths are joined onto the returned string with a leading slash,
/// so the stored form never ends with one.
pub fn normalize_base_url(value: &str) -> Result<String, ConfigError> {
    let trimmed = value.trim();
    let parsed = Url::parse(trimmed).map_err(|source| ConfigError::InvalidBaseUrl {
        value: trimmed.to_string(),
        source,
    })?;
    let mut normalized = parsed.to_string();
    while normalized.ends_with('/') {
        normalized.pop();
    }
    Ok(normalized)
}

fn map_app_dir_error(error: app_dirs::AppDirError) -> ConfigError {
    match error {
        app_dirs::AppDirError::NoBaseDir => ConfigError::NoConfigDir,
        app_dirs::AppDirError::CreateDir { path, source } => {
            ConfigError::CreateDir { path, source }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn with_config_home<T>(dir: &Path, f: impl FnOnce() -> T) -> T {
        let _guard = crate::app_dirs::ConfigBaseGuard::set(dir.to_path_buf());
        f()
    }

    #[test]
    fn load_returns_defaults_when_missing() {
        let dir = tempdir().unwrap();
        with_config_home(dir.path(), || {
            let config = load_or_default().unwrap();
            assert_eq!(config.backend_base_url, default_backend_base_url());
            assert_eq!(config.assist_model, "gemini-3-flash-preview");
            assert!(config.last_selected_class.is_none());
        });
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempdir().unwrap();
        with_config_home(dir.path(), || {
            let mut config = AppConfig::default();
            config.backend_base_url = "http://10.0.0.5:9000".to_string();
            config.last_selected_class = Some(ClassId::from("c-42"));
            save(&config).unwrap();

            let loaded = load_or_default().unwrap();
            assert_eq!(loaded.backend_base_url, "http://10.0.0.5:9000");
            assert_eq!(
                loaded.last_selected_class,
                Some(ClassId::from("c-42"))
            );
        });
    }

    #[test]
    fn partial_file_fills_remaining_fields_with_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "backend_base_url = \"http://example.test\"\n").unwrap();
        let config = load_from(&path).unwrap();
        assert_eq!(config.backend_base_url, "http://example.test");
        assert_eq!(config.assist_base_url, default_assist_base_url());
        assert_eq!(config.assist_model, default_assist_model());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "backend_base_url = [not toml").unwrap();
        let err = load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseToml { .. }));
    }

    #[test]
    fn normalize_base_url_trims_trailing_slash() {
        let normalized = normalize_base_url("http://127.0.0.1:8080/").unwrap();
        assert_eq!(normalized, "http://127.0.0.1:8080");
        let err = normalize_base_url("not a url").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBaseUrl { .. }));
    }
}
