//! Config file persistence.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use reqwest::Url;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::app_config::AppConfig;

/// Failure to locate, write or accept the config file.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum ConfigError {
    #[error("no platform config directory for hangar")]
    NoConfigDir,
    #[error("config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to render default config: {0}")]
    Render(#[from] toml::ser::Error),
    #[error("config file {}: api.base_url {url:?} {reason}", .path.display())]
    InvalidBaseUrl {
        path: PathBuf,
        url: String,
        reason: String,
    },
}

impl ConfigError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Reads `config.toml`, creating it with defaults on first run.
pub struct StorageManager {
    default_path: PathBuf,
}

impl StorageManager {
    /// Uses the platform config directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoConfigDir`] when the platform has no home
    /// directory to derive it from.
    pub fn new() -> Result<Self, ConfigError> {
        AppConfig::default_config_path()
            .map(|default_path| Self { default_path })
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Uses `config.toml` inside `dir`.
    #[must_use]
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            default_path: dir.as_ref().join("config.toml"),
        }
    }

    /// Loads the configuration from `path_override` or the default path.
    ///
    /// A missing file is created with the defaults. A file that is not valid
    /// TOML is left alone and the defaults are used. A base URL the client
    /// could never reach is reported instead of silently replaced.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read or created, or
    /// when `api.base_url` is not an http(s) URL.
    pub fn load_config(&self, path_override: Option<&Path>) -> Result<AppConfig, ConfigError> {
        let path = path_override.unwrap_or(self.default_path.as_path());

        if !path.exists() {
            info!(path = %path.display(), "No config file, writing defaults");
            let config = AppConfig::default();
            write_atomically(path, &toml::to_string_pretty(&config)?)?;
            return Ok(config);
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
        let config = match toml::from_str::<AppConfig>(&content) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    path = %path.display(),
                    error = %e,
                    "Malformed config file, using defaults"
                );
                return Ok(AppConfig::default());
            }
        };

        check_base_url(&config.api.base_url).map_err(|reason| ConfigError::InvalidBaseUrl {
            path: path.to_path_buf(),
            url: config.api.base_url.clone(),
            reason,
        })?;

        debug!(path = %path.display(), base_url = %config.api.base_url, "Config loaded");
        Ok(config)
    }
}

fn check_base_url(raw: &str) -> Result<(), String> {
    let url = Url::parse(raw).map_err(|e| format!("is not a URL ({e})"))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(format!("uses unsupported scheme {:?}", url.scheme()));
    }
    Ok(())
}

fn write_atomically(path: &Path, content: &str) -> Result<(), ConfigError> {
    let dir = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir).map_err(|e| ConfigError::io(dir, e))?;

    let mut staged = tempfile::NamedTempFile::new_in(dir).map_err(|e| ConfigError::io(dir, e))?;
    staged
        .write_all(content.as_bytes())
        .map_err(|e| ConfigError::io(path, e))?;
    staged
        .persist(path)
        .map_err(|e| ConfigError::io(path, e.error))?;
    Ok(())
}
