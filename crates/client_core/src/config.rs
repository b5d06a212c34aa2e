use std::{
    fs, io,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::Deserialize;
use thiserror::Error;
use url::Url;

pub const DEFAULT_API_BASE_URL: &str = "https://jsonplaceholder.typicode.com";
pub const SETTINGS_FILE: &str = "blog_browser.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_base_url: String,
    /// Per-request timeout. Unset means requests may hang indefinitely.
    pub request_timeout_secs: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.into(),
            request_timeout_secs: None,
        }
    }
}

impl Settings {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Applies a base URL override (CLI flag) after validating it.
    pub fn with_api_base_url(mut self, raw: &str) -> Result<Self, SettingsError> {
        self.api_base_url = normalize_base_url(raw)?;
        Ok(self)
    }

    pub fn with_request_timeout_secs(mut self, secs: u64) -> Result<Self, SettingsError> {
        if secs == 0 {
            return Err(SettingsError::InvalidTimeout { value: "0".into() });
        }
        self.request_timeout_secs = Some(secs);
        Ok(self)
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file '{}': {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse settings file '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid api base url '{value}': {reason}")]
    InvalidBaseUrl { value: String, reason: String },
    #[error("invalid request timeout '{value}': expected a positive number of seconds")]
    InvalidTimeout { value: String },
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    api_base_url: Option<String>,
    request_timeout_secs: Option<u64>,
}

/// Defaults, then `blog_browser.toml` in the working directory, then env vars.
pub fn load_settings() -> Result<Settings, SettingsError> {
    load_settings_from(Path::new(SETTINGS_FILE), |name| std::env::var(name).ok())
}

pub fn load_settings_from(
    path: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> Result<Settings, SettingsError> {
    let mut settings = Settings::default();

    match fs::read_to_string(path) {
        Ok(raw) => {
            let file_cfg: FileSettings =
                toml::from_str(&raw).map_err(|source| SettingsError::Parse {
                    path: path.to_path_buf(),
                    source,
                })?;
            if let Some(v) = file_cfg.api_base_url {
                settings.api_base_url = normalize_base_url(&v)?;
            }
            if let Some(secs) = file_cfg.request_timeout_secs {
                settings = settings.with_request_timeout_secs(secs)?;
            }
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(source) => {
            return Err(SettingsError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    }

    if let Some(v) = env("BLOG_API_BASE_URL") {
        settings.api_base_url = normalize_base_url(&v)?;
    }
    if let Some(v) = env("APP__API_BASE_URL") {
        settings.api_base_url = normalize_base_url(&v)?;
    }
    if let Some(v) = env("APP__REQUEST_TIMEOUT_SECS") {
        let secs = v
            .trim()
            .parse::<u64>()
            .map_err(|_| SettingsError::InvalidTimeout { value: v.clone() })?;
        settings = settings.with_request_timeout_secs(secs)?;
    }

    Ok(settings)
}

pub(crate) fn normalize_base_url(raw: &str) -> Result<String, SettingsError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let invalid = |reason: &str| SettingsError::InvalidBaseUrl {
        value: raw.to_string(),
        reason: reason.to_string(),
    };

    if trimmed.is_empty() {
        return Err(invalid("empty"));
    }
    let parsed = Url::parse(trimmed).map_err(|err| invalid(&err.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(invalid("must start with http:// or https://"));
    }
    if parsed.host_str().is_none() {
        return Err(invalid("missing host"));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
