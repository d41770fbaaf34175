//! Application configuration.
//!
//! `<data_dir>/config.json` when present, defaults otherwise, then
//! `DATACORE_*` environment overrides on top.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const CONFIG_FILE: &str = "config.json";
pub const SETTINGS_FILE: &str = "settings.json";

const APP_DIR: &str = "datacore";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f64,
    pub height: f64,
    pub maximized: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1400.0,
            height: 900.0,
            maximized: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatacoreConfig {
    pub data_dir: PathBuf,
    pub log_level: String,
    pub api_base_url: Option<String>,
    pub notification_poll_secs: u64,
    pub summary_poll_secs: u64,
    pub printer_poll_secs: u64,
    pub window: WindowConfig,
}

impl Default for DatacoreConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: "info".to_string(),
            api_base_url: None,
            notification_poll_secs: 30,
            summary_poll_secs: 30,
            printer_poll_secs: 60,
            window: WindowConfig::default(),
        }
    }
}

/// Platform data directory: XDG on Linux, Application Support on macOS,
/// `%APPDATA%` on Windows.
pub fn default_data_dir() -> PathBuf {
    #[cfg(target_os = "macos")]
    {
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home)
                .join("Library/Application Support")
                .join(APP_DIR);
        }
    }
    #[cfg(target_os = "linux")]
    {
        if let Ok(xdg) = std::env::var("XDG_DATA_HOME") {
            return PathBuf::from(xdg).join(APP_DIR);
        }
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home).join(".local/share").join(APP_DIR);
        }
    }
    #[cfg(target_os = "windows")]
    {
        if let Ok(appdata) = std::env::var("APPDATA") {
            return PathBuf::from(appdata).join(APP_DIR);
        }
    }
    PathBuf::from(".").join(APP_DIR)
}

impl DatacoreConfig {
    /// Load from `data_dir` (or the platform default) and apply the
    /// process environment.
    pub fn load(data_dir: Option<PathBuf>) -> Result<Self, ConfigError> {
        let env_dir = std::env::var("DATACORE_DATA_DIR").ok().map(PathBuf::from);
        let dir = data_dir.or(env_dir).unwrap_or_else(default_data_dir);
        let mut config = Self::load_from(&dir)?;
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Read `<dir>/config.json`. A missing file yields defaults rooted at `dir`.
    pub fn load_from(dir: &Path) -> Result<Self, ConfigError> {
        let path = dir.join(CONFIG_FILE);
        let mut config = if path.exists() {
            let raw = std::fs::read_to_string(&path).map_err(|e| ConfigError::Read {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
            serde_json::from_str::<Self>(&raw).map_err(|e| ConfigError::Parse {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?
        } else {
            tracing::debug!("No config at {}, using defaults", path.display());
            Self::default()
        };
        config.data_dir = dir.to_path_buf();
        Ok(config)
    }

    /// `DATACORE_LOG` and `DATACORE_API_URL`.
    pub fn apply_overrides(&mut self, env: impl Fn(&str) -> Option<String>) {
        if let Some(level) = env("DATACORE_LOG").filter(|v| !v.is_empty()) {
            self.log_level = level;
        }
        if let Some(url) = env("DATACORE_API_URL") {
            self.api_base_url = (!url.is_empty()).then_some(url);
        }
    }

    pub fn settings_path(&self) -> PathBuf {
        self.data_dir.join(SETTINGS_FILE)
    }

    pub fn notification_poll(&self) -> Duration {
        Duration::from_secs(self.notification_poll_secs.max(1))
    }

    pub fn summary_poll(&self) -> Duration {
        Duration::from_secs(self.summary_poll_secs.max(1))
    }

    pub fn printer_poll(&self) -> Duration {
        Duration::from_secs(self.printer_poll_secs.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = DatacoreConfig::load_from(dir.path()).unwrap();
        assert_eq!(config.data_dir, dir.path());
        assert_eq!(config.notification_poll(), Duration::from_secs(30));
        assert_eq!(config.printer_poll(), Duration::from_secs(60));
        assert_eq!(config.settings_path(), dir.path().join("settings.json"));
    }

    #[test]
    fn test_partial_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            r#"{"log_level": "debug", "window": {"maximized": true}}"#,
        )
        .unwrap();
        let config = DatacoreConfig::load_from(dir.path()).unwrap();
        assert_eq!(config.log_level, "debug");
        assert!(config.window.maximized);
        assert_eq!(config.window.width, 1400.0);
        assert_eq!(config.summary_poll_secs, 30);
    }

    #[test]
    fn test_invalid_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "{not json").unwrap();
        let err = DatacoreConfig::load_from(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = DatacoreConfig::default();
        config.apply_overrides(|key| match key {
            "DATACORE_LOG" => Some("trace".into()),
            "DATACORE_API_URL" => Some("http://hub.local:8000".into()),
            _ => None,
        });
        assert_eq!(config.log_level, "trace");
        assert_eq!(config.api_base_url.as_deref(), Some("http://hub.local:8000"));

        config.apply_overrides(|key| (key == "DATACORE_API_URL").then(String::new));
        assert_eq!(config.api_base_url, None);
    }
}
