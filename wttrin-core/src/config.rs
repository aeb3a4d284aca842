use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::defaults::{BASE_URL, Defaults, TIMEOUT_SECS};

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// language = "en"
/// location = "Berlin"
/// base_url = "http://wttr.in/"
/// timeout_secs = 10
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// Language code used when a command does not pass one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Location used when a command does not pass one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "wttrin", "wttrin-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(BASE_URL)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(TIMEOUT_SECS))
    }

    /// Built-in defaults with the configured language and location applied.
    pub fn defaults(&self) -> Defaults {
        let mut defaults = Defaults::default();

        if let Some(language) = self.language.as_deref().filter(|l| !l.is_empty()) {
            defaults.language = language.to_string();
        }
        if let Some(location) = self.location.as_deref().filter(|l| !l.is_empty()) {
            defaults.location = location.to_string();
        }

        defaults
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::{DEFAULT_LANGUAGE, DEFAULT_LOCATION};

    #[test]
    fn empty_config_uses_builtin_defaults() {
        let cfg = Config::default();

        assert_eq!(cfg.base_url(), "http://wttr.in/");
        assert_eq!(cfg.timeout(), Duration::from_secs(10));
        assert_eq!(cfg.defaults(), Defaults::default());
    }

    #[test]
    fn configured_language_and_location_override_defaults() {
        let cfg = Config {
            language: Some("en".into()),
            location: Some("Berlin".into()),
            ..Config::default()
        };

        let defaults = cfg.defaults();
        assert_eq!(defaults.language, "en");
        assert_eq!(defaults.location, "Berlin");
        assert_eq!(defaults.line_flags, Defaults::default().line_flags);
    }

    #[test]
    fn blank_values_are_ignored() {
        let cfg = Config { language: Some(String::new()), ..Config::default() };

        assert_eq!(cfg.defaults().language, DEFAULT_LANGUAGE);
        assert_eq!(cfg.defaults().location, DEFAULT_LOCATION);
    }

    #[test]
    fn load_from_missing_file_returns_default() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load_from(&dir.path().join("config.toml")).unwrap();

        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let cfg = Config {
            language: Some("fr".into()),
            location: Some("Lyon".into()),
            base_url: Some("http://localhost:8002/".into()),
            timeout_secs: Some(3),
        };
        cfg.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, cfg);
        assert_eq!(loaded.timeout(), Duration::from_secs(3));
    }

    #[test]
    fn load_from_invalid_toml_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "language = [").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
