use crate::model::range::DateRange;
use anyhow::{Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable that overrides `api_url`
pub const API_URL_ENV: &str = "COMMISSIONS_API_URL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Commissions query endpoint
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Range loaded on startup and restored with `d`
    #[serde(default = "default_start")]
    pub default_start: String,
    #[serde(default = "default_end")]
    pub default_end: String,
}

fn default_api_url() -> String {
    "https://mini-core-c.onrender.com/comisiones".to_string()
}

fn default_start() -> String {
    "2025-05-01".to_string()
}

fn default_end() -> String {
    "2025-06-30".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            default_start: default_start(),
            default_end: default_end(),
        }
    }
}

impl Config {
    pub fn config_dir() -> Option<PathBuf> {
        let home = env::var("HOME").ok()?;
        Some(PathBuf::from(home).join(".commissions-tui"))
    }

    fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.json"))
    }

    /// `Ok(None)` when there is no config file; an error when it can't be read
    pub fn load() -> Result<Option<Config>> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(None),
        }
    }

    fn load_from(path: &Path) -> Result<Option<Config>> {
        if !path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("could not read {}", path.display()))?;
        let config = Self::from_json(&contents)
            .with_context(|| format!("malformed config {}", path.display()))?;
        Ok(Some(config))
    }

    fn from_json(contents: &str) -> serde_json::Result<Config> {
        serde_json::from_str(contents)
    }

    /// Load from disk if possible, else defaults; env var wins for the URL
    pub fn resolve() -> Config {
        let mut config = match Self::load() {
            Ok(Some(config)) => config,
            Ok(None) => Config::default(),
            Err(err) => {
                warn!("{:#}; using defaults", err);
                Config::default()
            }
        };
        if let Ok(url) = env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                config.api_url = url.trim().to_string();
            }
        }
        config
    }

    pub fn default_range(&self) -> DateRange {
        DateRange::new(self.default_start.clone(), self.default_end.clone())
    }

    /// Write the defaults for the user to edit, unless a config file exists.
    /// Returns the path written, if any.
    pub fn write_starter() -> Result<Option<PathBuf>> {
        let path = Self::config_path().context("Could not determine config path")?;
        Ok(Self::write_starter_at(&path)?.then_some(path))
    }

    fn write_starter_at(path: &Path) -> Result<bool> {
        if path.exists() {
            return Ok(false);
        }
        Config::default().save_to(path)?;
        Ok(true)
    }

    /// Save the config to disk
    fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            if !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_range() {
        let config = Config::default();
        assert_eq!(config.default_range(), DateRange::new("2025-05-01", "2025-06-30"));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config = Config::from_json(r#"{"api_url":"http://localhost:3000/comisiones"}"#).unwrap();
        assert_eq!(config.api_url, "http://localhost:3000/comisiones");
        assert_eq!(config.default_start, "2025-05-01");
        assert_eq!(config.default_end, "2025-06-30");
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = env::temp_dir().join(format!("commissions-tui-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_unreadable_file_is_an_error() {
        assert!(Config::from_json("{not json").is_err());
    }

    #[test]
    fn test_missing_file_loads_none() {
        let dir = scratch_dir("missing");
        assert_eq!(Config::load_from(&dir.join("config.json")).unwrap(), None);
    }

    #[test]
    fn test_malformed_file_is_kept() {
        let dir = scratch_dir("malformed");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.json");
        let typo = r#"{"api_url":"http://my-server/comisiones",}"#;
        fs::write(&path, typo).unwrap();

        assert!(Config::load_from(&path).is_err());
        assert!(!Config::write_starter_at(&path).unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), typo);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_starter_written_once() {
        let dir = scratch_dir("starter");
        let path = dir.join("config.json");

        assert!(Config::write_starter_at(&path).unwrap());
        assert_eq!(Config::load_from(&path).unwrap(), Some(Config::default()));

        let edited = Config {
            api_url: "http://localhost:3000/comisiones".to_string(),
            ..Config::default()
        };
        edited.save_to(&path).unwrap();
        assert!(!Config::write_starter_at(&path).unwrap());
        assert_eq!(Config::load_from(&path).unwrap(), Some(edited));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_round_trip_json() {
        let config = Config {
            api_url: "http://example.test/c".to_string(),
            default_start: "2024-01-01".to_string(),
            default_end: "2024-12-31".to_string(),
        };
        let json = serde_json::to_string_pretty(&config).unwrap();
        assert_eq!(Config::from_json(&json).unwrap(), config);
    }
}
