//! Configuration management with layered hierarchy
//!
//! Sources, lowest to highest priority:
//! 1. Built-in defaults
//! 2. Global user config (`<config dir>/hoscon/config.yaml`)
//! 3. Working-directory config (`./hoscon.yaml`)
//! 4. Environment (`HOSCON_DB`, `HOSCON_EXPORT_DIR`)
//! 5. Command-line flags, applied by the CLI on top of [`Config::load`]

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Database file used when nothing else is configured
pub const DEFAULT_DB_PATH: &str = "hoscon_demo.db";

/// Export directory used when nothing else is configured
pub const DEFAULT_EXPORT_DIR: &str = "exports";

/// File name of the working-directory config
pub const LOCAL_CONFIG_FILE: &str = "hoscon.yaml";

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// SQLite database file
    pub db_path: Option<PathBuf>,

    /// Directory export snapshots are written into
    pub export_dir: Option<PathBuf>,
}

impl Config {
    /// Load configuration from all file and environment sources
    pub fn load() -> Self {
        let mut config = Config::default();

        if let Some(global_path) = Self::global_config_path() {
            if let Some(global) = Self::from_file(&global_path) {
                config.merge(global);
            }
        }

        if let Some(local) = Self::from_file(Path::new(LOCAL_CONFIG_FILE)) {
            config.merge(local);
        }

        config.apply_env(|key| std::env::var(key).ok());
        config
    }

    /// Path to the global config file
    pub fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "hoscon")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Read one config file. Missing files are silently skipped; unreadable
    /// or malformed ones are skipped with a warning.
    pub fn from_file(path: &Path) -> Option<Config> {
        if !path.exists() {
            return None;
        }

        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "cannot read config file");
                return None;
            }
        };

        match serde_yml::from_str::<Config>(&contents) {
            Ok(config) => {
                debug!(path = %path.display(), "loaded config file");
                Some(config)
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring malformed config file");
                None
            }
        }
    }

    /// Merge another config into this one (other takes precedence)
    pub fn merge(&mut self, other: Config) {
        if other.db_path.is_some() {
            self.db_path = other.db_path;
        }
        if other.export_dir.is_some() {
            self.export_dir = other.export_dir;
        }
    }

    /// Apply `HOSCON_*` overrides; empty values are ignored
    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(db) = var("HOSCON_DB").filter(|v| !v.is_empty()) {
            self.db_path = Some(PathBuf::from(db));
        }
        if let Some(dir) = var("HOSCON_EXPORT_DIR").filter(|v| !v.is_empty()) {
            self.export_dir = Some(PathBuf::from(dir));
        }
    }

    /// Get the database path
    pub fn db_path(&self) -> PathBuf {
        self.db_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH))
    }

    /// Get the export directory
    pub fn export_dir(&self) -> PathBuf {
        self.export_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_EXPORT_DIR))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.db_path(), PathBuf::from("hoscon_demo.db"));
        assert_eq!(config.export_dir(), PathBuf::from("exports"));
    }

    #[test]
    fn test_merge_later_wins() {
        let mut config = Config {
            db_path: Some("a.db".into()),
            export_dir: Some("out".into()),
        };
        config.merge(Config {
            db_path: Some("b.db".into()),
            export_dir: None,
        });
        assert_eq!(config.db_path(), PathBuf::from("b.db"));
        assert_eq!(config.export_dir(), PathBuf::from("out"));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config {
            db_path: Some("file.db".into()),
            export_dir: Some("out".into()),
        };
        config.apply_env(|key| match key {
            "HOSCON_DB" => Some("/tmp/env.db".to_string()),
            "HOSCON_EXPORT_DIR" => Some(String::new()),
            _ => None,
        });
        assert_eq!(config.db_path(), PathBuf::from("/tmp/env.db"));
        assert_eq!(config.export_dir(), PathBuf::from("out"));
    }

    #[test]
    fn test_from_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("hoscon.yaml");
        std::fs::write(&path, "db_path: site.db\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.db_path, Some(PathBuf::from("site.db")));
        assert_eq!(config.export_dir, None);
    }

    #[test]
    fn test_malformed_file_is_skipped() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("hoscon.yaml");
        std::fs::write(&path, "db_path: [unclosed\n").unwrap();

        assert_eq!(Config::from_file(&path), None);
        assert_eq!(Config::from_file(&tmp.path().join("missing.yaml")), None);
    }
}
