// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Export preferences, persisted as `export.json` in the user config directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Use `EDDFEDDH.gpx` instead of `IFR Frankfurt (EDDF) to Hamburg (EDDH).gpx`.
    pub route_save_short_name: bool,
    /// Garmin files reference user waypoints by name instead of coordinates.
    pub garmin_user_waypoints: bool,
    /// Pre-fill the file dialog with a generated name.
    pub propose_filename: bool,
    pub save_approach_waypoints: bool,
    pub save_sid_star_waypoints: bool,
    /// Last directory used per export dialect, keyed by settings key.
    pub last_directories: HashMap<String, PathBuf>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            route_save_short_name: false,
            garmin_user_waypoints: false,
            propose_filename: true,
            save_approach_waypoints: false,
            save_sid_star_waypoints: false,
            last_directories: HashMap::new(),
        }
    }
}

impl ExportConfig {
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("org", "fplx", "fplx")
            .map(|dirs| dirs.config_dir().join("export.json"))
            .unwrap_or_else(|| PathBuf::from("export.json"))
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::default_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).context("Failed to create config directory")?;
            }
        }
        let content =
            serde_json::to_string_pretty(self).context("Failed to serialize export config")?;
        fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
    }

    pub fn last_directory(&self, settings_key: &str) -> Option<&Path> {
        self.last_directories.get(settings_key).map(PathBuf::as_path)
    }

    /// Remembers the directory of `file` for the dialect.
    pub fn remember_directory(&mut self, settings_key: &str, file: &Path) {
        if let Some(dir) = file.parent().filter(|d| !d.as_os_str().is_empty()) {
            self.last_directories
                .insert(settings_key.to_string(), dir.to_path_buf());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = ExportConfig::load_from(&dir.path().join("export.json")).unwrap();
        assert_eq!(config, ExportConfig::default());
        assert!(config.propose_filename);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("export.json");

        let mut config = ExportConfig {
            route_save_short_name: true,
            ..Default::default()
        };
        config.remember_directory("Route/Vfp", &dir.path().join("plans").join("EDDFEDDH.vfp"));
        config.save_to(&path).unwrap();

        let loaded = ExportConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.last_directory("Route/Vfp"), Some(dir.path().join("plans").as_path()));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("export.json");
        fs::write(&path, r#"{"garmin_user_waypoints": true}"#).unwrap();
        let config = ExportConfig::load_from(&path).unwrap();
        assert!(config.garmin_user_waypoints);
        assert!(config.propose_filename);
    }

    #[test]
    fn test_corrupt_file_is_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("export.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(ExportConfig::load_from(&path).is_err());
    }
}
