//! Project configuration loaded from `.kaizen/config.toml`.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_DIR: &str = ".kaizen";
pub const CONFIG_FILE: &str = ".kaizen/config.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Workspace snapshot, relative to the project directory unless absolute.
    #[serde(default = "default_state_file")]
    pub state_file: PathBuf,
    /// Language of generated column titles: `en` or `es`.
    #[serde(default = "default_locale")]
    pub locale: String,
    /// Run the synchronization engine after card moves and project status changes.
    #[serde(default = "default_true")]
    pub auto_sync: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            state_file: default_state_file(),
            locale: default_locale(),
            auto_sync: default_true(),
        }
    }
}

fn default_state_file() -> PathBuf {
    PathBuf::from(".kaizen/state.json")
}

fn default_locale() -> String {
    "en".to_string()
}

fn default_true() -> bool {
    true
}

impl Settings {
    /// Absolute path of the snapshot file for a project directory.
    pub fn state_path(&self, project_dir: &Path) -> PathBuf {
        if self.state_file.is_absolute() {
            self.state_file.clone()
        } else {
            project_dir.join(&self.state_file)
        }
    }
}

/// Load settings, falling back to defaults when no config file exists.
pub fn load_settings(project_dir: &Path) -> Result<Settings> {
    let path = project_dir.join(CONFIG_FILE);
    if !path.exists() {
        return Ok(Settings::default());
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let settings: Settings = toml::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    if !matches!(settings.locale.as_str(), "en" | "es") {
        anyhow::bail!(
            "Unsupported locale '{}' in {} (expected 'en' or 'es')",
            settings.locale,
            path.display()
        );
    }
    Ok(settings)
}

/// Write the default configuration unless one already exists.
pub fn write_default_settings(project_dir: &Path, locale: &str) -> Result<bool> {
    let path = project_dir.join(CONFIG_FILE);
    if path.exists() {
        return Ok(false);
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let settings = Settings {
        locale: locale.to_string(),
        ..Settings::default()
    };
    let serialized = toml::to_string_pretty(&settings)?;
    std::fs::write(&path, serialized)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = load_settings(dir.path()).unwrap();
        assert_eq!(settings.locale, "en");
        assert!(settings.auto_sync);
        assert_eq!(settings.state_path(dir.path()), dir.path().join(".kaizen/state.json"));
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join(CONFIG_DIR)).unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "locale = \"es\"\nauto_sync = false\n").unwrap();

        let settings = load_settings(dir.path()).unwrap();
        assert_eq!(settings.locale, "es");
        assert!(!settings.auto_sync);
        assert_eq!(settings.state_file, PathBuf::from(".kaizen/state.json"));
    }

    #[test]
    fn test_unknown_locale_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join(CONFIG_DIR)).unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "locale = \"fr\"\n").unwrap();
        assert!(load_settings(dir.path()).is_err());
    }

    #[test]
    fn test_write_default_settings_once() {
        let dir = tempfile::tempdir().unwrap();
        assert!(write_default_settings(dir.path(), "es").unwrap());
        assert!(!write_default_settings(dir.path(), "en").unwrap());
        assert_eq!(load_settings(dir.path()).unwrap().locale, "es");
    }
}
