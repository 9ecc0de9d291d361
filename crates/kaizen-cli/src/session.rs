//! Loads the workspace snapshot for one CLI invocation and writes it back.

use anyhow::{Context, Result};
use kaizen_core::Workspace;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::{load_settings, Settings};

pub struct Session {
    pub settings: Settings,
    pub ws: Workspace,
    state_path: PathBuf,
}

impl Session {
    /// Open the project's workspace. `state_override` wins over the config file.
    pub fn open(project_dir: &Path, state_override: Option<&Path>) -> Result<Self> {
        let settings = load_settings(project_dir)?;
        let state_path = match state_override {
            Some(path) => path.to_path_buf(),
            None => settings.state_path(project_dir),
        };

        let ws = if state_path.exists() {
            let json = std::fs::read_to_string(&state_path)
                .with_context(|| format!("Failed to read {}", state_path.display()))?;
            Workspace::from_json(&json)
                .with_context(|| format!("Failed to parse {}", state_path.display()))?
        } else {
            debug!(path = %state_path.display(), "No snapshot yet, starting empty");
            Workspace::new()
        };

        Ok(Self {
            settings,
            ws,
            state_path,
        })
    }

    /// Persist the workspace snapshot.
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.state_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let json = self.ws.to_json()?;
        std::fs::write(&self.state_path, json)
            .with_context(|| format!("Failed to write {}", self.state_path.display()))?;
        debug!(path = %self.state_path.display(), "Saved workspace snapshot");
        Ok(())
    }
}

/// Resolve a full id or a unique id prefix against `ids`.
pub fn resolve_id<'a, I>(kind: &str, ids: I, needle: &str) -> Result<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut matches = Vec::new();
    for id in ids {
        if id == needle {
            return Ok(id.to_string());
        }
        if id.starts_with(needle) {
            matches.push(id);
        }
    }
    match matches.as_slice() {
        [only] => Ok(only.to_string()),
        [] => anyhow::bail!("{} not found: {}", kind, needle),
        _ => anyhow::bail!("{} id '{}' is ambiguous ({} matches)", kind, needle, matches.len()),
    }
}

impl Session {
    pub fn resolve_card(&self, needle: &str) -> Result<String> {
        let ids = self
            .ws
            .boards
            .boards()
            .iter()
            .flat_map(|b| &b.columns)
            .flat_map(|c| &c.cards)
            .map(|card| card.id.as_str());
        resolve_id("Card", ids, needle)
    }

    pub fn resolve_project(&self, needle: &str) -> Result<String> {
        let ids = self.ws.projects.projects().iter().map(|p| p.id.as_str());
        resolve_id("Project", ids, needle)
    }

    pub fn resolve_meeting(&self, needle: &str) -> Result<String> {
        let ids = self.ws.meetings.meetings().iter().map(|m| m.id.as_str());
        resolve_id("Meeting", ids, needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_id_prefix() {
        let ids = ["3f2a91", "3f7b00", "c1"];
        assert_eq!(resolve_id("Card", ids, "c1").unwrap(), "c1");
        assert_eq!(resolve_id("Card", ids, "3f2").unwrap(), "3f2a91");
        assert!(resolve_id("Card", ids, "3f").is_err());
        assert!(resolve_id("Card", ids, "zz").is_err());
    }

    #[test]
    fn test_resolve_exact_wins_over_prefix() {
        let ids = ["ab", "abc"];
        assert_eq!(resolve_id("Project", ids, "ab").unwrap(), "ab");
    }

    #[test]
    fn test_open_save_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = Session::open(dir.path(), None).unwrap();
        session.ws.boards.ensure_department_boards("dept1", "en");
        session.save().unwrap();

        let reopened = Session::open(dir.path(), None).unwrap();
        assert_eq!(reopened.ws.boards.boards().len(), 3);
    }

    #[test]
    fn test_state_override() {
        let dir = tempfile::tempdir().unwrap();
        let custom = dir.path().join("elsewhere/state.json");
        let session = Session::open(dir.path(), Some(&custom)).unwrap();
        session.save().unwrap();
        assert!(custom.exists());
        assert!(!dir.path().join(".kaizen/state.json").exists());
    }
}
