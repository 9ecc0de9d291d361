//! The three collections the synchronization engine ties together.

use serde::{Deserialize, Serialize};

use crate::board::BoardStore;
use crate::error::KaizenResult;
use crate::meeting::MeetingStore;
use crate::project::ProjectStore;

/// Boards, projects and meetings held side by side.
///
/// The collections share no referential integrity: projects and meetings
/// refer to cards by id only. Use [`crate::sync`] to bring them back in line
/// after a mutation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Workspace {
    #[serde(default)]
    pub boards: BoardStore,
    #[serde(default)]
    pub projects: ProjectStore,
    #[serde(default)]
    pub meetings: MeetingStore,
}

impl Workspace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore a workspace from a JSON snapshot.
    pub fn from_json(json: &str) -> KaizenResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the workspace to a JSON snapshot.
    pub fn to_json(&self) -> KaizenResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::NewCard;

    #[test]
    fn test_snapshot_preserves_collections() {
        let mut ws = Workspace::new();
        ws.boards.ensure_department_boards("dept1", "en");
        let card = ws
            .boards
            .add_card("dept1-tasks", "dept1-tasks-to-do", NewCard::titled("Calibrate gauge"))
            .unwrap();
        let project = ws.projects.create_project("Metrology", None);
        ws.projects.add_task_to_project(&project.id, &card.id, "dept1-tasks").unwrap();
        ws.meetings.create_meeting("Daily", None);

        let restored = Workspace::from_json(&ws.to_json().unwrap()).unwrap();
        assert_eq!(restored, ws);
    }

    #[test]
    fn test_empty_snapshot() {
        let ws = Workspace::from_json("{}").unwrap();
        assert!(ws.boards.boards().is_empty());
        assert!(ws.projects.projects().is_empty());
    }
}
