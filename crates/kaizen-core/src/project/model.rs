//! Project domain models.

use serde::{Deserialize, Serialize};

/// A longer-running project grouping cards from one or more boards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub status: ProjectStatus,
    /// Completion percentage, 0..=100.
    pub progress: u8,
    /// Weak references into the board store. The project does not own the cards.
    #[serde(default)]
    pub tasks: Vec<ProjectTask>,
    #[serde(default)]
    pub milestones: Vec<Milestone>,
    pub created_at: String,
    pub updated_at: String,
}

impl Project {
    /// Whether any task reference points at `card_id`.
    pub fn references_card(&self, card_id: &str) -> bool {
        self.tasks.iter().any(|t| t.card_id == card_id)
    }
}

/// A card linked to a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectTask {
    pub id: String,
    pub card_id: String,
    /// Board the card lived on when it was linked. May be stale after a transfer.
    pub board_id: String,
}

/// A dated checkpoint within a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    pub id: String,
    pub title: String,
    pub due_date: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

/// Project lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    NotStarted,
    Planning,
    InProgress,
    OnHold,
    Completed,
}

impl ProjectStatus {
    /// Parse from string, accepting `-`, `_` or space separators.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace(['_', ' '], "-").as_str() {
            "not-started" => Some(Self::NotStarted),
            "planning" => Some(Self::Planning),
            "in-progress" => Some(Self::InProgress),
            "on-hold" => Some(Self::OnHold),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotStarted => "not-started",
            Self::Planning => "planning",
            Self::InProgress => "in-progress",
            Self::OnHold => "on-hold",
            Self::Completed => "completed",
        }
    }

    /// Statuses from which a card reaching a completion column finishes the project.
    pub fn advances_on_completion(&self) -> bool {
        matches!(self, Self::Planning | Self::InProgress)
    }

    /// Statuses that have a single board destination for linked cards.
    pub fn relocates_cards(&self) -> bool {
        matches!(self, Self::Completed | Self::OnHold)
    }
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Partial project update. `None` leaves a field as it is.
#[derive(Debug, Clone, Default)]
pub struct ProjectUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<ProjectStatus>,
    pub progress: Option<u8>,
}

impl ProjectUpdate {
    pub fn status(status: ProjectStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    pub fn progress(progress: u8) -> Self {
        Self {
            progress: Some(progress),
            ..Default::default()
        }
    }
}
