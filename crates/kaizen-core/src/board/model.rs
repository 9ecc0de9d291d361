//! Board domain models for department Kanban boards.

use serde::{Deserialize, Serialize};

use crate::column::{extract_column_type, is_completion_column, ColumnType};

/// A department board holding one category of work items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    pub id: String,
    pub category: BoardCategory,
    pub department_id: String,
    pub columns: Vec<Column>,
}

impl Board {
    /// Find a column by id.
    pub fn column(&self, column_id: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == column_id)
    }

    pub(crate) fn column_mut(&mut self, column_id: &str) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| c.id == column_id)
    }

    /// First column classified as `kind`.
    pub fn column_of_type(&self, kind: ColumnType) -> Option<&Column> {
        self.columns.iter().find(|c| c.column_type() == kind)
    }

    /// Total number of cards across all columns.
    pub fn card_count(&self) -> usize {
        self.columns.iter().map(|c| c.cards.len()).sum()
    }
}

/// A column within a board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub id: String,
    pub title: String,
    /// Explicit type tag. Absent on columns imported from legacy data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ColumnType>,
    #[serde(default)]
    pub cards: Vec<Card>,
}

impl Column {
    /// Create an empty column with an explicit type tag.
    pub fn new(id: impl Into<String>, title: impl Into<String>, kind: ColumnType) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            kind: Some(kind),
            cards: Vec::new(),
        }
    }

    /// Create an empty untagged column; its type is derived from id and title.
    pub fn untagged(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            kind: None,
            cards: Vec::new(),
        }
    }

    /// Resolve the column type: explicit tag, then id suffix, then title.
    pub fn column_type(&self) -> ColumnType {
        if let Some(kind) = self.kind {
            return kind;
        }
        match ColumnType::classify(extract_column_type(&self.id)) {
            ColumnType::Unclassified => ColumnType::classify(&self.title),
            kind => kind,
        }
    }

    /// Whether this column finishes the cards placed in it.
    pub fn is_completion(&self) -> bool {
        match self.kind {
            Some(kind) => kind.is_completion(),
            None => {
                is_completion_column(extract_column_type(&self.id))
                    || is_completion_column(&self.title)
            }
        }
    }

    pub fn card(&self, card_id: &str) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == card_id)
    }
}

/// A work item card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub assignee: Option<String>,
    pub due_date: Option<String>,
    pub priority: Option<Priority>,
    pub department_id: Option<String>,
    pub category: Option<CardCategory>,
    pub meeting_id: Option<String>,
    pub created_at: String,
}

/// Fields for a card about to be added to a column.
#[derive(Debug, Clone, Default)]
pub struct NewCard {
    pub title: String,
    pub description: Option<String>,
    pub assignee: Option<String>,
    pub due_date: Option<String>,
    pub priority: Option<Priority>,
    /// Overrides the board's department when set.
    pub department_id: Option<String>,
    /// Overrides the board's category when set.
    pub category: Option<CardCategory>,
    pub meeting_id: Option<String>,
}

impl NewCard {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }
}

/// Partial card update. `None` leaves a field as it is.
#[derive(Debug, Clone, Default)]
pub struct CardUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub assignee: Option<String>,
    pub due_date: Option<String>,
    pub priority: Option<Priority>,
}

/// Canonical location of a card.
#[derive(Debug, Clone, PartialEq)]
pub struct CardLocation {
    pub board_id: String,
    pub column_id: String,
    pub card: Card,
}

/// Card priority levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// Category of a single work item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardCategory {
    Task,
    Problem,
    Idea,
}

impl CardCategory {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "task" => Some(Self::Task),
            "problem" => Some(Self::Problem),
            "idea" => Some(Self::Idea),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Task => "task",
            Self::Problem => "problem",
            Self::Idea => "idea",
        }
    }

    /// Board category that hosts cards of this kind.
    pub fn board_category(&self) -> BoardCategory {
        match self {
            Self::Task => BoardCategory::Tasks,
            Self::Problem => BoardCategory::Problems,
            Self::Idea => BoardCategory::Ideas,
        }
    }
}

/// Category of a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoardCategory {
    Tasks,
    Problems,
    Ideas,
}

impl BoardCategory {
    pub const ALL: [BoardCategory; 3] = [Self::Tasks, Self::Problems, Self::Ideas];

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "tasks" | "task" => Some(Self::Tasks),
            "problems" | "problem" => Some(Self::Problems),
            "ideas" | "idea" => Some(Self::Ideas),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tasks => "tasks",
            Self::Problems => "problems",
            Self::Ideas => "ideas",
        }
    }

    pub fn card_category(&self) -> CardCategory {
        match self {
            Self::Tasks => CardCategory::Task,
            Self::Problems => CardCategory::Problem,
            Self::Ideas => CardCategory::Idea,
        }
    }

    /// Default column layout for a new board of this category.
    pub fn default_column_types(&self) -> &'static [ColumnType] {
        match self {
            Self::Tasks => DEFAULT_TASK_COLUMNS,
            Self::Problems => DEFAULT_PROBLEM_COLUMNS,
            Self::Ideas => DEFAULT_IDEA_COLUMNS,
        }
    }
}

impl std::fmt::Display for BoardCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub const DEFAULT_TASK_COLUMNS: &[ColumnType] =
    &[ColumnType::ToDo, ColumnType::InProgress, ColumnType::Done];

pub const DEFAULT_PROBLEM_COLUMNS: &[ColumnType] = &[
    ColumnType::New,
    ColumnType::Analysis,
    ColumnType::CorrectiveActions,
    ColumnType::Resolved,
];

pub const DEFAULT_IDEA_COLUMNS: &[ColumnType] = &[
    ColumnType::Idea,
    ColumnType::Approved,
    ColumnType::Implementation,
    ColumnType::Completed,
];

/// Conventional board id: `<departmentId>-<category>`.
pub fn board_id(department_id: &str, category: BoardCategory) -> String {
    format!("{}-{}", department_id, category.as_str())
}

/// Conventional column id: `<departmentId>-<category>-<columnType>`.
pub fn column_id(department_id: &str, category: BoardCategory, kind: ColumnType) -> String {
    format!("{}-{}-{}", department_id, category.as_str(), kind.as_str())
}

/// Default tagged columns for a department board.
pub fn default_columns(department_id: &str, category: BoardCategory, locale: &str) -> Vec<Column> {
    category
        .default_column_types()
        .iter()
        .map(|kind| Column::new(column_id(department_id, category, *kind), kind.title(locale), *kind))
        .collect()
}
