//! Bidirectional mapping between column types and project lifecycle.
//!
//! The forward direction is lossy: several column types collapse onto the same
//! status/progress pair. The reverse direction returns one canonical column
//! type per (status, board category) cell and is not an inverse of the
//! forward lookup.

use crate::board::model::BoardCategory;
use crate::column::ColumnType;
use crate::project::model::ProjectStatus;

/// Status and progress assumed for columns that cannot be classified.
pub const FALLBACK_STATUS: ProjectStatus = ProjectStatus::InProgress;
pub const FALLBACK_PROGRESS: u8 = 50;

/// Forward table, ordered. First matching row wins.
const FORWARD: &[(&[ColumnType], ProjectStatus, u8)] = &[
    (
        &[ColumnType::ToDo, ColumnType::New, ColumnType::Idea],
        ProjectStatus::NotStarted,
        0,
    ),
    (
        &[ColumnType::Analysis, ColumnType::Approved],
        ProjectStatus::Planning,
        25,
    ),
    (&[ColumnType::InProgress], ProjectStatus::InProgress, 50),
    (
        &[ColumnType::CorrectiveActions, ColumnType::Implementation],
        ProjectStatus::InProgress,
        75,
    ),
    (
        &[ColumnType::Done, ColumnType::Resolved, ColumnType::Completed],
        ProjectStatus::Completed,
        100,
    ),
];

fn forward(kind: ColumnType) -> (ProjectStatus, u8) {
    FORWARD
        .iter()
        .find(|(kinds, _, _)| kinds.contains(&kind))
        .map(|(_, status, progress)| (*status, *progress))
        .unwrap_or((FALLBACK_STATUS, FALLBACK_PROGRESS))
}

/// Project status implied by a column type (an extracted id suffix or a title).
pub fn project_status_from_column(column_type: &str) -> ProjectStatus {
    forward(ColumnType::classify(column_type)).0
}

/// Progress percentage implied by a column type.
pub fn progress_from_column(column_type: &str) -> u8 {
    forward(ColumnType::classify(column_type)).1
}

/// Typed forward lookup for columns that carry an explicit tag.
pub fn status_and_progress(kind: ColumnType) -> (ProjectStatus, u8) {
    forward(kind)
}

/// Canonical column type for a project status on a board of the given category.
pub fn column_type_from_project_status(
    status: ProjectStatus,
    category: BoardCategory,
) -> ColumnType {
    use BoardCategory::{Ideas, Problems, Tasks};
    use ProjectStatus::*;

    match (status, category) {
        (NotStarted, Tasks) => ColumnType::ToDo,
        (NotStarted, Problems) => ColumnType::New,
        (NotStarted, Ideas) => ColumnType::Idea,

        (Planning, Tasks) => ColumnType::ToDo,
        (Planning, Problems) => ColumnType::Analysis,
        (Planning, Ideas) => ColumnType::Approved,

        (InProgress, Tasks) => ColumnType::InProgress,
        (InProgress, Problems) => ColumnType::CorrectiveActions,
        (InProgress, Ideas) => ColumnType::Implementation,

        (OnHold, Tasks) => ColumnType::InProgress,
        (OnHold, Problems) => ColumnType::Analysis,
        (OnHold, Ideas) => ColumnType::Approved,

        (Completed, Tasks) => ColumnType::Done,
        (Completed, Problems) => ColumnType::Resolved,
        (Completed, Ideas) => ColumnType::Completed,
    }
}
