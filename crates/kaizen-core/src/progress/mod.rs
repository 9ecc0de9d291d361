//! Project progress aggregation.

use tracing::debug;

use crate::board::BoardStore;
use crate::error::{KaizenError, KaizenResult};
use crate::project::model::Project;
use crate::project::{ProjectStore, ProjectUpdate};

/// Count of linked cards sitting in a completion column, and the total.
///
/// References to cards that are no longer on any board count towards the
/// total but never as done.
pub fn completed_task_count(boards: &BoardStore, project: &Project) -> (usize, usize) {
    let done = project
        .tasks
        .iter()
        .filter(|task| {
            boards
                .find_card_by_id(&task.card_id)
                .and_then(|loc| {
                    boards
                        .get_board(&loc.board_id)
                        .and_then(|b| b.column(&loc.column_id))
                        .map(|c| c.is_completion())
                })
                .unwrap_or(false)
        })
        .count();
    (done, project.tasks.len())
}

/// Rounded completion percentage of a project's linked cards.
pub fn project_progress(boards: &BoardStore, project: &Project) -> u8 {
    let (done, total) = completed_task_count(boards, project);
    if total == 0 {
        return 0;
    }
    ((done * 100 + total / 2) / total) as u8
}

/// Recompute and store a project's progress from the board store.
pub fn calculate_project_progress(
    boards: &BoardStore,
    projects: &mut ProjectStore,
    project_id: &str,
) -> KaizenResult<u8> {
    let project = projects
        .get_project(project_id)
        .ok_or_else(|| KaizenError::ProjectNotFound(project_id.to_string()))?;

    let progress = project_progress(boards, project);
    if project.progress != progress {
        projects.update_project(project_id, ProjectUpdate::progress(progress))?;
    }
    debug!(project_id, progress, "Calculated project progress");
    Ok(progress)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{BoardCategory, Column, NewCard};

    fn setup() -> (BoardStore, ProjectStore, String, Vec<String>) {
        let mut boards = BoardStore::new();
        boards.initialize_board(
            "ops-problems",
            BoardCategory::Problems,
            "ops",
            vec![
                Column::untagged("ops-problems-new", "New"),
                Column::untagged("ops-problems-resolved", "Resolved"),
            ],
        );
        let ids: Vec<String> = (0..3)
            .map(|i| {
                boards
                    .add_card("ops-problems", "ops-problems-new", NewCard::titled(format!("p{i}")))
                    .unwrap()
                    .id
            })
            .collect();

        let mut projects = ProjectStore::new();
        let project = projects.create_project("Reduce scrap", None);
        for id in &ids {
            projects.add_task_to_project(&project.id, id, "ops-problems").unwrap();
        }
        (boards, projects, project.id, ids)
    }

    #[test]
    fn test_no_tasks_means_zero() {
        let boards = BoardStore::new();
        let mut projects = ProjectStore::new();
        let p = projects.create_project("Empty", None);
        assert_eq!(calculate_project_progress(&boards, &mut projects, &p.id).unwrap(), 0);
    }

    #[test]
    fn test_progress_counts_completion_columns() {
        let (mut boards, mut projects, pid, ids) = setup();
        assert_eq!(calculate_project_progress(&boards, &mut projects, &pid).unwrap(), 0);

        boards
            .move_card("ops-problems", &ids[0], "ops-problems-new", "ops-problems-resolved")
            .unwrap();
        assert_eq!(calculate_project_progress(&boards, &mut projects, &pid).unwrap(), 33);

        boards
            .move_card("ops-problems", &ids[1], "ops-problems-new", "ops-problems-resolved")
            .unwrap();
        assert_eq!(calculate_project_progress(&boards, &mut projects, &pid).unwrap(), 67);
        assert_eq!(projects.get_project(&pid).unwrap().progress, 67);
    }

    #[test]
    fn test_progress_is_deterministic() {
        let (boards, mut projects, pid, _) = setup();
        let first = calculate_project_progress(&boards, &mut projects, &pid).unwrap();
        let second = calculate_project_progress(&boards, &mut projects, &pid).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_dangling_reference_is_not_done() {
        let (mut boards, mut projects, pid, ids) = setup();
        boards
            .move_card("ops-problems", &ids[0], "ops-problems-new", "ops-problems-resolved")
            .unwrap();
        boards.delete_card("ops-problems", "ops-problems-resolved", &ids[0]).unwrap();
        assert_eq!(calculate_project_progress(&boards, &mut projects, &pid).unwrap(), 0);
    }

    #[test]
    fn test_missing_project() {
        let boards = BoardStore::new();
        let mut projects = ProjectStore::new();
        assert!(calculate_project_progress(&boards, &mut projects, "ghost").is_err());
    }
}
