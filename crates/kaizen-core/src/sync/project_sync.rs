//! Card ⇄ project status propagation.

use tracing::{debug, info, warn};

use super::SyncOutcome;
use crate::board::{Board, BoardStore, Column};
use crate::column::{extract_column_type, ColumnType};
use crate::mapping::{column_type_from_project_status, status_and_progress};
use crate::progress::calculate_project_progress;
use crate::project::{ProjectStatus, ProjectUpdate};
use crate::workspace::Workspace;

/// Column type of `column_id`, preferring the board's own column record.
fn resolve_column_type(boards: &BoardStore, board_id: &str, column_id: &str) -> ColumnType {
    boards
        .get_board(board_id)
        .and_then(|b| b.column(column_id))
        .map(Column::column_type)
        .unwrap_or_else(|| ColumnType::classify(extract_column_type(column_id)))
}

/// Propagate a card's column into the projects that link it.
///
/// A project in `planning` or `in-progress` is completed when the card lands
/// in a column that maps to `completed`. Status never moves backwards through
/// this path. Progress is recomputed for every linked project.
pub fn sync_card_status_with_project(
    ws: &mut Workspace,
    card_id: &str,
    board_id: &str,
    column_id: &str,
) -> SyncOutcome {
    let linked: Vec<(String, ProjectStatus)> = ws
        .projects
        .get_projects_for_card(card_id)
        .into_iter()
        .map(|p| (p.id.clone(), p.status))
        .collect();

    if linked.is_empty() {
        debug!(card_id, "No linked projects");
        return SyncOutcome::failure(format!("No linked projects for card {}", card_id));
    }

    let kind = resolve_column_type(&ws.boards, board_id, column_id);
    let (mapped_status, _) = status_and_progress(kind);

    let mut completed = 0;
    for (project_id, status) in &linked {
        if status.advances_on_completion() && mapped_status == ProjectStatus::Completed {
            match ws
                .projects
                .update_project(project_id, ProjectUpdate::status(ProjectStatus::Completed))
            {
                Ok(_) => completed += 1,
                Err(e) => warn!(project_id = %project_id, error = %e, "Failed to complete project"),
            }
        }

        if let Err(e) = calculate_project_progress(&ws.boards, &mut ws.projects, project_id) {
            warn!(project_id = %project_id, error = %e, "Failed to recalculate progress");
        }
    }

    info!(
        card_id,
        column_type = %kind,
        projects = linked.len(),
        completed,
        "Synced card status with projects"
    );

    SyncOutcome::success(
        format!(
            "Synced {} project(s) for card {}; {} marked completed",
            linked.len(),
            card_id,
            completed
        ),
        linked.len(),
    )
}

/// Destination column for a card on `board` under project `status`.
///
/// Falls back to any completion column when a completed project's board has
/// no column of the canonical type.
fn target_column(board: &Board, status: ProjectStatus) -> Option<&Column> {
    let kind = column_type_from_project_status(status, board.category);
    board.column_of_type(kind).or_else(|| {
        if status == ProjectStatus::Completed {
            board.columns.iter().find(|c| c.is_completion())
        } else {
            None
        }
    })
}

/// Relocate a project's linked cards to the column matching `status`.
///
/// Only `completed` and `on-hold` have a board destination; other statuses
/// relocate nothing. `affected` is the number of cards actually moved.
pub fn sync_project_status_with_cards(
    ws: &mut Workspace,
    project_id: &str,
    status: ProjectStatus,
) -> SyncOutcome {
    let Some(project) = ws.projects.get_project(project_id) else {
        return SyncOutcome::failure(format!("Project not found: {}", project_id));
    };
    if project.tasks.is_empty() {
        return SyncOutcome::failure(format!("Project {} has no linked cards", project_id));
    }
    if !status.relocates_cards() {
        debug!(project_id, %status, "Status has no board destination");
        return SyncOutcome::success(format!("Status '{}' does not relocate cards", status), 0);
    }

    let card_ids: Vec<String> = project.tasks.iter().map(|t| t.card_id.clone()).collect();
    let mut relocated = 0;

    for card_id in &card_ids {
        let Some(location) = ws.boards.find_card_by_id(card_id) else {
            warn!(project_id, card_id = %card_id, "Linked card is not on any board");
            continue;
        };
        let Some(board) = ws.boards.get_board(&location.board_id) else {
            continue;
        };
        let Some(target) = target_column(board, status) else {
            warn!(
                project_id,
                card_id = %card_id,
                board_id = %board.id,
                %status,
                "Board has no column for status"
            );
            continue;
        };
        if target.id == location.column_id {
            continue;
        }

        let target_id = target.id.clone();
        match ws
            .boards
            .move_card(&location.board_id, card_id, &location.column_id, &target_id)
        {
            Ok(()) => relocated += 1,
            Err(e) => warn!(card_id = %card_id, error = %e, "Failed to relocate card"),
        }
    }

    if relocated > 0 {
        if let Err(e) = calculate_project_progress(&ws.boards, &mut ws.projects, project_id) {
            warn!(project_id, error = %e, "Failed to recalculate progress");
        }
    }

    info!(project_id, %status, relocated, "Synced project status with cards");
    SyncOutcome::success(format!("Relocated {} card(s)", relocated), relocated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{BoardCategory, NewCard};

    fn workspace() -> (Workspace, String, String) {
        let mut ws = Workspace::new();
        ws.boards.initialize_board(
            "dept1-tasks",
            BoardCategory::Tasks,
            "dept1",
            vec![
                Column::untagged("dept1-tasks-todo", "To Do"),
                Column::untagged("dept1-tasks-inprogress", "In Progress"),
                Column::untagged("dept1-tasks-done", "Done"),
            ],
        );
        let card = ws
            .boards
            .add_card("dept1-tasks", "dept1-tasks-todo", NewCard::titled("Replace belt"))
            .unwrap();
        let project = ws.projects.create_project("Conveyor", None);
        ws.projects
            .add_task_to_project(&project.id, &card.id, "dept1-tasks")
            .unwrap();
        (ws, card.id, project.id)
    }

    #[test]
    fn test_unlinked_card_reports_no_projects() {
        let (mut ws, _, _) = workspace();
        let outcome = sync_card_status_with_project(&mut ws, "other", "dept1-tasks", "dept1-tasks-done");
        assert!(!outcome.success);
        assert!(outcome.message.contains("No linked projects"));
    }

    #[test]
    fn test_not_started_project_is_not_completed() {
        let (mut ws, card, pid) = workspace();
        ws.boards
            .move_card("dept1-tasks", &card, "dept1-tasks-todo", "dept1-tasks-done")
            .unwrap();
        let outcome = sync_card_status_with_project(&mut ws, &card, "dept1-tasks", "dept1-tasks-done");
        assert!(outcome.success);

        let project = ws.projects.get_project(&pid).unwrap();
        assert_eq!(project.status, ProjectStatus::NotStarted);
        assert_eq!(project.progress, 100);
    }

    #[test]
    fn test_in_progress_column_does_not_change_status() {
        let (mut ws, card, pid) = workspace();
        ws.projects
            .update_project(&pid, ProjectUpdate::status(ProjectStatus::InProgress))
            .unwrap();
        ws.boards
            .move_card("dept1-tasks", &card, "dept1-tasks-todo", "dept1-tasks-inprogress")
            .unwrap();
        sync_card_status_with_project(&mut ws, &card, "dept1-tasks", "dept1-tasks-inprogress");
        assert_eq!(ws.projects.get_project(&pid).unwrap().status, ProjectStatus::InProgress);
        assert_eq!(ws.projects.get_project(&pid).unwrap().progress, 0);
    }

    #[test]
    fn test_unknown_column_id_is_classified_from_text() {
        let (mut ws, card, pid) = workspace();
        ws.projects
            .update_project(&pid, ProjectUpdate::status(ProjectStatus::Planning))
            .unwrap();
        // column not on the board: the id suffix alone decides
        sync_card_status_with_project(&mut ws, &card, "legacy", "x-y-completed");
        assert_eq!(ws.projects.get_project(&pid).unwrap().status, ProjectStatus::Completed);
    }

    #[test]
    fn test_planning_relocates_nothing() {
        let (mut ws, _, pid) = workspace();
        let before = ws.boards.clone();
        let outcome = sync_project_status_with_cards(&mut ws, &pid, ProjectStatus::Planning);
        assert!(outcome.success);
        assert_eq!(outcome.affected, 0);
        assert_eq!(ws.boards, before);
    }

    #[test]
    fn test_missing_or_empty_project_fails() {
        let (mut ws, _, _) = workspace();
        assert!(!sync_project_status_with_cards(&mut ws, "ghost", ProjectStatus::Completed).success);

        let empty = ws.projects.create_project("Empty", None);
        let outcome = sync_project_status_with_cards(&mut ws, &empty.id, ProjectStatus::Completed);
        assert!(!outcome.success);
    }

    #[test]
    fn test_completed_relocates_and_updates_progress() {
        let (mut ws, card, pid) = workspace();
        let outcome = sync_project_status_with_cards(&mut ws, &pid, ProjectStatus::Completed);
        assert_eq!(outcome.affected, 1);
        assert_eq!(ws.boards.find_card_by_id(&card).unwrap().column_id, "dept1-tasks-done");
        assert_eq!(ws.projects.get_project(&pid).unwrap().progress, 100);

        let again = sync_project_status_with_cards(&mut ws, &pid, ProjectStatus::Completed);
        assert_eq!(again.affected, 0);
    }

    #[test]
    fn test_completed_falls_back_to_any_completion_column() {
        let mut ws = Workspace::new();
        ws.boards.initialize_board(
            "qa-problems",
            BoardCategory::Problems,
            "qa",
            vec![
                Column::untagged("open", "Open"),
                Column::untagged("closed", "Done"),
            ],
        );
        let card = ws.boards.add_card("qa-problems", "open", NewCard::titled("Leak")).unwrap();
        let project = ws.projects.create_project("Leaks", None);
        ws.projects.add_task_to_project(&project.id, &card.id, "qa-problems").unwrap();

        let outcome = sync_project_status_with_cards(&mut ws, &project.id, ProjectStatus::Completed);
        assert_eq!(outcome.affected, 1);
        assert_eq!(ws.boards.find_card_by_id(&card.id).unwrap().column_id, "closed");
    }
}
