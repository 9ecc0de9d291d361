//! Whole-workspace reconciliation sweep.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::project_sync::sync_card_status_with_project;
use crate::project::ProjectStatus;
use crate::workspace::Workspace;

/// Summary of a [`reconcile`] sweep.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileReport {
    /// Distinct linked cards re-synced into their projects.
    pub cards_synced: usize,
    /// Project task references whose board id was refreshed after a transfer.
    pub task_refs_refreshed: usize,
    /// Projects whose status or progress changed during the sweep.
    pub projects_updated: usize,
    /// Meeting outcome copies whose recorded location changed.
    pub meeting_copies_updated: usize,
    /// Card ids referenced by a project but missing from every board.
    pub dangling_project_refs: Vec<String>,
    /// Card ids referenced by a meeting but missing from every board.
    pub dangling_meeting_refs: Vec<String>,
}

impl ReconcileReport {
    /// True when the sweep found nothing to repair.
    pub fn is_clean(&self) -> bool {
        self.task_refs_refreshed == 0
            && self.projects_updated == 0
            && self.meeting_copies_updated == 0
    }
}

/// Bring every project reference and meeting copy in line with the boards.
///
/// Dangling references are reported, never removed. Running the sweep on an
/// already consistent workspace changes nothing.
pub fn reconcile(ws: &mut Workspace) -> ReconcileReport {
    let mut report = ReconcileReport::default();

    let linked: BTreeSet<String> = ws
        .projects
        .projects()
        .iter()
        .flat_map(|p| p.tasks.iter().map(|t| t.card_id.clone()))
        .collect();

    let before = project_states(ws);

    for card_id in &linked {
        let Some(location) = ws.boards.find_card_by_id(card_id) else {
            warn!(card_id = %card_id, "Project references a card that no longer exists");
            report.dangling_project_refs.push(card_id.clone());
            continue;
        };
        report.task_refs_refreshed += ws.projects.refresh_task_board(card_id, &location.board_id);
        let outcome =
            sync_card_status_with_project(ws, card_id, &location.board_id, &location.column_id);
        if outcome.success {
            report.cards_synced += 1;
        }
    }

    let after = project_states(ws);
    report.projects_updated = after
        .iter()
        .filter(|(id, state)| before.get(*id) != Some(*state))
        .count();

    let mut dangling_meeting = BTreeSet::new();
    let mut updated = 0;
    let boards = &ws.boards;
    let swept = ws.meetings.mutate(|meetings| {
        for outcome in meetings.iter_mut().flat_map(|m| m.all_outcomes_mut()) {
            match boards.find_card_by_id(&outcome.card.id) {
                Some(location) => {
                    let board_id = Some(location.board_id);
                    let column_id = Some(location.column_id);
                    if outcome.board_id != board_id || outcome.column_id != column_id {
                        outcome.board_id = board_id;
                        outcome.column_id = column_id;
                        updated += 1;
                    }
                }
                None => {
                    dangling_meeting.insert(outcome.card.id.clone());
                }
            }
        }
        Ok(())
    });
    if let Err(e) = swept {
        warn!(error = %e, "Failed to refresh meeting copies");
        updated = 0;
        dangling_meeting.clear();
    }
    report.meeting_copies_updated = updated;
    report.dangling_meeting_refs = dangling_meeting.into_iter().collect();

    info!(
        cards_synced = report.cards_synced,
        task_refs_refreshed = report.task_refs_refreshed,
        projects_updated = report.projects_updated,
        meeting_copies_updated = report.meeting_copies_updated,
        dangling = report.dangling_project_refs.len() + report.dangling_meeting_refs.len(),
        "Reconciled workspace"
    );
    report
}

fn project_states(ws: &Workspace) -> BTreeMap<String, (ProjectStatus, u8)> {
    ws.projects
        .projects()
        .iter()
        .map(|p| (p.id.clone(), (p.status, p.progress)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{column_id, BoardCategory, NewCard};
    use crate::column::ColumnType;
    use crate::project::ProjectUpdate;
    use crate::sync::add_kanban_card_to_meeting;

    #[test]
    fn test_reconcile_repairs_drift_and_is_idempotent() {
        let mut ws = Workspace::new();
        ws.boards.ensure_department_boards("a", "en");
        ws.boards.ensure_department_boards("b", "en");
        let todo = column_id("a", BoardCategory::Tasks, ColumnType::ToDo);
        let card = ws.boards.add_card("a-tasks", &todo, NewCard::titled("Audit")).unwrap();

        let project = ws.projects.create_project("Audit", None);
        ws.projects.add_task_to_project(&project.id, &card.id, "a-tasks").unwrap();
        let meeting = ws.meetings.create_meeting("Review", None);
        add_kanban_card_to_meeting(&mut ws, &card, &meeting.id, None);

        let target = column_id("b", BoardCategory::Tasks, ColumnType::Done);
        ws.boards
            .transfer_card_to_department("a-tasks", &todo, &card.id, "b", "b-tasks", &target)
            .unwrap();

        let report = reconcile(&mut ws);
        assert_eq!(report.task_refs_refreshed, 1);
        assert_eq!(report.meeting_copies_updated, 1);
        assert_eq!(report.cards_synced, 1);
        assert_eq!(report.projects_updated, 1);

        let project = ws.projects.get_project(&project.id).unwrap();
        assert_eq!(project.tasks[0].board_id, "b-tasks");
        assert_eq!(project.progress, 100);
        assert_eq!(project.status, ProjectStatus::NotStarted);
        let copy = &ws.meetings.get_meeting(&meeting.id).unwrap().outcomes.tasks[0];
        assert_eq!(copy.column_id.as_deref(), Some(target.as_str()));

        let snapshot = ws.clone();
        assert!(reconcile(&mut ws).is_clean());
        assert_eq!(ws, snapshot);
    }

    #[test]
    fn test_reconcile_counts_project_repairs() {
        let mut ws = Workspace::new();
        ws.boards.ensure_department_boards("a", "en");
        let todo = column_id("a", BoardCategory::Tasks, ColumnType::ToDo);
        let done = column_id("a", BoardCategory::Tasks, ColumnType::Done);
        let card = ws.boards.add_card("a-tasks", &todo, NewCard::titled("Label racks")).unwrap();
        let project = ws.projects.create_project("5S", None);
        ws.projects.add_task_to_project(&project.id, &card.id, "a-tasks").unwrap();
        ws.projects
            .update_project(&project.id, ProjectUpdate::status(ProjectStatus::Planning))
            .unwrap();

        // moved without running the card sync
        ws.boards.move_card("a-tasks", &card.id, &todo, &done).unwrap();

        let report = reconcile(&mut ws);
        assert_eq!(report.projects_updated, 1);
        assert_eq!(report.task_refs_refreshed, 0);
        assert_eq!(report.meeting_copies_updated, 0);
        assert!(!report.is_clean());

        let project = ws.projects.get_project(&project.id).unwrap();
        assert_eq!(project.status, ProjectStatus::Completed);
        assert_eq!(project.progress, 100);

        assert!(reconcile(&mut ws).is_clean());
    }

    #[test]
    fn test_reconcile_reports_dangling_references() {
        let mut ws = Workspace::new();
        ws.boards.ensure_department_boards("a", "en");
        let todo = column_id("a", BoardCategory::Tasks, ColumnType::ToDo);
        let card = ws.boards.add_card("a-tasks", &todo, NewCard::titled("Gone")).unwrap();
        let project = ws.projects.create_project("p", None);
        ws.projects.add_task_to_project(&project.id, &card.id, "a-tasks").unwrap();
        let meeting = ws.meetings.create_meeting("m", None);
        add_kanban_card_to_meeting(&mut ws, &card, &meeting.id, None);

        ws.boards.delete_card("a-tasks", &todo, &card.id).unwrap();

        let report = reconcile(&mut ws);
        assert_eq!(report.dangling_project_refs, vec![card.id.clone()]);
        assert_eq!(report.dangling_meeting_refs, vec![card.id.clone()]);
        assert_eq!(ws.projects.get_project(&project.id).unwrap().tasks.len(), 1);
    }
}
