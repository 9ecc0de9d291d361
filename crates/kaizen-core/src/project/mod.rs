//! Project collection.

pub mod model;

pub use model::{Milestone, Project, ProjectStatus, ProjectTask, ProjectUpdate};

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::error::{KaizenError, KaizenResult};

/// In-memory collection of projects.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectStore {
    projects: Vec<Project>,
}

impl ProjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn get_project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    /// All projects that reference `card_id` through a task link.
    pub fn get_projects_for_card(&self, card_id: &str) -> Vec<&Project> {
        self.projects
            .iter()
            .filter(|p| p.references_card(card_id))
            .collect()
    }

    fn mutate<T>(&mut self, f: impl FnOnce(&mut Vec<Project>) -> KaizenResult<T>) -> KaizenResult<T> {
        let mut next = self.projects.clone();
        let value = f(&mut next)?;
        self.projects = next;
        Ok(value)
    }

    /// Create a new project in `not-started` status.
    pub fn create_project(&mut self, name: &str, description: Option<&str>) -> Project {
        let now = chrono::Utc::now().to_rfc3339();
        let project = Project {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            description: description.map(str::to_string),
            status: ProjectStatus::NotStarted,
            progress: 0,
            tasks: Vec::new(),
            milestones: Vec::new(),
            created_at: now.clone(),
            updated_at: now,
        };

        let mut next = self.projects.clone();
        next.push(project.clone());
        self.projects = next;
        debug!(project_id = %project.id, name, "Created project");
        project
    }

    /// Link a card to a project. Linking the same card twice is a no-op.
    pub fn add_task_to_project(
        &mut self,
        project_id: &str,
        card_id: &str,
        board_id: &str,
    ) -> KaizenResult<ProjectTask> {
        self.mutate(|projects| {
            let project = find_project_mut(projects, project_id)?;
            if let Some(existing) = project.tasks.iter().find(|t| t.card_id == card_id) {
                return Ok(existing.clone());
            }

            let task = ProjectTask {
                id: Uuid::new_v4().to_string(),
                card_id: card_id.to_string(),
                board_id: board_id.to_string(),
            };
            project.tasks.push(task.clone());
            touch(project);
            debug!(project_id, card_id, board_id, "Linked card to project");
            Ok(task)
        })
    }

    /// Unlink a card from a project.
    pub fn remove_task_from_project(&mut self, project_id: &str, card_id: &str) -> KaizenResult<()> {
        self.mutate(|projects| {
            let project = find_project_mut(projects, project_id)?;
            let before = project.tasks.len();
            project.tasks.retain(|t| t.card_id != card_id);
            if project.tasks.len() == before {
                return Err(KaizenError::CardNotFound(card_id.to_string()));
            }
            touch(project);
            Ok(())
        })
    }

    /// Point every task reference to `card_id` at `board_id`.
    ///
    /// Returns how many references changed.
    pub fn refresh_task_board(&mut self, card_id: &str, board_id: &str) -> usize {
        let stale = self
            .projects
            .iter()
            .flat_map(|p| &p.tasks)
            .filter(|t| t.card_id == card_id && t.board_id != board_id)
            .count();
        if stale == 0 {
            return 0;
        }

        let mut next = self.projects.clone();
        for project in &mut next {
            let mut changed = false;
            for task in project.tasks.iter_mut().filter(|t| t.card_id == card_id) {
                if task.board_id != board_id {
                    task.board_id = board_id.to_string();
                    changed = true;
                }
            }
            if changed {
                touch(project);
            }
        }
        self.projects = next;
        debug!(card_id, board_id, stale, "Refreshed project task references");
        stale
    }

    pub fn add_milestone(
        &mut self,
        project_id: &str,
        title: &str,
        due_date: Option<&str>,
    ) -> KaizenResult<Milestone> {
        self.mutate(|projects| {
            let project = find_project_mut(projects, project_id)?;
            let milestone = Milestone {
                id: Uuid::new_v4().to_string(),
                title: title.to_string(),
                due_date: due_date.map(str::to_string),
                completed: false,
            };
            project.milestones.push(milestone.clone());
            touch(project);
            Ok(milestone)
        })
    }

    pub fn complete_milestone(&mut self, project_id: &str, milestone_id: &str) -> KaizenResult<()> {
        self.mutate(|projects| {
            let project = find_project_mut(projects, project_id)?;
            let milestone = project
                .milestones
                .iter_mut()
                .find(|m| m.id == milestone_id)
                .ok_or_else(|| KaizenError::MilestoneNotFound(milestone_id.to_string()))?;
            milestone.completed = true;
            touch(project);
            Ok(())
        })
    }

    /// Apply a partial update. Progress is clamped to 100.
    pub fn update_project(&mut self, id: &str, update: ProjectUpdate) -> KaizenResult<Project> {
        self.mutate(|projects| {
            let project = find_project_mut(projects, id)?;
            if let Some(name) = update.name {
                project.name = name;
            }
            if update.description.is_some() {
                project.description = update.description;
            }
            if let Some(status) = update.status {
                project.status = status;
            }
            if let Some(progress) = update.progress {
                project.progress = progress.min(100);
            }
            touch(project);
            debug!(project_id = id, status = %project.status, progress = project.progress, "Updated project");
            Ok(project.clone())
        })
    }

    pub fn delete_project(&mut self, id: &str) -> KaizenResult<Project> {
        self.mutate(|projects| {
            let index = projects
                .iter()
                .position(|p| p.id == id)
                .ok_or_else(|| KaizenError::ProjectNotFound(id.to_string()))?;
            Ok(projects.remove(index))
        })
    }
}

fn find_project_mut<'a>(projects: &'a mut [Project], id: &str) -> KaizenResult<&'a mut Project> {
    projects
        .iter_mut()
        .find(|p| p.id == id)
        .ok_or_else(|| KaizenError::ProjectNotFound(id.to_string()))
}

fn touch(project: &mut Project) {
    project.updated_at = chrono::Utc::now().to_rfc3339();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parsing() {
        assert_eq!(ProjectStatus::from_str("on_hold"), Some(ProjectStatus::OnHold));
        assert_eq!(ProjectStatus::from_str("In Progress"), Some(ProjectStatus::InProgress));
        assert_eq!(ProjectStatus::from_str("not-started"), Some(ProjectStatus::NotStarted));
        assert_eq!(ProjectStatus::from_str("paused"), None);
    }

    #[test]
    fn test_projects_for_card() {
        let mut store = ProjectStore::new();
        let a = store.create_project("Line 2 changeover", None);
        let b = store.create_project("5S audit", Some("Quarterly"));
        store.create_project("Unrelated", None);

        store.add_task_to_project(&a.id, "c1", "dept1-tasks").unwrap();
        store.add_task_to_project(&b.id, "c1", "dept1-tasks").unwrap();
        store.add_task_to_project(&b.id, "c1", "dept1-tasks").unwrap();

        let linked = store.get_projects_for_card("c1");
        assert_eq!(linked.len(), 2);
        assert_eq!(store.get_project(&b.id).unwrap().tasks.len(), 1);
    }

    #[test]
    fn test_update_project_clamps_progress() {
        let mut store = ProjectStore::new();
        let p = store.create_project("p", None);
        let updated = store.update_project(&p.id, ProjectUpdate::progress(140)).unwrap();
        assert_eq!(updated.progress, 100);
        assert_eq!(updated.status, ProjectStatus::NotStarted);
    }

    #[test]
    fn test_missing_project_is_reported() {
        let mut store = ProjectStore::new();
        let err = store.update_project("ghost", ProjectUpdate::status(ProjectStatus::Planning)).unwrap_err();
        assert!(matches!(err, KaizenError::ProjectNotFound(_)));
        assert!(store.add_milestone("ghost", "Kickoff", None).is_err());
    }

    #[test]
    fn test_milestones() {
        let mut store = ProjectStore::new();
        let p = store.create_project("p", None);
        let m = store.add_milestone(&p.id, "Pilot", Some("2026-11-01")).unwrap();
        store.complete_milestone(&p.id, &m.id).unwrap();
        assert!(store.get_project(&p.id).unwrap().milestones[0].completed);
        assert!(matches!(
            store.complete_milestone(&p.id, "nope"),
            Err(KaizenError::MilestoneNotFound(_))
        ));
    }
}
