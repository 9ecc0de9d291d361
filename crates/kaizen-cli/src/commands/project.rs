//! Project commands.

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;
use kaizen_core::progress::calculate_project_progress;
use kaizen_core::project::{ProjectStatus, ProjectUpdate};
use kaizen_core::sync;
use std::path::Path;

use crate::output;
use crate::session::{resolve_id, Session};

#[derive(Subcommand)]
pub enum ProjectCommands {
    /// Create a new project
    New {
        /// Project name
        name: String,

        #[arg(short, long)]
        description: Option<String>,
    },

    /// List all projects
    List,

    /// Show a project with its cards and milestones
    Show {
        /// Project ID or unique prefix
        project_id: String,
    },

    /// Link a card to a project
    Link { project_id: String, card_id: String },

    /// Remove a card from a project
    Unlink { project_id: String, card_id: String },

    /// Add a milestone
    Milestone {
        project_id: String,

        /// Milestone title
        title: String,

        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,
    },

    /// Mark a milestone as completed
    CompleteMilestone { project_id: String, milestone_id: String },

    /// Change project status (not-started, planning, in-progress, on-hold, completed)
    Status { project_id: String, status: String },

    /// Delete a project. Its cards stay on their boards.
    Delete { project_id: String },
}

fn recompute_progress(session: &mut Session, project_id: &str) -> Result<u8> {
    let progress = calculate_project_progress(&session.ws.boards, &mut session.ws.projects, project_id)?;
    Ok(progress)
}

pub fn execute(cmd: ProjectCommands, project_dir: &Path, state: Option<&Path>) -> Result<()> {
    let mut session = Session::open(project_dir, state)?;

    match cmd {
        ProjectCommands::New { name, description } => {
            let project = session.ws.projects.create_project(&name, description.as_deref());
            session.save()?;
            println!(
                "{} Created project: {} ({})",
                "✓".green().bold(),
                project.name.cyan(),
                project.id.dimmed()
            );
        }

        ProjectCommands::List => {
            output::print_projects_table(session.ws.projects.projects());
        }

        ProjectCommands::Show { project_id } => {
            let id = session.resolve_project(&project_id)?;
            let project = session
                .ws
                .projects
                .get_project(&id)
                .with_context(|| format!("Project not found: {}", project_id))?;
            let boards = &session.ws.boards;
            output::print_project(project, |card_id| {
                boards
                    .find_card_by_id(card_id)
                    .map(|loc| (loc.board_id, loc.column_id, loc.card.title))
            });
        }

        ProjectCommands::Link { project_id, card_id } => {
            let id = session.resolve_project(&project_id)?;
            let card_id = session.resolve_card(&card_id)?;
            let location = session
                .ws
                .boards
                .find_card_by_id(&card_id)
                .with_context(|| format!("Card not found: {}", card_id))?;
            session
                .ws
                .projects
                .add_task_to_project(&id, &card_id, &location.board_id)?;
            let progress = recompute_progress(&mut session, &id)?;
            session.save()?;
            println!(
                "{} Linked {} to project ({}% complete)",
                "✓".green().bold(),
                location.card.title.cyan(),
                progress
            );
        }

        ProjectCommands::Unlink { project_id, card_id } => {
            let id = session.resolve_project(&project_id)?;
            let project = session
                .ws
                .projects
                .get_project(&id)
                .with_context(|| format!("Project not found: {}", project_id))?;
            // The card may already be gone from every board.
            let card_id = resolve_id("Card", project.tasks.iter().map(|t| t.card_id.as_str()), &card_id)?;
            session.ws.projects.remove_task_from_project(&id, &card_id)?;
            let progress = recompute_progress(&mut session, &id)?;
            session.save()?;
            println!(
                "{} Unlinked {} ({}% complete)",
                "✓".green().bold(),
                card_id.dimmed(),
                progress
            );
        }

        ProjectCommands::Milestone { project_id, title, due } => {
            let id = session.resolve_project(&project_id)?;
            let milestone = session.ws.projects.add_milestone(&id, &title, due.as_deref())?;
            session.save()?;
            println!(
                "{} Added milestone {} ({})",
                "✓".green().bold(),
                milestone.title.cyan(),
                milestone.id.dimmed()
            );
        }

        ProjectCommands::CompleteMilestone { project_id, milestone_id } => {
            let id = session.resolve_project(&project_id)?;
            let project = session
                .ws
                .projects
                .get_project(&id)
                .with_context(|| format!("Project not found: {}", project_id))?;
            let milestone_id = resolve_id(
                "Milestone",
                project.milestones.iter().map(|m| m.id.as_str()),
                &milestone_id,
            )?;
            session.ws.projects.complete_milestone(&id, &milestone_id)?;
            session.save()?;
            println!("{} Milestone completed", "✓".green().bold());
        }

        ProjectCommands::Status { project_id, status } => {
            let id = session.resolve_project(&project_id)?;
            let status = ProjectStatus::from_str(&status)
                .with_context(|| format!("Unknown project status '{}'", status))?;
            let project = session.ws.projects.update_project(&id, ProjectUpdate::status(status))?;
            println!(
                "{} Project {} is now {}",
                "✓".green().bold(),
                project.name.cyan(),
                status.as_str().yellow()
            );
            if session.settings.auto_sync {
                let outcome = sync::sync_project_status_with_cards(&mut session.ws, &id, status);
                output::print_sync_outcome("cards", &outcome);
            }
            session.save()?;
        }

        ProjectCommands::Delete { project_id } => {
            let id = session.resolve_project(&project_id)?;
            let project = session.ws.projects.delete_project(&id)?;
            session.save()?;
            println!("{} Deleted project {}", "✓".green().bold(), project.name.cyan());
        }
    }

    Ok(())
}
