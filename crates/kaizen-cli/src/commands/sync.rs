//! Explicit synchronization commands.

use anyhow::{Context, Result};
use clap::Subcommand;
use kaizen_core::project::ProjectStatus;
use kaizen_core::sync;
use std::path::Path;

use crate::output;
use crate::session::Session;

#[derive(Subcommand)]
pub enum SyncCommands {
    /// Push a card's current column into its linked projects
    Card { card_id: String },

    /// Move a project's cards to the column matching its status
    Project {
        project_id: String,

        /// Status to sync to; defaults to the project's current status
        #[arg(long)]
        status: Option<String>,
    },

    /// Refresh meeting copies of a card with its current location
    Meeting { card_id: String },

    /// Reconcile every project and meeting against the boards
    All,
}

pub fn execute(cmd: SyncCommands, project_dir: &Path, state: Option<&Path>) -> Result<()> {
    let mut session = Session::open(project_dir, state)?;

    match cmd {
        SyncCommands::Card { card_id } => {
            let card_id = session.resolve_card(&card_id)?;
            let location = session
                .ws
                .boards
                .find_card_by_id(&card_id)
                .with_context(|| format!("Card not found: {}", card_id))?;
            let outcome = sync::sync_card_status_with_project(
                &mut session.ws,
                &card_id,
                &location.board_id,
                &location.column_id,
            );
            output::print_sync_outcome("projects", &outcome);
        }

        SyncCommands::Project { project_id, status } => {
            let id = session.resolve_project(&project_id)?;
            let status = match status {
                Some(s) => ProjectStatus::from_str(&s)
                    .with_context(|| format!("Unknown project status '{}'", s))?,
                None => {
                    session
                        .ws
                        .projects
                        .get_project(&id)
                        .with_context(|| format!("Project not found: {}", project_id))?
                        .status
                }
            };
            let outcome = sync::sync_project_status_with_cards(&mut session.ws, &id, status);
            output::print_sync_outcome("cards", &outcome);
        }

        SyncCommands::Meeting { card_id } => {
            let card_id = session.resolve_card(&card_id)?;
            let location = session
                .ws
                .boards
                .find_card_by_id(&card_id)
                .with_context(|| format!("Card not found: {}", card_id))?;
            let outcome = sync::sync_kanban_card_with_meeting(
                &mut session.ws,
                &card_id,
                &location.board_id,
                &location.column_id,
            );
            output::print_sync_outcome("meeting", &outcome);
        }

        SyncCommands::All => {
            let report = sync::reconcile(&mut session.ws);
            output::print_reconcile_report(&report);
        }
    }

    session.save()?;
    Ok(())
}
