//! Meeting commands.

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;
use kaizen_core::sync;
use std::path::Path;

use crate::output;
use crate::session::{resolve_id, Session};

#[derive(Subcommand)]
pub enum MeetingCommands {
    /// Create a meeting
    New {
        /// Meeting title
        title: String,

        /// Meeting date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
    },

    /// List meetings
    List,

    /// Show a meeting with its agenda and outcomes
    Show { meeting_id: String },

    /// Add an agenda item
    Agenda { meeting_id: String, title: String },

    /// Record a board card as an outcome of the meeting
    Outcome {
        meeting_id: String,
        card_id: String,

        /// Also file the card under this agenda item
        #[arg(long)]
        agenda: Option<String>,
    },

    /// Delete a meeting. Its outcome cards stay on their boards.
    Delete { meeting_id: String },
}

pub fn execute(cmd: MeetingCommands, project_dir: &Path, state: Option<&Path>) -> Result<()> {
    let mut session = Session::open(project_dir, state)?;

    match cmd {
        MeetingCommands::New { title, date } => {
            let meeting = session.ws.meetings.create_meeting(&title, date.as_deref());
            session.save()?;
            println!(
                "{} Created meeting: {} ({})",
                "✓".green().bold(),
                meeting.title.cyan(),
                meeting.id.dimmed()
            );
        }

        MeetingCommands::List => {
            output::print_meetings_table(session.ws.meetings.meetings());
        }

        MeetingCommands::Show { meeting_id } => {
            let id = session.resolve_meeting(&meeting_id)?;
            let meeting = session
                .ws
                .meetings
                .get_meeting(&id)
                .with_context(|| format!("Meeting not found: {}", meeting_id))?;
            output::print_meeting(meeting);
        }

        MeetingCommands::Agenda { meeting_id, title } => {
            let id = session.resolve_meeting(&meeting_id)?;
            let item = session.ws.meetings.add_agenda_item(&id, &title)?;
            session.save()?;
            println!(
                "{} Added agenda item {} ({})",
                "✓".green().bold(),
                item.title.cyan(),
                item.id.dimmed()
            );
        }

        MeetingCommands::Outcome { meeting_id, card_id, agenda } => {
            let id = session.resolve_meeting(&meeting_id)?;
            let card_id = session.resolve_card(&card_id)?;
            let meeting = session
                .ws
                .meetings
                .get_meeting(&id)
                .with_context(|| format!("Meeting not found: {}", meeting_id))?;
            let agenda_id = agenda
                .map(|needle| resolve_id("Agenda item", meeting.agenda.iter().map(|a| a.id.as_str()), &needle))
                .transpose()?;
            let card = session
                .ws
                .boards
                .find_card_by_id(&card_id)
                .with_context(|| format!("Card not found: {}", card_id))?
                .card;

            let outcome = sync::add_kanban_card_to_meeting(&mut session.ws, &card, &id, agenda_id.as_deref());
            output::print_sync_outcome("meeting", &outcome);
            if !outcome.success {
                anyhow::bail!("{}", outcome.message);
            }
            session.save()?;
        }

        MeetingCommands::Delete { meeting_id } => {
            let id = session.resolve_meeting(&meeting_id)?;
            let meeting = session.ws.meetings.delete_meeting(&id)?;
            session.save()?;
            println!("{} Deleted meeting {}", "✓".green().bold(), meeting.title.cyan());
        }
    }

    Ok(())
}
