//! Card commands.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use colored::Colorize;
use kaizen_core::board::{CardCategory, CardLocation, CardUpdate, NewCard, Priority};
use kaizen_core::sync;
use std::path::Path;

use crate::output;
use crate::session::Session;

#[derive(Subcommand)]
pub enum CardCommands {
    /// Add a card to a board column
    Add(AddCardArgs),

    /// Show a card and where it lives
    Show {
        /// Card ID or unique prefix
        card_id: String,
    },

    /// Move a card to another column of its board
    Move {
        /// Card ID or unique prefix
        card_id: String,

        /// Destination column ID
        column_id: String,
    },

    /// Edit card details
    Update(UpdateCardArgs),

    /// Delete a card
    Delete {
        /// Card ID or unique prefix
        card_id: String,
    },

    /// Transfer a card to another department's board
    Transfer(TransferArgs),
}

#[derive(Args)]
pub struct AddCardArgs {
    /// Board ID (e.g. dept1-tasks)
    pub board_id: String,

    /// Column ID
    pub column_id: String,

    /// Card title
    pub title: String,

    #[arg(short, long)]
    pub description: Option<String>,

    #[arg(short, long)]
    pub assignee: Option<String>,

    /// Due date (YYYY-MM-DD)
    #[arg(long)]
    pub due: Option<String>,

    /// Priority (low, medium, high)
    #[arg(long)]
    pub priority: Option<String>,

    /// Card category (task, problem, idea); defaults to the board's
    #[arg(long)]
    pub category: Option<String>,
}

#[derive(Args)]
pub struct UpdateCardArgs {
    /// Card ID or unique prefix
    pub card_id: String,

    #[arg(short, long)]
    pub title: Option<String>,

    #[arg(short, long)]
    pub description: Option<String>,

    #[arg(short, long)]
    pub assignee: Option<String>,

    #[arg(long)]
    pub due: Option<String>,

    #[arg(long)]
    pub priority: Option<String>,
}

#[derive(Args)]
pub struct TransferArgs {
    /// Card ID or unique prefix
    pub card_id: String,

    /// Receiving department
    pub department: String,

    /// Receiving board ID
    pub board_id: String,

    /// Receiving column ID
    pub column_id: String,
}

fn parse_priority(value: Option<&str>) -> Result<Option<Priority>> {
    value
        .map(|p| Priority::from_str(p).with_context(|| format!("Unknown priority '{}'", p)))
        .transpose()
}

fn locate(session: &Session, needle: &str) -> Result<CardLocation> {
    let card_id = session.resolve_card(needle)?;
    session
        .ws
        .boards
        .find_card_by_id(&card_id)
        .with_context(|| format!("Card not found: {}", needle))
}

/// Push a card's new location into its projects and meeting.
pub(crate) fn auto_sync_card(session: &mut Session, card_id: &str, board_id: &str, column_id: &str) {
    if !session.settings.auto_sync {
        return;
    }
    let projects = sync::sync_card_status_with_project(&mut session.ws, card_id, board_id, column_id);
    output::print_sync_outcome("projects", &projects);
    let meeting = sync::sync_kanban_card_with_meeting(&mut session.ws, card_id, board_id, column_id);
    output::print_sync_outcome("meeting", &meeting);
}

pub fn execute(cmd: CardCommands, project_dir: &Path, state: Option<&Path>) -> Result<()> {
    let mut session = Session::open(project_dir, state)?;

    match cmd {
        CardCommands::Add(args) => {
            let category = args
                .category
                .as_deref()
                .map(|c| CardCategory::from_str(c).with_context(|| format!("Unknown card category '{}'", c)))
                .transpose()?;
            let new = NewCard {
                description: args.description,
                assignee: args.assignee,
                due_date: args.due,
                priority: parse_priority(args.priority.as_deref())?,
                category,
                ..NewCard::titled(args.title)
            };
            let card = session.ws.boards.add_card(&args.board_id, &args.column_id, new)?;
            session.save()?;
            println!(
                "{} Created card: {} ({})",
                "✓".green().bold(),
                card.title.cyan(),
                card.id.dimmed()
            );
        }

        CardCommands::Show { card_id } => {
            let location = locate(&session, &card_id)?;
            output::print_card(&location.card, &location.board_id, &location.column_id);

            let projects = session.ws.projects.get_projects_for_card(&location.card.id);
            if !projects.is_empty() {
                println!();
                println!("{}", "Projects".bold());
                for project in projects {
                    println!("  {} {} {}", "•".cyan(), project.name, project.status.as_str().dimmed());
                }
            }
        }

        CardCommands::Move { card_id, column_id } => {
            let location = locate(&session, &card_id)?;
            session.ws.boards.move_card(
                &location.board_id,
                &location.card.id,
                &location.column_id,
                &column_id,
            )?;
            println!(
                "{} Moved card {} to {}",
                "✓".green().bold(),
                location.card.title.cyan(),
                column_id.cyan()
            );
            auto_sync_card(&mut session, &location.card.id, &location.board_id, &column_id);
            session.save()?;
        }

        CardCommands::Update(args) => {
            let location = locate(&session, &args.card_id)?;
            let update = CardUpdate {
                title: args.title,
                description: args.description,
                assignee: args.assignee,
                due_date: args.due,
                priority: parse_priority(args.priority.as_deref())?,
            };
            let card = session.ws.boards.update_card(
                &location.board_id,
                &location.column_id,
                &location.card.id,
                update,
            )?;
            session.save()?;
            println!("{} Updated card {}", "✓".green().bold(), card.title.cyan());
        }

        CardCommands::Delete { card_id } => {
            let location = locate(&session, &card_id)?;
            let card = session.ws.boards.delete_card(
                &location.board_id,
                &location.column_id,
                &location.card.id,
            )?;
            session.save()?;
            println!("{} Deleted card {}", "✓".green().bold(), card.title.cyan());

            let linked = session.ws.projects.get_projects_for_card(&card.id).len();
            if linked > 0 {
                println!(
                    "  {} still referenced by {} project(s)",
                    "!".yellow().bold(),
                    linked
                );
            }
        }

        CardCommands::Transfer(args) => {
            let location = locate(&session, &args.card_id)?;
            let card = session.ws.boards.transfer_card_to_department(
                &location.board_id,
                &location.column_id,
                &location.card.id,
                &args.department,
                &args.board_id,
                &args.column_id,
            )?;
            println!(
                "{} Transferred {} to {} / {}",
                "✓".green().bold(),
                card.title.cyan(),
                args.board_id.cyan(),
                args.column_id.cyan()
            );
            if session.settings.auto_sync {
                session.ws.projects.refresh_task_board(&card.id, &args.board_id);
            }
            auto_sync_card(&mut session, &card.id, &args.board_id, &args.column_id);
            session.save()?;
        }
    }

    Ok(())
}
