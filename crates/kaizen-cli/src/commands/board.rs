//! Board and column commands.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use colored::Colorize;
use kaizen_core::board::Column;
use kaizen_core::column::ColumnType;
use std::path::Path;

use crate::output;
use crate::session::Session;

#[derive(Subcommand)]
pub enum BoardCommands {
    /// Create the default task, problem and idea boards of a department
    Init {
        /// Department ID
        department: String,
    },

    /// List all boards
    List,

    /// Display a board
    Show {
        /// Board ID (e.g. dept1-tasks)
        board_id: String,
    },

    /// Append a column to a board
    AddColumn(AddColumnArgs),

    /// Delete a column and discard its cards
    DeleteColumn {
        board_id: String,
        column_id: String,
    },

    /// Reorder columns; every existing column must be listed once
    Reorder {
        board_id: String,
        #[arg(required = true)]
        column_ids: Vec<String>,
    },
}

#[derive(Args)]
pub struct AddColumnArgs {
    pub board_id: String,

    pub column_id: String,

    /// Column title
    pub title: String,

    /// Explicit column type (to-do, in-progress, done, new, analysis,
    /// corrective-actions, resolved, idea, approved, implementation, completed).
    /// Derived from id and title when omitted.
    #[arg(long)]
    pub kind: Option<String>,
}

pub fn execute(cmd: BoardCommands, project_dir: &Path, state: Option<&Path>) -> Result<()> {
    let mut session = Session::open(project_dir, state)?;

    match cmd {
        BoardCommands::Init { department } => {
            let locale = session.settings.locale.clone();
            let created = session.ws.boards.ensure_department_boards(&department, &locale);
            session.save()?;
            if created.is_empty() {
                println!("{} Boards for {} already exist", "→".blue().bold(), department.cyan());
            } else {
                for id in created {
                    println!("{} Created board {}", "✓".green().bold(), id.cyan());
                }
            }
        }

        BoardCommands::List => {
            output::print_boards_table(session.ws.boards.boards());
        }

        BoardCommands::Show { board_id } => {
            let board = session
                .ws
                .boards
                .get_board(&board_id)
                .with_context(|| format!("Board not found: {}", board_id))?;
            output::print_board(board);
        }

        BoardCommands::AddColumn(args) => {
            let column = match args.kind.as_deref() {
                Some(kind) => {
                    let kind = ColumnType::from_slug(kind)
                        .with_context(|| format!("Unknown column type '{}'", kind))?;
                    Column::new(&args.column_id, &args.title, kind)
                }
                None => Column::untagged(&args.column_id, &args.title),
            };
            let kind = column.column_type();
            session.ws.boards.add_column(&args.board_id, column)?;
            session.save()?;
            println!(
                "{} Added column {} ({})",
                "✓".green().bold(),
                args.column_id.cyan(),
                kind.as_str().dimmed()
            );
        }

        BoardCommands::DeleteColumn { board_id, column_id } => {
            let removed = session.ws.boards.delete_column(&board_id, &column_id)?;
            session.save()?;
            println!(
                "{} Deleted column {} ({} card(s) discarded)",
                "✓".green().bold(),
                column_id.cyan(),
                removed.cards.len()
            );
        }

        BoardCommands::Reorder { board_id, column_ids } => {
            session.ws.boards.update_column_order(&board_id, &column_ids)?;
            session.save()?;
            println!("{} Reordered columns of {}", "✓".green().bold(), board_id.cyan());
        }
    }

    Ok(())
}
