//! CLI command definitions and handlers.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod board;
pub mod card;
pub mod init;
pub mod meeting;
pub mod project;
pub mod sync;

/// Kaizen - department boards, projects and meeting outcomes
#[derive(Parser)]
#[command(name = "kaizen")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to project directory (defaults to current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Workspace snapshot file (overrides the config file)
    #[arg(long, global = true, env = "KAIZEN_STATE_FILE")]
    pub state: Option<PathBuf>,

    /// Also write logs to this file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a Kaizen project in the current directory
    Init(init::InitArgs),

    /// Department boards and columns
    #[command(subcommand)]
    Board(board::BoardCommands),

    /// Work item cards
    #[command(subcommand)]
    Card(card::CardCommands),

    /// Projects grouping cards
    #[command(subcommand)]
    Project(project::ProjectCommands),

    /// Meetings and their outcomes
    #[command(subcommand)]
    Meeting(meeting::MeetingCommands),

    /// Run the synchronization engine explicitly
    #[command(subcommand)]
    Sync(sync::SyncCommands),
}

impl Cli {
    pub fn execute(self) -> Result<()> {
        let project_dir = match self.project {
            Some(dir) => dir,
            None => std::env::current_dir()?,
        };
        let state = self.state.as_deref();

        match self.command {
            Commands::Init(args) => init::execute(args, &project_dir, state),
            Commands::Board(cmd) => board::execute(cmd, &project_dir, state),
            Commands::Card(cmd) => card::execute(cmd, &project_dir, state),
            Commands::Project(cmd) => project::execute(cmd, &project_dir, state),
            Commands::Meeting(cmd) => meeting::execute(cmd, &project_dir, state),
            Commands::Sync(cmd) => sync::execute(cmd, &project_dir, state),
        }
    }
}
