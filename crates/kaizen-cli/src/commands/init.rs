//! Project initialization command.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::Path;

use crate::config::write_default_settings;
use crate::session::Session;

#[derive(Args)]
pub struct InitArgs {
    /// Departments whose default boards should be created
    #[arg(short, long = "department")]
    pub departments: Vec<String>,

    /// Language of default column titles (en, es)
    #[arg(long, default_value = "en")]
    pub locale: String,
}

pub fn execute(args: InitArgs, project_dir: &Path, state: Option<&Path>) -> Result<()> {
    if !matches!(args.locale.as_str(), "en" | "es") {
        anyhow::bail!("Unsupported locale '{}' (expected 'en' or 'es')", args.locale);
    }

    if write_default_settings(project_dir, &args.locale)? {
        println!("{} Wrote .kaizen/config.toml", "✓".green().bold());
    } else {
        println!("{} Config already present, keeping it", "→".blue().bold());
    }

    let mut session = Session::open(project_dir, state)?;
    let locale = session.settings.locale.clone();
    for department in &args.departments {
        let created = session.ws.boards.ensure_department_boards(department, &locale);
        if created.is_empty() {
            println!("  {} boards already exist", department.cyan());
        } else {
            println!("  {} created {}", department.cyan(), created.join(", ").dimmed());
        }
    }
    session.save()?;

    println!();
    println!("{}", "Next steps:".bold());
    println!("  kaizen board init <department>        # Create department boards");
    println!("  kaizen card add <board> <column> <title>");
    println!("  kaizen project new <name>");

    Ok(())
}
