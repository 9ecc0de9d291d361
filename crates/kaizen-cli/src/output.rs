//! Terminal output formatting.

use colored::{ColoredString, Colorize};
use kaizen_core::board::{Board, Card, Column, Priority};
use kaizen_core::column::ColumnType;
use kaizen_core::meeting::{Meeting, OutcomeCard, Outcomes};
use kaizen_core::project::{Project, ProjectStatus};
use kaizen_core::sync::ReconcileReport;
use kaizen_core::SyncOutcome;
use unicode_width::UnicodeWidthStr;

/// Print boards as a table.
pub fn print_boards_table(boards: &[Board]) {
    if boards.is_empty() {
        println!("{}", "No boards found. Create them with 'kaizen board init <department>'.".dimmed());
        return;
    }

    println!("{:<28} {:<16} {:<10} {:>8} {:>6}", "ID", "Department", "Category", "Columns", "Cards");
    println!("{}", "─".repeat(72));

    for board in boards {
        println!(
            "{:<28} {:<16} {:<10} {:>8} {:>6}",
            truncate_visual(&board.id, 28),
            truncate_visual(&board.department_id, 16),
            board.category.as_str(),
            board.columns.len(),
            board.card_count()
        );
    }
}

/// Get terminal width, defaulting to 80.
fn term_width() -> usize {
    terminal_size::terminal_size()
        .map(|(w, _)| w.0 as usize)
        .unwrap_or(80)
}

/// Pad a plain string to a given visual width (right-padded).
fn pad_right(s: &str, width: usize) -> String {
    let visual = UnicodeWidthStr::width(s);
    if visual >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - visual))
    }
}

/// Truncate a string respecting visual width.
fn truncate_visual(s: &str, max_width: usize) -> String {
    if UnicodeWidthStr::width(s) <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }
    let mut result = String::new();
    let mut current_width = 0;
    for ch in s.chars() {
        let ch_width = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if current_width + ch_width > max_width - 2 {
            break;
        }
        result.push(ch);
        current_width += ch_width;
    }
    result.push_str("..");
    result
}

fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

/// Color a label by the workflow stage of its column.
fn stage_colored(label: &str, kind: ColumnType) -> ColoredString {
    match kind {
        ColumnType::ToDo | ColumnType::New | ColumnType::Idea => label.blue().bold(),
        ColumnType::Analysis | ColumnType::Approved => label.magenta().bold(),
        ColumnType::InProgress | ColumnType::CorrectiveActions | ColumnType::Implementation => {
            label.yellow().bold()
        }
        ColumnType::Done | ColumnType::Resolved | ColumnType::Completed => label.green().bold(),
        ColumnType::Unclassified => label.normal(),
    }
}

fn status_colored(status: ProjectStatus) -> ColoredString {
    match status {
        ProjectStatus::NotStarted => status.as_str().dimmed(),
        ProjectStatus::Planning => status.as_str().magenta(),
        ProjectStatus::InProgress => status.as_str().yellow(),
        ProjectStatus::OnHold => status.as_str().red(),
        ProjectStatus::Completed => status.as_str().green(),
    }
}

fn priority_indicator(priority: Option<Priority>) -> &'static str {
    match priority {
        Some(Priority::High) => "! ",
        Some(Priority::Medium) => "· ",
        _ => "  ",
    }
}

/// Plain column header, for width calculation.
fn column_header_plain(column: &Column, max_width: usize) -> String {
    let suffix = if column.cards.is_empty() {
        String::new()
    } else {
        format!(" {}", column.cards.len())
    };
    let full = format!("{}{}", column.title.to_uppercase(), suffix);
    truncate_visual(&full, max_width)
}

/// Print a department board.
pub fn print_board(board: &Board) {
    println!(
        "{} {}",
        board.id.cyan().bold(),
        format!("({} · {})", board.department_id, board.category).dimmed()
    );

    if board.columns.is_empty() {
        println!("{}", "Board has no columns.".dimmed());
        return;
    }

    let width = term_width();
    if width < 60 {
        print_board_compact(board);
    } else {
        print_board_wide(board, width);
    }
}

fn print_rule(left: &str, mid: &str, right: &str, num_cols: usize, col_width: usize) {
    print!("{}", left.dimmed());
    for i in 0..num_cols {
        print!("{}", "─".repeat(col_width).dimmed());
        if i < num_cols - 1 {
            print!("{}", mid.dimmed());
        }
    }
    println!("{}", right.dimmed());
}

/// Columns side by side.
fn print_board_wide(board: &Board, term_w: usize) {
    let num_cols = board.columns.len();
    let available = if term_w > num_cols + 1 { term_w - num_cols - 1 } else { num_cols * 10 };
    let col_width = (available / num_cols).clamp(12, 35);

    print_rule("┌", "┬", "┐", num_cols, col_width);

    print!("{}", "│".dimmed());
    for (i, column) in board.columns.iter().enumerate() {
        let plain = column_header_plain(column, col_width);
        let padding = col_width.saturating_sub(UnicodeWidthStr::width(plain.as_str()));
        let left_pad = padding / 2;
        print!(
            "{}{}{}",
            " ".repeat(left_pad),
            stage_colored(&plain, column.column_type()),
            " ".repeat(padding - left_pad)
        );
        if i < num_cols - 1 {
            print!("{}", "│".dimmed());
        }
    }
    println!("{}", "│".dimmed());

    print_rule("├", "┼", "┤", num_cols, col_width);

    let max_cards = board.columns.iter().map(|c| c.cards.len()).max().unwrap_or(0);
    let title_width = col_width.saturating_sub(3).max(1);

    for row in 0..max_cards {
        print!("{}", "│".dimmed());
        for (ci, column) in board.columns.iter().enumerate() {
            match column.cards.get(row) {
                Some(card) => {
                    let title = pad_right(&truncate_visual(&card.title, title_width), title_width);
                    if column.is_completion() {
                        print!("{} {}", "✓ ".green(), title.green().dimmed());
                    } else {
                        print!("{} {}", priority_indicator(card.priority), title);
                    }
                }
                None => print!("{}", " ".repeat(col_width)),
            }
            if ci < num_cols - 1 {
                print!("{}", "│".dimmed());
            }
        }
        println!("{}", "│".dimmed());
    }

    print_rule("└", "┴", "┘", num_cols, col_width);

    let total = board.card_count();
    let done: usize = board
        .columns
        .iter()
        .filter(|c| c.is_completion())
        .map(|c| c.cards.len())
        .sum();
    if total > 0 {
        println!(
            " {} {} cards {} {} done ({}%)",
            "■".cyan(),
            total.to_string().bold(),
            "·".dimmed(),
            done.to_string().green(),
            (done * 100) / total
        );
    }
}

/// Vertical layout for narrow terminals.
fn print_board_compact(board: &Board) {
    println!();
    for column in &board.columns {
        let header = column_header_plain(column, 30);
        println!(" {} {}", "▸".dimmed(), stage_colored(&header, column.column_type()));
        for card in &column.cards {
            println!(
                "   {} {} {}",
                priority_indicator(card.priority),
                card.title,
                short_id(&card.id).dimmed()
            );
        }
        println!();
    }
}

/// Print a single card with its canonical location.
pub fn print_card(card: &Card, board_id: &str, column_id: &str) {
    println!("{} {}", card.title.cyan().bold(), format!("({})", card.id).dimmed());
    println!("{}: {} / {}", "Location".bold(), board_id, column_id);
    if let Some(category) = card.category {
        println!("{}: {}", "Category".bold(), category.as_str());
    }
    if let Some(dept) = &card.department_id {
        println!("{}: {}", "Department".bold(), dept);
    }
    if let Some(priority) = card.priority {
        println!("{}: {}", "Priority".bold(), priority.as_str());
    }
    if let Some(assignee) = &card.assignee {
        println!("{}: {}", "Assignee".bold(), assignee);
    }
    if let Some(due) = &card.due_date {
        println!("{}: {}", "Due".bold(), due);
    }
    if let Some(desc) = &card.description {
        println!();
        println!("{}", desc);
    }
}

/// Print projects as a table.
pub fn print_projects_table(projects: &[Project]) {
    if projects.is_empty() {
        println!("{}", "No projects found.".dimmed());
        return;
    }

    println!("{:<10} {:<30} {:<12} {:>8} {:>6}", "ID", "Name", "Status", "Progress", "Cards");
    println!("{}", "─".repeat(70));

    for project in projects {
        println!(
            "{:<10} {:<30} {:<12} {:>7}% {:>6}",
            short_id(&project.id),
            pad_right(&truncate_visual(&project.name, 28), 30),
            status_colored(project.status),
            project.progress,
            project.tasks.len()
        );
    }

    println!();
    println!("{} project(s) total", projects.len());
}

fn progress_bar(progress: u8, width: usize) -> String {
    let filled = (progress as usize * width) / 100;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Print a project with its linked cards and milestones.
///
/// `locate` resolves a card id to its current (board, column, title).
pub fn print_project<F>(project: &Project, locate: F)
where
    F: Fn(&str) -> Option<(String, String, String)>,
{
    println!("{} {}", project.name.cyan().bold(), format!("({})", project.id).dimmed());
    if let Some(desc) = &project.description {
        println!("{}", desc);
    }
    println!();
    println!("{}: {}", "Status".bold(), status_colored(project.status));
    println!(
        "{}: {} {}%",
        "Progress".bold(),
        progress_bar(project.progress, 20).green(),
        project.progress
    );

    if !project.tasks.is_empty() {
        println!();
        println!("{}", "Cards".bold());
        for task in &project.tasks {
            match locate(&task.card_id) {
                Some((board_id, column_id, title)) => println!(
                    "  {} {} {}",
                    "•".cyan(),
                    title,
                    format!("{} / {}", board_id, column_id).dimmed()
                ),
                None => println!(
                    "  {} {} {}",
                    "✗".red(),
                    short_id(&task.card_id),
                    "missing from every board".red().dimmed()
                ),
            }
        }
    }

    if !project.milestones.is_empty() {
        println!();
        println!("{}", "Milestones".bold());
        for milestone in &project.milestones {
            let mark = if milestone.completed { "✓".green() } else { "○".dimmed() };
            let due = milestone.due_date.as_deref().unwrap_or("-");
            println!(
                "  {} {} {} {}",
                mark,
                milestone.title,
                due.dimmed(),
                short_id(&milestone.id).dimmed()
            );
        }
    }
}

/// Print meetings as a table.
pub fn print_meetings_table(meetings: &[Meeting]) {
    if meetings.is_empty() {
        println!("{}", "No meetings found.".dimmed());
        return;
    }

    println!("{:<10} {:<30} {:<12} {:>8}", "ID", "Title", "Date", "Outcomes");
    println!("{}", "─".repeat(64));
    for meeting in meetings {
        println!(
            "{:<10} {:<30} {:<12} {:>8}",
            short_id(&meeting.id),
            pad_right(&truncate_visual(&meeting.title, 28), 30),
            meeting.date.as_deref().unwrap_or("-"),
            meeting.all_outcomes().count()
        );
    }
}

fn print_outcome(outcome: &OutcomeCard, indent: &str) {
    let location = match (&outcome.board_id, &outcome.column_id) {
        (Some(board), Some(column)) => format!("{} / {}", board, column),
        _ => "unplaced".to_string(),
    };
    println!(
        "{}{} {} {}",
        indent,
        "•".cyan(),
        outcome.card.title,
        location.dimmed()
    );
}

fn print_outcomes(outcomes: &Outcomes, indent: &str) {
    for outcome in outcomes.iter() {
        print_outcome(outcome, indent);
    }
}

/// Print a meeting with its agenda and recorded outcomes.
pub fn print_meeting(meeting: &Meeting) {
    println!("{} {}", meeting.title.cyan().bold(), format!("({})", meeting.id).dimmed());
    if let Some(date) = &meeting.date {
        println!("{}: {}", "Date".bold(), date);
    }

    if !meeting.agenda.is_empty() {
        println!();
        println!("{}", "Agenda".bold());
        for (i, item) in meeting.agenda.iter().enumerate() {
            println!("  {}. {} {}", i + 1, item.title, short_id(&item.id).dimmed());
            print_outcomes(&item.outcomes, "     ");
        }
    }

    if !meeting.outcomes.is_empty() {
        println!();
        println!("{}", "Outcomes".bold());
        print_outcomes(&meeting.outcomes, "  ");
    }
}

/// Print the result of a sync call.
pub fn print_sync_outcome(label: &str, outcome: &SyncOutcome) {
    if outcome.success {
        println!("{} {}: {}", "✓".green().bold(), label, outcome.message);
    } else {
        println!("{} {}: {}", "→".blue().bold(), label, outcome.message.dimmed());
    }
}

/// Print a reconciliation summary.
pub fn print_reconcile_report(report: &ReconcileReport) {
    println!("{}", "Reconciliation".bold());
    println!("  Cards synced:            {}", report.cards_synced);
    println!("  Task refs refreshed:     {}", report.task_refs_refreshed);
    println!("  Projects updated:        {}", report.projects_updated);
    println!("  Meeting copies updated:  {}", report.meeting_copies_updated);

    for card_id in &report.dangling_project_refs {
        println!("  {} project references missing card {}", "!".yellow().bold(), card_id);
    }
    for card_id in &report.dangling_meeting_refs {
        println!("  {} meeting references missing card {}", "!".yellow().bold(), card_id);
    }

    if report.is_clean() {
        println!("{} Workspace already consistent", "✓".green().bold());
    }
}
