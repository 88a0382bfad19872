use chrono::{Local, Utc};
use clap::Parser;
use colored::*;
use std::io::{self, Write};
use tracing_subscriber::EnvFilter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};
use worklog::api::{
    BackupListing, CmdMessage, EntryFilter, EntryUpdate, ListedEntry, MessageLevel, NewEntry,
    Period,
};
use worklog::duration::format_minutes;
use worklog::error::{Result, WorklogError};
use worklog::init::{initialize, WorklogContext};
use worklog::model::ParseWarning;
use worklog::paths::AppDirs;

mod args;
use args::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut ctx = initialize(&AppDirs, cli.file.clone())?;

    match cli.command {
        Some(Commands::Log {
            duration,
            description,
            project,
            tags,
        }) => handle_log(&mut ctx, duration, description, project, tags),
        Some(Commands::List {
            today,
            week,
            project,
            tag,
            deleted,
        }) => {
            let period = if today {
                Period::Today
            } else if week {
                Period::Week
            } else {
                Period::All
            };
            let filter = EntryFilter {
                period,
                project,
                tag,
                deleted,
            };
            handle_list(&ctx, &filter)
        }
        Some(Commands::Edit {
            index,
            description,
            duration,
            project,
            tags,
        }) => {
            let update = EntryUpdate {
                description,
                duration,
                project,
                tags: if tags.is_empty() { None } else { Some(tags) },
            };
            handle_edit(&mut ctx, index, update)
        }
        Some(Commands::Delete { indexes }) => handle_delete(&mut ctx, indexes),
        Some(Commands::Undo) => handle_undo(&mut ctx),
        Some(Commands::Purge { yes }) => handle_purge(&mut ctx, yes),
        Some(Commands::Backups) => handle_backups(&ctx),
        Some(Commands::Restore { slot }) => handle_restore(&mut ctx, slot),
        Some(Commands::Doctor) => handle_doctor(&ctx),
        Some(Commands::Path) => {
            println!("{}", ctx.store_path.display());
            Ok(())
        }
        None => handle_list(
            &ctx,
            &EntryFilter {
                period: Period::Today,
                ..Default::default()
            },
        ),
    }
}

/// Logs go to stderr. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "error" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn handle_log(
    ctx: &mut WorklogContext,
    duration: String,
    description: Vec<String>,
    project: Option<String>,
    tags: Vec<String>,
) -> Result<()> {
    let result = ctx.api.log_entry(NewEntry {
        duration,
        description: description.join(" "),
        project,
        tags,
    })?;
    print_warnings(&result.warnings);
    print_messages(&result.messages);
    Ok(())
}

fn handle_list(ctx: &WorklogContext, filter: &EntryFilter) -> Result<()> {
    let result = ctx.api.list_entries(filter)?;
    print_entries(&result.listed_entries);
    if !result.listed_entries.is_empty() {
        println!(
            "{}",
            format!(
                "{:>width$}",
                format!("Total: {}", format_minutes(result.total_minutes())),
                width = LINE_WIDTH
            )
            .bold()
        );
    }
    print_warnings(&result.warnings);
    print_messages(&result.messages);
    Ok(())
}

fn handle_edit(ctx: &mut WorklogContext, index: String, update: EntryUpdate) -> Result<()> {
    let result = ctx.api.edit_entry(index, update)?;
    print_warnings(&result.warnings);
    print_messages(&result.messages);
    Ok(())
}

fn handle_delete(ctx: &mut WorklogContext, indexes: Vec<String>) -> Result<()> {
    let result = ctx.api.delete_entries(indexes.as_slice())?;
    print_warnings(&result.warnings);
    print_messages(&result.messages);
    Ok(())
}

fn handle_undo(ctx: &mut WorklogContext) -> Result<()> {
    match ctx.api.undo() {
        Ok(result) => {
            print_warnings(&result.warnings);
            print_messages(&result.messages);
            Ok(())
        }
        Err(WorklogError::NothingToRestore) => {
            println!("{}", "Nothing to undo: no deleted entries.".dimmed());
            Ok(())
        }
        Err(e) => Err(e),
    }
}

fn handle_purge(ctx: &mut WorklogContext, yes: bool) -> Result<()> {
    let pending = ctx.api.pending_purge()?;
    if pending.is_empty() {
        println!("{}", "No deleted entries to purge.".dimmed());
        return Ok(());
    }

    if !yes {
        println!("This will permanently remove the following entries:");
        print_entries(&pending);
        print!("Type 'yes' to continue: ");
        io::stdout().flush().map_err(WorklogError::Io)?;

        let mut input = String::new();
        io::stdin().read_line(&mut input).map_err(WorklogError::Io)?;
        if !matches!(input.trim().to_ascii_lowercase().as_str(), "y" | "yes") {
            println!("{}", "Operation cancelled.".dimmed());
            return Ok(());
        }
    }

    let result = ctx.api.purge()?;
    print_warnings(&result.warnings);
    print_messages(&result.messages);
    Ok(())
}

fn handle_backups(ctx: &WorklogContext) -> Result<()> {
    let result = ctx.api.backups()?;
    print_backups(&result.backups);
    print_messages(&result.messages);
    Ok(())
}

fn handle_restore(ctx: &mut WorklogContext, slot: usize) -> Result<()> {
    let result = ctx.api.restore_backup(slot)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_doctor(ctx: &WorklogContext) -> Result<()> {
    let result = ctx.api.doctor()?;
    if let Some(report) = &result.health {
        println!(
            "{} lines, {} valid, {} corrupted",
            report.total_lines, report.valid_count, report.corrupted_count
        );
    }
    print_messages(&result.messages);
    Ok(())
}

fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
        }
    }
}

fn print_warnings(warnings: &[ParseWarning]) {
    if warnings.is_empty() {
        return;
    }
    eprintln!(
        "{}",
        format!(
            "Warning: skipped {} unreadable line(s):",
            warnings.len()
        )
        .yellow()
    );
    for warning in warnings {
        eprintln!("{}", format!("  {}", warning).yellow());
    }
}

const LINE_WIDTH: usize = 100;
const INDEX_WIDTH: usize = 6;
const DATE_WIDTH: usize = 18;
const DURATION_WIDTH: usize = 9;

fn print_entries(entries: &[ListedEntry]) {
    if entries.is_empty() {
        println!("No entries found.");
        return;
    }

    for le in entries {
        let entry = &le.entry;
        let idx_str = format!("{:>width$}. ", le.index.0, width = INDEX_WIDTH - 2);
        let date = format!(
            "{:<width$}",
            entry
                .timestamp
                .with_timezone(&Local)
                .format("%a %d %b %H:%M")
                .to_string(),
            width = DATE_WIDTH
        );
        let duration = format!(
            "{:>width$}  ",
            format_minutes(entry.duration_minutes),
            width = DURATION_WIDTH - 2
        );

        let mut suffix = String::new();
        if !entry.project.is_empty() {
            suffix.push_str(&format!(" [{}]", entry.project));
        }
        for tag in &entry.tags {
            suffix.push_str(&format!(" #{}", tag));
        }

        let fixed = INDEX_WIDTH + DATE_WIDTH + DURATION_WIDTH + suffix.width();
        let available = LINE_WIDTH.saturating_sub(fixed);
        let description = truncate_to_width(&entry.description.replace('\n', " "), available);

        let idx_colored = if entry.is_deleted() {
            idx_str.red()
        } else {
            idx_str.normal()
        };

        println!(
            "{}{}{}{}{}",
            idx_colored,
            date.dimmed(),
            duration.bold(),
            description,
            suffix.cyan()
        );
    }
}

fn print_backups(backups: &[BackupListing]) {
    let formatter = timeago::Formatter::new();
    let now = Utc::now();

    for backup in backups {
        let age = backup
            .slot
            .modified
            .and_then(|m| now.signed_duration_since(m).to_std().ok())
            .map(|d| formatter.convert(d))
            .unwrap_or_default();
        let age = format!("{:>16}", age);
        let label = format!("{:<12}", backup.label);
        let label = if backup.slot.is_most_recent() {
            label.green()
        } else {
            label.normal()
        };
        println!(
            "  {}. {} {}  {}",
            backup.slot.number,
            label,
            age.dimmed(),
            backup.slot.path.display().to_string().dimmed()
        );
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }
    result
}
