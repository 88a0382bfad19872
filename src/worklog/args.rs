use clap::{ArgGroup, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "wl", version)]
#[command(about = "Log what you worked on and for how long", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Use this entry file instead of the one in the data directory
    #[arg(long, global = true, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log a new entry
    #[command(alias = "l")]
    Log {
        /// Duration, e.g. 45m, 1h30m, 1.5h or 90
        duration: String,

        /// What you worked on
        #[arg(required = true, num_args = 1..)]
        description: Vec<String>,

        /// Project name
        #[arg(short, long)]
        project: Option<String>,

        /// Tag (repeatable)
        #[arg(short, long = "tag")]
        tags: Vec<String>,
    },

    /// List entries
    #[command(alias = "ls")]
    #[command(group(ArgGroup::new("period").args(["today", "week"])))]
    List {
        /// Only entries logged today
        #[arg(long)]
        today: bool,

        /// Only entries logged this week
        #[arg(long)]
        week: bool,

        /// Only entries for this project
        #[arg(short, long)]
        project: Option<String>,

        /// Only entries with this tag
        #[arg(short, long)]
        tag: Option<String>,

        /// Show deleted entries
        #[arg(long)]
        deleted: bool,
    },

    /// Change an entry
    #[command(alias = "e")]
    Edit {
        /// Entry number as shown by `list`
        index: String,

        /// New description
        #[arg(short, long)]
        description: Option<String>,

        /// New duration
        #[arg(long)]
        duration: Option<String>,

        /// New project (empty string clears it)
        #[arg(short, long)]
        project: Option<String>,

        /// Replace tags (repeatable)
        #[arg(short, long = "tag")]
        tags: Vec<String>,
    },

    /// Delete one or more entries (undo with `wl undo`)
    #[command(alias = "rm")]
    Delete {
        /// Entry numbers as shown by `list` (e.g. 1 3 5)
        #[arg(required = true, num_args = 1..)]
        indexes: Vec<String>,
    },

    /// Restore the most recently deleted entry
    Undo,

    /// Permanently remove deleted entries
    Purge {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// List backup snapshots
    Backups,

    /// Restore a backup snapshot (the current state is backed up first)
    Restore {
        /// Backup number as shown by `backups`
        slot: usize,
    },

    /// Check the entry file for unreadable lines
    Doctor,

    /// Print the path of the entry file
    Path,
}
