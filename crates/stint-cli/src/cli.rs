//! Command-line argument definitions.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};

/// Personal interval time tracker.
///
/// Toggle a timer to record tracked time as discrete entries; review, edit,
/// and export the normalized history.
#[derive(Debug, Parser)]
#[command(name = "stint", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the timer state and today's total.
    Status,

    /// Start or stop the timer.
    Toggle,

    /// List recorded entries grouped by day.
    History {
        /// Only show this day.
        #[arg(long, value_name = "YYYY-MM-DD")]
        day: Option<NaiveDate>,

        /// Output JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Record an entry directly.
    Add {
        /// Start time (HH:MM today, or RFC 3339).
        #[arg(long)]
        start: String,

        /// End time (HH:MM today, or RFC 3339).
        #[arg(long)]
        end: String,
    },

    /// Shift one boundary of an entry by a number of minutes.
    Edit {
        /// Entry ID (a unique prefix is enough).
        id: String,

        /// Move the start boundary instead of the end.
        #[arg(long)]
        start: bool,

        /// Signed shift in minutes.
        #[arg(long, allow_negative_numbers = true)]
        minutes: i64,
    },

    /// Delete an entry.
    Delete {
        /// Entry ID (a unique prefix is enough).
        id: String,
    },

    /// Insert a pause inside an entry, splitting it in two.
    Pause {
        /// Entry ID (a unique prefix is enough).
        id: String,
    },

    /// Remove the pause between two entries, merging them.
    Merge {
        /// First entry ID (a unique prefix is enough).
        first: String,

        /// Second entry ID (a unique prefix is enough).
        second: String,
    },

    /// Append a note.
    Note {
        /// The note text.
        text: String,

        /// Note time (HH:MM today, or RFC 3339; defaults to now).
        #[arg(long)]
        time: Option<String>,
    },

    /// Export the history as CSV.
    Export {
        /// Export shape.
        #[arg(long, value_enum, default_value = "all-entries")]
        format: ExportFormat,

        /// Write to a file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Delete all time entries.
    Wipe {
        /// Confirm the deletion.
        #[arg(long)]
        yes: bool,
    },

    /// Print the snapshot file location.
    DataPath,
}

/// CSV export shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// One row per day with the total and that day's notes.
    ByDay,
    /// One row per entry.
    AllEntries,
}
