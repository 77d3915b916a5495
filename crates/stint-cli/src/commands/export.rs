//! Implementation of the `stint export` command.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::TimeZone;

use stint_core::State;
use stint_core::export::{entries_by_day, format_duration_hhmm, notes_by_day, total_duration_ms};

use crate::ExportFormat;

use super::util::fmt_clock;

/// Renders the history as CSV, to stdout or a file.
pub fn run<Tz: TimeZone>(
    out: &mut impl Write,
    state: &State,
    tz: &Tz,
    format: ExportFormat,
    output: Option<&Path>,
) -> Result<()> {
    let csv = match format {
        ExportFormat::ByDay => by_day_csv(tz, state),
        ExportFormat::AllEntries => all_entries_csv(tz, state),
    };
    match output {
        Some(path) => {
            std::fs::write(path, &csv)
                .with_context(|| format!("failed to write {}", path.display()))?;
            writeln!(out, "Wrote {}", path.display())?;
        }
        None => out.write_all(csv.as_bytes())?,
    }
    Ok(())
}

/// One row per day: date, total duration, that day's notes joined together.
fn by_day_csv<Tz: TimeZone>(tz: &Tz, state: &State) -> String {
    let entries = entries_by_day(tz, &state.time_entries);
    let notes = notes_by_day(tz, &state.notes);

    let mut days: Vec<_> = entries.keys().chain(notes.keys()).copied().collect();
    days.sort_unstable();
    days.dedup();

    let mut csv = String::from("date,duration,notes\n");
    for date in days {
        let total = entries.get(&date).map_or(0, |group| total_duration_ms(group));
        let joined = notes.get(&date).map_or_else(String::new, |group| {
            group
                .iter()
                .map(|note| note.text.as_str())
                .collect::<Vec<_>>()
                .join("; ")
        });
        csv.push_str(&format!(
            "{date},{},{}\n",
            format_duration_hhmm(total),
            csv_field(&joined)
        ));
    }
    csv
}

/// One row per entry: date, start and end wall-clock, duration.
fn all_entries_csv<Tz: TimeZone>(tz: &Tz, state: &State) -> String {
    let mut csv = String::from("date,start,end,duration\n");
    for (date, group) in entries_by_day(tz, &state.time_entries) {
        for entry in group {
            csv.push_str(&format!(
                "{date},{},{},{}\n",
                fmt_clock(tz, entry.start_time),
                fmt_clock(tz, entry.end_time),
                format_duration_hhmm(entry.duration_ms())
            ));
        }
    }
    csv
}

/// Quotes a CSV field when it contains a comma, quote, or newline.
fn csv_field(raw: &str) -> String {
    if raw.contains(['"', ',', '\n']) {
        format!("\"{}\"", raw.replace('"', "\"\""))
    } else {
        raw.to_owned()
    }
}
