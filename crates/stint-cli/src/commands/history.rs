//! Implementation of the `stint history` command.

use std::io::Write;

use anyhow::Result;
use chrono::{NaiveDate, TimeZone};
use serde::Serialize;

use stint_core::export::{entries_by_day, format_duration_hhmm, notes_by_day, total_duration_ms};
use stint_core::{Note, State, TimeEntry};

use super::util::{fmt_clock, short_id};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DayRecord {
    date: NaiveDate,
    total_ms: i64,
    entries: Vec<TimeEntry>,
    notes: Vec<Note>,
}

/// Lists entries and notes grouped by local day, oldest first.
pub fn run<Tz: TimeZone>(
    out: &mut impl Write,
    state: &State,
    tz: &Tz,
    day: Option<NaiveDate>,
    json: bool,
) -> Result<()> {
    let mut entries = entries_by_day(tz, &state.time_entries);
    let mut notes = notes_by_day(tz, &state.notes);
    if let Some(day) = day {
        entries.retain(|d, _| *d == day);
        notes.retain(|d, _| *d == day);
    }

    let mut days: Vec<NaiveDate> = entries.keys().chain(notes.keys()).copied().collect();
    days.sort_unstable();
    days.dedup();

    if json {
        let records: Vec<DayRecord> = days
            .iter()
            .map(|date| {
                let entries = entries.get(date).cloned().unwrap_or_default();
                DayRecord {
                    date: *date,
                    total_ms: total_duration_ms(&entries),
                    entries,
                    notes: notes.get(date).cloned().unwrap_or_default(),
                }
            })
            .collect();
        serde_json::to_writer_pretty(&mut *out, &records)?;
        writeln!(out)?;
        return Ok(());
    }

    if days.is_empty() {
        writeln!(out, "No entries.")?;
        return Ok(());
    }

    for (i, date) in days.iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        let group = entries.get(date).map_or(&[][..], Vec::as_slice);
        writeln!(
            out,
            "{date}  ({})",
            format_duration_hhmm(total_duration_ms(group))
        )?;
        for entry in group {
            writeln!(
                out,
                "  {}  {} - {}  {}",
                short_id(entry.id),
                fmt_clock(tz, entry.start_time),
                fmt_clock(tz, entry.end_time),
                format_duration_hhmm(entry.duration_ms())
            )?;
        }
        for note in notes.get(date).map_or(&[][..], Vec::as_slice) {
            writeln!(out, "  {}  note: {}", fmt_clock(tz, note.time), note.text)?;
        }
    }
    Ok(())
}
