//! Read-only grouping and formatting helpers for display and export.
//!
//! Everything here is a stateless transformation downstream of the
//! normalizer; it assumes canonical input (no entry crosses midnight, so an
//! entry's day is the local day of its start).

use std::collections::BTreeMap;

use chrono::{NaiveDate, TimeZone};

use crate::day::local_day;
use crate::entry::{Note, TimeEntry};

/// Groups entries by the local calendar day they start on, keyed in
/// ascending day order.
pub fn entries_by_day<Tz: TimeZone>(
    tz: &Tz,
    entries: &[TimeEntry],
) -> BTreeMap<NaiveDate, Vec<TimeEntry>> {
    let mut days: BTreeMap<NaiveDate, Vec<TimeEntry>> = BTreeMap::new();
    for entry in entries {
        days.entry(local_day(tz, entry.start_time))
            .or_default()
            .push(entry.clone());
    }
    for group in days.values_mut() {
        group.sort_by_key(|entry| entry.start_time);
    }
    days
}

/// Groups notes by the local calendar day of their timestamp.
pub fn notes_by_day<Tz: TimeZone>(tz: &Tz, notes: &[Note]) -> BTreeMap<NaiveDate, Vec<Note>> {
    let mut days: BTreeMap<NaiveDate, Vec<Note>> = BTreeMap::new();
    for note in notes {
        days.entry(local_day(tz, note.time))
            .or_default()
            .push(note.clone());
    }
    for group in days.values_mut() {
        group.sort_by_key(|note| note.time);
    }
    days
}

/// Total duration of a set of entries in milliseconds.
pub fn total_duration_ms(entries: &[TimeEntry]) -> i64 {
    entries.iter().map(TimeEntry::duration_ms).sum()
}

/// Formats a millisecond duration as zero-padded `HH:MM`.
///
/// Negative durations clamp to `00:00`; seconds truncate.
#[must_use]
pub fn format_duration_hhmm(ms: i64) -> String {
    let minutes = ms.max(0) / 60_000;
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}
