//! The interval normalizer.
//!
//! Takes an arbitrary set of time entries, possibly overlapping, inverted,
//! or spanning several days, and reduces it to the canonical form used for
//! display, storage, and export:
//!
//! - strictly positive durations (everything else is discarded),
//! - no entry crossing local midnight (crossing entries are split at each
//!   boundary; an entry ending exactly on midnight belongs to the day that
//!   is ending and stays whole),
//! - ascending by start time,
//! - no two same-day entries within [`MERGE_THRESHOLD_MS`] of each other
//!   (they are merged; midnight is a hard boundary the merge never crosses).
//!
//! The pass never fails: invalid input is normalized away, not rejected.

use chrono::{Local, TimeZone};

use crate::day::{end_day, local_day, next_midnight};
use crate::entry::{EntryId, MERGE_THRESHOLD_MS, TimeEntry};

/// Normalizes entries in the process-local time zone.
#[must_use]
pub fn normalize(entries: Vec<TimeEntry>) -> Vec<TimeEntry> {
    normalize_with(entries, &Local, &mut EntryId::new)
}

/// Normalizes entries in an explicit time zone with an injected identifier
/// source.
///
/// Entries the pass leaves untouched keep their identifier; every entry
/// synthesized by a split or a merge gets a fresh one. Downstream views
/// rely on this to tell structural change apart from in-place edits, so it
/// is a contract, not an implementation detail.
pub fn normalize_with<Tz, F>(entries: Vec<TimeEntry>, tz: &Tz, new_id: &mut F) -> Vec<TimeEntry>
where
    Tz: TimeZone,
    F: FnMut() -> EntryId,
{
    let mut split: Vec<TimeEntry> = Vec::with_capacity(entries.len());
    for entry in entries {
        // Zero and negative durations are corrupt edits; drop them before
        // they can poison the rest of the pipeline.
        if entry.start_time >= entry.end_time {
            tracing::debug!(id = %entry.id, "discarding entry with non-positive duration");
            continue;
        }
        split_at_midnights(entry, tz, new_id, &mut split);
    }

    split.sort_by_key(|entry| entry.start_time);

    let mut out: Vec<TimeEntry> = Vec::with_capacity(split.len());
    let mut iter = split.into_iter();
    let Some(mut current) = iter.next() else {
        return out;
    };
    for entry in iter {
        let gap_ms = (entry.start_time - current.end_time).num_milliseconds();
        // The gap may be negative (overlap); that merges too. The same-day
        // guard keeps midnight a hard boundary even for tiny gaps.
        if gap_ms <= MERGE_THRESHOLD_MS
            && local_day(tz, current.start_time) == local_day(tz, entry.start_time)
        {
            current = TimeEntry {
                id: new_id(),
                // Min/max over all four bounds: robust to one entry fully
                // containing the other.
                start_time: current.start_time.min(entry.start_time),
                end_time: current.end_time.max(entry.end_time),
            };
        } else {
            out.push(current);
            current = entry;
        }
    }
    out.push(current);
    out
}

/// Cuts an entry at each local midnight it crosses, pushing the pieces onto
/// `out`. Non-crossing entries pass through with their identifier intact.
fn split_at_midnights<Tz, F>(entry: TimeEntry, tz: &Tz, new_id: &mut F, out: &mut Vec<TimeEntry>)
where
    Tz: TimeZone,
    F: FnMut() -> EntryId,
{
    if local_day(tz, entry.start_time) == end_day(tz, entry.end_time) {
        out.push(entry);
        return;
    }

    let mut start = entry.start_time;
    let end = entry.end_time;
    while local_day(tz, start) != end_day(tz, end) {
        let cut = next_midnight(tz, start);
        out.push(TimeEntry {
            id: new_id(),
            start_time: start,
            end_time: cut,
        });
        start = cut;
    }
    out.push(TimeEntry {
        id: new_id(),
        start_time: start,
        end_time: end,
    });
}
