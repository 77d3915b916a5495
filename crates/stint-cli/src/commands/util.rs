//! Shared helpers for command implementations.

use anyhow::{Context, Result, bail};
use chrono::{DateTime, NaiveTime, TimeZone, Utc};

use stint_core::day::local_day;
use stint_core::{EntryId, TimeEntry};

/// Parses a user-supplied instant: `HH:MM` on today's local date, or a full
/// RFC 3339 timestamp.
pub fn parse_instant<Tz: TimeZone>(
    input: &str,
    tz: &Tz,
    now: DateTime<Utc>,
) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Utc));
    }
    let time = NaiveTime::parse_from_str(input, "%H:%M")
        .with_context(|| format!("invalid time {input:?}, expected HH:MM or RFC 3339"))?;
    let naive = local_day(tz, now).and_time(time);
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .with_context(|| format!("time {input:?} does not exist in the local time zone today"))
}

/// Renders an instant as a local wall-clock `HH:MM`.
pub fn fmt_clock<Tz: TimeZone>(tz: &Tz, instant: DateTime<Utc>) -> String {
    instant.with_timezone(tz).time().format("%H:%M").to_string()
}

/// First eight characters of an entry ID, for listings.
pub fn short_id(id: EntryId) -> String {
    let full = id.to_string();
    full[..8].to_string()
}

/// Resolves an entry ID from a full UUID or a unique prefix.
pub fn resolve_entry_id(entries: &[TimeEntry], input: &str) -> Result<EntryId> {
    if let Ok(id) = input.parse::<EntryId>() {
        if entries.iter().any(|e| e.id == id) {
            return Ok(id);
        }
        bail!("no entry with id {id}");
    }
    let matches: Vec<EntryId> = entries
        .iter()
        .map(|e| e.id)
        .filter(|id| id.to_string().starts_with(input))
        .collect();
    match matches.as_slice() {
        [id] => Ok(*id),
        [] => bail!("no entry matches id prefix {input:?}"),
        _ => bail!(
            "id prefix {input:?} is ambiguous ({} matches)",
            matches.len()
        ),
    }
}

/// The entry with the given ID plus its neighbors in the (sorted,
/// normalized) collection.
pub fn entry_with_neighbors(
    entries: &[TimeEntry],
    id: EntryId,
) -> Option<(&TimeEntry, Option<&TimeEntry>, Option<&TimeEntry>)> {
    let pos = entries.iter().position(|e| e.id == id)?;
    let prev = pos.checked_sub(1).and_then(|i| entries.get(i));
    Some((&entries[pos], prev, entries.get(pos + 1)))
}
