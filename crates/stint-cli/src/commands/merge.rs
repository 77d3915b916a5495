//! Implementation of the `stint merge` command.

use std::io::Write;

use anyhow::{Result, bail};
use chrono::TimeZone;

use stint_core::ops::merge_gap;
use stint_store::Store;

use super::util::{fmt_clock, resolve_entry_id};

/// Merges two entries, swallowing the pause between them.
pub async fn run<Tz: TimeZone>(
    out: &mut impl Write,
    store: &Store,
    tz: &Tz,
    first: &str,
    second: &str,
) -> Result<()> {
    let state = store.state();
    let first = resolve_entry_id(&state.time_entries, first)?;
    let second = resolve_entry_id(&state.time_entries, second)?;
    if first == second {
        bail!("cannot merge an entry with itself");
    }
    let find = |id| state.time_entries.iter().find(|e| e.id == id);
    let (Some(a), Some(b)) = (find(first), find(second)) else {
        bail!("entry disappeared while merging");
    };

    let lo = a.start_time.min(b.start_time);
    let hi = a.end_time.max(b.end_time);
    let state = store.reduce_entries(&merge_gap(a, b)).await;

    // Normalization may restructure the merged span (split it at midnight,
    // or absorb a neighbor), so report the covered range rather than
    // looking the result up by identifier.
    let covered: Vec<_> = state
        .time_entries
        .iter()
        .filter(|e| e.start_time < hi && e.end_time > lo)
        .collect();
    let (Some(head), Some(tail)) = (covered.first(), covered.last()) else {
        bail!("merged entry not found");
    };
    writeln!(
        out,
        "Merged into {} - {}",
        fmt_clock(tz, head.start_time),
        fmt_clock(tz, tail.end_time)
    )?;
    Ok(())
}
