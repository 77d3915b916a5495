//! Implementation of the `stint pause` command.

use std::io::Write;

use anyhow::{Result, bail};
use chrono::TimeZone;

use stint_core::ops::insert_pause;
use stint_store::Store;

use super::util::{fmt_clock, resolve_entry_id};

/// Splits an entry in two around a centered pause.
pub async fn run<Tz: TimeZone>(
    out: &mut impl Write,
    store: &Store,
    tz: &Tz,
    id: &str,
) -> Result<()> {
    let state = store.state();
    let id = resolve_entry_id(&state.time_entries, id)?;
    let entry = state
        .time_entries
        .iter()
        .find(|e| e.id == id)
        .ok_or_else(|| anyhow::anyhow!("no entry with id {id}"))?;

    let Some(actions) = insert_pause(entry) else {
        bail!("entry is too short to split");
    };
    let state = store.reduce_entries(&actions).await;

    // The two pieces keep the original outer boundaries.
    let pieces: Vec<_> = state
        .time_entries
        .iter()
        .filter(|e| e.start_time >= entry.start_time && e.end_time <= entry.end_time)
        .collect();
    if let [first, second] = pieces.as_slice() {
        writeln!(
            out,
            "Split into {} - {} and {} - {}",
            fmt_clock(tz, first.start_time),
            fmt_clock(tz, first.end_time),
            fmt_clock(tz, second.start_time),
            fmt_clock(tz, second.end_time)
        )?;
    } else {
        writeln!(out, "Split entry around a pause")?;
    }
    Ok(())
}
