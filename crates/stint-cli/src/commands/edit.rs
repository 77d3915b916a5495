//! Implementation of the `stint edit` command.

use std::io::Write;

use anyhow::Result;
use chrono::{Duration, TimeZone};

use stint_core::EntryAction;
use stint_core::ops::{Edge, nudge_boundary};
use stint_store::Store;

use super::util::{entry_with_neighbors, fmt_clock, resolve_entry_id};

/// Shifts one boundary of an entry by a signed number of minutes.
///
/// The shift is clamped so the entry stays positive, stays inside its local
/// day, and does not run into a neighbor.
pub async fn run<Tz: TimeZone>(
    out: &mut impl Write,
    store: &Store,
    tz: &Tz,
    id: &str,
    move_start: bool,
    minutes: i64,
) -> Result<()> {
    let state = store.state();
    let id = resolve_entry_id(&state.time_entries, id)?;
    // resolve_entry_id guarantees the entry exists.
    let (entry, prev, next) = entry_with_neighbors(&state.time_entries, id)
        .ok_or_else(|| anyhow::anyhow!("no entry with id {id}"))?;

    let edge = if move_start { Edge::Start } else { Edge::End };
    let action = nudge_boundary(tz, entry, edge, Duration::minutes(minutes), prev, next);
    let EntryAction::Update { entry: updated } = &action else {
        unreachable!("nudge_boundary always updates");
    };
    writeln!(
        out,
        "Entry is now {} - {}",
        fmt_clock(tz, updated.start_time),
        fmt_clock(tz, updated.end_time)
    )?;

    store.reduce_entries(&[action]).await;
    Ok(())
}
