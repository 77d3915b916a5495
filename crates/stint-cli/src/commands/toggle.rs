//! Implementation of the `stint toggle` command.

use std::io::Write;

use anyhow::Result;
use chrono::{DateTime, TimeZone, Utc};

use stint_core::export::format_duration_hhmm;
use stint_store::Store;

use super::util::fmt_clock;

/// Starts the timer, or stops it and records the elapsed span.
pub async fn run<Tz: TimeZone>(
    out: &mut impl Write,
    store: &Store,
    tz: &Tz,
    now: DateTime<Utc>,
) -> Result<()> {
    let was_active = store.state().active_start_time;
    let state = store.toggle_active(now).await;

    match (was_active, state.active_start_time) {
        (None, Some(start)) => {
            writeln!(out, "Timer started at {}", fmt_clock(tz, start))?;
        }
        (Some(start), None) => {
            let elapsed_ms = (now - start).num_milliseconds();
            writeln!(
                out,
                "Recorded {} - {} ({})",
                fmt_clock(tz, start),
                fmt_clock(tz, now),
                format_duration_hhmm(elapsed_ms)
            )?;
        }
        _ => {}
    }
    Ok(())
}
