//! Implementation of the `stint status` command.

use std::io::Write;

use anyhow::Result;
use chrono::{DateTime, TimeZone, Utc};

use stint_core::State;
use stint_core::day::local_day;
use stint_core::export::{entries_by_day, format_duration_hhmm, total_duration_ms};

use super::util::fmt_clock;

/// Prints the timer state and today's total.
pub fn run<Tz: TimeZone>(
    out: &mut impl Write,
    state: &State,
    tz: &Tz,
    now: DateTime<Utc>,
) -> Result<()> {
    let today = local_day(tz, now);
    let mut today_ms = entries_by_day(tz, &state.time_entries)
        .get(&today)
        .map_or(0, |group| total_duration_ms(group));

    if let Some(start) = state.active_start_time {
        let elapsed_ms = (now - start).num_milliseconds().max(0);
        today_ms += elapsed_ms;
        writeln!(
            out,
            "Tracking since {} ({})",
            fmt_clock(tz, start),
            format_duration_hhmm(elapsed_ms)
        )?;
    } else {
        writeln!(out, "Timer stopped.")?;
    }
    writeln!(out, "Today: {}", format_duration_hhmm(today_ms))?;
    Ok(())
}
