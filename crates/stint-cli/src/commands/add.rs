//! Implementation of the `stint add` command.

use std::io::Write;

use anyhow::{Result, bail};
use chrono::{DateTime, TimeZone, Utc};

use stint_core::EntryAction;
use stint_core::export::format_duration_hhmm;
use stint_store::Store;

use super::util::{fmt_clock, parse_instant};

/// Records an entry with an explicit start and end.
pub async fn run<Tz: TimeZone>(
    out: &mut impl Write,
    store: &Store,
    tz: &Tz,
    now: DateTime<Utc>,
    start: &str,
    end: &str,
) -> Result<()> {
    let start = parse_instant(start, tz, now)?;
    let end = parse_instant(end, tz, now)?;
    if start >= end {
        bail!("start must be before end");
    }

    store
        .reduce_entries(&[EntryAction::Create {
            start_time: start,
            end_time: end,
        }])
        .await;

    writeln!(
        out,
        "Added {} - {} ({})",
        fmt_clock(tz, start),
        fmt_clock(tz, end),
        format_duration_hhmm((end - start).num_milliseconds())
    )?;
    Ok(())
}
