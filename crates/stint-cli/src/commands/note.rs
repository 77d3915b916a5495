//! Implementation of the `stint note` command.

use std::io::Write;

use anyhow::Result;
use chrono::{DateTime, TimeZone, Utc};

use stint_core::NoteAction;
use stint_store::Store;

use super::util::{fmt_clock, parse_instant};

/// Appends a timestamped note.
pub async fn run<Tz: TimeZone>(
    out: &mut impl Write,
    store: &Store,
    tz: &Tz,
    now: DateTime<Utc>,
    text: &str,
    time: Option<&str>,
) -> Result<()> {
    let time = match time {
        Some(input) => parse_instant(input, tz, now)?,
        None => now,
    };
    store
        .reduce_notes(&[NoteAction::Create {
            time,
            text: text.to_owned(),
        }])
        .await;
    writeln!(out, "Noted at {}", fmt_clock(tz, time))?;
    Ok(())
}
