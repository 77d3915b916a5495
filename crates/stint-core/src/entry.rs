//! Domain types: time entries, notes, reduction actions, and the published
//! application state.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Gap threshold for the normalizer's merge pass, in milliseconds.
///
/// Two same-day entries whose gap is at most this wide collapse into one.
pub const MERGE_THRESHOLD_MS: i64 = 60_000;

/// Unique identifier of a time entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(Uuid);

impl EntryId {
    /// Generates a fresh random identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for EntryId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

/// Unique identifier of a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(Uuid);

impl NoteId {
    /// Generates a fresh random identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NoteId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for NoteId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

/// A recorded interval of tracked time.
///
/// Before normalization nothing is guaranteed about the bounds; afterwards
/// `start_time < end_time` holds strictly and the entry does not cross local
/// midnight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeEntry {
    pub id: EntryId,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl TimeEntry {
    /// Duration in milliseconds. Negative for inverted (pre-normalization)
    /// entries.
    #[must_use]
    pub fn duration_ms(&self) -> i64 {
        (self.end_time - self.start_time).num_milliseconds()
    }
}

/// A free-form timestamped note, attached to days only loosely (by the local
/// calendar day of its time).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    pub time: DateTime<Utc>,
    pub text: String,
}

/// One step of a time-entry reduction batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum EntryAction {
    /// Append a new entry; the reducer assigns a fresh identifier.
    #[serde(rename_all = "camelCase")]
    Create {
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    },
    /// Replace the entry with the matching identifier. Unknown identifiers
    /// are silently ignored.
    Update { entry: TimeEntry },
    /// Remove the entry with the matching identifier. Unknown identifiers
    /// are silently ignored.
    Delete { id: EntryId },
}

/// One step of a note reduction batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum NoteAction {
    #[serde(rename_all = "camelCase")]
    Create { time: DateTime<Utc>, text: String },
    Update { note: Note },
    Delete { id: NoteId },
}

/// The full canonical application state as published to collaborators and
/// written to disk.
///
/// Every field structurally defaults, so snapshots written before a field
/// existed still load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct State {
    /// Start of the in-progress timer span, if the timer is running.
    pub active_start_time: Option<DateTime<Utc>>,
    /// The canonical, normalized entry collection.
    pub time_entries: Vec<TimeEntry>,
    /// Notes, sorted by time.
    pub notes: Vec<Note>,
}
