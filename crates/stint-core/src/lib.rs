//! Core domain logic for stint.
//!
//! This crate contains the fundamental types and logic for:
//! - Normalization: reducing arbitrary time entries to the canonical,
//!   non-overlapping, per-day-bounded form
//! - Reduction: applying create/update/delete action batches atomically
//! - Gestures: pause insertion, gap filling, gap merging, boundary nudges
//! - Export helpers: day grouping and duration formatting

pub mod day;
mod entry;
pub mod export;
mod normalize;
pub mod ops;
mod reduce;

pub use entry::{
    EntryAction, EntryId, MERGE_THRESHOLD_MS, Note, NoteAction, NoteId, State, TimeEntry,
};
pub use normalize::{normalize, normalize_with};
pub use reduce::{reduce_entries, reduce_entries_with, reduce_notes};
