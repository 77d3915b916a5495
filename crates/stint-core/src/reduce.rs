//! Transactional action batches over the entry and note collections.
//!
//! A batch is folded left to right, each action seeing the result of the
//! previous one, and the accumulated collection is normalized exactly once
//! at the end. A single user gesture ("insert a pause") can therefore be a
//! delete plus two creates without any intermediate invalid state becoming
//! visible.

use chrono::{Local, TimeZone};

use crate::entry::{EntryAction, EntryId, Note, NoteAction, NoteId, TimeEntry};
use crate::normalize::normalize_with;

/// Applies a batch of entry actions in the process-local time zone.
#[must_use]
pub fn reduce_entries(current: &[TimeEntry], actions: &[EntryAction]) -> Vec<TimeEntry> {
    reduce_entries_with(current, actions, &Local, &mut EntryId::new)
}

/// Applies a batch of entry actions in an explicit time zone with an
/// injected identifier source, then normalizes the result.
pub fn reduce_entries_with<Tz, F>(
    current: &[TimeEntry],
    actions: &[EntryAction],
    tz: &Tz,
    new_id: &mut F,
) -> Vec<TimeEntry>
where
    Tz: TimeZone,
    F: FnMut() -> EntryId,
{
    let mut working = current.to_vec();
    for action in actions {
        apply_entry_action(&mut working, action, new_id);
    }
    normalize_with(working, tz, new_id)
}

fn apply_entry_action<F>(working: &mut Vec<TimeEntry>, action: &EntryAction, new_id: &mut F)
where
    F: FnMut() -> EntryId,
{
    match action {
        EntryAction::Create {
            start_time,
            end_time,
        } => {
            working.push(TimeEntry {
                id: new_id(),
                start_time: *start_time,
                end_time: *end_time,
            });
        }
        EntryAction::Update { entry } => {
            // Stale references from concurrently-open views degrade to
            // no-ops rather than errors.
            if let Some(existing) = working.iter_mut().find(|e| e.id == entry.id) {
                *existing = entry.clone();
            } else {
                tracing::debug!(id = %entry.id, "update for unknown entry ignored");
            }
        }
        EntryAction::Delete { id } => {
            let before = working.len();
            working.retain(|e| e.id != *id);
            if working.len() == before {
                tracing::debug!(%id, "delete for unknown entry ignored");
            }
        }
    }
}

/// Applies a batch of note actions. Notes are kept sorted by time; they are
/// not normalized.
#[must_use]
pub fn reduce_notes(current: &[Note], actions: &[NoteAction]) -> Vec<Note> {
    let mut working = current.to_vec();
    for action in actions {
        match action {
            NoteAction::Create { time, text } => {
                working.push(Note {
                    id: NoteId::new(),
                    time: *time,
                    text: text.clone(),
                });
            }
            NoteAction::Update { note } => {
                if let Some(existing) = working.iter_mut().find(|n| n.id == note.id) {
                    *existing = note.clone();
                } else {
                    tracing::debug!(id = %note.id, "update for unknown note ignored");
                }
            }
            NoteAction::Delete { id } => {
                working.retain(|n| n.id != *id);
            }
        }
    }
    working.sort_by_key(|note| note.time);
    working
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, FixedOffset, Utc};

    fn tz() -> FixedOffset {
        FixedOffset::east_opt(2 * 3600).unwrap()
    }

    fn at(hour: u32, min: u32) -> DateTime<Utc> {
        tz().with_ymd_and_hms(2025, 3, 1, hour, min, 0)
            .unwrap()
            .with_timezone(&Utc)
    }

    fn entry(start: DateTime<Utc>, end: DateTime<Utc>) -> TimeEntry {
        TimeEntry {
            id: EntryId::new(),
            start_time: start,
            end_time: end,
        }
    }

    fn reduce(current: &[TimeEntry], actions: &[EntryAction]) -> Vec<TimeEntry> {
        reduce_entries_with(current, actions, &tz(), &mut EntryId::new)
    }

    #[test]
    fn create_appends_a_normalized_entry() {
        let result = reduce(
            &[],
            &[EntryAction::Create {
                start_time: at(14, 0),
                end_time: at(14, 30),
            }],
        );
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].start_time, at(14, 0));
        assert_eq!(result[0].end_time, at(14, 30));
    }

    #[test]
    fn update_replaces_matching_entry() {
        let existing = entry(at(14, 0), at(14, 30));
        let updated = TimeEntry {
            end_time: at(15, 0),
            ..existing.clone()
        };
        let result = reduce(
            &[existing],
            &[EntryAction::Update {
                entry: updated.clone(),
            }],
        );
        assert_eq!(result, vec![updated]);
    }

    #[test]
    fn update_for_unknown_id_is_a_no_op() {
        let existing = entry(at(14, 0), at(14, 30));
        let stale = entry(at(16, 0), at(16, 30));
        let result = reduce(
            std::slice::from_ref(&existing),
            &[EntryAction::Update { entry: stale }],
        );
        assert_eq!(result, vec![existing]);
    }

    #[test]
    fn delete_removes_matching_entry() {
        let a = entry(at(14, 0), at(14, 30));
        let b = entry(at(16, 0), at(16, 30));
        let result = reduce(&[a.clone(), b.clone()], &[EntryAction::Delete { id: a.id }]);
        assert_eq!(result, vec![b]);
    }

    #[test]
    fn delete_for_unknown_id_is_a_no_op() {
        let a = entry(at(14, 0), at(14, 30));
        let result = reduce(
            std::slice::from_ref(&a),
            &[EntryAction::Delete { id: EntryId::new() }],
        );
        assert_eq!(result, vec![a]);
    }

    #[test]
    fn later_actions_see_earlier_actions_within_a_batch() {
        // Create then immediately update the created entry by deleting the
        // original and recreating; the net effect must reflect both steps.
        let a = entry(at(14, 0), at(18, 0));
        let result = reduce(
            std::slice::from_ref(&a),
            &[
                EntryAction::Delete { id: a.id },
                EntryAction::Create {
                    start_time: at(14, 0),
                    end_time: at(15, 0),
                },
                EntryAction::Create {
                    start_time: at(16, 0),
                    end_time: at(18, 0),
                },
            ],
        );
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].end_time, at(15, 0));
        assert_eq!(result[1].start_time, at(16, 0));
    }

    #[test]
    fn batch_is_normalized_once_at_the_end() {
        // Two creates that overlap each other end up merged.
        let result = reduce(
            &[],
            &[
                EntryAction::Create {
                    start_time: at(14, 0),
                    end_time: at(14, 20),
                },
                EntryAction::Create {
                    start_time: at(14, 10),
                    end_time: at(14, 40),
                },
            ],
        );
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].start_time, at(14, 0));
        assert_eq!(result[0].end_time, at(14, 40));
    }

    #[test]
    fn invalid_create_is_normalized_away() {
        let result = reduce(
            &[],
            &[EntryAction::Create {
                start_time: at(14, 30),
                end_time: at(14, 0),
            }],
        );
        assert!(result.is_empty());
    }

    #[test]
    fn notes_stay_sorted_by_time() {
        let notes = reduce_notes(
            &[],
            &[
                NoteAction::Create {
                    time: at(15, 0),
                    text: "later".into(),
                },
                NoteAction::Create {
                    time: at(9, 0),
                    text: "earlier".into(),
                },
            ],
        );
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].text, "earlier");
        assert_eq!(notes[1].text, "later");
    }

    #[test]
    fn note_update_and_delete_by_id() {
        let notes = reduce_notes(
            &[],
            &[NoteAction::Create {
                time: at(9, 0),
                text: "draft".into(),
            }],
        );
        let note = Note {
            text: "final".into(),
            ..notes[0].clone()
        };
        let notes = reduce_notes(&notes, &[NoteAction::Update { note: note.clone() }]);
        assert_eq!(notes[0].text, "final");
        let notes = reduce_notes(&notes, &[NoteAction::Delete { id: note.id }]);
        assert!(notes.is_empty());
    }
}
