//! Derived editing gestures, expressed as action batches.
//!
//! Each gesture produces a batch for [`crate::reduce_entries`], so the whole
//! gesture is applied atomically and normalized once. The constructions
//! deliberately leave gaps wider than the merge threshold so the normalizer
//! cannot immediately undo them.

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::day::{local_day, midnight_instant, next_midnight};
use crate::entry::{EntryAction, MERGE_THRESHOLD_MS, TimeEntry};

/// Margin kept around synthesized gaps. Strictly wider than the merge
/// threshold.
fn gap_margin() -> Duration {
    Duration::milliseconds(MERGE_THRESHOLD_MS) + Duration::minutes(1)
}

/// Splits an entry around a centered pause.
///
/// The pause covers the middle third of the entry, widened to at least
/// [`gap_margin`] so the two remaining pieces survive normalization as
/// separate entries. Returns `None` when the entry is too short to leave
/// two positive-length pieces.
#[must_use]
pub fn insert_pause(entry: &TimeEntry) -> Option<Vec<EntryAction>> {
    let duration = entry.end_time - entry.start_time;
    let width = (duration / 3).max(gap_margin());
    let midpoint = entry.start_time + duration / 2;
    let pause_start = midpoint - width / 2;
    let pause_end = midpoint + width / 2;
    if pause_start <= entry.start_time || pause_end >= entry.end_time {
        return None;
    }
    Some(vec![
        EntryAction::Delete { id: entry.id },
        EntryAction::Create {
            start_time: entry.start_time,
            end_time: pause_start,
        },
        EntryAction::Create {
            start_time: pause_end,
            end_time: entry.end_time,
        },
    ])
}

/// Creates an entry in the gap between two neighbors, or on the open side
/// of a single neighbor.
///
/// The new entry keeps more than the merge threshold of distance from each
/// existing neighbor; with only one neighbor it gets a default 30-minute
/// span. Returns `None` when the gap is too narrow, or when no neighbor is
/// given at all.
#[must_use]
pub fn insert_gap_entry(
    before: Option<&TimeEntry>,
    after: Option<&TimeEntry>,
) -> Option<EntryAction> {
    let margin = gap_margin();
    match (before, after) {
        (Some(before), Some(after)) => {
            let lower = before.end_time + margin;
            let upper = after.start_time - margin;
            if lower >= upper {
                return None;
            }
            // Middle third of the usable gap, mirroring insert_pause.
            let third = (upper - lower) / 3;
            Some(EntryAction::Create {
                start_time: lower + third,
                end_time: upper - third,
            })
        }
        (Some(before), None) => {
            let start = before.end_time + margin;
            Some(EntryAction::Create {
                start_time: start,
                end_time: start + Duration::minutes(30),
            })
        }
        (None, Some(after)) => {
            let end = after.start_time - margin;
            Some(EntryAction::Create {
                start_time: end - Duration::minutes(30),
                end_time: end,
            })
        }
        (None, None) => None,
    }
}

/// Replaces two entries separated by a gap with one spanning both.
///
/// The earlier entry is extended over the later one, which is deleted; the
/// surviving entry keeps its identifier. If anything still overlaps after
/// the batch, the normalizer finalizes the result.
#[must_use]
pub fn merge_gap(first: &TimeEntry, second: &TimeEntry) -> Vec<EntryAction> {
    let (first, second) = if first.start_time <= second.start_time {
        (first, second)
    } else {
        (second, first)
    };
    vec![
        EntryAction::Delete { id: second.id },
        EntryAction::Update {
            entry: TimeEntry {
                id: first.id,
                start_time: first.start_time,
                end_time: first.end_time.max(second.end_time),
            },
        },
    ]
}

/// Which edge of an entry a nudge moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Start,
    End,
}

/// Shifts one edge of an entry by `delta`, clamped.
///
/// The moved edge cannot cross the opposite edge (one minute of slack is
/// kept), cannot leave the entry's local calendar day (the end may land
/// exactly on the following midnight), and cannot enter a neighboring
/// entry. An entry shorter than the slack has no legal target at all; its
/// edge stays where it is.
pub fn nudge_boundary<Tz: TimeZone>(
    tz: &Tz,
    entry: &TimeEntry,
    edge: Edge,
    delta: Duration,
    prev: Option<&TimeEntry>,
    next: Option<&TimeEntry>,
) -> EntryAction {
    let slack = Duration::minutes(1);
    let updated = match edge {
        Edge::Start => {
            let mut lower = midnight_instant(tz, local_day(tz, entry.start_time));
            if let Some(prev) = prev {
                lower = lower.max(prev.end_time);
            }
            let upper = entry.end_time - slack;
            TimeEntry {
                start_time: shift(entry.start_time, delta, lower, upper),
                ..entry.clone()
            }
        }
        Edge::End => {
            let mut upper = next_midnight(tz, entry.start_time);
            if let Some(next) = next {
                upper = upper.min(next.start_time);
            }
            let lower = entry.start_time + slack;
            TimeEntry {
                end_time: shift(entry.end_time, delta, lower, upper),
                ..entry.clone()
            }
        }
    };
    EntryAction::Update { entry: updated }
}

/// Applies `delta` within `[lower, upper]`. Inverted bounds mean the entry
/// is shorter than the slack; the edge then must not move, or the clamp
/// would push it past its floor.
fn shift(
    edge: DateTime<Utc>,
    delta: Duration,
    lower: DateTime<Utc>,
    upper: DateTime<Utc>,
) -> DateTime<Utc> {
    if lower > upper {
        edge
    } else {
        (edge + delta).clamp(lower, upper)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::EntryId;
    use crate::reduce::reduce_entries_with;
    use chrono::FixedOffset;

    fn tz() -> FixedOffset {
        FixedOffset::east_opt(2 * 3600).unwrap()
    }

    fn at(day: u32, hour: u32, min: u32) -> DateTime<Utc> {
        tz().with_ymd_and_hms(2025, 3, day, hour, min, 0)
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
    fn insert_pause_survives_normalization() {
        let e = entry(at(1, 14, 0), at(1, 16, 0));
        let actions = insert_pause(&e).unwrap();
        let result = reduce(std::slice::from_ref(&e), &actions);
        assert_eq!(result.len(), 2, "pause was merged away: {result:?}");
        assert_eq!(result[0].start_time, e.start_time);
        assert_eq!(result[1].end_time, e.end_time);
        let gap_ms = (result[1].start_time - result[0].end_time).num_milliseconds();
        assert!(gap_ms > MERGE_THRESHOLD_MS);
    }

    #[test]
    fn insert_pause_widens_short_middle_third() {
        // 3-minute entry: a third is under the threshold, so the pause must
        // widen past it while both pieces stay positive.
        let e = entry(at(1, 14, 0), at(1, 14, 5));
        let actions = insert_pause(&e).unwrap();
        let result = reduce(std::slice::from_ref(&e), &actions);
        assert_eq!(result.len(), 2);
        let gap_ms = (result[1].start_time - result[0].end_time).num_milliseconds();
        assert!(gap_ms > MERGE_THRESHOLD_MS);
    }

    #[test]
    fn insert_pause_refuses_too_short_entry() {
        let e = entry(at(1, 14, 0), at(1, 14, 2));
        assert!(insert_pause(&e).is_none());
    }

    #[test]
    fn insert_gap_entry_between_neighbors_survives_normalization() {
        let a = entry(at(1, 9, 0), at(1, 10, 0));
        let b = entry(at(1, 14, 0), at(1, 15, 0));
        let action = insert_gap_entry(Some(&a), Some(&b)).unwrap();
        let result = reduce(&[a.clone(), b.clone()], &[action]);
        assert_eq!(result.len(), 3);
        let first_gap = (result[1].start_time - result[0].end_time).num_milliseconds();
        let second_gap = (result[2].start_time - result[1].end_time).num_milliseconds();
        assert!(first_gap > MERGE_THRESHOLD_MS);
        assert!(second_gap > MERGE_THRESHOLD_MS);
    }

    #[test]
    fn insert_gap_entry_refuses_narrow_gap() {
        let a = entry(at(1, 9, 0), at(1, 10, 0));
        let b = entry(at(1, 10, 3), at(1, 11, 0));
        assert!(insert_gap_entry(Some(&a), Some(&b)).is_none());
    }

    #[test]
    fn insert_gap_entry_after_last_uses_default_span() {
        let a = entry(at(1, 9, 0), at(1, 10, 0));
        let Some(EntryAction::Create {
            start_time,
            end_time,
        }) = insert_gap_entry(Some(&a), None)
        else {
            panic!("expected a create action");
        };
        assert!(start_time > a.end_time + Duration::milliseconds(MERGE_THRESHOLD_MS));
        assert_eq!(end_time - start_time, Duration::minutes(30));
    }

    #[test]
    fn insert_gap_entry_before_first_uses_default_span() {
        let a = entry(at(1, 9, 0), at(1, 10, 0));
        let Some(EntryAction::Create {
            start_time,
            end_time,
        }) = insert_gap_entry(None, Some(&a))
        else {
            panic!("expected a create action");
        };
        assert!(end_time < a.start_time - Duration::milliseconds(MERGE_THRESHOLD_MS));
        assert_eq!(end_time - start_time, Duration::minutes(30));
    }

    #[test]
    fn insert_gap_entry_needs_a_neighbor() {
        assert!(insert_gap_entry(None, None).is_none());
    }

    #[test]
    fn merge_gap_spans_both_entries_and_keeps_first_id() {
        let a = entry(at(1, 9, 0), at(1, 10, 0));
        let b = entry(at(1, 14, 0), at(1, 15, 0));
        let result = reduce(&[a.clone(), b.clone()], &merge_gap(&a, &b));
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, a.id);
        assert_eq!(result[0].start_time, a.start_time);
        assert_eq!(result[0].end_time, b.end_time);
    }

    #[test]
    fn merge_gap_accepts_arguments_in_either_order() {
        let a = entry(at(1, 9, 0), at(1, 10, 0));
        let b = entry(at(1, 14, 0), at(1, 15, 0));
        let result = reduce(&[a.clone(), b.clone()], &merge_gap(&b, &a));
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].start_time, a.start_time);
        assert_eq!(result[0].end_time, b.end_time);
    }

    #[test]
    fn nudge_moves_end_by_delta() {
        let e = entry(at(1, 14, 0), at(1, 15, 0));
        let EntryAction::Update { entry: updated } =
            nudge_boundary(&tz(), &e, Edge::End, Duration::minutes(20), None, None)
        else {
            panic!("expected an update action");
        };
        assert_eq!(updated.end_time, at(1, 15, 20));
        assert_eq!(updated.start_time, e.start_time);
        assert_eq!(updated.id, e.id);
    }

    #[test]
    fn nudge_cannot_cross_opposite_edge() {
        let e = entry(at(1, 14, 0), at(1, 15, 0));
        let EntryAction::Update { entry: updated } =
            nudge_boundary(&tz(), &e, Edge::Start, Duration::hours(5), None, None)
        else {
            panic!("expected an update action");
        };
        assert_eq!(updated.start_time, at(1, 14, 59));
    }

    #[test]
    fn nudge_cannot_leave_the_local_day() {
        let e = entry(at(1, 23, 0), at(1, 23, 30));
        let EntryAction::Update { entry: updated } =
            nudge_boundary(&tz(), &e, Edge::End, Duration::hours(4), None, None)
        else {
            panic!("expected an update action");
        };
        // Clamped to the following local midnight, which is still legal.
        assert_eq!(updated.end_time, at(2, 0, 0));

        let e = entry(at(1, 0, 30), at(1, 1, 0));
        let EntryAction::Update { entry: updated } =
            nudge_boundary(&tz(), &e, Edge::Start, -Duration::hours(4), None, None)
        else {
            panic!("expected an update action");
        };
        assert_eq!(updated.start_time, at(1, 0, 0));
    }

    #[test]
    fn nudge_leaves_sub_minute_entries_alone() {
        // A midnight split can produce entries shorter than the one-minute
        // slack. Their clamp bounds conflict, so the edge must stay put
        // instead of being pushed into the previous local day.
        let e = entry(at(2, 0, 0), at(2, 0, 0) + Duration::seconds(20));
        let EntryAction::Update { entry: updated } =
            nudge_boundary(&tz(), &e, Edge::Start, Duration::minutes(1), None, None)
        else {
            panic!("expected an update action");
        };
        assert_eq!(updated.start_time, e.start_time);
        assert_eq!(updated.end_time, e.end_time);

        // Same at the other end of the day.
        let e = entry(
            at(2, 0, 0) - Duration::seconds(30),
            at(2, 0, 0) - Duration::seconds(10),
        );
        let EntryAction::Update { entry: updated } =
            nudge_boundary(&tz(), &e, Edge::End, Duration::hours(1), None, None)
        else {
            panic!("expected an update action");
        };
        assert_eq!(updated.end_time, e.end_time);
        assert_eq!(updated.start_time, e.start_time);
    }

    #[test]
    fn nudge_cannot_enter_a_neighbor() {
        let prev = entry(at(1, 12, 0), at(1, 13, 0));
        let e = entry(at(1, 14, 0), at(1, 15, 0));
        let next = entry(at(1, 16, 0), at(1, 17, 0));

        let EntryAction::Update { entry: updated } = nudge_boundary(
            &tz(),
            &e,
            Edge::Start,
            -Duration::hours(3),
            Some(&prev),
            Some(&next),
        ) else {
            panic!("expected an update action");
        };
        assert_eq!(updated.start_time, prev.end_time);

        let EntryAction::Update { entry: updated } = nudge_boundary(
            &tz(),
            &e,
            Edge::End,
            Duration::hours(3),
            Some(&prev),
            Some(&next),
        ) else {
            panic!("expected an update action");
        };
        assert_eq!(updated.end_time, next.start_time);
    }
}
