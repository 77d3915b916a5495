//! Local-calendar-day arithmetic.
//!
//! Every day boundary in the system is local midnight in the time zone of
//! the running process, never UTC midnight. The helpers here are generic
//! over [`chrono::TimeZone`] so tests can pin a fixed offset.

use chrono::{DateTime, Days, Duration, LocalResult, NaiveDate, NaiveTime, TimeZone, Utc};

/// The local calendar day an instant falls on.
pub fn local_day<Tz: TimeZone>(tz: &Tz, instant: DateTime<Utc>) -> NaiveDate {
    instant.with_timezone(tz).date_naive()
}

/// The local calendar day an entry *end* belongs to.
///
/// An end landing exactly on local midnight counts toward the day that is
/// ending, not the day that is starting.
pub fn end_day<Tz: TimeZone>(tz: &Tz, end: DateTime<Utc>) -> NaiveDate {
    let local = end.with_timezone(tz);
    let date = local.date_naive();
    if local.time() == NaiveTime::MIN {
        date.pred_opt().unwrap_or(date)
    } else {
        date
    }
}

/// Whether two instants fall on the same local calendar day.
pub fn same_local_day<Tz: TimeZone>(tz: &Tz, a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
    local_day(tz, a) == local_day(tz, b)
}

/// The first instant of the local day after the given instant.
pub fn next_midnight<Tz: TimeZone>(tz: &Tz, instant: DateTime<Utc>) -> DateTime<Utc> {
    midnight_instant(tz, local_day(tz, instant) + Days::new(1))
}

/// Converts a local date's midnight to an instant.
///
/// Ambiguous local midnights (DST fall-back) resolve to the earlier instant.
/// Nonexistent local midnights (DST spring-forward) resolve to the earliest
/// valid local time of that day.
pub fn midnight_instant<Tz: TimeZone>(tz: &Tz, day: NaiveDate) -> DateTime<Utc> {
    let midnight = day.and_time(NaiveTime::MIN);
    match tz.from_local_datetime(&midnight) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => dt.with_timezone(&Utc),
        LocalResult::None => {
            // Step forward until the zone transition gap ends.
            let mut candidate = midnight;
            loop {
                candidate += Duration::minutes(30);
                if let LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) =
                    tz.from_local_datetime(&candidate)
                {
                    break dt.with_timezone(&Utc);
                }
            }
        }
    }
}
