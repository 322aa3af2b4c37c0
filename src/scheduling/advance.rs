//! Recurrence advancement: computes a recurring reminder's next future due
//! time by repeated single-step application of its rule, so any number of
//! periods missed during downtime are skipped in one evaluation.

use chrono::{DateTime, Datelike, Days, LocalResult, Months, NaiveDateTime, TimeDelta, TimeZone};
use chrono_tz::Tz;
use thiserror::Error;

use crate::reminder::RepeatRule;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecurrenceError {
    /// The rule can never produce a future occurrence; advancing it would
    /// loop forever. A caller bug, rejected up front.
    #[error("recurrence rule cannot be advanced: {0}")]
    InvalidRecurrenceRule(&'static str),
}

/// Earliest occurrence of `rule` strictly after `now`, starting from the
/// fired due time `current_due_at`. Always steps at least once.
pub fn next_occurrence(
    current_due_at: DateTime<Tz>,
    rule: &RepeatRule,
    now: DateTime<Tz>,
) -> Result<DateTime<Tz>, RecurrenceError> {
    validate(rule)?;

    let mut next = advance_once(current_due_at, rule, now)?;
    while next <= now {
        next = advance_once(next, rule, now)?;
    }
    Ok(next)
}

fn validate(rule: &RepeatRule) -> Result<(), RecurrenceError> {
    match rule {
        RepeatRule::None => Err(RecurrenceError::InvalidRecurrenceRule(
            "a one-shot rule has no next occurrence",
        )),
        RepeatRule::MonthlyInterval { interval: 0 } => Err(RecurrenceError::InvalidRecurrenceRule(
            "monthly interval must be at least 1",
        )),
        RepeatRule::Yearly { interval: 0 } => Err(RecurrenceError::InvalidRecurrenceRule(
            "yearly interval must be at least 1",
        )),
        RepeatRule::WeeklyCustom { weekdays } if weekdays.is_empty() => Err(
            RecurrenceError::InvalidRecurrenceRule("custom weekday set is empty"),
        ),
        _ => Ok(()),
    }
}

/// One application of the rule. Month-based rules clamp the day of month to
/// the last valid day of the target month, which also covers Feb-29 anchors
/// in non-leap years.
fn advance_once(
    from: DateTime<Tz>,
    rule: &RepeatRule,
    now: DateTime<Tz>,
) -> Result<DateTime<Tz>, RecurrenceError> {
    match rule {
        RepeatRule::Daily => Ok(add_local(from, |naive| {
            naive.checked_add_days(Days::new(1))
        })),
        RepeatRule::MonthlyInterval { interval } => Ok(add_local(from, |naive| {
            naive.checked_add_months(Months::new(*interval))
        })),
        RepeatRule::Yearly { interval } => Ok(add_local(from, |naive| {
            naive.checked_add_months(Months::new(interval.saturating_mul(12)))
        })),
        RepeatRule::Weekly { weekday } => {
            let mut offset = i64::from(weekday.num_days_from_monday())
                - i64::from(from.weekday().num_days_from_monday());
            offset = offset.rem_euclid(7);
            if offset == 0 {
                offset = 7;
            }
            Ok(add_local(from, |naive| {
                naive.checked_add_days(Days::new(offset as u64))
            }))
        }
        RepeatRule::WeeklyCustom { weekdays } => next_custom_weekday(from, weekdays, now),
        RepeatRule::None => Err(RecurrenceError::InvalidRecurrenceRule(
            "a one-shot rule has no next occurrence",
        )),
    }
}

/// Nearest date whose weekday is in the set, keeping the due time of day.
/// Today only counts while its time of day is still ahead of `now`; with
/// nothing left this week the search wraps into the following week.
fn next_custom_weekday(
    from: DateTime<Tz>,
    weekdays: &[chrono::Weekday],
    now: DateTime<Tz>,
) -> Result<DateTime<Tz>, RecurrenceError> {
    let zone = from.timezone();
    let local_now = now.with_timezone(&zone);
    let time = from.time();

    for days_ahead in 0..=7 {
        let date = local_now
            .date_naive()
            .checked_add_days(Days::new(days_ahead))
            .expect("not realistic to overflow");
        if !weekdays.contains(&date.weekday()) {
            continue;
        }

        let candidate = localize(zone, date.and_time(time));
        if candidate > now {
            return Ok(candidate);
        }
    }

    // Unreachable with a validated non-empty set.
    Err(RecurrenceError::InvalidRecurrenceRule(
        "custom weekday set never matches",
    ))
}

fn add_local<F>(from: DateTime<Tz>, advance: F) -> DateTime<Tz>
where
    F: Fn(NaiveDateTime) -> Option<NaiveDateTime>,
{
    let naive = advance(from.naive_local()).expect("not realistic to overflow");
    localize(from.timezone(), naive)
}

/// Maps a naive local time back into the zone. Ambiguous times take the
/// earlier instant; times inside a DST gap are shifted forward an hour.
fn localize(zone: Tz, naive: NaiveDateTime) -> DateTime<Tz> {
    let mut candidate = naive;
    for _ in 0..4 {
        match zone.from_local_datetime(&candidate) {
            LocalResult::Single(instant) => return instant,
            LocalResult::Ambiguous(earlier, _) => return earlier,
            LocalResult::None => candidate += TimeDelta::hours(1),
        }
    }
    zone.from_utc_datetime(&naive)
}
