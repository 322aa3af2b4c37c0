//! The schedule extraction pipeline: free-form note text in, one
//! [`ParsedSchedule`] out. Resolvers run in a fixed precedence order, each
//! consuming its matched span from the working text: timezone, recurrence
//! (matched against the original text), date, time, then metadata/title
//! over whatever is left.

pub mod date;
pub mod locale;
pub mod metadata;
pub mod recurrence;
mod text;
pub mod time;
pub mod timezone;

use chrono::{DateTime, Days, LocalResult, NaiveDateTime, TimeDelta, TimeZone};
use chrono_tz::Tz;
use thiserror::Error;

use crate::reminder::ParsedSchedule;
use locale::ExtractorConfig;
use time::ResolvedTime;

/// Clock skew allowed before a resolved timestamp counts as past.
pub const PAST_TOLERANCE_SECS: i64 = 2;

/// Metadata key carrying the literal weekday-set token of a custom weekly
/// rule.
pub const REPEAT_DAYS_KEY: &str = "repeat_days";

#[derive(Debug, Error, PartialEq)]
pub enum ExtractionError {
    /// Nothing in the note could be turned into a forward-looking
    /// timestamp. The caller should ask for a rephrase, not fail hard.
    #[error("no schedule could be derived from the note")]
    NoViableSchedule,
    /// A concrete timestamp was resolved but lies in the past.
    #[error("resolved time {0} is already in the past")]
    PastTimestamp(DateTime<Tz>),
}

/// Derives a structured schedule from one text fragment.
///
/// `now` is the extraction instant in the canonical zone; the caller must
/// keep it stable across a batch so relative phrases resolve consistently.
pub fn extract(
    text: &str,
    now: DateTime<Tz>,
    config: &ExtractorConfig,
) -> Result<ParsedSchedule, ExtractionError> {
    let original = normalize_input(text);
    if original.is_empty() {
        return Err(ExtractionError::NoViableSchedule);
    }

    let (zone, working) = timezone::resolve(&original, config);
    let (recurrence, working) = recurrence::resolve(&original, working, config);

    // With an explicit zone the note is read as local to that zone; dates
    // like "today" then mean today *there*.
    let parse_zone = zone.unwrap_or(config.zone);
    let local_now = now.with_timezone(&parse_zone);

    let (resolved_date, working) = date::resolve(&working, local_now.date_naive(), config);
    let (resolved_time, working) = time::resolve(&working, config);

    let scheduled_at = match resolved_time {
        ResolvedTime::Relative(delta) => now
            .checked_add_signed(delta)
            .ok_or(ExtractionError::NoViableSchedule)?,
        ResolvedTime::Absolute { time, .. } => {
            let mut date = resolved_date.date;
            let mut local = in_zone(parse_zone, date.and_time(time))
                .ok_or(ExtractionError::NoViableSchedule)?;

            // An unqualified time that already passed today means the next
            // occurrence of that time. Explicit dates are never shifted.
            if !resolved_date.explicit && local <= local_now {
                date = date
                    .checked_add_days(Days::new(1))
                    .expect("not realistic to overflow");
                local = in_zone(parse_zone, date.and_time(time))
                    .ok_or(ExtractionError::NoViableSchedule)?;
            }

            local.with_timezone(&config.zone)
        }
    };

    if scheduled_at < now - TimeDelta::seconds(PAST_TOLERANCE_SECS) {
        return Err(ExtractionError::PastTimestamp(scheduled_at));
    }

    let (title, mut metadata) = metadata::resolve(&working, config);
    if let Some(token) = recurrence.days_token {
        metadata.insert(REPEAT_DAYS_KEY.to_string(), token);
    }

    Ok(ParsedSchedule {
        title,
        scheduled_at,
        repeat: recurrence.rule,
        metadata,
    })
}

/// Multi-line variant: every non-empty line is parsed independently and
/// each successful line yields one schedule. If no line parses, the whole
/// text is retried once as a single fragment.
pub fn extract_all(
    text: &str,
    now: DateTime<Tz>,
    config: &ExtractorConfig,
) -> Result<Vec<ParsedSchedule>, ExtractionError> {
    let mut schedules = Vec::new();
    for line in text.lines() {
        if line.trim().is_empty() {
            continue;
        }
        if let Ok(schedule) = extract(line, now, config) {
            schedules.push(schedule);
        }
    }

    if schedules.is_empty() {
        return extract(text, now, config).map(|schedule| vec![schedule]);
    }
    Ok(schedules)
}

/// Lower-cases and collapses all whitespace so phrase matching can assume
/// single spaces.
fn normalize_input(text: &str) -> String {
    text.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn in_zone(zone: Tz, naive: NaiveDateTime) -> Option<DateTime<Tz>> {
    match zone.from_local_datetime(&naive) {
        LocalResult::Single(instant) => Some(instant),
        LocalResult::Ambiguous(earlier, _) => Some(earlier),
        LocalResult::None => None,
    }
}
