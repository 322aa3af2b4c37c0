use chrono::{NaiveTime, TimeDelta};
use lazy_static::lazy_static;
use regex::Regex;

use super::locale::ExtractorConfig;
use super::text::{strip_span, word_span};

lazy_static! {
    static ref RELATIVE_RE: Regex = Regex::new(
        r"\b(?:dalam|in)\s+(\d{1,4})\s+(jam|hours?|hrs?|menit|minutes?|mins?)\b",
    )
    .expect("pattern is valid");
    static ref LITERAL_RE: Regex = Regex::new(
        r"\b(?:(jam|pukul|at)\s+)?(\d{1,2})(?:[:.](\d{2}))?\s*(pagi|siang|sore|malam|am|pm)?\b",
    )
    .expect("pattern is valid");
}

const AFTER_QUALIFIERS: &[&str] = &["setelah", "sesudah", "habis", "ba'da", "after"];

/// Minutes added by an "after <prayer>" phrasing.
const AFTER_PRAYER_OFFSET_MINUTES: i64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedTime {
    /// A clock time for the resolved date. `explicit` is false when the
    /// default hour was applied.
    Absolute { time: NaiveTime, explicit: bool },
    /// "in N hours/minutes" — an exact offset from the extraction instant.
    Relative(TimeDelta),
}

/// Resolves a clock time from the working text: a relative offset, a prayer
/// anchor, a literal hour with an optional day-part qualifier, or the
/// configured default hour, in that order.
pub fn resolve(text: &str, config: &ExtractorConfig) -> (ResolvedTime, String) {
    if let Some(captures) = RELATIVE_RE.captures(text) {
        if let (Some(whole), Some(amount), Some(unit)) =
            (captures.get(0), captures.get(1), captures.get(2))
            && let Ok(amount) = amount.as_str().parse::<i64>()
        {
            let delta = if unit.as_str().starts_with('h') || unit.as_str() == "jam" {
                TimeDelta::hours(amount)
            } else {
                TimeDelta::minutes(amount)
            };
            return (ResolvedTime::Relative(delta), strip_span(text, whole.range()));
        }
    }

    if let Some((time, span)) = prayer_time(text, config) {
        return (
            ResolvedTime::Absolute {
                time,
                explicit: true,
            },
            strip_span(text, span),
        );
    }

    if let Some((time, span)) = literal_time(text) {
        return (
            ResolvedTime::Absolute {
                time,
                explicit: true,
            },
            strip_span(text, span),
        );
    }

    let default = NaiveTime::from_hms_opt(config.default_hour, 0, 0)
        .unwrap_or_else(|| NaiveTime::from_hms_opt(9, 0, 0).expect("09:00 is valid"));
    (
        ResolvedTime::Absolute {
            time: default,
            explicit: false,
        },
        text.to_string(),
    )
}

/// A named prayer anchor, optionally preceded by an "after" qualifier which
/// shifts the anchor by a fixed 30 minutes.
fn prayer_time(
    text: &str,
    config: &ExtractorConfig,
) -> Option<(NaiveTime, std::ops::Range<usize>)> {
    for (name, hour, minute) in config.prayer_times {
        let Some(span) = word_span(text, name) else {
            continue;
        };
        let Some(anchor) = NaiveTime::from_hms_opt(*hour, *minute, 0) else {
            continue;
        };

        let mut start = span.start;
        let mut time = anchor;
        let before = text[..span.start].trim_end();
        for qualifier in AFTER_QUALIFIERS {
            if before.ends_with(qualifier) {
                let candidate = before.len() - qualifier.len();
                let clear = text[..candidate]
                    .chars()
                    .next_back()
                    .is_none_or(char::is_whitespace);
                if clear {
                    start = candidate;
                    time = anchor
                        .overflowing_add_signed(TimeDelta::minutes(AFTER_PRAYER_OFFSET_MINUTES))
                        .0;
                    break;
                }
            }
        }

        return Some((time, start..span.end));
    }
    None
}

/// Literal `HH[:MM|.MM]` with an optional day-part word. A bare number with
/// no "jam"/"pukul"/"at" marker, no minutes and no day-part is not treated
/// as a time, so quantities in the note ("beli 2 apel") are left alone.
/// Candidates whose adjusted hour or minute is out of range are skipped.
fn literal_time(text: &str) -> Option<(NaiveTime, std::ops::Range<usize>)> {
    for captures in LITERAL_RE.captures_iter(text) {
        let Some(whole) = captures.get(0) else {
            continue;
        };
        let Some(hour_match) = captures.get(2) else {
            continue;
        };

        let marker = captures.get(1).is_some();
        let minutes = captures.get(3);
        let day_part = captures.get(4).map(|m| m.as_str());
        if !marker && minutes.is_none() && day_part.is_none() {
            continue;
        }

        let Ok(mut hour) = hour_match.as_str().parse::<u32>() else {
            continue;
        };
        let minute: u32 = match minutes {
            Some(m) => match m.as_str().parse() {
                Ok(minute) => minute,
                Err(_) => continue,
            },
            None => 0,
        };

        match day_part {
            Some("pagi") => {
                if hour == 12 {
                    hour = 0;
                }
            }
            Some("siang") | Some("sore") | Some("pm") => {
                if hour < 12 {
                    hour += 12;
                }
            }
            Some("malam") => {
                if hour < 12 {
                    hour += 12;
                }
                if hour == 24 {
                    hour = 0;
                }
            }
            _ => {}
        }

        if let Some(time) = NaiveTime::from_hms_opt(hour, minute, 0) {
            return Some((time, whole.range()));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::Tz;

    fn config() -> ExtractorConfig {
        ExtractorConfig::indonesian(Tz::Asia__Jakarta)
    }

    fn time(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    #[test]
    fn relative_minutes_offset() {
        let (resolved, rest) = resolve("telfon ibu dalam 30 menit", &config());

        assert_eq!(resolved, ResolvedTime::Relative(TimeDelta::minutes(30)));
        assert_eq!(rest, "telfon ibu");
    }

    #[test]
    fn relative_hours_offset_in_english() {
        let (resolved, _) = resolve("submit report in 2 hours", &config());

        assert_eq!(resolved, ResolvedTime::Relative(TimeDelta::hours(2)));
    }

    #[test]
    fn prayer_anchor_resolves_from_the_table() {
        let (resolved, rest) = resolve("pulang maghrib", &config());

        assert_eq!(
            resolved,
            ResolvedTime::Absolute {
                time: time(18, 0),
                explicit: true
            }
        );
        assert_eq!(rest, "pulang");
    }

    #[test]
    fn after_prayer_adds_thirty_minutes() {
        let (resolved, rest) = resolve("ngaji setelah maghrib", &config());

        assert_eq!(
            resolved,
            ResolvedTime::Absolute {
                time: time(18, 30),
                explicit: true
            }
        );
        assert_eq!(rest, "ngaji");
    }

    #[test]
    fn jam_prefix_with_evening_day_part() {
        let (resolved, rest) = resolve("makan malam jam 7 malam", &config());

        assert_eq!(
            resolved,
            ResolvedTime::Absolute {
                time: time(19, 0),
                explicit: true
            }
        );
        assert_eq!(rest, "makan malam");
    }

    #[test]
    fn colon_time_needs_no_marker() {
        let (resolved, _) = resolve("team meeting 14:30", &config());

        assert_eq!(
            resolved,
            ResolvedTime::Absolute {
                time: time(14, 30),
                explicit: true
            }
        );
    }

    #[test]
    fn day_part_is_a_no_op_on_a_24h_time() {
        let (afternoon, _) = resolve("rapat 14:30", &config());
        let (day_part, _) = resolve("rapat 2.30 siang", &config());

        assert_eq!(afternoon, day_part);
    }

    #[test]
    fn twelve_pagi_is_midnight() {
        let (resolved, _) = resolve("sahur jam 12 pagi", &config());

        assert_eq!(
            resolved,
            ResolvedTime::Absolute {
                time: time(0, 0),
                explicit: true
            }
        );
    }

    #[test]
    fn bare_quantity_is_not_a_time() {
        let (resolved, rest) = resolve("beli 2 apel", &config());

        assert_eq!(
            resolved,
            ResolvedTime::Absolute {
                time: time(9, 0),
                explicit: false
            }
        );
        assert_eq!(rest, "beli 2 apel");
    }

    #[test]
    fn out_of_range_hour_falls_back_to_default() {
        let (resolved, _) = resolve("tes jam 25", &config());

        assert_eq!(
            resolved,
            ResolvedTime::Absolute {
                time: time(9, 0),
                explicit: false
            }
        );
    }
}
