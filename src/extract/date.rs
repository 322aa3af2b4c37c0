use chrono::{Datelike, Days, Months, NaiveDate};
use lazy_static::lazy_static;
use regex::Regex;

use super::locale::ExtractorConfig;
use super::text::{strip_span, word_span};

lazy_static! {
    static ref DATE_NAME_RE: Regex =
        Regex::new(r"\b(\d{1,2})\s+([[:alpha:]]+)\s+(\d{4})\b").expect("pattern is valid");
    static ref DATE_SLASH_RE: Regex =
        Regex::new(r"\b(\d{1,2})/(\d{1,2})/(\d{4})\b").expect("pattern is valid");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedDate {
    pub date: NaiveDate,
    /// False when the note carried no date and "today" was assumed.
    pub explicit: bool,
}

#[derive(Debug, Clone, Copy)]
enum Shift {
    Days(u64),
    NextMonth,
}

// Longer phrases first: "day after tomorrow" must win over "tomorrow",
// "hari ini" over a bare "ini".
const RELATIVE_KEYWORDS: &[(&str, Shift)] = &[
    ("hari ini", Shift::Days(0)),
    ("day after tomorrow", Shift::Days(2)),
    ("lusa", Shift::Days(2)),
    ("besok", Shift::Days(1)),
    ("tomorrow", Shift::Days(1)),
    ("today", Shift::Days(0)),
    ("minggu depan", Shift::Days(7)),
    ("next week", Shift::Days(7)),
    ("bulan depan", Shift::NextMonth),
    ("next month", Shift::NextMonth),
];

/// Resolves an explicit calendar date from the working text. Three pattern
/// categories are tried in order; only the first category that matches is
/// used: relative keywords, a (possibly qualified) weekday name, literal
/// `D month-name YYYY` / `D/M/YYYY` dates. Without a match the date stays
/// at today, flagged implicit.
pub fn resolve(text: &str, today: NaiveDate, config: &ExtractorConfig) -> (ResolvedDate, String) {
    for (keyword, shift) in RELATIVE_KEYWORDS {
        if let Some(span) = word_span(text, keyword) {
            let date = match shift {
                Shift::Days(days) => today
                    .checked_add_days(Days::new(*days))
                    .expect("not realistic to overflow"),
                Shift::NextMonth => today
                    .checked_add_months(Months::new(1))
                    .expect("not realistic to overflow"),
            };
            return (explicit(date), strip_span(text, span));
        }
    }

    if let Some((date, span)) = weekday_date(text, today, config) {
        return (explicit(date), strip_span(text, span));
    }

    if let Some((date, span)) = literal_date(text, config) {
        return (explicit(date), strip_span(text, span));
    }

    (
        ResolvedDate {
            date: today,
            explicit: false,
        },
        text.to_string(),
    )
}

fn explicit(date: NaiveDate) -> ResolvedDate {
    ResolvedDate {
        date,
        explicit: true,
    }
}

/// Nearest future occurrence of a named weekday. A zero offset is always
/// pushed a full week forward, so a weekday naming today never resolves to
/// today itself. "next"/"hari" before and "depan" after the name are
/// consumed together with it.
fn weekday_date(
    text: &str,
    today: NaiveDate,
    config: &ExtractorConfig,
) -> Option<(NaiveDate, std::ops::Range<usize>)> {
    for (name, weekday) in config.weekdays {
        let Some(span) = word_span(text, name) else {
            continue;
        };

        let start = extend_back(text, span.start, &["next", "hari"]);
        let end = extend_forward(text, span.end, &["depan"]);

        let mut offset = i64::from(weekday.num_days_from_monday())
            - i64::from(today.weekday().num_days_from_monday());
        offset = offset.rem_euclid(7);
        if offset == 0 {
            offset = 7;
        }

        let date = today
            .checked_add_days(Days::new(offset as u64))
            .expect("not realistic to overflow");
        return Some((date, start..end));
    }
    None
}

/// Literal date patterns. Sub-matches that do not form a real calendar date
/// (day 32, month 13, an unknown month word) are skipped, falling back to
/// the implicit "today".
fn literal_date(text: &str, config: &ExtractorConfig) -> Option<(NaiveDate, std::ops::Range<usize>)> {
    for captures in DATE_NAME_RE.captures_iter(text) {
        let (Some(whole), Some(day), Some(month), Some(year)) = (
            captures.get(0),
            captures.get(1),
            captures.get(2),
            captures.get(3),
        ) else {
            continue;
        };

        let Some(month) = lookup_month(month.as_str(), config) else {
            continue;
        };
        let (Ok(day), Ok(year)) = (day.as_str().parse(), year.as_str().parse()) else {
            continue;
        };

        if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
            return Some((date, whole.range()));
        }
    }

    for captures in DATE_SLASH_RE.captures_iter(text) {
        let (Some(whole), Some(day), Some(month), Some(year)) = (
            captures.get(0),
            captures.get(1),
            captures.get(2),
            captures.get(3),
        ) else {
            continue;
        };

        let (Ok(day), Ok(month), Ok(year)) = (
            day.as_str().parse(),
            month.as_str().parse(),
            year.as_str().parse(),
        ) else {
            continue;
        };

        if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
            return Some((date, whole.range()));
        }
    }

    None
}

fn lookup_month(name: &str, config: &ExtractorConfig) -> Option<u32> {
    config
        .months
        .iter()
        .find(|(candidate, _)| *candidate == name)
        .map(|(_, month)| *month)
}

fn extend_back(text: &str, start: usize, words: &[&str]) -> usize {
    let before = text[..start].trim_end();
    for word in words {
        if before.ends_with(word) {
            let candidate = before.len() - word.len();
            let clear = text[..candidate]
                .chars()
                .next_back()
                .is_none_or(char::is_whitespace);
            if clear {
                return candidate;
            }
        }
    }
    start
}

fn extend_forward(text: &str, end: usize, words: &[&str]) -> usize {
    let after = &text[end..];
    let trimmed = after.trim_start();
    for word in words {
        if let Some(rest) = trimmed.strip_prefix(word)
            && rest.chars().next().is_none_or(|c| !c.is_alphanumeric())
        {
            return end + (after.len() - trimmed.len()) + word.len();
        }
    }
    end
}
