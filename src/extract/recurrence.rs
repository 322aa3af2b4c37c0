use chrono::Weekday;
use lazy_static::lazy_static;
use regex::Regex;

use super::locale::ExtractorConfig;
use super::text::{strip_first_occurrence, word_span};
use crate::reminder::RepeatRule;

lazy_static! {
    static ref MONTH_INTERVAL_RE: Regex = Regex::new(
        r"\b(?:setiap|tiap|every|each)\s+(\d{1,3})\s+(?:bulan|months?)\b|\b(\d{1,3})\s+(?:bulan|months?)\s+(?:ke\s?depan|sekali|ahead)\b",
    )
    .expect("pattern is valid");
    static ref YEAR_INTERVAL_RE: Regex = Regex::new(
        r"\b(?:setiap|tiap|every|each)\s+(\d{1,3})\s+(?:tahun|years?)\b|\b(\d{1,3})\s+(?:tahun|years?)\s+(?:ke\s?depan|sekali|ahead)\b",
    )
    .expect("pattern is valid");
    static ref YEAR_BARE_RE: Regex =
        Regex::new(r"\b(?:setiap|tiap|every|each)\s+(?:tahun|year)\b").expect("pattern is valid");
    static ref YEAR_MENTION_RE: Regex =
        Regex::new(r"\b(?:tahun|year|years|yearly|annually)\b").expect("pattern is valid");
    static ref DAILY_RE: Regex =
        Regex::new(r"\b(?:setiap|tiap|every|each)\s+(?:hari|day)\b|\b(?:daily|harian)\b")
            .expect("pattern is valid");
}

/// Outcome of the recurrence pass. `days_token` carries the literal
/// weekday-set token (e.g. "senin/rabu/jumat") so the orchestrator can
/// surface it in the schedule metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecurrenceMatch {
    pub rule: RepeatRule,
    pub days_token: Option<String>,
}

/// Matches recurrence phrasing against the *original* note text, so an
/// earlier resolver can never destroy the phrase, then mirrors the matched
/// span onto the working text.
///
/// Precedence is fixed: monthly interval, yearly interval, the
/// monthly/yearly ambiguity guard, daily, a literal weekday-set token, a
/// single recurring weekday. First match wins.
pub fn resolve(
    original: &str,
    working: String,
    config: &ExtractorConfig,
) -> (RecurrenceMatch, String) {
    if let Some((interval, span)) = interval_match(&MONTH_INTERVAL_RE, original) {
        // A monthly phrase next to any mention of a year is treated as too
        // ambiguous to schedule and the rule is dropped entirely.
        if YEAR_MENTION_RE.is_match(original) {
            return (no_rule(), working);
        }
        return (
            rule(RepeatRule::MonthlyInterval { interval }),
            strip_first_occurrence(&working, span),
        );
    }

    if let Some((interval, span)) = interval_match(&YEAR_INTERVAL_RE, original) {
        return (
            rule(RepeatRule::Yearly { interval }),
            strip_first_occurrence(&working, span),
        );
    }
    if let Some(m) = YEAR_BARE_RE.find(original) {
        return (
            rule(RepeatRule::Yearly { interval: 1 }),
            strip_first_occurrence(&working, m.as_str()),
        );
    }

    if let Some(m) = DAILY_RE.find(original) {
        return (
            rule(RepeatRule::Daily),
            strip_first_occurrence(&working, m.as_str()),
        );
    }

    if let Some((weekdays, token)) = weekday_set_token(original, config) {
        let stripped = strip_first_occurrence(&working, &token);
        return (
            RecurrenceMatch {
                rule: RepeatRule::WeeklyCustom { weekdays },
                days_token: Some(token),
            },
            stripped,
        );
    }

    if let Some((weekday, span)) = recurring_weekday(original, config) {
        return (
            rule(RepeatRule::Weekly { weekday }),
            strip_first_occurrence(&working, &span),
        );
    }

    (no_rule(), working)
}

fn rule(rule: RepeatRule) -> RecurrenceMatch {
    RecurrenceMatch {
        rule,
        days_token: None,
    }
}

fn no_rule() -> RecurrenceMatch {
    rule(RepeatRule::None)
}

/// First interval match with a non-zero count; a zero interval could never
/// advance and is treated as no match.
fn interval_match<'t>(re: &Regex, text: &'t str) -> Option<(u32, &'t str)> {
    for captures in re.captures_iter(text) {
        let Some(digits) = captures.get(1).or_else(|| captures.get(2)) else {
            continue;
        };
        let Ok(interval) = digits.as_str().parse::<u32>() else {
            continue;
        };
        if let Some(whole) = captures.get(0)
            && interval > 0
        {
            return Some((interval, whole.as_str()));
        }
    }
    None
}

/// A slash-joined list of weekday names ("senin/rabu/jumat") anywhere in
/// the text. Duplicate days are dropped, listed order is kept.
fn weekday_set_token(
    text: &str,
    config: &ExtractorConfig,
) -> Option<(Vec<Weekday>, String)> {
    for token in text.split_whitespace() {
        let token = token.trim_matches(|c: char| !c.is_alphanumeric() && c != '/');
        if !token.contains('/') {
            continue;
        }

        let parts: Vec<&str> = token.split('/').collect();
        if parts.len() < 2 {
            continue;
        }

        let mut weekdays = Vec::new();
        let all_known = parts.iter().all(|part| {
            match lookup_weekday(part, config) {
                Some(day) => {
                    if !weekdays.contains(&day) {
                        weekdays.push(day);
                    }
                    true
                }
                None => false,
            }
        });

        if all_known && !weekdays.is_empty() {
            return Some((weekdays, token.to_string()));
        }
    }
    None
}

/// A weekday phrased as recurring: "setiap senin" / "tiap jumat" or the
/// English plural "mondays". Returns the full phrase to strip.
fn recurring_weekday(text: &str, config: &ExtractorConfig) -> Option<(Weekday, String)> {
    for (name, weekday) in config.weekdays {
        for qualifier in ["setiap", "tiap", "every", "each"] {
            let phrase = format!("{qualifier} {name}");
            if word_span(text, &phrase).is_some() {
                return Some((*weekday, phrase));
            }
        }

        let plural = format!("{name}s");
        if word_span(text, &plural).is_some() {
            return Some((*weekday, plural));
        }
    }
    None
}

fn lookup_weekday(name: &str, config: &ExtractorConfig) -> Option<Weekday> {
    config
        .weekdays
        .iter()
        .find(|(candidate, _)| *candidate == name)
        .map(|(_, day)| *day)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::Tz;

    fn config() -> ExtractorConfig {
        ExtractorConfig::indonesian(Tz::Asia__Jakarta)
    }

    fn resolve_str(text: &str) -> (RecurrenceMatch, String) {
        resolve(text, text.to_string(), &config())
    }

    #[test]
    fn matches_monthly_interval() {
        let (found, rest) = resolve_str("bayar kos setiap 2 bulan");

        assert_eq!(found.rule, RepeatRule::MonthlyInterval { interval: 2 });
        assert_eq!(rest, "bayar kos");
    }

    #[test]
    fn matches_months_ahead_phrasing() {
        let (found, _) = resolve_str("servis motor 3 bulan sekali");

        assert_eq!(found.rule, RepeatRule::MonthlyInterval { interval: 3 });
    }

    #[test]
    fn matches_yearly_interval() {
        let (found, rest) = resolve_str("perpanjang paspor setiap 5 tahun");

        assert_eq!(found.rule, RepeatRule::Yearly { interval: 5 });
        assert_eq!(rest, "perpanjang paspor");
    }

    #[test]
    fn bare_every_year_means_interval_one() {
        let (found, _) = resolve_str("bayar pajak setiap tahun");

        assert_eq!(found.rule, RepeatRule::Yearly { interval: 1 });
    }

    #[test]
    fn monthly_next_to_a_year_mention_is_discarded() {
        let (found, rest) = resolve_str("bayar asuransi setiap 1 bulan setiap tahun");

        assert_eq!(found.rule, RepeatRule::None);
        // Nothing is consumed for a discarded match.
        assert_eq!(rest, "bayar asuransi setiap 1 bulan setiap tahun");
    }

    #[test]
    fn matches_daily() {
        let (found, rest) = resolve_str("minum vitamin setiap hari");

        assert_eq!(found.rule, RepeatRule::Daily);
        assert_eq!(rest, "minum vitamin");
    }

    #[test]
    fn matches_weekday_set_token() {
        let (found, rest) = resolve_str("olahraga senin/rabu/jumat");

        assert_eq!(
            found.rule,
            RepeatRule::WeeklyCustom {
                weekdays: vec![Weekday::Mon, Weekday::Wed, Weekday::Fri]
            }
        );
        assert_eq!(found.days_token.as_deref(), Some("senin/rabu/jumat"));
        assert_eq!(rest, "olahraga");
    }

    #[test]
    fn slash_token_with_unknown_day_is_ignored() {
        let (found, rest) = resolve_str("split tagihan 50/50 besok");

        assert_eq!(found.rule, RepeatRule::None);
        assert_eq!(rest, "split tagihan 50/50 besok");
    }

    #[test]
    fn matches_recurring_weekday_with_qualifier() {
        let (found, rest) = resolve_str("setiap senin kirim laporan");

        assert_eq!(
            found.rule,
            RepeatRule::Weekly {
                weekday: Weekday::Mon
            }
        );
        assert_eq!(rest, "kirim laporan");
    }

    #[test]
    fn matches_english_plural_weekday() {
        let (found, _) = resolve_str("water the plants on sundays");

        assert_eq!(
            found.rule,
            RepeatRule::Weekly {
                weekday: Weekday::Sun
            }
        );
    }

    #[test]
    fn zero_interval_never_produces_a_rule() {
        let (found, _) = resolve_str("tes setiap 0 bulan");

        assert_eq!(found.rule, RepeatRule::None);
    }

    #[test]
    fn plain_text_has_no_rule() {
        let (found, rest) = resolve_str("beli susu besok pagi");

        assert_eq!(found.rule, RepeatRule::None);
        assert_eq!(rest, "beli susu besok pagi");
    }
}
