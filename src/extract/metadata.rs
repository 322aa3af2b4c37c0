use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;

use super::locale::ExtractorConfig;
use super::text::{strip_span, word_span};

/// Title used when nothing usable is left of the note.
pub const DEFAULT_TITLE: &str = "Reminder";

/// Metadata key holding the residual text when it could not become a title.
pub const FALLBACK_KEY: &str = "raw_text";

lazy_static! {
    static ref LABEL_RE: Regex =
        Regex::new(r"\b(catatan|notes?|mood|saran|suggestion)\s*:\s*").expect("pattern is valid");
}

/// Runs on whatever text the four resolvers left behind: pulls out labeled
/// `key: value` fields and a closed activity vocabulary, drops stopwords,
/// and turns the residue into the title.
pub fn resolve(text: &str, config: &ExtractorConfig) -> (String, HashMap<String, String>) {
    let mut metadata = HashMap::new();

    let residual = extract_labeled_fields(text, &mut metadata);
    let residual = extract_activity(&residual, config, &mut metadata);
    let residual = remove_stopwords(&residual, config);
    let cleaned = normalize(&residual);

    if cleaned.is_empty() || is_purely_numeric(&cleaned) {
        if !cleaned.is_empty() {
            metadata.insert(FALLBACK_KEY.to_string(), cleaned);
        }
        return (DEFAULT_TITLE.to_string(), metadata);
    }

    (capitalize(&cleaned), metadata)
}

/// Labeled fields run from their label to the next recognized label or the
/// end of the note, so everything from the first label onward is consumed.
fn extract_labeled_fields(text: &str, metadata: &mut HashMap<String, String>) -> String {
    let labels: Vec<(std::ops::Range<usize>, &str)> = LABEL_RE
        .captures_iter(text)
        .filter_map(|captures| {
            let whole = captures.get(0)?;
            let key = canonical_key(captures.get(1)?.as_str());
            Some((whole.range(), key))
        })
        .collect();

    if labels.is_empty() {
        return text.to_string();
    }

    for (index, (span, key)) in labels.iter().enumerate() {
        let value_end = labels
            .get(index + 1)
            .map_or(text.len(), |(next, _)| next.start);
        let value = unquote(text[span.end..value_end].trim());
        if !value.is_empty() {
            metadata.insert(key.to_string(), value.to_string());
        }
    }

    text[..labels[0].0.start].to_string()
}

fn extract_activity(
    text: &str,
    config: &ExtractorConfig,
    metadata: &mut HashMap<String, String>,
) -> String {
    for activity in config.activities {
        if let Some(span) = word_span(text, activity) {
            metadata.insert("activity".to_string(), activity.to_string());
            return strip_span(text, span);
        }
    }
    text.to_string()
}

fn remove_stopwords(text: &str, config: &ExtractorConfig) -> String {
    let mut out = text.to_string();
    for stopword in config.stopwords {
        while let Some(span) = word_span(&out, stopword) {
            out = strip_span(&out, span);
        }
    }
    out
}

fn canonical_key(label: &str) -> &'static str {
    match label {
        "catatan" | "note" | "notes" => "notes",
        "mood" => "mood",
        _ => "suggestion",
    }
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

/// Drops leftover punctuation and collapses whitespace.
fn normalize(text: &str) -> String {
    text.split_whitespace()
        .map(|token| token.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|token| !token.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_purely_numeric(text: &str) -> bool {
    text.chars()
        .all(|c| c.is_ascii_digit() || c.is_whitespace())
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::Tz;

    fn config() -> ExtractorConfig {
        ExtractorConfig::indonesian(Tz::Asia__Jakarta)
    }

    #[test]
    fn labeled_fields_are_split_on_the_next_label() {
        let (title, metadata) =
            resolve("beli kado catatan: jangan lupa bungkus mood: senang", &config());

        assert_eq!(title, "Beli kado");
        assert_eq!(metadata.get("notes").map(String::as_str), Some("jangan lupa bungkus"));
        assert_eq!(metadata.get("mood").map(String::as_str), Some("senang"));
    }

    #[test]
    fn quoted_values_lose_their_quotes() {
        let (_, metadata) = resolve("beli kado catatan: \"pakai pita merah\"", &config());

        assert_eq!(
            metadata.get("notes").map(String::as_str),
            Some("pakai pita merah")
        );
    }

    #[test]
    fn saran_maps_to_suggestion() {
        let (_, metadata) = resolve("olahraga saran: mulai pelan saja", &config());

        assert_eq!(
            metadata.get("suggestion").map(String::as_str),
            Some("mulai pelan saja")
        );
    }

    #[test]
    fn activity_keyword_is_tagged_and_stripped() {
        let (title, metadata) = resolve("olahraga lari keliling komplek", &config());

        assert_eq!(metadata.get("activity").map(String::as_str), Some("olahraga"));
        assert_eq!(title, "Lari keliling komplek");
    }

    #[test]
    fn stopwords_are_removed_before_titling() {
        let (title, metadata) = resolve("ingatkan saya untuk beli susu", &config());

        assert_eq!(title, "Beli susu");
        assert!(metadata.is_empty());
    }

    #[test]
    fn numeric_residue_falls_back_to_the_sentinel() {
        let (title, metadata) = resolve("0812 3456", &config());

        assert_eq!(title, DEFAULT_TITLE);
        assert_eq!(metadata.get(FALLBACK_KEY).map(String::as_str), Some("0812 3456"));
    }

    #[test]
    fn empty_residue_gets_the_sentinel_and_no_fallback() {
        let (title, metadata) = resolve("   ", &config());

        assert_eq!(title, DEFAULT_TITLE);
        assert!(metadata.is_empty());
    }
}
