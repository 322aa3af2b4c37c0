use chrono_tz::Tz;

use super::locale::ExtractorConfig;
use super::text::{strip_span, word_span};

/// Detects an explicit timezone abbreviation in the note. First table entry
/// that matches as a whole word wins and its span is removed, so later
/// resolvers never see the token.
pub fn resolve(text: &str, config: &ExtractorConfig) -> (Option<Tz>, String) {
    for (abbreviation, zone) in config.zone_abbreviations {
        if let Some(span) = word_span(text, abbreviation) {
            return (Some(*zone), strip_span(text, span));
        }
    }

    (None, text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ExtractorConfig {
        ExtractorConfig::indonesian(Tz::Asia__Jakarta)
    }

    #[test]
    fn detects_wib_and_strips_the_token() {
        let (zone, rest) = resolve("meeting jam 3 sore wib", &config());

        assert_eq!(zone, Some(Tz::Asia__Jakarta));
        assert_eq!(rest, "meeting jam 3 sore");
    }

    #[test]
    fn detects_foreign_zone_abbreviation() {
        let (zone, rest) = resolve("call at 9am est tomorrow", &config());

        assert_eq!(zone, Some(Tz::America__New_York));
        assert_eq!(rest, "call at 9am tomorrow");
    }

    #[test]
    fn ignores_abbreviation_embedded_in_a_word() {
        let (zone, rest) = resolve("kirim westimate besok", &config());

        assert_eq!(zone, None);
        assert_eq!(rest, "kirim westimate besok");
    }

    #[test]
    fn no_match_leaves_text_untouched() {
        let (zone, rest) = resolve("beli susu besok", &config());

        assert_eq!(zone, None);
        assert_eq!(rest, "beli susu besok");
    }
}
