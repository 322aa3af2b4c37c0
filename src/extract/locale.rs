use chrono::Weekday;
use chrono_tz::Tz;

/// All locale- and host-specific context the extraction pipeline needs.
/// Threaded explicitly into [`crate::extract::extract`] so that different
/// locales or zones can run side by side.
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    /// Zone all returned timestamps are resolved to.
    pub zone: Tz,
    /// Hour applied when a note carries no time at all.
    pub default_hour: u32,
    pub zone_abbreviations: &'static [(&'static str, Tz)],
    pub months: &'static [(&'static str, u32)],
    pub weekdays: &'static [(&'static str, Weekday)],
    /// Prayer anchors as (name, hour, minute).
    pub prayer_times: &'static [(&'static str, u32, u32)],
    pub stopwords: &'static [&'static str],
    pub activities: &'static [&'static str],
}

const ZONE_ABBREVIATIONS: &[(&str, Tz)] = &[
    ("wib", Tz::Asia__Jakarta),
    ("wita", Tz::Asia__Makassar),
    ("wit", Tz::Asia__Jayapura),
    ("est", Tz::America__New_York),
    ("pst", Tz::America__Los_Angeles),
    ("utc", Tz::UTC),
    ("gmt", Tz::UTC),
];

const MONTHS: &[(&str, u32)] = &[
    ("januari", 1),
    ("january", 1),
    ("februari", 2),
    ("february", 2),
    ("maret", 3),
    ("march", 3),
    ("april", 4),
    ("mei", 5),
    ("may", 5),
    ("juni", 6),
    ("june", 6),
    ("juli", 7),
    ("july", 7),
    ("agustus", 8),
    ("august", 8),
    ("september", 9),
    ("oktober", 10),
    ("october", 10),
    ("november", 11),
    ("desember", 12),
    ("december", 12),
];

const WEEKDAYS: &[(&str, Weekday)] = &[
    ("senin", Weekday::Mon),
    ("monday", Weekday::Mon),
    ("selasa", Weekday::Tue),
    ("tuesday", Weekday::Tue),
    ("rabu", Weekday::Wed),
    ("wednesday", Weekday::Wed),
    ("kamis", Weekday::Thu),
    ("thursday", Weekday::Thu),
    ("jumat", Weekday::Fri),
    ("jum'at", Weekday::Fri),
    ("friday", Weekday::Fri),
    ("sabtu", Weekday::Sat),
    ("saturday", Weekday::Sat),
    ("minggu", Weekday::Sun),
    ("ahad", Weekday::Sun),
    ("sunday", Weekday::Sun),
];

const PRAYER_TIMES: &[(&str, u32, u32)] = &[
    ("subuh", 4, 30),
    ("shubuh", 4, 30),
    ("dzuhur", 12, 0),
    ("zuhur", 12, 0),
    ("dhuhr", 12, 0),
    ("ashar", 15, 30),
    ("asar", 15, 30),
    ("maghrib", 18, 0),
    ("magrib", 18, 0),
    ("isya", 19, 30),
    ("isha", 19, 30),
];

// Phrases first so "ingatkan saya" is taken before the lone "saya".
const STOPWORDS: &[&str] = &[
    "ingatkan saya",
    "ingatkan aku",
    "remind me",
    "ingatkan",
    "ingetin",
    "tolong",
    "saya",
    "aku",
    "untuk",
    "agar",
    "supaya",
    "pada",
    "jam",
    "pukul",
    "tanggal",
    "nanti",
    "remind",
    "please",
    "me",
    "to",
    "at",
    "on",
    "the",
    "for",
];

const ACTIVITIES: &[&str] = &[
    "olahraga",
    "rapat",
    "meeting",
    "belajar",
    "kerja",
    "makan",
    "masak",
    "belanja",
    "gym",
];

impl ExtractorConfig {
    /// Default Indonesian tables with the given canonical zone.
    pub fn indonesian(zone: Tz) -> Self {
        ExtractorConfig {
            zone,
            default_hour: 9,
            zone_abbreviations: ZONE_ABBREVIATIONS,
            months: MONTHS,
            weekdays: WEEKDAYS,
            prayer_times: PRAYER_TIMES,
            stopwords: STOPWORDS,
            activities: ACTIVITIES,
        }
    }
}
