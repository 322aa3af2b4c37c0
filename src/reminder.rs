use std::collections::HashMap;

use chrono::{DateTime, Weekday};
use chrono_tz::Tz;

pub type ReminderId = u64;

/// Recurrence rule attached to a reminder. `interval` is measured in the
/// rule's own unit (months for `MonthlyInterval`, years for `Yearly`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepeatRule {
    None,
    Daily,
    Weekly { weekday: Weekday },
    WeeklyCustom { weekdays: Vec<Weekday> },
    MonthlyInterval { interval: u32 },
    Yearly { interval: u32 },
}

impl RepeatRule {
    pub fn is_recurring(&self) -> bool {
        !matches!(self, RepeatRule::None)
    }
}

/// Result of running the extraction pipeline over one text fragment.
/// Created fresh per call and handed to the caller, which typically turns
/// it into a stored [`Reminder`].
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedSchedule {
    pub title: String,
    pub scheduled_at: DateTime<Tz>,
    pub repeat: RepeatRule,
    pub metadata: HashMap<String, String>,
}

#[derive(Debug, Clone)]
pub struct Reminder {
    pub id: ReminderId,
    pub title: String,
    pub due_at: DateTime<Tz>,
    pub repeat: RepeatRule,
    pub metadata: HashMap<String, String>,
    pub notified: bool,
}
