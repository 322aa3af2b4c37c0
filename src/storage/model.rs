use std::collections::HashMap;

use chrono::DateTime;
use chrono_tz::Tz;

use crate::reminder::{ParsedSchedule, ReminderId, RepeatRule};

#[derive(Debug, Clone)]
pub struct NewReminder {
    pub title: String,
    pub due_at: DateTime<Tz>,
    pub repeat: RepeatRule,
    pub metadata: HashMap<String, String>,
}

impl From<ParsedSchedule> for NewReminder {
    fn from(schedule: ParsedSchedule) -> Self {
        NewReminder {
            title: schedule.title,
            due_at: schedule.scheduled_at,
            repeat: schedule.repeat,
            metadata: schedule.metadata,
        }
    }
}

/// Partial update; `None` fields keep their stored value.
#[derive(Debug, Clone)]
pub struct UpdateReminder {
    pub id: ReminderId,
    pub due_at: Option<DateTime<Tz>>,
    pub notified: Option<bool>,
}
