pub mod model;
pub mod reminder_storage;

use async_trait::async_trait;
use chrono::DateTime;
use chrono_tz::Tz;

use crate::reminder::{Reminder, ReminderId};
use model::{NewReminder, UpdateReminder};

/// Persistence boundary for reminders. Write serialization and the
/// `notified` bookkeeping live behind this trait, not in the extraction or
/// advancement code.
#[async_trait]
pub trait ReminderStorage: Send + Sync {
    async fn insert(&self, reminder: NewReminder) -> anyhow::Result<ReminderId>;
    async fn update(&self, update: UpdateReminder) -> anyhow::Result<ReminderId>;
    async fn get(&self, id: ReminderId) -> Option<Reminder>;
    async fn get_all(&self) -> Vec<Reminder>;
    /// Reminders whose due time has passed and which have not fired yet.
    async fn due(&self, now: DateTime<Tz>) -> Vec<Reminder>;
    async fn delete(&self, id: ReminderId) -> anyhow::Result<()>;
}
