use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use tokio::task::{self, JoinHandle};
use tokio_util::sync::CancellationToken;

use super::advance::next_occurrence;
use crate::storage::ReminderStorage;
use crate::storage::model::UpdateReminder;

/// Periodic due-check: wakes on a fixed interval, fires reminders whose due
/// time has passed, and advances recurring ones to their next future
/// occurrence in one pass.
pub struct DueCheckWorker {
    handle: JoinHandle<()>,
    cancellation_token: CancellationToken,
}

impl DueCheckWorker {
    pub fn spawn(storage: Arc<dyn ReminderStorage>, zone: Tz, interval: Duration) -> Self {
        let cancellation_token = CancellationToken::new();
        let task_token = cancellation_token.child_token();

        let handle = task::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                tokio::select! {
                    _ = task_token.cancelled() => {
                        log::info!("Due-check worker shutting down");
                        break;
                    }
                    _ = ticker.tick() => {
                        let now = Utc::now().with_timezone(&zone);
                        check_due(storage.as_ref(), now).await;
                    }
                }
            }
        });

        Self {
            handle,
            cancellation_token,
        }
    }

    pub async fn stop(self) {
        self.cancellation_token.cancel();
        let _ = self.handle.await;
    }
}

async fn check_due(storage: &dyn ReminderStorage, now: DateTime<Tz>) {
    for reminder in storage.due(now).await {
        log::info!(
            "Reminder {} \"{}\" is due (scheduled at {})",
            reminder.id,
            reminder.title,
            reminder.due_at
        );

        let update = if reminder.repeat.is_recurring() {
            match next_occurrence(reminder.due_at, &reminder.repeat, now) {
                Ok(next_due) => {
                    log::info!("Rescheduling reminder {} to {}", reminder.id, next_due);
                    UpdateReminder {
                        id: reminder.id,
                        due_at: Some(next_due),
                        notified: Some(false),
                    }
                }
                Err(error) => {
                    log::warn!("Cannot advance reminder {}: {}", reminder.id, error);
                    continue;
                }
            }
        } else {
            UpdateReminder {
                id: reminder.id,
                due_at: None,
                notified: Some(true),
            }
        };

        if let Err(error) = storage.update(update).await {
            log::warn!("Failed to update reminder {}: {}", reminder.id, error);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use chrono::TimeZone;

    use crate::reminder::RepeatRule;
    use crate::storage::model::NewReminder;
    use crate::storage::reminder_storage::InMemoryReminderStorage;

    fn jakarta(y: i32, mo: u32, d: u32, h: u32) -> DateTime<Tz> {
        Tz::Asia__Jakarta.with_ymd_and_hms(y, mo, d, h, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn one_shot_reminder_is_marked_notified() {
        let storage = InMemoryReminderStorage::new();
        let now = jakarta(2025, 1, 15, 8);

        let id = storage
            .insert(NewReminder {
                title: "Beli susu".to_string(),
                due_at: jakarta(2025, 1, 15, 7),
                repeat: RepeatRule::None,
                metadata: HashMap::new(),
            })
            .await
            .unwrap();

        check_due(&storage, now).await;

        let reminder = storage.get(id).await.unwrap();
        assert!(reminder.notified);
        assert_eq!(reminder.due_at, jakarta(2025, 1, 15, 7));
    }

    #[tokio::test]
    async fn recurring_reminder_is_advanced_past_now() {
        let storage = InMemoryReminderStorage::new();
        let now = jakarta(2025, 1, 15, 8);

        let id = storage
            .insert(NewReminder {
                title: "Minum vitamin".to_string(),
                due_at: jakarta(2025, 1, 1, 9),
                repeat: RepeatRule::Daily,
                metadata: HashMap::new(),
            })
            .await
            .unwrap();

        check_due(&storage, now).await;

        let reminder = storage.get(id).await.unwrap();
        assert!(!reminder.notified);
        assert_eq!(reminder.due_at, jakarta(2025, 1, 15, 9));
    }
}
