use std::collections::HashMap;

use async_trait::async_trait;
use chrono::DateTime;
use chrono_tz::Tz;
use tokio::sync::RwLock;

use crate::reminder::{Reminder, ReminderId};

use super::ReminderStorage;
use super::model::{NewReminder, UpdateReminder};

pub struct InMemoryReminderStorage {
    store: RwLock<(ReminderId, HashMap<ReminderId, Reminder>)>,
}

impl InMemoryReminderStorage {
    pub fn new() -> Self {
        InMemoryReminderStorage {
            store: RwLock::new((0, HashMap::new())),
        }
    }
}

impl Default for InMemoryReminderStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReminderStorage for InMemoryReminderStorage {
    async fn insert(&self, reminder: NewReminder) -> anyhow::Result<ReminderId> {
        let mut store = self.store.write().await;
        let current_id = store.0;
        let storage = &mut store.1;
        let reminder_insert = Reminder {
            id: current_id,
            title: reminder.title,
            due_at: reminder.due_at,
            repeat: reminder.repeat,
            metadata: reminder.metadata,
            notified: false,
        };

        storage.insert(current_id, reminder_insert);

        store.0 += 1;
        log::info!("Stored reminder with id {}", current_id);
        Ok(current_id)
    }

    async fn update(&self, update: UpdateReminder) -> anyhow::Result<ReminderId> {
        let mut store = self.store.write().await;
        let storage = &mut store.1;
        let id = update.id;
        if let Some(reminder) = storage.get_mut(&id) {
            reminder.due_at = update.due_at.unwrap_or(reminder.due_at);
            reminder.notified = update.notified.unwrap_or(reminder.notified);
            Ok(id)
        } else {
            anyhow::bail!("Does not exist");
        }
    }

    async fn get(&self, id: ReminderId) -> Option<Reminder> {
        let store = self.store.read().await;
        store.1.get(&id).cloned()
    }

    async fn get_all(&self) -> Vec<Reminder> {
        let store = self.store.read().await;
        store.1.values().cloned().collect()
    }

    async fn due(&self, now: DateTime<Tz>) -> Vec<Reminder> {
        let store = self.store.read().await;
        store
            .1
            .values()
            .filter(|reminder| !reminder.notified && reminder.due_at <= now)
            .cloned()
            .collect()
    }

    async fn delete(&self, id: ReminderId) -> anyhow::Result<()> {
        let mut store = self.store.write().await;
        if store.1.remove(&id).is_some() {
            Ok(())
        } else {
            anyhow::bail!("Does not exist");
        }
    }
}
