mod appsettings;
mod extract;
mod reminder;
mod scheduling;
mod storage;

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use chrono_tz::Tz;
use tokio::io::{AsyncBufReadExt, BufReader};

use extract::locale::ExtractorConfig;
use scheduling::DueCheckWorker;
use storage::model::NewReminder;
use storage::reminder_storage::InMemoryReminderStorage;
use storage::ReminderStorage;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    pretty_env_logger::init();

    let settings = appsettings::get();
    let zone: Tz = settings
        .schedule
        .timezone
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid timezone {:?}", settings.schedule.timezone))?;

    let mut extractor_config = ExtractorConfig::indonesian(zone);
    extractor_config.default_hour = settings.schedule.default_hour;

    let storage: Arc<dyn ReminderStorage> = Arc::new(InMemoryReminderStorage::new());
    let worker = DueCheckWorker::spawn(
        Arc::clone(&storage),
        zone,
        Duration::from_secs(settings.schedule.check_interval_secs),
    );

    log::info!("Reading notes from stdin, one note per line");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            line = lines.next_line() => {
                match line? {
                    Some(note) => handle_note(&note, storage.as_ref(), &extractor_config).await,
                    None => break,
                }
            }
        }
    }

    worker.stop().await;
    Ok(())
}

async fn handle_note(note: &str, storage: &dyn ReminderStorage, config: &ExtractorConfig) {
    if note.trim().is_empty() {
        return;
    }

    // One "now" per note, so every line of a batch resolves relative
    // phrases against the same instant.
    let now = Utc::now().with_timezone(&config.zone);

    match extract::extract_all(note, now, config) {
        Ok(schedules) => {
            for schedule in schedules {
                let title = schedule.title.clone();
                let due_at = schedule.scheduled_at;
                match storage.insert(NewReminder::from(schedule)).await {
                    Ok(id) => log::info!("Scheduled reminder {id} \"{title}\" at {due_at}"),
                    Err(error) => log::warn!("Could not store reminder: {error}"),
                }
            }
        }
        Err(error) => log::warn!("Could not parse note: {error}"),
    }
}
