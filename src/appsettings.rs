use std::sync::OnceLock;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub struct ScheduleSettings {
    /// Canonical zone all reminders are stored and compared in.
    pub timezone: String,
    /// Hour assumed when a note carries no time.
    pub default_hour: u32,
    /// Seconds between due-check passes.
    pub check_interval_secs: u64,
}

#[derive(Deserialize, Debug)]
pub struct AppSettings {
    pub schedule: ScheduleSettings,
}

impl AppSettings {
    fn new() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("appsettings").required(true))
            .add_source(File::with_name("appsettings.local").required(false))
            .add_source(Environment::with_prefix("APP"))
            .build()?;

        settings.try_deserialize()
    }
}

pub fn get() -> &'static AppSettings {
    static APPSETTINGS: OnceLock<AppSettings> = OnceLock::new();
    APPSETTINGS.get_or_init(|| AppSettings::new().unwrap())
}
