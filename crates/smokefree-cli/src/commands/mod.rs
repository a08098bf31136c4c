pub mod calendar;
pub mod checkin;
pub mod config;
pub mod settings;
pub mod status;

use smokefree_core::{Database, DayKey, SettingsStore};

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Open the on-disk store.
pub fn open_store() -> Result<SettingsStore<Database>, Box<dyn std::error::Error>> {
    let db = Database::open()?;
    Ok(SettingsStore::load(db)?)
}

/// Parse `--date`, defaulting to today in local time.
pub fn resolve_day(date: Option<&str>) -> Result<DayKey, Box<dyn std::error::Error>> {
    match date {
        Some(raw) => Ok(raw.parse::<DayKey>()?),
        None => Ok(DayKey::today_local()),
    }
}
