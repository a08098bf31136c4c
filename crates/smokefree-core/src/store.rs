//! Persisted settings store.
//!
//! [`SettingsStore`] owns the single [`Settings`] value and the backend it is
//! persisted to. Every mutation writes its key first and only then updates
//! the in-memory value, so a failed write leaves both sides unchanged.
//!
//! ## Persisted layout
//!
//! ```text
//! quitDateKey           RFC 3339 timestamp
//! cigarettesPerDayKey   decimal integer
//! pricePerPackKey       decimal number
//! cigarettesPerPackKey  decimal integer
//! succeededDatesKey     JSON array of {"year","month","day"} records
//! ```

use std::collections::BTreeSet;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::day::DayKey;
use crate::error::{Result, ValidationError};
use crate::settings::Settings;
use crate::storage::KvStore;

pub const QUIT_DATE_KEY: &str = "quitDateKey";
pub const CIGARETTES_PER_DAY_KEY: &str = "cigarettesPerDayKey";
pub const PRICE_PER_PACK_KEY: &str = "pricePerPackKey";
pub const CIGARETTES_PER_PACK_KEY: &str = "cigarettesPerPackKey";
pub const SUCCEEDED_DATES_KEY: &str = "succeededDatesKey";

const ALL_KEYS: [&str; 5] = [
    QUIT_DATE_KEY,
    CIGARETTES_PER_DAY_KEY,
    PRICE_PER_PACK_KEY,
    CIGARETTES_PER_PACK_KEY,
    SUCCEEDED_DATES_KEY,
];

/// Result of a check-in attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckIn {
    /// The day was added to the success set.
    Recorded,
    /// The day was already in the set; nothing changed.
    AlreadyCheckedIn,
}

/// Serialize a success-date set in its persisted form.
pub fn encode_dates(dates: &BTreeSet<DayKey>) -> Result<String> {
    Ok(serde_json::to_string(dates)?)
}

/// Parse the persisted form of a success-date set. Duplicate records
/// collapse into one.
pub fn decode_dates(json: &str) -> Result<BTreeSet<DayKey>> {
    let days: Vec<DayKey> = serde_json::from_str(json)?;
    Ok(days.into_iter().collect())
}

/// Owner of the persisted [`Settings`].
pub struct SettingsStore<K: KvStore> {
    kv: K,
    settings: Settings,
}

impl<K: KvStore> SettingsStore<K> {
    /// Load from `kv`, defaulting any field that is missing or unreadable.
    ///
    /// `now` is the quit date used when none is stored.
    ///
    /// # Errors
    /// Returns an error only if the backend itself fails to read.
    pub fn load_at(kv: K, now: DateTime<Utc>) -> Result<Self> {
        let defaults = Settings::defaults_at(now);

        let quit_date = read_field(&kv, QUIT_DATE_KEY, defaults.quit_date, |raw| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|d| d.with_timezone(&Utc))
        })?;
        let cigarettes_per_day = read_field(
            &kv,
            CIGARETTES_PER_DAY_KEY,
            defaults.cigarettes_per_day,
            parse_count,
        )?;
        let price_per_pack =
            read_field(&kv, PRICE_PER_PACK_KEY, defaults.price_per_pack, |raw| {
                f64::from_str(raw.trim())
                    .ok()
                    .filter(|p| p.is_finite() && *p >= 0.0)
            })?;
        let cigarettes_per_pack = read_field(
            &kv,
            CIGARETTES_PER_PACK_KEY,
            defaults.cigarettes_per_pack,
            parse_count,
        )?;
        let succeeded_dates = read_field(
            &kv,
            SUCCEEDED_DATES_KEY,
            defaults.succeeded_dates,
            |raw| decode_dates(raw).ok(),
        )?;

        Ok(Self {
            kv,
            settings: Settings {
                quit_date,
                cigarettes_per_day,
                price_per_pack,
                cigarettes_per_pack,
                succeeded_dates,
            },
        })
    }

    /// Load with the current time as the fallback quit date.
    pub fn load(kv: K) -> Result<Self> {
        Self::load_at(kv, Utc::now())
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn quit_date(&self) -> DateTime<Utc> {
        self.settings.quit_date
    }

    pub fn cigarettes_per_day(&self) -> u32 {
        self.settings.cigarettes_per_day
    }

    pub fn price_per_pack(&self) -> f64 {
        self.settings.price_per_pack
    }

    pub fn cigarettes_per_pack(&self) -> u32 {
        self.settings.cigarettes_per_pack
    }

    pub fn succeeded_dates(&self) -> &BTreeSet<DayKey> {
        &self.settings.succeeded_dates
    }

    pub fn is_checked_in(&self, day: DayKey) -> bool {
        self.settings.succeeded_dates.contains(&day)
    }

    /// The backend, for callers that share it with other state.
    pub fn kv(&self) -> &K {
        &self.kv
    }

    pub fn set_quit_date(&mut self, quit_date: DateTime<Utc>) -> Result<()> {
        self.write(QUIT_DATE_KEY, &quit_date.to_rfc3339())?;
        self.settings.quit_date = quit_date;
        Ok(())
    }

    pub fn set_cigarettes_per_day(&mut self, count: u32) -> Result<()> {
        self.write(CIGARETTES_PER_DAY_KEY, &count.to_string())?;
        self.settings.cigarettes_per_day = count;
        Ok(())
    }

    /// # Errors
    /// Rejects negative, NaN and infinite prices.
    pub fn set_price_per_pack(&mut self, price: f64) -> Result<()> {
        if !price.is_finite() || price < 0.0 {
            return Err(ValidationError::InvalidValue {
                field: "price_per_pack".to_string(),
                message: format!("must be a non-negative amount, got {price}"),
            }
            .into());
        }
        self.write(PRICE_PER_PACK_KEY, &price.to_string())?;
        self.settings.price_per_pack = price;
        Ok(())
    }

    pub fn set_cigarettes_per_pack(&mut self, count: u32) -> Result<()> {
        self.write(CIGARETTES_PER_PACK_KEY, &count.to_string())?;
        self.settings.cigarettes_per_pack = count;
        Ok(())
    }

    /// Mark `day` as smoke-free. Repeat calls for the same day are no-ops.
    ///
    /// # Errors
    /// Rejects days after `today` without writing.
    pub fn check_in(&mut self, day: DayKey, today: DayKey) -> Result<CheckIn> {
        if day > today {
            return Err(ValidationError::FutureDay { day, today }.into());
        }
        if self.settings.succeeded_dates.contains(&day) {
            tracing::debug!(%day, "already checked in");
            return Ok(CheckIn::AlreadyCheckedIn);
        }

        let mut next = self.settings.succeeded_dates.clone();
        next.insert(day);
        self.write(SUCCEEDED_DATES_KEY, &encode_dates(&next)?)?;
        self.settings.succeeded_dates = next;

        tracing::info!(%day, total = self.settings.succeeded_dates.len(), "checked in");
        Ok(CheckIn::Recorded)
    }

    /// Remove a check-in. Returns whether the day was present.
    pub fn undo_check_in(&mut self, day: DayKey) -> Result<bool> {
        if !self.settings.succeeded_dates.contains(&day) {
            return Ok(false);
        }

        let mut next = self.settings.succeeded_dates.clone();
        next.remove(&day);
        self.write(SUCCEEDED_DATES_KEY, &encode_dates(&next)?)?;
        self.settings.succeeded_dates = next;

        tracing::info!(%day, "check-in removed");
        Ok(true)
    }

    /// Drop every persisted key and return to first-run defaults.
    pub fn reset_at(&mut self, now: DateTime<Utc>) -> Result<()> {
        for key in ALL_KEYS {
            self.kv.remove(key)?;
        }
        self.settings = Settings::defaults_at(now);
        tracing::info!("settings reset to defaults");
        Ok(())
    }

    pub fn reset(&mut self) -> Result<()> {
        self.reset_at(Utc::now())
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        self.kv.set(key, value)?;
        tracing::debug!(key, value, "persisted setting");
        Ok(())
    }
}

fn parse_count(raw: &str) -> Option<u32> {
    u32::from_str(raw.trim()).ok()
}

fn read_field<K, T, F>(kv: &K, key: &str, default: T, parse: F) -> Result<T>
where
    K: KvStore,
    F: FnOnce(&str) -> Option<T>,
{
    let Some(raw) = kv.get(key)? else {
        return Ok(default);
    };
    match parse(&raw) {
        Some(value) => Ok(value),
        None => {
            tracing::warn!(key, raw = %raw, "unreadable stored value, using default");
            Ok(default)
        }
    }
}
