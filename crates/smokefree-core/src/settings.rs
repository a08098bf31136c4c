//! User-configured parameters and the success-date set.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::day::DayKey;

pub const DEFAULT_CIGARETTES_PER_DAY: u32 = 20;
pub const DEFAULT_PRICE_PER_PACK: f64 = 600.0;
pub const DEFAULT_CIGARETTES_PER_PACK: u32 = 20;

/// Everything the statistics are derived from.
///
/// Counts are unsigned so they cannot go negative; the price is checked at
/// the store boundary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Settings {
    pub quit_date: DateTime<Utc>,
    pub cigarettes_per_day: u32,
    pub price_per_pack: f64,
    pub cigarettes_per_pack: u32,
    pub succeeded_dates: BTreeSet<DayKey>,
}

impl Settings {
    /// Defaults used on first run, with the quit date set to `now`.
    pub fn defaults_at(now: DateTime<Utc>) -> Self {
        Self {
            quit_date: now,
            cigarettes_per_day: DEFAULT_CIGARETTES_PER_DAY,
            price_per_pack: DEFAULT_PRICE_PER_PACK,
            cigarettes_per_pack: DEFAULT_CIGARETTES_PER_PACK,
            succeeded_dates: BTreeSet::new(),
        }
    }

    /// Price of a single cigarette, zero when either input is zero.
    pub fn price_per_cigarette(&self) -> f64 {
        if self.cigarettes_per_pack == 0 || self.price_per_pack <= 0.0 {
            0.0
        } else {
            self.price_per_pack / f64::from(self.cigarettes_per_pack)
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::defaults_at(Utc::now())
    }
}
