//! Derived statistics.
//!
//! Every function here is pure: callers pass the settings snapshot, the
//! wall-clock instant and the local calendar day explicitly.

use std::collections::BTreeSet;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::day::DayKey;
use crate::settings::Settings;

const SECS_PER_DAY: u64 = 24 * 60 * 60;

/// Snapshot of everything the dashboard shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statistics {
    /// Whole seconds since the quit date, zero if it lies in the future.
    pub elapsed_secs: u64,
    /// `elapsed_secs` as `"{d}d {h}h {m}m"`.
    pub elapsed_display: String,
    pub cigarettes_not_smoked: u64,
    pub money_saved: f64,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub total_check_ins: usize,
    /// The quit date is after `now`; elapsed, cigarettes and money are zero.
    pub quit_in_future: bool,
}

/// Time since `quit`, clamped to zero.
pub fn elapsed(quit: DateTime<Utc>, now: DateTime<Utc>) -> Duration {
    if now <= quit {
        Duration::zero()
    } else {
        now - quit
    }
}

/// `floor(elapsed_secs * per_day / 86400)`.
pub fn cigarettes_not_smoked(elapsed_secs: u64, cigarettes_per_day: u32) -> u64 {
    let total = u128::from(elapsed_secs) * u128::from(cigarettes_per_day) / u128::from(SECS_PER_DAY);
    u64::try_from(total).unwrap_or(u64::MAX)
}

/// Money not spent on `not_smoked` cigarettes. Zero when the price or the
/// pack size is zero.
pub fn money_saved(not_smoked: u64, price_per_pack: f64, cigarettes_per_pack: u32) -> f64 {
    if cigarettes_per_pack == 0 || !(price_per_pack > 0.0) {
        return 0.0;
    }
    not_smoked as f64 * (price_per_pack / f64::from(cigarettes_per_pack))
}

/// Consecutive success days ending today, or ending yesterday when today
/// has not been checked in yet.
pub fn current_streak(dates: &BTreeSet<DayKey>, today: DayKey) -> u32 {
    let mut cursor = if dates.contains(&today) {
        Some(today)
    } else {
        today.pred()
    };

    let mut streak = 0;
    while let Some(day) = cursor.filter(|d| dates.contains(d)) {
        streak += 1;
        cursor = day.pred();
    }
    streak
}

/// Longest run of consecutive days anywhere in the set.
pub fn longest_streak(dates: &BTreeSet<DayKey>) -> u32 {
    let mut best = 0;
    let mut run = 0;
    let mut prev: Option<DayKey> = None;

    for &day in dates {
        run = match prev {
            Some(p) if p.succ() == Some(day) => run + 1,
            _ => 1,
        };
        best = best.max(run);
        prev = Some(day);
    }
    best
}

/// Abbreviated day/hour/minute rendering, e.g. `"3d 4h 5m"`.
pub fn format_elapsed(elapsed_secs: u64) -> String {
    let days = elapsed_secs / SECS_PER_DAY;
    let hours = (elapsed_secs % SECS_PER_DAY) / 3600;
    let minutes = (elapsed_secs % 3600) / 60;
    format!("{days}d {hours}h {minutes}m")
}

/// Compute the full dashboard from a settings snapshot.
pub fn compute(settings: &Settings, now: DateTime<Utc>, today: DayKey) -> Statistics {
    let quit_in_future = settings.quit_date > now;
    let elapsed_secs = u64::try_from(elapsed(settings.quit_date, now).num_seconds()).unwrap_or(0);
    let not_smoked = cigarettes_not_smoked(elapsed_secs, settings.cigarettes_per_day);

    Statistics {
        elapsed_secs,
        elapsed_display: format_elapsed(elapsed_secs),
        cigarettes_not_smoked: not_smoked,
        money_saved: money_saved(
            not_smoked,
            settings.price_per_pack,
            settings.cigarettes_per_pack,
        ),
        current_streak: current_streak(&settings.succeeded_dates, today),
        longest_streak: longest_streak(&settings.succeeded_dates),
        total_check_ins: settings.succeeded_dates.len(),
        quit_in_future,
    }
}
