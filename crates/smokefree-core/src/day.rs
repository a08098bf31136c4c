//! Calendar-day identity.
//!
//! [`DayKey`] names a day by year, month and day with no time-of-day
//! component. It is the key type of the success-date set, so equality,
//! hashing and ordering are structural over `(year, month, day)`.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A calendar day, e.g. `2024-01-04`.
///
/// Serialized as `{"year": 2024, "month": 1, "day": 4}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawDay", into = "RawDay")]
pub struct DayKey {
    year: i32,
    month: u32,
    day: u32,
}

#[derive(Serialize, Deserialize)]
struct RawDay {
    year: i32,
    month: u32,
    day: u32,
}

impl TryFrom<RawDay> for DayKey {
    type Error = ValidationError;

    fn try_from(raw: RawDay) -> Result<Self, Self::Error> {
        DayKey::new(raw.year, raw.month, raw.day)
    }
}

impl From<DayKey> for RawDay {
    fn from(day: DayKey) -> Self {
        RawDay {
            year: day.year,
            month: day.month,
            day: day.day,
        }
    }
}

impl DayKey {
    /// Build a day, rejecting combinations that are not on the calendar.
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self, ValidationError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self::from_date)
            .ok_or(ValidationError::InvalidDate { year, month, day })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
            day: date.day(),
        }
    }

    /// Today in the local time zone.
    pub fn today_local() -> Self {
        Self::from_date(Local::now().date_naive())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn to_date(&self) -> NaiveDate {
        // Fields are only ever set from a valid NaiveDate.
        NaiveDate::from_ymd_opt(self.year, self.month, self.day).unwrap_or_default()
    }

    /// The following day, `None` past the last representable date.
    pub fn succ(&self) -> Option<Self> {
        self.to_date().succ_opt().map(Self::from_date)
    }

    /// The preceding day, `None` before the first representable date.
    pub fn pred(&self) -> Option<Self> {
        self.to_date().pred_opt().map(Self::from_date)
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl FromStr for DayKey {
    type Err = ValidationError;

    /// Parse `YYYY-MM-DD`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Self::from_date)
            .map_err(|e| ValidationError::InvalidValue {
                field: "date".to_string(),
                message: format!("'{s}' is not YYYY-MM-DD: {e}"),
            })
    }
}

impl From<NaiveDate> for DayKey {
    fn from(date: NaiveDate) -> Self {
        Self::from_date(date)
    }
}
