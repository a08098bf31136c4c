//! Month grid for the check-in calendar.
//!
//! Weeks start on Sunday. Days before the 1st are padded with `None` so each
//! real day lands in its weekday column.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::day::DayKey;
use crate::error::ValidationError;

pub const WEEKDAY_HEADERS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// A month being displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    /// Rejects months outside 1..=12 and years outside the supported date range.
    pub fn new(year: i32, month: u32) -> Result<Self, ValidationError> {
        if !(1..=12).contains(&month) {
            return Err(ValidationError::InvalidMonth(month));
        }
        let ym = Self { year, month };
        ym.first_day()?;
        Ok(ym)
    }

    pub fn of(day: DayKey) -> Self {
        Self {
            year: day.year(),
            month: day.month(),
        }
    }

    /// The previous month, `None` before the first supported month.
    pub fn prev(self) -> Option<Self> {
        let (year, month) = if self.month == 1 {
            (self.year.checked_sub(1)?, 12)
        } else {
            (self.year, self.month - 1)
        };
        Self::new(year, month).ok()
    }

    /// The next month, `None` after the last supported month.
    pub fn next(self) -> Option<Self> {
        let (year, month) = if self.month == 12 {
            (self.year.checked_add(1)?, 1)
        } else {
            (self.year, self.month + 1)
        };
        Self::new(year, month).ok()
    }

    fn first_day(self) -> Result<NaiveDate, ValidationError> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).ok_or(ValidationError::InvalidDate {
            year: self.year,
            month: self.month,
            day: 1,
        })
    }

    /// Number of days in the month.
    pub fn num_days(self) -> Result<u32, ValidationError> {
        self.first_day()?;
        Ok((28..=31)
            .rev()
            .find(|&d| NaiveDate::from_ymd_opt(self.year, self.month, d).is_some())
            .unwrap_or(28))
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = ValidationError;

    /// Parse `YYYY-MM`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidValue {
            field: "month".to_string(),
            message: format!("'{s}' is not YYYY-MM"),
        };
        let (y, m) = s.trim().split_once('-').ok_or_else(invalid)?;
        let year = y.parse::<i32>().map_err(|_| invalid())?;
        let month = m.parse::<u32>().map_err(|_| invalid())?;
        Self::new(year, month)
    }
}

/// One real day in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDay {
    pub day: DayKey,
    pub succeeded: bool,
    pub is_today: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthGrid {
    pub month: YearMonth,
    /// Leading placeholders followed by every day of the month.
    pub cells: Vec<Option<CalendarDay>>,
}

impl MonthGrid {
    /// Cells grouped into Sunday-first rows; the last row may be short.
    pub fn weeks(&self) -> Vec<&[Option<CalendarDay>]> {
        self.cells.chunks(7).collect()
    }

    /// Number of leading placeholders.
    pub fn leading_blanks(&self) -> usize {
        self.cells.iter().take_while(|c| c.is_none()).count()
    }

    pub fn days(&self) -> impl Iterator<Item = &CalendarDay> {
        self.cells.iter().flatten()
    }
}

/// Build the grid for `month`, flagging success days and today.
pub fn month_grid(
    month: YearMonth,
    succeeded: &BTreeSet<DayKey>,
    today: DayKey,
) -> Result<MonthGrid, ValidationError> {
    let first = month.first_day()?;
    let blanks = first.weekday().num_days_from_sunday() as usize;
    let len = month.num_days()?;

    let mut cells: Vec<Option<CalendarDay>> = Vec::with_capacity(blanks + len as usize);
    cells.resize(blanks, None);

    for date in first.iter_days().take(len as usize) {
        let day = DayKey::from_date(date);
        cells.push(Some(CalendarDay {
            day,
            succeeded: succeeded.contains(&day),
            is_today: day == today,
        }));
    }

    Ok(MonthGrid { month, cells })
}
