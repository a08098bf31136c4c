//! # smokefree Core Library
//!
//! Business logic for a personal quit-smoking tracker. Everything a front end
//! needs lives here; the CLI binary is a thin layer over the same library.
//!
//! ## Architecture
//!
//! - **Settings store**: the user's parameters and daily check-ins, persisted
//!   key by key on every mutation
//! - **Statistics**: pure functions deriving elapsed time, cigarettes not
//!   smoked, money saved and streaks
//! - **Calendar**: Sunday-first month grids flagging success days
//! - **Storage**: SQLite key-value table and TOML configuration
//!
//! ## Key Components
//!
//! - [`SettingsStore`]: owner of the persisted [`Settings`]
//! - [`DayKey`]: calendar-day identity used as the check-in key
//! - [`stats::compute`]: full [`Statistics`] snapshot
//! - [`calendar::month_grid`]: month view support

pub mod calendar;
pub mod day;
pub mod error;
pub mod settings;
pub mod stats;
pub mod storage;
pub mod store;

pub use calendar::{month_grid, CalendarDay, MonthGrid, YearMonth, WEEKDAY_HEADERS};
pub use day::DayKey;
pub use error::{ConfigError, CoreError, DatabaseError, Result, ValidationError};
pub use settings::Settings;
pub use stats::Statistics;
pub use storage::{Config, Database, KvStore, MemoryKv};
pub use store::{CheckIn, SettingsStore};
