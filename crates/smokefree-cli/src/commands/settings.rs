use chrono::{DateTime, Local, NaiveDate, Utc};
use clap::Subcommand;
use serde::Serialize;

use super::{open_store, CmdResult};

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Print current settings as JSON
    Show,
    /// Set the quit date ("now", YYYY-MM-DD for local midnight, or RFC 3339)
    SetQuitDate {
        /// New quit date
        when: String,
    },
    /// Set cigarettes smoked per day before quitting
    SetPerDay {
        count: u32,
    },
    /// Set the price of one pack
    SetPrice {
        price: f64,
    },
    /// Set the number of cigarettes in one pack
    SetPerPack {
        count: u32,
    },
    /// Forget all settings and check-ins
    Reset,
}

#[derive(Serialize)]
struct SettingsView<'a> {
    quit_date: String,
    cigarettes_per_day: u32,
    price_per_pack: f64,
    cigarettes_per_pack: u32,
    succeeded_dates: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    note: Option<&'a str>,
}

fn parse_quit_date(raw: &str) -> Result<DateTime<Utc>, Box<dyn std::error::Error>> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("now") {
        return Ok(Utc::now());
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| format!("cannot parse '{raw}' as a date"))?;
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .and_then(|dt| dt.and_local_timezone(Local).earliest())
        .ok_or_else(|| format!("'{raw}' has no local midnight"))?;
    Ok(midnight.with_timezone(&Utc))
}

pub fn run(action: SettingsAction) -> CmdResult {
    let mut store = open_store()?;

    match action {
        SettingsAction::Show => {
            let s = store.settings();
            let view = SettingsView {
                quit_date: s.quit_date.with_timezone(&Local).to_rfc3339(),
                cigarettes_per_day: s.cigarettes_per_day,
                price_per_pack: s.price_per_pack,
                cigarettes_per_pack: s.cigarettes_per_pack,
                succeeded_dates: s.succeeded_dates.iter().map(ToString::to_string).collect(),
                note: (s.quit_date > Utc::now()).then_some("quit date is in the future"),
            };
            println!("{}", serde_json::to_string_pretty(&view)?);
        }
        SettingsAction::SetQuitDate { when } => {
            store.set_quit_date(parse_quit_date(&when)?)?;
            println!("ok");
        }
        SettingsAction::SetPerDay { count } => {
            store.set_cigarettes_per_day(count)?;
            println!("ok");
        }
        SettingsAction::SetPrice { price } => {
            store.set_price_per_pack(price)?;
            println!("ok");
        }
        SettingsAction::SetPerPack { count } => {
            store.set_cigarettes_per_pack(count)?;
            println!("ok");
        }
        SettingsAction::Reset => {
            store.reset()?;
            println!("settings reset to defaults");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rfc3339() {
        let dt = parse_quit_date("2024-01-01T08:00:00+09:00").unwrap();
        assert_eq!(dt.to_rfc3339(), "2023-12-31T23:00:00+00:00");
    }

    #[test]
    fn parses_plain_date_as_local_midnight() {
        let dt = parse_quit_date("2024-01-01").unwrap();
        assert_eq!(dt.with_timezone(&Local).date_naive(), NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_quit_date("last tuesday").is_err());
    }
}
