use std::io::Write;
use std::time::Duration;

use chrono::Utc;
use smokefree_core::{stats, Config, DayKey, Statistics};

use super::{open_store, CmdResult};

fn render(stats: &Statistics, config: &Config) -> String {
    let elapsed = if stats.quit_in_future {
        "cannot compute (quit date is in the future)".to_string()
    } else {
        stats.elapsed_display.clone()
    };

    format!(
        "Smoke-free for   {elapsed}\n\
         Not smoked       {}\n\
         Money saved      {}\n\
         Current streak   {} days (best {})\n\
         Check-ins        {}",
        stats.cigarettes_not_smoked,
        config.format_money(stats.money_saved),
        stats.current_streak,
        stats.longest_streak,
        stats.total_check_ins,
    )
}

fn render_line(stats: &Statistics, config: &Config) -> String {
    if stats.quit_in_future {
        return "quit date is in the future".to_string();
    }
    format!(
        "{} | {} not smoked | {} saved | streak {}",
        stats.elapsed_display,
        stats.cigarettes_not_smoked,
        config.format_money(stats.money_saved),
        stats.current_streak,
    )
}

pub fn run(json: bool) -> CmdResult {
    let config = Config::load_or_default();
    let store = open_store()?;
    let snapshot = stats::compute(store.settings(), Utc::now(), DayKey::today_local());

    if json || config.display.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        println!("{}", render(&snapshot, &config));
    }
    Ok(())
}

/// Recompute and print once per interval. Settings are read once; the
/// clock is read on every tick.
pub fn watch(interval: Option<u64>, count: Option<u64>) -> CmdResult {
    let config = Config::load_or_default();
    let store = open_store()?;
    let interval = Duration::from_secs(interval.unwrap_or(config.refresh.interval_secs).max(1));

    let mut ticks = 0u64;
    loop {
        let snapshot = stats::compute(store.settings(), Utc::now(), DayKey::today_local());
        println!("{}", render_line(&snapshot, &config));
        std::io::stdout().flush()?;

        ticks += 1;
        if count.is_some_and(|limit| ticks >= limit) {
            break;
        }
        std::thread::sleep(interval);
    }
    Ok(())
}
