use smokefree_core::{stats, CheckIn, DayKey};

use super::{open_store, resolve_day, CmdResult};

pub fn run(date: Option<&str>) -> CmdResult {
    let day = resolve_day(date)?;
    let mut store = open_store()?;

    match store.check_in(day, DayKey::today_local())? {
        CheckIn::Recorded => {
            let streak = stats::current_streak(store.succeeded_dates(), day);
            println!("Checked in for {day}. Well done! Streak: {streak} days");
        }
        CheckIn::AlreadyCheckedIn => {
            println!("Already checked in for {day}");
        }
    }
    Ok(())
}

pub fn undo(date: Option<&str>) -> CmdResult {
    let day = resolve_day(date)?;
    let mut store = open_store()?;

    if store.undo_check_in(day)? {
        println!("Removed check-in for {day}");
    } else {
        println!("No check-in for {day}");
    }
    Ok(())
}
