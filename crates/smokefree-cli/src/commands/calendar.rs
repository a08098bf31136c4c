use smokefree_core::{month_grid, DayKey, MonthGrid, YearMonth, WEEKDAY_HEADERS};

use super::{open_store, CmdResult};

/// Text month view. `*` marks a check-in, `<` marks today.
fn render(grid: &MonthGrid) -> String {
    let mut out = format!("{:^27}\n", grid.month.to_string());
    out.push_str(&WEEKDAY_HEADERS.join(" "));
    out.push('\n');

    for week in grid.weeks() {
        let row: Vec<String> = week
            .iter()
            .map(|cell| match cell {
                Some(d) => format!(
                    "{:>2}{}{}",
                    d.day.day(),
                    if d.succeeded { '*' } else { ' ' },
                    if d.is_today { '<' } else { ' ' },
                ),
                None => "    ".to_string(),
            })
            .collect();
        out.push_str(row.join("").trim_end());
        out.push('\n');
    }
    out
}

pub fn run(month: Option<&str>, json: bool) -> CmdResult {
    let today = DayKey::today_local();
    let month = match month {
        Some(raw) => raw.parse::<YearMonth>()?,
        None => YearMonth::of(today),
    };

    let store = open_store()?;
    let grid = month_grid(month, store.succeeded_dates(), today)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&grid)?);
    } else {
        print!("{}", render(&grid));
    }
    Ok(())
}
