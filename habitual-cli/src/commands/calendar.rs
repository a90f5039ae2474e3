use anyhow::{Context, Result};
use habitual_core::{FirstWeekday, MonthGrid};
use owo_colors::OwoColorize;

use crate::parse::{parse_day, parse_month};
use crate::render::{Painter, Render};
use crate::session::Session;

pub fn run(
    session: &Session,
    month: Option<&str>,
    first_weekday: Option<&str>,
    select: Option<&str>,
) -> Result<()> {
    let painter = Painter::new(session.state.theme());

    let first_weekday = match first_weekday {
        Some(s) => s.parse::<FirstWeekday>().context("Invalid --first-weekday")?,
        None => session.config.first_weekday,
    };
    let selected = match select {
        Some(s) => parse_day(s)?,
        None => session.today,
    };
    let reference = match month {
        Some(m) => parse_month(m)?,
        None => selected,
    };

    let grid = MonthGrid::new(reference, first_weekday, session.today, selected);
    println!("{}", grid.render(&painter));
    println!();

    println!(
        "{}",
        painter.title(&format!("Habits for {}:", selected.format("%a %b %-d")))
    );
    let habits = session.habits.on_day(selected);
    if habits.is_empty() {
        println!("  {}", "No habits for this day.".italic().dimmed());
    }
    for habit in habits {
        println!("  {}", habit.render(&painter));
    }

    Ok(())
}
