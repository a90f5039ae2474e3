use anyhow::Result;
use habitual_core::Color;
use habitual_core::overview::{current_streak, greeting_for, sample_week, suggested_goal};
use owo_colors::OwoColorize;

use crate::render::{Painter, Render};
use crate::session::Session;

const TOP_HABITS: usize = 3;

pub fn run(session: &Session) -> Result<()> {
    let painter = Painter::new(session.state.theme());
    let habits = &session.habits;
    let week = sample_week();

    println!("  {}", greeting_for(session.today).italic());
    println!();

    println!("{}", painter.title("Today"));
    println!(
        "  {} {}/{} tasks",
        "Completed:".bold(),
        habits.completed_count(),
        habits.len()
    );
    println!(
        "  {} {}",
        "Streak:".bold(),
        current_streak(habits, session.today)
    );
    println!();

    println!("{}", painter.title("Weekly Overview"));
    for day in &week {
        println!("  {}", day.render(&painter));
    }
    println!();
    println!("  {}", "Based on your history,".italic());
    println!(
        "  {}",
        format!("try setting a goal for {} tasks per day.", suggested_goal(&week)).italic()
    );
    println!();

    println!("{}", painter.title("Today's Top 3"));
    for habit in habits.top(TOP_HABITS) {
        let color = if habit.is_complete { Color::GREEN } else { Color::GRAY };
        println!("  {}", painter.paint(&format!("▌ {}", habit.title), color));
    }
    println!();

    println!(
        "  {}   {}",
        painter.accent("habitual add"),
        "habitual calendar".dimmed()
    );

    Ok(())
}
