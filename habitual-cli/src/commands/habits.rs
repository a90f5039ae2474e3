use anyhow::Result;
use owo_colors::OwoColorize;

use crate::render::{Painter, Render};
use crate::session::Session;

pub fn run(mut session: Session, toggle: Option<&str>) -> Result<()> {
    let painter = Painter::new(session.state.theme());

    if let Some(prefix) = toggle {
        let id = session
            .habits
            .find_by_prefix(prefix)
            .map(|h| h.id)
            .ok_or_else(|| anyhow::anyhow!("No single habit matches id '{}'", prefix))?;

        if let Some(done) = session.habits.toggle(id) {
            let verb = if done { "Completed" } else { "Reopened" };
            println!("{}", format!("  {}", verb).green());
            println!();
        }
    }

    println!("{}", painter.title("Habits"));

    if session.habits.is_empty() {
        println!("  {}", "No habits yet.".italic());
        return Ok(());
    }

    for habit in session.habits.habits() {
        println!("  {}", habit.render(&painter));
    }

    println!();
    println!(
        "  {}",
        format!(
            "{}/{} done",
            session.habits.completed_count(),
            session.habits.len()
        )
        .dimmed()
    );

    Ok(())
}
