use anyhow::Result;
use habitual_core::config::HabitualConfig;
use owo_colors::OwoColorize;

use crate::session::Session;

pub fn run(session: &Session) -> Result<()> {
    let config_path = HabitualConfig::config_path()?;
    let config = &session.config;

    println!("{}", "Paths".bold());
    println!("  Config:     {}", config_path.display());
    println!("  Exports:    {}", config.export_path().display());
    println!();
    println!("{}", "Settings".bold());
    println!("  Theme:          {}", config.theme);
    println!(
        "  First weekday:  {} ({})",
        config.first_weekday,
        config.first_weekday.number()
    );
    println!(
        "  Reminder:       {}",
        config
            .reminder_minutes
            .map(|m| format!("{} min before", m))
            .unwrap_or_else(|| "none".to_string())
    );

    Ok(())
}
