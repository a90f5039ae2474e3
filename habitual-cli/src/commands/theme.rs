use anyhow::{Context, Result};
use habitual_core::config::HabitualConfig;
use habitual_core::{StateChange, Theme};
use owo_colors::OwoColorize;

use crate::render::{Painter, render_palette};
use crate::session::Session;

pub fn run(mut session: Session, name: Option<Theme>, save: bool) -> Result<()> {
    let Some(theme) = name else {
        list(&session);
        return Ok(());
    };

    session.state.subscribe(|change| {
        if let StateChange::ThemeChanged(theme) = change {
            let painter = Painter::new(*theme);
            println!("{}", painter.accent(&format!("  Theme changed to {}", theme)));
        }
    });

    if session.state.theme() == theme {
        println!("{}", format!("  Already using {}", theme).dimmed());
    }
    session.state.select_theme(theme);

    if save {
        HabitualConfig::update(|config| config.theme = theme).context("Could not save theme")?;
        session.config.theme = theme;
        println!("{}", "  Saved as default theme".green());
    }

    println!();
    list(&session);

    Ok(())
}

fn list(session: &Session) {
    let active = session.state.theme();
    let painter = Painter::new(active);

    println!("{}", painter.title("Themes"));
    for theme in Theme::ALL {
        println!("  {}", render_palette(theme, theme == active));
    }
    println!();
    println!(
        "  {}",
        "background card accent text icon gradient(2) titles edit bars".dimmed()
    );
}
