//! Everything a command needs for one run of the app.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use habitual_core::config::HabitualConfig;
use habitual_core::habit::HabitStore;
use habitual_core::{AppState, Theme};

pub struct Session {
    pub config: HabitualConfig,
    pub state: AppState,
    /// Starts from the sample habits on every launch
    pub habits: HabitStore,
    pub today: NaiveDate,
}

impl Session {
    pub fn start(theme_override: Option<Theme>) -> Result<Self> {
        let config = HabitualConfig::load().context("Could not load config")?;
        let today = Local::now().date_naive();

        let state = AppState::from_config(&config, today);
        if let Some(theme) = theme_override {
            state.select_theme(theme);
        }
        tracing::debug!(theme = %state.theme(), %today, "session started");

        Ok(Session {
            config,
            state,
            habits: HabitStore::sample(),
            today,
        })
    }
}
