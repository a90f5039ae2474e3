//! Global habitual configuration.

use std::path::{Path, PathBuf};

use ::config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::calendar_grid::FirstWeekday;
use crate::error::{HabitualError, HabitualResult};
use crate::theme::Theme;

static DEFAULT_EXPORT_PATH: &str = "~/calendar/habits";

fn default_export_dir() -> PathBuf {
    PathBuf::from(DEFAULT_EXPORT_PATH)
}

fn is_default_export_dir(p: &PathBuf) -> bool {
    *p == default_export_dir()
}

/// Configuration at ~/.config/habitual/config.toml
///
/// Any key can be overridden with a `HABITUAL_` environment variable,
/// e.g. `HABITUAL_THEME=ocean`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct HabitualConfig {
    #[serde(default)]
    pub theme: Theme,

    #[serde(default)]
    pub first_weekday: FirstWeekday,

    /// Where exported habit events are written
    #[serde(default = "default_export_dir", skip_serializing_if = "is_default_export_dir")]
    pub export_dir: PathBuf,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reminder_minutes: Option<i64>,
}

fn env_overrides() -> Environment {
    Environment::with_prefix("HABITUAL").try_parsing(true)
}

impl Default for HabitualConfig {
    fn default() -> Self {
        HabitualConfig {
            theme: Theme::default(),
            first_weekday: FirstWeekday::default(),
            export_dir: default_export_dir(),
            reminder_minutes: None,
        }
    }
}

impl HabitualConfig {
    pub fn config_path() -> HabitualResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| HabitualError::Config("Could not determine config directory".into()))?
            .join("habitual");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the config, writing a commented default file on first run.
    pub fn load() -> HabitualResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Load `path` with `HABITUAL_*` environment overrides applied.
    pub fn load_from(path: &Path) -> HabitualResult<Self> {
        Self::build(path, Some(env_overrides()))
    }

    /// Load only what is written in `path`.
    pub fn load_file(path: &Path) -> HabitualResult<Self> {
        Self::build(path, None)
    }

    fn build(path: &Path, env: Option<Environment>) -> HabitualResult<Self> {
        let mut builder = Config::builder().add_source(File::from(path).required(false));
        if let Some(env) = env {
            builder = builder.add_source(env);
        }

        builder
            .build()
            .map_err(|e| HabitualError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| HabitualError::Config(e.to_string()))
    }

    /// Change the config file at ~/.config/habitual/config.toml.
    pub fn update<F>(change: F) -> HabitualResult<Self>
    where
        F: FnOnce(&mut Self),
    {
        Self::update_file(&Self::config_path()?, change)
    }

    /// Rewrite `path` with `change` applied to its contents.
    ///
    /// Environment overrides of the current process are not written back.
    pub fn update_file<F>(path: &Path, change: F) -> HabitualResult<Self>
    where
        F: FnOnce(&mut Self),
    {
        let mut config = Self::load_file(path)?;
        change(&mut config);
        config.save_to(path)?;
        Ok(config)
    }

    /// Export directory with `~` expanded.
    pub fn export_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.export_dir.to_string_lossy()).into_owned();
        PathBuf::from(full_path_str)
    }

    pub fn save_to(&self, path: &Path) -> HabitualResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| HabitualError::Config(e.to_string()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)
            .map_err(|e| HabitualError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> HabitualResult<()> {
        let contents = format!(
            "\
# habitual configuration

# Color theme: light, dark, ocean or sunset
# theme = \"sunset\"

# First column of the calendar, 1 (Sunday) to 7 (Saturday)
# first_weekday = 1

# Where habits are exported as .ics files:
# export_dir = \"{}\"

# Add a reminder this many minutes before each exported habit:
# reminder_minutes = 10
",
            DEFAULT_EXPORT_PATH
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                HabitualError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| HabitualError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
