//! Core types for habitual.
//!
//! This crate provides everything the front ends share:
//! - `calendar_grid` for laying out a month as a 7-column grid
//! - `app_state` for the observable theme and profile state
//! - `habit`, `overview` and `export` for habits, weekly stats and calendar files

pub mod app_state;
pub mod calendar_grid;
pub mod config;
pub mod datetime;
pub mod error;
pub mod export;
pub mod habit;
pub mod overview;
pub mod profile;
pub mod theme;

pub use app_state::{AppState, EditMode, StateChange, SubscriptionId};
pub use calendar_grid::{CalendarCell, FirstWeekday, MonthGrid};
pub use error::{HabitualError, HabitualResult};
pub use theme::{Color, Palette, Theme};
