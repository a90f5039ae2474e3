pub mod add;
pub mod calendar;
pub mod config;
pub mod dashboard;
pub mod habits;
pub mod profile;
pub mod theme;
