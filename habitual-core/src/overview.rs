//! Numbers behind the dashboard: weekly tallies, goal and streak.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::habit::HabitStore;

/// Bars are drawn relative to this many tasks.
pub const BAR_SCALE: u32 = 5;

const GREETINGS: [&str; 3] = [
    "Hello! Ready to tackle the day?",
    "You're doing great, keep going!",
    "So proud of you, keep it up.",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayTally {
    pub label: String,
    pub tasks_done: u32,
}

impl DayTally {
    pub fn new(label: impl Into<String>, tasks_done: u32) -> Self {
        DayTally {
            label: label.into(),
            tasks_done,
        }
    }

    /// Height of this day's bar as a fraction of `scale`, clamped to 0..=1.
    pub fn bar_fraction(&self, scale: u32) -> f64 {
        if scale == 0 {
            return 0.0;
        }
        (self.tasks_done as f64 / scale as f64).clamp(0.0, 1.0)
    }
}

/// Last week's sample history.
pub fn sample_week() -> Vec<DayTally> {
    [("Sun", 5), ("Mon", 4), ("Tue", 4), ("Wed", 2), ("Thu", 3), ("Fri", 2), ("Sat", 1)]
        .into_iter()
        .map(|(label, done)| DayTally::new(label, done))
        .collect()
}

pub fn average_tasks(week: &[DayTally]) -> f64 {
    if week.is_empty() {
        return 0.0;
    }
    let total: u32 = week.iter().map(|d| d.tasks_done).sum();
    total as f64 / week.len() as f64
}

/// Daily goal suggested from history: the average, rounded down.
pub fn suggested_goal(week: &[DayTally]) -> u32 {
    average_tasks(week).trunc() as u32
}

/// Encouragement for the dashboard header, stable for a given day.
pub fn greeting_for(date: NaiveDate) -> &'static str {
    GREETINGS[date.ordinal0() as usize % GREETINGS.len()]
}

/// Consecutive days, ending today, with at least one completed habit.
///
/// A day with nothing done yet does not break the streak until it is over,
/// so counting starts from yesterday when today has no completions.
pub fn current_streak(store: &HabitStore, today: NaiveDate) -> u32 {
    let done_on = |day: NaiveDate| store.on_day(day).iter().any(|h| h.is_complete);

    let start = if done_on(today) { Some(today) } else { today.pred_opt() };

    std::iter::successors(start, |d| d.pred_opt())
        .take_while(|d| done_on(*d))
        .count() as u32
}
