//! Habits and the in-memory habit store.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{HabitualError, HabitualResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    pub id: Uuid,
    pub title: String,
    pub is_complete: bool,
    /// When the habit is scheduled, if it is tied to a day
    pub date: Option<NaiveDateTime>,
}

impl Habit {
    pub fn new(title: impl Into<String>, date: Option<NaiveDateTime>) -> Self {
        Habit {
            id: Uuid::new_v4(),
            title: title.into(),
            is_complete: false,
            date,
        }
    }

    /// First 8 hex digits of the id, enough to pick a habit on the command line.
    pub fn short_id(&self) -> String {
        self.id.simple().to_string()[..8].to_string()
    }

    pub fn is_on(&self, day: NaiveDate) -> bool {
        self.date.is_some_and(|d| d.date() == day)
    }
}

/// Habits for the current session. Starts from the sample list on every
/// launch; nothing is persisted.
#[derive(Debug, Clone, Default)]
pub struct HabitStore {
    habits: Vec<Habit>,
}

impl HabitStore {
    pub fn new() -> Self {
        HabitStore::default()
    }

    pub fn sample() -> Self {
        let habit = |title: &str, is_complete| Habit {
            is_complete,
            ..Habit::new(title, None)
        };

        HabitStore {
            habits: vec![
                habit("30 minutes of cardio", true),
                habit("Read for 10 minutes", false),
                habit("Drink 8 glasses of water", true),
            ],
        }
    }

    pub fn habits(&self) -> &[Habit] {
        &self.habits
    }

    pub fn len(&self) -> usize {
        self.habits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.habits.is_empty()
    }

    pub fn completed_count(&self) -> usize {
        self.habits.iter().filter(|h| h.is_complete).count()
    }

    /// Add a habit. A blank title is rejected and the store is left unchanged.
    pub fn add(&mut self, title: &str, date: Option<NaiveDateTime>) -> HabitualResult<&Habit> {
        let title = title.trim();
        if title.is_empty() {
            return Err(HabitualError::Validation("Please enter a habit title.".into()));
        }

        self.habits.push(Habit::new(title, date));
        let added = &self.habits[self.habits.len() - 1];
        tracing::debug!(id = %added.id, title = %added.title, "habit added");
        Ok(added)
    }

    pub fn get(&self, id: Uuid) -> Option<&Habit> {
        self.habits.iter().find(|h| h.id == id)
    }

    /// Flip completion, returning the new state.
    pub fn toggle(&mut self, id: Uuid) -> Option<bool> {
        let habit = self.habits.iter_mut().find(|h| h.id == id)?;
        habit.is_complete = !habit.is_complete;
        Some(habit.is_complete)
    }

    /// Look a habit up by the start of its id. Ambiguous prefixes match nothing.
    pub fn find_by_prefix(&self, prefix: &str) -> Option<&Habit> {
        let prefix = prefix.trim().to_lowercase();
        if prefix.is_empty() {
            return None;
        }

        let mut matches = self
            .habits
            .iter()
            .filter(|h| h.id.simple().to_string().starts_with(&prefix));

        match (matches.next(), matches.next()) {
            (Some(habit), None) => Some(habit),
            _ => None,
        }
    }

    /// Habits scheduled on `day`, in insertion order.
    pub fn on_day(&self, day: NaiveDate) -> Vec<&Habit> {
        self.habits.iter().filter(|h| h.is_on(day)).collect()
    }

    /// The first `n` habits, as shown in the dashboard's top list.
    pub fn top(&self, n: usize) -> &[Habit] {
        &self.habits[..n.min(self.habits.len())]
    }
}
