//! Exporting habits to a calendar.
//!
//! A scheduled habit becomes a one-off event written as an .ics file into a
//! calendar directory. Exporting is best effort: a denied or failed export is
//! logged and reported to the caller, never turned into an error that would
//! block saving the habit.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{Duration, NaiveDateTime, Utc};
use icalendar::{Alarm, Calendar, Component, EventLike, Trigger};

use crate::error::{HabitualError, HabitualResult};
use crate::habit::Habit;

const ICS_DATETIME: &str = "%Y%m%dT%H%M%S";

/// A habit resolved into a calendar event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HabitEvent {
    pub uid: String,
    pub title: String,
    /// Floating local time
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl HabitEvent {
    /// Events need a non-empty title and a resolved date.
    pub fn for_habit(habit: &Habit, duration: Duration) -> HabitualResult<Self> {
        let title = habit.title.trim();
        if title.is_empty() {
            return Err(HabitualError::Validation("Please enter a habit title.".into()));
        }
        let start = habit.date.ok_or_else(|| {
            HabitualError::Validation(format!("'{}' has no date to export", title))
        })?;
        let end = start.checked_add_signed(duration).ok_or_else(|| {
            HabitualError::Validation(format!("'{}' is too long to schedule", title))
        })?;

        Ok(HabitEvent {
            uid: format!("{}@habitual", habit.id),
            title: title.to_string(),
            start,
            end,
        })
    }
}

/// Generate .ics content for a habit event.
pub fn generate_ics(event: &HabitEvent, reminder_minutes: Option<i64>) -> String {
    let mut cal = Calendar::new();

    let mut ics_event = icalendar::Event::new();
    ics_event.uid(&event.uid);
    ics_event.summary(&event.title);

    // DTSTAMP - required by RFC 5545
    let dtstamp = Utc::now().format("%Y%m%dT%H%M%SZ").to_string();
    ics_event.add_property("DTSTAMP", &dtstamp);

    ics_event.add_property("DTSTART", event.start.format(ICS_DATETIME).to_string());
    ics_event.add_property("DTEND", event.end.format(ICS_DATETIME).to_string());

    if let Some(minutes) = reminder_minutes {
        match Duration::try_minutes(minutes) {
            Some(lead) => {
                ics_event.alarm(Alarm::display(&event.title, Trigger::before_start(lead)));
            }
            None => tracing::warn!(minutes, "reminder out of range, exporting without alarm"),
        }
    }

    let ics_event = ics_event.done();
    cal.push(ics_event);
    let cal = cal.done();

    strip_ics_bloat(&cal.to_string())
}

/// Clean up ICS output from the icalendar crate
/// - Replace PRODID with HABITUAL
/// - Remove CALSCALE:GREGORIAN (it's the default)
/// - Remove DTSTAMP and UID inside VALARM sections (not required by RFC 5545)
fn strip_ics_bloat(ics: &str) -> String {
    let mut result = String::with_capacity(ics.len());
    let mut in_valarm = false;

    for line in ics.lines() {
        if line.starts_with("PRODID:") {
            result.push_str("PRODID:HABITUAL\r\n");
            continue;
        }

        if line == "CALSCALE:GREGORIAN" {
            continue;
        }

        if line == "BEGIN:VALARM" {
            in_valarm = true;
        } else if line == "END:VALARM" {
            in_valarm = false;
        }

        if in_valarm && (line.starts_with("DTSTAMP:") || line.starts_with("UID:")) {
            continue;
        }

        result.push_str(line);
        result.push_str("\r\n");
    }

    result
}

/// Somewhere habit events can be saved.
pub trait CalendarSink {
    /// Save the event, returning where it ended up.
    ///
    /// Refused access must be reported as `HabitualError::AccessDenied`.
    fn save(&self, event: &HabitEvent) -> HabitualResult<PathBuf>;
}

/// A directory of .ics files, one per event.
#[derive(Debug, Clone)]
pub struct IcsDirectory {
    path: PathBuf,
    reminder_minutes: Option<i64>,
}

impl IcsDirectory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        IcsDirectory {
            path: path.into(),
            reminder_minutes: None,
        }
    }

    pub fn with_reminder(mut self, minutes: Option<i64>) -> Self {
        self.reminder_minutes = minutes;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CalendarSink for IcsDirectory {
    fn save(&self, event: &HabitEvent) -> HabitualResult<PathBuf> {
        std::fs::create_dir_all(&self.path).map_err(|e| access_error(e, &self.path))?;

        let path = self.path.join(filename_for(event, &self.path)?);
        std::fs::write(&path, generate_ics(event, self.reminder_minutes))
            .map_err(|e| access_error(e, &path))?;

        Ok(path)
    }
}

fn access_error(err: std::io::Error, path: &Path) -> HabitualError {
    if err.kind() == ErrorKind::PermissionDenied {
        HabitualError::AccessDenied(path.display().to_string())
    } else {
        HabitualError::Io(err)
    }
}

/// Generate a unique filename for an event, handling collisions.
fn filename_for(event: &HabitEvent, dir: &Path) -> HabitualResult<String> {
    let stem = format!(
        "{}__{}",
        event.start.format("%Y-%m-%dT%H%M"),
        slug_for(&event.title)
    );

    let base = format!("{}.ics", stem);
    if !dir.join(&base).exists() {
        return Ok(base);
    }

    for n in 2..=100 {
        let suffixed = format!("{}-{}.ics", stem, n);
        if !dir.join(&suffixed).exists() {
            return Ok(suffixed);
        }
    }

    Err(HabitualError::Export(format!("Too many filename collisions for {}", base)))
}

fn slug_for(title: &str) -> String {
    let slug: String = slug::slugify(title).chars().take(50).collect();
    if slug.is_empty() { "habit".to_string() } else { slug }
}

/// How an export attempt ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Saved(PathBuf),
    Denied,
    Failed(String),
}

/// Try to save `event`. Never fails: problems are logged and returned as an outcome.
pub fn export_habit(sink: &dyn CalendarSink, event: &HabitEvent) -> ExportOutcome {
    match sink.save(event) {
        Ok(path) => {
            tracing::info!(title = %event.title, path = %path.display(), "habit exported to calendar");
            ExportOutcome::Saved(path)
        }
        Err(HabitualError::AccessDenied(detail)) => {
            tracing::warn!(title = %event.title, %detail, "calendar access denied, habit not exported");
            ExportOutcome::Denied
        }
        Err(e) => {
            tracing::warn!(title = %event.title, error = %e, "failed to export habit");
            ExportOutcome::Failed(e.to_string())
        }
    }
}
