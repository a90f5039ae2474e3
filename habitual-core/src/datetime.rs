//! Date and time helpers shared by the calendar and habit entry.

use chrono::{DateTime, NaiveDateTime, NaiveTime, TimeZone, Timelike};

use crate::error::{HabitualError, HabitualResult};

/// Combine the calendar date of `date` with the hour and minute of `time`.
///
/// The result is resolved in `date`'s time zone. Ambiguous local times take
/// the earlier instant. A local time that does not exist (skipped by a DST
/// transition) falls back to returning `date` unchanged, so callers must
/// treat the merge as best effort.
pub fn merge_date_and_time<Tz: TimeZone>(date: &DateTime<Tz>, time: &DateTime<Tz>) -> DateTime<Tz> {
    let Some(clock) = NaiveTime::from_hms_opt(time.hour(), time.minute(), 0) else {
        return date.clone();
    };
    resolve_local(date, date.date_naive().and_time(clock))
}

/// `date` truncated to midnight, or `date` itself if midnight does not exist
/// in its time zone that day.
pub fn start_of_day<Tz: TimeZone>(date: &DateTime<Tz>) -> DateTime<Tz> {
    resolve_local(date, date.date_naive().and_time(NaiveTime::MIN))
}

fn resolve_local<Tz: TimeZone>(fallback: &DateTime<Tz>, naive: NaiveDateTime) -> DateTime<Tz> {
    match fallback.timezone().from_local_datetime(&naive).earliest() {
        Some(resolved) => resolved,
        None => {
            tracing::debug!(%naive, "local time does not exist, keeping original date");
            fallback.clone()
        }
    }
}

/// Parse a time of day: "7:30", "07:30", "7am", "7:30 pm", "noon", "midnight".
pub fn parse_time_of_day(input: &str) -> HabitualResult<NaiveTime> {
    let invalid = || HabitualError::InvalidTime(input.to_string());
    let lower = input.trim().to_lowercase();

    match lower.as_str() {
        "noon" => return Ok(NaiveTime::from_hms_opt(12, 0, 0).unwrap_or(NaiveTime::MIN)),
        "midnight" => return Ok(NaiveTime::MIN),
        _ => {}
    }

    let (body, pm) = if let Some(body) = lower.strip_suffix("am") {
        (body.trim(), Some(false))
    } else if let Some(body) = lower.strip_suffix("pm") {
        (body.trim(), Some(true))
    } else {
        (lower.as_str(), None)
    };

    let (hour, minute) = match body.split_once(':') {
        Some((h, m)) => (h.parse::<u32>().ok(), m.parse::<u32>().ok()),
        None => (body.parse::<u32>().ok(), Some(0)),
    };
    let (Some(hour), Some(minute)) = (hour, minute) else {
        return Err(invalid());
    };

    let hour = match pm {
        None => hour,
        Some(_) if hour == 0 || hour > 12 => return Err(invalid()),
        Some(pm) => hour % 12 + if pm { 12 } else { 0 },
    };

    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(invalid)
}
