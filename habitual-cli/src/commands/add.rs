use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use dialoguer::Input;
use habitual_core::HabitualError;
use habitual_core::datetime::{merge_date_and_time, parse_time_of_day};
use habitual_core::export::{ExportOutcome, HabitEvent, IcsDirectory, export_habit};
use owo_colors::OwoColorize;

use crate::parse::{parse_day, parse_duration};
use crate::render::{Painter, Render};
use crate::session::Session;

const NOON: NaiveTime = match NaiveTime::from_hms_opt(12, 0, 0) {
    Some(t) => t,
    None => NaiveTime::MIN,
};

pub struct AddArgs {
    pub title: Option<String>,
    pub on: Option<String>,
    pub at: Option<String>,
    pub duration: Option<String>,
    pub export: bool,
}

pub fn run(mut session: Session, args: AddArgs) -> Result<()> {
    let painter = Painter::new(session.state.theme());
    let interactive = args.title.is_none();

    // --- Day ---
    let day = match args.on {
        Some(s) => parse_day(&s)?,
        None if interactive => prompt_with_retry("  Which day? (today)", |input| {
            if input.is_empty() {
                Ok(session.today)
            } else {
                parse_day(input)
            }
        })?,
        None => session.today,
    };

    // --- Time ---
    let time = match args.at {
        Some(s) => Some(parse_time_of_day(&s)?),
        None if interactive => prompt_with_retry("  What time? (now)", |input| {
            if input.is_empty() {
                Ok(None)
            } else {
                Ok(Some(parse_time_of_day(input)?))
            }
        })?,
        None => None,
    };

    let duration = match args.duration {
        Some(s) => parse_duration(&s)?,
        None => Duration::hours(1),
    };

    let date = schedule(day, time, Local::now())?;

    // --- Title ---
    let habit = match args.title {
        Some(title) => session.habits.add(&title, Some(date))?.clone(),
        None => loop {
            let title: String = Input::new()
                .with_prompt("  Habit title")
                .allow_empty(true)
                .interact_text()?;
            match session.habits.add(&title, Some(date)) {
                Ok(habit) => break habit.clone(),
                Err(HabitualError::Validation(msg)) => eprintln!("  {}", msg.red()),
                Err(e) => return Err(e.into()),
            }
        },
    };

    if interactive {
        println!();
    }
    println!("{}", format!("  Added: {}", habit.title).green());
    println!("  {}", habit.render(&painter));

    if !args.export {
        return Ok(());
    }

    let event = match HabitEvent::for_habit(&habit, duration) {
        Ok(event) => event,
        Err(e) => {
            eprintln!("  {}", format!("Could not export habit: {}", e).yellow());
            return Ok(());
        }
    };
    let sink = IcsDirectory::new(session.config.export_path())
        .with_reminder(session.config.reminder_minutes);

    match export_habit(&sink, &event) {
        ExportOutcome::Saved(path) => {
            println!("  {}", format!("Saved to calendar: {}", path.display()).dimmed())
        }
        ExportOutcome::Denied => {
            eprintln!("  {}", "Calendar access denied, habit kept but not exported".yellow())
        }
        ExportOutcome::Failed(reason) => {
            eprintln!("  {}", format!("Could not export habit: {}", reason).yellow())
        }
    }

    Ok(())
}

/// Prompt the user with retry on parse errors.
fn prompt_with_retry<T, F>(prompt: &str, parse: F) -> Result<T>
where
    F: Fn(&str) -> Result<T>,
{
    loop {
        let input: String = Input::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?;
        match parse(input.trim()) {
            Ok(result) => return Ok(result),
            Err(e) => {
                eprintln!("  {}", e.to_string().red());
            }
        }
    }
}

/// Resolve the picked day and time of day into the habit's local date.
///
/// Without a time the habit keeps the current time of day, like a date
/// picker that starts at "now". A time skipped by the clocks changing keeps
/// the day at noon.
fn schedule<Tz: TimeZone>(
    day: NaiveDate,
    time: Option<NaiveTime>,
    now: DateTime<Tz>,
) -> Result<NaiveDateTime> {
    let tz = now.timezone();
    let date = local_at(&tz, day, NOON)?;
    let clock = match time {
        Some(t) => match local_at(&tz, day, t) {
            Ok(clock) => clock,
            Err(_) => {
                tracing::debug!(%day, time = %t, "local time does not exist, keeping original date");
                date.clone()
            }
        },
        None => now,
    };

    Ok(merge_date_and_time(&date, &clock).naive_local())
}

fn local_at<Tz: TimeZone>(tz: &Tz, day: NaiveDate, time: NaiveTime) -> Result<DateTime<Tz>> {
    tz.from_local_datetime(&day.and_time(time))
        .earliest()
        .with_context(|| format!("{} {} does not exist in the local time zone", day, time))
}
