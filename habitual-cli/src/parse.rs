//! Parsing of user-typed dates, months and durations.

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate};

/// Expand common abbreviations that fuzzydate doesn't handle.
fn expand_abbreviations(input: &str) -> String {
    let abbrevs = [
        ("mon", "monday"),
        ("tue", "tuesday"),
        ("tues", "tuesday"),
        ("wed", "wednesday"),
        ("thu", "thursday"),
        ("thur", "thursday"),
        ("thurs", "thursday"),
        ("fri", "friday"),
        ("sat", "saturday"),
        ("sun", "sunday"),
        ("jan", "january"),
        ("feb", "february"),
        ("mar", "march"),
        ("apr", "april"),
        ("jun", "june"),
        ("jul", "july"),
        ("aug", "august"),
        ("sep", "september"),
        ("sept", "september"),
        ("oct", "october"),
        ("nov", "november"),
        ("dec", "december"),
    ];

    lower_words(input)
        .map(|word| {
            abbrevs
                .iter()
                .find(|(abbr, _)| *abbr == word)
                .map(|(_, full)| (*full).to_string())
                .unwrap_or(word)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn lower_words(input: &str) -> impl Iterator<Item = String> + '_ {
    input.split_whitespace().map(str::to_lowercase)
}

/// Parse a day: ISO "2026-03-20" or natural language ("tomorrow", "next fri").
pub fn parse_day(input: &str) -> Result<NaiveDate> {
    let input = input.trim();
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(date);
    }

    let expanded = expand_abbreviations(input);
    fuzzydate::parse(&expanded)
        .map(|dt| dt.date())
        .map_err(|_| anyhow::anyhow!("Could not parse date: \"{}\"", input))
}

/// Parse "YYYY-MM" into the first day of that month.
pub fn parse_month(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{}-01", input.trim()), "%Y-%m-%d")
        .map_err(|_| anyhow::anyhow!("Invalid month '{}'. Expected YYYY-MM", input))
}

/// Parse a duration such as "30m" or "1h 15m".
pub fn parse_duration(input: &str) -> Result<Duration> {
    let std_dur = humantime::parse_duration(input.trim())
        .with_context(|| format!("Could not parse duration: \"{}\"", input))?;
    Duration::from_std(std_dur).context("Duration too large")
}
