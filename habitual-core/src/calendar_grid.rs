//! Month grid layout.
//!
//! A month is displayed as a 7-column grid whose first column is the
//! configured first day of the week. The grid starts with the days borrowed
//! from the previous month needed to complete the first week, followed by
//! every day of the displayed month. The last week is not padded.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Months, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{HabitualError, HabitualResult};

/// Short weekday names, Sunday first.
pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

const DAYS_PER_WEEK: usize = 7;

/// The weekday shown in the first grid column, numbered 1 (Sunday) to 7 (Saturday).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct FirstWeekday(u8);

impl FirstWeekday {
    pub const SUNDAY: FirstWeekday = FirstWeekday(1);
    pub const MONDAY: FirstWeekday = FirstWeekday(2);

    /// Rejects anything outside 1..=7.
    pub fn new(number: u8) -> HabitualResult<Self> {
        if (1..=7).contains(&number) {
            Ok(FirstWeekday(number))
        } else {
            Err(HabitualError::InvalidWeekday(number.to_string()))
        }
    }

    pub fn clamped(number: u8) -> Self {
        FirstWeekday(number.clamp(1, 7))
    }

    pub fn number(self) -> u8 {
        self.0
    }

    pub fn weekday(self) -> Weekday {
        weekday_from_number(self.0)
    }
}

impl Default for FirstWeekday {
    fn default() -> Self {
        FirstWeekday::SUNDAY
    }
}

impl From<Weekday> for FirstWeekday {
    fn from(weekday: Weekday) -> Self {
        FirstWeekday(weekday.number_from_sunday() as u8)
    }
}

impl TryFrom<u8> for FirstWeekday {
    type Error = HabitualError;

    fn try_from(number: u8) -> Result<Self, Self::Error> {
        FirstWeekday::new(number)
    }
}

impl From<FirstWeekday> for u8 {
    fn from(first: FirstWeekday) -> Self {
        first.0
    }
}

impl FromStr for FirstWeekday {
    type Err = HabitualError;

    /// Accepts "1".."7" or a weekday name ("monday", "Mon").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(number) = s.parse::<u8>() {
            return FirstWeekday::new(number);
        }
        s.parse::<Weekday>()
            .map(FirstWeekday::from)
            .map_err(|_| HabitualError::InvalidWeekday(s.to_string()))
    }
}

impl fmt::Display for FirstWeekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", WEEKDAY_LABELS[self.0 as usize - 1])
    }
}

/// One day rendered in the month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarCell {
    pub date: NaiveDate,
    /// False for the leading days borrowed from the previous month
    pub belongs_to_displayed_month: bool,
    pub is_past: bool,
    pub is_selected: bool,
}

/// A fully derived month grid. Labels and cells are always built together
/// from the same `FirstWeekday`, so column `i` of the label row names the
/// weekday of every cell at positions `i`, `i + 7`, `i + 14`, ...
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    month_start: NaiveDate,
    first_weekday: FirstWeekday,
    labels: [&'static str; 7],
    cells: Vec<CalendarCell>,
}

impl MonthGrid {
    /// Build the grid for the month containing `reference`.
    ///
    /// `today` drives `is_past` and `selected` drives `is_selected`, both
    /// compared at day granularity.
    pub fn new(
        reference: NaiveDate,
        first_weekday: FirstWeekday,
        today: NaiveDate,
        selected: NaiveDate,
    ) -> Self {
        let cells = build_display_grid(reference, first_weekday)
            .into_iter()
            .map(|cell| CalendarCell {
                is_past: cell.date < today,
                is_selected: cell.date == selected,
                ..cell
            })
            .collect();

        MonthGrid {
            month_start: start_of_month(reference),
            first_weekday,
            labels: weekday_labels(first_weekday),
            cells,
        }
    }

    pub fn month_start(&self) -> NaiveDate {
        self.month_start
    }

    pub fn first_weekday(&self) -> FirstWeekday {
        self.first_weekday
    }

    pub fn labels(&self) -> &[&'static str; 7] {
        &self.labels
    }

    pub fn cells(&self) -> &[CalendarCell] {
        &self.cells
    }

    /// Number of cells borrowed from the previous month.
    pub fn leading_offset(&self) -> usize {
        self.cells
            .iter()
            .take_while(|c| !c.belongs_to_displayed_month)
            .count()
    }

    pub fn days_in_month(&self) -> usize {
        self.cells.len() - self.leading_offset()
    }

    /// Cells grouped into weeks. The last week may be shorter than 7.
    pub fn rows(&self) -> impl Iterator<Item = &[CalendarCell]> {
        self.cells.chunks(DAYS_PER_WEEK)
    }

    /// Empty columns after the last day of the month.
    pub fn trailing_blanks(&self) -> usize {
        (DAYS_PER_WEEK - self.cells.len() % DAYS_PER_WEEK) % DAYS_PER_WEEK
    }

    /// Grid column (0-6) of `date`, if it is displayed.
    pub fn column_of(&self, date: NaiveDate) -> Option<usize> {
        self.cells
            .iter()
            .position(|c| c.date == date)
            .map(|i| i % DAYS_PER_WEEK)
    }

    pub fn selected(&self) -> Option<&CalendarCell> {
        self.cells.iter().find(|c| c.is_selected)
    }

    /// The grid for the following month, keeping the same week start.
    pub fn next(&self, today: NaiveDate, selected: NaiveDate) -> Self {
        MonthGrid::new(add_months(self.month_start, 1), self.first_weekday, today, selected)
    }

    /// The grid for the preceding month, keeping the same week start.
    pub fn previous(&self, today: NaiveDate, selected: NaiveDate) -> Self {
        MonthGrid::new(add_months(self.month_start, -1), self.first_weekday, today, selected)
    }
}

/// First day of the month containing `date`.
pub fn start_of_month(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date)
}

/// Number of days in the month containing `date`.
pub fn days_in_month(date: NaiveDate) -> usize {
    let start = start_of_month(date);
    start
        .iter_days()
        .take_while(|d| d.month() == start.month())
        .count()
}

/// Weekday of `date` numbered 1 (Sunday) to 7 (Saturday).
pub fn weekday_number(date: NaiveDate) -> u8 {
    date.weekday().number_from_sunday() as u8
}

/// Days from the previous month needed before a month starting on
/// `start_weekday` so its first week is complete. Always in 0..=6.
pub fn leading_offset(start_weekday: u8, first_weekday: FirstWeekday) -> usize {
    let raw = start_weekday as i32 - first_weekday.number() as i32;
    raw.rem_euclid(DAYS_PER_WEEK as i32) as usize
}

/// Every cell date for the month containing `reference`: the leading days
/// of the previous month followed by each day of the month, ascending.
///
/// `is_past` and `is_selected` are left false; `MonthGrid::new` derives them.
pub fn build_display_grid(reference: NaiveDate, first_weekday: FirstWeekday) -> Vec<CalendarCell> {
    let start = start_of_month(reference);
    let offset = leading_offset(weekday_number(start), first_weekday);

    // Walk backwards so the oldest representable date truncates the row
    // instead of failing.
    let mut leading: Vec<NaiveDate> = std::iter::successors(start.pred_opt(), |d| d.pred_opt())
        .take(offset)
        .collect();
    leading.reverse();

    let leading = leading.into_iter().map(|date| cell(date, false));
    let month = start
        .iter_days()
        .take(days_in_month(start))
        .map(|date| cell(date, true));

    leading.chain(month).collect()
}

/// Canonical short weekday names rotated so index 0 is `first_weekday`.
pub fn weekday_labels(first_weekday: FirstWeekday) -> [&'static str; 7] {
    let mut labels = WEEKDAY_LABELS;
    labels.rotate_left(first_weekday.number() as usize - 1);
    labels
}

/// Shift `date` by whole months, clamping the day to the target month's length.
/// Returns `date` unchanged if the result is not representable.
pub fn add_months(date: NaiveDate, delta: i32) -> NaiveDate {
    let months = Months::new(delta.unsigned_abs());
    let shifted = if delta >= 0 {
        date.checked_add_months(months)
    } else {
        date.checked_sub_months(months)
    };
    shifted.unwrap_or(date)
}

fn cell(date: NaiveDate, belongs_to_displayed_month: bool) -> CalendarCell {
    CalendarCell {
        date,
        belongs_to_displayed_month,
        is_past: false,
        is_selected: false,
    }
}

fn weekday_from_number(number: u8) -> Weekday {
    match number {
        1 => Weekday::Sun,
        2 => Weekday::Mon,
        3 => Weekday::Tue,
        4 => Weekday::Wed,
        5 => Weekday::Thu,
        6 => Weekday::Fri,
        _ => Weekday::Sat,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn all_first_weekdays() -> impl Iterator<Item = FirstWeekday> {
        (1..=7).map(|n| FirstWeekday::new(n).unwrap())
    }

    fn all_months() -> impl Iterator<Item = NaiveDate> {
        (2023..=2028).flat_map(|y| (1..=12).map(move |m| date(y, m, 15)))
    }

    // --- FirstWeekday ---

    #[test]
    fn first_weekday_rejects_out_of_range() {
        assert!(FirstWeekday::new(0).is_err());
        assert!(FirstWeekday::new(8).is_err());
        assert_eq!(FirstWeekday::new(7).unwrap().weekday(), Weekday::Sat);
    }

    #[test]
    fn first_weekday_clamps() {
        assert_eq!(FirstWeekday::clamped(0), FirstWeekday::SUNDAY);
        assert_eq!(FirstWeekday::clamped(42).number(), 7);
    }

    #[test]
    fn first_weekday_parses_numbers_and_names() {
        assert_eq!("2".parse::<FirstWeekday>().unwrap(), FirstWeekday::MONDAY);
        assert_eq!("monday".parse::<FirstWeekday>().unwrap(), FirstWeekday::MONDAY);
        assert_eq!("Sun".parse::<FirstWeekday>().unwrap(), FirstWeekday::SUNDAY);
        assert!("9".parse::<FirstWeekday>().is_err());
        assert!("someday".parse::<FirstWeekday>().is_err());
    }

    #[test]
    fn first_weekday_matches_chrono_weekday() {
        for first in all_first_weekdays() {
            assert_eq!(FirstWeekday::from(first.weekday()), first);
        }
    }

    // --- build_display_grid ---

    #[test]
    fn month_starting_wednesday_with_sunday_start() {
        // July 2026 starts on a Wednesday
        let start = date(2026, 7, 1);
        assert_eq!(start.weekday(), Weekday::Wed);

        let cells = build_display_grid(date(2026, 7, 20), FirstWeekday::SUNDAY);

        assert_eq!(leading_offset(weekday_number(start), FirstWeekday::SUNDAY), 3);
        assert_eq!(cells[0].date, date(2026, 6, 28));
        assert_eq!(cells[0].date.weekday(), Weekday::Sun);
        assert_eq!(cells[1].date.weekday(), Weekday::Mon);
        assert_eq!(cells[2].date.weekday(), Weekday::Tue);
        assert!(cells[..3].iter().all(|c| !c.belongs_to_displayed_month));
        assert_eq!(cells[3].date, start);
        assert!(cells[3].belongs_to_displayed_month);
        assert_eq!(cells.len(), 3 + 31);
    }

    #[test]
    fn grid_is_ascending_gap_free_and_covers_month() {
        for reference in all_months() {
            for first in all_first_weekdays() {
                let cells = build_display_grid(reference, first);
                let n = days_in_month(reference);
                let offset = cells.len() - n;

                assert!(offset <= 6);
                for pair in cells.windows(2) {
                    assert_eq!(pair[0].date.succ_opt(), Some(pair[1].date));
                }
                for (i, c) in cells[offset..].iter().enumerate() {
                    assert!(c.belongs_to_displayed_month);
                    assert_eq!(c.date.month(), reference.month());
                    assert_eq!(c.date.day() as usize, i + 1);
                }
                assert!(cells[..offset].iter().all(|c| !c.belongs_to_displayed_month));
            }
        }
    }

    #[test]
    fn offset_is_zero_only_when_month_starts_on_first_weekday() {
        for reference in all_months() {
            let start = start_of_month(reference);
            for first in all_first_weekdays() {
                let offset = leading_offset(weekday_number(start), first);
                assert!(offset <= 6);
                assert_eq!(offset == 0, start.weekday() == first.weekday());
            }
        }
    }

    #[test]
    fn labels_stay_aligned_with_columns() {
        for reference in all_months() {
            for first in all_first_weekdays() {
                let labels = weekday_labels(first);
                let cells = build_display_grid(reference, first);
                assert_eq!(labels[0], WEEKDAY_LABELS[weekday_number(cells[0].date) as usize - 1]);
                for (i, c) in cells.iter().enumerate() {
                    assert_eq!(labels[i % 7], WEEKDAY_LABELS[weekday_number(c.date) as usize - 1]);
                }
            }
        }
    }

    #[test]
    fn no_trailing_padding() {
        // February 2026 starts on a Sunday: no leading days, 28 cells exactly
        let cells = build_display_grid(date(2026, 2, 10), FirstWeekday::SUNDAY);
        assert_eq!(cells.len(), 28);
        assert_eq!(cells.last().unwrap().date, date(2026, 2, 28));

        // Leap year February
        let cells = build_display_grid(date(2028, 2, 1), FirstWeekday::MONDAY);
        assert_eq!(cells.last().unwrap().date, date(2028, 2, 29));
    }

    #[test]
    fn grid_at_earliest_representable_month_does_not_panic() {
        let cells = build_display_grid(NaiveDate::MIN, FirstWeekday::SUNDAY);
        assert!(!cells.is_empty());
        assert!(cells.iter().any(|c| c.date == NaiveDate::MIN));
    }

    // --- weekday_labels ---

    #[test]
    fn labels_rotate() {
        assert_eq!(weekday_labels(FirstWeekday::SUNDAY)[0], "Sun");
        assert_eq!(
            weekday_labels(FirstWeekday::MONDAY),
            ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"]
        );
        assert_eq!(weekday_labels(FirstWeekday::new(7).unwrap())[0], "Sat");
    }

    // --- MonthGrid ---

    #[test]
    fn month_grid_derives_past_and_selected() {
        let today = date(2026, 7, 10);
        let selected = date(2026, 7, 14);
        let grid = MonthGrid::new(today, FirstWeekday::SUNDAY, today, selected);

        let past: Vec<_> = grid.cells().iter().filter(|c| c.is_past).collect();
        // 3 leading June days + July 1..9
        assert_eq!(past.len(), 3 + 9);
        assert_eq!(grid.selected().map(|c| c.date), Some(selected));
        assert_eq!(grid.cells().iter().filter(|c| c.is_selected).count(), 1);
    }

    #[test]
    fn month_grid_rows_and_blanks() {
        let july = date(2026, 7, 1);
        let grid = MonthGrid::new(july, FirstWeekday::SUNDAY, july, july);

        assert_eq!(grid.leading_offset(), 3);
        assert_eq!(grid.days_in_month(), 31);
        let rows: Vec<_> = grid.rows().collect();
        assert_eq!(rows.len(), 5);
        assert_eq!(rows.last().unwrap().len(), 34 % 7);
        assert_eq!(grid.trailing_blanks(), 1);
        assert_eq!(grid.column_of(july), Some(3));
        assert_eq!(grid.column_of(date(2026, 8, 1)), None);
    }

    #[test]
    fn month_grid_navigation_keeps_week_start() {
        let jan = date(2026, 1, 31);
        let grid = MonthGrid::new(jan, FirstWeekday::MONDAY, jan, jan);

        let feb = grid.next(jan, jan);
        assert_eq!(feb.month_start(), date(2026, 2, 1));
        assert_eq!(feb.first_weekday(), FirstWeekday::MONDAY);
        assert_eq!(feb.labels()[0], "Mon");

        let dec = grid.previous(jan, jan);
        assert_eq!(dec.month_start(), date(2025, 12, 1));
        assert_eq!(dec.days_in_month(), 31);
    }

    #[test]
    fn add_months_clamps_day() {
        assert_eq!(add_months(date(2026, 1, 31), 1), date(2026, 2, 28));
        assert_eq!(add_months(date(2026, 3, 31), -1), date(2026, 2, 28));
        assert_eq!(add_months(date(2026, 12, 5), 1), date(2027, 1, 5));
        assert_eq!(add_months(NaiveDate::MAX, 1), NaiveDate::MAX);
    }

    #[test]
    fn days_in_month_handles_leap_years() {
        assert_eq!(days_in_month(date(2024, 2, 3)), 29);
        assert_eq!(days_in_month(date(2100, 2, 3)), 28);
        assert_eq!(days_in_month(date(2026, 4, 30)), 30);
        assert_eq!(days_in_month(date(2026, 12, 1)), 31);
    }

    #[test]
    fn first_weekday_serde_as_integer() {
        #[derive(Serialize, Deserialize)]
        struct Wrapper {
            first_weekday: FirstWeekday,
        }

        let parsed: Wrapper = toml::from_str("first_weekday = 2").unwrap();
        assert_eq!(parsed.first_weekday, FirstWeekday::MONDAY);
        assert!(toml::from_str::<Wrapper>("first_weekday = 9").is_err());
    }
}
