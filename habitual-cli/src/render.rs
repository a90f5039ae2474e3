//! Terminal rendering of habitual types.
//!
//! Colors come from the active theme's palette. Translucent palette colors
//! are composited over the theme background so they read the same in any
//! terminal.

use chrono::{Datelike, NaiveDate};
use habitual_core::habit::Habit;
use habitual_core::overview::{BAR_SCALE, DayTally};
use habitual_core::profile::UserProfile;
use habitual_core::{CalendarCell, Color, MonthGrid, Palette, Theme};
use owo_colors::OwoColorize;

const BAR_WIDTH: usize = 20;
const CELL_WIDTH: usize = 4;

/// Applies a palette to text.
pub struct Painter {
    palette: Palette,
    base: Color,
}

impl Painter {
    pub fn new(theme: Theme) -> Self {
        let backdrop = if theme.is_dark() { Color::BLACK } else { Color::WHITE };
        let palette = theme.palette();
        Painter {
            palette,
            base: palette.background.over(backdrop),
        }
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn paint(&self, text: &str, color: Color) -> String {
        let c = color.over(self.base);
        text.truecolor(c.r, c.g, c.b).to_string()
    }

    pub fn accent(&self, text: &str) -> String {
        self.paint(text, self.palette.accent)
    }

    pub fn title(&self, text: &str) -> String {
        self.paint(text, self.palette.section_title).bold().to_string()
    }

    pub fn highlight(&self, text: &str) -> String {
        let bg = self.palette.accent.over(self.base);
        let fg = self.palette.text;
        text.truecolor(fg.r, fg.g, fg.b)
            .on_truecolor(bg.r, bg.g, bg.b)
            .to_string()
    }

    pub fn swatch(&self, color: Color) -> String {
        self.paint("██", color)
    }
}

/// Extension trait for themed terminal rendering.
pub trait Render {
    fn render(&self, painter: &Painter) -> String;
}

impl Render for Habit {
    fn render(&self, painter: &Painter) -> String {
        let mark = if self.is_complete {
            painter.paint("✓", Color::GREEN)
        } else {
            painter.paint("○", Color::GRAY)
        };
        let when = self
            .date
            .map(|d| format!(" {}", d.format("%a %b %-d, %H:%M")).dimmed().to_string())
            .unwrap_or_default();

        format!(
            "{} {} {}{}",
            self.short_id().dimmed(),
            mark,
            self.title,
            when
        )
    }
}

impl Render for MonthGrid {
    fn render(&self, painter: &Painter) -> String {
        let mut lines = Vec::new();

        let heading = self.month_start().format("%B %Y").to_string();
        let width = CELL_WIDTH * 7;
        lines.push(painter.title(&format!("{:^width$}", heading)));

        let labels: String = self
            .labels()
            .iter()
            .map(|l| format!("{:>width$}", l, width = CELL_WIDTH))
            .collect();
        lines.push(painter.paint(&labels, painter.palette().section_title));

        for row in self.rows() {
            let line: String = row.iter().map(|cell| render_cell(cell, painter)).collect();
            lines.push(line);
        }

        lines.join("\n")
    }
}

fn render_cell(cell: &CalendarCell, painter: &Painter) -> String {
    let day = cell.date.day().to_string();
    let padding = " ".repeat(CELL_WIDTH.saturating_sub(day.len() + 1));

    let day = if cell.is_selected {
        painter.highlight(&format!(" {}", day))
    } else if !cell.belongs_to_displayed_month {
        format!(" {}", day).dimmed().to_string()
    } else if cell.is_past {
        painter.paint(&format!(" {}", day), painter.palette().section_title)
    } else {
        painter.paint(&format!(" {}", day), painter.palette().text)
    };

    format!("{}{}", padding, day)
}

impl Render for DayTally {
    fn render(&self, painter: &Painter) -> String {
        let filled = (self.bar_fraction(BAR_SCALE) * BAR_WIDTH as f64).round() as usize;
        let bar = painter.paint(&"█".repeat(filled), painter.palette().chart_bar);
        let rest = " ".repeat(BAR_WIDTH - filled);

        format!("{:>3} {}{} {}", self.label, bar, rest, self.tasks_done)
    }
}

impl Render for UserProfile {
    fn render(&self, painter: &Painter) -> String {
        let palette = painter.palette();
        let mut lines = Vec::new();

        let initials = self.initials();
        let badge = format!(
            "{}{}{}",
            painter.paint("(", palette.gradient_start),
            painter.paint(&initials, palette.gradient_start).bold(),
            painter.paint(")", palette.gradient_end),
        );
        lines.push(format!("  {} {}", badge, self.name.bold()));
        lines.push(format!(
            "  {}",
            format!("Joined: {}", self.join_date().format("%B %Y")).dimmed()
        ));

        lines.push(String::new());
        lines.push(painter.title("Bio"));
        lines.push(info_row(painter, "About", &self.bio));
        lines.push(info_row(painter, "Quote", &self.quote));

        lines.push(String::new());
        lines.push(painter.title("Personal Information"));
        lines.push(info_row(painter, "Username", &self.username));
        lines.push(info_row(painter, "Email", &self.email));
        lines.push(info_row(painter, "Phone", &self.phone));
        lines.push(info_row(painter, "Birthday", &format_birthday(self.birthday)));

        lines.join("\n")
    }
}

fn info_row(painter: &Painter, title: &str, value: &str) -> String {
    let palette = painter.palette();
    format!(
        "  {} {} {}",
        painter.paint("•", palette.icon),
        painter.paint(&format!("{:<9}", title), palette.section_title),
        value
    )
}

pub fn format_birthday(birthday: Option<NaiveDate>) -> String {
    birthday
        .map(|d| d.format("%-m/%-d/%Y").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Swatches for every palette attribute.
pub fn render_palette(theme: Theme, active: bool) -> String {
    let painter = Painter::new(theme);
    let p = painter.palette();
    let swatches: String = [
        p.background,
        p.card,
        p.accent,
        p.text,
        p.icon,
        p.gradient_start,
        p.gradient_end,
        p.section_title,
        p.edit_action,
        p.chart_bar,
    ]
    .into_iter()
    .map(|c| painter.swatch(c))
    .collect();

    let marker = if active { painter.accent("●") } else { " ".to_string() };
    format!("{} {:<7} {}", marker, theme.to_string(), swatches)
}
