//! Visual themes.
//!
//! Every screen styles itself from the `Palette` of the active `Theme`.
//! The mapping is an exhaustive match, so adding a variant without giving
//! it every attribute does not compile.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::HabitualError;

/// An sRGB color with straight alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b, a: 255 }
    }

    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const BLUE: Color = Color::rgb(0, 122, 255);
    pub const CYAN: Color = Color::rgb(50, 173, 230);
    pub const GRAY: Color = Color::rgb(142, 142, 147);
    pub const GREEN: Color = Color::rgb(52, 199, 89);
    pub const MINT: Color = Color::rgb(0, 199, 190);
    pub const ORANGE: Color = Color::rgb(255, 149, 0);
    pub const PINK: Color = Color::rgb(255, 45, 85);
    pub const RED: Color = Color::rgb(255, 59, 48);
    pub const TEAL: Color = Color::rgb(48, 176, 199);
    pub const YELLOW: Color = Color::rgb(255, 204, 0);
    pub const SAND: Color = Color::rgb(199, 184, 181);

    /// Same color with its alpha set to `opacity` (0.0 - 1.0).
    pub fn with_opacity(self, opacity: f32) -> Self {
        Color {
            a: (opacity.clamp(0.0, 1.0) * 255.0).round() as u8,
            ..self
        }
    }

    /// Composite this color over an opaque `base`.
    pub fn over(self, base: Color) -> Color {
        let alpha = self.a as u32;
        let mix = |top: u8, bottom: u8| {
            ((top as u32 * alpha + bottom as u32 * (255 - alpha) + 127) / 255) as u8
        };
        Color::rgb(mix(self.r, base.r), mix(self.g, base.g), mix(self.b, base.b))
    }

    /// `#rrggbb`, or `#rrggbbaa` when not fully opaque.
    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

/// The resolved colors of a theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub card: Color,
    pub accent: Color,
    pub text: Color,
    pub icon: Color,
    /// Profile picture gradient
    pub gradient_start: Color,
    pub gradient_end: Color,
    pub section_title: Color,
    pub edit_action: Color,
    /// Weekly overview bars
    pub chart_bar: Color,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    Ocean,
    #[default]
    Sunset,
}

impl Theme {
    pub const ALL: [Theme; 4] = [Theme::Light, Theme::Dark, Theme::Ocean, Theme::Sunset];

    pub fn name(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::Ocean => "ocean",
            Theme::Sunset => "sunset",
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Theme::Light => Palette {
                background: Color::WHITE,
                card: Color::WHITE,
                accent: Color::BLUE,
                text: Color::BLACK,
                icon: Color::BLUE,
                gradient_start: Color::BLUE,
                gradient_end: Color::BLUE,
                section_title: Color::GRAY,
                edit_action: Color::BLACK,
                chart_bar: Color::BLUE,
            },
            Theme::Dark => Palette {
                background: Color::BLACK.with_opacity(0.95),
                card: Color::GRAY.with_opacity(0.3),
                accent: Color::YELLOW,
                text: Color::WHITE,
                icon: Color::RED,
                gradient_start: Color::BLUE,
                gradient_end: Color::BLACK,
                section_title: Color::WHITE,
                edit_action: Color::BLUE,
                chart_bar: Color::RED,
            },
            Theme::Ocean => Palette {
                background: Color::BLUE.with_opacity(0.2),
                card: Color::CYAN.with_opacity(0.09),
                accent: Color::TEAL,
                text: Color::BLACK,
                icon: Color::SAND,
                gradient_start: Color::BLUE,
                gradient_end: Color::MINT,
                section_title: Color::GRAY,
                edit_action: Color::BLUE,
                chart_bar: Color::MINT,
            },
            Theme::Sunset => Palette {
                background: Color::ORANGE.with_opacity(0.3),
                card: Color::YELLOW.with_opacity(0.09),
                accent: Color::YELLOW,
                text: Color::BLACK,
                icon: Color::PINK,
                gradient_start: Color::YELLOW,
                gradient_end: Color::PINK,
                section_title: Color::GRAY,
                edit_action: Color::YELLOW,
                chart_bar: Color::PINK,
            },
        }
    }

    /// Whether the theme's text is light (needs a dark backdrop).
    pub fn is_dark(self) -> bool {
        matches!(self, Theme::Dark)
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Theme {
    type Err = HabitualError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Theme::ALL
            .into_iter()
            .find(|t| t.name() == wanted)
            .ok_or_else(|| HabitualError::UnknownTheme(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_sunset() {
        assert_eq!(Theme::default(), Theme::Sunset);
    }

    #[test]
    fn names_round_trip() {
        for theme in Theme::ALL {
            assert_eq!(theme.to_string().parse::<Theme>().unwrap(), theme);
        }
        assert_eq!(" Ocean ".parse::<Theme>().unwrap(), Theme::Ocean);
        assert!(matches!(
            "neon".parse::<Theme>(),
            Err(HabitualError::UnknownTheme(name)) if name == "neon"
        ));
    }

    #[test]
    fn every_palette_is_visible() {
        for theme in Theme::ALL {
            let p = theme.palette();
            for color in [p.accent, p.text, p.icon, p.gradient_start, p.gradient_end, p.chart_bar] {
                assert!(color.a > 0, "{theme} has an invisible color");
            }
            assert_ne!(p.text, p.background, "{theme} text blends into background");
        }
    }

    #[test]
    fn dark_theme_has_light_text() {
        assert!(Theme::Dark.is_dark());
        assert_eq!(Theme::Dark.palette().text, Color::WHITE);
        assert!(!Theme::Sunset.is_dark());
    }

    #[test]
    fn opacity_and_compositing() {
        let half = Color::WHITE.with_opacity(0.5);
        assert_eq!(half.a, 128);
        assert_eq!(half.over(Color::BLACK), Color::rgb(128, 128, 128));
        assert_eq!(Color::RED.over(Color::WHITE), Color::RED);
        assert_eq!(Color::RED.with_opacity(0.0).over(Color::WHITE), Color::WHITE);
    }

    #[test]
    fn hex_formatting() {
        assert_eq!(Color::BLUE.to_hex(), "#007aff");
        assert_eq!(Color::BLACK.with_opacity(0.5).to_hex(), "#00000080");
    }

    #[test]
    fn serde_uses_lowercase_names() {
        #[derive(Serialize, Deserialize)]
        struct Wrapper {
            theme: Theme,
        }

        let parsed: Wrapper = toml::from_str("theme = \"ocean\"").unwrap();
        assert_eq!(parsed.theme, Theme::Ocean);
        let written = toml::to_string(&Wrapper { theme: Theme::Dark }).unwrap();
        assert_eq!(written.trim(), "theme = \"dark\"");
    }
}
