//! Colours and the row palette for the TUI.
//!
//! `Rgba` is the colour type shared by configuration (overlay tint), artwork
//! swatches, and rendering. `ThemeVariant` selects between the Dark and Light
//! row palettes.

use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Deserializer};
use std::fmt;

// ============================================================================
// Rgba
// ============================================================================

/// An 8-bit-per-channel colour with alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Semi-transparent dark tint laid over the background artwork of extended rows.
    pub const LIST_ITEM_OVERLAY: Rgba = Rgba::new(0x00, 0x00, 0x00, 0x99);

    /// Parse `#RRGGBB` or `#RRGGBBAA` (leading `#` optional, case-insensitive).
    pub fn parse_hex(s: &str) -> Option<Self> {
        let hex = s.trim().trim_start_matches('#');
        if !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        match hex.len() {
            6 => Some(Self::new(channel(0)?, channel(2)?, channel(4)?, 0xff)),
            8 => Some(Self::new(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => None,
        }
    }

    /// Composite this colour over `base`, dropping the alpha channel.
    pub fn over(self, base: Rgba) -> Rgba {
        let a = u16::from(self.a);
        let mix = |top: u8, bottom: u8| {
            ((u16::from(top) * a + u16::from(bottom) * (255 - a)) / 255) as u8
        };
        Rgba::new(
            mix(self.r, base.r),
            mix(self.g, base.g),
            mix(self.b, base.b),
            0xff,
        )
    }

    /// Terminal colour for this value (alpha ignored).
    pub fn to_color(self) -> Color {
        Color::Rgb(self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }
}

impl<'de> Deserialize<'de> for Rgba {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Rgba::parse_hex(&raw).ok_or_else(|| {
            serde::de::Error::custom(format!("invalid colour '{raw}', expected #RRGGBB[AA]"))
        })
    }
}

// ============================================================================
// Theme Variant
// ============================================================================

/// Available theme variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeVariant {
    Dark,
    Light,
}

impl ThemeVariant {
    /// Parse a variant name from a string (case-insensitive).
    pub fn from_str_name(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    pub fn palette(self) -> RowPalette {
        match self {
            Self::Dark => RowPalette::dark(),
            Self::Light => RowPalette::light(),
        }
    }

    /// Colour the overlay tint is composited over when drawing extended rows.
    pub fn backdrop(self) -> Rgba {
        match self {
            Self::Dark => Rgba::new(0x10, 0x10, 0x10, 0xff),
            Self::Light => Rgba::new(0xf0, 0xf0, 0xf0, 0xff),
        }
    }
}

// ============================================================================
// Row Palette
// ============================================================================

/// Styles for each visual element of an artist row.
#[derive(Debug, Clone)]
pub struct RowPalette {
    pub line_one: Style,
    pub line_two: Style,
    pub line_three: Style,
    pub selected: Style,
    pub thumbnail_pending: Style,
    pub status_bar: Style,
    pub panel_border: Style,
}

impl RowPalette {
    fn dark() -> Self {
        Self {
            line_one: Style::default().add_modifier(Modifier::BOLD),
            line_two: Style::default().fg(Color::Gray),
            line_three: Style::default().fg(Color::DarkGray),
            selected: Style::default().bg(Color::DarkGray).fg(Color::White),
            thumbnail_pending: Style::default().fg(Color::DarkGray),
            status_bar: Style::default().bg(Color::DarkGray).fg(Color::White),
            panel_border: Style::default().fg(Color::Cyan),
        }
    }

    fn light() -> Self {
        Self {
            line_one: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            line_two: Style::default().fg(Color::DarkGray),
            line_three: Style::default().fg(Color::Gray),
            selected: Style::default().bg(Color::Blue).fg(Color::White),
            thumbnail_pending: Style::default().fg(Color::Gray),
            status_bar: Style::default().bg(Color::White).fg(Color::Black),
            panel_border: Style::default().fg(Color::Blue),
        }
    }
}
