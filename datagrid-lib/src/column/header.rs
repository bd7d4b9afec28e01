//! Column header styling, kept separate from body cell styling.

use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use super::{Alignment, VerticalAlignment};
use crate::error::GridError;

/// An RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Parses `#rrggbb` or one of a handful of color names.
impl FromStr for Color {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            if hex.len() == 6
                && let Ok(v) = u32::from_str_radix(hex, 16)
            {
                return Ok(Color::rgb((v >> 16) as u8, (v >> 8) as u8, v as u8));
            }
            return Err(GridError::configuration(format!("invalid color '{s}'")));
        }
        let color = match s.to_ascii_lowercase().as_str() {
            "black" => Color::rgb(0, 0, 0),
            "white" => Color::rgb(255, 255, 255),
            "red" => Color::rgb(255, 0, 0),
            "green" => Color::rgb(0, 128, 0),
            "blue" => Color::rgb(0, 0, 255),
            "yellow" => Color::rgb(255, 255, 0),
            "gray" | "grey" => Color::rgb(128, 128, 128),
            "lightgray" | "lightgrey" => Color::rgb(211, 211, 211),
            "darkgray" | "darkgrey" => Color::rgb(169, 169, 169),
            "orange" => Color::rgb(255, 165, 0),
            "navy" => Color::rgb(0, 0, 128),
            _ => return Err(GridError::configuration(format!("unknown color '{s}'"))),
        };
        Ok(color)
    }
}

/// Header font description.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(default)]
pub struct Font {
    pub face: String,
    pub size: u16,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

impl Default for Font {
    fn default() -> Self {
        Self {
            face: String::new(),
            size: 10,
            bold: false,
            italic: false,
            underline: false,
        }
    }
}

impl Font {
    /// Human-readable description, e.g. `"Sans 10 B I U"`.
    pub fn description(&self) -> String {
        let mut desc = format!("{} {}", self.face, self.size);
        if self.bold {
            desc.push_str(" B");
        }
        if self.italic {
            desc.push_str(" I");
        }
        if self.underline {
            desc.push_str(" U");
        }
        desc
    }
}

/// Header styling of one column.
///
/// Unset properties (`None`) inherit the grid-wide header defaults.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct HeaderStyle {
    pub font: Option<Font>,
    pub background: Option<Color>,
    pub foreground: Option<Color>,
    pub alignment: Option<Alignment>,
    pub vertical_alignment: Option<VerticalAlignment>,
}

impl HeaderStyle {
    /// Fills unset properties from `defaults`.
    pub fn resolve(&self, defaults: &HeaderStyle) -> HeaderStyle {
        HeaderStyle {
            font: self.font.clone().or_else(|| defaults.font.clone()),
            background: self.background.or(defaults.background),
            foreground: self.foreground.or(defaults.foreground),
            alignment: self.alignment.or(defaults.alignment),
            vertical_alignment: self.vertical_alignment.or(defaults.vertical_alignment),
        }
    }
}
