//! Theme configuration options for runls
//!
//! This module defines the `[theme]` table of runls.toml: one color per display
//! category plus a bold toggle. The defaults reproduce the classic `ls` colors.

use crate::core::formatter::Palette;
use crate::utils::parse_color;

use crossterm::style::Color;
use serde::Deserialize;

/// Theme configuration options
/// # Examples
/// ```toml
/// [theme]
/// directory = "bright_blue"
/// symlink = "#00afaf"
/// executable = "default"
/// bold = false
/// ```
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct Theme {
    #[serde(deserialize_with = "deserialize_color_field")]
    directory: Color,
    #[serde(deserialize_with = "deserialize_color_field")]
    symlink: Color,
    #[serde(deserialize_with = "deserialize_color_field")]
    executable: Color,
    bold: bool,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            directory: Color::DarkBlue,
            symlink: Color::DarkCyan,
            executable: Color::DarkGreen,
            bold: true,
        }
    }
}

impl Theme {
    #[inline]
    pub fn directory(&self) -> Color {
        self.directory
    }

    #[inline]
    pub fn symlink(&self) -> Color {
        self.symlink
    }

    #[inline]
    pub fn executable(&self) -> Color {
        self.executable
    }

    /// Builds the renderer palette for this theme.
    pub fn palette(&self) -> Palette {
        Palette::new(self.directory, self.symlink, self.executable, self.bold)
    }
}

/// Deserialize helper for theme colors.
fn deserialize_color_field<'de, D>(deserializer: D) -> Result<Color, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(parse_color(&s))
}
