//! Helpers for runls.
//!
//! This module defines the bounds for the configurable display values and provides:
//! - Color parsing from names or hex codes
//! - Home directory lookup for the config path
//! - Clamping of the display width and name length settings
//! - OS error descriptions without the numeric annotation
//! - Diagnostics setup
//!
//! These helpers are used throughout runls.

use crossterm::style::Color;
use tracing_subscriber::EnvFilter;

use std::io;
use std::path::PathBuf;

/// Smallest usable display width.
pub const MIN_DISPLAY_WIDTH: usize = 1;
/// Upper bound for the display width. Anything wider is almost certainly a typo.
pub const MAX_DISPLAY_WIDTH: usize = 4096;
/// Smallest name truncation length.
pub const MIN_NAME_LEN: usize = 1;
/// Environment variable holding the diagnostics filter.
pub const LOG_ENV: &str = "RUNLS_LOG";

/// Parses a string (color name or hex) into a crossterm color.
///
/// Supports standard names (red, green, etc.), their `bright_` variants and hex values
/// (#RRGGBB or #RGB). Unknown values and "default" map to [Color::Reset].
///
/// crossterm calls the standard ANSI colors `Dark*`; the plain names here map to those
/// so "blue" matches the blue of a classic `ls`.
pub fn parse_color(s: &str) -> Color {
    match s.to_lowercase().replace(['-', ' '], "_").as_str() {
        "default" | "reset" | "none" => Color::Reset,
        "black" => Color::Black,
        "red" => Color::DarkRed,
        "green" => Color::DarkGreen,
        "yellow" => Color::DarkYellow,
        "blue" => Color::DarkBlue,
        "magenta" => Color::DarkMagenta,
        "cyan" => Color::DarkCyan,
        "white" | "gray" | "grey" => Color::Grey,
        "darkgray" | "dark_gray" | "dark_grey" => Color::DarkGrey,
        "bright_red" => Color::Red,
        "bright_green" => Color::Green,
        "bright_yellow" => Color::Yellow,
        "bright_blue" => Color::Blue,
        "bright_magenta" => Color::Magenta,
        "bright_cyan" => Color::Cyan,
        "bright_white" => Color::White,
        _ => {
            if let Some(color) = s.strip_prefix('#') {
                match color.len() {
                    6 => {
                        if let Ok(rgb) = u32::from_str_radix(color, 16) {
                            return rgb_color(rgb);
                        }
                    }
                    3 => {
                        let expanded = color
                            .chars()
                            .map(|c| format!("{}{}", c, c))
                            .collect::<String>();
                        if let Ok(rgb) = u32::from_str_radix(&expanded, 16) {
                            return rgb_color(rgb);
                        }
                    }
                    _ => {}
                }
            }
            // fallback
            Color::Reset
        }
    }
}

fn rgb_color(rgb: u32) -> Color {
    Color::Rgb {
        r: ((rgb >> 16) & 0xFF) as u8,
        g: ((rgb >> 8) & 0xFF) as u8,
        b: (rgb & 0xFF) as u8,
    }
}

/// Home directory of the current user, if known.
pub fn get_home() -> Option<PathBuf> {
    dirs::home_dir()
}

/// Safely clamp the configured display width.
pub fn clamp_display_width(value: usize) -> usize {
    let clamped = value.clamp(MIN_DISPLAY_WIDTH, MAX_DISPLAY_WIDTH);
    if clamped != value {
        tracing::warn!(
            "display.width={} out of range ({}..={}), clamped to {}",
            value,
            MIN_DISPLAY_WIDTH,
            MAX_DISPLAY_WIDTH,
            clamped
        );
    }
    clamped
}

/// Safely clamp the configured name truncation length.
pub fn clamp_name_len(value: usize) -> usize {
    if value < MIN_NAME_LEN {
        tracing::warn!(
            "display.max_name_len={} is below {}, using {}",
            value,
            MIN_NAME_LEN,
            MIN_NAME_LEN
        );
        return MIN_NAME_LEN;
    }
    value
}

/// Describes an I/O error the way `perror` would, without the ` (os error N)` suffix
/// that std appends for OS errors.
pub fn describe_io_error(err: &io::Error) -> String {
    let text = err.to_string();
    if err.raw_os_error().is_some()
        && text.ends_with(')')
        && let Some(idx) = text.rfind(" (os error ")
    {
        return text[..idx].to_string();
    }
    text
}

/// Installs the stderr diagnostics subscriber.
///
/// The filter is read from [LOG_ENV] and defaults to `warn`, so normal runs stay quiet.
pub fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}
