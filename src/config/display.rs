//! Display configuration options for runls
//!
//! This module defines the `[display]` table read from the runls.toml configuration file
//! and its validated internal form.

use crate::core::formatter::{DEFAULT_DISPLAY_WIDTH, DEFAULT_MAX_NAME_LEN};
use crate::utils::{clamp_display_width, clamp_name_len};

use serde::Deserialize;

/// Display configuration options as written by the user.
///
/// `width` is the fixed number of columns the compact grid wraps at. The terminal is
/// never queried for it.
#[derive(Deserialize, Debug, Clone, Copy)]
#[serde(default)]
pub struct Display {
    width: usize,
    color: bool,
    max_name_len: usize,
}

impl Default for Display {
    fn default() -> Self {
        Display {
            width: DEFAULT_DISPLAY_WIDTH,
            color: true,
            max_name_len: DEFAULT_MAX_NAME_LEN,
        }
    }
}

/// Display options after range checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InternalDisplay {
    width: usize,
    color: bool,
    max_name_len: usize,
}

impl From<Display> for InternalDisplay {
    fn from(d: Display) -> Self {
        Self {
            width: clamp_display_width(d.width),
            color: d.color,
            max_name_len: clamp_name_len(d.max_name_len),
        }
    }
}

impl InternalDisplay {
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn color(&self) -> bool {
        self.color
    }

    #[inline]
    pub fn max_name_len(&self) -> usize {
        self.max_name_len
    }
}
