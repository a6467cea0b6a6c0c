//! The general configuration settings for runls.
//!
//! This module defines the [General] struct for deserializing the `[general]` table
//! of runls.toml. Command-line flags are OR-ed on top of these values.

use serde::Deserialize;

#[derive(Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct General {
    show_hidden: bool,
    long_format: bool,
    dot_entries: bool,
}

impl General {
    #[inline]
    pub fn show_hidden(&self) -> bool {
        self.show_hidden
    }

    #[inline]
    pub fn long_format(&self) -> bool {
        self.long_format
    }

    #[inline]
    pub fn dot_entries(&self) -> bool {
        self.dot_entries
    }
}
