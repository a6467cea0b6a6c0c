//! Miscellaneous utility functions for runls.
//!
//! This module holds the [cli] submodule for argument handling and the [helpers]
//! submodule, which provides commonly used utilities such as:
//! - Color parsing
//! - Clamping of configured display values
//! - OS error descriptions
//! - Diagnostics setup

pub mod cli;
pub mod helpers;

pub use helpers::{
    LOG_ENV, clamp_display_width, clamp_name_len, describe_io_error, get_home, init_logging,
    parse_color,
};
