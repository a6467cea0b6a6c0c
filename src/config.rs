//! Configuration for runls.
//!
//! Settings are read from an optional `runls.toml` (see [Config::default_path]) and
//! split into three tables:
//! - [general]: which entries to list and in which format.
//! - [display]: the fixed display width, color toggle and name truncation.
//! - [theme]: colors per entry category.
//!
//! [load] holds the [Config] struct that merges them.

pub mod display;
pub mod general;
pub mod load;
pub mod theme;

pub use display::{Display, InternalDisplay};
pub use general::General;
pub use load::{Config, RawConfig};
pub use theme::Theme;
