//! Core listing logic for runls.
//!
//! This module contains the pieces that turn a path into listing text:
//! - [classify]: file kinds and the display [Category] rule shared by both renderers.
//! - [fm]: directory enumeration and metadata capture (see [browse_dir], [FileEntry]).
//! - [formatter]: the long and compact renderers plus their formatting helpers.
//! - [names]: owner/group name lookup behind the [NameResolver] trait.
//! - [lister]: per-path orchestration and exit status aggregation.
//! - [error]: the [ListError] type.
//!
//! Most callers will import [Lister], [ListOptions] and [Formatter] from this module.

pub mod classify;
pub mod error;
pub mod fm;
pub mod formatter;
pub mod lister;
pub mod names;

pub use classify::{Category, EXEC_FLAG, FileKind, classify};
pub use error::ListError;
pub use fm::{EntryMeta, FileEntry, browse_dir, scan_dir, sort_entries};
pub use formatter::{
    Formatter, Palette, column_count, format_attributes, format_file_time, total_blocks,
    truncate_name, truncate_to_width,
};
pub use lister::{ListOptions, Lister, Status};
pub use names::{NameResolver, NumericNames, SystemNames};
