//! File kinds and display categories for runls.
//!
//! [classify] is the single rule both renderers use to decide how a name is colored.

use std::fs;

/// Permission bits checked for the executable category (user, group, other).
pub const EXEC_FLAG: u32 = 0o111;

/// The kind of filesystem object an entry describes.
/// Taken from metadata that does not follow symlinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    File,
    Directory,
    Symlink,
    Other,
}

impl FileKind {
    pub fn from_file_type(ft: fs::FileType) -> Self {
        if ft.is_dir() {
            FileKind::Directory
        } else if ft.is_symlink() {
            FileKind::Symlink
        } else if ft.is_file() {
            FileKind::File
        } else {
            FileKind::Other
        }
    }

    /// First character of the long-format permission string.
    #[inline]
    pub fn indicator(self) -> char {
        match self {
            FileKind::Directory => 'd',
            FileKind::Symlink => 'l',
            FileKind::File | FileKind::Other => '-',
        }
    }
}

/// Display category of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Directory,
    Symlink,
    Executable,
    Plain,
}

/// Decides the display category from the file kind and permission bits.
///
/// Directories win over everything, symlinks come next, and any remaining entry
/// with at least one executable bit set is [Category::Executable].
pub fn classify(kind: FileKind, mode: u32) -> Category {
    match kind {
        FileKind::Directory => Category::Directory,
        FileKind::Symlink => Category::Symlink,
        _ if mode & EXEC_FLAG != 0 => Category::Executable,
        _ => Category::Plain,
    }
}
