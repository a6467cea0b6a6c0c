//! Rendering of sorted file entries for runls.
//!
//! The [Formatter] struct holds the display width, the name truncation limit, the color
//! [Palette] and the reference time used for timestamps. It renders a sorted entry set
//! either in the long format ([Formatter::render_long]) or as a compact grid
//! ([Formatter::render_compact]).
//!
//! Also holds the free formatting helpers shared by both renderers.

use crate::core::classify::{Category, FileKind};
use crate::core::fm::FileEntry;
use crate::core::names::NameResolver;

use chrono::{DateTime, Local};
use crossterm::queue;
use crossterm::style::{Attribute, Color, ContentStyle, ResetColor, SetStyle};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use std::ffi::OsStr;
use std::io::{self, Write};
use std::os::unix::ffi::OsStrExt;

/// Timestamps further than this from now (in either direction) show the year.
pub const RECENT_WINDOW_SECS: i64 = 15_552_000;
/// Fallback grid width when nothing else is configured.
pub const DEFAULT_DISPLAY_WIDTH: usize = 80;
/// Longest name rendered before truncation, in display columns.
pub const DEFAULT_MAX_NAME_LEN: usize = 1023;

/// Gap emitted between names in the compact grid, also added to the column width.
const COLUMN_GAP: &[u8] = b"  ";

/// Styles applied to each display category.
/// `None` means the category is printed without escape sequences.
#[derive(Debug, Clone, Copy, Default)]
pub struct Palette {
    directory: Option<ContentStyle>,
    symlink: Option<ContentStyle>,
    executable: Option<ContentStyle>,
}

impl Palette {
    /// A palette that never emits escape sequences.
    pub fn plain() -> Self {
        Self::default()
    }

    /// Builds a palette from one color per category.
    /// [Color::Reset] leaves that category uncolored.
    pub fn new(directory: Color, symlink: Color, executable: Color, bold: bool) -> Self {
        Self {
            directory: category_style(directory, bold),
            symlink: category_style(symlink, bold),
            executable: category_style(executable, bold),
        }
    }

    /// Bold blue directories, bold cyan symlinks and bold green executables.
    pub fn classic() -> Self {
        Self::new(Color::DarkBlue, Color::DarkCyan, Color::DarkGreen, true)
    }

    /// Writes the raw `text` bytes wrapped in the style for `category`.
    /// Styled text is always followed by a full attribute reset.
    pub fn paint<W: Write>(&self, out: &mut W, category: Category, text: &[u8]) -> io::Result<()> {
        let style = match category {
            Category::Directory => self.directory,
            Category::Symlink => self.symlink,
            Category::Executable => self.executable,
            Category::Plain => None,
        };
        match style {
            Some(style) => {
                queue!(out, SetStyle(style))?;
                out.write_all(text)?;
                queue!(out, ResetColor)
            }
            None => out.write_all(text),
        }
    }
}

fn category_style(color: Color, bold: bool) -> Option<ContentStyle> {
    if color == Color::Reset {
        return None;
    }
    let mut style = ContentStyle::new();
    style.foreground_color = Some(color);
    if bold {
        style.attributes.set(Attribute::Bold);
    }
    Some(style)
}

/// Formatter struct which renders sorted entries in either layout.
///
/// Names and symlink targets are written as the raw bytes the filesystem returned.
#[derive(Debug, Clone)]
pub struct Formatter {
    display_width: usize,
    max_name_len: usize,
    palette: Palette,
    now: i64,
}

impl Formatter {
    /// Creates a formatter that measures timestamp age against the current time.
    pub fn new(display_width: usize, max_name_len: usize, palette: Palette) -> Self {
        Self {
            display_width: display_width.max(1),
            max_name_len: max_name_len.max(1),
            palette,
            now: Local::now().timestamp(),
        }
    }

    /// Pins the reference time used to pick the timestamp format.
    pub fn with_now(mut self, now: i64) -> Self {
        self.now = now;
        self
    }

    /// Writes one line per entry, preceded by the `total` block count line.
    /// Every line is terminated by a newline.
    pub fn render_long<W, R>(&self, out: &mut W, entries: &[FileEntry], names: &R) -> io::Result<()>
    where
        W: Write,
        R: NameResolver + ?Sized,
    {
        writeln!(out, "total {}", total_blocks(entries))?;

        for entry in entries {
            let meta = entry.meta();
            write!(
                out,
                "{} {:>2} {} {} {:>7} {} ",
                format_attributes(meta.kind(), meta.mode()),
                meta.nlink(),
                names.resolve_user(meta.uid()),
                names.resolve_group(meta.gid()),
                meta.size(),
                format_file_time(meta.mtime(), self.now),
            )?;
            let name = truncate_name(entry.name(), self.max_name_len);
            self.palette.paint(out, entry.category(), name)?;

            if entry.category() == Category::Symlink
                && let Some(target) = entry.link_target()
            {
                out.write_all(b" -> ")?;
                self.palette
                    .paint(out, Category::Symlink, target.as_os_str().as_bytes())?;
            }
            out.write_all(b"\n")?;
        }
        Ok(())
    }

    /// Writes the names in a grid sized from the single longest name.
    ///
    /// Names are separated by two spaces and a line break follows every
    /// `columns`-th name. Names are not padded, so columns only line up when
    /// the names have similar lengths. Nothing is written for an empty set.
    pub fn render_compact<W: Write>(&self, out: &mut W, entries: &[FileEntry]) -> io::Result<()> {
        if entries.is_empty() {
            return Ok(());
        }

        let cells: Vec<(Category, &[u8])> = entries
            .iter()
            .map(|e| (e.category(), truncate_name(e.name(), self.max_name_len)))
            .collect();

        // Byte length, not display width: a multi-byte name takes a wider column.
        let max_len = cells.iter().map(|(_, n)| n.len()).max().unwrap_or(0);
        let columns = column_count(self.display_width, max_len);

        let last = cells.len() - 1;
        for (i, (category, name)) in cells.iter().enumerate() {
            self.palette.paint(out, *category, name)?;
            if i < last {
                if (i + 1) % columns == 0 {
                    out.write_all(b"\n")?;
                } else {
                    out.write_all(COLUMN_GAP)?;
                }
            }
        }
        out.write_all(b"\n")
    }
}

/// Number of grid columns for the given display width and longest name.
/// Never less than one.
pub fn column_count(display_width: usize, max_name_width: usize) -> usize {
    let col_width = max_name_width + COLUMN_GAP.len();
    (display_width / col_width).max(1)
}

/// Sum of the block counts of all entries.
pub fn total_blocks(entries: &[FileEntry]) -> u64 {
    entries.iter().map(|e| e.meta().blocks()).sum()
}

/// Formats the file kind and permission bits in the classic 10 character form,
/// e.g. `drwxr-xr-x`.
pub fn format_attributes(kind: FileKind, mode: u32) -> String {
    let mut chars = [kind.indicator(), '-', '-', '-', '-', '-', '-', '-', '-', '-'];
    let shifts = [6, 3, 0];
    for (i, &shift) in shifts.iter().enumerate() {
        let base = 1 + i * 3;
        if (mode >> (shift + 2)) & 1u32 != 0 {
            chars[base] = 'r';
        }
        if (mode >> (shift + 1)) & 1u32 != 0 {
            chars[base + 1] = 'w';
        }
        if (mode >> shift) & 1u32 != 0 {
            chars[base + 2] = 'x';
        }
    }
    chars.iter().collect()
}

/// Formats a modification time relative to `now`.
///
/// Times within [RECENT_WINDOW_SECS] of `now` render as `"Mon DD HH:MM"`, anything
/// older or further in the future as `"Mon DD  YYYY"`.
///
/// # Returns
/// The formatted local time, or "-" if the timestamp is out of range.
pub fn format_file_time(mtime: i64, now: i64) -> String {
    let Some(utc) = DateTime::from_timestamp(mtime, 0) else {
        return "-".to_string();
    };
    let local: DateTime<Local> = utc.with_timezone(&Local);

    let diff = now.saturating_sub(mtime);
    let pattern = if diff > RECENT_WINDOW_SECS || diff < -RECENT_WINDOW_SECS {
        "%b %d  %Y"
    } else {
        "%b %d %H:%M"
    };
    local.format(pattern).to_string()
}

/// Cuts `name` so that it occupies at most `max_width` display columns.
/// Characters are never split; names that already fit are returned whole.
pub fn truncate_to_width(name: &str, max_width: usize) -> &str {
    if name.width() <= max_width {
        return name;
    }

    let mut current_w = 0;
    let mut end = 0;
    for (idx, ch) in name.char_indices() {
        let w = ch.width().unwrap_or(0);
        if current_w + w > max_width {
            break;
        }
        current_w += w;
        end = idx + ch.len_utf8();
    }
    &name[..end]
}

/// The bytes of `name` that get rendered.
/// UTF-8 names are cut by display width, anything else at `max_width` bytes.
pub fn truncate_name(name: &OsStr, max_width: usize) -> &[u8] {
    match name.to_str() {
        Some(text) => truncate_to_width(text, max_width).as_bytes(),
        None => {
            let bytes = name.as_bytes();
            &bytes[..bytes.len().min(max_width)]
        }
    }
}
