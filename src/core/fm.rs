//! Directory enumeration and entry metadata for runls.
//!
//! Provides the [FileEntry] struct produced by [browse_dir] / [scan_dir] and consumed
//! by the renderers, plus [sort_entries] which puts a collected set into display order.

use crate::core::classify::{Category, FileKind, classify};
use crate::core::error::ListError;

use std::ffi::{OsStr, OsString};
use std::fs::{self, Metadata};
use std::os::unix::ffi::OsStrExt;
use std::os::unix::fs::MetadataExt;
use std::path::{Path, PathBuf};

use tracing::debug;

/// Metadata captured for one entry at collection time.
/// Symlinks are described themselves, never their targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryMeta {
    pub(crate) kind: FileKind,
    pub(crate) mode: u32,
    pub(crate) nlink: u64,
    pub(crate) uid: u32,
    pub(crate) gid: u32,
    pub(crate) size: u64,
    pub(crate) mtime: i64,
    pub(crate) blocks: u64,
}

impl EntryMeta {
    pub fn from_metadata(md: &Metadata) -> Self {
        Self {
            kind: FileKind::from_file_type(md.file_type()),
            mode: md.mode(),
            nlink: md.nlink(),
            uid: md.uid(),
            gid: md.gid(),
            size: md.size(),
            mtime: md.mtime(),
            blocks: md.blocks(),
        }
    }

    // Accessors

    #[inline]
    pub fn kind(&self) -> FileKind {
        self.kind
    }

    /// Raw `st_mode`, including the file type bits.
    #[inline]
    pub fn mode(&self) -> u32 {
        self.mode
    }

    #[inline]
    pub fn nlink(&self) -> u64 {
        self.nlink
    }

    #[inline]
    pub fn uid(&self) -> u32 {
        self.uid
    }

    #[inline]
    pub fn gid(&self) -> u32 {
        self.gid
    }

    #[inline]
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Modification time in seconds since the epoch.
    #[inline]
    pub fn mtime(&self) -> i64 {
        self.mtime
    }

    /// Allocated blocks in the 512-byte units the OS reports.
    #[inline]
    pub fn blocks(&self) -> u64 {
        self.blocks
    }
}

/// A single member of a listed directory.
///
/// The name is kept as the raw OS string with no length limit; truncation for
/// display happens in the renderers.
#[derive(Debug, Clone)]
pub struct FileEntry {
    name: OsString,
    meta: EntryMeta,
    link_target: Option<PathBuf>,
}

impl FileEntry {
    pub(crate) fn new(name: OsString, meta: EntryMeta, link_target: Option<PathBuf>) -> Self {
        FileEntry {
            name,
            meta,
            link_target,
        }
    }

    // Accessors

    #[inline]
    pub fn name(&self) -> &OsStr {
        &self.name
    }

    #[inline]
    pub fn meta(&self) -> &EntryMeta {
        &self.meta
    }

    /// Symlink destination as read at collection time.
    /// Only ever `Some` for symlinks that resolved when the directory was read.
    #[inline]
    pub fn link_target(&self) -> Option<&Path> {
        self.link_target.as_deref()
    }

    #[inline]
    pub fn category(&self) -> Category {
        classify(self.meta.kind, self.meta.mode)
    }

    #[inline]
    pub fn is_hidden(&self) -> bool {
        is_hidden_name(&self.name)
    }
}

#[inline]
fn is_hidden_name(name: &OsStr) -> bool {
    name.as_bytes().first() == Some(&b'.')
}

/// Reads the given directory and returns its members as an unordered vector.
/// Names starting with '.' are skipped unless `show_hidden` is set.
///
/// # Returns
/// The collected entries, or a path-level [ListError] if the directory cannot be opened
/// or the entry buffer cannot grow.
pub fn browse_dir(path: &Path, show_hidden: bool) -> Result<Vec<FileEntry>, ListError> {
    scan_dir(path, show_hidden, false)
}

/// Same as [browse_dir], optionally adding `.` and `..` entries when hidden entries are shown.
pub fn scan_dir(
    path: &Path,
    show_hidden: bool,
    dot_entries: bool,
) -> Result<Vec<FileEntry>, ListError> {
    let read_dir = fs::read_dir(path).map_err(|source| ListError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let mut entries = Vec::new();

    if show_hidden && dot_entries {
        for (name, target) in [(".", path.to_path_buf()), ("..", path.join(".."))] {
            if let Some(entry) = load_entry(OsString::from(name), &target) {
                push_entry(&mut entries, entry, path)?;
            }
        }
    }

    // The ReadDir handle is dropped when this loop ends or when `?` returns early.
    for dirent in read_dir {
        let dirent = match dirent {
            Ok(e) => e,
            Err(err) => {
                debug!(dir = %path.display(), %err, "skipping unreadable directory member");
                continue;
            }
        };

        let name = dirent.file_name();
        if !show_hidden && is_hidden_name(&name) {
            continue;
        }

        if let Some(entry) = load_entry(name, &dirent.path()) {
            push_entry(&mut entries, entry, path)?;
        }
    }
    Ok(entries)
}

/// Orders entries by byte-wise comparison of their raw names.
pub fn sort_entries(entries: &mut [FileEntry]) {
    entries.sort_by(|a, b| a.name().as_bytes().cmp(b.name().as_bytes()));
}

/// Builds one entry from its full path, or `None` when its metadata is unavailable.
fn load_entry(name: OsString, full_path: &Path) -> Option<FileEntry> {
    let md = match fs::symlink_metadata(full_path) {
        Ok(md) => md,
        Err(err) => {
            debug!(path = %full_path.display(), %err, "dropping entry without metadata");
            return None;
        }
    };

    let meta = EntryMeta::from_metadata(&md);
    let link_target = match meta.kind {
        FileKind::Symlink => read_link_target(full_path),
        _ => None,
    };
    Some(FileEntry::new(name, meta, link_target))
}

/// Reads the link text of a symlink whose destination currently exists.
/// Dangling and unreadable links yield `None`.
fn read_link_target(full_path: &Path) -> Option<PathBuf> {
    if let Err(err) = fs::metadata(full_path) {
        debug!(path = %full_path.display(), %err, "symlink does not resolve");
        return None;
    }
    match fs::read_link(full_path) {
        Ok(target) if !target.as_os_str().is_empty() => Some(target),
        Ok(_) => None,
        Err(err) => {
            debug!(path = %full_path.display(), %err, "symlink target unreadable");
            None
        }
    }
}

fn push_entry(
    entries: &mut Vec<FileEntry>,
    entry: FileEntry,
    dir: &Path,
) -> Result<(), ListError> {
    entries.try_reserve(1).map_err(|_| ListError::Exhausted {
        path: dir.to_path_buf(),
    })?;
    entries.push(entry);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use std::os::unix::fs::{PermissionsExt, symlink};
    use tempfile::TempDir;

    fn names(entries: &[FileEntry]) -> Vec<String> {
        entries.iter().map(|e| e.name().to_string_lossy().into_owned()).collect()
    }

    #[test]
    fn browse_nonexistent() {
        let result = browse_dir(Path::new("/path/does/not/exist"), false);
        assert!(matches!(result, Err(ListError::Open { .. })));
    }

    #[test]
    fn browse_regular_file_is_path_error() -> Result<(), Box<dyn std::error::Error>> {
        let tmp = TempDir::new()?;
        let file_path = tmp.path().join("plain.txt");
        File::create(&file_path)?;

        let err = browse_dir(&file_path, true).err().ok_or("expected an error")?;
        assert!(err.is_path_level());
        Ok(())
    }

    #[test]
    fn hidden_entries_follow_flag() -> Result<(), Box<dyn std::error::Error>> {
        let tmp = TempDir::new()?;
        File::create(tmp.path().join("b.txt"))?;
        File::create(tmp.path().join("a.txt"))?;
        File::create(tmp.path().join(".cfg"))?;

        let mut visible = browse_dir(tmp.path(), false)?;
        sort_entries(&mut visible);
        assert_eq!(names(&visible), ["a.txt", "b.txt"]);

        let mut all = browse_dir(tmp.path(), true)?;
        sort_entries(&mut all);
        assert_eq!(names(&all), [".cfg", "a.txt", "b.txt"]);
        Ok(())
    }

    #[test]
    fn metadata_is_captured() -> Result<(), Box<dyn std::error::Error>> {
        let tmp = TempDir::new()?;
        let mut file = File::create(tmp.path().join("hello.txt"))?;
        write!(file, "abc123")?;
        drop(file);
        fs::create_dir(tmp.path().join("sub"))?;

        let mut entries = browse_dir(tmp.path(), false)?;
        sort_entries(&mut entries);

        let file_meta = entries[0].meta();
        assert_eq!(file_meta.kind(), FileKind::File);
        assert_eq!(file_meta.size(), 6);
        assert_eq!(file_meta.nlink(), 1);

        let dir_meta = entries[1].meta();
        assert_eq!(dir_meta.kind(), FileKind::Directory);
        assert_eq!(entries[1].category(), Category::Directory);
        assert!(entries.iter().all(|e| e.link_target().is_none()));
        Ok(())
    }

    #[test]
    fn symlinks_keep_their_target() -> Result<(), Box<dyn std::error::Error>> {
        let tmp = TempDir::new()?;
        File::create(tmp.path().join("real.txt"))?;
        symlink("real.txt", tmp.path().join("link"))?;

        let entries = browse_dir(tmp.path(), false)?;
        let link = entries
            .iter()
            .find(|e| e.name() == "link")
            .ok_or("link missing")?;
        assert_eq!(link.meta().kind(), FileKind::Symlink);
        assert_eq!(link.link_target(), Some(Path::new("real.txt")));
        Ok(())
    }

    #[test]
    fn dangling_symlink_is_listed() -> Result<(), Box<dyn std::error::Error>> {
        let tmp = TempDir::new()?;
        symlink("does-not-exist", tmp.path().join("dangling"))?;

        let entries = browse_dir(tmp.path(), false)?;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].category(), Category::Symlink);
        assert_eq!(entries[0].link_target(), None);
        Ok(())
    }

    #[test]
    fn executable_files_are_classified() -> Result<(), Box<dyn std::error::Error>> {
        let tmp = TempDir::new()?;
        let script = tmp.path().join("run.sh");
        File::create(&script)?;
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755))?;
        let data = tmp.path().join("data.bin");
        File::create(&data)?;
        fs::set_permissions(&data, fs::Permissions::from_mode(0o644))?;

        let mut entries = browse_dir(tmp.path(), false)?;
        sort_entries(&mut entries);
        assert_eq!(entries[0].category(), Category::Plain);
        assert_eq!(entries[1].category(), Category::Executable);
        Ok(())
    }

    #[test]
    fn dot_entries_only_with_hidden() -> Result<(), Box<dyn std::error::Error>> {
        let tmp = TempDir::new()?;
        File::create(tmp.path().join("x"))?;

        let mut with_dots = scan_dir(tmp.path(), true, true)?;
        sort_entries(&mut with_dots);
        assert_eq!(names(&with_dots), [".", "..", "x"]);
        assert!(with_dots[..2].iter().all(|e| e.category() == Category::Directory));

        let without = scan_dir(tmp.path(), false, true)?;
        assert_eq!(names(&without), ["x"]);
        Ok(())
    }

    #[test]
    fn sort_is_bytewise() {
        let meta = EntryMeta {
            kind: FileKind::File,
            mode: 0o100644,
            nlink: 1,
            uid: 0,
            gid: 0,
            size: 0,
            mtime: 0,
            blocks: 0,
        };
        let mut entries: Vec<FileEntry> = ["b", "B", "_", "a", ".z", "A10", "A2"]
            .iter()
            .map(|n| FileEntry::new(OsString::from(n), meta, None))
            .collect();
        sort_entries(&mut entries);
        assert_eq!(names(&entries), [".z", "A10", "A2", "B", "_", "a", "b"]);
    }
}
