//! Per-path orchestration for runls.
//!
//! [Lister] ties collection, sorting and rendering together for every requested path
//! and folds the per-path results into one [Status].

use crate::core::error::ListError;
use crate::core::fm::{FileEntry, scan_dir, sort_entries};
use crate::core::formatter::Formatter;
use crate::core::names::NameResolver;

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use tracing::debug;

/// Listing switches resolved from the command line and the config file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListOptions {
    /// Include names starting with '.' (`-a`).
    pub show_hidden: bool,
    /// One detailed line per entry (`-l`).
    pub long_format: bool,
    /// Also list `.` and `..` when hidden entries are shown.
    pub dot_entries: bool,
}

/// Outcome of listing one or more paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    Failure,
}

impl Status {
    /// Failure wins.
    #[inline]
    pub fn merge(self, other: Status) -> Status {
        match (self, other) {
            (Status::Success, Status::Success) => Status::Success,
            _ => Status::Failure,
        }
    }
}

impl From<Status> for ExitCode {
    fn from(status: Status) -> Self {
        match status {
            Status::Success => ExitCode::SUCCESS,
            Status::Failure => ExitCode::FAILURE,
        }
    }
}

/// Lists directories with one fixed set of options.
pub struct Lister<R> {
    options: ListOptions,
    formatter: Formatter,
    names: R,
}

impl<R: NameResolver> Lister<R> {
    pub fn new(options: ListOptions, formatter: Formatter, names: R) -> Self {
        Self {
            options,
            formatter,
            names,
        }
    }

    /// Lists every path in order.
    ///
    /// With no paths the current directory is listed without a header. With more than
    /// one path each listing gets a `<path>:` header and listings are separated by a
    /// blank line.
    ///
    /// # Returns
    /// [Status::Failure] if any path failed, or an error if writing the output failed.
    pub fn run<W, E>(
        &self,
        paths: &[PathBuf],
        out: &mut W,
        err: &mut E,
    ) -> Result<Status, ListError>
    where
        W: Write,
        E: Write,
    {
        if paths.is_empty() {
            return self.process(Path::new("."), false, out, err);
        }

        let header = paths.len() > 1;
        let mut status = Status::Success;
        for (i, path) in paths.iter().enumerate() {
            if i > 0 {
                writeln!(out)?;
            }
            status = status.merge(self.process(path, header, out, err)?);
        }
        Ok(status)
    }

    /// Lists a single directory.
    ///
    /// Path-level failures are reported on `err` as `<path>: <description>` and turn
    /// into [Status::Failure]; only output failures are returned as errors.
    pub fn process<W, E>(
        &self,
        path: &Path,
        header: bool,
        out: &mut W,
        err: &mut E,
    ) -> Result<Status, ListError>
    where
        W: Write,
        E: Write,
    {
        let mut entries = match scan_dir(path, self.options.show_hidden, self.options.dot_entries)
        {
            Ok(entries) => entries,
            Err(e) if e.is_path_level() => {
                writeln!(err, "{e}")?;
                return Ok(Status::Failure);
            }
            Err(e) => return Err(e),
        };

        if header {
            writeln!(out, "{}:", path.display())?;
        }

        if entries.is_empty() {
            debug!(path = %path.display(), "nothing to list");
            return Ok(Status::Success);
        }

        sort_entries(&mut entries);
        self.render(out, &entries)?;
        Ok(Status::Success)
    }

    /// Writes an already sorted entry set with the renderer picked by the options.
    pub fn render<W: Write>(&self, out: &mut W, entries: &[FileEntry]) -> io::Result<()> {
        if self.options.long_format {
            self.formatter.render_long(out, entries, &self.names)
        } else {
            self.formatter.render_compact(out, entries)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::formatter::{DEFAULT_MAX_NAME_LEN, Palette};
    use crate::core::names::NumericNames;

    use std::fs::{self, File};
    use std::os::unix::fs::symlink;
    use tempfile::TempDir;

    fn lister(options: ListOptions) -> Lister<NumericNames> {
        let formatter = Formatter::new(80, DEFAULT_MAX_NAME_LEN, Palette::plain());
        Lister::new(options, formatter, NumericNames)
    }

    fn run_to_strings(
        lister: &Lister<NumericNames>,
        paths: &[PathBuf],
    ) -> Result<(Status, String, String), Box<dyn std::error::Error>> {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let status = lister.run(paths, &mut out, &mut err)?;
        Ok((status, String::from_utf8(out)?, String::from_utf8(err)?))
    }

    #[test]
    fn empty_directory_prints_nothing() -> Result<(), Box<dyn std::error::Error>> {
        let tmp = TempDir::new()?;
        for long_format in [false, true] {
            let l = lister(ListOptions {
                long_format,
                ..ListOptions::default()
            });
            let (status, out, err) = run_to_strings(&l, &[tmp.path().to_path_buf()])?;
            assert_eq!(status, Status::Success);
            assert_eq!(out, "");
            assert_eq!(err, "");
        }
        Ok(())
    }

    #[test]
    fn hidden_entries_and_order() -> Result<(), Box<dyn std::error::Error>> {
        let tmp = TempDir::new()?;
        File::create(tmp.path().join("b.txt"))?;
        File::create(tmp.path().join("a.txt"))?;
        File::create(tmp.path().join(".cfg"))?;
        let paths = [tmp.path().to_path_buf()];

        let (_, out, _) = run_to_strings(&lister(ListOptions::default()), &paths)?;
        assert_eq!(out, "a.txt  b.txt\n");

        let all = lister(ListOptions {
            show_hidden: true,
            ..ListOptions::default()
        });
        let (_, out, _) = run_to_strings(&all, &paths)?;
        assert_eq!(out, ".cfg  a.txt  b.txt\n");
        Ok(())
    }

    #[test]
    fn two_paths_get_headers_and_one_blank_line() -> Result<(), Box<dyn std::error::Error>> {
        let first = TempDir::new()?;
        let second = TempDir::new()?;
        File::create(first.path().join("one"))?;
        File::create(second.path().join("two"))?;
        let paths = [first.path().to_path_buf(), second.path().to_path_buf()];

        let (status, out, _) = run_to_strings(&lister(ListOptions::default()), &paths)?;
        assert_eq!(status, Status::Success);
        let expected = format!(
            "{}:\none\n\n{}:\ntwo\n",
            first.path().display(),
            second.path().display()
        );
        assert_eq!(out, expected);
        Ok(())
    }

    #[test]
    fn missing_path_fails_but_others_continue() -> Result<(), Box<dyn std::error::Error>> {
        let good = TempDir::new()?;
        File::create(good.path().join("kept"))?;
        let missing = good.path().join("missing");
        let paths = [missing.clone(), good.path().to_path_buf()];

        let (status, out, err) = run_to_strings(&lister(ListOptions::default()), &paths)?;
        assert_eq!(status, Status::Failure);
        assert!(out.contains("kept"));
        assert_eq!(
            err,
            format!("{}: No such file or directory\n", missing.display())
        );
        Ok(())
    }

    #[test]
    fn empty_directory_still_gets_header() -> Result<(), Box<dyn std::error::Error>> {
        let empty = TempDir::new()?;
        let full = TempDir::new()?;
        File::create(full.path().join("f"))?;
        let paths = [empty.path().to_path_buf(), full.path().to_path_buf()];

        let (_, out, _) = run_to_strings(&lister(ListOptions::default()), &paths)?;
        assert_eq!(
            out,
            format!("{}:\n\n{}:\nf\n", empty.path().display(), full.path().display())
        );
        Ok(())
    }

    #[test]
    fn long_format_omits_arrow_for_dangling_link() -> Result<(), Box<dyn std::error::Error>> {
        let tmp = TempDir::new()?;
        symlink("nowhere", tmp.path().join("dangling"))?;
        fs::write(tmp.path().join("real"), b"data")?;
        symlink("real", tmp.path().join("working"))?;

        let l = lister(ListOptions {
            long_format: true,
            ..ListOptions::default()
        });
        let (status, out, _) = run_to_strings(&l, &[tmp.path().to_path_buf()])?;
        assert_eq!(status, Status::Success);

        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[0].starts_with("total "));
        assert!(lines[1].starts_with('l') && lines[1].ends_with(" dangling"));
        assert!(lines[2].starts_with('-') && lines[2].ends_with(" real"));
        assert!(lines[3].ends_with(" working -> real"));
        Ok(())
    }

    #[test]
    fn status_merge() {
        assert_eq!(Status::Success.merge(Status::Success), Status::Success);
        assert_eq!(Status::Success.merge(Status::Failure), Status::Failure);
        assert_eq!(Status::Failure.merge(Status::Success), Status::Failure);
        assert_eq!(Status::Failure.merge(Status::Failure), Status::Failure);
    }
}
