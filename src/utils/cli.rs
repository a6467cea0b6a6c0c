//! Command-line argument parsing and help for runls.
//!
//! This module turns the raw arguments into a [CliAction]. Listing flags (`-a`, `-l`)
//! may be combined (`-la`) and mixed with paths in any order; `--` ends flag parsing.
//!
//! When invoked with no args (rls), the current directory is listed.

use crate::config::Config;

use std::ffi::OsString;
use std::path::PathBuf;

pub const USAGE: &str = "Usage: rls [-l] [-a] [directory...]";

/// What the binary should do after argument parsing.
#[derive(Debug, PartialEq, Eq)]
pub enum CliAction {
    /// List the given paths.
    List(Invocation),
    /// An informational flag was handled; exit successfully.
    Exit,
    /// Malformed arguments; the usage text was printed, exit with failure.
    Usage,
}

/// Flags and paths of a listing invocation.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Invocation {
    show_all: bool,
    long_format: bool,
    paths: Vec<PathBuf>,
}

impl Invocation {
    #[inline]
    pub fn show_all(&self) -> bool {
        self.show_all
    }

    #[inline]
    pub fn long_format(&self) -> bool {
        self.long_format
    }

    #[inline]
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }
}

/// Parses the process arguments.
pub fn handle_args() -> CliAction {
    parse_args(std::env::args_os().skip(1))
}

/// Parses arguments without the program name.
pub fn parse_args<I, S>(args: I) -> CliAction
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    let mut invocation = Invocation::default();
    let mut only_paths = false;

    for arg in args {
        let arg: OsString = arg.into();
        if only_paths {
            invocation.paths.push(PathBuf::from(arg));
            continue;
        }

        // Non UTF-8 arguments can only be paths.
        let Some(text) = arg.to_str().map(str::to_owned) else {
            invocation.paths.push(PathBuf::from(arg));
            continue;
        };

        match text.as_str() {
            "--" => only_paths = true,
            "--all" => invocation.show_all = true,
            "--long" => invocation.long_format = true,
            "-h" | "--help" => {
                print_help();
                return CliAction::Exit;
            }
            "-v" | "--version" => {
                print_version();
                return CliAction::Exit;
            }
            "--init" => {
                if let Err(e) = Config::generate_default(&Config::default_path()) {
                    eprintln!("Error: {}", e);
                }
                return CliAction::Exit;
            }
            long if long.starts_with("--") => {
                eprintln!("rls: unrecognized option '{}'", long);
                eprintln!("{}", USAGE);
                return CliAction::Usage;
            }
            short if short.len() > 1 && short.starts_with('-') => {
                for flag in short[1..].chars() {
                    match flag {
                        'a' => invocation.show_all = true,
                        'l' => invocation.long_format = true,
                        other => {
                            eprintln!("rls: invalid option -- '{}'", other);
                            eprintln!("{}", USAGE);
                            return CliAction::Usage;
                        }
                    }
                }
            }
            _ => invocation.paths.push(PathBuf::from(arg)),
        }
    }

    CliAction::List(invocation)
}

fn print_version() {
    println!("runls {}", env!("CARGO_PKG_VERSION"));
}

fn print_help() {
    println!(
        r#"runls - A small, colorful directory lister

USAGE:
  rls [OPTIONS] [DIRECTORY...]

DIRECTORY:
  Directories to list (defaults to the current directory)

OPTIONS:
  -a, --all               Include entries whose names start with '.'
  -l, --long              Use the long listing format
      --init              Generate a default configuration file
  -h, --help              Print help information
  -v, --version           Display the current installed version of runls

ENVIRONMENT:
  RUNLS_CONFIG            Override the default config path
  RUNLS_LOG               Diagnostics filter (e.g. "debug")
"#
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(args: &[&str]) -> Invocation {
        match parse_args(args.iter().copied()) {
            CliAction::List(inv) => inv,
            other => panic!("expected a listing, got {:?}", other),
        }
    }

    #[test]
    fn no_args_lists_current_dir() {
        let inv = list(&[]);
        assert!(!inv.show_all());
        assert!(!inv.long_format());
        assert!(inv.paths().is_empty());
    }

    #[test]
    fn combined_and_separate_flags() {
        let cases: [&[&str]; 4] = [&["-la"], &["-al"], &["-l", "-a"], &["--all", "--long"]];
        for args in cases {
            let inv = list(args);
            assert!(inv.show_all() && inv.long_format(), "flags lost for {:?}", args);
        }
    }

    #[test]
    fn flags_and_paths_mix() {
        let inv = list(&["src", "-l", "tests"]);
        assert!(inv.long_format());
        assert_eq!(inv.paths(), [PathBuf::from("src"), PathBuf::from("tests")]);
    }

    #[test]
    fn double_dash_ends_flags() {
        let inv = list(&["-a", "--", "-l", "-"]);
        assert!(inv.show_all());
        assert!(!inv.long_format());
        assert_eq!(inv.paths(), [PathBuf::from("-l"), PathBuf::from("-")]);
    }

    #[test]
    fn lone_dash_is_a_path() {
        assert_eq!(list(&["-"]).paths(), [PathBuf::from("-")]);
    }

    #[test]
    fn unknown_flags_are_usage_errors() {
        assert_eq!(parse_args(["-x"]), CliAction::Usage);
        assert_eq!(parse_args(["-lz", "dir"]), CliAction::Usage);
        assert_eq!(parse_args(["--color"]), CliAction::Usage);
    }
}
