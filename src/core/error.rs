//! Error types for a listing pass.

use crate::utils::describe_io_error;

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can end the listing of a path or of the whole run.
///
/// Member-level failures (one entry's metadata, an unreadable symlink) never show up
/// here; the collector drops or degrades those entries instead.
#[derive(Debug, Error)]
pub enum ListError {
    /// The requested path could not be opened as a directory.
    #[error("{}: {}", .path.display(), describe_io_error(.source))]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The entry buffer could not grow while reading the directory.
    #[error("{}: Cannot allocate memory", .path.display())]
    Exhausted { path: PathBuf },

    /// Writing the listing itself failed, for example on a closed pipe.
    #[error("write error: {}", describe_io_error(.0))]
    Write(#[from] io::Error),
}

impl ListError {
    /// Whether the error only affects the path it was raised for.
    pub fn is_path_level(&self) -> bool {
        matches!(self, ListError::Open { .. } | ListError::Exhausted { .. })
    }
}
