//! Error types for contalinhalib

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while counting lines.
///
/// Per-file read failures inside a directory scan never show up here: they
/// are recorded as [`ScanIssue`](crate::ScanIssue) entries on the result so
/// one bad file cannot abort the run.
#[derive(Error, Debug)]
pub enum ContalinhaError {
    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Path does not exist
    #[error("path does not exist: {0}")]
    PathNotFound(PathBuf),

    /// Path exists but is not a directory
    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),

    /// Root directory could not be listed
    #[error("cannot read directory '{path}': {source}")]
    DirectoryRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Invalid glob pattern
    #[error("invalid glob pattern '{pattern}': {message}")]
    InvalidGlob { pattern: String, message: String },

    /// Failed to write an export file
    #[error("failed to write '{path}': {source}")]
    Export {
        path: PathBuf,
        source: std::io::Error,
    },
}
