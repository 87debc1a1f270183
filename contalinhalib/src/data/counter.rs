//! High-level counting API.
//!
//! [`count_directory`] walks a tree, scans every file and folds the results
//! into a [`CountResult`]: overall totals, per-extension totals, per-file
//! detail in traversal order, the unrecognized extension report and the list
//! of files that could not be read.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::ContalinhaError;
use crate::source::filter::{discover_files, FilterConfig};
use crate::syntax::{extension_key, ResolvedSyntax};
use crate::Result;

use super::scanner::scan_file;
use super::stats::{
    kilobytes, ExtensionStats, FileStats, LineCounts, ScanIssue, UnrecognizedReport,
};

/// Options for counting.
#[derive(Debug, Clone, Default)]
pub struct CountOptions {
    /// File filter configuration
    pub file_filter: FilterConfig,
    /// Follow symbolic links while walking
    pub follow_links: bool,
}

impl CountOptions {
    /// Create new default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set file filter.
    pub fn filter(mut self, filter: FilterConfig) -> Self {
        self.file_filter = filter;
        self
    }

    /// Follow symbolic links.
    pub fn follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }
}

/// Result of counting a directory tree.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CountResult {
    /// Root directory that was scanned
    pub root: PathBuf,
    /// Total number of files
    pub file_count: u64,
    /// Line counts across all files
    pub total: LineCounts,
    /// Size of all files in bytes
    pub size_bytes: u64,
    /// Per-extension totals, in order of first appearance
    pub extensions: Vec<ExtensionStats>,
    /// Per-file statistics, in traversal order
    pub files: Vec<FileStats>,
    /// Extensions classified with the fallback patterns
    pub unrecognized: UnrecognizedReport,
    /// Files that could not be read completely
    pub issues: Vec<ScanIssue>,
}

impl CountResult {
    /// Create a new empty result for `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    /// Fold one scanned file into every total.
    pub fn add_file(&mut self, file: FileStats) {
        self.file_count += 1;
        self.total += file.lines;
        self.size_bytes += file.size_bytes;

        match self
            .extensions
            .iter_mut()
            .find(|e| e.extension == file.extension)
        {
            Some(ext) => ext.add_file(&file),
            None => {
                let mut ext = ExtensionStats::new(file.extension.clone(), file.recognized);
                ext.add_file(&file);
                self.extensions.push(ext);
            }
        }

        if !file.recognized {
            self.unrecognized.add_file(&file);
        }

        self.files.push(file);
    }

    /// Total size in kilobytes (not rounded).
    pub fn size_kb(&self) -> f64 {
        kilobytes(self.size_bytes)
    }

    /// Stats for one extension key, if any file had it.
    pub fn extension(&self, key: &str) -> Option<&ExtensionStats> {
        self.extensions.iter().find(|e| e.extension == key)
    }
}

/// Count lines in every file under `path`.
///
/// Fails only when `path` is not a readable directory or a filter pattern is
/// invalid. Files that cannot be read are recorded in
/// [`CountResult::issues`] with whatever lines were counted before the
/// failure.
///
/// # Example
///
/// ```rust
/// use contalinhalib::{count_directory, CountOptions};
/// use std::fs;
/// use tempfile::tempdir;
///
/// let dir = tempdir().unwrap();
/// fs::write(dir.path().join("app.py"), "# comment\n\nx = 1\n").unwrap();
///
/// let result = count_directory(dir.path(), &CountOptions::new()).unwrap();
/// assert_eq!(result.file_count, 1);
/// assert_eq!(result.total.code(), 1);
/// assert_eq!(result.total.billable(), 2);
/// ```
pub fn count_directory(path: impl AsRef<Path>, options: &CountOptions) -> Result<CountResult> {
    let root = path.as_ref();
    let files = discover_files(root, &options.file_filter, options.follow_links)?;

    let mut result = CountResult::new(root);

    for file_path in files {
        let relative = file_path
            .strip_prefix(root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| file_path.clone());
        let file_name = file_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let extension = extension_key(&file_name);
        let syntax = ResolvedSyntax::resolve(&extension);
        let outcome = scan_file(&file_path, syntax);

        if let Some(error) = outcome.error {
            result.issues.push(ScanIssue {
                path: file_path.clone(),
                message: error.to_string(),
            });
        }

        let size_bytes = match fs::metadata(&file_path) {
            Ok(meta) => meta.len(),
            Err(error) => {
                warn!(path = %file_path.display(), "cannot read file size: {error}");
                0
            }
        };

        result.add_file(FileStats {
            path: relative,
            extension,
            size_bytes,
            lines: outcome.lines,
            recognized: syntax.is_recognized(),
        });
    }

    debug!(
        root = %root.display(),
        files = result.file_count,
        lines = result.total.total,
        unrecognized = result.unrecognized.files,
        issues = result.issues.len(),
        "counted directory"
    );

    Ok(result)
}

/// Count lines in a single file, resolving its syntax from its name.
///
/// Unlike [`count_directory`], a read failure here is an error.
///
/// # Example
///
/// ```rust
/// use contalinhalib::count_file;
/// use std::fs;
/// use tempfile::tempdir;
///
/// let dir = tempdir().unwrap();
/// let path = dir.path().join("main.c");
/// fs::write(&path, "/* start\nstill comment\nend */\n").unwrap();
///
/// let lines = count_file(&path).unwrap();
/// assert_eq!(lines.comment, 3);
/// assert_eq!(lines.code(), 0);
/// ```
pub fn count_file(path: impl AsRef<Path>) -> Result<LineCounts> {
    let path = path.as_ref();
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let outcome = scan_file(path, ResolvedSyntax::resolve(&extension_key(&file_name)));

    match outcome.error {
        Some(source) => Err(ContalinhaError::FileRead {
            path: path.to_path_buf(),
            source,
        }),
        None => Ok(outcome.lines),
    }
}
