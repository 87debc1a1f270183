//! File filtering and discovery with glob pattern support.
//!
//! Discovery walks the whole tree, files before subdirectories within each
//! directory and names in byte order, so repeated scans of an unchanged tree
//! visit files in the same order.

use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};

use glob::Pattern;
use tracing::warn;
use walkdir::{DirEntry, WalkDir};

use crate::error::ContalinhaError;
use crate::Result;

/// Configuration for file filtering.
///
/// Patterns are matched against the path relative to the scanned root, with
/// `/` separators.
#[derive(Debug, Clone, Default)]
pub struct FilterConfig {
    /// Glob patterns to include (if empty, include every file)
    pub include: Vec<Pattern>,
    /// Glob patterns to exclude
    pub exclude: Vec<Pattern>,
}

impl FilterConfig {
    /// Create a new empty filter config (includes every file).
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an include pattern.
    pub fn include(mut self, pattern: &str) -> Result<Self> {
        self.include.push(compile(pattern)?);
        Ok(self)
    }

    /// Add an exclude pattern.
    pub fn exclude(mut self, pattern: &str) -> Result<Self> {
        self.exclude.push(compile(pattern)?);
        Ok(self)
    }

    /// Add multiple include patterns.
    pub fn include_many(mut self, patterns: &[&str]) -> Result<Self> {
        for pattern in patterns {
            self = self.include(pattern)?;
        }
        Ok(self)
    }

    /// Add multiple exclude patterns.
    pub fn exclude_many(mut self, patterns: &[&str]) -> Result<Self> {
        for pattern in patterns {
            self = self.exclude(pattern)?;
        }
        Ok(self)
    }

    /// Check if a relative path matches the filter criteria.
    ///
    /// A path matches if it matches at least one include pattern (or include
    /// is empty) and no exclude pattern.
    pub fn matches(&self, relative: &Path) -> bool {
        let path_str = relative.to_string_lossy().replace('\\', "/");

        if self.exclude.iter().any(|p| p.matches(&path_str)) {
            return false;
        }

        self.include.is_empty() || self.include.iter().any(|p| p.matches(&path_str))
    }
}

fn compile(pattern: &str) -> Result<Pattern> {
    Pattern::new(pattern).map_err(|e| ContalinhaError::InvalidGlob {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })
}

/// Check that `root` is a readable directory.
pub fn check_root(root: &Path) -> Result<()> {
    if !root.exists() {
        return Err(ContalinhaError::PathNotFound(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(ContalinhaError::NotADirectory(root.to_path_buf()));
    }
    fs::read_dir(root).map_err(|source| ContalinhaError::DirectoryRead {
        path: root.to_path_buf(),
        source,
    })?;
    Ok(())
}

/// Files first, then directories; each group by name.
fn walk_order(a: &DirEntry, b: &DirEntry) -> Ordering {
    a.file_type()
        .is_dir()
        .cmp(&b.file_type().is_dir())
        .then_with(|| a.file_name().cmp(b.file_name()))
}

/// Whether an entry is counted as a file.
///
/// When links are not followed, a symlink counts as a file unless it points
/// to a directory; a dangling link is kept so its read failure gets reported.
fn is_countable(entry: &DirEntry) -> bool {
    let file_type = entry.file_type();
    if file_type.is_symlink() {
        return !entry.path().is_dir();
    }
    !file_type.is_dir()
}

/// Discover files under `root` in traversal order.
///
/// The root itself must be a readable directory. Subdirectories that cannot
/// be read are skipped with a warning.
pub fn discover_files(
    root: impl AsRef<Path>,
    filter: &FilterConfig,
    follow_links: bool,
) -> Result<Vec<PathBuf>> {
    let root = root.as_ref();
    check_root(root)?;

    let mut files = Vec::new();
    let walker = WalkDir::new(root)
        .follow_links(follow_links)
        .sort_by(walk_order);

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!("skipping unreadable entry: {e}");
                continue;
            }
        };

        if entry.depth() == 0 || !is_countable(&entry) {
            continue;
        }

        let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
        if filter.matches(relative) {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}
