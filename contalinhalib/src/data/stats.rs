//! Core data structures for line statistics.
//!
//! Only three counts are accumulated: total, blank and comment lines. Code and
//! billable lines are always derived from them through [`LineCounts::code`]
//! and [`LineCounts::billable`], so every surface that shows them (terminal,
//! JSON, CSV) uses the same formula:
//!
//! - **code** = total − blank − comment
//! - **billable** = total − blank

use std::collections::BTreeSet;
use std::ops::{Add, AddAssign};
use std::path::PathBuf;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use super::classifier::LineKind;

/// Line counts of one file or of a group of files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineCounts {
    /// Every line read
    pub total: u64,
    /// Lines empty after trimming whitespace
    pub blank: u64,
    /// Lines fully consumed by comment syntax
    pub comment: u64,
}

impl LineCounts {
    /// Create a new LineCounts with all zeros.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one classified line.
    pub fn record(&mut self, kind: LineKind) {
        self.total += 1;
        match kind {
            LineKind::Blank => self.blank += 1,
            LineKind::Comment => self.comment += 1,
            LineKind::Code => {}
        }
    }

    /// Lines that are neither blank nor comment.
    pub fn code(&self) -> u64 {
        self.total
            .saturating_sub(self.blank)
            .saturating_sub(self.comment)
    }

    /// Lines that are not blank (comment + code).
    pub fn billable(&self) -> u64 {
        self.total.saturating_sub(self.blank)
    }
}

impl Serialize for LineCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("LineCounts", 5)?;
        state.serialize_field("total", &self.total)?;
        state.serialize_field("blank", &self.blank)?;
        state.serialize_field("comment", &self.comment)?;
        state.serialize_field("code", &self.code())?;
        state.serialize_field("billable", &self.billable())?;
        state.end()
    }
}

impl Add for LineCounts {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            total: self.total + other.total,
            blank: self.blank + other.blank,
            comment: self.comment + other.comment,
        }
    }
}

impl AddAssign for LineCounts {
    fn add_assign(&mut self, other: Self) {
        self.total += other.total;
        self.blank += other.blank;
        self.comment += other.comment;
    }
}

/// Convert a byte size to kilobytes.
pub fn kilobytes(bytes: u64) -> f64 {
    bytes as f64 / 1024.0
}

/// Round to two decimal places, ties to even.
///
/// Kilobyte values are multiples of 1/1024, so `value * 100` is exact and a
/// tie such as 0.125 rounds down to 0.12.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Statistics for a single file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileStats {
    /// Path relative to the scanned root.
    pub path: PathBuf,
    /// Extension key (see [`crate::syntax::extension_key`]).
    pub extension: String,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Line counts for this file.
    pub lines: LineCounts,
    /// Whether the extension was found in the syntax table.
    pub recognized: bool,
}

impl FileStats {
    /// Size in kilobytes, rounded to two decimals.
    pub fn size_kb(&self) -> f64 {
        round2(kilobytes(self.size_bytes))
    }
}

/// Running totals for one extension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtensionStats {
    /// Extension key
    pub extension: String,
    /// Number of files with this extension
    pub files: u64,
    /// Summed line counts
    pub lines: LineCounts,
    /// Summed size in bytes
    pub size_bytes: u64,
    /// Whether the extension was found in the syntax table
    pub recognized: bool,
}

impl ExtensionStats {
    /// Create empty stats for an extension.
    pub fn new(extension: impl Into<String>, recognized: bool) -> Self {
        Self {
            extension: extension.into(),
            files: 0,
            lines: LineCounts::new(),
            size_bytes: 0,
            recognized,
        }
    }

    /// Fold a file into these totals.
    pub fn add_file(&mut self, file: &FileStats) {
        self.files += 1;
        self.lines += file.lines;
        self.size_bytes += file.size_bytes;
    }

    /// Summed size in kilobytes (not rounded).
    pub fn size_kb(&self) -> f64 {
        kilobytes(self.size_bytes)
    }
}

/// Extensions missing from the syntax table and what they contributed.
///
/// Files under these extensions were classified with the generic fallback
/// patterns, so their comment counts are less reliable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UnrecognizedReport {
    /// Extension keys, sorted
    pub extensions: BTreeSet<String>,
    /// Number of files under those extensions
    pub files: u64,
    /// Number of lines in those files
    pub lines: u64,
}

impl UnrecognizedReport {
    /// Record one file classified with the fallback patterns.
    pub fn add_file(&mut self, file: &FileStats) {
        self.extensions.insert(file.extension.clone());
        self.files += 1;
        self.lines += file.lines.total;
    }

    pub fn is_empty(&self) -> bool {
        self.files == 0
    }
}

/// A file that could not be read completely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanIssue {
    /// Full path of the file
    pub path: PathBuf,
    /// Reason reported by the OS
    pub message: String,
}
