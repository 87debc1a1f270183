//! Query set: processed data ready for rendering.
//!
//! A QuerySet sits between the raw [`CountResult`] and the presentation
//! layer. It holds the summary with percentages, the extension rows sorted
//! according to the requested [`Ordering`], and the per-file rows in
//! traversal order.
//!
//! The data pipeline is:
//! 1. Raw data (`CountResult`)
//! 2. QuerySet (derived values, sorted)
//! 3. Table or CSV (formatted strings)

use std::cmp::Ordering as CmpOrdering;

use serde::Serialize;

use crate::data::counter::CountResult;
use crate::data::stats::{round2, ExtensionStats, LineCounts};

use super::options::{OrderBy, OrderDirection, Ordering};

/// Share of `part` in `whole`, in percent. Zero when `whole` is zero.
pub fn percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

/// Overall numbers of one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub files: u64,
    pub lines: LineCounts,
    /// Total size in kilobytes, rounded to two decimals
    pub size_kb: f64,
    pub blank_percent: f64,
    pub comment_percent: f64,
    pub code_percent: f64,
    pub billable_percent: f64,
}

impl Summary {
    fn from_result(result: &CountResult) -> Self {
        let lines = result.total;
        Self {
            files: result.file_count,
            lines,
            size_kb: round2(result.size_kb()),
            blank_percent: percent(lines.blank, lines.total),
            comment_percent: percent(lines.comment, lines.total),
            code_percent: percent(lines.code(), lines.total),
            billable_percent: percent(lines.billable(), lines.total),
        }
    }
}

/// One row of the per-extension breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtensionRow {
    pub extension: String,
    pub files: u64,
    /// Share of all files, in percent
    pub files_percent: f64,
    pub lines: LineCounts,
    pub size_bytes: u64,
    /// Size in kilobytes, rounded to two decimals
    pub size_kb: f64,
    pub recognized: bool,
}

impl ExtensionRow {
    fn from_stats(stats: &ExtensionStats, total_files: u64) -> Self {
        Self {
            extension: stats.extension.clone(),
            files: stats.files,
            files_percent: percent(stats.files, total_files),
            lines: stats.lines,
            size_bytes: stats.size_bytes,
            size_kb: round2(stats.size_kb()),
            recognized: stats.recognized,
        }
    }
}

/// One row of the per-file listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileRow {
    /// Path relative to the root, with `/` separators
    pub path: String,
    pub extension: String,
    /// Size in kilobytes, rounded to two decimals
    pub size_kb: f64,
    pub lines: LineCounts,
}

/// Query set for count results.
#[derive(Debug, Clone, Serialize)]
pub struct CountQuerySet {
    /// Ordering applied to `extensions`
    pub ordering: Ordering,
    pub summary: Summary,
    /// Extension rows, sorted
    pub extensions: Vec<ExtensionRow>,
    /// File rows, in traversal order
    pub files: Vec<FileRow>,
}

impl CountQuerySet {
    /// Create a QuerySet from a CountResult, sorting extension rows.
    pub fn from_result(result: &CountResult, ordering: Ordering) -> Self {
        let mut extensions: Vec<ExtensionRow> = result
            .extensions
            .iter()
            .map(|e| ExtensionRow::from_stats(e, result.file_count))
            .collect();
        sort_extensions(&mut extensions, ordering);

        let files = result
            .files
            .iter()
            .map(|f| FileRow {
                path: f.path.to_string_lossy().replace('\\', "/"),
                extension: f.extension.clone(),
                size_kb: f.size_kb(),
                lines: f.lines,
            })
            .collect();

        CountQuerySet {
            ordering,
            summary: Summary::from_result(result),
            extensions,
            files,
        }
    }
}

fn compare(a: &ExtensionRow, b: &ExtensionRow, by: OrderBy) -> CmpOrdering {
    match by {
        OrderBy::Extension => a.extension.cmp(&b.extension),
        OrderBy::Files => a.files.cmp(&b.files),
        OrderBy::Lines => a.lines.total.cmp(&b.lines.total),
        OrderBy::Size => a.size_bytes.cmp(&b.size_bytes),
        OrderBy::Blank => a.lines.blank.cmp(&b.lines.blank),
        OrderBy::Comment => a.lines.comment.cmp(&b.lines.comment),
        OrderBy::Code => a.lines.code().cmp(&b.lines.code()),
        OrderBy::Billable => a.lines.billable().cmp(&b.lines.billable()),
    }
}

/// Stable sort; ties keep their first-seen order in both directions.
fn sort_extensions(rows: &mut [ExtensionRow], ordering: Ordering) {
    match ordering.direction {
        OrderDirection::Ascending => rows.sort_by(|a, b| compare(a, b, ordering.by)),
        OrderDirection::Descending => rows.sort_by(|a, b| compare(b, a, ordering.by)),
    }
}
