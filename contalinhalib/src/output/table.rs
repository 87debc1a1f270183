//! Table-ready data structures for terminal output.
//!
//! `LineTable` is a pure presentation layer: headers, rows and an optional
//! footer, all already formatted as strings. Sorting and derived values come
//! from the [`CountQuerySet`]; this module only turns numbers into text.

use serde::Serialize;

use crate::data::stats::LineCounts;
use crate::query::queryset::{CountQuerySet, Summary};

/// A single row in the table (data row or footer).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    /// Row label (extension, file path, metric name)
    pub label: String,
    /// Values for each remaining column
    pub values: Vec<String>,
}

/// Table-ready data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineTable {
    /// Optional title printed above the table
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Column headers, label column first
    pub headers: Vec<String>,
    /// Data rows
    pub rows: Vec<TableRow>,
    /// Totals row
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<TableRow>,
}

fn pct(value: f64) -> String {
    format!("{:.1}%", value)
}

fn kb(value: f64) -> String {
    format!("{:.2}", value)
}

fn count_values(lines: &LineCounts) -> [String; 4] {
    [
        lines.blank.to_string(),
        lines.comment.to_string(),
        lines.code().to_string(),
        lines.billable().to_string(),
    ]
}

impl LineTable {
    /// Overall numbers with the share of each line category.
    pub fn summary(summary: &Summary) -> Self {
        let lines = &summary.lines;
        let row = |label: &str, value: String, share: String| TableRow {
            label: label.to_string(),
            values: vec![value, share],
        };

        LineTable {
            title: Some("Summary".to_string()),
            headers: vec!["Metric".into(), "Value".into(), "Percentage".into()],
            rows: vec![
                row("Total Files", summary.files.to_string(), String::new()),
                row("Total Lines", lines.total.to_string(), String::new()),
                row("Total Size (KB)", kb(summary.size_kb), String::new()),
                row(
                    "Blank Lines",
                    lines.blank.to_string(),
                    pct(summary.blank_percent),
                ),
                row(
                    "Comment Lines",
                    lines.comment.to_string(),
                    pct(summary.comment_percent),
                ),
                row(
                    "Code Lines",
                    lines.code().to_string(),
                    pct(summary.code_percent),
                ),
                row(
                    "Billable Lines",
                    lines.billable().to_string(),
                    pct(summary.billable_percent),
                ),
            ],
            footer: None,
        }
    }

    /// Per-extension breakdown in the queryset's order.
    pub fn by_extension(qs: &CountQuerySet) -> Self {
        let rows = qs
            .extensions
            .iter()
            .map(|ext| {
                let mut values = vec![
                    ext.files.to_string(),
                    ext.lines.total.to_string(),
                    kb(ext.size_kb),
                    pct(ext.files_percent),
                ];
                values.extend(count_values(&ext.lines));
                TableRow {
                    label: ext.extension.clone(),
                    values,
                }
            })
            .collect();

        let mut footer = vec![
            qs.summary.files.to_string(),
            qs.summary.lines.total.to_string(),
            kb(qs.summary.size_kb),
            if qs.summary.files > 0 {
                pct(100.0)
            } else {
                pct(0.0)
            },
        ];
        footer.extend(count_values(&qs.summary.lines));

        LineTable {
            title: Some("Per Extension".to_string()),
            headers: [
                "File Type",
                "Files",
                "Total Lines",
                "Size (KB)",
                "% of Files",
                "Blank Lines",
                "Comment Lines",
                "Code Lines",
                "Billable Lines",
            ]
            .iter()
            .map(|h| h.to_string())
            .collect(),
            rows,
            footer: Some(TableRow {
                label: format!("Total ({} types)", qs.extensions.len()),
                values: footer,
            }),
        }
    }

    /// Per-file listing in traversal order.
    pub fn by_file(qs: &CountQuerySet) -> Self {
        let rows = qs
            .files
            .iter()
            .map(|file| {
                let mut values = vec![
                    file.extension.clone(),
                    kb(file.size_kb),
                    file.lines.total.to_string(),
                ];
                values.extend(count_values(&file.lines));
                TableRow {
                    label: file.path.clone(),
                    values,
                }
            })
            .collect();

        LineTable {
            title: Some("Per File".to_string()),
            headers: [
                "Relative Path",
                "File Type",
                "Size (KB)",
                "Total Lines",
                "Blank Lines",
                "Comment Lines",
                "Code Lines",
                "Billable Lines",
            ]
            .iter()
            .map(|h| h.to_string())
            .collect(),
            rows,
            footer: None,
        }
    }

    /// Width of each column, taking headers, rows and footer into account.
    pub fn column_widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        let all_rows = self.rows.iter().chain(self.footer.iter());
        for row in all_rows {
            let cells = std::iter::once(&row.label).chain(row.values.iter());
            for (i, cell) in cells.enumerate() {
                let len = cell.chars().count();
                match widths.get_mut(i) {
                    Some(w) => *w = (*w).max(len),
                    None => widths.push(len),
                }
            }
        }
        widths
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::counter::CountResult;
    use crate::data::stats::FileStats;
    use crate::query::Ordering;
    use std::path::PathBuf;

    fn sample_queryset() -> CountQuerySet {
        let mut result = CountResult::new("/p");
        for (path, ext, size, total, blank, comment) in [
            ("a.py", ".py", 2048, 10, 2, 3),
            ("lib/b.py", ".py", 512, 4, 0, 0),
            ("c.c", ".c", 100, 6, 1, 1),
        ] {
            result.add_file(FileStats {
                path: PathBuf::from(path),
                extension: ext.to_string(),
                size_bytes: size,
                lines: LineCounts {
                    total,
                    blank,
                    comment,
                },
                recognized: true,
            });
        }
        CountQuerySet::from_result(&result, Ordering::default())
    }

    #[test]
    fn test_summary_table() {
        let table = LineTable::summary(&sample_queryset().summary);

        assert_eq!(table.rows.len(), 7);
        assert_eq!(table.rows[0].values, vec!["3", ""]);
        assert_eq!(table.rows[2].values, vec!["2.60", ""]);
        assert_eq!(table.rows[3].values, vec!["3", "15.0%"]);
        assert_eq!(table.rows[6].label, "Billable Lines");
        assert_eq!(table.rows[6].values, vec!["17", "85.0%"]);
    }

    #[test]
    fn test_extension_table() {
        let table = LineTable::by_extension(&sample_queryset());

        assert_eq!(table.headers.len(), 9);
        assert_eq!(table.rows[0].label, ".py");
        assert_eq!(
            table.rows[0].values,
            vec!["2", "14", "2.50", "66.7%", "2", "3", "9", "12"]
        );
        assert_eq!(table.rows[1].label, ".c");

        let footer = table.footer.unwrap();
        assert_eq!(footer.label, "Total (2 types)");
        assert_eq!(footer.values[0], "3");
        assert_eq!(footer.values[3], "100.0%");
    }

    #[test]
    fn test_file_table_keeps_order() {
        let table = LineTable::by_file(&sample_queryset());
        let labels: Vec<&str> = table.rows.iter().map(|r| r.label.as_str()).collect();

        assert_eq!(labels, vec!["a.py", "lib/b.py", "c.c"]);
        assert_eq!(table.rows[2].values, vec![".c", "0.10", "6", "1", "1", "4", "5"]);
        assert!(table.footer.is_none());
    }

    #[test]
    fn test_column_widths() {
        let table = LineTable::by_file(&sample_queryset());
        let widths = table.column_widths();

        assert_eq!(widths.len(), table.headers.len());
        assert_eq!(widths[0], "Relative Path".len());
    }
}
