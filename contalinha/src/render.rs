//! Terminal rendering for CLI output.
//!
//! Tables come pre-formatted from [`LineTable`]; this module only pads the
//! cells and applies `console` styles. Styles are dropped automatically when
//! stdout is not a terminal.

use console::Style;
use contalinhalib::{CountQuerySet, CountResult, LineTable, TableRow};

/// Longest label shown before truncation.
const MAX_LABEL_WIDTH: usize = 60;

/// Truncate a label to fit within max_len, adding ".." prefix if needed
fn truncate_label(label: &str, max_len: usize) -> String {
    let len = label.chars().count();
    if len > max_len {
        let tail: String = label.chars().skip(len - max_len + 2).collect();
        format!("..{}", tail)
    } else {
        label.to_string()
    }
}

fn pad_left(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{}{}", text, " ".repeat(width.saturating_sub(len)))
}

fn pad_right(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{}{}", " ".repeat(width.saturating_sub(len)), text)
}

fn format_row(row: &TableRow, widths: &[usize], label: &Style, values: &Style) -> String {
    let mut line = label
        .apply_to(pad_left(&truncate_label(&row.label, widths[0]), widths[0]))
        .to_string();
    for (value, width) in row.values.iter().zip(&widths[1..]) {
        line.push_str("  ");
        line.push_str(&values.apply_to(pad_right(value, *width)).to_string());
    }
    line
}

/// Render one table with a title, header, separator and optional footer.
pub fn render_table(table: &LineTable) -> String {
    let mut widths = table.column_widths();
    if let Some(first) = widths.first_mut() {
        *first = (*first).min(MAX_LABEL_WIDTH);
    }

    let bold = Style::new().bold();
    let label = Style::new().cyan();
    let plain = Style::new();

    let mut out = String::new();
    if let Some(title) = &table.title {
        out.push_str(&bold.apply_to(title).to_string());
        out.push('\n');
    }

    let header = TableRow {
        label: table.headers.first().cloned().unwrap_or_default(),
        values: table.headers.iter().skip(1).cloned().collect(),
    };
    out.push_str(&format_row(&header, &widths, &bold, &bold));
    out.push('\n');

    let separator_len = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
    let separator = "-".repeat(separator_len);
    out.push_str(&separator);
    out.push('\n');

    for row in &table.rows {
        out.push_str(&format_row(row, &widths, &label, &plain));
        out.push('\n');
    }

    if let Some(footer) = &table.footer {
        out.push_str(&separator);
        out.push('\n');
        out.push_str(&format_row(footer, &widths, &bold, &bold));
        out.push('\n');
    }

    out
}

/// Caveat about extensions classified with the generic patterns.
pub fn render_unrecognized(result: &CountResult) -> Option<String> {
    let report = &result.unrecognized;
    if report.is_empty() {
        return None;
    }

    let names: Vec<&str> = report.extensions.iter().map(String::as_str).collect();

    let warn = Style::new().yellow();
    Some(format!(
        "{}\n  Extensions: {}\n  {} files, {} lines counted with generic comment patterns; \
         comment counts may be inaccurate.\n",
        warn.apply_to("Unrecognized extensions"),
        names.join(", "),
        report.files,
        report.lines,
    ))
}

/// List of files that could not be read completely.
pub fn render_issues(result: &CountResult) -> Option<String> {
    if result.issues.is_empty() {
        return None;
    }

    let red = Style::new().red();
    let mut out = format!(
        "{}\n",
        red.apply_to(format!("Could not read {} files", result.issues.len()))
    );
    for issue in &result.issues {
        out.push_str(&format!("  {}: {}\n", issue.path.display(), issue.message));
    }
    Some(out)
}

/// Full terminal report: summary, extensions, optional files, caveats.
pub fn render_report(result: &CountResult, qs: &CountQuerySet, by_file: bool) -> String {
    let mut sections = vec![
        render_table(&LineTable::summary(&qs.summary)),
        render_table(&LineTable::by_extension(qs)),
    ];
    if by_file {
        sections.push(render_table(&LineTable::by_file(qs)));
    }
    sections.extend(render_unrecognized(result));
    sections.extend(render_issues(result));
    sections.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use contalinhalib::{FileStats, LineCounts, Ordering, ScanIssue, NO_EXTENSION};
    use std::path::PathBuf;

    fn sample_result() -> CountResult {
        let mut result = CountResult::new("/p");
        result.add_file(FileStats {
            path: PathBuf::from("app.py"),
            extension: ".py".to_string(),
            size_bytes: 1024,
            lines: LineCounts {
                total: 3,
                blank: 1,
                comment: 1,
            },
            recognized: true,
        });
        result.add_file(FileStats {
            path: PathBuf::from("notes.xyz"),
            extension: ".xyz".to_string(),
            size_bytes: 10,
            lines: LineCounts {
                total: 1,
                blank: 0,
                comment: 1,
            },
            recognized: false,
        });
        result
    }

    #[test]
    fn test_truncate_label() {
        assert_eq!(truncate_label("short", 10), "short");
        assert_eq!(truncate_label("abcdefghij", 6), "..ghij");
    }

    #[test]
    fn test_render_table_has_headers_and_footer() {
        let result = sample_result();
        let qs = CountQuerySet::from_result(&result, Ordering::default());
        let text = console::strip_ansi_codes(&render_table(&LineTable::by_extension(&qs)))
            .to_string();

        assert!(text.contains("Per Extension"));
        assert!(text.contains("File Type"));
        assert!(text.contains("Billable Lines"));
        assert!(text.contains(".py"));
        assert!(text.contains("Total (2 types)"));
    }

    #[test]
    fn test_render_unrecognized() {
        let result = sample_result();
        let text = console::strip_ansi_codes(&render_unrecognized(&result).unwrap()).to_string();

        assert!(text.contains(".xyz"));
        assert!(text.contains("1 files, 1 lines"));
        assert!(render_unrecognized(&CountResult::new("/p")).is_none());
    }

    #[test]
    fn test_unrecognized_shows_sentinel_key_unchanged() {
        let mut result = CountResult::new("/p");
        result.add_file(FileStats {
            path: PathBuf::from("LICENSE"),
            extension: NO_EXTENSION.to_string(),
            size_bytes: 4,
            lines: LineCounts {
                total: 1,
                blank: 0,
                comment: 0,
            },
            recognized: false,
        });

        let text = console::strip_ansi_codes(&render_unrecognized(&result).unwrap()).to_string();
        assert!(text.contains("Extensions: (sem extensão)"));
    }

    #[test]
    fn test_render_issues() {
        let mut result = sample_result();
        assert!(render_issues(&result).is_none());

        result.issues.push(ScanIssue {
            path: PathBuf::from("/p/locked.py"),
            message: "permission denied".to_string(),
        });
        let text = console::strip_ansi_codes(&render_issues(&result).unwrap()).to_string();
        assert!(text.contains("locked.py: permission denied"));
    }

    #[test]
    fn test_render_report_by_file() {
        let result = sample_result();
        let qs = CountQuerySet::from_result(&result, Ordering::default());

        let text = console::strip_ansi_codes(&render_report(&result, &qs, true)).to_string();
        assert!(text.contains("Summary"));
        assert!(text.contains("Per File"));
        assert!(text.contains("notes.xyz"));

        let text = console::strip_ansi_codes(&render_report(&result, &qs, false)).to_string();
        assert!(!text.contains("Per File"));
    }
}
