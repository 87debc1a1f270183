//! CSV export of a counting result.
//!
//! The file has two sections separated by an empty row: per-extension totals
//! (most files first) and per-file detail (traversal order). Rows end with
//! CRLF and fields are quoted only when they contain a comma, a quote, CR or
//! LF.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing::debug;

use crate::data::counter::CountResult;
use crate::error::ContalinhaError;
use crate::query::{CountQuerySet, Ordering};
use crate::Result;

/// Title row of the extension section.
pub const EXTENSION_TITLE: &str = "Estatísticas por extensão";

/// Header row of the extension section.
pub const EXTENSION_HEADERS: [&str; 8] = [
    "Extensão",
    "Arquivos",
    "Linhas",
    "Tamanho (KB)",
    "Linhas em Branco",
    "Linhas de Comentário",
    "Linhas de Código",
    "Billable Lines",
];

/// Header row of the file section.
pub const FILE_HEADERS: [&str; 8] = [
    "Relative Path",
    "File Type",
    "File Size (Kbytes)",
    "Total of Lines",
    "Blank Lines",
    "Comment Lines",
    "Code Lines",
    "Billable Lines",
];

/// Format a kilobyte value the way it appears in the CSV: shortest
/// round-trip form, always with a fractional part (`1.5`, `2.0`).
pub fn format_kb(value: f64) -> String {
    let text = value.to_string();
    if text.contains('.') || !value.is_finite() {
        text
    } else {
        format!("{text}.0")
    }
}

fn quote(field: &str) -> String {
    if field.contains([',', '"', '\r', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn write_row<W: Write, S: AsRef<str>>(out: &mut W, fields: &[S]) -> io::Result<()> {
    let line = fields
        .iter()
        .map(|f| quote(f.as_ref()))
        .collect::<Vec<_>>()
        .join(",");
    out.write_all(line.as_bytes())?;
    out.write_all(b"\r\n")
}

/// Write `result` as CSV to `out`.
pub fn write_csv<W: Write>(result: &CountResult, mut out: W) -> io::Result<()> {
    let qs = CountQuerySet::from_result(result, Ordering::by_files());

    write_row(&mut out, &[EXTENSION_TITLE])?;
    write_row(&mut out, &EXTENSION_HEADERS)?;
    for row in &qs.extensions {
        write_row(
            &mut out,
            &[
                row.extension.clone(),
                row.files.to_string(),
                row.lines.total.to_string(),
                format_kb(row.size_kb),
                row.lines.blank.to_string(),
                row.lines.comment.to_string(),
                row.lines.code().to_string(),
                row.lines.billable().to_string(),
            ],
        )?;
    }

    out.write_all(b"\r\n")?;

    write_row(&mut out, &FILE_HEADERS)?;
    for row in &qs.files {
        write_row(
            &mut out,
            &[
                row.path.clone(),
                row.extension.clone(),
                format_kb(row.size_kb),
                row.lines.total.to_string(),
                row.lines.blank.to_string(),
                row.lines.comment.to_string(),
                row.lines.code().to_string(),
                row.lines.billable().to_string(),
            ],
        )?;
    }

    out.flush()
}

/// File name for an export started at `started`: `result_YYYY-MM-DD-HH-MM.csv`.
pub fn csv_file_name(started: DateTime<Local>) -> String {
    format!("result_{}.csv", started.format("%Y-%m-%d-%H-%M"))
}

/// Write `result` to a timestamped CSV file inside `dir`.
///
/// An existing file with the same name is overwritten. Returns the path
/// written.
pub fn export_csv(
    result: &CountResult,
    dir: impl AsRef<Path>,
    started: DateTime<Local>,
) -> Result<PathBuf> {
    let path = dir.as_ref().join(csv_file_name(started));
    let export_err = |source| ContalinhaError::Export {
        path: path.clone(),
        source,
    };

    let file = File::create(&path).map_err(export_err)?;
    write_csv(result, BufWriter::new(file)).map_err(export_err)?;

    debug!(path = %path.display(), rows = result.files.len(), "exported csv");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::stats::{FileStats, LineCounts};
    use chrono::TimeZone;
    use std::fs;
    use tempfile::tempdir;

    fn file(path: &str, ext: &str, size: u64, lines: (u64, u64, u64)) -> FileStats {
        FileStats {
            path: PathBuf::from(path),
            extension: ext.to_string(),
            size_bytes: size,
            lines: LineCounts {
                total: lines.0,
                blank: lines.1,
                comment: lines.2,
            },
            recognized: true,
        }
    }

    fn render(result: &CountResult) -> String {
        let mut buf = Vec::new();
        write_csv(result, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_format_kb() {
        assert_eq!(format_kb(1.5), "1.5");
        assert_eq!(format_kb(0.0), "0.0");
        assert_eq!(format_kb(2.0), "2.0");
        assert_eq!(format_kb(0.98), "0.98");
        assert_eq!(format_kb(1234.0), "1234.0");
    }

    #[test]
    fn test_quote() {
        assert_eq!(quote("plain"), "plain");
        assert_eq!(quote("a,b"), "\"a,b\"");
        assert_eq!(quote("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(quote("line\nbreak"), "\"line\nbreak\"");
    }

    #[test]
    fn test_write_csv_layout() {
        let mut result = CountResult::new("/p");
        result.add_file(file("app.py", ".py", 1536, (3, 1, 1)));
        result.add_file(file("src/main.c", ".c", 0, (3, 0, 3)));
        result.add_file(file("src/util.c", ".c", 1024, (10, 2, 0)));

        let text = render(&result);
        let rows: Vec<&str> = text.split("\r\n").collect();

        assert_eq!(
            rows,
            vec![
                "Estatísticas por extensão",
                "Extensão,Arquivos,Linhas,Tamanho (KB),Linhas em Branco,Linhas de Comentário,Linhas de Código,Billable Lines",
                ".c,2,13,1.0,2,3,8,11",
                ".py,1,3,1.5,1,1,1,2",
                "",
                "Relative Path,File Type,File Size (Kbytes),Total of Lines,Blank Lines,Comment Lines,Code Lines,Billable Lines",
                "app.py,.py,1.5,3,1,1,1,2",
                "src/main.c,.c,0.0,3,0,3,0,3",
                "src/util.c,.c,1.0,10,2,0,8,8",
                "",
            ]
        );
    }

    #[test]
    fn test_write_csv_empty_result() {
        let text = render(&CountResult::new("/empty"));
        assert_eq!(text.matches("\r\n").count(), 4);
        assert!(text.ends_with("Billable Lines\r\n"));
    }

    #[test]
    fn test_size_ties_round_to_even() {
        let mut result = CountResult::new("/p");
        result.add_file(file("a.py", ".py", 128, (1, 0, 0)));
        result.add_file(file("b.py", ".py", 640, (1, 0, 0)));

        let text = render(&result);
        assert!(text.contains("\r\na.py,.py,0.12,"));
        assert!(text.contains("\r\nb.py,.py,0.62,"));
        // 768 B = 0.75 KB, no tie
        assert!(text.contains("\r\n.py,2,2,0.75,"));
    }

    #[test]
    fn test_paths_with_commas_are_quoted() {
        let mut result = CountResult::new("/p");
        result.add_file(file("a,b.py", ".py", 0, (1, 0, 0)));

        let text = render(&result);
        assert!(text.contains("\"a,b.py\",.py,0.0,1,0,0,1,1\r\n"));
    }

    #[test]
    fn test_csv_file_name() {
        let started = Local.with_ymd_and_hms(2024, 3, 7, 9, 5, 42).unwrap();
        assert_eq!(csv_file_name(started), "result_2024-03-07-09-05.csv");
    }

    #[test]
    fn test_export_csv_writes_file() {
        let temp = tempdir().unwrap();
        let mut result = CountResult::new("/p");
        result.add_file(file("x.rs", ".rs", 10, (2, 0, 0)));
        let started = Local.with_ymd_and_hms(2024, 1, 2, 3, 4, 0).unwrap();

        let path = export_csv(&result, temp.path(), started).unwrap();

        assert_eq!(path, temp.path().join("result_2024-01-02-03-04.csv"));
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("Estatísticas por extensão\r\n"));
        assert!(content.contains("x.rs,.rs,0.01,2,0,0,2,2\r\n"));
    }

    #[test]
    fn test_export_to_missing_dir_fails() {
        let temp = tempdir().unwrap();
        let result = CountResult::new("/p");
        let started = Local.with_ymd_and_hms(2024, 1, 2, 3, 4, 0).unwrap();

        let err = export_csv(&result, temp.path().join("nope"), started).unwrap_err();
        assert!(matches!(err, ContalinhaError::Export { .. }));
    }
}
