//! File scanner: feeds a file through the line classifier.
//!
//! Files are decoded as Latin-1, where every byte maps to exactly one
//! character, so decoding never fails and no file is skipped for its
//! encoding. Comment detection may be imprecise for files in other
//! encodings; line counts are not affected.
//!
//! `\n`, `\r\n` and a lone `\r` all terminate a line. A final line without a
//! terminator still counts.

use std::collections::VecDeque;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use tracing::{debug, trace, warn};

use crate::syntax::ResolvedSyntax;

use super::classifier::LineClassifier;
use super::stats::LineCounts;

/// Outcome of scanning one file.
///
/// `lines` holds whatever was counted before `error` (if any) interrupted the
/// read, which is zero when the file could not be opened.
#[derive(Debug)]
pub struct ScanOutcome {
    pub lines: LineCounts,
    pub error: Option<io::Error>,
}

/// Splits a byte stream into Latin-1 decoded lines.
struct LineReader<R> {
    reader: R,
    buf: Vec<u8>,
    pending: VecDeque<String>,
}

impl<R: BufRead> LineReader<R> {
    fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            pending: VecDeque::new(),
        }
    }

    fn next_line(&mut self) -> io::Result<Option<String>> {
        loop {
            if let Some(line) = self.pending.pop_front() {
                return Ok(Some(line));
            }

            self.buf.clear();
            if self.reader.read_until(b'\n', &mut self.buf)? == 0 {
                return Ok(None);
            }

            let mut chunk = self.buf.as_slice();
            if let Some(rest) = chunk.strip_suffix(b"\n") {
                chunk = rest;
            }
            if let Some(rest) = chunk.strip_suffix(b"\r") {
                chunk = rest;
            }
            for piece in chunk.split(|&b| b == b'\r') {
                self.pending.push_back(decode_latin1(piece));
            }
        }
    }
}

fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Scan any reader, stopping at the first I/O error.
pub fn scan_reader<R: BufRead>(reader: R, syntax: ResolvedSyntax) -> ScanOutcome {
    let mut lines = LineReader::new(reader);
    let mut classifier = LineClassifier::new(syntax);
    let mut counts = LineCounts::new();

    loop {
        match lines.next_line() {
            Ok(Some(line)) => {
                let kind = classifier.next_line(&line);
                trace!(line_no = counts.total + 1, ?kind, "{line}");
                counts.record(kind);
            }
            Ok(None) => {
                return ScanOutcome {
                    lines: counts,
                    error: None,
                }
            }
            Err(error) => {
                return ScanOutcome {
                    lines: counts,
                    error: Some(error),
                }
            }
        }
    }
}

/// Scan the file at `path` with the given syntax.
///
/// Failures are logged and returned in the outcome, never raised, so a
/// caller walking many files can keep going.
pub fn scan_file(path: impl AsRef<Path>, syntax: ResolvedSyntax) -> ScanOutcome {
    let path = path.as_ref();
    let outcome = match File::open(path) {
        Ok(file) => scan_reader(BufReader::new(file), syntax),
        Err(error) => ScanOutcome {
            lines: LineCounts::new(),
            error: Some(error),
        },
    };

    match &outcome.error {
        Some(error) => warn!(
            path = %path.display(),
            counted = outcome.lines.total,
            "failed to read file: {error}"
        ),
        None => debug!(
            path = %path.display(),
            total = outcome.lines.total,
            blank = outcome.lines.blank,
            comment = outcome.lines.comment,
            "scanned file"
        ),
    }

    outcome
}

/// Count the lines of an in-memory source with the syntax of `extension`.
///
/// ```rust
/// use contalinhalib::data::scanner::count_str;
///
/// let lines = count_str("# comment\n\nx = 1\n", ".py");
/// assert_eq!((lines.total, lines.blank, lines.comment, lines.code()), (3, 1, 1, 1));
/// ```
pub fn count_str(source: &str, extension: &str) -> LineCounts {
    scan_reader(source.as_bytes(), ResolvedSyntax::resolve(extension)).lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Read;
    use tempfile::tempdir;

    fn totals(lines: LineCounts) -> (u64, u64, u64, u64, u64) {
        (
            lines.total,
            lines.blank,
            lines.comment,
            lines.code(),
            lines.billable(),
        )
    }

    #[test]
    fn empty_source() {
        assert_eq!(count_str("", ".py"), LineCounts::new());
    }

    #[test]
    fn python_scenario() {
        let lines = count_str("# comment\n\nx = 1\n", ".py");
        assert_eq!(totals(lines), (3, 1, 1, 1, 2));
    }

    #[test]
    fn c_block_scenario() {
        let lines = count_str("/* start\nstill comment\nend */\n", ".c");
        assert_eq!(totals(lines), (3, 0, 3, 0, 3));
    }

    #[test]
    fn unterminated_last_line_counts() {
        assert_eq!(count_str("a = 1\nb = 2", ".py").total, 2);
        assert_eq!(count_str("\n", ".py").total, 1);
    }

    #[test]
    fn bare_rem_survives_terminator_stripping() {
        let lines = count_str("REM\nx\n", ".bat2");
        assert_eq!(totals(lines), (2, 0, 1, 1, 2));
        assert_eq!(count_str("rem\r\n", ".unknown").comment, 1);
    }

    #[test]
    fn crlf_and_cr_line_endings() {
        assert_eq!(count_str("a\r\nb\r\n", ".py").total, 2);
        assert_eq!(count_str("a\rb\rc", ".py").total, 3);
        assert_eq!(count_str("a\r\r\n", ".py").total, 2);
        assert_eq!(count_str("a\r", ".py").total, 1);
    }

    #[test]
    fn carry_resets_per_scan() {
        let first = count_str("/* open\n", ".c");
        let second = count_str("int x;\n", ".c");
        assert_eq!(first.comment, 1);
        assert_eq!(second.code(), 1);
    }

    #[test]
    fn latin1_bytes_never_fail() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("legacy.py");
        fs::write(&path, b"# coment\xe1rio\n\xff\xfe = 1\n\n").unwrap();

        let outcome = scan_file(&path, ResolvedSyntax::resolve(".py"));

        assert!(outcome.error.is_none());
        assert_eq!(totals(outcome.lines), (3, 1, 1, 1, 2));
    }

    #[test]
    fn missing_file_yields_zero_and_error() {
        let temp = tempdir().unwrap();
        let outcome = scan_file(temp.path().join("gone.c"), ResolvedSyntax::resolve(".c"));

        assert_eq!(outcome.lines, LineCounts::new());
        assert_eq!(outcome.error.unwrap().kind(), io::ErrorKind::NotFound);
    }

    struct FailAfter {
        data: &'static [u8],
        served: bool,
    }

    impl Read for FailAfter {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.served {
                return Err(io::Error::new(io::ErrorKind::Other, "device gone"));
            }
            self.served = true;
            let n = self.data.len().min(buf.len());
            buf[..n].copy_from_slice(&self.data[..n]);
            Ok(n)
        }
    }

    #[test]
    fn read_error_keeps_partial_counts() {
        let reader = BufReader::new(FailAfter {
            data: b"// one\ntwo();\n",
            served: false,
        });
        let outcome = scan_reader(reader, ResolvedSyntax::resolve(".c"));

        assert_eq!(totals(outcome.lines), (2, 0, 1, 1, 2));
        assert!(outcome.error.is_some());
    }
}
