//! # contalinhalib
//!
//! A multi-language line counter that separates blank, comment and code
//! lines, and reports billable lines (everything that is not blank).
//!
//! ## Overview
//!
//! Every file under a directory is keyed by its extension and classified line
//! by line with that language's comment syntax:
//!
//! - **Blank**: empty after trimming whitespace
//! - **Comment**: starts with a line marker, or is part of a block comment
//! - **Code**: everything else, including lines that mix code and comment
//!
//! Extensions missing from the built-in table fall back to a generic set of
//! regular-expression patterns and are listed in an unrecognized report, so
//! their comment counts can be taken with a grain of salt.
//!
//! ## Pipeline
//!
//! 1. [`source`]: walk the tree and apply glob filters
//! 2. [`data`]: classify lines and aggregate statistics
//! 3. [`query`]: derive percentages and sort extension rows
//! 4. [`output`]: format tables and export CSV
//!
//! ## Example
//!
//! ```rust
//! use contalinhalib::{count_directory, CountOptions, CountQuerySet, FilterConfig, Ordering};
//! use std::fs;
//! use tempfile::tempdir;
//!
//! let dir = tempdir().unwrap();
//! fs::write(dir.path().join("app.py"), "# comment\n\nx = 1\n").unwrap();
//! fs::write(dir.path().join("main.c"), "/* start\nstill comment\nend */\n").unwrap();
//!
//! let result = count_directory(dir.path(), &CountOptions::new()).unwrap();
//! assert_eq!(result.file_count, 2);
//! assert_eq!(result.total.total, 6);
//! assert_eq!(result.total.comment, 4);
//! assert_eq!(result.total.code(), 1);
//!
//! // Sort extensions by code lines
//! let queryset = CountQuerySet::from_result(&result, Ordering::by_code());
//! assert_eq!(queryset.extensions[0].extension, ".py");
//!
//! // Count with filtering
//! let filter = FilterConfig::new().exclude("*.c").unwrap();
//! let result = count_directory(dir.path(), &CountOptions::new().filter(filter)).unwrap();
//! assert_eq!(result.file_count, 1);
//! ```

pub mod data;
pub mod error;
pub mod output;
pub mod query;
pub mod source;
pub mod syntax;

pub use data::{
    count_directory, count_file, CountOptions, CountResult, ExtensionStats, FileStats, LineCounts,
    LineKind, ScanIssue, UnrecognizedReport,
};
pub use error::ContalinhaError;
pub use output::{export_csv, write_csv, LineTable, TableRow};
pub use query::{CountQuerySet, OrderBy, OrderDirection, Ordering};
pub use source::FilterConfig;
pub use syntax::{extension_key, ResolvedSyntax, NO_EXTENSION};

/// Result type for contalinhalib operations
pub type Result<T> = std::result::Result<T, ContalinhaError>;
