//! Data collection: classify lines and collect statistics.
//!
//! This is the second stage of the pipeline. It provides:
//!
//! - **Classification**: per-line blank/comment/code decisions with block carry
//! - **Scanning**: reading one file through the classifier
//! - **Statistics**: `LineCounts`, `FileStats`, `ExtensionStats`
//! - **Counting**: the high-level API (`count_directory`, `count_file`)
//!
//! ## Example
//!
//! ```rust,ignore
//! use contalinhalib::data::{count_directory, CountOptions};
//!
//! let result = count_directory(".", &CountOptions::new())?;
//! println!("Code lines: {}", result.total.code());
//! ```

pub mod classifier;
pub mod counter;
pub mod scanner;
pub mod stats;

pub use classifier::{classify, BlockCarry, Classification, LineClassifier, LineKind};
pub use counter::{count_directory, count_file, CountOptions, CountResult};
pub use scanner::{count_str, scan_file, scan_reader, ScanOutcome};
pub use stats::{ExtensionStats, FileStats, LineCounts, ScanIssue, UnrecognizedReport};
