//! Source discovery: find files to analyze.
//!
//! This is the first stage of the pipeline: walking the root directory and
//! applying include/exclude glob patterns.
//!
//! ## Example
//!
//! ```rust,ignore
//! use contalinhalib::source::{discover_files, FilterConfig};
//!
//! let filter = FilterConfig::new().exclude("target/**")?;
//! let files = discover_files(".", &filter, false)?;
//! ```

pub mod filter;

pub use filter::{check_root, discover_files, FilterConfig};
