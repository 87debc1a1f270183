//! Query processing: derive and sort data.
//!
//! This is the third stage of the pipeline: turning a raw counting result
//! into rows ready for presentation. It provides:
//!
//! - **Options**: sort configuration for extension rows (`OrderBy`, `Ordering`)
//! - **QuerySet**: summary percentages plus sorted extension rows
//!
//! ## Example
//!
//! ```rust,ignore
//! use contalinhalib::query::{CountQuerySet, Ordering};
//!
//! let queryset = CountQuerySet::from_result(&result, Ordering::by_code());
//! ```

pub mod options;
pub mod queryset;

pub use options::{OrderBy, OrderDirection, Ordering};
pub use queryset::{percent, CountQuerySet, ExtensionRow, FileRow, Summary};
