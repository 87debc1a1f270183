//! Output formatting: present data as tables and CSV.
//!
//! This is the fourth and final stage of the pipeline. It provides:
//!
//! - **LineTable**: table-ready headers, rows and footer for the terminal
//! - **CSV export**: the two-section spreadsheet written after each run
//!
//! Both are pure presentation. All sorting happens in the query stage.
//!
//! ## Example
//!
//! ```rust,ignore
//! use contalinhalib::output::{export_csv, LineTable};
//!
//! let table = LineTable::by_extension(&queryset);
//! let path = export_csv(&result, ".", chrono::Local::now())?;
//! ```

pub mod csv;
pub mod table;

pub use csv::{csv_file_name, export_csv, format_kb, write_csv};
pub use table::{LineTable, TableRow};
