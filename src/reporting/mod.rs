//! Result reporting: console table and CSV export.

pub mod export;
pub mod table;

pub use export::{export_filename, write_csv, ReportError};
pub use table::{render_table, ReportRow};
