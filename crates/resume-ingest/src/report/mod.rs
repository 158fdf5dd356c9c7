//! Summary counters and CSV export

mod csv_export;
mod summary;

pub use csv_export::{export_csv, REPORT_FILENAME, REPORT_HEADER};
pub use summary::summarize;
