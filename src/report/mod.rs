//! The exported report: a spreadsheet snapshot of every record plus the same
//! summary numbers the dashboard shows.

mod export;
mod layout;
mod xlsx;

pub use export::get_export_report;
