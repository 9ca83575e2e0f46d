//! Employee data loading.
//!
//! Reads the input roster (CSV or spreadsheet), checks that every required
//! column is present and that amount columns are numeric, and produces
//! typed [`crate::models::EmployeeRecord`] values.

mod loader;
mod table;

pub use loader::{AMOUNT_COLUMNS, employees_from_table, load_employees};
pub use table::{Cell, RawTable, read_csv, read_spreadsheet};
