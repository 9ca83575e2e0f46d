//! Batch orchestration.
//!
//! Drives the whole run: load the roster once, then for every record in
//! input order compute, render and deliver its payslip. Setup and load
//! failures abort the run; per-record failures are logged, counted and
//! skipped.

mod processor;

pub use processor::{PayrollBatch, process_payroll};
