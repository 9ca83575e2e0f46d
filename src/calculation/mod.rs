//! Payroll calculation for the payslip mailer.
//!
//! This module derives net salary from a record's amounts and formats
//! amounts for display on the payslip.

mod currency;
mod net_salary;

pub use currency::format_currency;
pub use net_salary::{compute_payslip, net_salary};
