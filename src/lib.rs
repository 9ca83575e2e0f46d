//! Payslip generation and delivery.
//!
//! This crate reads an employee compensation roster, computes net pay,
//! renders a PDF payslip per employee and emails it to them, isolating
//! per-employee failures and tallying the outcome of the run.

#![warn(missing_docs)]

pub mod batch;
pub mod calculation;
pub mod config;
pub mod delivery;
pub mod error;
pub mod models;
pub mod render;
pub mod roster;
