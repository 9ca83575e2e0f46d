//! Core data models for the payslip mailer.
//!
//! This module contains the domain models passed between the loader,
//! calculator, renderer, delivery agent and batch orchestrator.

mod employee;
mod outcome;
mod payslip;

pub use employee::{EmployeeRecord, REQUIRED_COLUMNS};
pub use outcome::{BatchSummary, RecordOutcome, RecordState};
pub use payslip::{Payslip, RenderedDocument};
