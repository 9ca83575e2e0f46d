//! Payslip and rendered document models.

use rust_decimal::Decimal;
use std::path::{Path, PathBuf};

use super::EmployeeRecord;

/// An employee record together with its derived net salary.
///
/// Built by [`crate::calculation::compute_payslip`]; the record itself is
/// never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payslip {
    /// The source record.
    pub record: EmployeeRecord,
    /// Basic salary plus allowances minus deductions.
    pub net_salary: Decimal,
}

/// A payslip document written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    /// Location of the generated file.
    pub path: PathBuf,
    /// The employee the document was generated for.
    pub employee_id: String,
}

impl RenderedDocument {
    /// Returns the path of the generated file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the file name used when attaching the document.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| format!("{}.pdf", self.employee_id))
    }
}
