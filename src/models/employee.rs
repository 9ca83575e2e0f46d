//! Employee record model.
//!
//! One [`EmployeeRecord`] corresponds to one row of the input spreadsheet.

use rust_decimal::Decimal;

/// Column headers every input resource must provide.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    "Employee ID",
    "Name",
    "Email",
    "Basic Salary",
    "Allowances",
    "Deductions",
];

/// A single employee's compensation row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeRecord {
    /// Unique identifier, also the stem of the payslip file name.
    pub employee_id: String,
    /// Display name printed on the payslip and used in the greeting.
    pub name: String,
    /// Delivery address. May be blank when the input cell was empty.
    pub email: String,
    /// Basic salary for the period.
    pub basic_salary: Decimal,
    /// Allowances paid on top of the basic salary.
    pub allowances: Decimal,
    /// Deductions withheld from the gross amount.
    pub deductions: Decimal,
}

impl EmployeeRecord {
    /// Returns true if the record carries a non-blank email address.
    ///
    /// # Examples
    ///
    /// ```
    /// use payslip_mailer::models::EmployeeRecord;
    /// use rust_decimal::Decimal;
    ///
    /// let record = EmployeeRecord {
    ///     employee_id: "E001".to_string(),
    ///     name: "Jane Doe".to_string(),
    ///     email: "  ".to_string(),
    ///     basic_salary: Decimal::new(500000, 2),
    ///     allowances: Decimal::ZERO,
    ///     deductions: Decimal::ZERO,
    /// };
    /// assert!(!record.has_email());
    /// ```
    pub fn has_email(&self) -> bool {
        !self.email.trim().is_empty()
    }
}
