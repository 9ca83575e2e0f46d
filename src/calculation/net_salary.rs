//! Net salary calculation.

use rust_decimal::Decimal;

use crate::error::{PayslipError, PayslipResult};
use crate::models::{EmployeeRecord, Payslip};

/// Calculates net salary as basic salary plus allowances minus deductions.
///
/// Decimal arithmetic is exact; rounding happens only when an amount is
/// formatted for display. Returns `None` when the result falls outside the
/// range of [`Decimal`].
///
/// # Examples
///
/// ```
/// use payslip_mailer::calculation::net_salary;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let net = net_salary(
///     Decimal::from_str("5000.00").unwrap(),
///     Decimal::from_str("250.00").unwrap(),
///     Decimal::from_str("120.50").unwrap(),
/// );
/// assert_eq!(net, Some(Decimal::from_str("5129.50").unwrap()));
/// assert_eq!(net_salary(Decimal::MAX, Decimal::ONE, Decimal::ZERO), None);
/// ```
pub fn net_salary(
    basic_salary: Decimal,
    allowances: Decimal,
    deductions: Decimal,
) -> Option<Decimal> {
    basic_salary.checked_add(allowances)?.checked_sub(deductions)
}

/// Derives the payslip figures for one record.
///
/// # Errors
///
/// Returns [`PayslipError::InvalidRecord`] on the `Net Salary` field when
/// the amounts overflow.
pub fn compute_payslip(record: &EmployeeRecord) -> PayslipResult<Payslip> {
    let net = net_salary(record.basic_salary, record.allowances, record.deductions).ok_or_else(
        || PayslipError::InvalidRecord {
            employee_id: record.employee_id.clone(),
            field: "Net Salary".to_string(),
            message: "amounts overflow the supported decimal range".to_string(),
        },
    )?;

    Ok(Payslip {
        net_salary: net,
        record: record.clone(),
    })
}
