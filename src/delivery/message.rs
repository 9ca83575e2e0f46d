//! Payslip email composition.

use lettre::{Address, Message};
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};

use crate::error::{PayslipError, PayslipResult};
use crate::models::EmployeeRecord;

/// Subject line of every payslip email.
pub const PAYSLIP_SUBJECT: &str = "Your Monthly Payslip";

/// Body text greeting the employee by name.
pub fn payslip_body(name: &str, organization: &str) -> String {
    format!(
        "Dear {},\n\nPlease find attached your payslip for this month.\n\nBest regards,\n{}.",
        name, organization
    )
}

/// Parses the record's email address into a mailbox.
///
/// # Errors
///
/// Returns [`PayslipError::InvalidRecord`] for a blank or malformed address.
pub fn parse_recipient(record: &EmployeeRecord) -> PayslipResult<Mailbox> {
    let invalid = |message: String| PayslipError::InvalidRecord {
        employee_id: record.employee_id.clone(),
        field: "Email".to_string(),
        message,
    };

    if !record.has_email() {
        return Err(invalid("is blank".to_string()));
    }
    let address = record
        .email
        .trim()
        .parse::<Address>()
        .map_err(|e| invalid(format!("'{}' is not a valid address: {}", record.email, e)))?;
    Ok(Mailbox::new(Some(record.name.clone()), address))
}

/// Builds the payslip email for one record with the PDF attached.
///
/// # Example
///
/// ```
/// use payslip_mailer::delivery::compose_payslip_message;
/// use payslip_mailer::models::EmployeeRecord;
/// use rust_decimal::Decimal;
///
/// let record = EmployeeRecord {
///     employee_id: "E001".to_string(),
///     name: "Jane Doe".to_string(),
///     email: "jane@example.com".to_string(),
///     basic_salary: Decimal::ZERO,
///     allowances: Decimal::ZERO,
///     deductions: Decimal::ZERO,
/// };
///
/// let message = compose_payslip_message(
///     "payroll@example.com",
///     "Acme Ltd",
///     &record,
///     "E001.pdf",
///     b"%PDF-1.3".to_vec(),
/// )?;
/// assert_eq!(message.envelope().to()[0].to_string(), "jane@example.com");
/// # Ok::<(), payslip_mailer::error::PayslipError>(())
/// ```
pub fn compose_payslip_message(
    sender: &str,
    organization: &str,
    record: &EmployeeRecord,
    file_name: &str,
    document: Vec<u8>,
) -> PayslipResult<Message> {
    let recipient = parse_recipient(record)?;
    let delivery_failed = |message: String| PayslipError::DeliveryFailed {
        recipient: record.email.clone(),
        message,
    };

    let from = sender
        .parse::<Mailbox>()
        .map_err(|e| delivery_failed(format!("invalid sender '{}': {}", sender, e)))?;
    let pdf = ContentType::parse("application/pdf")
        .map_err(|e| delivery_failed(e.to_string()))?;

    Message::builder()
        .from(from)
        .to(recipient)
        .subject(PAYSLIP_SUBJECT)
        .multipart(
            MultiPart::mixed()
                .singlepart(SinglePart::plain(payslip_body(&record.name, organization)))
                .singlepart(Attachment::new(file_name.to_string()).body(document, pdf)),
        )
        .map_err(|e| delivery_failed(e.to_string()))
}
