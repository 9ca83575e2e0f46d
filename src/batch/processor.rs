//! Per-record pipeline and run summary.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{error, info, info_span, warn};
use uuid::Uuid;

use crate::calculation::compute_payslip;
use crate::config::{MailConfig, ReportSettings};
use crate::delivery::{DeliveryAgent, MailTransport, parse_recipient};
use crate::error::{PayslipError, PayslipResult};
use crate::models::{BatchSummary, EmployeeRecord, RecordOutcome, RecordState};
use crate::render::{render_payslip, validate_file_stem};
use crate::roster::load_employees;

/// A configured payroll run.
///
/// Holding a `PayrollBatch` implies the mail configuration has already been
/// built, so a run can only start once credentials are known.
pub struct PayrollBatch<'a, T> {
    settings: &'a ReportSettings,
    agent: DeliveryAgent<'a, T>,
}

impl<'a, T: MailTransport> PayrollBatch<'a, T> {
    /// Creates a batch that delivers through `transport`.
    pub fn new(mail: &'a MailConfig, settings: &'a ReportSettings, transport: T) -> Self {
        Self {
            settings,
            agent: DeliveryAgent::new(mail, settings, transport),
        }
    }

    /// Loads `input` and processes every record into `output_dir`.
    ///
    /// # Errors
    ///
    /// Only load failures are returned; they abort the run before any
    /// document is written. Per-record failures are reported in the
    /// returned [`BatchSummary`].
    pub fn run(&self, input: &Path, output_dir: &Path) -> PayslipResult<BatchSummary> {
        let run_id = Uuid::new_v4();
        let span = info_span!("payroll_run", %run_id);
        let _guard = span.enter();

        info!(input = %input.display(), output_dir = %output_dir.display(), "Payroll processing started");

        let records = load_employees(input).inspect_err(|e| {
            error!(error = %e, "Failed to read employee data");
        })?;

        Ok(self.process_records(run_id, &records, output_dir))
    }

    /// Processes already loaded records in order and tallies the outcomes.
    pub fn process_records(
        &self,
        run_id: Uuid,
        records: &[EmployeeRecord],
        output_dir: &Path,
    ) -> BatchSummary {
        let mut summary = BatchSummary::new(run_id);
        let mut seen = HashSet::new();

        for record in records {
            let outcome = self.process_record(record, output_dir, &mut seen);
            summary.outcomes.push(outcome);
        }

        info!(
            success = summary.succeeded(),
            failures = summary.failed(),
            "Payroll processing completed"
        );
        summary
    }

    fn process_record(
        &self,
        record: &EmployeeRecord,
        output_dir: &Path,
        seen: &mut HashSet<String>,
    ) -> RecordOutcome {
        let mut reached = RecordState::Pending;
        let mut document = None;

        let result = self.advance(record, output_dir, seen, &mut reached, &mut document);

        let (state, error) = match result {
            Ok(()) => (RecordState::Delivered, None),
            Err(e) => {
                error!(
                    employee_id = %record.employee_id,
                    name = %record.name,
                    stage = ?reached,
                    error = %e,
                    "Failed to process payslip"
                );
                (RecordState::Failed, Some(e.to_string()))
            }
        };
        debug_assert!(reached == state || reached.can_transition_to(state));

        RecordOutcome {
            employee_id: record.employee_id.clone(),
            name: record.name.clone(),
            state,
            reached,
            document,
            error,
        }
    }

    fn advance(
        &self,
        record: &EmployeeRecord,
        output_dir: &Path,
        seen: &mut HashSet<String>,
        reached: &mut RecordState,
        document: &mut Option<PathBuf>,
    ) -> PayslipResult<()> {
        validate_file_stem(&record.employee_id)?;
        parse_recipient(record)?;

        if !seen.insert(record.employee_id.clone()) {
            warn!(employee_id = %record.employee_id, "Duplicate employee ID in input");
            return Err(PayslipError::InvalidRecord {
                employee_id: record.employee_id.clone(),
                field: "Employee ID".to_string(),
                message: "duplicates an earlier row; payslip not regenerated".to_string(),
            });
        }

        let payslip = compute_payslip(record)?;
        let rendered = render_payslip(&payslip, self.settings, output_dir)?;
        *reached = RecordState::Rendered;
        *document = Some(rendered.path.clone());

        self.agent.send_payslip(record, &rendered)?;
        *reached = RecordState::Delivered;
        Ok(())
    }
}

/// Runs a full payroll batch over `input`, writing into `output_dir`.
///
/// # Example
///
/// ```no_run
/// use payslip_mailer::batch::process_payroll;
/// use payslip_mailer::config::{ConfigLoader, MailConfig};
/// use payslip_mailer::delivery::SmtpMailer;
/// use std::path::Path;
///
/// let mail = MailConfig::from_env()?;
/// let settings = ConfigLoader::settings_or_default(None)?;
/// let summary = process_payroll(
///     Path::new("employees.xlsx"),
///     Path::new("payslips"),
///     &mail,
///     &settings,
///     SmtpMailer::new(&mail),
/// )?;
/// println!("{} sent, {} failed", summary.succeeded(), summary.failed());
/// # Ok::<(), payslip_mailer::error::PayslipError>(())
/// ```
pub fn process_payroll<T: MailTransport>(
    input: &Path,
    output_dir: &Path,
    mail: &MailConfig,
    settings: &ReportSettings,
    transport: T,
) -> PayslipResult<BatchSummary> {
    PayrollBatch::new(mail, settings, transport).run(input, output_dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delivery::TransportError;
    use chrono::NaiveDate;
    use lettre::Message;
    use rust_decimal::Decimal;
    use std::cell::RefCell;

    #[derive(Default)]
    struct StubTransport {
        sent: RefCell<Vec<String>>,
        reject: Vec<&'static str>,
    }

    impl MailTransport for StubTransport {
        fn send(&self, message: &Message) -> Result<(), TransportError> {
            let to = message.envelope().to()[0].to_string();
            if self.reject.iter().any(|r| *r == to) {
                return Err(format!("550 recipient {} rejected", to).into());
            }
            self.sent.borrow_mut().push(to);
            Ok(())
        }
    }

    fn mail() -> MailConfig {
        MailConfig {
            smtp_server: "smtp.example.com".to_string(),
            smtp_port: 587,
            sender: "payroll@example.com".to_string(),
            password: "secret".to_string(),
        }
    }

    fn settings() -> ReportSettings {
        ReportSettings::with_date(NaiveDate::from_ymd_opt(2025, 4, 10).unwrap())
    }

    fn record(id: &str, email: &str) -> EmployeeRecord {
        EmployeeRecord {
            employee_id: id.to_string(),
            name: format!("Employee {}", id),
            email: email.to_string(),
            basic_salary: Decimal::from(3000),
            allowances: Decimal::from(200),
            deductions: Decimal::from(100),
        }
    }

    #[test]
    fn test_all_records_delivered() {
        let dir = tempfile::tempdir().unwrap();
        let (mail, settings) = (mail(), settings());
        let transport = StubTransport::default();
        let batch = PayrollBatch::new(&mail, &settings, &transport);

        let records = [record("E1", "e1@example.com"), record("E2", "e2@example.com")];
        let summary = batch.process_records(Uuid::new_v4(), &records, dir.path());

        assert_eq!(summary.succeeded(), 2);
        assert_eq!(summary.failed(), 0);
        assert_eq!(*transport.sent.borrow(), vec!["e1@example.com", "e2@example.com"]);
        assert!(summary.outcomes.iter().all(|o| o.reached == RecordState::Delivered));
    }

    #[test]
    fn test_rejected_address_fails_only_that_record() {
        let dir = tempfile::tempdir().unwrap();
        let (mail, settings) = (mail(), settings());
        let transport = StubTransport {
            reject: vec!["e2@example.com"],
            ..Default::default()
        };
        let batch = PayrollBatch::new(&mail, &settings, &transport);

        let records = [
            record("E1", "e1@example.com"),
            record("E2", "e2@example.com"),
            record("E3", "e3@example.com"),
        ];
        let summary = batch.process_records(Uuid::new_v4(), &records, dir.path());

        assert_eq!(summary.succeeded(), 2);
        assert_eq!(summary.failed(), 1);

        let failed = &summary.outcomes[1];
        assert_eq!(failed.state, RecordState::Failed);
        assert_eq!(failed.reached, RecordState::Rendered);
        assert!(failed.document.is_some());
        assert!(failed.error.as_deref().unwrap().contains("e2@example.com"));
        assert_eq!(*transport.sent.borrow(), vec!["e1@example.com", "e3@example.com"]);
    }

    #[test]
    fn test_missing_email_fails_before_rendering() {
        let dir = tempfile::tempdir().unwrap();
        let (mail, settings) = (mail(), settings());
        let batch = PayrollBatch::new(&mail, &settings, StubTransport::default());

        let summary =
            batch.process_records(Uuid::new_v4(), &[record("E1", "")], dir.path());

        let outcome = &summary.outcomes[0];
        assert_eq!(outcome.state, RecordState::Failed);
        assert_eq!(outcome.reached, RecordState::Pending);
        assert!(outcome.document.is_none());
        assert!(!dir.path().join("E1.pdf").exists());
    }

    #[test]
    fn test_duplicate_id_does_not_overwrite_first_document() {
        let dir = tempfile::tempdir().unwrap();
        let (mail, settings) = (mail(), settings());
        let transport = StubTransport::default();
        let batch = PayrollBatch::new(&mail, &settings, &transport);

        let records = [record("E1", "first@example.com"), record("E1", "second@example.com")];
        let summary = batch.process_records(Uuid::new_v4(), &records, dir.path());

        assert_eq!(summary.succeeded(), 1);
        assert_eq!(summary.outcomes[1].state, RecordState::Failed);
        assert_eq!(*transport.sent.borrow(), vec!["first@example.com"]);
    }

    #[test]
    fn test_overflowing_amounts_fail_only_that_record() {
        let dir = tempfile::tempdir().unwrap();
        let (mail, settings) = (mail(), settings());
        let transport = StubTransport::default();
        let batch = PayrollBatch::new(&mail, &settings, &transport);

        let overflowing = EmployeeRecord {
            basic_salary: Decimal::MAX,
            allowances: Decimal::ONE,
            ..record("E2", "e2@example.com")
        };
        let records = [
            record("E1", "e1@example.com"),
            overflowing,
            record("E3", "e3@example.com"),
        ];
        let summary = batch.process_records(Uuid::new_v4(), &records, dir.path());

        assert_eq!(summary.succeeded(), 2);
        assert_eq!(summary.failed(), 1);
        let failed = &summary.outcomes[1];
        assert_eq!(failed.reached, RecordState::Pending);
        assert!(failed.error.as_deref().unwrap().contains("Net Salary"));
        assert!(!dir.path().join("E2.pdf").exists());
        assert_eq!(*transport.sent.borrow(), vec!["e1@example.com", "e3@example.com"]);
    }

    #[test]
    fn test_render_failure_is_counted_and_batch_continues() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocked");
        std::fs::write(&blocker, b"").unwrap();
        let (mail, settings) = (mail(), settings());
        let transport = StubTransport::default();
        let batch = PayrollBatch::new(&mail, &settings, &transport);

        let records = [record("E1", "e1@example.com"), record("E2", "e2@example.com")];
        let summary = batch.process_records(Uuid::new_v4(), &records, &blocker);

        assert_eq!(summary.failed(), 2);
        assert!(transport.sent.borrow().is_empty());
    }

    #[test]
    fn test_run_aborts_on_load_failure() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("employees.csv");
        std::fs::write(&input, "Employee ID,Name,Email\nE1,Jane,jane@example.com\n").unwrap();
        let output_dir = dir.path().join("payslips");
        let (mail, settings) = (mail(), settings());

        let result = process_payroll(
            &input,
            &output_dir,
            &mail,
            &settings,
            StubTransport::default(),
        );

        assert!(matches!(result, Err(PayslipError::MissingColumns { .. })));
        assert!(!output_dir.exists());
    }
}
