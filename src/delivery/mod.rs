//! Payslip delivery over SMTP.
//!
//! [`DeliveryAgent`] composes the payslip email and hands it to a
//! [`MailTransport`]. The production transport, [`SmtpMailer`], opens a new
//! STARTTLS session to the configured server for every message.

mod message;

pub use message::{PAYSLIP_SUBJECT, compose_payslip_message, parse_recipient, payslip_body};

use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use std::fs;
use tracing::{debug, info};

use crate::config::{MailConfig, ReportSettings};
use crate::error::{PayslipError, PayslipResult};
use crate::models::{EmployeeRecord, RenderedDocument};

/// Error type returned by transports.
pub type TransportError = Box<dyn std::error::Error + Send + Sync>;

/// Something that can submit a composed email.
pub trait MailTransport {
    /// Submits one message.
    fn send(&self, message: &Message) -> Result<(), TransportError>;
}

impl<T: MailTransport + ?Sized> MailTransport for &T {
    fn send(&self, message: &Message) -> Result<(), TransportError> {
        (**self).send(message)
    }
}

/// SMTP submission with STARTTLS and password authentication.
#[derive(Debug, Clone)]
pub struct SmtpMailer {
    config: MailConfig,
}

impl SmtpMailer {
    /// Creates a mailer for the given credentials.
    pub fn new(config: &MailConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }
}

impl MailTransport for SmtpMailer {
    fn send(&self, message: &Message) -> Result<(), TransportError> {
        let transport = SmtpTransport::starttls_relay(&self.config.smtp_server)?
            .port(self.config.smtp_port)
            .credentials(Credentials::new(
                self.config.sender.clone(),
                self.config.password.clone(),
            ))
            .build();

        transport.send(message)?;
        debug!(server = %self.config.smtp_server, "SMTP server accepted message");
        Ok(())
    }
}

/// Sends rendered payslips to employees.
pub struct DeliveryAgent<'a, T> {
    config: &'a MailConfig,
    settings: &'a ReportSettings,
    transport: T,
}

impl<'a, T: MailTransport> DeliveryAgent<'a, T> {
    /// Creates an agent that submits through `transport`.
    pub fn new(config: &'a MailConfig, settings: &'a ReportSettings, transport: T) -> Self {
        Self {
            config,
            settings,
            transport,
        }
    }

    /// Emails `document` to the record's address.
    ///
    /// # Errors
    ///
    /// Returns [`PayslipError::InvalidRecord`] for an unusable address and
    /// [`PayslipError::DeliveryFailed`] when the document cannot be read or
    /// the transport rejects the message.
    pub fn send_payslip(
        &self,
        record: &EmployeeRecord,
        document: &RenderedDocument,
    ) -> PayslipResult<()> {
        let delivery_failed = |message: String| PayslipError::DeliveryFailed {
            recipient: record.email.clone(),
            message,
        };

        let bytes = fs::read(document.path()).map_err(|e| {
            delivery_failed(format!("cannot read {}: {}", document.path().display(), e))
        })?;

        let message = compose_payslip_message(
            &self.config.sender,
            &self.settings.organization,
            record,
            &document.file_name(),
            bytes,
        )?;

        self.transport
            .send(&message)
            .map_err(|e| delivery_failed(e.to_string()))?;

        info!(employee_id = %record.employee_id, recipient = %record.email, "Payslip sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::cell::RefCell;
    use std::path::PathBuf;

    #[derive(Default)]
    struct RecordingTransport {
        sent: RefCell<Vec<String>>,
        reject: Option<&'static str>,
    }

    impl MailTransport for RecordingTransport {
        fn send(&self, message: &Message) -> Result<(), TransportError> {
            let to = message.envelope().to()[0].to_string();
            if self.reject == Some(to.as_str()) {
                return Err("550 5.1.1 mailbox unavailable".into());
            }
            self.sent.borrow_mut().push(to);
            Ok(())
        }
    }

    fn mail_config() -> MailConfig {
        MailConfig {
            smtp_server: "smtp.example.com".to_string(),
            smtp_port: 587,
            sender: "payroll@example.com".to_string(),
            password: "secret".to_string(),
        }
    }

    fn record(email: &str) -> EmployeeRecord {
        EmployeeRecord {
            employee_id: "E001".to_string(),
            name: "Jane Doe".to_string(),
            email: email.to_string(),
            basic_salary: Decimal::ONE,
            allowances: Decimal::ZERO,
            deductions: Decimal::ZERO,
        }
    }

    fn document_in(dir: &std::path::Path) -> RenderedDocument {
        let path = dir.join("E001.pdf");
        fs::write(&path, b"%PDF-1.3").unwrap();
        RenderedDocument {
            path,
            employee_id: "E001".to_string(),
        }
    }

    #[test]
    fn test_send_payslip_submits_to_record_address() {
        let dir = tempfile::tempdir().unwrap();
        let (config, settings) = (mail_config(), ReportSettings::with_date(NaiveDate::MIN));
        let transport = RecordingTransport::default();
        let agent = DeliveryAgent::new(&config, &settings, &transport);

        agent
            .send_payslip(&record("jane@example.com"), &document_in(dir.path()))
            .unwrap();

        assert_eq!(*transport.sent.borrow(), vec!["jane@example.com"]);
    }

    #[test]
    fn test_rejected_recipient_is_delivery_failure() {
        let dir = tempfile::tempdir().unwrap();
        let (config, settings) = (mail_config(), ReportSettings::with_date(NaiveDate::MIN));
        let transport = RecordingTransport {
            reject: Some("jane@example.com"),
            ..Default::default()
        };
        let agent = DeliveryAgent::new(&config, &settings, &transport);

        match agent.send_payslip(&record("jane@example.com"), &document_in(dir.path())) {
            Err(PayslipError::DeliveryFailed { recipient, message }) => {
                assert_eq!(recipient, "jane@example.com");
                assert!(message.contains("550"));
            }
            other => panic!("Expected DeliveryFailed, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_document_is_delivery_failure() {
        let (config, settings) = (mail_config(), ReportSettings::with_date(NaiveDate::MIN));
        let agent = DeliveryAgent::new(&config, &settings, RecordingTransport::default());
        let document = RenderedDocument {
            path: PathBuf::from("/nonexistent/E001.pdf"),
            employee_id: "E001".to_string(),
        };

        assert!(matches!(
            agent.send_payslip(&record("jane@example.com"), &document),
            Err(PayslipError::DeliveryFailed { .. })
        ));
    }

    #[test]
    fn test_smtp_mailer_reports_unreachable_server() {
        let config = MailConfig {
            smtp_server: "localhost".to_string(),
            // Reserved port; nothing listens there.
            smtp_port: 1,
            ..mail_config()
        };
        let message = compose_payslip_message(
            &config.sender,
            "Acme",
            &record("jane@example.com"),
            "E001.pdf",
            Vec::new(),
        )
        .unwrap();

        assert!(SmtpMailer::new(&config).send(&message).is_err());
    }
}
