//! Configuration types for the payslip mailer.
//!
//! This module contains the strongly-typed configuration structures that
//! are built from the environment or deserialized from YAML.

use chrono::NaiveDate;
use serde::Deserialize;
use std::fmt;

use crate::error::PayslipResult;

/// SMTP host used when `SMTP_SERVER` is not set.
pub const DEFAULT_SMTP_SERVER: &str = "smtp.gmail.com";

/// SMTP submission port used when `SMTP_PORT` is not set.
pub const DEFAULT_SMTP_PORT: u16 = 587;

/// Mail submission credentials, loaded once per process.
#[derive(Clone, PartialEq, Eq)]
pub struct MailConfig {
    /// Hostname of the SMTP submission server.
    pub smtp_server: String,
    /// Submission port; STARTTLS is negotiated on it.
    pub smtp_port: u16,
    /// Sender address, also used as the SMTP login.
    pub sender: String,
    /// Password or app token for the sender account.
    pub password: String,
}

impl MailConfig {
    /// Builds the mail configuration from the process environment.
    ///
    /// See [`super::ConfigLoader::mail_from_lookup`] for the recognised keys.
    pub fn from_env() -> PayslipResult<Self> {
        super::ConfigLoader::mail_from_lookup(|key| std::env::var(key).ok())
    }
}

impl fmt::Debug for MailConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailConfig")
            .field("smtp_server", &self.smtp_server)
            .field("smtp_port", &self.smtp_port)
            .field("sender", &self.sender)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Raw contents of a report settings file. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SettingsFile {
    /// Title printed in the header band and used to sign emails.
    pub organization: Option<String>,
    /// Closing message printed in the footer band.
    pub footer_message: Option<String>,
    /// Date printed on every payslip of the run.
    pub report_date: Option<NaiveDate>,
    /// Symbol prefixed to every amount.
    pub currency_symbol: Option<String>,
    /// Currency code shown in the amount column header.
    pub currency_code: Option<String>,
}

/// Resolved report settings shared by every payslip in a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSettings {
    /// Title printed in the header band and used to sign emails.
    pub organization: String,
    /// Closing message printed in the footer band.
    pub footer_message: String,
    /// Date printed on every payslip of the run.
    pub report_date: NaiveDate,
    /// Symbol prefixed to every amount.
    pub currency_symbol: String,
    /// Currency code shown in the amount column header.
    pub currency_code: String,
}

impl ReportSettings {
    /// Organization title used when none is configured.
    pub const DEFAULT_ORGANIZATION: &'static str = "TINPROTA Hardware";
    /// Footer message used when none is configured.
    pub const DEFAULT_FOOTER: &'static str = "THANK YOU FOR YOUR HARDWORK!";
    /// Currency symbol used when none is configured.
    pub const DEFAULT_CURRENCY: &'static str = "$";
    /// Currency code used when none is configured.
    pub const DEFAULT_CURRENCY_CODE: &'static str = "USD";

    /// Default settings with the given report date.
    pub fn with_date(report_date: NaiveDate) -> Self {
        Self {
            organization: Self::DEFAULT_ORGANIZATION.to_string(),
            footer_message: Self::DEFAULT_FOOTER.to_string(),
            report_date,
            currency_symbol: Self::DEFAULT_CURRENCY.to_string(),
            currency_code: Self::DEFAULT_CURRENCY_CODE.to_string(),
        }
    }

    /// Resolves a settings file, taking `today` when no report date is set.
    pub fn from_file(file: SettingsFile, today: NaiveDate) -> Self {
        let defaults = Self::with_date(file.report_date.unwrap_or(today));
        Self {
            organization: file.organization.unwrap_or(defaults.organization),
            footer_message: file.footer_message.unwrap_or(defaults.footer_message),
            report_date: defaults.report_date,
            currency_symbol: file.currency_symbol.unwrap_or(defaults.currency_symbol),
            currency_code: file.currency_code.unwrap_or(defaults.currency_code),
        }
    }

    /// The report date as printed on the payslip, e.g. `April 10, 2025`.
    pub fn display_date(&self) -> String {
        self.report_date.format("%B %-d, %Y").to_string()
    }
}
