//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for building mail
//! credentials from environment lookups and report settings from YAML.

use chrono::{Local, NaiveDate};
use std::fs;
use std::path::Path;

use crate::error::{PayslipError, PayslipResult};

use super::types::{
    DEFAULT_SMTP_PORT, DEFAULT_SMTP_SERVER, MailConfig, ReportSettings, SettingsFile,
};

/// Loads process configuration.
///
/// # Environment
///
/// | Variable | Required | Description |
/// |----------|----------|-------------|
/// | `SENDER_EMAIL` | Yes | Sender address and SMTP login (alias `FROM_EMAIL`) |
/// | `EMAIL_PASSWORD` | Yes | Password or app token |
/// | `SMTP_SERVER` | No | Host (alias `SMTP_HOST`, default `smtp.gmail.com`) |
/// | `SMTP_PORT` | No | Port (default `587`) |
#[derive(Debug, Clone, Copy)]
pub struct ConfigLoader;

impl ConfigLoader {
    /// Builds a [`MailConfig`] from a key lookup function.
    ///
    /// Blank values count as unset. All missing required keys are reported
    /// together.
    ///
    /// # Example
    ///
    /// ```
    /// use payslip_mailer::config::ConfigLoader;
    /// use std::collections::HashMap;
    ///
    /// let env: HashMap<&str, &str> = [
    ///     ("SENDER_EMAIL", "payroll@example.com"),
    ///     ("EMAIL_PASSWORD", "secret"),
    /// ]
    /// .into_iter()
    /// .collect();
    ///
    /// let config = ConfigLoader::mail_from_lookup(|k| env.get(k).map(|v| v.to_string()))?;
    /// assert_eq!(config.smtp_server, "smtp.gmail.com");
    /// assert_eq!(config.smtp_port, 587);
    /// # Ok::<(), payslip_mailer::error::PayslipError>(())
    /// ```
    pub fn mail_from_lookup<F>(lookup: F) -> PayslipResult<MailConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let sender = get("SENDER_EMAIL").or_else(|| get("FROM_EMAIL"));
        let password = get("EMAIL_PASSWORD");

        let mut missing = Vec::new();
        if sender.is_none() {
            missing.push("SENDER_EMAIL".to_string());
        }
        if password.is_none() {
            missing.push("EMAIL_PASSWORD".to_string());
        }

        let (Some(sender), Some(password)) = (sender, password) else {
            return Err(PayslipError::MissingConfig { keys: missing });
        };

        let smtp_server = get("SMTP_SERVER")
            .or_else(|| get("SMTP_HOST"))
            .unwrap_or_else(|| DEFAULT_SMTP_SERVER.to_string());

        let smtp_port = match get("SMTP_PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|e| PayslipError::InvalidConfig {
                    key: "SMTP_PORT".to_string(),
                    message: format!("'{}' is not a valid port: {}", raw, e),
                })?,
            None => DEFAULT_SMTP_PORT,
        };

        Ok(MailConfig {
            smtp_server,
            smtp_port,
            sender: sender.trim().to_string(),
            password,
        })
    }

    /// Loads report settings from a YAML file, dating the run today.
    pub fn load_settings<P: AsRef<Path>>(path: P) -> PayslipResult<ReportSettings> {
        Self::load_settings_on(path, Local::now().date_naive())
    }

    /// Loads report settings from a YAML file, using `today` when the file
    /// does not fix a report date.
    pub fn load_settings_on<P: AsRef<Path>>(
        path: P,
        today: NaiveDate,
    ) -> PayslipResult<ReportSettings> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| PayslipError::SettingsNotFound {
            path: path_str.clone(),
        })?;

        // An empty document deserializes as unit, not as an empty map.
        let file = if content.trim().is_empty() {
            SettingsFile::default()
        } else {
            serde_yaml::from_str::<SettingsFile>(&content).map_err(|e| {
                PayslipError::SettingsParseError {
                    path: path_str,
                    message: e.to_string(),
                }
            })?
        };

        Ok(ReportSettings::from_file(file, today))
    }

    /// Loads report settings from `path` if given, otherwise the defaults.
    pub fn settings_or_default(path: Option<&Path>) -> PayslipResult<ReportSettings> {
        match path {
            Some(path) => Self::load_settings(path),
            None => Ok(ReportSettings::with_date(Local::now().date_naive())),
        }
    }
}
