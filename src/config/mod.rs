//! Configuration for the payslip mailer.
//!
//! Mail credentials come from the environment and are read once at startup.
//! Report settings (organization title, footer, report date) come from an
//! optional YAML file and fall back to built-in defaults.
//!
//! # Example
//!
//! ```no_run
//! use payslip_mailer::config::{ConfigLoader, MailConfig};
//!
//! let mail = MailConfig::from_env().unwrap();
//! let settings = ConfigLoader::load_settings("./payslip.yaml").unwrap();
//! println!("Sending as {} for {}", mail.sender, settings.organization);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    DEFAULT_SMTP_PORT, DEFAULT_SMTP_SERVER, MailConfig, ReportSettings, SettingsFile,
};
