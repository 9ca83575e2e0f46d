//! Error types for the payslip mailer.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure the batch can hit, from configuration through delivery.

use thiserror::Error;

/// Broad classification of a [`PayslipError`].
///
/// The batch orchestrator uses the category to decide whether an error
/// aborts the run or only fails the record being processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Mail configuration or report settings are missing or invalid.
    Config,
    /// The input resource is unreadable or lacks required columns.
    Schema,
    /// An amount column contains values that are not numeric.
    DataValidation,
    /// A single record cannot be processed as-is.
    Record,
    /// Document generation failed for one record.
    Render,
    /// Mail submission failed for one record.
    Delivery,
}

/// The main error type for the payslip mailer.
///
/// # Example
///
/// ```
/// use payslip_mailer::error::PayslipError;
///
/// let error = PayslipError::MissingColumns {
///     columns: vec!["Allowances".to_string()],
/// };
/// assert_eq!(error.to_string(), "Missing required columns: Allowances");
/// assert!(error.is_fatal());
/// ```
#[derive(Debug, Error)]
pub enum PayslipError {
    /// One or more required configuration keys were not set.
    #[error("Missing required configuration: {}", .keys.join(", "))]
    MissingConfig {
        /// The keys that were not set.
        keys: Vec<String>,
    },

    /// A configuration value was present but could not be used.
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidConfig {
        /// The offending key.
        key: String,
        /// A description of the problem.
        message: String,
    },

    /// The report settings file was not found at the specified path.
    #[error("Settings file not found: {path}")]
    SettingsNotFound {
        /// The path that was not found.
        path: String,
    },

    /// The report settings file could not be parsed.
    #[error("Failed to parse settings file '{path}': {message}")]
    SettingsParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The employee input could not be opened or decoded.
    #[error("Failed to read employee data from '{path}': {message}")]
    InputUnreadable {
        /// The input path.
        path: String,
        /// A description of the read failure.
        message: String,
    },

    /// The employee input has a format this tool cannot read.
    #[error("Unsupported input format for '{path}'")]
    UnsupportedInput {
        /// The input path.
        path: String,
    },

    /// The employee input lacks one or more required columns.
    #[error("Missing required columns: {}", .columns.join(", "))]
    MissingColumns {
        /// The missing column names, in canonical order.
        columns: Vec<String>,
    },

    /// An amount column holds values that cannot be read as numbers.
    #[error("{column} contains {count} invalid values")]
    InvalidValues {
        /// The column that failed validation.
        column: String,
        /// How many cells in the column were not numeric.
        count: usize,
    },

    /// A single employee record is unusable.
    #[error("Invalid employee '{employee_id}' field '{field}': {message}")]
    InvalidRecord {
        /// The employee the record belongs to.
        employee_id: String,
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// The payslip document could not be produced.
    #[error("Failed to render payslip for '{employee_id}': {message}")]
    RenderFailed {
        /// The employee whose payslip failed.
        employee_id: String,
        /// The underlying cause.
        message: String,
    },

    /// The payslip email could not be delivered.
    #[error("Failed to deliver payslip to '{recipient}': {message}")]
    DeliveryFailed {
        /// The recipient address.
        recipient: String,
        /// The underlying cause.
        message: String,
    },
}

impl PayslipError {
    /// Returns the category this error belongs to.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingConfig { .. }
            | Self::InvalidConfig { .. }
            | Self::SettingsNotFound { .. }
            | Self::SettingsParseError { .. } => ErrorCategory::Config,
            Self::InputUnreadable { .. }
            | Self::UnsupportedInput { .. }
            | Self::MissingColumns { .. } => ErrorCategory::Schema,
            Self::InvalidValues { .. } => ErrorCategory::DataValidation,
            Self::InvalidRecord { .. } => ErrorCategory::Record,
            Self::RenderFailed { .. } => ErrorCategory::Render,
            Self::DeliveryFailed { .. } => ErrorCategory::Delivery,
        }
    }

    /// Returns true if this error must abort the whole run.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::Config | ErrorCategory::Schema | ErrorCategory::DataValidation
        )
    }
}

/// A type alias for Results that return PayslipError.
pub type PayslipResult<T> = Result<T, PayslipError>;
