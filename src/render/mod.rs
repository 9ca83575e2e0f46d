//! Payslip document rendering.
//!
//! A payslip is first laid out as a pure [`PayslipLayout`] and then written
//! to `<output_dir>/<employee_id>.pdf`.

mod layout;
mod pdf;

pub use layout::{Element, FontFace, PAGE_HEIGHT, PAGE_WIDTH, PayslipLayout, Rgb, text_width};
pub use pdf::write_pdf;

use std::fs;
use std::path::{Component, Path};
use tracing::info;

use crate::config::ReportSettings;
use crate::error::{PayslipError, PayslipResult};
use crate::models::{Payslip, RenderedDocument};

/// Extension of generated documents.
pub const DOCUMENT_EXTENSION: &str = "pdf";

/// Checks that an employee id can be used as a file name stem.
///
/// Rejects empty ids and anything that would resolve outside the output
/// directory.
pub fn validate_file_stem(employee_id: &str) -> PayslipResult<()> {
    let invalid = |message: &str| {
        Err(PayslipError::InvalidRecord {
            employee_id: employee_id.to_string(),
            field: "Employee ID".to_string(),
            message: message.to_string(),
        })
    };

    if employee_id.trim().is_empty() {
        return invalid("is blank");
    }
    let mut components = Path::new(employee_id).components();
    let single_normal = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    );
    if !single_normal || employee_id.contains(['/', '\\']) {
        return invalid("cannot be used as a file name");
    }
    Ok(())
}

/// Renders one payslip to `<output_dir>/<employee_id>.pdf`.
///
/// Creates `output_dir` (and parents) when absent and overwrites any
/// existing document for the same employee.
///
/// # Errors
///
/// Returns [`PayslipError::InvalidRecord`] for an unusable employee id and
/// [`PayslipError::RenderFailed`] when the directory or file cannot be
/// written.
pub fn render_payslip(
    payslip: &Payslip,
    settings: &ReportSettings,
    output_dir: &Path,
) -> PayslipResult<RenderedDocument> {
    let employee_id = &payslip.record.employee_id;
    validate_file_stem(employee_id)?;

    let render_failed = |message: String| PayslipError::RenderFailed {
        employee_id: employee_id.clone(),
        message,
    };

    fs::create_dir_all(output_dir).map_err(|e| {
        render_failed(format!("cannot create {}: {}", output_dir.display(), e))
    })?;

    let path = output_dir.join(format!("{}.{}", employee_id, DOCUMENT_EXTENSION));
    let layout = PayslipLayout::build(payslip, settings);
    write_pdf(&layout, &path).map_err(render_failed)?;

    info!(employee_id = %employee_id, name = %payslip.record.name, path = %path.display(), "Payslip generated");

    Ok(RenderedDocument {
        path,
        employee_id: employee_id.clone(),
    })
}
