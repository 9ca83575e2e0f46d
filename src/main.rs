//! `payslip-mailer`: render and email a payslip for every employee in a
//! spreadsheet.

mod logging;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info, warn};

use payslip_mailer::batch::process_payroll;
use payslip_mailer::config::{ConfigLoader, MailConfig};
use payslip_mailer::delivery::SmtpMailer;

/// Render payslips from an employee roster and email them out.
#[derive(Debug, Parser)]
#[command(name = "payslip-mailer", version, about)]
struct Cli {
    /// Employee roster (.xlsx, .xls, .ods or .csv).
    #[arg(long, default_value = "employees.xlsx")]
    input: PathBuf,

    /// Directory receiving one PDF per employee.
    #[arg(long, default_value = "payslips")]
    output_dir: PathBuf,

    /// Optional YAML report settings (organization, footer, report date).
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Run log, appended to on every run.
    #[arg(long, default_value = "payroll_processing.log")]
    log_file: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let dotenv = dotenvy::dotenv();
    logging::init(&cli.log_file)?;
    if let Err(e) = dotenv {
        if !e.not_found() {
            warn!(error = %e, "Ignoring unreadable .env file");
        }
    }

    let mail = MailConfig::from_env().inspect_err(|e| error!(error = %e, "Setup failed"))?;
    let settings = ConfigLoader::settings_or_default(cli.settings.as_deref())
        .inspect_err(|e| error!(error = %e, "Setup failed"))?;
    info!(server = %mail.smtp_server, port = mail.smtp_port, sender = %mail.sender, "Mail configuration loaded");

    let summary = process_payroll(
        &cli.input,
        &cli.output_dir,
        &mail,
        &settings,
        SmtpMailer::new(&mail),
    )?;

    for failure in summary.failures() {
        warn!(
            employee_id = %failure.employee_id,
            reason = failure.error.as_deref().unwrap_or("unknown"),
            "Payslip not delivered"
        );
    }
    info!(
        run_id = %summary.run_id,
        total = summary.total(),
        success = summary.succeeded(),
        failures = summary.failed(),
        "Run finished"
    );

    Ok(())
}
