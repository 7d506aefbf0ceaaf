//! Command-line front end for the certification pipeline.

use std::fs;
use std::process;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use apiscore_core::report::model::{filter_results, parse_error_description};
use apiscore_core::report::{parse_results, render_text};
use apiscore_core::submit::{HttpValidationService, ServiceResponse, ValidationService};
use apiscore_core::{certify, Cancellation, CertifyError, CertifyRequest};

mod args;

use args::{Args, CertifyArgs, Command, OutputFormat, VerifyArgs};

/// Exit codes for CI integration
pub mod exit_codes {
    /// Submission accepted by the service
    pub const SUCCESS: i32 = 0;
    /// No usable project at the root
    pub const PROJECT_ERROR: i32 = 1;
    /// Archive extraction or staging failed
    pub const ARCHIVE_ERROR: i32 = 2;
    /// Missing or unusable configuration
    pub const CONFIG_ERROR: i32 = 3;
    /// Service unreachable or submission rejected
    pub const SERVICE_ERROR: i32 = 4;
    /// Run cancelled between steps
    pub const CANCELLED: i32 = 130;
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let code = match &args.command {
        Command::Certify(cmd) => run_certify(cmd)?,
        Command::Verify(cmd) => run_verify(cmd)?,
    };
    process::exit(code);
}

fn init_logging(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_certify(cmd: &CertifyArgs) -> Result<i32> {
    let Some(service_url) = resolve_url(cmd.service_url.as_deref()) else {
        return Ok(fail(&CertifyError::NoServiceUrl));
    };
    tracing::debug!(url = %service_url, "certification service selected");
    let service = match HttpValidationService::new(&service_url, cmd.insecure) {
        Ok(service) => service,
        Err(err) => return Ok(fail(&CertifyError::from(err))),
    };

    let request = CertifyRequest {
        root: cmd.path.clone(),
        validation_type: cmd.validation_type.clone(),
    };
    let certification = match certify(&request, &service, &Cancellation::new()) {
        Ok(certification) => certification,
        Err(err) => return Ok(fail(&err)),
    };

    if !certification.response.is_success() {
        eprintln!(
            "error[SERVICE_REJECTED]: status {}: {}",
            certification.response.status,
            service_detail(&certification.response)
        );
        return Ok(exit_codes::SERVICE_ERROR);
    }

    let results =
        parse_results(&certification.response.body).map(|r| filter_results(r, cmd.api_name.as_deref()));

    let output = match (cmd.format, &results) {
        (OutputFormat::Json, Some(results)) => serde_json::to_string_pretty(results)?,
        // The body was not the expected result array; forward it as-is.
        (OutputFormat::Json, None) => certification.response.body.clone(),
        (OutputFormat::Text, results) => {
            render_text(&certification, results.as_deref().unwrap_or(&[]))
        }
    };

    match &cmd.out {
        Some(path) => fs::write(path, &output)?,
        None => print!("{output}"),
    }
    Ok(exit_codes::SUCCESS)
}

fn run_verify(cmd: &VerifyArgs) -> Result<i32> {
    let Some(service_url) = resolve_url(cmd.service_url.as_deref()) else {
        return Ok(fail(&CertifyError::NoServiceUrl));
    };
    if !apiscore_core::probe::is_file(&cmd.file) {
        eprintln!("error[NO_FILE]: {} is not a file", cmd.file.display());
        return Ok(exit_codes::PROJECT_ERROR);
    }
    let service = match HttpValidationService::new(&service_url, cmd.insecure) {
        Ok(service) => service,
        Err(err) => return Ok(fail(&CertifyError::from(err))),
    };

    match service.verify_file(&cmd.file, cmd.protocol.spec_type()) {
        Ok(response) if response.is_success() => {
            println!("{}", response.body);
            Ok(exit_codes::SUCCESS)
        }
        Ok(response) => {
            eprintln!(
                "error[SERVICE_REJECTED]: status {}: {}",
                response.status,
                service_detail(&response)
            );
            Ok(exit_codes::SERVICE_ERROR)
        }
        Err(err) => Ok(fail(&CertifyError::from(err))),
    }
}

/// A blank URL counts as unset.
fn resolve_url(flag: Option<&str>) -> Option<String> {
    let url = flag?.trim();
    if url.is_empty() {
        None
    } else {
        Some(url.to_owned())
    }
}

fn service_detail(response: &ServiceResponse) -> String {
    parse_error_description(&response.body).unwrap_or_else(|| response.body.clone())
}

fn fail(err: &CertifyError) -> i32 {
    eprintln!("error[{}]: {err}", err.code());
    exit_code_for(err)
}

fn exit_code_for(err: &CertifyError) -> i32 {
    match err {
        CertifyError::NoRoot { .. }
        | CertifyError::NoValidProject { .. }
        | CertifyError::LegacyProjectInvalid { .. } => exit_codes::PROJECT_ERROR,
        CertifyError::ArchiveExtractionFailed { .. } | CertifyError::ArchiveBuildFailed { .. } => {
            exit_codes::ARCHIVE_ERROR
        }
        CertifyError::NoServiceUrl => exit_codes::CONFIG_ERROR,
        CertifyError::Cancelled => exit_codes::CANCELLED,
        CertifyError::Submit(_) => exit_codes::SERVICE_ERROR,
    }
}
