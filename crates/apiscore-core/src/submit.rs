//! Submission boundary to the remote certification service.
//!
//! The pipeline depends only on the [`ValidationService`] trait; the
//! HTTP implementation lives here as well. The service is treated as
//! opaque: a reply with any status code is data to forward upward,
//! only transport-level failures are errors.

use std::fs;
use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::Client;
use reqwest::header::ACCEPT;

use crate::error::SubmitError;
use crate::metadata::model::SpecType;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Validation type requested when the caller does not pick one.
pub const DEFAULT_VALIDATION_TYPE: &str = "OVERALL_SCORE";

/// Caller-supplied knobs forwarded with a repository submission.
#[derive(Debug, Clone, Default)]
pub struct SubmissionHints {
    pub validation_type: Option<String>,
}

/// Raw service reply. Non-success statuses are data, not errors: the
/// body usually carries the service's own diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceResponse {
    pub status: u16,
    pub body: String,
}

impl ServiceResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

pub trait ValidationService {
    /// Uploads a staged repository archive for a full certification run.
    fn validate_repo(
        &self,
        archive: &Path,
        hints: &SubmissionHints,
    ) -> Result<ServiceResponse, SubmitError>;

    /// Uploads a single definition document for ruleset verification.
    fn verify_file(&self, file: &Path, protocol: SpecType)
        -> Result<ServiceResponse, SubmitError>;
}

/// HTTP client speaking the service's multipart protocol.
pub struct HttpValidationService {
    base_url: String,
    client: Client,
}

impl HttpValidationService {
    /// Builds a client for `base_url`.
    ///
    /// `accept_invalid_certs` relaxes TLS verification for this client
    /// only. It is never a process-wide toggle, so concurrent traffic
    /// elsewhere keeps full verification.
    pub fn new(base_url: &str, accept_invalid_certs: bool) -> Result<Self, SubmitError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .danger_accept_invalid_certs(accept_invalid_certs)
            .build()?;
        Ok(HttpValidationService {
            base_url: base_url.trim_end_matches('/').to_owned(),
            client,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn post(&self, url: String, form: Form) -> Result<ServiceResponse, SubmitError> {
        let response = self
            .client
            .post(&url)
            .header(ACCEPT, "application/json")
            .multipart(form)
            .send()?;
        let status = response.status().as_u16();
        let body = response.text()?;
        tracing::debug!(url, status, "service responded");
        Ok(ServiceResponse { status, body })
    }

    fn read_upload(path: &Path) -> Result<Vec<u8>, SubmitError> {
        fs::read(path).map_err(|source| SubmitError::Archive {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl ValidationService for HttpValidationService {
    fn validate_repo(
        &self,
        archive: &Path,
        hints: &SubmissionHints,
    ) -> Result<ServiceResponse, SubmitError> {
        let bytes = Self::read_upload(archive)?;
        tracing::debug!(archive = %archive.display(), bytes = bytes.len(), "uploading repository archive");

        let file_name = format!("apiScoring-{}.zip", unix_millis());
        let part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str("application/zip")?;
        let validation_type = hints
            .validation_type
            .clone()
            .unwrap_or_else(|| DEFAULT_VALIDATION_TYPE.to_owned());

        let form = Form::new()
            .text("isVerbose", "true")
            .part("file", part)
            .text("validationType", validation_type);

        self.post(self.endpoint("apis/validate"), form)
    }

    fn verify_file(
        &self,
        file: &Path,
        protocol: SpecType,
    ) -> Result<ServiceResponse, SubmitError> {
        let bytes = Self::read_upload(file)?;
        let part = Part::bytes(bytes).file_name(verify_file_name(file));
        let form = Form::new()
            .part("file", part)
            .text("apiProtocol", protocol.as_protocol());

        self.post(self.endpoint("apis/verify"), form)
    }
}

/// Upload name for a definition document. The service keys some checks
/// off the filename; protobuf definitions must arrive under a fixed
/// name it recognizes.
fn verify_file_name(file: &Path) -> String {
    match file.extension().and_then(|ext| ext.to_str()) {
        Some("proto") => "a.proto".to_owned(),
        Some(ext) => format!("file-to-verify-{}.{ext}", unix_millis()),
        None => format!("file-to-verify-{}", unix_millis()),
    }
}

fn unix_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis())
        .unwrap_or_default()
}
