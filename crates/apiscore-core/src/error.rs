//! Failure taxonomy for the certification pipeline.
//!
//! Every way a run can fail is a named variant with a stable,
//! machine-readable code. Hosts (the CLI, an editor extension) branch on
//! `code()` to choose messaging and exit status, so codes must never
//! change once released even when the human-readable text does.
//!
//! Variants are constructed complete at the throw site. Nothing here is
//! a catch-all: an error without a home in this taxonomy is a bug in the
//! pipeline, not a reason to add a generic variant.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while talking to the certification service.
///
/// Kept separate from [`CertifyError`] so the HTTP client can be used
/// (and tested) without dragging the whole pipeline taxonomy along.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// The staged archive disappeared or became unreadable before upload.
    #[error("failed to read archive for upload {}: {source}", .path.display())]
    Archive {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Connection, TLS or timeout failure while calling the service.
    #[error("certification service request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

#[derive(Debug, Error)]
pub enum CertifyError {
    /// No workspace root could be resolved for this run.
    #[error("no workspace root available: {detail}")]
    NoRoot { detail: String },

    /// Detection matched none of the recognized project layouts.
    #[error("no valid API project found under {}", .root.display())]
    NoValidProject { root: PathBuf },

    /// A legacy layout was recognized but yielded zero usable API projects.
    #[error("legacy project rejected: {reason}")]
    LegacyProjectInvalid { reason: String },

    /// A legacy archive could not be opened or unpacked.
    #[error("failed to extract legacy archive {}: {source}", .archive.display())]
    ArchiveExtractionFailed {
        archive: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    /// The submission archive could not be produced.
    #[error("failed to build submission archive: {source}")]
    ArchiveBuildFailed {
        #[source]
        source: zip::result::ZipError,
    },

    /// No certification service endpoint is configured.
    #[error("no certification service URL configured")]
    NoServiceUrl,

    /// The run was cancelled between pipeline steps.
    #[error("certification cancelled")]
    Cancelled,

    #[error(transparent)]
    Submit(#[from] SubmitError),
}

impl CertifyError {
    /// Stable host-facing code for this failure.
    ///
    /// These strings are part of the public contract. Tests pin them.
    pub fn code(&self) -> &'static str {
        match self {
            CertifyError::NoRoot { .. } => "NO_ROOT",
            CertifyError::NoValidProject { .. } => "NO_VALID_PROJECT",
            CertifyError::LegacyProjectInvalid { .. } => "LEGACY_PROJECT_INVALID",
            CertifyError::ArchiveExtractionFailed { .. } => "ARCHIVE_EXTRACTION_FAILED",
            CertifyError::ArchiveBuildFailed { .. } => "ARCHIVE_BUILD_FAILED",
            CertifyError::NoServiceUrl => "NO_SERVICE_URL",
            CertifyError::Cancelled => "CANCELLED",
            CertifyError::Submit(_) => "SERVICE_UNREACHABLE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn io_zip_error() -> zip::result::ZipError {
        zip::result::ZipError::from(io::Error::other("disk on fire"))
    }

    #[test]
    fn codes_are_pinned() {
        let cases: Vec<(CertifyError, &str)> = vec![
            (
                CertifyError::NoRoot {
                    detail: "no folder selected".into(),
                },
                "NO_ROOT",
            ),
            (
                CertifyError::NoValidProject {
                    root: PathBuf::from("/work/empty"),
                },
                "NO_VALID_PROJECT",
            ),
            (
                CertifyError::LegacyProjectInvalid {
                    reason: "no API subdirectories".into(),
                },
                "LEGACY_PROJECT_INVALID",
            ),
            (
                CertifyError::ArchiveExtractionFailed {
                    archive: PathBuf::from("/work/a.zip"),
                    source: io_zip_error(),
                },
                "ARCHIVE_EXTRACTION_FAILED",
            ),
            (
                CertifyError::ArchiveBuildFailed {
                    source: io_zip_error(),
                },
                "ARCHIVE_BUILD_FAILED",
            ),
            (CertifyError::NoServiceUrl, "NO_SERVICE_URL"),
            (CertifyError::Cancelled, "CANCELLED"),
        ];

        for (err, code) in cases {
            assert_eq!(err.code(), code);
        }
    }

    #[test]
    fn submit_errors_map_to_service_unreachable() {
        let err = CertifyError::from(SubmitError::Archive {
            path: PathBuf::from("/tmp/api-repo-1.zip"),
            source: io::Error::other("gone"),
        });
        assert_eq!(err.code(), "SERVICE_UNREACHABLE");
    }

    #[test]
    fn messages_name_the_offending_path() {
        let err = CertifyError::NoValidProject {
            root: Path::new("/work/site").to_path_buf(),
        };
        assert!(err.to_string().contains("/work/site"));

        let err = CertifyError::ArchiveExtractionFailed {
            archive: PathBuf::from("/work/admin-PizzaShackAPI-1.0.0.zip"),
            source: io_zip_error(),
        };
        assert!(err.to_string().contains("admin-PizzaShackAPI-1.0.0.zip"));
    }
}
