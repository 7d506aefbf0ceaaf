//! The certification pipeline.
//!
//! One invocation walks a fixed sequence:
//!
//!   discover root → detect layout → normalize or adapt metadata →
//!   resolve archive → submit
//!
//! Each step depends on the previous one; there is no parallelism and
//! no retrying. Every failure is terminal for the invocation and maps
//! to exactly one taxonomy code. Cancellation is cooperative: the flag
//! is consulted at step boundaries, and a tripped flag aborts the run
//! before the service is ever contacted.

use std::path::{Path, PathBuf};

use crate::archive;
use crate::cancel::Cancellation;
use crate::error::CertifyError;
use crate::layout::{self, LayoutKind};
use crate::legacy;
use crate::metadata::model::ProjectMetadata;
use crate::metadata::normalize;
use crate::probe;
use crate::submit::{ServiceResponse, SubmissionHints, ValidationService};

/// Inputs for one certification run.
#[derive(Debug, Clone, Default)]
pub struct CertifyRequest {
    /// Explicit project root. Defaults to the process working
    /// directory when absent.
    pub root: Option<PathBuf>,

    /// Validation type forwarded to the service.
    pub validation_type: Option<String>,
}

/// Outcome of a successful run, handed back to the host surface.
#[derive(Debug)]
pub struct Certification {
    pub root: PathBuf,
    pub metadata: ProjectMetadata,
    /// Archive that was submitted: freshly staged, or the original
    /// legacy export when one was discovered.
    pub archive: PathBuf,
    pub response: ServiceResponse,
}

/// Runs one full certification against `service`.
pub fn certify(
    request: &CertifyRequest,
    service: &dyn ValidationService,
    cancel: &Cancellation,
) -> Result<Certification, CertifyError> {
    let root = discover_root(request.root.as_deref())?;
    tracing::info!(root = %root.display(), "certification started");
    ensure_active(cancel)?;

    let layout = layout::detect(&root).ok_or_else(|| CertifyError::NoValidProject {
        root: root.clone(),
    })?;
    tracing::info!(?layout, "project layout detected");

    let metadata = resolve_metadata(&root, layout)?;
    tracing::info!(
        apis = metadata.apis.len(),
        source = ?metadata.source_kind,
        "project metadata resolved"
    );
    ensure_active(cancel)?;

    let archive = archive::build(&root, &metadata)?;
    tracing::info!(archive = %archive.display(), "archive resolved");
    ensure_active(cancel)?;

    let hints = SubmissionHints {
        validation_type: request.validation_type.clone(),
    };
    let response = service.validate_repo(&archive, &hints)?;
    tracing::info!(status = response.status, "submission completed");

    Ok(Certification {
        root,
        metadata,
        archive,
        response,
    })
}

fn resolve_metadata(root: &Path, layout: LayoutKind) -> Result<ProjectMetadata, CertifyError> {
    match layout {
        LayoutKind::MetadataFile => normalize::load(root),
        LayoutKind::LegacyDirectory => legacy::from_directory(root),
        LayoutKind::LegacyArchive => {
            let archive_path = layout::rules::find_legacy_archive(root).ok_or_else(|| {
                CertifyError::NoValidProject {
                    root: root.to_path_buf(),
                }
            })?;
            legacy::from_archive(&archive_path)
        }
    }
}

fn ensure_active(cancel: &Cancellation) -> Result<(), CertifyError> {
    if cancel.is_cancelled() {
        tracing::info!("certification cancelled");
        return Err(CertifyError::Cancelled);
    }
    Ok(())
}

/// Resolves the project root: the explicit path when given, the
/// process working directory otherwise. The root must be an existing
/// directory; anything else is `NO_ROOT`.
fn discover_root(explicit: Option<&Path>) -> Result<PathBuf, CertifyError> {
    let candidate = match explicit {
        Some(path) => std::path::absolute(path).map_err(|err| CertifyError::NoRoot {
            detail: format!("cannot resolve {}: {err}", path.display()),
        })?,
        None => std::env::current_dir().map_err(|err| CertifyError::NoRoot {
            detail: format!("no working directory available: {err}"),
        })?,
    };

    if !probe::is_dir(&candidate) {
        return Err(CertifyError::NoRoot {
            detail: format!("{} is not a directory", candidate.display()),
        });
    }
    Ok(candidate)
}
