//! Adaptation of a legacy export archive without unpacking it into the
//! workspace.
//!
//! The archive is extracted into a scoped temporary directory purely to
//! validate its structure and read the descriptor. The directory is
//! removed on every exit path; the metadata produced always points back
//! at the original archive so its bytes can be submitted unmodified.

use std::fs::File;
use std::path::Path;

use tempfile::TempDir;
use zip::ZipArchive;

use crate::error::CertifyError;
use crate::legacy::{scan, LEGACY_API_DESCRIPTOR, LEGACY_DEFINITIONS_DIR, LEGACY_DEFINITION_FILE};
use crate::metadata::model::{ApiDescriptor, ProjectMetadata, SpecType};

const EXTRACT_PREFIX: &str = "wso2-extract-";

/// Adapts a legacy export archive, extracting into the system
/// temporary directory.
pub fn from_archive(archive_path: &Path) -> Result<ProjectMetadata, CertifyError> {
    from_archive_in(archive_path, &std::env::temp_dir())
}

/// Like [`from_archive`], with the extraction scratch space under
/// `scratch` instead of the system temporary directory.
pub fn from_archive_in(archive_path: &Path, scratch: &Path) -> Result<ProjectMetadata, CertifyError> {
    let temp = tempfile::Builder::new()
        .prefix(EXTRACT_PREFIX)
        .tempdir_in(scratch)
        .map_err(|err| CertifyError::ArchiveExtractionFailed {
            archive: archive_path.to_path_buf(),
            source: err.into(),
        })?;

    let outcome = extract_and_adapt(archive_path, temp.path());
    remove_scratch(temp);
    outcome
}

fn extract_and_adapt(
    archive_path: &Path,
    extract_to: &Path,
) -> Result<ProjectMetadata, CertifyError> {
    let extraction_failed = |source: zip::result::ZipError| CertifyError::ArchiveExtractionFailed {
        archive: archive_path.to_path_buf(),
        source,
    };

    let file = File::open(archive_path).map_err(|err| extraction_failed(err.into()))?;
    let mut archive = ZipArchive::new(file).map_err(extraction_failed)?;
    archive.extract(extract_to).map_err(extraction_failed)?;
    tracing::debug!(archive = %archive_path.display(), "legacy archive extracted for inspection");

    // Legacy exports carry a single API; the first valid directory wins.
    let first = scan::scan_api_dirs(extract_to)
        .into_iter()
        .next()
        .ok_or_else(|| CertifyError::LegacyProjectInvalid {
            reason: format!(
                "archive {} contains no directory with both {} and {}/{}",
                archive_path.display(),
                LEGACY_API_DESCRIPTOR,
                LEGACY_DEFINITIONS_DIR,
                LEGACY_DEFINITION_FILE,
            ),
        })?;

    let api = ApiDescriptor {
        name: first.name,
        spec_type: SpecType::Rest,
        definition_path: format!("{}/{LEGACY_DEFINITIONS_DIR}", first.dir_name),
        definition_file: Some(LEGACY_DEFINITION_FILE.to_owned()),
        legacy_payload: first.payload,
    };

    Ok(ProjectMetadata::legacy_archive(
        vec![api],
        archive_path.to_path_buf(),
    ))
}

/// Removes the extraction directory. A failed removal is logged and
/// never surfaced: it must not mask the outcome of the adaptation
/// itself.
fn remove_scratch(temp: TempDir) {
    let path = temp.path().to_path_buf();
    if let Err(err) = temp.close() {
        tracing::warn!(path = %path.display(), error = %err, "failed to remove extraction directory");
    }
}
