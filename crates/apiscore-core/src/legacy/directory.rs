//! Adaptation of a legacy tree already extracted into the workspace.

use std::path::Path;

use crate::error::CertifyError;
use crate::legacy::{scan, LEGACY_API_DESCRIPTOR, LEGACY_DEFINITIONS_DIR, LEGACY_DEFINITION_FILE};
use crate::metadata::model::{ApiDescriptor, ProjectMetadata, SpecType};
use crate::LEGACY_EXTRACTION_DIR;

/// Adapts the extracted legacy tree under `root` into canonical
/// metadata.
///
/// Subdirectories missing either required file are skipped and logged.
/// Zero usable subdirectories is a request failure: the workspace
/// looked legacy but holds nothing submittable.
pub fn from_directory(root: &Path) -> Result<ProjectMetadata, CertifyError> {
    let extraction = root.join(LEGACY_EXTRACTION_DIR);
    let scanned = scan::scan_api_dirs(&extraction);

    if scanned.is_empty() {
        return Err(CertifyError::LegacyProjectInvalid {
            reason: format!(
                "no subdirectory of {} contains both {} and {}/{}",
                extraction.display(),
                LEGACY_API_DESCRIPTOR,
                LEGACY_DEFINITIONS_DIR,
                LEGACY_DEFINITION_FILE,
            ),
        });
    }

    let apis = scanned
        .into_iter()
        .map(|api| ApiDescriptor {
            name: api.name,
            spec_type: SpecType::Rest,
            definition_path: format!(
                "{LEGACY_EXTRACTION_DIR}/{}/{LEGACY_DEFINITIONS_DIR}",
                api.dir_name
            ),
            definition_file: Some(LEGACY_DEFINITION_FILE.to_owned()),
            legacy_payload: api.payload,
        })
        .collect();

    Ok(ProjectMetadata::legacy_directory(apis))
}
