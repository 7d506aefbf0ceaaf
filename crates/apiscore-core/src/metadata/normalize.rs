//! Normalization of the canonical metadata document.
//!
//! The document's API list appears in the wild with two field-naming
//! conventions (hyphenated and camelCase). Both are accepted here and
//! mapped onto one canonical shape, so normalizing an already-canonical
//! document is a no-op by construction.
//!
//! Normalization performs no validation beyond the structural mapping.
//! A missing field propagates as empty and is dealt with downstream:
//! an empty definition path contributes nothing to the staged archive.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::CertifyError;
use crate::metadata::model::{ApiDescriptor, ProjectMetadata, SpecType};
use crate::METADATA_FILE_NAME;

#[derive(Debug, Default, Deserialize)]
struct RawDocument {
    #[serde(default)]
    apis: Vec<RawApiEntry>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawApiEntry {
    name: Option<String>,
    #[serde(rename = "api-spec-type", alias = "apiSpecType")]
    api_spec_type: Option<String>,
    #[serde(rename = "definition-path", alias = "definitionPath")]
    definition_path: Option<String>,
    #[serde(rename = "definition-file", alias = "definitionFile")]
    definition_file: Option<String>,
}

/// Parses a raw metadata document and normalizes its API list.
pub fn normalize(text: &str) -> Result<ProjectMetadata, serde_yaml::Error> {
    let raw: RawDocument = serde_yaml::from_str(text)?;
    let apis = raw.apis.into_iter().map(normalize_entry).collect();
    Ok(ProjectMetadata::canonical(apis))
}

fn normalize_entry(entry: RawApiEntry) -> ApiDescriptor {
    ApiDescriptor {
        name: entry.name.unwrap_or_default(),
        spec_type: entry
            .api_spec_type
            .as_deref()
            .map(SpecType::parse)
            .unwrap_or_default(),
        definition_path: entry.definition_path.unwrap_or_default(),
        definition_file: entry.definition_file,
        legacy_payload: None,
    }
}

/// Loads and normalizes the metadata document at the workspace root.
///
/// An unreadable or unparseable document, and a document declaring no
/// APIs at all, are discovery failures: the root does not hold a valid
/// project, even though detection saw the file.
pub fn load(root: &Path) -> Result<ProjectMetadata, CertifyError> {
    let path = root.join(METADATA_FILE_NAME);
    let no_valid_project = || CertifyError::NoValidProject {
        root: root.to_path_buf(),
    };

    let text = fs::read_to_string(&path).map_err(|err| {
        tracing::warn!(path = %path.display(), error = %err, "cannot read metadata document");
        no_valid_project()
    })?;
    let metadata = normalize(&text).map_err(|err| {
        tracing::warn!(path = %path.display(), error = %err, "metadata document is not valid YAML");
        no_valid_project()
    })?;
    if metadata.apis.is_empty() {
        tracing::warn!(path = %path.display(), "metadata document declares no APIs");
        return Err(no_valid_project());
    }

    tracing::debug!(apis = metadata.apis.len(), "metadata document normalized");
    Ok(metadata)
}
