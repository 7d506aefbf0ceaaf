//! Canonical, layout-independent description of a scoring submission.
//!
//! Whatever layout discovery found, it is normalized into one
//! `ProjectMetadata` value. Archive staging and submission work only
//! with this shape and never consult the source layout again.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

/// API contract flavor understood by the certification service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SpecType {
    #[default]
    Rest,
    Event,
    Grpc,
}

impl SpecType {
    /// Maps the vocabulary used across source layouts onto the canonical
    /// enumeration. Unrecognized values fall back to REST rather than
    /// failing the run; the service performs its own contract checks.
    pub fn parse(raw: &str) -> SpecType {
        match raw.trim().to_ascii_lowercase().as_str() {
            "rest" => SpecType::Rest,
            "asyncapi" | "event" => SpecType::Event,
            "grpc" => SpecType::Grpc,
            _ => SpecType::Rest,
        }
    }

    /// Protocol token expected by the service's verification endpoint.
    pub fn as_protocol(&self) -> &'static str {
        match self {
            SpecType::Rest => "REST",
            SpecType::Event => "EVENT",
            SpecType::Grpc => "GRPC",
        }
    }
}

impl fmt::Display for SpecType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_protocol())
    }
}

/// Which discovery strategy produced a `ProjectMetadata`.
///
/// The archive builder branches on this: a `LegacyArchiveOriginal`
/// submission reuses the discovered archive verbatim instead of
/// building a fresh one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SourceKind {
    MetadataFile,
    LegacyDirectory,
    LegacyArchiveOriginal,
}

/// One API artifact to certify.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiDescriptor {
    /// Identifier, unique within a submission.
    pub name: String,

    pub spec_type: SpecType,

    /// Directory holding the definition document(s), relative to the
    /// project root. Empty when the source document omitted it; an
    /// empty path simply contributes nothing to the staged archive.
    pub definition_path: String,

    /// Primary definition document within `definition_path`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub definition_file: Option<String>,

    /// Origin-specific descriptor payload, carried through untouched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legacy_payload: Option<serde_yaml::Value>,
}

/// The record submitted alongside a staged archive.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectMetadata {
    /// Discovery order, kept stable for reproducible archives.
    pub apis: Vec<ApiDescriptor>,

    pub is_legacy_project: bool,

    pub source_kind: SourceKind,

    /// Pre-existing legacy export, set only for
    /// [`SourceKind::LegacyArchiveOriginal`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_archive_path: Option<PathBuf>,
}

impl ProjectMetadata {
    /// Metadata produced from the canonical root document.
    pub fn canonical(apis: Vec<ApiDescriptor>) -> Self {
        ProjectMetadata {
            apis,
            is_legacy_project: false,
            source_kind: SourceKind::MetadataFile,
            original_archive_path: None,
        }
    }

    /// Metadata adapted from an extracted legacy tree.
    pub fn legacy_directory(apis: Vec<ApiDescriptor>) -> Self {
        ProjectMetadata {
            apis,
            is_legacy_project: true,
            source_kind: SourceKind::LegacyDirectory,
            original_archive_path: None,
        }
    }

    /// Metadata adapted from a legacy export archive that will be
    /// forwarded unmodified.
    pub fn legacy_archive(apis: Vec<ApiDescriptor>, original: PathBuf) -> Self {
        ProjectMetadata {
            apis,
            is_legacy_project: true,
            source_kind: SourceKind::LegacyArchiveOriginal,
            original_archive_path: Some(original),
        }
    }
}
