//! Recognition rules for the supported project layouts.
//!
//! The legacy WSO2 packaging convention has no single authoritative
//! marker file across its variants, so recognition is a table of
//! substring and file-presence heuristics. The table is ordered and the
//! first matching rule classifies the workspace. That order is a
//! contract: canonical layouts shadow legacy ones, and cheap root-level
//! probes run before the recursive content scan.
//!
//! Keeping each predicate as a named table entry (instead of inline
//! branching) lets tests exercise every rule in isolation and makes the
//! precedence auditable.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::{probe, LEGACY_EXTRACTION_DIR, METADATA_FILE_NAME};

/// Single-file descriptor names that mark an already-extracted legacy
/// project when found directly at the workspace root.
pub const LEGACY_DESCRIPTOR_FILES: [&str; 3] = ["api.yaml", "swagger.yaml", "openapi.yaml"];

/// Keys that must all appear in a YAML document for it to count as a
/// legacy API descriptor during the content scan.
pub const LEGACY_METADATA_KEYS: [&str; 6] =
    ["type", "version", "data", "name", "context", "provider"];

/// Endpoint substrings that distinguish legacy descriptors from
/// ordinary YAML files that happen to share the metadata keys.
pub const LEGACY_ENDPOINT_MARKERS: [&str; 3] = ["localhost:9443", "wso2", "carbon"];

/// Filename substrings used by the legacy packaging convention for
/// exported API archives.
pub const LEGACY_ARCHIVE_NAME_PATTERNS: [&str; 4] = ["admin-", "-1.0.0.zip", "PizzaShackAPI", "API"];

/// Directories never descended into during the content scan.
pub const SCAN_SKIP_DIRS: [&str; 4] = ["node_modules", ".git", "target", "vendor"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutKind {
    /// Canonical project described by a root metadata document.
    MetadataFile,
    /// Legacy project already extracted into the workspace tree.
    LegacyDirectory,
    /// Legacy project still packaged as a root-level export archive.
    LegacyArchive,
}

/// One recognition step: a named predicate and the layout it classifies.
pub struct LayoutRule {
    pub name: &'static str,
    pub classifies: LayoutKind,
    predicate: fn(&Path) -> bool,
}

impl LayoutRule {
    pub fn matches(&self, root: &Path) -> bool {
        (self.predicate)(root)
    }
}

/// The recognition table, in precedence order. First match wins.
pub const RULES: &[LayoutRule] = &[
    LayoutRule {
        name: "root-metadata-document",
        classifies: LayoutKind::MetadataFile,
        predicate: has_root_metadata,
    },
    LayoutRule {
        name: "extraction-directory",
        classifies: LayoutKind::LegacyDirectory,
        predicate: has_extraction_dir,
    },
    LayoutRule {
        name: "root-legacy-descriptor",
        classifies: LayoutKind::LegacyDirectory,
        predicate: has_root_descriptor,
    },
    LayoutRule {
        name: "legacy-metadata-scan",
        classifies: LayoutKind::LegacyDirectory,
        predicate: has_legacy_document,
    },
    LayoutRule {
        name: "legacy-archive-name",
        classifies: LayoutKind::LegacyArchive,
        predicate: has_legacy_archive,
    },
];

fn has_root_metadata(root: &Path) -> bool {
    probe::is_file(&root.join(METADATA_FILE_NAME))
}

fn has_extraction_dir(root: &Path) -> bool {
    probe::is_dir(&root.join(LEGACY_EXTRACTION_DIR))
}

fn has_root_descriptor(root: &Path) -> bool {
    LEGACY_DESCRIPTOR_FILES
        .iter()
        .any(|name| probe::is_file(&root.join(name)))
}

/// Recursive content scan: a YAML document anywhere under the root that
/// carries every legacy metadata key and at least one endpoint marker.
fn has_legacy_document(root: &Path) -> bool {
    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_skipped_dir(entry.path()));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                tracing::debug!(error = %err, "skipping unreadable entry during layout scan");
                continue;
            }
        };
        if !entry.file_type().is_file() || !is_yaml_file(entry.path()) {
            continue;
        }
        let text = match fs::read_to_string(entry.path()) {
            Ok(text) => text,
            Err(err) => {
                tracing::debug!(
                    path = %entry.path().display(),
                    error = %err,
                    "skipping unreadable file during layout scan"
                );
                continue;
            }
        };
        if is_legacy_descriptor_text(&text) {
            tracing::debug!(path = %entry.path().display(), "legacy descriptor content matched");
            return true;
        }
    }
    false
}

fn has_legacy_archive(root: &Path) -> bool {
    find_legacy_archive(root).is_some()
}

/// Returns the first root-level archive whose filename matches the
/// legacy naming convention.
///
/// Candidates are ordered by filename so repeated runs over the same
/// tree resolve the same archive.
pub fn find_legacy_archive(root: &Path) -> Option<PathBuf> {
    let entries = match fs::read_dir(root) {
        Ok(entries) => entries,
        Err(err) => {
            tracing::debug!(root = %root.display(), error = %err, "cannot list root for archives");
            return None;
        }
    };

    let mut candidates: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| probe::is_file(path))
        .filter(|path| path.extension().and_then(|ext| ext.to_str()) == Some("zip"))
        .collect();
    candidates.sort();

    candidates.into_iter().find(|path| {
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default();
        LEGACY_ARCHIVE_NAME_PATTERNS
            .iter()
            .any(|pattern| file_name.contains(pattern))
    })
}

fn is_legacy_descriptor_text(text: &str) -> bool {
    let has_keys = LEGACY_METADATA_KEYS.iter().all(|key| text.contains(key));
    has_keys
        && LEGACY_ENDPOINT_MARKERS
            .iter()
            .any(|marker| text.contains(marker))
}

fn is_yaml_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml") | Some("yml")
    )
}

fn is_skipped_dir(path: &Path) -> bool {
    path.is_dir()
        && path
            .file_name()
            .and_then(|name| name.to_str())
            .map(|name| SCAN_SKIP_DIRS.contains(&name))
            .unwrap_or(false)
}
