//! Staging of the submission archive.
//!
//! The staged archive holds the metadata document plus exactly the
//! declared definition paths. Dependency directories, build output and
//! unrelated sources never reach the service.
//!
//! The one exception is a discovered legacy export archive, which is
//! forwarded verbatim. Re-compressing an export would risk disturbing
//! its internal layout, so the original bytes are submitted unmodified.

use std::collections::BTreeSet;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::CertifyError;
use crate::metadata::model::{ProjectMetadata, SourceKind};
use crate::{LEGACY_COMPANION_FILE, LEGACY_EXTRACTION_DIR, METADATA_FILE_NAME};

const ARCHIVE_PREFIX: &str = "api-repo-";

/// Resolves the archive to submit for `metadata`.
///
/// Returns the original export archive untouched for
/// [`SourceKind::LegacyArchiveOriginal`]; otherwise stages a fresh
/// archive in the system temporary directory and returns its path. A
/// failed build removes the partial file and reports
/// `ARCHIVE_BUILD_FAILED`: a rejected build never leaves an archive
/// behind that could be mistaken for a valid one.
pub fn build(root: &Path, metadata: &ProjectMetadata) -> Result<PathBuf, CertifyError> {
    if metadata.source_kind == SourceKind::LegacyArchiveOriginal {
        if let Some(original) = &metadata.original_archive_path {
            tracing::debug!(archive = %original.display(), "forwarding original legacy archive");
            return Ok(original.clone());
        }
        return Err(CertifyError::ArchiveBuildFailed {
            source: zip::result::ZipError::from(io::Error::other(
                "legacy archive metadata lacks the original archive path",
            )),
        });
    }

    let includes = inclusion_set(metadata);
    tracing::debug!(?includes, root = %root.display(), "staging submission archive");

    let (file, path) = tempfile::Builder::new()
        .prefix(ARCHIVE_PREFIX)
        .suffix(".zip")
        .tempfile()
        .map_err(|err| CertifyError::ArchiveBuildFailed { source: err.into() })?
        .keep()
        .map_err(|err| CertifyError::ArchiveBuildFailed {
            source: err.error.into(),
        })?;

    match write_archive(root, &includes, file) {
        Ok(definition_entries) => {
            if definition_entries == 0 {
                tracing::warn!(
                    archive = %path.display(),
                    "staged archive contains no definition files"
                );
            }
            tracing::debug!(archive = %path.display(), "submission archive staged");
            Ok(path)
        }
        Err(source) => {
            discard_partial(&path);
            Err(CertifyError::ArchiveBuildFailed { source })
        }
    }
}

/// Explicit inclusion set: the metadata document (always), the legacy
/// tree and companion file when the project is legacy, and every
/// declared definition path plus its primary file.
fn inclusion_set(metadata: &ProjectMetadata) -> BTreeSet<String> {
    let mut includes = BTreeSet::new();
    includes.insert(METADATA_FILE_NAME.to_owned());

    if metadata.is_legacy_project {
        includes.insert(LEGACY_EXTRACTION_DIR.to_owned());
        includes.insert(LEGACY_COMPANION_FILE.to_owned());
    }

    for api in &metadata.apis {
        if api.definition_path.is_empty() {
            continue;
        }
        includes.insert(api.definition_path.clone());
        if let Some(file) = &api.definition_file {
            includes.insert(format!("{}/{}", api.definition_path, file));
        }
    }

    includes
}

/// Walks `root` and writes every included file, returning how many
/// entries beyond the metadata document were written.
fn write_archive(
    root: &Path,
    includes: &BTreeSet<String>,
    file: File,
) -> Result<usize, zip::result::ZipError> {
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .compression_level(Some(9));

    let mut definition_entries = 0usize;
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|err| zip::result::ZipError::from(io::Error::from(err)))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(rel) = relative_name(root, entry.path()) else {
            continue;
        };
        let included = rel == METADATA_FILE_NAME
            || includes.iter().any(|prefix| rel.starts_with(prefix.as_str()));
        if !included {
            continue;
        }

        zip.start_file(rel.as_str(), options)?;
        let mut source = File::open(entry.path())?;
        io::copy(&mut source, &mut zip)?;
        if rel != METADATA_FILE_NAME {
            definition_entries += 1;
        }
    }

    let mut file = zip.finish()?;
    file.flush()?;
    Ok(definition_entries)
}

/// Relative path below `root`, normalized to forward slashes so it can
/// be compared against the declared inclusion prefixes.
fn relative_name(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let parts: Option<Vec<&str>> = rel.components().map(|c| c.as_os_str().to_str()).collect();
    let parts = parts?;
    if parts.is_empty() {
        return None;
    }
    Some(parts.join("/"))
}

fn discard_partial(path: &Path) {
    if let Err(err) = fs::remove_file(path) {
        tracing::warn!(path = %path.display(), error = %err, "failed to remove partial archive");
    }
}
