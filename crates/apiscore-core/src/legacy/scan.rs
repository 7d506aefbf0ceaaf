//! Shared scan over the immediate children of a legacy project tree.

use std::fs;
use std::path::Path;

use crate::legacy::{LEGACY_API_DESCRIPTOR, LEGACY_DEFINITIONS_DIR, LEGACY_DEFINITION_FILE};
use crate::probe;

/// One API directory that passed the structural check.
pub(crate) struct ScannedApi {
    /// Name of the subdirectory itself.
    pub dir_name: String,
    /// Declared API name from the descriptor, falling back to `dir_name`.
    pub name: String,
    /// Parsed descriptor payload, carried through opaquely.
    pub payload: Option<serde_yaml::Value>,
}

/// Scans the immediate subdirectories of `parent` for legacy API
/// directories, in filename order.
///
/// A subdirectory qualifies only when it holds the descriptor file and
/// the nested definition document. Anything else is skipped with a log
/// line, never an error; callers decide whether an empty result is
/// fatal for their entry point.
pub(crate) fn scan_api_dirs(parent: &Path) -> Vec<ScannedApi> {
    let entries = match fs::read_dir(parent) {
        Ok(entries) => entries,
        Err(err) => {
            tracing::warn!(path = %parent.display(), error = %err, "cannot list legacy project tree");
            return Vec::new();
        }
    };

    let mut children: Vec<(String, std::path::PathBuf)> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| probe::is_dir(&entry.path()))
        .filter_map(|entry| {
            let name = entry.file_name().to_str()?.to_owned();
            Some((name, entry.path()))
        })
        .collect();
    children.sort();

    children
        .into_iter()
        .filter_map(|(dir_name, path)| scan_child(&path, dir_name))
        .collect()
}

fn scan_child(child: &Path, dir_name: String) -> Option<ScannedApi> {
    let descriptor = child.join(LEGACY_API_DESCRIPTOR);
    let definition = child.join(LEGACY_DEFINITIONS_DIR).join(LEGACY_DEFINITION_FILE);

    if !probe::is_file(&descriptor) || !probe::is_file(&definition) {
        tracing::warn!(
            dir = %child.display(),
            "skipping subdirectory without {LEGACY_API_DESCRIPTOR} and {LEGACY_DEFINITIONS_DIR}/{LEGACY_DEFINITION_FILE}"
        );
        return None;
    }

    let text = match fs::read_to_string(&descriptor) {
        Ok(text) => text,
        Err(err) => {
            tracing::warn!(path = %descriptor.display(), error = %err, "skipping unreadable descriptor");
            return None;
        }
    };
    let doc: serde_yaml::Value = match serde_yaml::from_str(&text) {
        Ok(doc) => doc,
        Err(err) => {
            tracing::warn!(path = %descriptor.display(), error = %err, "skipping unparseable descriptor");
            return None;
        }
    };

    let declared = doc
        .get("data")
        .and_then(|data| data.get("name"))
        .and_then(|name| name.as_str())
        .map(str::to_owned);
    let payload = Some(doc.get("data").cloned().unwrap_or(doc));

    tracing::debug!(dir = %child.display(), name = declared.as_deref().unwrap_or(&dir_name), "legacy API directory accepted");
    Some(ScannedApi {
        name: declared.unwrap_or_else(|| dir_name.clone()),
        dir_name,
        payload,
    })
}
