//! Existence probing for workspace paths.
//!
//! Discovery runs against user-selected folders that may vanish, be
//! unreadable, or sit on flaky network mounts. Every probe here collapses
//! I/O failure into `false` so that detection can treat "cannot stat" and
//! "not there" identically instead of aborting the whole pipeline.

use std::fs;
use std::path::Path;

/// Returns `true` only when `path` can be stat-ed successfully.
///
/// Permission errors, dangling symlinks and transport failures all
/// report `false`. Callers that need the underlying error must open the
/// path themselves.
pub fn exists(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

/// Returns `true` when `path` resolves to a directory.
///
/// Follows symlinks, so a link to a directory counts. Any I/O failure
/// reports `false`.
pub fn is_dir(path: &Path) -> bool {
    fs::metadata(path).map(|m| m.is_dir()).unwrap_or(false)
}

/// Returns `true` when `path` resolves to a regular file.
pub fn is_file(path: &Path) -> bool {
    fs::metadata(path).map(|m| m.is_file()).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn existing_file_is_found() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("metadata.yml");
        fs::write(&file, "apis: []").unwrap();

        assert!(exists(&file));
        assert!(is_file(&file));
        assert!(!is_dir(&file));
    }

    #[test]
    fn existing_directory_is_found() {
        let dir = tempfile::tempdir().unwrap();

        assert!(exists(dir.path()));
        assert!(is_dir(dir.path()));
        assert!(!is_file(dir.path()));
    }

    #[test]
    fn missing_path_reports_false_not_error() {
        let dir = tempfile::tempdir().unwrap();
        let ghost = dir.path().join("does-not-exist");

        assert!(!exists(&ghost));
        assert!(!is_dir(&ghost));
        assert!(!is_file(&ghost));
    }

    #[cfg(unix)]
    #[test]
    fn dangling_symlink_reports_existing_link_but_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let link = dir.path().join("broken");
        std::os::unix::fs::symlink(dir.path().join("gone"), &link).unwrap();

        // The link itself is stat-able, its target is not.
        assert!(exists(&link));
        assert!(!is_file(&link));
        assert!(!is_dir(&link));
    }
}
