//! First-match-wins classification over the rule table.

use std::path::Path;

use crate::layout::rules::{LayoutKind, RULES};

/// Classifies a workspace root, or returns `None` when no recognized
/// layout is present. Callers translate `None` into the
/// "no valid project" failure.
pub fn detect(root: &Path) -> Option<LayoutKind> {
    for rule in RULES {
        if rule.matches(root) {
            tracing::debug!(rule = rule.name, kind = ?rule.classifies, "layout rule matched");
            return Some(rule.classifies);
        }
    }
    tracing::debug!(root = %root.display(), "no layout rule matched");
    None
}
