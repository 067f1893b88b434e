//! Operation: remove staged and assembled publication output.

use std::path::{Path, PathBuf};

use aarpub_util::errors::AarpubError;
use aarpub_util::fs::remove_dir_if_exists;

/// Directories under `build/` owned by aarpub.
const OUTPUT_DIRS: &[&str] = &["repos", "companions", "publications"];

/// Result of a clean operation.
pub enum CleanResult {
    Cleaned(Vec<PathBuf>),
    NothingToClean,
}

/// Remove `build/repos`, `build/companions` and `build/publications`.
///
/// Other content of `build/` (the AAR build output, for instance) is kept.
pub fn clean(project_root: &Path) -> miette::Result<CleanResult> {
    let build_dir = project_root.join("build");
    let mut removed = Vec::new();
    for dir in OUTPUT_DIRS {
        let path = build_dir.join(dir);
        if remove_dir_if_exists(&path).map_err(AarpubError::Io)? {
            tracing::debug!("removed {}", path.display());
            removed.push(path);
        }
    }
    if removed.is_empty() {
        Ok(CleanResult::NothingToClean)
    } else {
        Ok(CleanResult::Cleaned(removed))
    }
}
