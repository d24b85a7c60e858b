//! Verbatim copy of static trees (profiles, assets) into the distribution.

use crate::error::BuildError;
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::debug;
use walkdir::WalkDir;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CopyReport {
    pub files: usize,
    pub bytes: u64,
}

/// Recursively copy `src` into `dest`, creating directories as needed.
///
/// A missing `src` copies nothing. Symbolic links are followed, so linked
/// files land in the output as regular files.
pub fn copy_tree(src: &Path, dest: &Path) -> Result<CopyReport, BuildError> {
    let mut report = CopyReport::default();
    if !src.exists() {
        debug!(src = %src.display(), "Static source absent, nothing to copy");
        return Ok(report);
    }

    for entry in WalkDir::new(src).follow_links(true).sort_by_file_name() {
        let entry = entry.map_err(|e| BuildError::Walk {
            path: src.to_path_buf(),
            source: e,
        })?;
        let relative = entry.path().strip_prefix(src).unwrap_or(entry.path());
        let target = dest.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(|e| BuildError::io(&target, e))?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent).map_err(|e| BuildError::io(parent, e))?;
            }
            report.bytes +=
                fs::copy(entry.path(), &target).map_err(|e| BuildError::io(entry.path(), e))?;
            report.files += 1;
        }
    }

    Ok(report)
}
