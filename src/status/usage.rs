use std::io::ErrorKind;
use std::path::Path;
use walkdir::WalkDir;

use crate::common::errors::{Result, SandboxError};

/// Whether a status/cleanup root exists. Absence is not an error.
pub fn root_exists(root: &Path) -> Result<bool> {
    match std::fs::metadata(root) {
        Ok(_) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(SandboxError::io(root, e)),
    }
}

/// Count every directory below `root`, nested ones included.
/// The root itself is not counted.
pub fn count_dirs(root: &Path) -> Result<usize> {
    if !root_exists(root)? {
        return Ok(0);
    }

    let mut count = 0;
    for entry in WalkDir::new(root).follow_links(false).min_depth(1) {
        if entry?.file_type().is_dir() {
            count += 1;
        }
    }
    Ok(count)
}

/// Total logical size of all files below `root`
pub fn disk_usage(root: &Path) -> Result<u64> {
    if !root_exists(root)? {
        return Ok(0);
    }

    let mut total = 0u64;
    for entry in WalkDir::new(root).follow_links(false) {
        let entry = entry?;
        if entry.file_type().is_dir() {
            continue;
        }
        total += entry.metadata()?.len();
    }
    Ok(total)
}
