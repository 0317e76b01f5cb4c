use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Outcome of listing one directory during discovery.
///
/// Discovery tolerates partial trees: `Absent` is skipped silently and
/// `Failed` is skipped with a warning, so neither aborts a scan.
#[derive(Debug)]
pub enum DirListing {
    /// Immediate subdirectories, sorted by file name
    Entries(Vec<PathBuf>),
    Absent,
    Failed(std::io::Error),
}

impl DirListing {
    /// List the immediate subdirectories of `dir`. Files and symlinks are
    /// ignored.
    pub fn read(dir: &Path) -> DirListing {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return DirListing::Absent,
            Err(e) => return DirListing::Failed(e),
        };

        let mut subdirs = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => return DirListing::Failed(e),
            };
            match entry.file_type() {
                Ok(ft) if ft.is_dir() => subdirs.push(entry.path()),
                Ok(_) => {}
                Err(e) => return DirListing::Failed(e),
            }
        }
        subdirs.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        DirListing::Entries(subdirs)
    }

    /// Subdirectories to visit, logging why a directory was skipped
    pub fn into_entries(self, dir: &Path) -> Vec<PathBuf> {
        match self {
            DirListing::Entries(entries) => entries,
            DirListing::Absent => {
                tracing::debug!("skipping missing directory {}", dir.display());
                Vec::new()
            }
            DirListing::Failed(e) => {
                tracing::warn!("skipping unreadable directory {}: {}", dir.display(), e);
                Vec::new()
            }
        }
    }
}

/// Final path component as an owned string
pub fn dir_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}
