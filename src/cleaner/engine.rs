use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use walkdir::WalkDir;

use super::marker::CleanupMarker;
use crate::common::config::Config;
use crate::common::errors::{PhaseContext, Result, SandboxError};
use crate::common::layout::{ArtifactRoot, SandboxLayout};
use crate::status::usage::root_exists;

const SECS_PER_DAY: u64 = 86_400;

/// One directory removed by a cleanup run
#[derive(Debug, Clone, Serialize)]
pub struct RemovedArtifact {
    pub path: PathBuf,
    pub root: ArtifactRoot,
    pub age_days: u64,
}

/// Report from a cleanup run
#[derive(Debug, Clone, Serialize)]
pub struct CleanReport {
    pub removed: Vec<RemovedArtifact>,
    /// Timestamp written to the cleanup marker
    pub cleaned_at: DateTime<Utc>,
}

/// Retention window for a root
pub fn max_age(root: ArtifactRoot, config: &Config) -> Duration {
    let days = match root {
        ArtifactRoot::Test => config.test_retention_days,
        ArtifactRoot::Local => config.local_retention_days,
    };
    Duration::from_secs(days as u64 * SECS_PER_DAY)
}

/// Remove stale artifacts from both roots, then record the cleanup.
///
/// Roots are processed test first, then local. A failure aborts the run
/// without touching the marker, but removals already done in earlier
/// roots stay done.
pub fn clean(layout: &SandboxLayout, config: &Config) -> Result<CleanReport> {
    let now = SystemTime::now();
    let mut removed = Vec::new();

    for root in ArtifactRoot::ALL {
        let dir = layout.root_dir(root);
        let pruned = prune_older_than(&dir, max_age(root, config), now)
            .phase(&format!("failed to clean {} artifacts", root.label()))?;
        removed.extend(pruned.into_iter().map(|(path, age)| RemovedArtifact {
            path,
            root,
            age_days: age.as_secs() / SECS_PER_DAY,
        }));
    }

    let cleaned_at = DateTime::<Utc>::from(now);
    CleanupMarker::new(layout.cleanup_marker())
        .store(cleaned_at)
        .phase("failed to record cleanup time")?;

    Ok(CleanReport {
        removed,
        cleaned_at,
    })
}

/// Delete every directory below `root` whose mtime is more than `max_age`
/// before `now`. A removed directory is not descended into.
///
/// Returns the removed paths with their ages. A missing root is a no-op.
pub fn prune_older_than(
    root: &Path,
    max_age: Duration,
    now: SystemTime,
) -> Result<Vec<(PathBuf, Duration)>> {
    let mut removed = Vec::new();
    if !root_exists(root)? {
        tracing::debug!("nothing to clean in missing {}", root.display());
        return Ok(removed);
    }

    let mut walker = WalkDir::new(root).follow_links(false).min_depth(1).into_iter();
    while let Some(entry) = walker.next() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if is_not_found(&e) => continue,
            Err(e) => return Err(e.into()),
        };
        if !entry.file_type().is_dir() {
            continue;
        }

        let modified = entry
            .metadata()?
            .modified()
            .map_err(|e| SandboxError::io(entry.path(), e))?;
        // mtimes in the future are never stale
        let age = match now.duration_since(modified) {
            Ok(age) => age,
            Err(_) => continue,
        };
        if age <= max_age {
            continue;
        }

        tracing::info!("removing old artifact {}", entry.path().display());
        match std::fs::remove_dir_all(entry.path()) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(SandboxError::io(entry.path(), e)),
        }
        removed.push((entry.path().to_path_buf(), age));
        walker.skip_current_dir();
    }

    Ok(removed)
}

fn is_not_found(e: &walkdir::Error) -> bool {
    e.io_error()
        .map(|io| io.kind() == ErrorKind::NotFound)
        .unwrap_or(false)
}
