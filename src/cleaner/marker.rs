use chrono::{DateTime, SecondsFormat, Utc};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::common::errors::{Result, SandboxError};

/// Persisted last-cleanup timestamp.
///
/// The file holds a bare RFC 3339 timestamp and nothing else.
#[derive(Debug, Clone)]
pub struct CleanupMarker {
    path: PathBuf,
}

impl CleanupMarker {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Last recorded cleanup, or `None` if no cleanup has ever run.
    ///
    /// A marker with unparsable content also reads as `None`.
    pub fn load(&self) -> Result<Option<DateTime<Utc>>> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(SandboxError::io(&self.path, e)),
        };

        match DateTime::parse_from_rfc3339(contents.trim()) {
            Ok(ts) => Ok(Some(ts.with_timezone(&Utc))),
            Err(e) => {
                tracing::warn!(
                    "cleanup marker {} is not a timestamp: {}",
                    self.path.display(),
                    e
                );
                Ok(None)
            }
        }
    }

    /// Overwrite the marker with `at`
    pub fn store(&self, at: DateTime<Utc>) -> Result<()> {
        std::fs::write(&self.path, format_timestamp(at))
            .map_err(|e| SandboxError::io(&self.path, e))?;
        tracing::info!("recorded cleanup at {}", format_timestamp(at));
        Ok(())
    }
}

/// Wire format of the marker: `YYYY-MM-DDTHH:MM:SSZ`
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_missing_marker_is_never() {
        let dir = tempfile::tempdir().unwrap();
        let marker = CleanupMarker::new(dir.path().join(".nx-sandbox-cleanup"));
        assert_eq!(marker.load().unwrap(), None);
    }

    #[test]
    fn test_store_writes_raw_timestamp() {
        let dir = tempfile::tempdir().unwrap();
        let marker = CleanupMarker::new(dir.path().join(".nx-sandbox-cleanup"));
        let at = Utc.with_ymd_and_hms(2026, 3, 4, 5, 6, 7).unwrap();

        marker.store(at).unwrap();

        let raw = std::fs::read_to_string(marker.path()).unwrap();
        assert_eq!(raw, "2026-03-04T05:06:07Z");
        assert_eq!(marker.load().unwrap(), Some(at));
    }

    #[test]
    fn test_offset_timestamps_are_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let marker = CleanupMarker::new(dir.path().join(".nx-sandbox-cleanup"));
        std::fs::write(marker.path(), "2026-03-04T06:06:07+01:00\n").unwrap();

        let expected = Utc.with_ymd_and_hms(2026, 3, 4, 5, 6, 7).unwrap();
        assert_eq!(marker.load().unwrap(), Some(expected));
    }

    #[test]
    fn test_garbage_marker_reads_as_never() {
        let dir = tempfile::tempdir().unwrap();
        let marker = CleanupMarker::new(dir.path().join(".nx-sandbox-cleanup"));
        std::fs::write(marker.path(), "yesterday").unwrap();
        assert_eq!(marker.load().unwrap(), None);
    }
}
