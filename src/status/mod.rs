pub mod usage;

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;

use crate::cleaner::marker::CleanupMarker;
use crate::common::config::Config;
use crate::common::errors::{PhaseContext, Result};
use crate::common::layout::SandboxLayout;

pub const ISSUE_HIGH_DISK_USAGE: &str = "High disk usage detected";
pub const ISSUE_MANY_TEST_ARTIFACTS: &str = "Many test artifacts - consider cleanup";
pub const RECOMMEND_NOTHING: &str = "Sandbox is in good condition";
pub const RECOMMEND_CLEANUP: &str = "Run cleanup to optimize space";

/// Snapshot of the status/cleanup roots
#[derive(Debug, Clone, Serialize)]
pub struct SandboxEnvironment {
    pub test_artifacts_dir: PathBuf,
    pub local_artifacts_dir: PathBuf,
    pub total_artifacts: usize,
    pub test_artifacts_count: usize,
    pub local_artifacts_count: usize,
    /// Bytes across both roots
    pub disk_usage: u64,
    pub last_cleanup: Option<DateTime<Utc>>,
}

/// Health verdict for a snapshot
#[derive(Debug, Clone, Serialize)]
pub struct SandboxStatus {
    pub environment: SandboxEnvironment,
    pub is_healthy: bool,
    pub issues: Vec<String>,
    pub recommendations: Vec<String>,
}

/// Measure both roots and evaluate health
pub fn get_status(layout: &SandboxLayout, config: &Config) -> Result<SandboxStatus> {
    let test_dir = layout.test_artifacts_dir();
    let local_dir = layout.local_artifacts_dir();

    let test_count = usage::count_dirs(&test_dir).phase("failed to count test artifacts")?;
    let local_count = usage::count_dirs(&local_dir).phase("failed to count local artifacts")?;

    let test_usage = usage::disk_usage(&test_dir)
        .phase("failed to calculate test artifacts disk usage")?;
    let local_usage = usage::disk_usage(&local_dir)
        .phase("failed to calculate local artifacts disk usage")?;

    let last_cleanup = match CleanupMarker::new(layout.cleanup_marker()).load() {
        Ok(ts) => ts,
        Err(e) => {
            tracing::warn!("ignoring unreadable cleanup marker: {}", e);
            None
        }
    };

    let environment = SandboxEnvironment {
        test_artifacts_dir: test_dir,
        local_artifacts_dir: local_dir,
        total_artifacts: test_count + local_count,
        test_artifacts_count: test_count,
        local_artifacts_count: local_count,
        disk_usage: test_usage + local_usage,
        last_cleanup,
    };

    Ok(evaluate_health(environment, config))
}

/// Apply the health rules, in order, to a snapshot.
///
/// Only disk usage affects `is_healthy`. Exactly one recommendation is
/// produced.
pub fn evaluate_health(environment: SandboxEnvironment, config: &Config) -> SandboxStatus {
    let mut is_healthy = true;
    let mut issues = Vec::new();

    if environment.disk_usage > config.disk_usage_threshold_bytes() {
        issues.push(ISSUE_HIGH_DISK_USAGE.to_string());
        is_healthy = false;
    }

    if environment.test_artifacts_count > config.test_artifact_limit {
        issues.push(ISSUE_MANY_TEST_ARTIFACTS.to_string());
    }

    let recommendation = if issues.is_empty() {
        RECOMMEND_NOTHING
    } else {
        RECOMMEND_CLEANUP
    };

    SandboxStatus {
        environment,
        is_healthy,
        issues,
        recommendations: vec![recommendation.to_string()],
    }
}
