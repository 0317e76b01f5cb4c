use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::errors::{Result, SandboxError};

/// Name of the optional per-sandbox configuration file
pub const CONFIG_FILE: &str = ".nx-sandbox.toml";

/// Sandbox configuration, read from `<base>/.nx-sandbox.toml`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Age in days after which test artifacts are removed
    #[serde(default = "default_test_retention_days")]
    pub test_retention_days: u32,

    /// Age in days after which local artifacts are removed
    #[serde(default = "default_local_retention_days")]
    pub local_retention_days: u32,

    /// Disk usage above this many MB marks the sandbox unhealthy
    #[serde(default = "default_disk_usage_threshold_mb")]
    pub disk_usage_threshold_mb: u64,

    /// More test artifacts than this raises a cleanup hint
    #[serde(default = "default_test_artifact_limit")]
    pub test_artifact_limit: usize,
}

fn default_test_retention_days() -> u32 {
    7
}
fn default_local_retention_days() -> u32 {
    30
}
fn default_disk_usage_threshold_mb() -> u64 {
    1024
}
fn default_test_artifact_limit() -> usize {
    50
}

impl Default for Config {
    fn default() -> Self {
        Self {
            test_retention_days: default_test_retention_days(),
            local_retention_days: default_local_retention_days(),
            disk_usage_threshold_mb: default_disk_usage_threshold_mb(),
            test_artifact_limit: default_test_artifact_limit(),
        }
    }
}

impl Config {
    /// Get the config file path for a sandbox base directory
    pub fn config_path(base_dir: &Path) -> PathBuf {
        base_dir.join(CONFIG_FILE)
    }

    /// Load config from the base directory, or defaults if there is none
    pub fn load(base_dir: &Path) -> Result<Self> {
        let path = Self::config_path(base_dir);
        let contents = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Config::default()),
            Err(e) => {
                return Err(SandboxError::Config {
                    path,
                    message: e.to_string(),
                })
            }
        };
        toml::from_str(&contents).map_err(|e| SandboxError::Config {
            path,
            message: e.to_string(),
        })
    }

    /// Write config into the base directory, replacing any existing file
    pub fn save(&self, base_dir: &Path) -> Result<PathBuf> {
        let path = Self::config_path(base_dir);
        let contents = toml::to_string_pretty(self).map_err(|e| SandboxError::Config {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, contents).map_err(|e| SandboxError::io(&path, e))?;
        Ok(path)
    }

    /// Disk usage threshold in bytes, clamped to `u64::MAX`
    pub fn disk_usage_threshold_bytes(&self) -> u64 {
        self.disk_usage_threshold_mb.saturating_mul(1024 * 1024)
    }
}
