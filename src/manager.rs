use std::path::{Path, PathBuf};

use crate::cleaner::{self, CleanReport};
use crate::common::config::Config;
use crate::common::errors::{Result, SandboxError};
use crate::common::layout::SandboxLayout;
use crate::scanner::{self, artifact::Artifact, artifact::ArtifactFilter};
use crate::status::{self, SandboxStatus};

/// Entry point for every sandbox operation.
///
/// Holds the base directory layout and configuration; each call reads
/// the filesystem afresh.
#[derive(Debug, Clone)]
pub struct SandboxManager {
    layout: SandboxLayout,
    config: Config,
}

impl SandboxManager {
    pub fn new(base_dir: impl Into<PathBuf>, config: Config) -> Self {
        Self {
            layout: SandboxLayout::new(base_dir),
            config,
        }
    }

    /// Manager for `base_dir` using its `.nx-sandbox.toml`, if any
    pub fn open(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        let config = Config::load(&base_dir)?;
        Ok(Self::new(base_dir, config))
    }

    pub fn base_dir(&self) -> &Path {
        self.layout.base_dir()
    }

    pub fn layout(&self) -> &SandboxLayout {
        &self.layout
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn list_artifacts(&self, filter: &ArtifactFilter) -> Result<Vec<Artifact>> {
        scanner::list_artifacts(&self.layout, filter)
    }

    pub fn get_artifact_info(&self, name: &str) -> Result<Artifact> {
        scanner::find_artifact(&self.layout, name)
    }

    pub fn get_status(&self) -> Result<SandboxStatus> {
        status::get_status(&self.layout, &self.config)
    }

    pub fn clean(&self) -> Result<CleanReport> {
        cleaner::clean(&self.layout, &self.config)
    }

    /// Clone an artifact repository for local testing.
    ///
    /// Not implemented: always fails.
    pub fn clone_artifact(&self, org: &str, repo: &str, prepare_testing: bool) -> Result<()> {
        tracing::debug!(
            "clone requested for {}/{} (prepare_testing={})",
            org,
            repo,
            prepare_testing
        );
        Err(SandboxError::NotImplemented {
            feature: "clone".to_string(),
        })
    }
}
