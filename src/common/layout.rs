use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Directory holding one subdirectory per layer in the inventory repo
pub const INVENTORY_ROOT: [&str; 3] = ["repos", "nx-artifacts-inventory", "nx-artifacts"];

/// Prefix of every per-environment repository directory
pub const ENVIRONMENT_PREFIX: &str = "nx-bolt-environment-";

pub const INVENTORY_MARKER: &str = "nx-app-inventory.yaml";
pub const CHART_MARKER: &str = "Chart.yaml";

pub const TEST_ARTIFACTS_DIR: &str = "test-artifacts";
pub const LOCAL_ARTIFACTS_DIR: &str = "local-artifacts";
pub const CLEANUP_MARKER: &str = ".nx-sandbox-cleanup";

/// Name of the tool's own checkout; running from inside it means the
/// sandbox root is the parent directory.
const TOOL_DIR_NAME: &str = "nx-sandbox";

/// The two directories that status reports on and cleanup prunes.
/// Unrelated to the discovery trees under `repos/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactRoot {
    Test,
    Local,
}

impl ArtifactRoot {
    /// Cleanup order
    pub const ALL: [ArtifactRoot; 2] = [ArtifactRoot::Test, ArtifactRoot::Local];

    pub fn dir_name(&self) -> &'static str {
        match self {
            ArtifactRoot::Test => TEST_ARTIFACTS_DIR,
            ArtifactRoot::Local => LOCAL_ARTIFACTS_DIR,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ArtifactRoot::Test => "test",
            ArtifactRoot::Local => "local",
        }
    }
}

/// Where everything lives relative to the sandbox base directory
#[derive(Debug, Clone)]
pub struct SandboxLayout {
    base: PathBuf,
}

impl SandboxLayout {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base
    }

    pub fn inventory_dir(&self) -> PathBuf {
        INVENTORY_ROOT
            .iter()
            .fold(self.base.clone(), |acc, part| acc.join(part))
    }

    pub fn repos_dir(&self) -> PathBuf {
        self.base.join("repos")
    }

    /// Glob matching every environment repository. The base directory is
    /// escaped so only the trailing `*` is a wildcard.
    pub fn environment_pattern(&self) -> String {
        let escaped = glob::Pattern::escape(&self.repos_dir().to_string_lossy());
        format!(
            "{}{}{}*",
            escaped,
            std::path::MAIN_SEPARATOR,
            ENVIRONMENT_PREFIX
        )
    }

    pub fn root_dir(&self, root: ArtifactRoot) -> PathBuf {
        self.base.join(root.dir_name())
    }

    pub fn test_artifacts_dir(&self) -> PathBuf {
        self.root_dir(ArtifactRoot::Test)
    }

    pub fn local_artifacts_dir(&self) -> PathBuf {
        self.root_dir(ArtifactRoot::Local)
    }

    pub fn cleanup_marker(&self) -> PathBuf {
        self.base.join(CLEANUP_MARKER)
    }
}

/// Pick the sandbox base directory.
///
/// An explicit directory always wins. Otherwise the current directory is
/// used, or its parent when the tool is run from its own checkout.
pub fn resolve_base_dir(explicit: Option<&Path>) -> PathBuf {
    if let Some(dir) = explicit {
        return dir.to_path_buf();
    }
    let inside_tool = std::env::current_dir()
        .ok()
        .and_then(|cwd| cwd.file_name().map(|n| n == TOOL_DIR_NAME))
        .unwrap_or(false);
    if inside_tool {
        PathBuf::from("..")
    } else {
        PathBuf::from(".")
    }
}

/// Environment name encoded in an environment repository directory name
pub fn environment_name(dir: &Path) -> String {
    let name = dir
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    match name.strip_prefix(ENVIRONMENT_PREFIX) {
        Some(env) => env.to_string(),
        None => name,
    }
}
