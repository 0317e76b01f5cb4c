pub mod artifact;
pub mod environment;
pub mod inventory;
pub mod listing;

use crate::common::errors::{PhaseContext, Result, SandboxError};
use crate::common::layout::SandboxLayout;

use artifact::{Artifact, ArtifactFilter, ArtifactSource};

/// Discover artifacts from both sources.
///
/// Inventory artifacts come first, then environment artifacts, each in
/// directory name order. Nothing is deduplicated.
pub fn list_artifacts(layout: &SandboxLayout, filter: &ArtifactFilter) -> Result<Vec<Artifact>> {
    let mut artifacts = Vec::new();

    if filter.wants_source(ArtifactSource::Inventory) {
        artifacts.extend(inventory::scan_inventory(layout, filter));
    }

    if filter.wants_source(ArtifactSource::Environment) {
        let found = environment::scan_environments(layout, filter)
            .phase("failed to scan environment artifacts")?;
        artifacts.extend(found);
    }

    Ok(artifacts)
}

/// First artifact with this name across an unfiltered listing
pub fn find_artifact(layout: &SandboxLayout, name: &str) -> Result<Artifact> {
    list_artifacts(layout, &ArtifactFilter::default())?
        .into_iter()
        .find(|a| a.name == name)
        .ok_or_else(|| SandboxError::ArtifactNotFound {
            name: name.to_string(),
        })
}
