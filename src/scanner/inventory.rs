use super::artifact::{Artifact, ArtifactFilter, ArtifactSource, Layer};
use super::listing::{dir_name, DirListing};
use crate::common::layout::{SandboxLayout, CHART_MARKER, INVENTORY_MARKER};

/// Scan the inventory repository, one layer directory at a time.
///
/// Missing or unreadable layer directories contribute nothing.
pub fn scan_inventory(layout: &SandboxLayout, filter: &ArtifactFilter) -> Vec<Artifact> {
    let inventory_dir = layout.inventory_dir();
    let mut artifacts = Vec::new();

    for layer in Layer::ALL {
        if !filter.wants_layer(layer.code()) {
            continue;
        }

        let layer_dir = inventory_dir.join(layer.code());
        for artifact_path in DirListing::read(&layer_dir).into_entries(&layer_dir) {
            let has_inventory = artifact_path.join(INVENTORY_MARKER).exists();
            let has_chart = artifact_path.join(CHART_MARKER).exists();

            artifacts.push(Artifact {
                name: dir_name(&artifact_path),
                layer: layer.code().to_string(),
                path: artifact_path,
                source: ArtifactSource::Inventory,
                environment: None,
                has_chart,
                has_inventory,
            });
        }
    }

    tracing::debug!("inventory scan found {} artifacts", artifacts.len());
    artifacts
}
