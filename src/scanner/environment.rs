use super::artifact::{Artifact, ArtifactFilter, ArtifactSource};
use super::listing::{dir_name, DirListing};
use crate::common::errors::{Result, SandboxError};
use crate::common::layout::{environment_name, SandboxLayout, CHART_MARKER};

/// Scan every `repos/nx-bolt-environment-*` repository.
///
/// Layout inside a repository is `<layer>/<service>/`. Unreadable
/// directories are skipped; only an invalid pattern is an error.
pub fn scan_environments(layout: &SandboxLayout, filter: &ArtifactFilter) -> Result<Vec<Artifact>> {
    let pattern = layout.environment_pattern();
    let matches = glob::glob(&pattern).map_err(|source| SandboxError::Pattern {
        pattern: pattern.clone(),
        source,
    })?;

    let mut artifacts = Vec::new();

    for entry in matches {
        let env_dir = match entry {
            Ok(path) => path,
            Err(e) => {
                tracing::warn!("skipping unreadable environment entry: {}", e);
                continue;
            }
        };

        if !env_dir.is_dir() {
            continue;
        }

        let env_name = environment_name(&env_dir);
        if !filter.wants_environment(&env_name) {
            continue;
        }

        for layer_dir in DirListing::read(&env_dir).into_entries(&env_dir) {
            let layer = dir_name(&layer_dir);
            if !filter.wants_layer(&layer) {
                continue;
            }

            for service_path in DirListing::read(&layer_dir).into_entries(&layer_dir) {
                let has_chart = service_path.join(CHART_MARKER).exists();

                artifacts.push(Artifact {
                    name: dir_name(&service_path),
                    layer: layer.clone(),
                    path: service_path,
                    source: ArtifactSource::Environment,
                    environment: Some(env_name.clone()),
                    has_chart,
                    has_inventory: false,
                });
            }
        }
    }

    tracing::debug!("environment scan found {} artifacts", artifacts.len());
    Ok(artifacts)
}
