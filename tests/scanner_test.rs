use std::fs;
use std::path::Path;
use tempfile::TempDir;

use nx_sandbox::common::config::Config;
use nx_sandbox::common::errors::SandboxError;
use nx_sandbox::scanner::artifact::{ArtifactFilter, ArtifactSource};
use nx_sandbox::SandboxManager;

// ─── Fixtures ─────────────────────────────────────────────────────────────────

fn inventory_artifact(base: &Path, layer: &str, name: &str, inventory: bool, chart: bool) {
    let dir = base
        .join("repos/nx-artifacts-inventory/nx-artifacts")
        .join(layer)
        .join(name);
    fs::create_dir_all(&dir).unwrap();
    if inventory {
        fs::write(
            dir.join("nx-app-inventory.yaml"),
            format!("schema_version: \"1.0\"\nartifact_metadata:\n  artifact_name: \"{}\"\n", name),
        )
        .unwrap();
    }
    if chart {
        fs::write(dir.join("Chart.yaml"), "name: test").unwrap();
    }
}

fn environment_service(base: &Path, env: &str, layer: &str, name: &str, chart: bool) {
    let dir = base
        .join("repos")
        .join(format!("nx-bolt-environment-{}", env))
        .join(layer)
        .join(name);
    fs::create_dir_all(&dir).unwrap();
    if chart {
        fs::write(dir.join("Chart.yaml"), "name: test").unwrap();
    }
}

/// Two inventory layers and two environments with overlapping layers
fn sandbox() -> (TempDir, SandboxManager) {
    let tmp = TempDir::new().unwrap();
    let base = tmp.path();

    inventory_artifact(base, "bff", "svc1", true, true);
    inventory_artifact(base, "bff", "nx-bff-orders", true, false);
    inventory_artifact(base, "tc", "nx-tc-order-creator", false, true);

    environment_service(base, "dev1", "bff", "svc2", true);
    environment_service(base, "dev1", "tc", "nx-tc-pricing", false);
    environment_service(base, "sit", "bff", "nx-bff-orders", true);

    let manager = SandboxManager::new(base, Config::default());
    (tmp, manager)
}

fn names(artifacts: &[nx_sandbox::scanner::artifact::Artifact]) -> Vec<&str> {
    artifacts.iter().map(|a| a.name.as_str()).collect()
}

// ─── Discovery ────────────────────────────────────────────────────────────────

#[test]
fn test_inventory_artifact_record() {
    let (_tmp, manager) = sandbox();
    let filter = ArtifactFilter {
        source: Some(ArtifactSource::Inventory),
        layer: Some("bff".into()),
        ..Default::default()
    };

    let artifacts = manager.list_artifacts(&filter).unwrap();
    let svc1 = artifacts.iter().find(|a| a.name == "svc1").unwrap();

    assert_eq!(svc1.layer, "bff");
    assert_eq!(svc1.source, ArtifactSource::Inventory);
    assert_eq!(svc1.environment, None);
    assert!(svc1.has_chart);
    assert!(svc1.has_inventory);
    assert!(svc1.path.ends_with("nx-artifacts/bff/svc1"));
}

#[test]
fn test_environment_artifact_record() {
    let (_tmp, manager) = sandbox();
    let filter = ArtifactFilter {
        source: Some(ArtifactSource::Environment),
        environment: Some("dev1".into()),
        layer: Some("bff".into()),
    };

    let artifacts = manager.list_artifacts(&filter).unwrap();
    assert_eq!(artifacts.len(), 1);

    let svc2 = &artifacts[0];
    assert_eq!(svc2.name, "svc2");
    assert_eq!(svc2.layer, "bff");
    assert_eq!(svc2.source, ArtifactSource::Environment);
    assert_eq!(svc2.environment.as_deref(), Some("dev1"));
    assert!(svc2.has_chart);
    assert!(!svc2.has_inventory);
}

#[test]
fn test_marker_files_are_independent() {
    let (_tmp, manager) = sandbox();
    let artifacts = manager
        .list_artifacts(&ArtifactFilter {
            source: Some(ArtifactSource::Inventory),
            ..Default::default()
        })
        .unwrap();

    let orders = artifacts.iter().find(|a| a.name == "nx-bff-orders").unwrap();
    assert!(orders.has_inventory);
    assert!(!orders.has_chart);

    let creator = artifacts
        .iter()
        .find(|a| a.name == "nx-tc-order-creator")
        .unwrap();
    assert!(!creator.has_inventory);
    assert!(creator.has_chart);
}

#[test]
fn test_layer_filter_applies_to_every_result() {
    let (_tmp, manager) = sandbox();
    let filter = ArtifactFilter {
        layer: Some("bff".into()),
        ..Default::default()
    };

    let artifacts = manager.list_artifacts(&filter).unwrap();
    assert_eq!(artifacts.len(), 4);
    assert!(artifacts.iter().all(|a| a.layer == "bff"));
}

#[test]
fn test_source_filter_applies_to_every_result() {
    let (_tmp, manager) = sandbox();

    let inventory = manager
        .list_artifacts(&ArtifactFilter::default().with_source(ArtifactSource::Inventory))
        .unwrap();
    assert_eq!(inventory.len(), 3);
    assert!(inventory.iter().all(|a| a.source == ArtifactSource::Inventory));

    let environment = manager
        .list_artifacts(&ArtifactFilter::default().with_source(ArtifactSource::Environment))
        .unwrap();
    assert_eq!(environment.len(), 3);
    assert!(environment
        .iter()
        .all(|a| a.source == ArtifactSource::Environment && !a.has_inventory));
}

#[test]
fn test_unfiltered_is_inventory_then_environment() {
    let (_tmp, manager) = sandbox();
    let base = ArtifactFilter {
        layer: Some("bff".into()),
        ..Default::default()
    };

    let all = manager.list_artifacts(&base).unwrap();
    let mut expected = manager
        .list_artifacts(&base.with_source(ArtifactSource::Inventory))
        .unwrap();
    expected.extend(
        manager
            .list_artifacts(&base.with_source(ArtifactSource::Environment))
            .unwrap(),
    );

    assert_eq!(all, expected);
}

#[test]
fn test_listing_order_is_by_layer_then_name() {
    let (_tmp, manager) = sandbox();
    let all = manager.list_artifacts(&ArtifactFilter::default()).unwrap();

    assert_eq!(
        names(&all),
        vec![
            // inventory: bff, then tc
            "nx-bff-orders",
            "svc1",
            "nx-tc-order-creator",
            // environments: dev1 (bff, tc), then sit
            "svc2",
            "nx-tc-pricing",
            "nx-bff-orders",
        ]
    );
}

#[test]
fn test_duplicate_names_are_kept() {
    let (_tmp, manager) = sandbox();
    let all = manager.list_artifacts(&ArtifactFilter::default()).unwrap();
    let dupes = all.iter().filter(|a| a.name == "nx-bff-orders").count();
    assert_eq!(dupes, 2);
}

#[test]
fn test_environment_filter() {
    let (_tmp, manager) = sandbox();
    let filter = ArtifactFilter {
        environment: Some("sit".into()),
        source: Some(ArtifactSource::Environment),
        ..Default::default()
    };

    let artifacts = manager.list_artifacts(&filter).unwrap();
    assert_eq!(names(&artifacts), vec!["nx-bff-orders"]);
}

#[test]
fn test_unknown_environment_layers_are_listed() {
    let (tmp, manager) = sandbox();
    environment_service(tmp.path(), "dev1", "platform", "nx-ingress", true);

    let artifacts = manager
        .list_artifacts(&ArtifactFilter {
            layer: Some("platform".into()),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(names(&artifacts), vec!["nx-ingress"]);
}

#[test]
fn test_unknown_inventory_layers_are_ignored() {
    let tmp = TempDir::new().unwrap();
    inventory_artifact(tmp.path(), "platform", "nx-ingress", true, true);
    let manager = SandboxManager::new(tmp.path(), Config::default());

    let artifacts = manager.list_artifacts(&ArtifactFilter::default()).unwrap();
    assert!(artifacts.is_empty());
}

#[test]
fn test_files_are_not_artifacts() {
    let (tmp, manager) = sandbox();
    let layer_dir = tmp.path().join("repos/nx-artifacts-inventory/nx-artifacts/bff");
    fs::write(layer_dir.join("README.md"), "not an artifact").unwrap();
    fs::write(tmp.path().join("repos/nx-bolt-environment-notes"), "a file").unwrap();

    let all = manager.list_artifacts(&ArtifactFilter::default()).unwrap();
    assert_eq!(all.len(), 6);
}

#[test]
fn test_empty_sandbox_lists_nothing() {
    let tmp = TempDir::new().unwrap();
    let manager = SandboxManager::new(tmp.path(), Config::default());

    let artifacts = manager.list_artifacts(&ArtifactFilter::default()).unwrap();
    assert!(artifacts.is_empty());
}

#[cfg(unix)]
#[test]
fn test_unreadable_layer_is_skipped() {
    use std::os::unix::fs::PermissionsExt;

    let (tmp, manager) = sandbox();
    let tc_dir = tmp.path().join("repos/nx-artifacts-inventory/nx-artifacts/tc");
    fs::set_permissions(&tc_dir, fs::Permissions::from_mode(0o000)).unwrap();

    // root ignores permission bits, so only check when the dir really is unreadable
    let unreadable = fs::read_dir(&tc_dir).is_err();
    let result = manager.list_artifacts(&ArtifactFilter::default());
    fs::set_permissions(&tc_dir, fs::Permissions::from_mode(0o755)).unwrap();

    let artifacts = result.unwrap();
    if unreadable {
        assert!(artifacts.iter().all(|a| a.name != "nx-tc-order-creator"));
    }
    assert!(artifacts.iter().any(|a| a.name == "svc1"));
}

// ─── Artifact info ────────────────────────────────────────────────────────────

#[test]
fn test_artifact_info_found() {
    let (_tmp, manager) = sandbox();
    let artifact = manager.get_artifact_info("svc2").unwrap();
    assert_eq!(artifact.environment.as_deref(), Some("dev1"));
}

#[test]
fn test_artifact_info_prefers_inventory() {
    let (_tmp, manager) = sandbox();
    let artifact = manager.get_artifact_info("nx-bff-orders").unwrap();
    assert_eq!(artifact.source, ArtifactSource::Inventory);
}

#[test]
fn test_artifact_info_not_found() {
    let (_tmp, manager) = sandbox();
    let err = manager.get_artifact_info("nx-does-not-exist").unwrap_err();
    assert!(matches!(err, SandboxError::ArtifactNotFound { ref name } if name == "nx-does-not-exist"));
}

#[test]
fn test_artifact_json_shape() {
    let (_tmp, manager) = sandbox();
    let artifact = manager.get_artifact_info("svc1").unwrap();
    let json = serde_json::to_value(&artifact).unwrap();

    assert_eq!(json["source"], "inventory");
    assert_eq!(json["layer"], "bff");
    assert_eq!(json["has_chart"], true);
    assert!(json.get("environment").is_none());
}
