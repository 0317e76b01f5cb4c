use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ─── Core types ───────────────────────────────────────────────────────────────

/// Where an artifact was discovered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactSource {
    /// The central inventory repository
    Inventory,
    /// One of the per-environment repositories
    Environment,
}

impl std::fmt::Display for ArtifactSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArtifactSource::Inventory => write!(f, "inventory"),
            ArtifactSource::Environment => write!(f, "environment"),
        }
    }
}

/// Architectural layer codes used by the inventory repository
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layer {
    Al,
    Bal,
    Bb,
    Bc,
    Bff,
    Ch,
    Tc,
    Xp,
}

impl Layer {
    /// Every known layer, in inventory scan order
    pub const ALL: [Layer; 8] = [
        Layer::Al,
        Layer::Bal,
        Layer::Bb,
        Layer::Bc,
        Layer::Bff,
        Layer::Ch,
        Layer::Tc,
        Layer::Xp,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Layer::Al => "al",
            Layer::Bal => "bal",
            Layer::Bb => "bb",
            Layer::Bc => "bc",
            Layer::Bff => "bff",
            Layer::Ch => "ch",
            Layer::Tc => "tc",
            Layer::Xp => "xp",
        }
    }

    pub fn from_code(code: &str) -> Option<Layer> {
        Layer::ALL.iter().copied().find(|l| l.code() == code)
    }
}

impl std::fmt::Display for Layer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// One discovered service/package directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    pub name: String,
    /// Layer directory name; a known layer code for inventory artifacts,
    /// whatever the environment repo uses otherwise
    pub layer: String,
    pub path: PathBuf,
    pub source: ArtifactSource,
    /// Set only for environment artifacts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
    pub has_chart: bool,
    pub has_inventory: bool,
}

/// Equality filter over listings. `None` or an empty string matches all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtifactFilter {
    pub source: Option<ArtifactSource>,
    pub layer: Option<String>,
    pub environment: Option<String>,
}

impl ArtifactFilter {
    pub fn wants_source(&self, source: ArtifactSource) -> bool {
        self.source.map_or(true, |s| s == source)
    }

    pub fn wants_layer(&self, layer: &str) -> bool {
        wildcard_or_equal(self.layer.as_deref(), layer)
    }

    pub fn wants_environment(&self, environment: &str) -> bool {
        wildcard_or_equal(self.environment.as_deref(), environment)
    }

    /// Same filter pinned to a single source
    pub fn with_source(&self, source: ArtifactSource) -> Self {
        Self {
            source: Some(source),
            ..self.clone()
        }
    }
}

fn wildcard_or_equal(wanted: Option<&str>, actual: &str) -> bool {
    match wanted {
        None | Some("") => true,
        Some(w) => w == actual,
    }
}
