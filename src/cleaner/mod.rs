pub mod engine;
pub mod marker;

pub use engine::{clean, prune_older_than, CleanReport, RemovedArtifact};
pub use marker::CleanupMarker;
