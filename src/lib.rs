//! # nx-sandbox
//!
//! Local sandbox manager for Nexus artifacts.
//!
//! The sandbox mirrors artifacts from the central inventory repository and
//! from per-environment repositories. This crate:
//!
//! - **Lists** artifacts from both sources, filtered by source, layer or environment
//! - **Reports** sandbox health: artifact counts and disk usage of the test/local roots
//! - **Cleans** stale test (7 days) and local (30 days) artifacts and records when it ran

pub mod cleaner;
pub mod cli;
pub mod common;
pub mod manager;
pub mod scanner;
pub mod status;

pub use manager::SandboxManager;
