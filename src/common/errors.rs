use std::path::PathBuf;
use thiserror::Error;

/// Typed errors for sandbox operations.
/// The binary wraps these in `anyhow` at the top level,
/// but library callers can match on the exact failure.
#[derive(Debug, Error)]
pub enum SandboxError {
    /// File system operation failed for a reason other than absence
    #[error("I/O error at '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Recursive directory walk failed
    #[error("directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),

    /// Environment repository pattern could not be compiled
    #[error("invalid pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    /// No artifact with this name in any source
    #[error("artifact '{name}' not found")]
    ArtifactNotFound { name: String },

    /// Operation exists in the public surface but has no implementation
    #[error("{feature} is not implemented yet")]
    NotImplemented { feature: String },

    /// Configuration file is unreadable or invalid
    #[error("config error in '{}': {message}", .path.display())]
    Config { path: PathBuf, message: String },

    /// Names the phase in which the wrapped error happened
    #[error("{phase}")]
    Phase {
        phase: String,
        #[source]
        source: Box<SandboxError>,
    },
}

pub type Result<T> = std::result::Result<T, SandboxError>;

impl SandboxError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SandboxError::Io {
            path: path.into(),
            source,
        }
    }

    /// The innermost error, skipping any phase wrappers
    pub fn root_cause(&self) -> &SandboxError {
        match self {
            SandboxError::Phase { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

/// Attach a phase description to a failing result
pub trait PhaseContext<T> {
    fn phase(self, phase: &str) -> Result<T>;
}

impl<T> PhaseContext<T> for Result<T> {
    fn phase(self, phase: &str) -> Result<T> {
        self.map_err(|e| SandboxError::Phase {
            phase: phase.to_string(),
            source: Box::new(e),
        })
    }
}
