//! Error types for project-level operations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading settings, catalogs or workspace files.
#[derive(Debug, Error)]
pub enum ProjectError {
    /// A file or directory could not be read.
    #[error("IO error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Settings JSON did not decode.
    #[error("Invalid settings: {0}")]
    Settings(#[source] serde_json::Error),

    /// Native catalog JSON did not decode.
    #[error("Invalid native catalog: {0}")]
    Catalog(#[source] serde_json::Error),

    /// The workspace root is missing or is not a directory.
    #[error("Workspace root not found: {}", .0.display())]
    WorkspaceRoot(PathBuf),
}

impl ProjectError {
    /// Create an IO error for `path`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn workspace_root(path: impl Into<PathBuf>) -> Self {
        Self::WorkspaceRoot(path.into())
    }
}
