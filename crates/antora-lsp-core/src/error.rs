//! Error types for antora-lsp-core

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AntoraError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Workspace search was cancelled")]
    Cancelled,

    #[error("Workspace walk failed: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("No workspace folder contains {0}")]
    NoWorkspaceFolder(PathBuf),

    #[error("Unsupported content source: {0} (only local worktrees are supported)")]
    UnsupportedSource(String),

    #[error("Invalid component descriptor {path}: {message}")]
    ComponentDescriptor { path: PathBuf, message: String },

    #[error("Failed to persist state to {path}: {message}")]
    State { path: PathBuf, message: String },

    #[error("Background task failed: {0}")]
    Task(String),
}

impl AntoraError {
    /// Wrap an I/O error with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, AntoraError>;
