//! Typed errors for failures that must abort before any generative call.
//!
//! Everything past setup is recoverable and surfaces as a warning in the
//! per-mode report instead of an error.

use std::path::PathBuf;

/// Setup errors: the package or an input file is missing or unusable.
#[derive(Debug, thiserror::Error)]
pub enum PackageError {
    #[error("Directory '{}' does not exist", .0.display())]
    MissingDirectory(PathBuf),

    #[error("'{}' is missing {file}", dir.display())]
    MissingFile { dir: PathBuf, file: &'static str },

    #[error("Directory '{}' already exists", .0.display())]
    AlreadyExists(PathBuf),

    #[error("File '{}' does not exist", .0.display())]
    MissingInput(PathBuf),

    #[error("'{}' is not a Python file", .0.display())]
    NotPython(PathBuf),

    #[error("Failed to parse {}: {source}", path.display())]
    InvalidManifest {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Failures reported by a generative text service.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("{0} environment variable not set")]
    MissingApiKey(String),

    #[error("Request to generative service failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Generative service returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Generative service returned no text content")]
    EmptyResponse,
}
