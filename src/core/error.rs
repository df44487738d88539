//! core/error.rs
//!
//! One error type for everything under `core`.
//! The GUI turns these into status strings at the message boundary.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// File I/O errors
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// ID3 read/write errors
    #[error("ID3 error: {0}")]
    Tag(#[from] id3::Error),

    /// JSON syntax errors (comment blob, presets, settings)
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// JSON that parsed but is not an object
    #[error("Expected a JSON object, found {0}")]
    NotAnObject(&'static str),

    #[error("Folder not found: {}", .0.display())]
    FolderNotFound(PathBuf),

    #[error("Preset '{0}' not found")]
    PresetNotFound(String),

    #[error("Invalid preset name: {0:?}")]
    InvalidPresetName(String),

    /// Rename target already exists and overwrite was not requested
    #[error("A file named '{0}' already exists")]
    TargetExists(String),

    #[error("Invalid file name: {0:?}")]
    InvalidFileName(String),

    #[error("At most {max} sort rules are allowed")]
    TooManySortRules { max: usize },
}

/// Convenience Result type using the core Error
pub type Result<T> = std::result::Result<T, Error>;
