//! Error types for loading the scenario catalog.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when loading the scenario catalog.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The catalog file is missing or unreadable
    #[error("failed to read scenario file {path}: {source}", path = .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The catalog file does not match the expected schema
    #[error("failed to parse scenario file {path}: {source}", path = .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}
