//! Error types for stub generation.
//!
//! Classification and signature inference never fail; everything that can go
//! wrong happens at the edges: the target is not native, a file cannot be
//! read or written, or an input document is malformed.

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StubgenError {
    /// The module has ordinary source and takes the source-based path.
    #[error("{module} is not a native module")]
    NotNativeModule { module: String },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid module snapshot {}: {source}", path.display())]
    Snapshot {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Configuration error in {}: {message}", path.display())]
    Config { path: PathBuf, message: String },
}

impl StubgenError {
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn config(path: impl AsRef<Path>, message: impl Into<String>) -> Self {
        Self::Config {
            path: path.as_ref().to_path_buf(),
            message: message.into(),
        }
    }

    /// Precondition failures abort before any output is produced.
    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::NotNativeModule { .. })
    }
}

pub type Result<T> = std::result::Result<T, StubgenError>;
