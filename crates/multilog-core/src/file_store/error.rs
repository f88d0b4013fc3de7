//! File store error types

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during file store operations
#[derive(Error, Debug)]
pub enum FileStoreError {
    #[error("Invalid file store configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Other(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

impl FileStoreError {
    /// Attach the path an IO error happened on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }
}

pub type FileStoreResult<T> = Result<T, FileStoreError>;
