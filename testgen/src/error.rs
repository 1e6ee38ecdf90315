//! Error types for test generation.

use std::path::PathBuf;
use testsmith_core::ManifestError;
use thiserror::Error;

/// Result type for generation operations.
pub type GenerateResult<T> = Result<T, GenerateError>;

/// Errors that abort a generation run.
///
/// Value synthesis and formatting are total; only loading inputs and
/// touching the file system can fail.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The route manifest could not be loaded.
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// A custom template could not be read.
    #[error("failed to read template '{path}': {source}")]
    TemplateRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The output directory could not be created.
    #[error("failed to create directory '{path}': {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A test file could not be written.
    #[error("failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl GenerateError {
    pub fn template_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::TemplateRead {
            path: path.into(),
            source,
        }
    }

    pub fn create_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::CreateDir {
            path: path.into(),
            source,
        }
    }

    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }
}
