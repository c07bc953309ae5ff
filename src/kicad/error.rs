//! Error types for KiCad footprint output.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for KiCad footprint operations.
pub type KicadResult<T> = Result<T, KicadError>;

/// Errors that can occur while naming or writing footprints.
#[derive(Debug, Error)]
pub enum KicadError {
    /// Failed to create the library directory.
    #[error("Failed to create directory: {path}")]
    CreateDir {
        /// Directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Failed to write the footprint file.
    #[error("Failed to write file: {path}")]
    FileWrite {
        /// Path to the file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A name template referenced a field that was not supplied.
    #[error("Unknown placeholder '{key}' in template '{template}'")]
    UnknownPlaceholder {
        /// Placeholder name.
        key: String,
        /// The template being rendered.
        template: String,
    },

    /// A placeholder carried a format spec that does not apply to its value.
    #[error("Invalid format spec '{spec}' for placeholder '{key}'")]
    InvalidFormatSpec {
        /// Placeholder name.
        key: String,
        /// The offending format spec.
        spec: String,
    },
}

impl KicadError {
    /// Creates a directory creation error.
    pub fn create_dir(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::CreateDir {
            path: path.into(),
            source,
        }
    }

    /// Creates a file write error.
    pub fn file_write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::FileWrite {
            path: path.into(),
            source,
        }
    }

    /// Creates an unknown placeholder error.
    pub fn unknown_placeholder(key: impl Into<String>, template: impl Into<String>) -> Self {
        Self::UnknownPlaceholder {
            key: key.into(),
            template: template.into(),
        }
    }

    /// Creates an invalid format spec error.
    pub fn invalid_format_spec(key: impl Into<String>, spec: impl Into<String>) -> Self {
        Self::InvalidFormatSpec {
            key: key.into(),
            spec: spec.into(),
        }
    }
}
