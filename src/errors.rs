//! Shared error types for the crate

use crate::descriptor::{DescriptorError, RegistryError};
use crate::header::{ArtifactError, ParseError};
use crate::protocol::DwfError;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for dwfbind operations
#[derive(Debug, Error)]
pub enum Error {
    /// File system related errors
    #[error("File system error: {message}")]
    FileSystem {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Header declaration errors
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Generated artifact errors
    #[error(transparent)]
    Artifact(#[from] ArtifactError),

    /// Descriptor expression errors
    #[error(transparent)]
    Descriptor(#[from] DescriptorError),

    /// Registry resolution errors
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Native call boundary errors
    #[error(transparent)]
    Dwf(#[from] DwfError),

    /// Native library loading errors
    #[error("Failed to load native library {}: {source}", .path.display())]
    LibraryLoad {
        path: PathBuf,
        #[source]
        source: libloading::Error,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Generic errors with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// TOML errors
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

impl Error {
    /// Create a file system error with path context
    pub fn file_system(
        message: impl Into<String>,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::FileSystem {
            message: message.into(),
            path: Some(path.into()),
            source: Some(source),
        }
    }

    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        Self::WithContext {
            context: context.into(),
            message: self.to_string(),
        }
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.into().with_context(context))
    }
}
