use crate::runtime::LibraryConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const CONFIG_FILE_NAME: &str = ".dwfbind.toml";

/// Root of `.dwfbind.toml`. Every section is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DwfbindConfig {
    /// Native library location
    #[serde(default)]
    pub library: LibraryConfig,

    /// Signature artifact used by the reports
    #[serde(default)]
    pub artifact: ArtifactConfig,

    /// Log filter
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactConfig {
    /// Artifact file to report on instead of the embedded one.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing` filter directive, e.g. `dwfbind=debug`.
    #[serde(default)]
    pub filter: Option<String>,
}
