//! `.dwfbind.toml` configuration.

mod core;
mod loader;

pub use self::core::{ArtifactConfig, DwfbindConfig, LoggingConfig, CONFIG_FILE_NAME};
pub use loader::{directory_ancestors, load_config, load_config_from, parse_and_validate_config};
