use std::fs;
use std::path::{Path, PathBuf};

use super::core::{DwfbindConfig, CONFIG_FILE_NAME};
use crate::errors::{Error, Result, ResultExt};

const MAX_TRAVERSAL_DEPTH: usize = 10;

/// Parse config from a TOML string, rejecting unusable values.
pub fn parse_and_validate_config(contents: &str) -> Result<DwfbindConfig> {
    let config = toml::from_str::<DwfbindConfig>(contents)
        .context(format!("Failed to parse {CONFIG_FILE_NAME}"))?;

    if let Some(filter) = &config.logging.filter {
        if filter.trim().is_empty() {
            return Err(Error::Configuration(
                "logging.filter must not be empty".to_string(),
            ));
        }
    }
    if config
        .library
        .path
        .as_ref()
        .is_some_and(|path| path.as_os_str().is_empty())
    {
        return Err(Error::Configuration(
            "library.path must not be empty".to_string(),
        ));
    }

    Ok(config)
}

fn try_load_config_from_path(config_path: &Path) -> Option<DwfbindConfig> {
    let contents = match fs::read_to_string(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            handle_read_error(config_path, &e);
            return None;
        }
    };

    match parse_and_validate_config(&contents) {
        Ok(config) => {
            tracing::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            tracing::warn!("{}. Using defaults.", e);
            None
        }
    }
}

/// Only log actual errors, not "file not found"
fn handle_read_error(config_path: &Path, error: &std::io::Error) {
    if error.kind() != std::io::ErrorKind::NotFound {
        tracing::warn!(
            "Failed to read config file {}: {}",
            config_path.display(),
            error
        );
    }
}

/// `start` and its ancestors, nearest first, at most `max_depth` of them.
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Load the nearest `.dwfbind.toml` at or above `start`.
pub fn load_config_from(start: PathBuf) -> DwfbindConfig {
    directory_ancestors(start, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            tracing::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            DwfbindConfig::default()
        })
}

/// Load the nearest `.dwfbind.toml` at or above the working directory.
pub fn load_config() -> DwfbindConfig {
    match std::env::current_dir() {
        Ok(dir) => load_config_from(dir),
        Err(e) => {
            tracing::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            DwfbindConfig::default()
        }
    }
}
