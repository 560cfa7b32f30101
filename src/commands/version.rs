use crate::config::DwfbindConfig;
use crate::runtime::{DwfLibrary, LibraryConfig};
use anyhow::Result;
use std::path::PathBuf;

/// Load the native library (`--library`, then the configured path, then the
/// platform default) and print the version it reports.
pub fn print_version(library: Option<PathBuf>, config: &DwfbindConfig) -> Result<()> {
    let library_config = LibraryConfig {
        path: library.or_else(|| config.library.path.clone()),
    };
    let dwf = DwfLibrary::load(&library_config)?;
    println!("DWF library version: {}", dwf.version()?);
    Ok(())
}
