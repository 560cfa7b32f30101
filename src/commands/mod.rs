//! CLI command implementations.
//!
//! - **generate**: parse a header and write the signature artifact
//! - **census**: rank descriptor usage
//! - **summary**: count functions per API category
//! - **check-docs**: cross-check the table against the reference manual
//! - **version**: load the native library and query its version
//! - **init**: write a default `.dwfbind.toml`

pub mod check_docs;
pub mod generate;
pub mod init;
pub mod reports;
pub mod version;

pub use check_docs::check_docs;
pub use generate::generate_artifact;
pub use init::init_config;
pub use reports::{run_census, run_summary};
pub use version::print_version;

use crate::config::DwfbindConfig;
use crate::header::{embedded_table, load_artifact, SignatureTable};
use crate::io;
use anyhow::{Context, Result};
use std::borrow::Cow;
use std::path::Path;

/// The table a report runs over: `--artifact`, then the configured artifact,
/// then the embedded one.
pub fn select_table(
    artifact: Option<&Path>,
    config: &DwfbindConfig,
) -> Result<Cow<'static, SignatureTable>> {
    match artifact.or(config.artifact.path.as_deref()) {
        Some(path) => {
            let text = io::read_file(path)?;
            let table = load_artifact(&text)
                .with_context(|| format!("Invalid signature artifact {}", path.display()))?;
            tracing::debug!(path = %path.display(), functions = table.len(), "Loaded artifact");
            Ok(Cow::Owned(table))
        }
        None => Ok(Cow::Borrowed(
            embedded_table().context("Embedded signature artifact is invalid")?,
        )),
    }
}
