use crate::header::{emit_artifact, parse_header};
use crate::io;
use anyhow::{Context, Result};
use std::path::Path;

/// Parse `header` and write its artifact to `output`. Provenance records the
/// header's file name, not the path it was read from.
pub fn generate_artifact(header: &Path, version: Option<&str>, output: &Path) -> Result<()> {
    let bytes = io::read_bytes(header)?;
    let file = header
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| header.display().to_string());

    let table = parse_header(&file, &bytes, version)
        .with_context(|| format!("Failed to parse {}", header.display()))?;
    io::write_file(output, &emit_artifact(&table))?;

    println!(
        "Wrote {} function signatures ({} obsolete) to {}",
        table.len(),
        table.obsolete_count(),
        output.display()
    );
    Ok(())
}
