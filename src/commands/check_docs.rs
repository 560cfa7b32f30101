use super::select_table;
use crate::config::DwfbindConfig;
use crate::io;
use crate::report::{check_documentation, parse_documentation_list, write_report, ReportFormat};
use anyhow::Result;
use std::path::Path;

pub fn check_docs(list: &Path, artifact: Option<&Path>, config: &DwfbindConfig) -> Result<()> {
    let table = select_table(artifact, config)?;
    let documented = parse_documentation_list(&io::read_file(list)?);
    let report = check_documentation(&table, &documented)?;

    tracing::info!(
        documented = documented.len(),
        undocumented = report.missing_from_docs.len(),
        unknown = report.missing_from_header.len(),
        "Checked header against documentation"
    );
    write_report(&report, ReportFormat::Terminal, &mut std::io::stdout().lock())?;
    Ok(())
}
