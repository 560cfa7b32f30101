use super::select_table;
use crate::config::DwfbindConfig;
use crate::report::{census_report, summarize_api, write_report, ReportFormat};
use anyhow::Result;
use std::path::Path;

pub fn run_census(
    artifact: Option<&Path>,
    format: ReportFormat,
    config: &DwfbindConfig,
) -> Result<()> {
    let table = select_table(artifact, config)?;
    let report = census_report(&table)?;
    write_report(&report, format, &mut std::io::stdout().lock())?;
    Ok(())
}

pub fn run_summary(
    artifact: Option<&Path>,
    format: ReportFormat,
    config: &DwfbindConfig,
) -> Result<()> {
    let table = select_table(artifact, config)?;
    let summary = summarize_api(&table)?;
    write_report(&summary, format, &mut std::io::stdout().lock())?;
    Ok(())
}
