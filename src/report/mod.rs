//! Reports over a signature table: API summary by category, descriptor
//! census, and the header/documentation cross-check.

pub mod census;
pub mod docs;
pub mod summary;

pub use census::{census_report, CensusReport, CensusRow};
pub use docs::{
    check_documentation, parse_documentation_list, DocsReport, DocumentedFunction,
    UndocumentedFunction,
};
pub use summary::{api_category, summarize_api, ApiSummary, CategoryCount, API_CATEGORIES};

use crate::errors::Result;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    Terminal,
    Json,
}

/// A report that can print itself as a terminal table; JSON output comes
/// from its `Serialize` impl.
pub trait Report: Serialize {
    fn write_terminal(&self, writer: &mut dyn Write) -> std::io::Result<()>;
}

pub fn write_report<R: Report>(
    report: &R,
    format: ReportFormat,
    writer: &mut dyn Write,
) -> Result<()> {
    match format {
        ReportFormat::Json => {
            serde_json::to_writer_pretty(&mut *writer, report)?;
            writeln!(writer)?;
        }
        ReportFormat::Terminal => report.write_terminal(writer)?,
    }
    Ok(())
}

/// Heading plus `=` underline, the way the terminal reports start.
fn write_heading(writer: &mut dyn Write, title: &str) -> std::io::Result<()> {
    writeln!(writer)?;
    writeln!(writer, "{title}")?;
    writeln!(writer, "{}", "=".repeat(title.len()))?;
    writeln!(writer)
}
