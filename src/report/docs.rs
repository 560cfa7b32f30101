//! Cross-check of header functions against the reference manual's function
//! list.
//!
//! The list is plain text: blank lines and `#` comments are skipped, a line
//! starting with `*` names the section for the lines that follow, and every
//! other line is one documented function name.

use super::Report;
use crate::descriptor::NullRegistry;
use crate::errors::Result;
use crate::header::SignatureTable;
use serde::Serialize;
use std::collections::HashSet;
use std::io::Write;

const MISMATCH: &str = "Header/Documentation mismatch";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentedFunction {
    pub name: String,
    pub section: Option<String>,
}

/// Documented functions in first-listed order. A name listed twice keeps its
/// first position and takes the later section.
#[must_use]
pub fn parse_documentation_list(text: &str) -> Vec<DocumentedFunction> {
    let mut section: Option<String> = None;
    let mut documented: Vec<DocumentedFunction> = Vec::new();

    for line in text.lines().map(str::trim) {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some(name) = line.strip_prefix('*') {
            section = Some(name.trim().to_string());
            continue;
        }
        match documented.iter().position(|d| d.name == line) {
            Some(slot) => documented[slot].section = section.clone(),
            None => documented.push(DocumentedFunction {
                name: line.to_string(),
                section: section.clone(),
            }),
        }
    }

    documented
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UndocumentedFunction {
    pub name: String,
    pub obsolete: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DocsReport {
    /// In the header, not in the manual; header order.
    pub missing_from_docs: Vec<UndocumentedFunction>,
    /// In the manual, not in the header; manual order.
    pub missing_from_header: Vec<DocumentedFunction>,
}

impl DocsReport {
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.missing_from_docs.is_empty() && self.missing_from_header.is_empty()
    }
}

pub fn check_documentation(
    table: &SignatureTable,
    documented: &[DocumentedFunction],
) -> Result<DocsReport> {
    let functions = table.resolve_with(&mut NullRegistry)?;

    let documented_names: HashSet<&str> = documented.iter().map(|d| d.name.as_str()).collect();
    let missing_from_docs = functions
        .iter()
        .filter(|f| !documented_names.contains(f.name.as_str()))
        .map(|f| UndocumentedFunction {
            name: f.name.clone(),
            obsolete: f.obsolete,
        })
        .collect();

    let missing_from_header = documented
        .iter()
        .filter(|d| table.get(&d.name).is_none())
        .cloned()
        .collect();

    Ok(DocsReport {
        missing_from_docs,
        missing_from_header,
    })
}

impl Report for DocsReport {
    fn write_terminal(&self, writer: &mut dyn Write) -> std::io::Result<()> {
        for function in &self.missing_from_docs {
            let tag = if function.obsolete { " (OBSOLETE)" } else { "" };
            writeln!(
                writer,
                "{MISMATCH}: in header file but not in reference manual: {}{tag}",
                function.name
            )?;
        }
        for function in &self.missing_from_header {
            writeln!(
                writer,
                "{MISMATCH}: in reference manual but not in header file: {} ({})",
                function.name,
                function.section.as_deref().unwrap_or("no section")
            )?;
        }
        writeln!(writer)
    }
}
